//! Page segmentation
//!
//! Finds the non-text regions of a binary page: halftone screens, photos,
//! large graphics and line art. Known text-word boxes are erased first so
//! they are never reported.
//!
//! The pipeline works at two resolutions. The page is padded so every
//! reduction is exact, and a half-resolution working raster `R` is built by
//! a strict 2x2 rank reduction. Halftone candidates are found on heavily
//! reduced copies (dotted screens survive reduction and opening, text does
//! not), grown back inside looser masks by seeded reconstruction, and
//! realigned to `R`. Everything in `R` that is not halftone is line art,
//! kept only when its components are large enough. The masks are then
//! expanded to full resolution, regrown against the page, clipped to the
//! original size and combined with the bounding boxes of very large
//! components.
//!
//! Implemented APIs:
//! - [`generate_nontext_mask`]: the raster pipeline
//! - [`find_image_regions`]: pipeline plus box extraction and de-duplication

use findimages_core::{BinaryRaster, Boxa, RopOp, SizeSelectRelation, SizeSelectType};
use findimages_morph::{
    MorphSequence, close_brick, dilate_brick, expand_pow2, morph_sequence, open_brick,
    reduce_rank_cascade,
};
use findimages_morph::rank::MAX_CASCADE_LEVELS;
use findimages_region::{ConnectivityType, conncomp_boxes, seedfill_binary, select_by_size};

use crate::dedupe::{dedupe_boxes, min_area_for_dpi};
use crate::region::ImageRegion;
use crate::stage::{NoopObserver, Stage, StageObserver};
use crate::{RecogError, RecogResult};

/// Resolution levels between the page and the working raster `R`.
const WORKING_LEVELS: u32 = 1;

/// Options for page segmentation
///
/// The defaults are empirically tuned; changing them changes what counts
/// as halftone.
#[derive(Debug, Clone)]
pub struct PageSegOptions {
    /// Page dimensions are padded up to a multiple of this (default: 64)
    pub pad_multiple: u32,
    /// Brick size for single-pixel noise removal (default: 3)
    pub clean_brick: u32,
    /// Components wider or taller than this many inches are kept whole
    /// (default: 0.5)
    pub large_component_fraction: f64,
    /// Rank threshold for the page to `R` reduction (default: 4)
    pub working_threshold: u8,
    /// Rank thresholds for reducing `R` to the seed resolution
    /// (default: [4, 4, 3])
    pub seed_reduction: Vec<u8>,
    /// Opening brick applied to the reduced seed (default: 5)
    pub seed_open_brick: u32,
    /// Rank thresholds for reducing the page to the seed-mask resolution;
    /// must be a single level so the mask lands on `R` (default: [1])
    pub seed_mask_reduction: Vec<u8>,
    /// Closing brick applied to the seed mask (default: 4)
    pub seed_mask_close_brick: u32,
    /// Connectivity for growing the primary seed (default: 8)
    pub primary_fill_connectivity: ConnectivityType,
    /// Sequence producing the secondary seed from the page
    /// (default: `r1143 + o5.5 + x4`)
    pub secondary_seed: MorphSequence,
    /// Sequence producing the secondary mask from the page
    /// (default: `r11`)
    pub secondary_mask: MorphSequence,
    /// Connectivity for growing the secondary seed (default: 8)
    pub secondary_fill_connectivity: ConnectivityType,
    /// Dilation brick applied to the secondary halftone mask (default: 3)
    pub secondary_dilate_brick: u32,
    /// Minimum line-art component width and height at `R` (default: 8)
    pub line_art_min_size: u32,
    /// Connectivity for line-art size filtering (default: 4)
    pub line_art_connectivity: ConnectivityType,
    /// Line-art closing brick, in points (default: 1.0)
    pub line_art_close_points: f64,
    /// Connectivity for regrowing the halftone mask at full resolution
    /// (default: 8)
    pub halftone_fill_connectivity: ConnectivityType,
    /// Connectivity for extracting output boxes (default: 8)
    pub final_connectivity: ConnectivityType,
}

impl Default for PageSegOptions {
    fn default() -> Self {
        Self {
            pad_multiple: 64,
            clean_brick: 3,
            large_component_fraction: 0.5,
            working_threshold: 4,
            seed_reduction: vec![4, 4, 3],
            seed_open_brick: 5,
            seed_mask_reduction: vec![1],
            seed_mask_close_brick: 4,
            primary_fill_connectivity: ConnectivityType::EightWay,
            secondary_seed: MorphSequence::new()
                .reduce_rank(&[1, 1, 4, 3])
                .open(5, 5)
                .expand(4),
            secondary_mask: MorphSequence::new().reduce_rank(&[1, 1]),
            secondary_fill_connectivity: ConnectivityType::EightWay,
            secondary_dilate_brick: 3,
            line_art_min_size: 8,
            line_art_connectivity: ConnectivityType::FourWay,
            line_art_close_points: 1.0,
            halftone_fill_connectivity: ConnectivityType::EightWay,
            final_connectivity: ConnectivityType::EightWay,
        }
    }
}

impl PageSegOptions {
    /// Set the padding multiple
    pub fn with_pad_multiple(mut self, multiple: u32) -> Self {
        self.pad_multiple = multiple;
        self
    }

    /// Set the large-component limit in inches
    pub fn with_large_component_fraction(mut self, inches: f64) -> Self {
        self.large_component_fraction = inches;
        self
    }

    /// Set the seed reduction thresholds and opening brick
    pub fn with_seed(mut self, reduction: &[u8], open_brick: u32) -> Self {
        self.seed_reduction = reduction.to_vec();
        self.seed_open_brick = open_brick;
        self
    }

    /// Set the seed mask reduction and closing brick
    pub fn with_seed_mask(mut self, reduction: &[u8], close_brick: u32) -> Self {
        self.seed_mask_reduction = reduction.to_vec();
        self.seed_mask_close_brick = close_brick;
        self
    }

    /// Set the secondary seed and mask sequences
    pub fn with_secondary(mut self, seed: MorphSequence, mask: MorphSequence) -> Self {
        self.secondary_seed = seed;
        self.secondary_mask = mask;
        self
    }

    /// Set the minimum line-art component size
    pub fn with_line_art_min_size(mut self, size: u32) -> Self {
        self.line_art_min_size = size;
        self
    }

    /// Set the line-art closing brick in points
    pub fn with_line_art_close_points(mut self, points: f64) -> Self {
        self.line_art_close_points = points;
        self
    }

    /// Check that the options describe a consistent pipeline
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameters`] for zero bricks, bad rank
    /// thresholds, non-positive scale factors, sequences whose outputs would
    /// not land on the working resolution, or a padding multiple that does
    /// not keep every reduction exact.
    pub fn validate(&self) -> RecogResult<()> {
        let invalid = |msg: String| Err(RecogError::InvalidParameters(msg));

        for (name, size) in [
            ("clean_brick", self.clean_brick),
            ("seed_open_brick", self.seed_open_brick),
            ("seed_mask_close_brick", self.seed_mask_close_brick),
            ("secondary_dilate_brick", self.secondary_dilate_brick),
            ("line_art_min_size", self.line_art_min_size),
        ] {
            if size == 0 {
                return invalid(format!("{name} must be positive"));
            }
        }
        for (name, value) in [
            ("large_component_fraction", self.large_component_fraction),
            ("line_art_close_points", self.line_art_close_points),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }

        if !(1..=4).contains(&self.working_threshold) {
            return invalid(format!(
                "working_threshold must be in 1..=4, got {}",
                self.working_threshold
            ));
        }
        for (name, levels) in [
            ("seed_reduction", &self.seed_reduction),
            ("seed_mask_reduction", &self.seed_mask_reduction),
        ] {
            if levels.is_empty() || levels.len() > MAX_CASCADE_LEVELS {
                return invalid(format!(
                    "{name} needs 1..={MAX_CASCADE_LEVELS} levels, got {}",
                    levels.len()
                ));
            }
            if levels.iter().any(|t| !(1..=4).contains(t)) {
                return invalid(format!("{name} thresholds must be in 1..=4"));
            }
        }
        if self.seed_mask_reduction.len() != WORKING_LEVELS as usize {
            return invalid(format!(
                "seed_mask_reduction must reduce {WORKING_LEVELS} level(s), got {}",
                self.seed_mask_reduction.len()
            ));
        }

        self.secondary_seed
            .verify()
            .and_then(|_| self.secondary_mask.verify())
            .map_err(|e| RecogError::InvalidParameters(format!("secondary path: {e}")))?;
        let seed_levels = self.secondary_seed.net_reduction();
        let mask_levels = self.secondary_mask.net_reduction();
        if seed_levels != mask_levels {
            return invalid(format!(
                "secondary seed and mask end at different resolutions ({seed_levels} vs {mask_levels} levels)"
            ));
        }
        if seed_levels < WORKING_LEVELS as i32 || seed_levels - WORKING_LEVELS as i32 > 4 {
            return invalid(format!(
                "secondary path must end 1 to {} levels below the page, got {seed_levels}",
                WORKING_LEVELS + 4
            ));
        }

        let deepest = self
            .max_reduction_levels()
            .max(WORKING_LEVELS + self.seed_reduction.len() as u32);
        let Some(step) = 1u32.checked_shl(deepest) else {
            return invalid(format!("{deepest} reduction levels is too deep"));
        };
        if self.pad_multiple == 0 || self.pad_multiple % step != 0 {
            return invalid(format!(
                "pad_multiple must be a positive multiple of {step}, got {}",
                self.pad_multiple
            ));
        }
        Ok(())
    }

    /// Deepest reduction reached anywhere in the secondary sequences.
    fn max_reduction_levels(&self) -> u32 {
        [&self.secondary_seed, &self.secondary_mask]
            .into_iter()
            .map(|seq| {
                let mut level = 0i32;
                let mut deepest = 0i32;
                for op in seq.ops() {
                    level += op.level_change();
                    deepest = deepest.max(level);
                }
                deepest as u32
            })
            .max()
            .unwrap_or(0)
    }

    /// Levels of expansion that bring the secondary mask back to `R`.
    fn secondary_expansion(&self) -> u32 {
        self.secondary_mask.net_reduction() as u32 - WORKING_LEVELS
    }

    /// Line-art closing brick for `dpi`, at least 1.
    fn line_art_brick(&self, dpi: f64) -> u32 {
        (dpi * self.line_art_close_points / 72.0).round().max(1.0) as u32
    }
}

/// Build the non-text mask of a binary page
///
/// # Arguments
///
/// * `binary` - page raster, set pixels are foreground
/// * `dpi` - page resolution in pixels per inch
/// * `words` - known text-word boxes to exclude, in page coordinates
/// * `options` - pipeline constants
/// * `observer` - receives every intermediate raster
///
/// # Returns
///
/// A raster of the original page size where set pixels belong to halftone,
/// large-graphic or line-art regions.
///
/// # Errors
///
/// Returns [`RecogError::InvalidParameters`] for a non-positive or
/// non-finite `dpi` or inconsistent options. Empty intermediate masks are
/// not errors.
pub fn generate_nontext_mask(
    binary: &BinaryRaster,
    dpi: f64,
    words: Option<&Boxa>,
    options: &PageSegOptions,
    observer: &mut dyn StageObserver,
) -> RecogResult<BinaryRaster> {
    check_dpi(dpi)?;
    options.validate()?;
    let (w, h) = binary.dimensions();

    let padded = binary.pad_to_multiple(options.pad_multiple)?;
    let cleaned = remove_noise(&padded, options.clean_brick)?;
    emit(observer, Stage::Cleaned, &cleaned);

    let mut page = cleaned;
    if let Some(words) = words {
        mask_words(&mut page, words);
    }
    emit(observer, Stage::WordsMasked, &page);

    let large = large_component_mask(&page, w, h, dpi * options.large_component_fraction)?;
    emit(observer, Stage::LargeComponents, &large);

    let reduced = reduce_rank_cascade(&page, &[options.working_threshold])?;
    emit(observer, Stage::Reduced, &reduced);

    // Primary path: seed at low resolution, realigned to R.
    let seed = {
        let low = reduce_rank_cascade(&reduced, &options.seed_reduction)?;
        let opened = open_brick(&low, options.seed_open_brick, options.seed_open_brick)?;
        expand_pow2(&opened, options.seed_reduction.len() as u32)?
    };
    emit(observer, Stage::HalftoneSeed, &seed);

    let seed_mask = close_brick(
        &reduce_rank_cascade(&page, &options.seed_mask_reduction)?,
        options.seed_mask_close_brick,
        options.seed_mask_close_brick,
    )?;
    emit(observer, Stage::HalftoneSeedMask, &seed_mask);

    let primary = seedfill_binary(&seed, &seed_mask, options.primary_fill_connectivity)?;
    emit(observer, Stage::PrimaryHalftone, &primary);

    let secondary = secondary_halftone(&page, options)?;
    emit(observer, Stage::SecondaryHalftone, &secondary);

    let combined = primary.or(&secondary)?;
    emit(observer, Stage::CombinedHalftone, &combined);

    let halftone_pixels = combined.and(&reduced)?;
    emit(observer, Stage::HalftonePixels, &halftone_pixels);

    let line_art = halftone_pixels.xor(&reduced)?;
    emit(observer, Stage::LineArt, &line_art);

    let min_size = options.line_art_min_size as i32;
    let kept_line_art = select_by_size(
        &line_art,
        min_size,
        min_size,
        options.line_art_connectivity,
        SizeSelectType::IfBoth,
        SizeSelectRelation::Gte,
    );
    let close_size = options.line_art_brick(dpi);
    let filtered_line_art = close_brick(&kept_line_art, close_size, close_size)?;
    emit(observer, Stage::FilteredLineArt, &filtered_line_art);

    let mut halftone = expand_pow2(&combined, WORKING_LEVELS)?;
    if !halftone.is_zero() {
        let grown = seedfill_binary(&halftone, &page, options.halftone_fill_connectivity)?;
        halftone.rop_in_place(&grown, RopOp::Or)?;
    }
    emit(observer, Stage::FullResHalftone, &halftone);

    let line_art_full = expand_pow2(&filtered_line_art, WORKING_LEVELS)?;
    let mut nontext = halftone.or(&line_art_full)?.clip_to_size(w, h)?;
    nontext.rop_in_place(&large, RopOp::Or)?;
    emit(observer, Stage::NonText, &nontext);

    Ok(nontext)
}

/// Find halftone and graphic regions on a binary page
///
/// Runs [`generate_nontext_mask`], takes the bounding box of each connected
/// component of the mask, and removes nested and sub-minimum boxes with
/// [`dedupe_boxes`] using [`min_area_for_dpi`].
///
/// # Returns
///
/// Regions in non-increasing area order.
pub fn find_image_regions(
    binary: &BinaryRaster,
    dpi: f64,
    words: Option<&Boxa>,
    options: &PageSegOptions,
) -> RecogResult<Vec<ImageRegion>> {
    find_image_regions_with_observer(binary, dpi, words, options, &mut NoopObserver)
}

/// [`find_image_regions`] reporting every intermediate raster to `observer`
pub fn find_image_regions_with_observer(
    binary: &BinaryRaster,
    dpi: f64,
    words: Option<&Boxa>,
    options: &PageSegOptions,
    observer: &mut dyn StageObserver,
) -> RecogResult<Vec<ImageRegion>> {
    let mask = generate_nontext_mask(binary, dpi, words, options, observer)?;
    let boxes = conncomp_boxes(&mask, options.final_connectivity);
    let kept = dedupe_boxes(&boxes, min_area_for_dpi(dpi));
    tracing::info!(
        components = boxes.len(),
        regions = kept.len(),
        "found image regions"
    );
    Ok(kept.into_iter().map(ImageRegion::halftone).collect())
}

fn check_dpi(dpi: f64) -> RecogResult<()> {
    if !dpi.is_finite() || dpi <= 0.0 {
        return Err(RecogError::InvalidParameters(format!(
            "dpi must be positive and finite, got {dpi}"
        )));
    }
    Ok(())
}

fn emit(observer: &mut dyn StageObserver, stage: Stage, raster: &BinaryRaster) {
    tracing::debug!(
        stage = %stage,
        width = raster.width(),
        height = raster.height(),
        pixels = raster.count_pixels(),
        "page segmentation stage"
    );
    observer.observe(stage, raster);
}

/// Fill background specks, then foreground specks.
fn remove_noise(page: &BinaryRaster, brick: u32) -> RecogResult<BinaryRaster> {
    let background = close_brick(&page.inverted(), brick, brick)?;
    Ok(close_brick(&background.inverted(), brick, brick)?)
}

/// Erase every word box from the page.
fn mask_words(page: &mut BinaryRaster, words: &Boxa) {
    for word in words {
        if word.is_empty() {
            tracing::warn!(
                x = word.x,
                y = word.y,
                w = word.w,
                h = word.h,
                "ignoring degenerate word box"
            );
            continue;
        }
        page.fill_box(word, 0);
    }
}

/// Fill the bounding box of every 4-connected component wider or taller
/// than `limit` pixels, on a raster of the original page size.
fn large_component_mask(
    page: &BinaryRaster,
    width: u32,
    height: u32,
    limit: f64,
) -> RecogResult<BinaryRaster> {
    let mut mask = BinaryRaster::new(width, height)?;
    for b in &conncomp_boxes(page, ConnectivityType::FourWay) {
        if f64::from(b.w) > limit || f64::from(b.h) > limit {
            mask.fill_box(b, 1);
        }
    }
    Ok(mask)
}

/// Second halftone estimate built from the page by fixed sequences,
/// returned at the working resolution.
fn secondary_halftone(page: &BinaryRaster, options: &PageSegOptions) -> RecogResult<BinaryRaster> {
    let seed = morph_sequence(page, &options.secondary_seed)?;
    let mask = morph_sequence(page, &options.secondary_mask)?;
    let filled = seedfill_binary(&seed, &mask, options.secondary_fill_connectivity)?;
    let dilated = dilate_brick(
        &filled,
        options.secondary_dilate_brick,
        options.secondary_dilate_brick,
    )?;
    Ok(expand_pow2(&dilated, options.secondary_expansion())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::StageCollector;
    use findimages_core::Box;

    #[test]
    fn test_default_options_validate() {
        let opts = PageSegOptions::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.secondary_seed.to_string(), "r1143 + o5.5 + x4");
        assert_eq!(opts.secondary_mask.to_string(), "r11");
        assert_eq!(opts.secondary_expansion(), 1);
        assert_eq!(opts.max_reduction_levels(), 4);
    }

    #[test]
    fn test_invalid_options() {
        let bad = [
            PageSegOptions {
                clean_brick: 0,
                ..Default::default()
            },
            PageSegOptions::default().with_seed(&[4, 9], 5),
            PageSegOptions::default().with_seed(&[1; MAX_CASCADE_LEVELS + 1], 5),
            PageSegOptions::default().with_seed_mask(&[1, 1], 4),
            PageSegOptions::default().with_pad_multiple(24),
            PageSegOptions::default().with_line_art_close_points(0.0),
            PageSegOptions::default().with_secondary(
                MorphSequence::new().reduce_rank(&[1, 1]).open(5, 5),
                MorphSequence::new().reduce_rank(&[1, 1, 1]),
            ),
        ];
        for opts in bad {
            assert!(
                matches!(opts.validate(), Err(RecogError::InvalidParameters(_))),
                "{opts:?}"
            );
        }
    }

    #[test]
    fn test_line_art_brick() {
        let opts = PageSegOptions::default();
        assert_eq!(opts.line_art_brick(300.0), 4);
        assert_eq!(opts.line_art_brick(72.0), 1);
        assert_eq!(opts.line_art_brick(30.0), 1);
        assert_eq!(opts.line_art_brick(600.0), 8);
    }

    #[test]
    fn test_bad_dpi() {
        let page = BinaryRaster::new(64, 64).unwrap();
        let opts = PageSegOptions::default();
        for dpi in [0.0, -300.0, f64::NAN, f64::INFINITY] {
            assert!(find_image_regions(&page, dpi, None, &opts).is_err());
        }
    }

    #[test]
    fn test_blank_page() {
        let page = BinaryRaster::new(100, 70).unwrap();
        let regions = find_image_regions(&page, 300.0, None, &PageSegOptions::default()).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_all_stages_observed() {
        let mut page = BinaryRaster::new(200, 150).unwrap();
        page.fill_rect(20, 20, 60, 60, 1);
        let mut collector = StageCollector::new();
        let mask = generate_nontext_mask(
            &page,
            300.0,
            None,
            &PageSegOptions::default(),
            &mut collector,
        )
        .unwrap();
        assert_eq!(collector.stages().collect::<Vec<_>>(), Stage::ALL.to_vec());
        assert_eq!(mask.dimensions(), (200, 150));
        assert_eq!(collector.get(Stage::Cleaned).unwrap().dimensions(), (256, 192));
        assert_eq!(collector.get(Stage::Reduced).unwrap().dimensions(), (128, 96));
        assert_eq!(collector.get(Stage::NonText).unwrap(), &mask);
    }

    #[test]
    fn test_degenerate_word_boxes_ignored() {
        let mut page = BinaryRaster::new(128, 128).unwrap();
        page.fill_rect(10, 10, 50, 50, 1);
        let words: Boxa = [Box::new_unchecked(10, 10, 0, 50), Box::new_unchecked(10, 10, 50, -1)]
            .into_iter()
            .collect();
        let opts = PageSegOptions::default();
        let with = generate_nontext_mask(&page, 300.0, Some(&words), &opts, &mut NoopObserver)
            .unwrap();
        let without = generate_nontext_mask(&page, 300.0, None, &opts, &mut NoopObserver).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_word_box_is_erased() {
        let mut page = BinaryRaster::new(128, 128).unwrap();
        page.fill_rect(10, 10, 100, 100, 1);
        let words: Boxa = std::iter::once(Box::new_unchecked(0, 0, 128, 128)).collect();
        let regions =
            find_image_regions(&page, 150.0, Some(&words), &PageSegOptions::default()).unwrap();
        assert!(regions.is_empty());
    }
}
