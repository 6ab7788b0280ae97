//! findimages - CLI entry point
//!
//! Prints one `<category> <x> <y> <w> <h>` line per non-text region found
//! on a page image.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use findimages::color::binarize_page;
use findimages::io::{PageImage, read_page, write_png_binary};
use findimages::recog::{
    NoopObserver, PageSegOptions, Stage, StageObserver, find_image_regions_with_observer,
    write_regions,
};
use findimages::{BinaryRaster, Boxa};
use tracing::Level;

/// Locate halftone and line-art regions on a scanned page
#[derive(Parser, Debug)]
#[command(name = "findimages", version, about)]
struct Args {
    /// Log every pipeline stage
    #[arg(long)]
    debug: bool,

    /// Log the region count
    #[arg(short, long)]
    verbose: bool,

    /// Write each pipeline stage as NN-<stage>.png into this directory
    #[arg(long, value_name = "DIR")]
    debug_dir: Option<PathBuf>,

    /// Page resolution in pixels per inch
    #[arg(value_name = "DPI", value_parser = parse_dpi)]
    dpi: f64,

    /// Page image (PNG, PNM or JPEG)
    #[arg(value_name = "PAGEIMAGE")]
    page: PathBuf,

    /// Word boxes in Boxa format, or `-` for none
    #[arg(value_name = "WORDBOXES")]
    words: String,

    /// Output file, or `-` for stdout
    #[arg(value_name = "OUTFILE", default_value = "-")]
    output: String,
}

fn parse_dpi(s: &str) -> Result<f64, String> {
    let dpi: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !dpi.is_finite() || dpi <= 0.0 {
        return Err(format!("dpi must be positive, got {s}"));
    }
    Ok(dpi)
}

/// Writes every stage raster it sees as a PNG, keeping the first failure.
struct StageDumper {
    dir: PathBuf,
    error: Option<anyhow::Error>,
}

impl StageDumper {
    fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create debug directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            error: None,
        })
    }

    fn dump(&self, stage: Stage, raster: &BinaryRaster) -> Result<()> {
        let path = self
            .dir
            .join(format!("{:02}-{}.png", stage.index() + 1, stage.name()));
        let file = fs::File::create(&path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        write_png_binary(raster, std::io::BufWriter::new(file))
            .with_context(|| format!("cannot write {}", path.display()))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.error.map_or(Ok(()), Err)
    }
}

impl StageObserver for StageDumper {
    fn observe(&mut self, stage: Stage, raster: &BinaryRaster) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.dump(stage, raster) {
            self.error = Some(e);
        }
    }
}

fn main() {
    let args = Args::parse();

    let level = if args.debug {
        Level::DEBUG
    } else if args.verbose {
        Level::INFO
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let page = load_binary_page(&args.page)?;
    let words = load_word_boxes(&args.words)?;
    let options = PageSegOptions::default();

    let regions = match &args.debug_dir {
        Some(dir) => {
            let mut dumper = StageDumper::new(dir)?;
            let regions = find_image_regions_with_observer(
                &page,
                args.dpi,
                words.as_ref(),
                &options,
                &mut dumper,
            )?;
            dumper.finish()?;
            regions
        }
        None => find_image_regions_with_observer(
            &page,
            args.dpi,
            words.as_ref(),
            &options,
            &mut NoopObserver,
        )?,
    };

    // Format everything first so a failure leaves no partial output file.
    let mut out = Vec::new();
    write_regions(&mut out, &regions)?;
    if args.output == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&out)?;
        stdout.flush()?;
    } else {
        fs::write(&args.output, &out)
            .with_context(|| format!("cannot write {}", args.output))?;
    }
    Ok(())
}

fn load_binary_page(path: &Path) -> Result<BinaryRaster> {
    let image =
        read_page(path).with_context(|| format!("cannot read page image {}", path.display()))?;
    let (w, h) = image.dimensions();
    tracing::debug!(width = w, height = h, "read page image");
    match image {
        PageImage::Binary(raster) => Ok(raster),
        PageImage::Gray(gray) => binarize_page(&gray)
            .with_context(|| format!("cannot binarize {}", path.display())),
    }
}

fn load_word_boxes(arg: &str) -> Result<Option<Boxa>> {
    if arg == "-" {
        return Ok(None);
    }
    let boxes =
        Boxa::read_from_file(arg).with_context(|| format!("cannot read word boxes {arg}"))?;
    tracing::debug!(count = boxes.len(), "read word boxes");
    Ok(Some(boxes))
}
