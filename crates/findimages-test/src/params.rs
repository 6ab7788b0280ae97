//! Regression test bookkeeping
//!
//! A [`RegParams`] numbers every check it runs. Failed checks are printed
//! and collected instead of panicking, so one run reports all of them;
//! the test asserts on [`RegParams::cleanup`] at the end.

use std::fs;
use std::io::BufWriter;

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use findimages_core::BinaryRaster;

/// What a regression run does besides comparing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    #[default]
    Compare,
    /// Also write rasters under the regout directory
    Display,
}

impl RegTestMode {
    /// Read `REGTEST_MODE`; anything but `display` means compare.
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE") {
            Ok(v) if v.eq_ignore_ascii_case("display") => Self::Display,
            _ => Self::Compare,
        }
    }
}

pub struct RegParams {
    pub test_name: String,
    pub mode: RegTestMode,
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }
        eprintln!("\n==== {test_name}_reg ({mode:?}) ====");

        Self {
            test_name: test_name.to_string(),
            mode,
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Number of checks run so far
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Advance the index and record `failure` if one is given.
    fn check(&mut self, failure: Option<String>) -> bool {
        self.index += 1;
        match failure {
            None => true,
            Some(what) => {
                let msg = format!("{}_reg check {}: {what}", self.test_name, self.index);
                eprintln!("{msg}");
                self.failures.push(msg);
                false
            }
        }
    }

    /// Passes when `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.check(
            (diff > delta)
                .then(|| format!("expected {expected}, got {actual} (diff {diff} > {delta})")),
        )
    }

    /// Exact raster equality. The failure names the first differing pixel
    /// in raster-scan order.
    pub fn compare_rasters(&mut self, a: &BinaryRaster, b: &BinaryRaster) -> bool {
        let failure = if !a.sizes_equal(b) {
            Some(format!(
                "size {}x{} vs {}x{}",
                a.width(),
                a.height(),
                b.width(),
                b.height()
            ))
        } else {
            first_difference(a, b).map(|(x, y)| format!("pixels differ at ({x}, {y})"))
        };
        self.check(failure)
    }

    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.check((expected != actual).then(|| {
            format!(
                "strings differ\n  expected {:?}\n  actual   {:?}",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(actual)
            )
        }))
    }

    /// In display mode, save `raster` as `<test>.<index>.<label>.png`.
    /// Counts as a check in either mode so indices stay stable.
    pub fn write_raster(&mut self, raster: &BinaryRaster, label: &str) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        let path = format!(
            "{}/{}.{:02}.{label}.png",
            regout_dir(),
            self.test_name,
            self.index
        );
        let writer = BufWriter::new(fs::File::create(&path)?);
        findimages_io::write_png_binary(raster, writer).map_err(|e| TestError::RasterWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("wrote {path}");
        Ok(())
    }

    /// Print a summary and return whether every check passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("{}_reg: all {} checks passed\n", self.test_name, self.index);
            return true;
        }
        eprintln!(
            "{}_reg: {} of {} checks failed",
            self.test_name,
            self.failures.len(),
            self.index
        );
        for f in &self.failures {
            eprintln!("  {f}");
        }
        eprintln!();
        false
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn first_difference(a: &BinaryRaster, b: &BinaryRaster) -> Option<(u32, u32)> {
    (0..a.height())
        .filter(|&y| a.row_data(y) != b.row_data(y))
        .find_map(|y| {
            (0..a.width())
                .find(|&x| a.get_pixel_unchecked(x, y) != b.get_pixel_unchecked(x, y))
                .map(|x| (x, y))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_records_failure() {
        let mut rp = RegParams::new("params_self");
        assert!(rp.compare_values(1.0, 1.05, 0.1));
        assert!(!rp.compare_values(1.0, 2.0, 0.1));
        assert_eq!(rp.index(), 2);
        assert_eq!(rp.failures().len(), 1);
        assert!(rp.failures()[0].contains("check 2"));
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_rasters() {
        let mut rp = RegParams::new("params_raster");
        let a = BinaryRaster::new(40, 3).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_rasters(&a, &b));
        b.set_pixel(35, 2, 1).unwrap();
        assert!(!rp.compare_rasters(&a, &b));
        assert!(rp.failures()[0].contains("(35, 2)"));
        assert!(!rp.compare_rasters(&a, &BinaryRaster::new(40, 4).unwrap()));
    }
}
