//! findimages-test - Regression test framework for findimages
//!
//! Supports two modes, selected with `REGTEST_MODE`:
//!
//! - **Compare** (default): check computed values against expected ones
//! - **Display**: additionally write intermediate rasters as PNG files
//!   under `tests/regout` for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use findimages_test::RegParams;
//!
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(3.0, boxa.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Synthetic page builders live here too.

mod error;
mod params;
mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use synth::{checkerboard, halftone_patch, page_with_rects, raster_from_rows};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // findimages-test is at crates/findimages-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
