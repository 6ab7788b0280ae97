//! Binary raster regression test
//!
//! Tests rectangle filling with clipping, padding to a multiple and
//! clipping back, inversion and the logical raster operations.

use findimages_core::{BinaryRaster, Error, RopOp};
use findimages_test::RegParams;

#[test]
fn raster_reg() {
    let mut rp = RegParams::new("raster");

    // --- Test 1: fill_rect clips and spans words ---
    let mut r = BinaryRaster::new(70, 40).unwrap();
    r.fill_rect(-10, -5, 20, 10, 1);
    rp.compare_values(50.0, r.count_pixels() as f64, 0.0);
    r.fill_rect(60, 30, 100, 100, 1);
    rp.compare_values(150.0, r.count_pixels() as f64, 0.0);
    r.fill_rect(30, 10, 5, 0, 1);
    rp.compare_values(150.0, r.count_pixels() as f64, 0.0);
    r.fill_rect(0, 0, 70, 40, 0);
    rp.compare_values(1.0, r.is_zero() as u8 as f64, 0.0);
    r.fill_rect(20, 1, 40, 1, 1);
    rp.compare_values(1.0, r.get_pixel(31, 1).unwrap_or(0) as f64, 0.0);
    rp.compare_values(1.0, r.get_pixel(32, 1).unwrap_or(0) as f64, 0.0);
    rp.compare_values(0.0, r.get_pixel(60, 1).unwrap_or(1) as f64, 0.0);

    // --- Test 2: padding round trip ---
    let mut page = BinaryRaster::new(100, 70).unwrap();
    page.fill_rect(90, 60, 10, 10, 1);
    let padded = page.pad_to_multiple(64).unwrap();
    rp.compare_values(128.0, padded.width() as f64, 0.0);
    rp.compare_values(128.0, padded.height() as f64, 0.0);
    rp.compare_values(100.0, padded.count_pixels() as f64, 0.0);
    rp.compare_values(0.0, padded.get_pixel(100, 69).unwrap_or(1) as f64, 0.0);
    let back = padded.clip_to_size(100, 70).unwrap();
    rp.compare_rasters(&page, &back);
    let same = BinaryRaster::new(128, 64).unwrap().pad_to_multiple(64).unwrap();
    rp.compare_values(64.0, same.height() as f64, 0.0);
    rp.compare_values(1.0, page.pad_to_multiple(0).is_err() as u8 as f64, 0.0);
    rp.compare_values(1.0, page.clip_to_size(101, 70).is_err() as u8 as f64, 0.0);

    // --- Test 3: inversion leaves padding bits clear ---
    let inv = page.inverted();
    rp.compare_values((100 * 70 - 100) as f64, inv.count_pixels() as f64, 0.0);
    let mut twice = inv.clone();
    twice.invert();
    rp.compare_rasters(&page, &twice);

    // --- Test 4: logical operations ---
    let mut a = BinaryRaster::new(50, 50).unwrap();
    let mut b = BinaryRaster::new(50, 50).unwrap();
    a.fill_rect(0, 0, 30, 30, 1);
    b.fill_rect(20, 20, 30, 30, 1);
    rp.compare_values(100.0, a.and(&b).unwrap().count_pixels() as f64, 0.0);
    rp.compare_values(1700.0, a.or(&b).unwrap().count_pixels() as f64, 0.0);
    rp.compare_values(1600.0, a.xor(&b).unwrap().count_pixels() as f64, 0.0);
    rp.compare_values(800.0, a.subtract(&b).unwrap().count_pixels() as f64, 0.0);
    let and = a.and(&b).unwrap();
    rp.compare_values(1.0, and.is_subset_of(&a).unwrap() as u8 as f64, 0.0);
    rp.compare_values(0.0, a.is_subset_of(&b).unwrap() as u8 as f64, 0.0);
    let mut c = a.clone();
    c.rop_in_place(&b, RopOp::Xor).unwrap();
    c.rop_in_place(&b, RopOp::Xor).unwrap();
    rp.compare_rasters(&a, &c);

    // --- Test 5: size mismatch ---
    let small = BinaryRaster::new(49, 50).unwrap();
    rp.compare_values(
        1.0,
        matches!(a.or(&small), Err(Error::DimensionMismatch { .. })) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "raster regression test failed");
}
