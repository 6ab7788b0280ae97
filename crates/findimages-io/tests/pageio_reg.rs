//! Page reading regression test
//!
//! Tests that every supported layout arrives as the page type the
//! segmenter expects: bitmaps stay binary with black as foreground, and
//! gray or color sources come back as 8-bit gray.

use findimages_core::{BinaryRaster, Box};
use findimages_io::{ImageFormat, PageImage, detect_format_from_bytes, read_page_from_bytes};
use findimages_test::{RegParams, halftone_patch};

#[test]
fn pageio_reg() {
    let mut rp = RegParams::new("pageio");

    let mut page = BinaryRaster::new(75, 41).unwrap();
    page.fill_rect(3, 2, 30, 10, 1);
    halftone_patch(&mut page, &Box::new_unchecked(40, 5, 30, 30), 4);

    // --- Test 1: 1-bit PNG round trip ---
    let mut png = Vec::new();
    findimages_io::write_png_binary(&page, &mut png).expect("write png");
    rp.compare_values(
        1.0,
        (detect_format_from_bytes(&png).ok() == Some(ImageFormat::Png)) as u8 as f64,
        0.0,
    );
    match read_page_from_bytes(&png).expect("read png") {
        PageImage::Binary(back) => {
            rp.compare_rasters(&page, &back);
        }
        PageImage::Gray(_) => {
            rp.compare_values(1.0, 0.0, 0.0);
        }
    }

    // --- Test 2: PBM binary, black is foreground ---
    let mut pbm = b"P4\n9 2\n".to_vec();
    pbm.extend_from_slice(&[0b1000_0000, 0b1000_0000, 0b0000_0000, 0b0000_0000]);
    let image = read_page_from_bytes(&pbm).expect("read pbm");
    rp.compare_values(9.0, image.dimensions().0 as f64, 0.0);
    if let PageImage::Binary(r) = image {
        rp.compare_values(2.0, r.count_pixels() as f64, 0.0);
        rp.compare_values(1.0, r.get_pixel(8, 0).unwrap_or(0) as f64, 0.0);
    } else {
        rp.compare_values(1.0, 0.0, 0.0);
    }

    // --- Test 3: PPM becomes gray ---
    let ppm = b"P3 2 1 255 255 0 0 255 255 255";
    match read_page_from_bytes(ppm).expect("read ppm") {
        PageImage::Gray(g) => {
            rp.compare_values(77.0, g.get_pixel(0, 0).unwrap_or(0) as f64, 1.0);
            rp.compare_values(255.0, g.get_pixel(1, 0).unwrap_or(0) as f64, 0.0);
        }
        PageImage::Binary(_) => {
            rp.compare_values(1.0, 0.0, 0.0);
        }
    }

    // --- Test 4: unknown data ---
    rp.compare_values(
        1.0,
        read_page_from_bytes(b"GIF89a....").is_err() as u8 as f64,
        0.0,
    );
    rp.compare_values(1.0, read_page_from_bytes(b"P").is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "pageio regression test failed");
}
