//! JPEG image format support (decode only)

use crate::{IoError, IoResult, PageImage};
use findimages_core::{GrayRaster, rgb_to_gray};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::BufRead;

/// Read a JPEG page, reduced to 8-bit gray.
pub fn read_jpeg<R: BufRead>(reader: R) -> IoResult<PageImage> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let gray = match info.pixel_format {
        PixelFormat::L8 => pixels,
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|p| rgb_to_gray(p[0], p[1], p[2]))
            .collect(),
        PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .map(|p| {
                let k = 255 - p[3] as u32;
                let ch = |c: u8| ((255 - c as u32) * k / 255) as u8;
                rgb_to_gray(ch(p[0]), ch(p[1]), ch(p[2]))
            })
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG pixel format {:?}",
                other
            )));
        }
    };

    Ok(PageImage::Gray(GrayRaster::from_vec(width, height, gray)?))
}
