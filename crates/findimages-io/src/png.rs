//! PNG image format support

use crate::{IoError, IoResult, PageImage};
use findimages_core::{BinaryRaster, GrayRaster, rgb_to_gray};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG page.
///
/// 1-bit grayscale becomes [`PageImage::Binary`] with black (sample 0) as
/// the set value. Every other layout is reduced to 8-bit gray; alpha is
/// ignored and palettes are looked up.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PageImage> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;
    let palette: Option<Vec<u8>> = info.palette.as_ref().map(|p| p.to_vec());

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    if (color_type, bit_depth) == (ColorType::Grayscale, BitDepth::One) {
        let mut raster = BinaryRaster::new(width, height)?;
        for y in 0..height {
            let row = &data[y as usize * bytes_per_row..];
            for x in 0..width {
                let bit = (row[(x / 8) as usize] >> (7 - (x % 8))) & 1;
                if bit == 0 {
                    raster.set_pixel_unchecked(x, y, 1);
                }
            }
        }
        return Ok(PageImage::Binary(raster));
    }

    let bits = bit_depth as usize;
    let samples = match color_type {
        ColorType::Grayscale | ColorType::Indexed => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
    };

    // Sample `s` of pixel `x`, scaled to 8 bits unless it is a palette index
    let sample = |row: &[u8], x: usize, s: usize| -> u8 {
        let i = x * samples + s;
        match bits {
            16 => row[i * 2],
            8 => row[i],
            _ => {
                let per_byte = 8 / bits;
                let shift = 8 - bits * (i % per_byte + 1);
                let v = (row[i / per_byte] >> shift) & ((1u8 << bits) - 1);
                if color_type == ColorType::Indexed {
                    v
                } else {
                    (v as u32 * 255 / ((1u32 << bits) - 1)) as u8
                }
            }
        }
    };

    let mut gray = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..(y + 1) * bytes_per_row];
        for x in 0..width as usize {
            let g = match color_type {
                ColorType::Grayscale | ColorType::GrayscaleAlpha => sample(row, x, 0),
                ColorType::Rgb | ColorType::Rgba => {
                    rgb_to_gray(sample(row, x, 0), sample(row, x, 1), sample(row, x, 2))
                }
                ColorType::Indexed => {
                    let idx = sample(row, x, 0) as usize * 3;
                    let pal = palette
                        .as_deref()
                        .filter(|p| idx + 2 < p.len())
                        .ok_or_else(|| {
                            IoError::InvalidData(format!("palette index {} out of range", idx / 3))
                        })?;
                    rgb_to_gray(pal[idx], pal[idx + 1], pal[idx + 2])
                }
            };
            gray.push(g);
        }
    }

    Ok(PageImage::Gray(GrayRaster::from_vec(width, height, gray)?))
}

/// Write a binary raster as a 1-bit grayscale PNG.
///
/// Set pixels are written black (sample 0).
pub fn write_png_binary<W: Write>(raster: &BinaryRaster, writer: W) -> IoResult<()> {
    let width = raster.width();
    let height = raster.height();

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::One);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = width.div_ceil(8) as usize;
    let mut data = Vec::with_capacity(bytes_per_row * height as usize);
    for y in 0..height {
        let row: Vec<u8> = raster
            .row_data(y)
            .iter()
            .flat_map(|w| (!w).to_be_bytes())
            .take(bytes_per_row)
            .collect();
        data.extend_from_slice(&row);
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
