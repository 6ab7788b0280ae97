//! PNM (Portable Any Map) format support
//!
//! Reads PBM (P1/P4), PGM (P2/P5) and PPM (P3/P6). Bitmaps keep their
//! 1 = black convention and come back binary; graymaps and pixmaps are
//! scaled to 8 bits and reduced to gray.

use crate::{IoError, IoResult, PageImage};
use findimages_core::{BinaryRaster, GrayRaster, rgb_to_gray};

/// Cursor over the raw file bytes
struct PnmReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PnmReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip whitespace and `#` comments.
    fn skip_space(&mut self) {
        while let Some(&c) = self.data.get(self.pos) {
            if c == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Read an unsigned decimal token.
    fn read_uint(&mut self) -> IoResult<u32> {
        self.skip_space();
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData(format!(
                "expected integer at byte {start}"
            )));
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("integer overflow at byte {start}")))
    }

    /// Read one PBM ASCII bit; digits need not be separated.
    fn read_bit(&mut self) -> IoResult<u32> {
        self.skip_space();
        match self.data.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(0)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(1)
            }
            _ => Err(IoError::InvalidData(format!(
                "expected bitmap digit at byte {}",
                self.pos
            ))),
        }
    }

    /// Consume the single whitespace byte ending a binary header.
    fn end_header(&mut self) -> IoResult<&'a [u8]> {
        match self.data.get(self.pos) {
            Some(c) if c.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(&self.data[self.pos..])
            }
            _ => Err(IoError::InvalidData("missing whitespace after header".into())),
        }
    }
}

/// Scale a sample in `0..=maxval` to `0..=255`.
#[inline]
fn scale(v: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        v.min(255) as u8
    } else {
        ((v.min(maxval) * 255 + maxval / 2) / maxval) as u8
    }
}

/// Read a PNM page from the complete file contents.
pub fn read_pnm(data: &[u8]) -> IoResult<PageImage> {
    if data.len() < 2 || data[0] != b'P' {
        return Err(IoError::InvalidData("missing PNM magic".into()));
    }
    let kind = data[1];
    let mut rd = PnmReader::new(data);
    rd.pos = 2;

    let width = rd.read_uint()?;
    let height = rd.read_uint()?;
    let maxval = if kind == b'1' || kind == b'4' {
        1
    } else {
        rd.read_uint()?
    };
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid maxval {maxval}")));
    }
    let npix = width as usize * height as usize;

    match kind {
        b'1' => {
            let mut r = BinaryRaster::new(width, height)?;
            for y in 0..height {
                for x in 0..width {
                    if rd.read_bit()? == 1 {
                        r.set_pixel_unchecked(x, y, 1);
                    }
                }
            }
            Ok(PageImage::Binary(r))
        }
        b'4' => {
            let body = rd.end_header()?;
            let bpr = width.div_ceil(8) as usize;
            if body.len() < bpr * height as usize {
                return Err(IoError::InvalidData("truncated PBM data".into()));
            }
            let mut r = BinaryRaster::new(width, height)?;
            for y in 0..height {
                let row = &body[y as usize * bpr..];
                for x in 0..width {
                    if (row[(x / 8) as usize] >> (7 - (x % 8))) & 1 == 1 {
                        r.set_pixel_unchecked(x, y, 1);
                    }
                }
            }
            Ok(PageImage::Binary(r))
        }
        b'2' | b'3' => {
            let spp = if kind == b'2' { 1 } else { 3 };
            let mut gray = Vec::with_capacity(npix);
            for _ in 0..npix {
                let mut s = [0u8; 3];
                for v in s.iter_mut().take(spp) {
                    *v = scale(rd.read_uint()?, maxval);
                }
                gray.push(if spp == 1 {
                    s[0]
                } else {
                    rgb_to_gray(s[0], s[1], s[2])
                });
            }
            Ok(PageImage::Gray(GrayRaster::from_vec(width, height, gray)?))
        }
        b'5' | b'6' => {
            let spp = if kind == b'5' { 1 } else { 3 };
            let bps = if maxval < 256 { 1 } else { 2 };
            let body = rd.end_header()?;
            if body.len() < npix * spp * bps {
                return Err(IoError::InvalidData("truncated PNM data".into()));
            }
            let read = |i: usize| -> u8 {
                let v = if bps == 1 {
                    body[i] as u32
                } else {
                    ((body[2 * i] as u32) << 8) | body[2 * i + 1] as u32
                };
                scale(v, maxval)
            };
            let gray = (0..npix)
                .map(|p| {
                    if spp == 1 {
                        read(p)
                    } else {
                        rgb_to_gray(read(3 * p), read(3 * p + 1), read(3 * p + 2))
                    }
                })
                .collect();
            Ok(PageImage::Gray(GrayRaster::from_vec(width, height, gray)?))
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "PNM variant P{}",
            other as char
        ))),
    }
}
