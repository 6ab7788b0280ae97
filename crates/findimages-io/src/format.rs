//! Sniffing the page format from its first bytes
//!
//! File extensions are ignored; scanners and OCR front ends are not
//! consistent about them.

use crate::{IoError, IoResult};
use std::io::Read;
use std::path::Path;

/// Page image formats understood by the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    /// Any of PBM, PGM, PPM in ASCII or binary form
    Pnm,
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Detect the format of the file at `path` from its header.
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut header = Vec::with_capacity(PNG_SIGNATURE.len());
    std::fs::File::open(path)?
        .take(PNG_SIGNATURE.len() as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the format of an in-memory image.
///
/// # Errors
///
/// [`IoError::InvalidData`] for fewer than two bytes,
/// [`IoError::UnsupportedFormat`] for anything unrecognized.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    match data {
        [] | [_] => Err(IoError::InvalidData(format!(
            "{} byte(s) is too short to identify an image",
            data.len()
        ))),
        _ if data.starts_with(&PNG_SIGNATURE) => Ok(ImageFormat::Png),
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),
        [b'P', b'1'..=b'6', ..] => Ok(ImageFormat::Pnm),
        _ => Err(IoError::UnsupportedFormat(format!(
            "unrecognized header {:02x?}",
            &data[..data.len().min(8)]
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_magic() {
        assert_eq!(
            detect_format_from_bytes(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            detect_format_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(),
            ImageFormat::Jpeg
        );
        assert_eq!(detect_format_from_bytes(b"P4\n").unwrap(), ImageFormat::Pnm);
        assert_eq!(detect_format_from_bytes(b"P1 ").unwrap(), ImageFormat::Pnm);
        assert!(detect_format_from_bytes(b"P7\n").is_err());
        assert!(detect_format_from_bytes(b"BM").is_err());
        assert!(detect_format_from_bytes(b"P").is_err());
    }
}
