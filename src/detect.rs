//! Input format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Kind of input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A PDF document, resolved to its extraction archive through the cache
    Pdf,
    /// A zip extraction archive
    Archive,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Pdf => f.write_str("PDF"),
            InputFormat::Archive => f.write_str("extraction archive"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// Local file header of a zip archive.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// End-of-central-directory record, which starts an empty zip archive.
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";

/// Detect the input format from a file path.
///
/// # Example
/// ```no_run
/// use pdfsift::detect::{detect_format_from_path, InputFormat};
///
/// let format = detect_format_from_path("paper.pdf").unwrap();
/// assert_eq!(format, InputFormat::Pdf);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let mut header = Vec::with_capacity(8);
    File::open(path)?.take(8).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the input format from the first bytes of a file.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if data.starts_with(PDF_MAGIC) {
        Ok(InputFormat::Pdf)
    } else if data.starts_with(ZIP_MAGIC) || data.starts_with(ZIP_EMPTY_MAGIC) {
        Ok(InputFormat::Archive)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check if bytes look like a PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(InputFormat::Pdf))
}

/// Check if bytes look like a zip archive.
pub fn is_archive_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(InputFormat::Archive))
}
