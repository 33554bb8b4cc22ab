//! # pdfsift
//!
//! Structure recovery for PDF extraction archives.
//!
//! A PDF extraction service turns a PDF into a zip archive holding
//! `structuredData.json`, a flat stream of tagged elements in reading order,
//! plus CSV renditions of every table. This library reads that archive and
//! recovers the document's title, its sections, its tables and its
//! bibliographic references.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsift::{extract_file, render};
//!
//! fn main() -> pdfsift::Result<()> {
//!     let doc = extract_file("output/paper.zip")?;
//!
//!     println!("{}", doc.title);
//!     for section in &doc.sections {
//!         println!("{} ({} blocks)", section.title, section.content.len());
//!     }
//!
//!     let json = render::to_json(&doc, render::JsonFormat::Pretty)?;
//!     std::fs::write("paper.json", json)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Sections**: headings and the paragraphs and list items under them
//! - **References**: a labelled reference section, or the most
//!   citation-like list when there is none
//! - **Tables**: CSV renditions decoded into column-keyed records
//! - **Batches**: many archives at once with Rayon

pub mod cache;
pub mod classify;
pub mod config;
pub mod detect;
pub mod error;
pub mod info;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use cache::{cache_key, ArchiveCache};
pub use classify::{Classifier, ClassifyOptions, RecaptureMode};
pub use config::{CredentialSource, Credentials, ServiceConfig};
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use info::{DocumentInfo, StructuredDocumentInfo};
pub use model::{Document, DocumentElement, ElementKind, ElementPath, Section, Table};
pub use parser::{ExtractArchive, ExtractOptions};
pub use render::JsonFormat;

use rayon::prelude::*;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

/// Extract a document from an archive file.
///
/// # Example
///
/// ```no_run
/// use pdfsift::extract_file;
///
/// let doc = extract_file("output/paper.zip").unwrap();
/// println!("References: {}", doc.references.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    extract_file_with_options(path, &ExtractOptions::default())
}

/// Extract a document from an archive file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfsift::{extract_file_with_options, ExtractOptions, RecaptureMode};
///
/// let options = ExtractOptions::new()
///     .with_min_reference_len(10)
///     .with_recapture(RecaptureMode::Restart);
/// let doc = extract_file_with_options("output/paper.zip", &options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Document> {
    let info = StructuredDocumentInfo::open_with_options(path, options.classify.clone())?;
    Ok(info.to_document())
}

/// Extract a document from archive bytes.
///
/// # Example
///
/// ```no_run
/// use pdfsift::extract_bytes;
///
/// let data = std::fs::read("output/paper.zip").unwrap();
/// let doc = extract_bytes(&data).unwrap();
/// ```
pub fn extract_bytes(data: &[u8]) -> Result<Document> {
    let info = StructuredDocumentInfo::from_bytes(data, ClassifyOptions::default())?;
    Ok(info.to_document())
}

/// Extract a document from any seekable reader.
pub fn extract_reader<R: Read + Seek>(reader: R) -> Result<Document> {
    let info = StructuredDocumentInfo::from_reader(reader, ClassifyOptions::default())?;
    Ok(info.to_document())
}

/// Extract many archive files.
///
/// Archives are processed in parallel unless the options are sequential. One
/// result per input is returned, in input order; a failing archive does not
/// affect the others.
///
/// # Example
///
/// ```no_run
/// use pdfsift::{extract_many, ExtractOptions};
///
/// let paths = ["output/a.zip", "output/b.zip"];
/// for (path, result) in extract_many(&paths, &ExtractOptions::default()) {
///     match result {
///         Ok(doc) => println!("{}: {}", path.display(), doc.title),
///         Err(e) => eprintln!("{}: {}", path.display(), e),
///     }
/// }
/// ```
pub fn extract_many<P>(paths: &[P], options: &ExtractOptions) -> Vec<(PathBuf, Result<Document>)>
where
    P: AsRef<Path> + Sync,
{
    let extract_one = |path: &P| {
        let path = path.as_ref().to_path_buf();
        let result = extract_file_with_options(&path, options);
        if let Err(e) = &result {
            log::warn!("Failed to extract {}: {}", path.display(), e);
        }
        (path, result)
    };

    if options.parallel {
        paths.par_iter().map(extract_one).collect()
    } else {
        paths.iter().map(extract_one).collect()
    }
}

/// Builder for extracting documents.
///
/// # Example
///
/// ```no_run
/// use pdfsift::PdfSift;
///
/// let json = PdfSift::new()
///     .with_min_reference_len(8)
///     .without_list_fallback()
///     .open("output/paper.zip")?
///     .to_json(pdfsift::JsonFormat::Compact)?;
/// # Ok::<(), pdfsift::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfSift {
    options: ExtractOptions,
}

impl PdfSift {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum reference length.
    pub fn with_min_reference_len(mut self, len: usize) -> Self {
        self.options = self.options.with_min_reference_len(len);
        self
    }

    /// Set the fallback list score threshold.
    pub fn with_reference_threshold(mut self, threshold: f64) -> Self {
        self.options = self.options.with_reference_threshold(threshold);
        self
    }

    /// Set the heading prefixes that open a reference section.
    pub fn with_reference_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.classify = self.options.classify.with_reference_labels(labels);
        self
    }

    /// Set how capture behaves after a second reference heading.
    pub fn with_recapture(mut self, mode: RecaptureMode) -> Self {
        self.options = self.options.with_recapture(mode);
        self
    }

    /// Never fall back to list scoring for references.
    pub fn without_list_fallback(mut self) -> Self {
        self.options = self.options.with_list_fallback(false);
        self
    }

    /// Let reference headings open sections too.
    pub fn with_reference_sections(mut self) -> Self {
        self.options.classify = self.options.classify.with_reference_sections(true);
        self
    }

    /// Disable parallel processing in batches.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// The options collected so far.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract from an archive file.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<SiftResult> {
        let document = extract_file_with_options(path, &self.options)?;
        Ok(SiftResult { document })
    }

    /// Extract from archive bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<SiftResult> {
        let info = StructuredDocumentInfo::from_bytes(data, self.options.classify)?;
        Ok(SiftResult {
            document: info.to_document(),
        })
    }

    /// Extract many archive files.
    pub fn open_many<P>(self, paths: &[P]) -> Vec<(PathBuf, Result<Document>)>
    where
        P: AsRef<Path> + Sync,
    {
        extract_many(paths, &self.options)
    }
}

/// Result of extracting a document.
#[derive(Debug, Clone)]
pub struct SiftResult {
    /// The extracted document
    pub document: Document,
}

impl SiftResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Convert the sections to JSON.
    pub fn sections_json(&self, format: JsonFormat) -> Result<String> {
        render::sections_to_json(&self.document.sections, format)
    }

    /// Convert the references to JSON.
    pub fn references_json(&self, format: JsonFormat) -> Result<String> {
        render::references_to_json(&self.document.references, format)
    }

    /// Get plain text of all sections.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const MANIFEST: &str = r#"{"elements": [
        {"Path": "//Document/Title", "Text": "My Paper"},
        {"Path": "//Document/H1", "Text": "Intro"},
        {"Path": "//Document/P", "Text": "Hello world"},
        {"Path": "//Document/H1", "Text": "References"},
        {"Path": "//Document/L/LI/LBody", "Text": "Smith 2020"},
        {"Path": "//Document/L/LI/LBody", "Text": "ab"}
    ]}"#;

    fn archive_bytes(manifest: &str) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(parser::MANIFEST_NAME, SimpleFileOptions::default())
            .unwrap();
        zip.write_all(manifest.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_bytes() {
        let doc = extract_bytes(&archive_bytes(MANIFEST)).unwrap();
        assert_eq!(doc.title, "My Paper");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.references, vec!["Smith 2020"]);
    }

    #[test]
    fn test_extract_reader() {
        let doc = extract_reader(Cursor::new(archive_bytes(MANIFEST))).unwrap();
        assert_eq!(doc.sections[0].title, "Intro");
    }

    #[test]
    fn test_extract_bytes_empty_data() {
        let result = extract_bytes(&[]);
        assert!(matches!(result, Err(Error::MalformedArchive(_))));
    }

    #[test]
    fn test_extract_bytes_pdf_data() {
        let result = extract_bytes(b"%PDF-1.7\n%test");
        assert!(matches!(result, Err(Error::MalformedArchive(_))));
    }

    #[test]
    fn test_extract_file_missing() {
        let result = extract_file("/nonexistent/paper.zip");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_extract_many_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.zip");
        std::fs::write(&good, archive_bytes(MANIFEST)).unwrap();
        let bad = dir.path().join("bad.zip");
        std::fs::write(&bad, b"not a zip").unwrap();

        for options in [ExtractOptions::default(), ExtractOptions::new().sequential()] {
            let results = extract_many(&[&good, &bad, &good], &options);
            assert_eq!(results.len(), 3);
            assert_eq!(results[0].0, good);
            assert_eq!(results[1].0, bad);
            assert!(results[0].1.is_ok());
            assert!(results[1].1.is_err());
            assert_eq!(
                results[2].1.as_ref().unwrap().title,
                results[0].1.as_ref().unwrap().title
            );
        }
    }

    // ==================== Builder Pattern Tests ====================

    #[test]
    fn test_builder_default() {
        let builder = PdfSift::default();
        assert!(builder.options().parallel);
        assert_eq!(builder.options().classify, ClassifyOptions::default());
    }

    #[test]
    fn test_builder_chained() {
        let builder = PdfSift::new()
            .with_min_reference_len(8)
            .with_reference_threshold(0.5)
            .with_recapture(RecaptureMode::Once)
            .without_list_fallback()
            .with_reference_sections()
            .sequential();

        let classify = &builder.options().classify;
        assert_eq!(classify.min_reference_len, 8);
        assert_eq!(classify.reference_score_threshold, 0.5);
        assert_eq!(classify.recapture, RecaptureMode::Once);
        assert!(!classify.list_fallback);
        assert!(classify.reference_sections);
        assert!(!builder.options().parallel);
    }

    #[test]
    fn test_builder_parse_bytes() {
        let result = PdfSift::new()
            .with_reference_sections()
            .parse_bytes(&archive_bytes(MANIFEST))
            .unwrap();

        let titles: Vec<&str> = result
            .document()
            .sections
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Intro", "References"]);
        assert_eq!(
            result.references_json(JsonFormat::Compact).unwrap(),
            r#"["Smith 2020"]"#
        );
    }

    #[test]
    fn test_builder_min_len_drops_references() {
        let result = PdfSift::new()
            .with_min_reference_len(20)
            .parse_bytes(&archive_bytes(MANIFEST))
            .unwrap();
        assert!(result.document().references.is_empty());
    }

    #[test]
    fn test_builder_reference_labels() {
        let manifest = r#"{"elements": [
            {"Path": "//Document/H1", "Text": "Einleitung"},
            {"Path": "//Document/P", "Text": "Hallo Welt"},
            {"Path": "//Document/H1", "Text": "Literatur"},
            {"Path": "//Document/P", "Text": "Meier 1999"}
        ]}"#;
        let result = PdfSift::new()
            .with_reference_labels(["Literatur"])
            .without_list_fallback()
            .parse_bytes(&archive_bytes(manifest))
            .unwrap();

        assert_eq!(result.document().references, vec!["Meier 1999"]);
        assert_eq!(result.document().sections.len(), 1);
    }

    #[test]
    fn test_builder_parse_invalid_bytes() {
        let result = PdfSift::new().parse_bytes(b"not a zip");
        assert!(result.is_err());
    }
}
