//! Document information backed by an extraction archive.

use std::io::{Read, Seek};
use std::path::Path;

use crate::classify::{ClassifyOptions, Classifier};
use crate::error::Result;
use crate::model::{Document, DocumentElement, Section, Table};
use crate::parser::ExtractArchive;

use super::DocumentInfo;

/// Document information read from a `structuredData.json` extraction archive.
#[derive(Debug, Clone)]
pub struct StructuredDocumentInfo {
    archive: ExtractArchive,
    classifier: Classifier,
}

impl StructuredDocumentInfo {
    /// Open an archive file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ClassifyOptions::default())
    }

    /// Open an archive file with custom classifier options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ClassifyOptions) -> Result<Self> {
        let archive = ExtractArchive::open(path)?;
        Ok(Self::new(archive, options))
    }

    /// Read an archive held in memory.
    pub fn from_bytes(data: &[u8], options: ClassifyOptions) -> Result<Self> {
        let archive = ExtractArchive::from_bytes(data)?;
        Ok(Self::new(archive, options))
    }

    /// Read an archive from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R, options: ClassifyOptions) -> Result<Self> {
        let archive = ExtractArchive::from_reader(reader)?;
        Ok(Self::new(archive, options))
    }

    /// Wrap an archive that is already loaded.
    pub fn new(archive: ExtractArchive, options: ClassifyOptions) -> Self {
        Self {
            archive,
            classifier: Classifier::with_options(options),
        }
    }

    /// The underlying element stream.
    pub fn elements(&self) -> &[DocumentElement] {
        self.archive.elements()
    }

    /// The underlying archive.
    pub fn archive(&self) -> &ExtractArchive {
        &self.archive
    }
}

impl DocumentInfo for StructuredDocumentInfo {
    fn title(&self) -> String {
        self.classifier.title(self.elements())
    }

    fn sections(&self) -> Vec<Section> {
        self.classifier.sections(self.elements())
    }

    fn tables(&self) -> Vec<Table> {
        self.classifier.tables(self.elements(), &self.archive)
    }

    fn references(&self) -> Vec<String> {
        self.classifier.references(self.elements())
    }

    fn to_document(&self) -> Document {
        self.classifier.classify(self.elements(), &self.archive)
    }
}
