//! Content-addressed store of extraction archives.
//!
//! The extraction service is run once per distinct PDF; its archive is kept
//! under `<base>/output/<md5 of the PDF>.zip`. This module only locates those
//! archives. Populating the store is left to whatever talks to the service.

use std::fs;
use std::path::{Path, PathBuf};

use md5::{Digest, Md5};

use crate::error::{Error, Result};

/// Directory below the base path holding cached archives.
pub const OUTPUT_DIR: &str = "output";

/// Cache key for PDF content: lowercase hex MD5.
pub fn cache_key(pdf: &[u8]) -> String {
    format!("{:x}", Md5::digest(pdf))
}

/// Location of cached extraction archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveCache {
    dir: PathBuf,
}

impl ArchiveCache {
    /// Cache rooted at `<base>/output`.
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            dir: base_path.as_ref().join(OUTPUT_DIR),
        }
    }

    /// The directory archives are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the archive for some PDF content is stored at.
    pub fn archive_path_for_bytes(&self, pdf: &[u8]) -> PathBuf {
        self.dir.join(format!("{}.zip", cache_key(pdf)))
    }

    /// Path the archive for a PDF file is stored at, whether or not it exists.
    pub fn archive_path_for(&self, pdf_path: impl AsRef<Path>) -> Result<PathBuf> {
        let data = fs::read(pdf_path)?;
        Ok(self.archive_path_for_bytes(&data))
    }

    /// Cached archive for a PDF file, if the service has produced one.
    pub fn lookup(&self, pdf_path: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        let path = self.archive_path_for(pdf_path)?;
        if path.is_file() {
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }

    /// Cached archive for a PDF file, failing with [`Error::CacheMiss`] if absent.
    pub fn require(&self, pdf_path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.archive_path_for(pdf_path)?;
        if path.is_file() {
            log::debug!("Using cached archive {}", path.display());
            Ok(path)
        } else {
            Err(Error::CacheMiss(path))
        }
    }
}
