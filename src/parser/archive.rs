//! Extraction archive reader using zip.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use serde::Deserialize;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::DocumentElement;

use super::ResourceSource;

/// Name of the JSON manifest inside an extraction archive.
pub const MANIFEST_NAME: &str = "structuredData.json";

#[derive(Debug, Deserialize)]
struct StructuredData {
    elements: Vec<DocumentElement>,
}

/// An extraction archive: the element stream plus its table renditions.
///
/// The manifest and the first rendition of every top-level table are read
/// when the archive is opened, so lookups afterwards only need `&self`.
/// Figures and secondary renditions stay in the archive.
#[derive(Debug, Clone, Default)]
pub struct ExtractArchive {
    elements: Vec<DocumentElement>,
    resources: HashMap<String, Vec<u8>>,
}

impl ExtractArchive {
    /// Open an archive file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening extraction archive {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read an archive held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Read an archive from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut zip = ZipArchive::new(reader)
            .map_err(|e| Error::MalformedArchive(format!("not a zip archive: {}", e)))?;

        let elements = read_manifest(&mut zip)?;

        let mut resources = HashMap::new();
        let renditions = elements
            .iter()
            .filter(|e| e.path.is_table_container())
            .filter_map(|e| e.first_attachment());
        for name in renditions {
            if resources.contains_key(name) {
                continue;
            }
            match read_entry(&mut zip, name) {
                Ok(Some(data)) => {
                    resources.insert(name.to_string(), data);
                }
                Ok(None) => log::warn!("Archive has no entry {} referenced by the manifest", name),
                Err(e) => log::warn!("Failed to read archive entry {}: {}", name, e),
            }
        }

        log::debug!(
            "Loaded {} elements and {} resources",
            elements.len(),
            resources.len()
        );

        Ok(Self {
            elements,
            resources,
        })
    }

    /// Build an archive from an element stream and resources already in memory.
    pub fn from_parts(elements: Vec<DocumentElement>, resources: HashMap<String, Vec<u8>>) -> Self {
        Self {
            elements,
            resources,
        }
    }

    /// The element stream in reading order.
    pub fn elements(&self) -> &[DocumentElement] {
        &self.elements
    }

    /// Names of the resources that were loaded.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}

impl ResourceSource for ExtractArchive {
    fn resource(&self, name: &str) -> Result<&[u8]> {
        self.resources.resource(name)
    }
}

fn read_manifest<R: Read + Seek>(zip: &mut ZipArchive<R>) -> Result<Vec<DocumentElement>> {
    let entry = match zip.by_name(MANIFEST_NAME) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(Error::MalformedArchive(format!("missing {}", MANIFEST_NAME)))
        }
        Err(e) => {
            return Err(Error::MalformedArchive(format!(
                "unreadable {}: {}",
                MANIFEST_NAME, e
            )))
        }
    };

    let data: StructuredData = serde_json::from_reader(entry)
        .map_err(|e| Error::MalformedArchive(format!("invalid {}: {}", MANIFEST_NAME, e)))?;

    Ok(data.elements)
}

fn read_entry<R: Read + Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<Option<Vec<u8>>> {
    let mut entry = match zip.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;
    Ok(Some(data))
}
