//! Element stream reading.

mod archive;
mod options;

use std::collections::HashMap;

use crate::error::{Error, Result};

pub use archive::{ExtractArchive, MANIFEST_NAME};
pub use options::ExtractOptions;

/// Named lookup of attached resources such as table renditions.
pub trait ResourceSource {
    /// Get the bytes of a resource by the name recorded in an element.
    fn resource(&self, name: &str) -> Result<&[u8]>;
}

impl ResourceSource for HashMap<String, Vec<u8>> {
    fn resource(&self, name: &str) -> Result<&[u8]> {
        self.get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::ResourceNotFound(name.to_string()))
    }
}
