//! Error types for pdfsift library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading and classifying extraction archives.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither a PDF nor a zip archive.
    #[error("Unknown file format: expected a PDF or an extraction archive")]
    UnknownFormat,

    /// The archive is not a zip, or its structured data manifest is missing or invalid.
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    /// A resource named by an element is not present in the archive.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// A table rendition could not be decoded.
    #[error("Table parsing error in {resource}: {message}")]
    TableParse {
        /// Resource name of the table rendition
        resource: String,
        /// Decoder message
        message: String,
    },

    /// Credentials or service configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No extraction archive has been cached for a PDF.
    #[error("No extraction archive cached at {}", .0.display())]
    CacheMiss(PathBuf),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::MalformedArchive(err.to_string()),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::TableParse {
            resource: String::new(),
            message: err.to_string(),
        }
    }
}

impl Error {
    /// Attach the resource name to a table parsing error.
    pub(crate) fn in_resource(self, name: &str) -> Self {
        match self {
            Error::TableParse { message, .. } => Error::TableParse {
                resource: name.to_string(),
                message,
            },
            other => other,
        }
    }
}
