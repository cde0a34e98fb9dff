//! Error types for the brochure library.

use std::io;
use thiserror::Error;

/// Result type alias for brochure operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building, rendering or exporting a brochure.
///
/// Editor operations never return errors: referencing a section id that does
/// not exist is a silent no-op. Everything here is surfaced by intake,
/// serialization and the export pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Export was requested before any document surface was rendered.
    #[error("No rendered document surface available for export")]
    RenderTargetMissing,

    /// Raster or container encoding failed.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Intake data is not an image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// No template with the given id exists in the catalog.
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Document JSON could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Encode(format!("PDF: {}", err))
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::Encode(err.to_string()),
        }
    }
}
