//! JSON rendering for brochure documents.

use super::block::RenderedDocument;
use crate::error::Result;
use crate::model::Document;
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn write<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Convert a document to JSON (the interchange form read by `Document::from_json`).
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    write(doc, format)
}

/// Convert a rendered block tree to JSON.
pub fn rendered_to_json(rendered: &RenderedDocument, format: JsonFormat) -> Result<String> {
    write(rendered, format)
}
