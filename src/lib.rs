//! # brochure
//!
//! Brochure document model, layout projection and export for Rust.
//!
//! A brochure is an ordered list of sections (hero, content, services,
//! contact, testimonial, projects), each with a layout variant and a base
//! style. The library edits documents, projects them into a rendered block
//! tree, previews them as HTML and exports them to PDF, PNG or JPEG.
//!
//! ## Quick Start
//!
//! ```no_run
//! use brochure::{render, Document, ExportOptions, ExportFormat};
//!
//! fn main() -> brochure::Result<()> {
//!     // Load a brochure document
//!     let doc = brochure::load_file("brochure.json")?;
//!
//!     // Project and preview it
//!     let options = render::RenderOptions::default();
//!     let rendered = render::project_document(&doc, &options);
//!     println!("{}", render::to_html(&rendered, &options));
//!
//!     // Export as PNG
//!     let artifact = brochure::export_document(
//!         Some(&rendered),
//!         &ExportOptions::new().with_format(ExportFormat::Png),
//!     )?;
//!     artifact.save_in(".")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed document model**: sections, layouts, styles and partial updates
//! - **Editor operations**: value-semantics editing with stable section ids
//! - **Layout projection**: full, split, diagonal, centered and gallery compositions
//! - **Effects**: filter, transform, shadow and animation overlays per section
//! - **Export**: PDF (lopdf), PNG and JPEG (image) with page geometry and bleed
//! - **Parallel capture**: Uses Rayon to rasterize blocks

pub mod editor;
pub mod error;
pub mod export;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use editor::{Direction, Editor, View};
pub use error::{Error, Result};
pub use export::{
    export_document, ColorProfile, ExportArtifact, ExportFormat, ExportOptions, ExportedPage,
    Orientation, PageSize, Rasterizer, WireframeRasterizer,
};
#[cfg(feature = "async")]
pub use export::export_document_async;
pub use model::{
    catalog, find_template, Document, DocumentPatch, EffectPatch, EffectSpec, ImageAsset, Layout,
    Section, SectionId, SectionPatch, SectionType, StylePatch, StyleSpec, Template,
    TransformPreset,
};
pub use render::{JsonFormat, PageSelection, RenderOptions, RenderedDocument};

use std::path::Path;

/// Load a brochure document from a JSON file.
///
/// # Example
///
/// ```no_run
/// use brochure::load_file;
///
/// let doc = load_file("brochure.json").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let json = std::fs::read_to_string(path)?;
    Document::from_json(&json)
}

/// Render a document to an HTML preview.
///
/// # Example
///
/// ```
/// use brochure::{to_html, Document, RenderOptions};
///
/// let html = to_html(&Document::sample(), &RenderOptions::default());
/// assert!(html.contains("brochure-page"));
/// ```
pub fn to_html(doc: &Document, options: &RenderOptions) -> String {
    let rendered = render::project_document(doc, options);
    render::to_html(&rendered, options)
}

/// Serialize a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    render::to_json(doc, format)
}

/// Project and export a document in one step.
///
/// # Example
///
/// ```no_run
/// use brochure::{export, Document, ExportOptions, PageSelection};
///
/// let options = ExportOptions::new().with_pages(PageSelection::Pages(vec![2]));
/// let artifact = export(&Document::sample(), &options).unwrap();
/// std::fs::write(&artifact.file_name, &artifact.bytes).unwrap();
/// ```
pub fn export(doc: &Document, options: &ExportOptions) -> Result<ExportArtifact> {
    let rendered = render::project_document(doc, &RenderOptions::default());
    export_document(Some(&rendered), options)
}

/// Builder for loading, previewing and exporting brochures.
///
/// # Example
///
/// ```no_run
/// use brochure::{Brochure, ExportFormat};
///
/// let artifact = Brochure::new()
///     .fullscreen()
///     .with_format(ExportFormat::Jpg)
///     .with_quality(80)
///     .load("brochure.json")?
///     .export()?;
/// # Ok::<(), brochure::Error>(())
/// ```
pub struct Brochure {
    render_options: RenderOptions,
    export_options: ExportOptions,
    template: Option<String>,
}

impl Brochure {
    /// Create a new Brochure builder.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
            export_options: ExportOptions::default(),
            template: None,
        }
    }

    /// Use the wide preview page.
    pub fn fullscreen(mut self) -> Self {
        self.render_options = self.render_options.with_fullscreen(true);
        self
    }

    /// Emit complete HTML pages.
    pub fn standalone(mut self) -> Self {
        self.render_options = self.render_options.with_standalone_html(true);
        self
    }

    /// Set the export format.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.export_options = self.export_options.with_format(format);
        self
    }

    /// Set the export quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.export_options = self.export_options.with_quality(quality);
        self
    }

    /// Set the export resolution.
    pub fn with_resolution(mut self, dpi: u32) -> Self {
        self.export_options = self.export_options.with_resolution(dpi);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.export_options = self.export_options.with_pages(pages);
        self
    }

    /// Replace all export options.
    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.export_options = options;
        self
    }

    /// Apply a built-in template after loading.
    pub fn with_template(mut self, id: impl Into<String>) -> Self {
        self.template = Some(id.into());
        self
    }

    /// Load a document from a JSON file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<BrochureResult> {
        let document = load_file(path)?;
        self.open(document)
    }

    /// Open an in-memory document.
    pub fn open(self, document: Document) -> Result<BrochureResult> {
        let mut editor = Editor::new(document).with_render_options(self.render_options.clone());
        if let Some(ref id) = self.template {
            editor = editor.apply_template(&find_template(id)?);
        }
        Ok(BrochureResult {
            editor: editor.render(),
            render_options: self.render_options,
            export_options: self.export_options,
        })
    }
}

impl Default for Brochure {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded and rendered brochure.
pub struct BrochureResult {
    editor: Editor,
    render_options: RenderOptions,
    export_options: ExportOptions,
}

impl BrochureResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> String {
        match self.editor.rendered() {
            Some(rendered) => render::to_html(rendered, &self.render_options),
            None => to_html(self.editor.document(), &self.render_options),
        }
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(self.editor.document(), format)
    }

    /// Export with the configured options.
    pub fn export(&self) -> Result<ExportArtifact> {
        self.editor.export(&self.export_options)
    }

    /// The rendered block tree.
    pub fn rendered(&self) -> Option<&RenderedDocument> {
        self.editor.rendered()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        self.editor.document()
    }

    /// Continue editing.
    pub fn into_editor(self) -> Editor {
        self.editor
    }
}
