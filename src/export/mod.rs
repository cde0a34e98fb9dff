//! Export pipeline: capture, encode, deliver.
//!
//! The pipeline consumes a [`RenderedDocument`] snapshot. Capture rasterizes
//! the selected blocks at the page's printable width and resolution, encode
//! wraps the raster into PDF/PNG/JPEG, and deliver names the artifact and
//! lists the pages it contains. Any failure aborts the whole export; no
//! partial artifact is produced.

mod capture;
mod encode;
mod geometry;

pub use capture::{block_height, capture_blocks, stack, Frame, Rasterizer, WireframeRasterizer};
pub use encode::{encode_jpeg, encode_pdf, encode_png, fit_within, PdfPage, JPEG_MAX_DIMENSION};
pub use geometry::{Orientation, PageGeometry, PageSize, BLEED_INCHES, POINTS_PER_INCH};

use crate::error::{Error, Result};
use crate::model::SectionId;
use crate::render::{PageSelection, RenderedBlock, RenderedDocument};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Instant;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex literal"));

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Png,
    Jpg,
}

impl ExportFormat {
    /// File extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
        }
    }

    /// Media type of the artifact.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Png => "image/png",
            ExportFormat::Jpg => "image/jpeg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpg),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Color profile tag. Informational only: no conversion is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorProfile {
    #[default]
    Rgb,
    Cmyk,
}

impl ColorProfile {
    /// Name stored in the PDF info dictionary.
    pub fn pdf_name(self) -> &'static str {
        match self {
            ColorProfile::Rgb => "RGB",
            ColorProfile::Cmyk => "CMYK",
        }
    }
}

impl FromStr for ColorProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rgb" => Ok(ColorProfile::Rgb),
            "cmyk" => Ok(ColorProfile::Cmyk),
            _ => Err(format!("Unknown color profile: {}", s)),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,

    /// JPEG quality 0-100 (also used for images embedded in PDFs)
    pub quality: u8,

    pub page_size: PageSize,
    pub orientation: Orientation,

    /// Margin on every edge in inches
    pub margins: f32,

    /// Add a 0.125" bleed on every edge
    pub include_bleed: bool,

    /// Raster resolution in DPI
    pub resolution: u32,

    pub color_profile: ColorProfile,

    /// Visible sections to export (1-indexed pages)
    pub pages: PageSelection,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Pdf,
            quality: 95,
            page_size: PageSize::Letter,
            orientation: Orientation::Portrait,
            margins: 0.5,
            include_bleed: false,
            resolution: 300,
            color_profile: ColorProfile::Rgb,
            pages: PageSelection::All,
        }
    }
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Set quality (capped at 100).
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(100);
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_margins(mut self, inches: f32) -> Self {
        self.margins = inches;
        self
    }

    pub fn with_bleed(mut self, include: bool) -> Self {
        self.include_bleed = include;
        self
    }

    pub fn with_resolution(mut self, dpi: u32) -> Self {
        self.resolution = dpi;
        self
    }

    pub fn with_color_profile(mut self, profile: ColorProfile) -> Self {
        self.color_profile = profile;
        self
    }

    /// Export only these pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Page geometry implied by these options.
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.page_size, self.orientation)
            .with_bleed(self.include_bleed)
            .with_margin(self.margins)
            .with_dpi(self.resolution)
    }
}

/// One exported page of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedPage {
    /// 1-indexed page among visible sections
    pub number: u32,
    pub section_id: Option<SectionId>,
    pub title: Option<String>,
}

/// The downloadable result of an export.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
    /// Section pages contained, in order
    pub pages: Vec<ExportedPage>,
    pub created_at: DateTime<Utc>,
}

impl ExportArtifact {
    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Write the artifact into a directory under its file name.
    pub fn save_in<P: AsRef<Path>>(&self, dir: P) -> Result<std::path::PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Pipeline stage, reported to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Capture,
    Encode,
    Deliver,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportStage::Capture => "Capturing",
            ExportStage::Encode => "Encoding",
            ExportStage::Deliver => "Delivering",
        })
    }
}

/// Artifact file name: `brochure-<title>.<ext>`, title lower-cased with
/// whitespace runs replaced by `-`.
pub fn file_name(title: &str, format: ExportFormat) -> String {
    let lowered = title.to_lowercase();
    let slug = WHITESPACE.replace_all(&lowered, "-");
    format!("brochure-{}.{}", slug, format.extension())
}

/// Capture width at which `blocks` stacked stay within `max_height` px.
///
/// Returns `width` when the natural stacked height already fits.
pub fn stacked_width(
    blocks: &[&RenderedBlock],
    page_width: u32,
    width: u32,
    max_height: u32,
) -> u32 {
    let preview: f64 = blocks
        .iter()
        .map(|block| f64::from(block_height(block, page_width)))
        .sum();
    let natural = preview * f64::from(width) / f64::from(page_width.max(1));
    if natural <= f64::from(max_height) {
        return width;
    }
    ((f64::from(width) * f64::from(max_height) / natural).floor() as u32).max(1)
}

/// Rough output size in MB shown before exporting.
pub fn estimated_size_mb(section_count: usize, options: &ExportOptions) -> f64 {
    let size = section_count as f64 * 0.5 * (options.quality as f64 / 100.0)
        * (options.resolution as f64 / 150.0);
    (size * 10.0).round() / 10.0
}

/// Export a rendered document with the wireframe rasterizer.
///
/// `None` means nothing was rendered yet and fails with `RenderTargetMissing`.
pub fn export_document(
    surface: Option<&RenderedDocument>,
    options: &ExportOptions,
) -> Result<ExportArtifact> {
    export_with(surface, options, &WireframeRasterizer, |_| {})
}

/// Export with a custom rasterizer and a stage callback.
pub fn export_with<F>(
    surface: Option<&RenderedDocument>,
    options: &ExportOptions,
    rasterizer: &dyn Rasterizer,
    mut on_stage: F,
) -> Result<ExportArtifact>
where
    F: FnMut(ExportStage),
{
    let rendered = surface.ok_or(Error::RenderTargetMissing)?;

    // Capture
    on_stage(ExportStage::Capture);
    let start = Instant::now();
    let geometry = options.geometry();
    let (printable_w, printable_h) = geometry.printable_pixels();
    if geometry.printable_inches().0 <= 0.0 {
        log::warn!(
            "margins of {}in leave no printable width, capturing at 1px",
            options.margins
        );
    }
    let sections: Vec<&RenderedBlock> = rendered.section_blocks().collect();
    let total = sections.len() as u32;

    let restricted = options.pages.is_restricted();
    let numbers = options.pages.resolve(total)?;
    let blocks: Vec<&RenderedBlock> = if restricted {
        numbers
            .iter()
            .map(|&n| sections[(n - 1) as usize])
            .collect()
    } else {
        rendered.blocks.iter().collect()
    };

    let manifest: Vec<ExportedPage> = numbers
        .iter()
        .map(|&n| {
            let block = sections[(n - 1) as usize];
            ExportedPage {
                number: n,
                section_id: block.section_id.clone(),
                title: block.title().map(String::from),
            }
        })
        .collect();

    // Stacked outputs are captured no taller than their target holds
    let width_px = match options.format {
        ExportFormat::Pdf if !restricted => {
            stacked_width(&blocks, rendered.page_width, printable_w, printable_h)
        }
        ExportFormat::Jpg => {
            stacked_width(&blocks, rendered.page_width, printable_w, JPEG_MAX_DIMENSION)
        }
        _ => printable_w,
    };
    let images = capture_blocks(&blocks, rendered.page_width, width_px, rasterizer)?;
    log::debug!(
        "captured {} blocks at {}px in {:?}",
        images.len(),
        width_px,
        start.elapsed()
    );

    // Encode
    on_stage(ExportStage::Encode);
    let start = Instant::now();
    let bytes = match options.format {
        ExportFormat::Pdf if restricted => {
            let pages: Vec<PdfPage<'_>> = images
                .iter()
                .zip(&manifest)
                .map(|(image, page)| PdfPage {
                    image,
                    title: page.title.as_deref(),
                })
                .collect();
            encode_pdf(
                &pages,
                &geometry,
                options.quality,
                &rendered.title,
                options.color_profile,
            )?
        }
        ExportFormat::Pdf => {
            let image = stack(&images);
            let page = PdfPage {
                image: &image,
                title: Some(rendered.title.as_str()),
            };
            encode_pdf(
                &[page],
                &geometry,
                options.quality,
                &rendered.title,
                options.color_profile,
            )?
        }
        ExportFormat::Png => encode_png(&stack(&images))?,
        ExportFormat::Jpg => encode_jpeg(&stack(&images), options.quality)?,
    };
    log::debug!(
        "encoded {} ({} bytes) in {:?}",
        options.format,
        bytes.len(),
        start.elapsed()
    );

    // Deliver
    on_stage(ExportStage::Deliver);
    Ok(ExportArtifact {
        bytes,
        file_name: file_name(&rendered.title, options.format),
        mime_type: options.format.mime_type(),
        pages: manifest,
        created_at: Utc::now(),
    })
}

/// Export on a blocking task; the snapshot is owned by the task.
#[cfg(feature = "async")]
pub async fn export_document_async(
    surface: Option<RenderedDocument>,
    options: ExportOptions,
) -> Result<ExportArtifact> {
    tokio::task::spawn_blocking(move || export_document(surface.as_ref(), &options))
        .await
        .map_err(|e| Error::Other(format!("export task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.format, ExportFormat::Pdf);
        assert_eq!(options.quality, 95);
        assert_eq!(options.page_size, PageSize::Letter);
        assert_eq!(options.orientation, Orientation::Portrait);
        assert_eq!(options.margins, 0.5);
        assert!(!options.include_bleed);
        assert_eq!(options.resolution, 300);
        assert_eq!(options.color_profile, ColorProfile::Rgb);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            file_name("Anchorage  Business\tCorp", ExportFormat::Pdf),
            "brochure-anchorage-business-corp.pdf"
        );
        assert_eq!(file_name("Acme", ExportFormat::Jpg), "brochure-acme.jpg");
        assert_eq!(
            file_name(" New\nBrochure ", ExportFormat::Png),
            "brochure--new-brochure-.png"
        );
    }

    #[test]
    fn test_stacked_width_fits_height() {
        use crate::model::{Document, Layout, Section};
        use crate::render::{project_document, RenderOptions};

        let mut doc = Document::new("Acme", "Tagline");
        for i in 1..=10 {
            doc = doc.with_section(Section::new(i.to_string()).with_layout(Layout::Split));
        }
        let rendered = project_document(&doc, &RenderOptions::default());
        let bands: Vec<&RenderedBlock> = rendered.section_blocks().collect();

        // Ten 384px bands at 672px wide stack to 3840px
        assert_eq!(stacked_width(&bands, 672, 672, 4000), 672);
        assert_eq!(stacked_width(&bands, 672, 672, 1920), 336);
        assert_eq!(stacked_width(&bands, 672, 672, 0), 1);
    }

    #[test]
    fn test_estimated_size() {
        let options = ExportOptions::default();
        // 6 * 0.5 * 0.95 * 2 = 5.7
        assert_eq!(estimated_size_mb(6, &options), 5.7);
        assert_eq!(estimated_size_mb(0, &options), 0.0);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JPEG".parse::<ExportFormat>().unwrap(), ExportFormat::Jpg);
        assert_eq!(ExportFormat::Png.mime_type(), "image/png");
        assert!("tiff".parse::<ExportFormat>().is_err());
        assert_eq!("cmyk".parse::<ColorProfile>().unwrap(), ColorProfile::Cmyk);
    }

    #[test]
    fn test_missing_surface() {
        let result = export_document(None, &ExportOptions::default());
        assert!(matches!(result, Err(Error::RenderTargetMissing)));
    }
}
