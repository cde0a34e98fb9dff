//! Page geometry in inches, points and pixels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Extra margin added on every edge when bleed is enabled.
pub const BLEED_INCHES: f32 = 0.125;

/// PDF points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
    Legal,
    Tabloid,
}

impl PageSize {
    /// Portrait width and height in inches.
    pub fn inches(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (8.5, 11.0),
            PageSize::A4 => (8.27, 11.69),
            PageSize::Legal => (8.5, 14.0),
            PageSize::Tabloid => (11.0, 17.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PageSize::Letter => "letter",
            PageSize::A4 => "a4",
            PageSize::Legal => "legal",
            PageSize::Tabloid => "tabloid",
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            "legal" => Ok(PageSize::Legal),
            "tabloid" => Ok(PageSize::Tabloid),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(format!("Unknown orientation: {}", s)),
        }
    }
}

/// Resolved page geometry of an export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Trimmed page width in inches
    pub width: f32,
    /// Trimmed page height in inches
    pub height: f32,
    /// Bleed on each edge in inches
    pub bleed: f32,
    /// Margin inside the trimmed page in inches
    pub margin: f32,
    /// Raster resolution in dots per inch
    pub dpi: u32,
}

impl PageGeometry {
    /// Geometry for a paper size and orientation. Landscape swaps the sides.
    pub fn new(size: PageSize, orientation: Orientation) -> Self {
        let (width, height) = size.inches();
        let (width, height) = match orientation {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        };
        Self {
            width,
            height,
            bleed: 0.0,
            margin: 0.0,
            dpi: 72,
        }
    }

    pub fn with_bleed(mut self, include: bool) -> Self {
        self.bleed = if include { BLEED_INCHES } else { 0.0 };
        self
    }

    /// Negative margins count as zero.
    pub fn with_margin(mut self, inches: f32) -> Self {
        self.margin = inches.max(0.0);
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    /// Media size including bleed, in inches.
    pub fn media_inches(&self) -> (f32, f32) {
        (
            self.width + 2.0 * self.bleed,
            self.height + 2.0 * self.bleed,
        )
    }

    /// Media size including bleed, in points.
    pub fn media_points(&self) -> (f32, f32) {
        let (w, h) = self.media_inches();
        (w * POINTS_PER_INCH, h * POINTS_PER_INCH)
    }

    /// Printable area (page minus margins) in inches, never negative.
    pub fn printable_inches(&self) -> (f32, f32) {
        (
            (self.width - 2.0 * self.margin).max(0.0),
            (self.height - 2.0 * self.margin).max(0.0),
        )
    }

    /// Origin of the printable area from the bottom-left media corner, in points.
    pub fn printable_origin_points(&self) -> (f32, f32) {
        let offset = (self.bleed + self.margin) * POINTS_PER_INCH;
        (offset, offset)
    }

    /// Printable area in points.
    pub fn printable_points(&self) -> (f32, f32) {
        let (w, h) = self.printable_inches();
        (w * POINTS_PER_INCH, h * POINTS_PER_INCH)
    }

    /// Printable area in raster pixels at the geometry's resolution.
    pub fn printable_pixels(&self) -> (u32, u32) {
        let (w, h) = self.printable_inches();
        (self.to_pixels(w), self.to_pixels(h))
    }

    fn to_pixels(&self, inches: f32) -> u32 {
        ((inches * self.dpi as f32).round() as u32).max(1)
    }
}
