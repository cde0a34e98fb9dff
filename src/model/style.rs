//! Persistent per-section style attributes.

use serde::{Deserialize, Serialize};

/// Base style of a section.
///
/// Colors are CSS color strings. Templates may use gradients
/// (`linear-gradient(...)`), so they are not restricted to hex values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSpec {
    /// Background color
    pub background_color: String,

    /// Text color
    pub text_color: String,

    /// Font size in px
    pub font_size: f32,

    /// Padding in px
    pub padding: f32,

    /// Backdrop blur radius in px (0 disables the translucent overlay)
    pub blur: f32,
}

impl StyleSpec {
    /// Create a style from its five attributes.
    pub fn new(
        background_color: impl Into<String>,
        text_color: impl Into<String>,
        font_size: f32,
        padding: f32,
        blur: f32,
    ) -> Self {
        Self {
            background_color: background_color.into(),
            text_color: text_color.into(),
            font_size,
            padding,
            blur,
        }
    }

    /// Return a copy with the patch applied.
    pub fn patched(&self, patch: &StylePatch) -> Self {
        let mut style = self.clone();
        patch.apply(&mut style);
        style
    }
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self::new("#ffffff", "#475569", 16.0, 32.0, 0.0)
    }
}

/// Partial update for [`StyleSpec`]. Present fields override, absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
}

impl StylePatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background color.
    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Set the text color.
    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    /// Set the font size.
    pub fn font_size(mut self, px: f32) -> Self {
        self.font_size = Some(px);
        self
    }

    /// Set the padding.
    pub fn padding(mut self, px: f32) -> Self {
        self.padding = Some(px);
        self
    }

    /// Set the blur radius.
    pub fn blur(mut self, px: f32) -> Self {
        self.blur = Some(px);
        self
    }

    /// Check whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none()
            && self.text_color.is_none()
            && self.font_size.is_none()
            && self.padding.is_none()
            && self.blur.is_none()
    }

    /// Merge the present fields into `style`.
    pub fn apply(&self, style: &mut StyleSpec) {
        if let Some(ref color) = self.background_color {
            style.background_color = color.clone();
        }
        if let Some(ref color) = self.text_color {
            style.text_color = color.clone();
        }
        if let Some(size) = self.font_size {
            style.font_size = size;
        }
        if let Some(padding) = self.padding {
            style.padding = padding;
        }
        if let Some(blur) = self.blur {
            style.blur = blur;
        }
    }
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parse a CSS color string.
    ///
    /// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa` (alpha ignored). For any other
    /// string (gradients, functions) the first hex stop inside it is used.
    pub fn parse(css: &str) -> Option<Rgb> {
        let css = css.trim();
        if let Some(hex) = css.strip_prefix('#') {
            return parse_hex(hex);
        }

        let start = css.find('#')?;
        let hex: String = css[start + 1..]
            .chars()
            .take_while(|c| c.is_ascii_hexdigit())
            .collect();
        parse_hex(&hex)
    }

    /// Blend `self` over `base` with the given alpha (0.0-1.0).
    pub fn over(self, base: Rgb, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 * alpha + b as f32 * (1.0 - alpha)).round() as u8;
        Rgb(mix(self.0, base.0), mix(self.1, base.1), mix(self.2, base.2))
    }

    /// Hex representation (`#rrggbb`).
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut chars = hex.chars();
            let mut next = || {
                let c = chars.next()?;
                channel(&format!("{c}{c}"))
            };
            Some(Rgb(next()?, next()?, next()?))
        }
        6 | 8 => Some(Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}
