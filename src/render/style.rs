//! Style resolution: base section style plus optional effect overlay.

use crate::model::{EffectSpec, StyleSpec};
use serde::{Deserialize, Serialize};

/// Alpha suffix appended to the background color of a blur overlay (80%).
pub const OVERLAY_ALPHA_HEX: &str = "CC";

/// Final render attributes of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub background_color: String,
    pub text_color: String,
    pub font_size: f32,
    pub padding: f32,

    /// Translucent backdrop, present when the style has a positive blur
    pub backdrop: Option<Backdrop>,

    /// Effect overlay, present when a non-neutral effect is set
    pub effects: Option<EffectStyle>,
}

/// Blurred translucent overlay behind the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    /// Blur radius in px
    pub blur: f32,
    /// Background color with the overlay alpha appended
    pub overlay_color: String,
}

/// Effect chains stacked on top of the base style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectStyle {
    /// CSS filter chain, e.g. `blur(2px) brightness(120%)`
    pub filter: Option<String>,
    /// CSS transform chain, e.g. `scale(1.05) rotate(2deg)`
    pub transform: Option<String>,
    pub box_shadow: Option<String>,
    pub border_radius: Option<f32>,
    /// CSS animation shorthand
    pub animation: Option<String>,
    /// Opacity factor 0.0-1.0 (also part of `filter`), used by rasterizers
    pub opacity: f32,
}

/// Resolve the render style of a section.
///
/// The base attributes come straight from `style`. A positive `style.blur`
/// adds a backdrop whose overlay is the background color at 80% alpha.
/// Effects never replace the base attributes; they are kept as separate
/// filter and transform chains. Values are not clamped.
pub fn resolve(style: &StyleSpec, effect: Option<&EffectSpec>) -> RenderStyle {
    let backdrop = (style.blur > 0.0).then(|| Backdrop {
        blur: style.blur,
        overlay_color: format!("{}{}", style.background_color, OVERLAY_ALPHA_HEX),
    });

    let effects = effect
        .filter(|effect| !effect.is_neutral())
        .map(effect_style);

    RenderStyle {
        background_color: style.background_color.clone(),
        text_color: style.text_color.clone(),
        font_size: style.font_size,
        padding: style.padding,
        backdrop,
        effects,
    }
}

fn effect_style(effect: &EffectSpec) -> EffectStyle {
    let mut filters = Vec::new();
    if effect.blur != 0.0 {
        filters.push(format!("blur({}px)", effect.blur));
    }
    if effect.opacity != 100.0 {
        filters.push(format!("opacity({}%)", effect.opacity));
    }
    if effect.brightness != 100.0 {
        filters.push(format!("brightness({}%)", effect.brightness));
    }
    if effect.contrast != 100.0 {
        filters.push(format!("contrast({}%)", effect.contrast));
    }
    if effect.saturate != 100.0 {
        filters.push(format!("saturate({}%)", effect.saturate));
    }
    if effect.hue_rotate != 0.0 {
        filters.push(format!("hue-rotate({}deg)", effect.hue_rotate));
    }

    let t = &effect.transform;
    let mut transforms = Vec::new();
    if t.scale != 100.0 {
        transforms.push(format!("scale({})", t.scale / 100.0));
    }
    if t.rotate != 0.0 {
        transforms.push(format!("rotate({}deg)", t.rotate));
    }
    if t.skew_x != 0.0 {
        transforms.push(format!("skewX({}deg)", t.skew_x));
    }
    if t.skew_y != 0.0 {
        transforms.push(format!("skewY({}deg)", t.skew_y));
    }

    let animation = effect.animation.kind.keyframes().map(|name| {
        format!(
            "{} {}s ease-out {}s both",
            name, effect.animation.duration, effect.animation.delay
        )
    });

    EffectStyle {
        filter: (!filters.is_empty()).then(|| filters.join(" ")),
        transform: (!transforms.is_empty()).then(|| transforms.join(" ")),
        box_shadow: effect.shadow.css().map(str::to_string),
        border_radius: (effect.border_radius != 0.0).then_some(effect.border_radius),
        animation,
        opacity: effect.opacity / 100.0,
    }
}

impl RenderStyle {
    /// Inline CSS declarations for the content pane.
    pub fn to_css(&self) -> String {
        let mut decls = vec![
            format!("background: {}", self.background_color),
            format!("color: {}", self.text_color),
            format!("font-size: {}px", self.font_size),
            format!("padding: {}px", self.padding),
        ];

        if let Some(ref backdrop) = self.backdrop {
            decls.push(format!("backdrop-filter: blur({}px)", backdrop.blur));
            decls.push(format!("background: {}", backdrop.overlay_color));
        }

        if let Some(ref effects) = self.effects {
            if let Some(ref filter) = effects.filter {
                decls.push(format!("filter: {}", filter));
            }
            if let Some(ref transform) = effects.transform {
                decls.push(format!("transform: {}", transform));
            }
            if let Some(ref shadow) = effects.box_shadow {
                decls.push(format!("box-shadow: {}", shadow));
            }
            if let Some(radius) = effects.border_radius {
                decls.push(format!("border-radius: {}px", radius));
            }
            if let Some(ref animation) = effects.animation {
                decls.push(format!("animation: {}", animation));
            }
        }

        decls.join("; ")
    }
}
