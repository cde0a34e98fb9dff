//! Ephemeral visual-effect overlays.
//!
//! Effects live in the editor state keyed by section id. They are never
//! written into a section's [`StyleSpec`](super::StyleSpec); the style
//! resolver stacks them on top of it.

use super::SectionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Effect overlays keyed by section id. Missing entries mean default effects.
pub type EffectMap = BTreeMap<SectionId, EffectSpec>;

/// Filter, transform and animation settings for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectSpec {
    /// Blur in px (0-20)
    pub blur: f32,
    /// Opacity in percent (0-100)
    pub opacity: f32,
    /// Brightness in percent (0-200)
    pub brightness: f32,
    /// Contrast in percent (0-200)
    pub contrast: f32,
    /// Saturation in percent (0-200)
    pub saturate: f32,
    /// Hue rotation in degrees (0-360)
    pub hue_rotate: f32,
    /// Drop shadow size
    pub shadow: Shadow,
    /// Corner radius in px (0-50)
    pub border_radius: f32,
    /// Geometric transform
    pub transform: Transform,
    /// Entrance animation
    pub animation: Animation,
}

impl EffectSpec {
    /// Check whether every setting is at its neutral value.
    pub fn is_neutral(&self) -> bool {
        *self == EffectSpec::default()
    }

    /// Return a copy with every value clamped to its documented range.
    ///
    /// Effects are accepted unclamped; callers that want the slider ranges
    /// enforced opt in here.
    pub fn clamped(&self) -> Self {
        Self {
            blur: self.blur.clamp(0.0, 20.0),
            opacity: self.opacity.clamp(0.0, 100.0),
            brightness: self.brightness.clamp(0.0, 200.0),
            contrast: self.contrast.clamp(0.0, 200.0),
            saturate: self.saturate.clamp(0.0, 200.0),
            hue_rotate: self.hue_rotate.clamp(0.0, 360.0),
            shadow: self.shadow,
            border_radius: self.border_radius.clamp(0.0, 50.0),
            transform: Transform {
                scale: self.transform.scale.clamp(50.0, 150.0),
                rotate: self.transform.rotate.clamp(-180.0, 180.0),
                skew_x: self.transform.skew_x.clamp(-45.0, 45.0),
                skew_y: self.transform.skew_y.clamp(-45.0, 45.0),
            },
            animation: Animation {
                kind: self.animation.kind,
                duration: self.animation.duration.max(0.0),
                delay: self.animation.delay.max(0.0),
            },
        }
    }

    /// Return a copy with the patch applied.
    pub fn patched(&self, patch: &EffectPatch) -> Self {
        let mut effect = self.clone();
        patch.apply(&mut effect);
        effect
    }
}

impl Default for EffectSpec {
    fn default() -> Self {
        Self {
            blur: 0.0,
            opacity: 100.0,
            brightness: 100.0,
            contrast: 100.0,
            saturate: 100.0,
            hue_rotate: 0.0,
            shadow: Shadow::None,
            border_radius: 0.0,
            transform: Transform::default(),
            animation: Animation::default(),
        }
    }
}

/// Drop shadow scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shadow {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xl2,
}

impl Shadow {
    /// CSS `box-shadow` value, `None` for no shadow.
    pub fn css(self) -> Option<&'static str> {
        match self {
            Shadow::None => None,
            Shadow::Sm => Some("0 1px 2px 0 rgb(0 0 0 / 0.05)"),
            Shadow::Md => Some("0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)"),
            Shadow::Lg => {
                Some("0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)")
            }
            Shadow::Xl => {
                Some("0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)")
            }
            Shadow::Xl2 => Some("0 25px 50px -12px rgb(0 0 0 / 0.25)"),
        }
    }
}

/// Scale (percent), rotation and skew (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transform {
    pub scale: f32,
    pub rotate: f32,
    pub skew_x: f32,
    pub skew_y: f32,
}

impl Transform {
    /// Check whether this is the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Transform::default()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 100.0,
            rotate: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
        }
    }
}

/// Named transform shortcuts offered next to the transform sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformPreset {
    SubtleTilt,
    ScaleUp,
    Perspective,
    Reset,
}

impl TransformPreset {
    /// The transform this preset installs.
    pub fn transform(self) -> Transform {
        let (scale, rotate, skew_x) = match self {
            TransformPreset::SubtleTilt => (105.0, 2.0, 0.0),
            TransformPreset::ScaleUp => (110.0, 0.0, 0.0),
            TransformPreset::Perspective => (100.0, 0.0, 5.0),
            TransformPreset::Reset => (100.0, 0.0, 0.0),
        };
        Transform {
            scale,
            rotate,
            skew_x,
            skew_y: 0.0,
        }
    }
}

/// Entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    #[serde(rename = "type")]
    pub kind: AnimationKind,
    /// Duration in seconds
    pub duration: f32,
    /// Delay in seconds
    pub delay: f32,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            kind: AnimationKind::None,
            duration: 1.0,
            delay: 0.0,
        }
    }
}

/// Animation keyframe set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationKind {
    #[default]
    None,
    FadeIn,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    ZoomIn,
    ZoomOut,
    Bounce,
    Pulse,
    Shake,
}

impl AnimationKind {
    /// Keyframes name used in CSS output.
    pub fn keyframes(self) -> Option<&'static str> {
        match self {
            AnimationKind::None => None,
            AnimationKind::FadeIn => Some("fadeIn"),
            AnimationKind::SlideUp => Some("slideUp"),
            AnimationKind::SlideDown => Some("slideDown"),
            AnimationKind::SlideLeft => Some("slideLeft"),
            AnimationKind::SlideRight => Some("slideRight"),
            AnimationKind::ZoomIn => Some("zoomIn"),
            AnimationKind::ZoomOut => Some("zoomOut"),
            AnimationKind::Bounce => Some("bounce"),
            AnimationKind::Pulse => Some("pulse"),
            AnimationKind::Shake => Some("shake"),
        }
    }
}

/// Partial update for [`EffectSpec`].
///
/// The nested transform and animation groups merge field by field: a patch
/// that only sets `rotate` keeps the current scale and skews.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectPatch {
    pub blur: Option<f32>,
    pub opacity: Option<f32>,
    pub brightness: Option<f32>,
    pub contrast: Option<f32>,
    pub saturate: Option<f32>,
    pub hue_rotate: Option<f32>,
    pub shadow: Option<Shadow>,
    pub border_radius: Option<f32>,
    pub transform: TransformPatch,
    pub animation: AnimationPatch,
}

/// Partial update for [`Transform`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformPatch {
    pub scale: Option<f32>,
    pub rotate: Option<f32>,
    pub skew_x: Option<f32>,
    pub skew_y: Option<f32>,
}

/// Partial update for [`Animation`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationPatch {
    pub kind: Option<AnimationKind>,
    pub duration: Option<f32>,
    pub delay: Option<f32>,
}

impl EffectPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blur(mut self, px: f32) -> Self {
        self.blur = Some(px);
        self
    }

    pub fn opacity(mut self, percent: f32) -> Self {
        self.opacity = Some(percent);
        self
    }

    pub fn brightness(mut self, percent: f32) -> Self {
        self.brightness = Some(percent);
        self
    }

    pub fn contrast(mut self, percent: f32) -> Self {
        self.contrast = Some(percent);
        self
    }

    pub fn saturate(mut self, percent: f32) -> Self {
        self.saturate = Some(percent);
        self
    }

    pub fn hue_rotate(mut self, degrees: f32) -> Self {
        self.hue_rotate = Some(degrees);
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn border_radius(mut self, px: f32) -> Self {
        self.border_radius = Some(px);
        self
    }

    pub fn scale(mut self, percent: f32) -> Self {
        self.transform.scale = Some(percent);
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.transform.rotate = Some(degrees);
        self
    }

    pub fn skew_x(mut self, degrees: f32) -> Self {
        self.transform.skew_x = Some(degrees);
        self
    }

    pub fn skew_y(mut self, degrees: f32) -> Self {
        self.transform.skew_y = Some(degrees);
        self
    }

    /// Replace the whole transform group.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = TransformPatch {
            scale: Some(transform.scale),
            rotate: Some(transform.rotate),
            skew_x: Some(transform.skew_x),
            skew_y: Some(transform.skew_y),
        };
        self
    }

    pub fn animation(mut self, kind: AnimationKind) -> Self {
        self.animation.kind = Some(kind);
        self
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.animation.duration = Some(seconds);
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.animation.delay = Some(seconds);
        self
    }

    /// Merge the present fields into `effect`.
    pub fn apply(&self, effect: &mut EffectSpec) {
        macro_rules! merge {
            ($target:expr, $value:expr) => {
                if let Some(value) = $value {
                    $target = value;
                }
            };
        }

        merge!(effect.blur, self.blur);
        merge!(effect.opacity, self.opacity);
        merge!(effect.brightness, self.brightness);
        merge!(effect.contrast, self.contrast);
        merge!(effect.saturate, self.saturate);
        merge!(effect.hue_rotate, self.hue_rotate);
        merge!(effect.shadow, self.shadow);
        merge!(effect.border_radius, self.border_radius);

        merge!(effect.transform.scale, self.transform.scale);
        merge!(effect.transform.rotate, self.transform.rotate);
        merge!(effect.transform.skew_x, self.transform.skew_x);
        merge!(effect.transform.skew_y, self.transform.skew_y);

        merge!(effect.animation.kind, self.animation.kind);
        merge!(effect.animation.duration, self.animation.duration);
        merge!(effect.animation.delay, self.animation.delay);
    }
}
