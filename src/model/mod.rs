//! Brochure document model.
//!
//! This module defines the value types the editor mutates and the renderer
//! projects: the document aggregate, its sections, their persistent styles,
//! the ephemeral effect overlays, the template catalog and image intake.

mod asset;
mod document;
mod effect;
mod section;
mod style;
pub mod template;

pub use asset::{decode_data_uri, detect_mime_type, ImageAsset};
pub use document::{Document, DocumentPatch};
pub use effect::{
    Animation, AnimationKind, AnimationPatch, EffectMap, EffectPatch, EffectSpec, Shadow, Transform,
    TransformPatch, TransformPreset,
};
pub use section::{Layout, Section, SectionId, SectionPatch, SectionType};
pub use style::{Rgb, StylePatch, StyleSpec};
pub use template::{catalog, find_template, Template, TemplateCategory, TemplateSection};
