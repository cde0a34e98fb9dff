//! Rendering: style resolution, layout projection and preview output.

mod block;
pub mod catalog;
mod html;
mod json;
mod layout;
mod options;
mod style;

pub use block::{
    Align, Background, BlockHeight, BlockLayout, BlockRole, DiagonalEdge, GalleryCell, InfoCard,
    Node, Pane, PaneRole, PaneWidth, RenderedBlock, RenderedDocument,
};
pub use html::{to_html, HtmlRenderer};
pub use json::{rendered_to_json, to_json, JsonFormat};
pub use layout::{
    project, project_document, project_page, section_style, Projector, ROUNDED_RADIUS,
};
pub use options::{PageSelection, RenderOptions, FULLSCREEN_PAGE_WIDTH, PAGE_WIDTH};
pub use style::{resolve, Backdrop, EffectStyle, RenderStyle, OVERLAY_ALPHA_HEX};
