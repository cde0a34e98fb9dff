//! Rendered block tree produced by the layout projector.
//!
//! Blocks are a format-neutral description of the composed page. The HTML
//! writer and the export rasterizer both consume them.

use super::style::RenderStyle;
use crate::model::{SectionId, SectionType};
use serde::{Deserialize, Serialize};

/// What a rendered block stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum BlockRole {
    /// A projected section
    Section(SectionType),
    /// Company boilerplate appended after the sections
    Footer,
    /// Placeholder shown when no section is visible
    EmptyState,
}

/// Layout variant a block was composed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockLayout {
    Full,
    Split,
    Diagonal(DiagonalEdge),
    Centered,
    /// Header plus project image grid
    Gallery,
    /// Footer and empty state
    Plain,
}

/// Direction of the diagonal clip on the content half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalEdge {
    /// Even visible index: edge slopes from top-right inward
    Forward,
    /// Odd visible index: mirrored
    Reverse,
}

impl DiagonalEdge {
    /// Edge for a position among visible sections.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            DiagonalEdge::Forward
        } else {
            DiagonalEdge::Reverse
        }
    }

    /// CSS `clip-path` polygon of the clipped half.
    pub fn clip_path(self) -> &'static str {
        match self {
            DiagonalEdge::Forward => "polygon(0 0, 100% 0, 85% 100%, 0 100%)",
            DiagonalEdge::Reverse => "polygon(0 0, 85% 0, 100% 100%, 0 100%)",
        }
    }
}

/// Block height policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockHeight {
    /// Sized by content
    Auto,
    /// Fixed preview band (384px)
    Band,
    /// Fills the page in single-page mode
    Page,
}

impl BlockHeight {
    /// Preview height in px, `None` when content-sized.
    pub fn px(self) -> Option<u32> {
        match self {
            BlockHeight::Auto => None,
            BlockHeight::Band => Some(384),
            BlockHeight::Page => Some(1056),
        }
    }
}

/// Role of a pane inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneRole {
    /// Carries title, text and section style
    Content,
    /// Neutral half of split/diagonal layouts
    Media,
}

/// Horizontal extent of a pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneWidth {
    Full,
    Half,
    /// Centered with a max width in px
    Constrained(u32),
}

/// Text alignment inside a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Start,
    Center,
}

/// Full-bleed background image behind a pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub src: String,
}

impl Background {
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }

    /// CSS declarations: cover-fit, centered, no repeat.
    pub fn to_css(&self) -> String {
        format!(
            "background-image: url('{}'); background-size: cover; background-position: center; background-repeat: no-repeat",
            self.src
        )
    }
}

/// Static project image shown in the gallery grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryCell {
    pub src: String,
    /// Caption revealed on hover
    pub caption: String,
}

/// One titled card of static lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoCard {
    pub icon: String,
    pub heading: String,
    pub lines: Vec<String>,
}

/// Content node inside a pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Heading (1 = document title, 2 = section title, 3 = card/footer)
    Heading { level: u8, text: String },

    /// Lines separated by hard breaks
    Text { lines: Vec<String> },

    /// Document tagline
    Subtitle { text: String },

    /// Company logo
    Logo { src: String },

    /// Inline image filling its pane
    Image { src: String, alt: String },

    /// Neutral placeholder with a label
    Placeholder { label: String },

    /// Responsive image grid
    Grid {
        narrow_columns: u8,
        wide_columns: u8,
        cells: Vec<GalleryCell>,
    },

    /// Card group (contact details)
    Cards { cards: Vec<InfoCard> },

    /// Single row of short items
    Strip { items: Vec<String> },
}

impl Node {
    /// Plain text carried by this node, for searchable output.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Heading { text, .. } | Node::Subtitle { text } => text.clone(),
            Node::Text { lines } => lines.join("\n"),
            Node::Placeholder { label } => label.clone(),
            Node::Grid { cells, .. } => cells
                .iter()
                .map(|c| c.caption.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Node::Cards { cards } => cards
                .iter()
                .map(|c| format!("{}\n{}", c.heading, c.lines.join("\n")))
                .collect::<Vec<_>>()
                .join("\n"),
            Node::Strip { items } => items.join("  "),
            Node::Logo { .. } | Node::Image { .. } => String::new(),
        }
    }
}

/// A rectangular region of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pane {
    pub role: PaneRole,
    pub width: PaneWidth,
    pub align: Align,

    /// Section style, only on content panes
    pub style: Option<RenderStyle>,

    /// Full-bleed background behind the pane
    pub background: Option<Background>,

    /// Diagonal clip of the pane edge
    pub clip: Option<DiagonalEdge>,

    /// Corner radius in px
    pub corner_radius: u32,

    pub nodes: Vec<Node>,
}

impl Pane {
    /// Create an empty pane.
    pub fn new(role: PaneRole, width: PaneWidth) -> Self {
        Self {
            role,
            width,
            align: Align::Start,
            style: None,
            background: None,
            clip: None,
            corner_radius: 0,
            nodes: Vec::new(),
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_background(mut self, background: Option<Background>) -> Self {
        self.background = background;
        self
    }

    pub fn with_clip(mut self, edge: DiagonalEdge) -> Self {
        self.clip = Some(edge);
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn push(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }
}

/// One composed block of the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedBlock {
    /// Source section, `None` for footer and empty state
    pub section_id: Option<SectionId>,
    pub role: BlockRole,
    pub layout: BlockLayout,
    pub height: BlockHeight,
    /// Panes left to right
    pub panes: Vec<Pane>,
}

impl RenderedBlock {
    /// The pane carrying the section content, if any.
    pub fn content_pane(&self) -> Option<&Pane> {
        self.panes.iter().find(|p| p.role == PaneRole::Content)
    }

    /// The block's title text.
    pub fn title(&self) -> Option<&str> {
        self.panes
            .iter()
            .flat_map(|p| p.nodes.iter())
            .find_map(|node| match node {
                Node::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
    }

    /// All text of the block in reading order.
    pub fn plain_text(&self) -> String {
        self.panes
            .iter()
            .flat_map(|p| p.nodes.iter())
            .map(Node::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A fully composed document: the surface the export pipeline captures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub title: String,
    /// Page width in px
    pub page_width: u32,
    pub single_page: bool,
    pub blocks: Vec<RenderedBlock>,
}

impl RenderedDocument {
    /// Blocks that came from sections, in page order.
    pub fn section_blocks(&self) -> impl Iterator<Item = &RenderedBlock> {
        self.blocks
            .iter()
            .filter(|b| matches!(b.role, BlockRole::Section(_)))
    }

    /// Number of section pages.
    pub fn page_count(&self) -> u32 {
        self.section_blocks().count() as u32
    }

    /// The footer block, if present.
    pub fn footer(&self) -> Option<&RenderedBlock> {
        self.blocks.iter().find(|b| b.role == BlockRole::Footer)
    }

    /// Check whether this is the empty-state rendering.
    pub fn is_empty_state(&self) -> bool {
        self.blocks.iter().any(|b| b.role == BlockRole::EmptyState)
    }
}
