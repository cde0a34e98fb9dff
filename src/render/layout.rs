//! Layout projection: sections to rendered blocks.
//!
//! A section's `{type, layout}` pair decides the composition. The project
//! gallery overrides the layout; every other type is dispatched on the
//! layout variant. Positions are counted among visible sections only, so
//! hiding a section shifts the diagonal mirroring of the ones after it.

use super::block::{
    Background, BlockHeight, BlockLayout, BlockRole, DiagonalEdge, Node, Pane, PaneRole,
    PaneWidth, RenderedBlock, RenderedDocument,
};
use super::catalog;
use super::options::{RenderOptions, PAGE_WIDTH};
use super::style::{resolve, RenderStyle};
use crate::error::{Error, Result};
use crate::model::{Document, EffectMap, Layout, Section, SectionType, StyleSpec};

/// Corner radius of centered and hero panes in px.
pub const ROUNDED_RADIUS: u32 = 12;

/// Footer background: blue-900 to blue-700.
const FOOTER_BACKGROUND: &str = "linear-gradient(to right, #1e3a8a, #1d4ed8)";

/// Projects a document with a fixed set of options and effect overlays.
#[derive(Debug, Clone)]
pub struct Projector<'a> {
    document: &'a Document,
    options: RenderOptions,
    effects: Option<&'a EffectMap>,
}

impl<'a> Projector<'a> {
    /// Create a projector with default options and no effects.
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            options: RenderOptions::default(),
            effects: None,
        }
    }

    /// Set render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Stack effect overlays on top of section styles.
    pub fn with_effects(mut self, effects: &'a EffectMap) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Project one section at its position among visible sections.
    ///
    /// Hidden sections produce no block.
    pub fn project(&self, section: &Section, index: usize) -> Option<RenderedBlock> {
        if !section.visible {
            return None;
        }

        let style = resolve(
            &section.styles,
            self.effects.and_then(|effects| effects.get(&section.id)),
        );
        let background = section.background_image.as_deref().map(Background::new);
        let height = if self.options.single_page {
            BlockHeight::Page
        } else {
            BlockHeight::Band
        };

        let block = |layout, height, panes| RenderedBlock {
            section_id: Some(section.id.clone()),
            role: BlockRole::Section(section.section_type),
            layout,
            height,
            panes,
        };

        if section.section_type == SectionType::Projects {
            let pane = Pane::new(PaneRole::Content, PaneWidth::Full)
                .centered()
                .with_style(style)
                .with_background(background)
                .push(heading(2, &section.title))
                .push(text(section))
                .push(Node::Grid {
                    narrow_columns: 2,
                    wide_columns: 4,
                    cells: catalog::project_cells(),
                });
            return Some(block(BlockLayout::Gallery, BlockHeight::Auto, vec![pane]));
        }

        let projected = match section.layout {
            Layout::Diagonal => {
                let edge = DiagonalEdge::for_index(index);
                let content = Pane::new(PaneRole::Content, PaneWidth::Half)
                    .centered()
                    .with_style(style)
                    .with_background(background)
                    .with_clip(edge)
                    .push(heading(2, &section.title))
                    .push(text(section));
                let media = Pane::new(PaneRole::Media, PaneWidth::Half)
                    .centered()
                    .push(Node::Placeholder {
                        label: "Content Area".to_string(),
                    });
                block(BlockLayout::Diagonal(edge), height, vec![content, media])
            }
            Layout::Split => {
                let content = Pane::new(PaneRole::Content, PaneWidth::Half)
                    .with_style(style)
                    .with_background(background)
                    .push(heading(2, &section.title))
                    .push(text(section));
                let image = match section.background_image {
                    Some(ref src) => Node::Image {
                        src: src.clone(),
                        alt: "Section background".to_string(),
                    },
                    None => Node::Placeholder {
                        label: "Image Placeholder".to_string(),
                    },
                };
                let media = Pane::new(PaneRole::Media, PaneWidth::Half)
                    .centered()
                    .push(image);
                block(BlockLayout::Split, height, vec![content, media])
            }
            Layout::Centered => {
                let pane = Pane::new(PaneRole::Content, PaneWidth::Constrained(PAGE_WIDTH))
                    .centered()
                    .with_style(style)
                    .with_background(background)
                    .with_radius(ROUNDED_RADIUS)
                    .push(heading(2, &section.title))
                    .push(text(section));
                block(BlockLayout::Centered, height, vec![pane])
            }
            Layout::Full if section.section_type == SectionType::Hero => {
                let mut pane = Pane::new(PaneRole::Content, PaneWidth::Full)
                    .centered()
                    .with_style(style)
                    .with_background(background)
                    .with_radius(ROUNDED_RADIUS);
                if let Some(ref logo) = self.document.logo {
                    pane = pane.push(Node::Logo { src: logo.clone() });
                }
                let pane = pane
                    .push(heading(1, &self.document.title))
                    .push(Node::Subtitle {
                        text: self.document.subtitle.clone(),
                    })
                    .push(text(section));
                block(BlockLayout::Full, height, vec![pane])
            }
            Layout::Full => {
                let mut pane = Pane::new(PaneRole::Content, PaneWidth::Full)
                    .with_style(style)
                    .with_background(background)
                    .push(heading(2, &section.title))
                    .push(text(section));
                if section.section_type == SectionType::Contact {
                    pane = pane.push(Node::Cards {
                        cards: catalog::contact_cards(),
                    });
                }
                block(BlockLayout::Full, BlockHeight::Auto, vec![pane])
            }
        };

        Some(projected)
    }

    /// Project the whole document.
    ///
    /// Visible sections in order, then the footer unless rendering a single
    /// page. An empty-state block stands in when nothing is visible.
    pub fn project_document(&self) -> RenderedDocument {
        let mut blocks: Vec<RenderedBlock> = self
            .document
            .visible_sections()
            .enumerate()
            .filter_map(|(index, section)| self.project(section, index))
            .collect();

        if blocks.is_empty() {
            log::debug!("no visible sections, rendering empty state");
            blocks.push(self.empty_state());
        }

        if !self.options.single_page {
            blocks.push(self.footer());
        }

        log::debug!(
            "projected {} blocks from {} sections",
            blocks.len(),
            self.document.section_count()
        );

        RenderedDocument {
            title: self.document.title.clone(),
            page_width: self.options.page_width(),
            single_page: self.options.single_page,
            blocks,
        }
    }

    /// Project the n-th visible section (1-indexed) as an isolated page.
    pub fn project_page(&self, page: u32) -> Result<RenderedDocument> {
        let total = self.document.visible_count() as u32;
        let section = self
            .document
            .visible_page(page)
            .ok_or(Error::PageOutOfRange(page, total))?;

        let projector = Projector {
            options: self.options.clone().with_single_page(true),
            ..self.clone()
        };

        let blocks = projector
            .project(section, (page - 1) as usize)
            .into_iter()
            .collect();

        Ok(RenderedDocument {
            title: self.document.title.clone(),
            page_width: projector.options.page_width(),
            single_page: true,
            blocks,
        })
    }

    fn footer(&self) -> RenderedBlock {
        let style = resolve(
            &StyleSpec::new(FOOTER_BACKGROUND, "#ffffff", 14.0, 32.0, 0.0),
            None,
        );
        let mut pane = Pane::new(PaneRole::Content, PaneWidth::Full)
            .centered()
            .with_style(style);
        if let Some(ref logo) = self.document.logo {
            pane = pane.push(Node::Logo { src: logo.clone() });
        }
        let pane = pane
            .push(heading(3, catalog::COMPANY_NAME))
            .push(Node::Text {
                lines: vec![catalog::COMPANY_TAGLINE.to_string()],
            })
            .push(Node::Strip {
                items: catalog::footer_strip(),
            });

        RenderedBlock {
            section_id: None,
            role: BlockRole::Footer,
            layout: BlockLayout::Plain,
            height: BlockHeight::Auto,
            panes: vec![pane],
        }
    }

    fn empty_state(&self) -> RenderedBlock {
        let pane = Pane::new(PaneRole::Content, PaneWidth::Full)
            .centered()
            .push(Node::Placeholder {
                label: "No visible sections".to_string(),
            })
            .push(Node::Text {
                lines: vec![
                    "Add sections or make existing sections visible to see your brochure"
                        .to_string(),
                ],
            });

        RenderedBlock {
            section_id: None,
            role: BlockRole::EmptyState,
            layout: BlockLayout::Plain,
            height: BlockHeight::Band,
            panes: vec![pane],
        }
    }
}

fn heading(level: u8, text: &str) -> Node {
    Node::Heading {
        level,
        text: text.to_string(),
    }
}

fn text(section: &Section) -> Node {
    Node::Text {
        lines: section.content_lines().into_iter().map(String::from).collect(),
    }
}

/// Project one section of `document` without effects.
pub fn project(section: &Section, index: usize, document: &Document) -> Option<RenderedBlock> {
    Projector::new(document).project(section, index)
}

/// Project a whole document.
pub fn project_document(document: &Document, options: &RenderOptions) -> RenderedDocument {
    Projector::new(document)
        .with_options(options.clone())
        .project_document()
}

/// Project the n-th visible section (1-indexed) as an isolated page.
pub fn project_page(document: &Document, page: u32) -> Result<RenderedDocument> {
    Projector::new(document).project_page(page)
}

/// Resolved style of a section, with its effect overlay if any.
pub fn section_style(section: &Section, effects: Option<&EffectMap>) -> RenderStyle {
    resolve(
        &section.styles,
        effects.and_then(|effects| effects.get(&section.id)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EffectPatch, EffectSpec, SectionId};

    fn doc_with(sections: Vec<Section>) -> Document {
        sections
            .into_iter()
            .fold(Document::new("Acme", "We build"), Document::with_section)
    }

    #[test]
    fn test_hidden_section_projects_nothing() {
        let section = Section::new("1").with_visible(false);
        let doc = doc_with(vec![section.clone()]);
        assert!(project(&section, 0, &doc).is_none());
    }

    #[test]
    fn test_projects_ignores_layout() {
        let section = Section::new("1")
            .with_type(SectionType::Projects)
            .with_layout(Layout::Split);
        let doc = doc_with(vec![section.clone()]);
        let block = project(&section, 0, &doc).unwrap();

        assert_eq!(block.layout, BlockLayout::Gallery);
        let grid = block.panes[0]
            .nodes
            .iter()
            .find_map(|n| match n {
                Node::Grid {
                    narrow_columns,
                    wide_columns,
                    cells,
                } => Some((*narrow_columns, *wide_columns, cells.len())),
                _ => None,
            })
            .unwrap();
        assert_eq!(grid, (2, 4, 9));
    }

    #[test]
    fn test_diagonal_mirrors_by_index() {
        let section = Section::new("1").with_layout(Layout::Diagonal);
        let doc = doc_with(vec![section.clone()]);

        let even = project(&section, 0, &doc).unwrap();
        let odd = project(&section, 1, &doc).unwrap();
        assert_eq!(even.layout, BlockLayout::Diagonal(DiagonalEdge::Forward));
        assert_eq!(odd.layout, BlockLayout::Diagonal(DiagonalEdge::Reverse));
        assert_eq!(even.panes[0].clip, Some(DiagonalEdge::Forward));
        assert_eq!(
            even.panes[1].nodes[0],
            Node::Placeholder {
                label: "Content Area".into()
            }
        );
    }

    #[test]
    fn test_split_media_pane() {
        let plain = Section::new("1").with_layout(Layout::Split);
        let pictured = plain.clone().with_background("/bg.jpg");
        let doc = doc_with(vec![plain.clone()]);

        let block = project(&plain, 0, &doc).unwrap();
        assert!(matches!(block.panes[1].nodes[0], Node::Placeholder { .. }));

        let block = project(&pictured, 0, &doc).unwrap();
        assert!(matches!(block.panes[1].nodes[0], Node::Image { ref src, .. } if src == "/bg.jpg"));
        assert_eq!(
            block.panes[0].background,
            Some(Background::new("/bg.jpg"))
        );
    }

    #[test]
    fn test_centered_is_constrained_and_rounded() {
        let section = Section::new("1").with_layout(Layout::Centered);
        let doc = doc_with(vec![section.clone()]);
        let pane = &project(&section, 0, &doc).unwrap().panes[0];

        assert_eq!(pane.width, PaneWidth::Constrained(672));
        assert_eq!(pane.corner_radius, ROUNDED_RADIUS);
    }

    #[test]
    fn test_hero_uses_document_header() {
        let section = Section::new("1")
            .with_type(SectionType::Hero)
            .with_content("Hello");
        let doc = doc_with(vec![section.clone()]).with_logo("/logo.png");
        let block = project(&section, 0, &doc).unwrap();
        let nodes = &block.panes[0].nodes;

        assert_eq!(nodes[0], Node::Logo { src: "/logo.png".into() });
        assert_eq!(block.title(), Some("Acme"));
        assert_eq!(nodes[2], Node::Subtitle { text: "We build".into() });
    }

    #[test]
    fn test_contact_appends_cards() {
        let section = Section::new("1").with_type(SectionType::Contact);
        let doc = doc_with(vec![section.clone()]);
        let block = project(&section, 0, &doc).unwrap();
        assert!(block.panes[0]
            .nodes
            .iter()
            .any(|n| matches!(n, Node::Cards { cards } if cards.len() == 4)));
    }

    #[test]
    fn test_content_lines_are_hard_breaks() {
        let section = Section::new("1").with_content("a\n\nb");
        let doc = doc_with(vec![section.clone()]);
        let block = project(&section, 0, &doc).unwrap();
        assert_eq!(
            block.panes[0].nodes[1],
            Node::Text {
                lines: vec!["a".into(), "".into(), "b".into()]
            }
        );
    }

    #[test]
    fn test_document_footer_and_empty_state() {
        let doc = doc_with(vec![Section::new("1").with_visible(false)]);
        let rendered = project_document(&doc, &RenderOptions::default());
        assert!(rendered.is_empty_state());
        assert!(rendered.footer().is_some());
        assert_eq!(rendered.page_count(), 0);

        let single = project_document(&doc, &RenderOptions::new().with_single_page(true));
        assert!(single.footer().is_none());
    }

    #[test]
    fn test_effects_are_applied() {
        let section = Section::new("1");
        let doc = doc_with(vec![section.clone()]);
        let mut effects = EffectMap::new();
        effects.insert(
            SectionId::new("1"),
            EffectSpec::default().patched(&EffectPatch::new().blur(3.0)),
        );

        let block = Projector::new(&doc)
            .with_effects(&effects)
            .project(&section, 0)
            .unwrap();
        let style = block.panes[0].style.as_ref().unwrap();
        assert_eq!(
            style.effects.as_ref().unwrap().filter.as_deref(),
            Some("blur(3px)")
        );
    }

    #[test]
    fn test_project_page() {
        let doc = Document::sample();
        let page = project_page(&doc, 2).unwrap();
        assert!(page.single_page);
        assert_eq!(page.blocks.len(), 1);
        assert!(page.footer().is_none());

        assert!(matches!(
            project_page(&doc, 99),
            Err(Error::PageOutOfRange(99, _))
        ));
    }
}
