//! Integration tests for layout projection and preview output.

use brochure::render::{
    project_document, project_page, rendered_to_json, to_html, BlockHeight, BlockLayout,
    BlockRole, JsonFormat, Node, PaneWidth, RenderOptions, RenderedDocument, FULLSCREEN_PAGE_WIDTH,
    PAGE_WIDTH,
};
use brochure::{Document, Error, Layout, Section, SectionType};

#[test]
fn test_projection_is_deterministic() {
    let doc = Document::sample();
    let options = RenderOptions::default();
    assert_eq!(
        project_document(&doc, &options),
        project_document(&doc, &options)
    );
    assert_eq!(
        to_html(&project_document(&doc, &options), &options),
        to_html(&project_document(&doc, &options), &options)
    );
}

#[test]
fn test_sample_block_layouts() {
    let rendered = project_document(&Document::sample(), &RenderOptions::default());
    let layouts: Vec<BlockLayout> = rendered.blocks.iter().map(|b| b.layout).collect();

    assert_eq!(layouts.len(), 7);
    assert_eq!(layouts[0], BlockLayout::Full);
    assert_eq!(layouts[1], BlockLayout::Split);
    assert!(matches!(layouts[2], BlockLayout::Diagonal(_)));
    assert_eq!(layouts[3], BlockLayout::Gallery);
    assert_eq!(layouts[4], BlockLayout::Centered);
    assert_eq!(layouts[5], BlockLayout::Split);
    assert_eq!(rendered.blocks[6].role, BlockRole::Footer);
}

#[test]
fn test_fullscreen_widens_page() {
    let doc = Document::sample();
    let normal = project_document(&doc, &RenderOptions::default());
    let wide = project_document(&doc, &RenderOptions::new().with_fullscreen(true));
    assert_eq!(normal.page_width, PAGE_WIDTH);
    assert_eq!(wide.page_width, FULLSCREEN_PAGE_WIDTH);
}

#[test]
fn test_centered_block_stays_narrow() {
    let rendered = project_document(
        &Document::sample(),
        &RenderOptions::new().with_fullscreen(true),
    );
    let centered = rendered
        .blocks
        .iter()
        .find(|b| b.layout == BlockLayout::Centered)
        .unwrap();
    assert_eq!(centered.panes[0].width, PaneWidth::Constrained(PAGE_WIDTH));
}

#[test]
fn test_all_hidden_renders_empty_state() {
    let mut doc = Document::sample();
    for section in &mut doc.sections {
        section.visible = false;
    }

    let rendered = project_document(&doc, &RenderOptions::default());
    assert!(rendered.is_empty_state());
    assert_eq!(rendered.page_count(), 0);
    assert!(rendered.footer().is_some());

    let html = to_html(&rendered, &RenderOptions::default());
    assert!(html.contains("No visible sections"));
}

#[test]
fn test_project_page_isolates_section() {
    let doc = Document::sample();
    let page = project_page(&doc, 5).unwrap();

    assert_eq!(page.blocks.len(), 1);
    assert_eq!(page.blocks[0].height, BlockHeight::Page);
    assert_eq!(page.blocks[0].title(), Some("Our Vision, Mission & Leadership"));

    assert!(matches!(
        project_page(&doc, 0),
        Err(Error::PageOutOfRange(0, 6))
    ));
    assert!(matches!(
        project_page(&doc, 7),
        Err(Error::PageOutOfRange(7, 6))
    ));
}

#[test]
fn test_projects_section_ignores_layout() {
    let doc = Document::new("Acme", "Tagline").with_section(
        Section::new("p")
            .with_type(SectionType::Projects)
            .with_layout(Layout::Diagonal),
    );
    let rendered = project_document(&doc, &RenderOptions::default());
    let block = &rendered.blocks[0];

    assert_eq!(block.layout, BlockLayout::Gallery);
    let grid = block.panes[0]
        .nodes
        .iter()
        .find_map(|n| match n {
            Node::Grid { cells, .. } => Some(cells.len()),
            _ => None,
        })
        .unwrap();
    assert_eq!(grid, 9);
}

#[test]
fn test_standalone_html_document() {
    let options = RenderOptions::new().with_standalone_html(true);
    let html = to_html(&project_document(&Document::sample(), &options), &options);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Anchorage Business Corp Pvt. Ltd.</title>"));
    assert!(html.contains("About Us &amp; Why Choose Us"));
}

#[test]
fn test_rendered_json_round_trip() {
    let rendered = project_document(&Document::sample(), &RenderOptions::default());
    let json = rendered_to_json(&rendered, JsonFormat::Compact).unwrap();
    let parsed: RenderedDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, rendered);
}
