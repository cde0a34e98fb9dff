//! Integration tests for editor operations.

use brochure::render::{BlockLayout, DiagonalEdge};
use brochure::{
    find_template, Direction, Document, DocumentPatch, EffectPatch, Editor, Error, ExportOptions,
    ImageAsset, Layout, SectionId, SectionPatch, SectionType, StylePatch, TransformPreset, View,
};

fn ids(editor: &Editor) -> Vec<String> {
    editor
        .document()
        .sections
        .iter()
        .map(|s| s.id.to_string())
        .collect()
}

#[test]
fn test_editing_session_keeps_ids_unique() {
    let editor = Editor::default()
        .add_section()
        .duplicate_section(&SectionId::new("2"))
        .add_section()
        .delete_section(&SectionId::new("7"))
        .add_section();

    assert!(editor.document().has_unique_ids());
    // Deleted ids are never handed out again
    assert!(!ids(&editor).contains(&"7".to_string()));
    assert_eq!(editor.document().section_count(), 9);
}

#[test]
fn test_duplicate_then_move() {
    let editor = Editor::default().duplicate_section(&SectionId::new("3"));
    let copy = editor.document().sections[3].id.clone();
    assert_eq!(editor.document().sections[3].title, "Our Comprehensive Services");

    let editor = editor
        .move_section(&copy, Direction::Up)
        .move_section(&copy, Direction::Up);
    assert_eq!(editor.document().sections[1].id, copy);
    assert_eq!(editor.document().sections[2].id, SectionId::new("2"));
}

#[test]
fn test_move_first_up_is_noop() {
    let before = ids(&Editor::default());
    let editor = Editor::default().move_section(&SectionId::new("1"), Direction::Up);
    assert_eq!(ids(&editor), before);
}

#[test]
fn test_update_document_and_section() {
    let editor = Editor::default()
        .update_document(DocumentPatch::new().title("Acme Ltd"))
        .update_section(
            &SectionId::new("2"),
            SectionPatch::new().layout(Layout::Diagonal).visible(false),
        )
        .update_section_style(&SectionId::new("3"), StylePatch::new().font_size(22.0));

    let doc = editor.document();
    assert_eq!(doc.title, "Acme Ltd");
    assert_eq!(doc.subtitle, "Empowering Your Business");
    assert_eq!(doc.sections[1].layout, Layout::Diagonal);
    assert!(!doc.sections[1].visible);
    assert_eq!(doc.sections[2].styles.font_size, 22.0);
    assert_eq!(doc.sections[2].styles.background_color, "#0f172a");
    assert_eq!(editor.page_count(), 5);
}

#[test]
fn test_template_replaces_sections() {
    let template = find_template("minimal-clean").unwrap();
    let editor = Editor::default()
        .update_effects(&SectionId::new("1"), EffectPatch::new().blur(4.0))
        .apply_template(&template);

    let doc = editor.document();
    assert_eq!(doc.section_count(), template.sections.len());
    assert!(doc.has_unique_ids());
    assert!(editor.effect_map().is_empty());
    assert_eq!(editor.selection(), Some(&doc.sections[0].id));

    for (section, slot) in doc.sections.iter().zip(&template.sections) {
        assert_eq!(section.section_type, slot.section_type);
        assert_eq!(section.layout, slot.layout);
        assert_eq!(section.styles, slot.styles);
        if section.section_type == SectionType::Hero {
            assert_eq!(section.title, doc.title);
        }
    }
}

#[test]
fn test_attach_image_uses_data_uri() {
    let png = b"\x89PNG\r\n\x1a\n0000".to_vec();
    let asset = ImageAsset::from_bytes_detect(png).unwrap();

    let editor = Editor::default()
        .select_section(&SectionId::new("4"))
        .attach_image(&asset);

    let section = editor.document().section(&SectionId::new("4")).unwrap();
    let uri = section.background_image.as_deref().unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
    assert_eq!(editor.selected_image(), Some(uri));
}

#[test]
fn test_effects_reach_rendered_style() {
    let id = SectionId::new("2");
    let editor = Editor::default()
        .update_effects(&id, EffectPatch::new().blur(3.0).brightness(120.0))
        .apply_transform_preset(&id, TransformPreset::SubtleTilt)
        .render();

    let rendered = editor.rendered().unwrap();
    let block = rendered
        .section_blocks()
        .find(|b| b.section_id.as_ref() == Some(&id))
        .unwrap();
    let effects = block
        .content_pane()
        .and_then(|p| p.style.as_ref())
        .and_then(|s| s.effects.as_ref())
        .unwrap();

    assert_eq!(effects.filter.as_deref(), Some("blur(3px) brightness(120%)"));
    assert!(effects.transform.as_deref().unwrap().contains("rotate("));

    let editor = editor.reset_effects(&id).render();
    let block = editor
        .rendered()
        .unwrap()
        .section_blocks()
        .find(|b| b.section_id.as_ref() == Some(&id))
        .unwrap()
        .clone();
    assert!(block.content_pane().unwrap().style.as_ref().unwrap().effects.is_none());
}

#[test]
fn test_page_view_follows_navigation() {
    let editor = Editor::default()
        .set_view(View::Pages)
        .go_to_page(2)
        .next_page();

    assert_eq!(editor.view(), View::Pages);
    assert_eq!(editor.current_page(), 3);

    let page = editor.page_view().unwrap();
    assert_eq!(page.page_count(), 1);
    assert!(page.single_page);
    assert!(page.footer().is_none());
    assert_eq!(page.blocks[0].section_id, Some(SectionId::new("4")));
}

#[test]
fn test_hiding_earlier_section_mirrors_diagonal() {
    let editor = Editor::default().render();
    let diagonal = |editor: &Editor| {
        editor
            .rendered()
            .unwrap()
            .section_blocks()
            .find(|b| b.section_id == Some(SectionId::new("3")))
            .map(|b| b.layout)
    };
    assert_eq!(
        diagonal(&editor),
        Some(BlockLayout::Diagonal(DiagonalEdge::Forward))
    );

    let editor = editor
        .update_section(&SectionId::new("2"), SectionPatch::new().visible(false))
        .render();
    assert_eq!(
        diagonal(&editor),
        Some(BlockLayout::Diagonal(DiagonalEdge::Reverse))
    );
}

#[test]
fn test_export_requires_render() {
    let editor = Editor::new(Document::sample());
    let result = editor.export(&ExportOptions::new().with_resolution(36));
    assert!(matches!(result, Err(Error::RenderTargetMissing)));
}

#[test]
fn test_hide_then_show_restores_rendering() {
    let editor = Editor::default().render();
    let original = editor.rendered().unwrap().clone();
    let id = SectionId::new("2");

    let hidden = editor
        .update_section(&id, SectionPatch::new().visible(false))
        .render();
    assert_ne!(hidden.rendered().unwrap(), &original);
    assert_eq!(hidden.rendered().unwrap().page_count(), 5);

    let shown = hidden
        .update_section(&id, SectionPatch::new().visible(true))
        .render();
    assert_eq!(shown.rendered().unwrap(), &original);
}

#[test]
fn test_delete_twice_removes_once() {
    let id = SectionId::new("2");
    let once = Editor::default().delete_section(&id);
    assert_eq!(once.document().section_count(), 5);
    assert!(!once.document().contains(&id));

    let twice = once.clone().delete_section(&id);
    assert_eq!(twice.document().section_count(), 5);
    assert_eq!(ids(&twice), ids(&once));
}
