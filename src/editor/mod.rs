//! Document editor state and operations.
//!
//! The editor owns a [`Document`] plus the state that lives beside it: the
//! selected section, per-section effect overlays, the id sequence, the view
//! mode and the last rendered surface. Every operation consumes the editor
//! and returns its successor, so keeping history is a matter of cloning.
//!
//! Operations are total. Referring to a missing section is a no-op that is
//! logged at debug level and leaves the state unchanged.

use crate::error::Result;
use crate::export::{export_document, ExportArtifact, ExportOptions};
use crate::model::{
    Document, DocumentPatch, EffectMap, EffectPatch, EffectSpec, ImageAsset, Section, SectionId,
    SectionPatch, SectionType, StylePatch, Template, TransformPreset,
};
use crate::render::{Projector, RenderOptions, RenderedDocument};

/// Content of hero sections created from a template.
pub const TEMPLATE_HERO_CONTENT: &str = "Welcome to our company";

/// Direction of a section move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What the editor is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Form editor beside a live preview
    #[default]
    Editor,
    /// Whole document preview
    Preview,
    /// One visible section at a time
    Pages,
}

/// Brochure editor state.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    selection: Option<SectionId>,
    selected_image: Option<String>,
    effects: EffectMap,
    /// Next numeric id, `None` once the numeric space is used up
    next_id: Option<u64>,
    /// Suffix counter for ids issued after the numeric space runs out
    spill: u64,
    view: View,
    current_page: usize,
    render_options: RenderOptions,
    rendered: Option<RenderedDocument>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Document::sample())
    }
}

impl Editor {
    /// Start editing a document. The first section is selected.
    pub fn new(document: Document) -> Self {
        let next_id = document
            .sections
            .iter()
            .filter_map(|s| s.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            .max(document.section_count() as u64)
            .checked_add(1);

        Self {
            selection: document.sections.first().map(|s| s.id.clone()),
            document,
            selected_image: None,
            effects: EffectMap::new(),
            next_id,
            spill: 0,
            view: View::default(),
            current_page: 0,
            render_options: RenderOptions::default(),
            rendered: None,
        }
    }

    /// Set options used by [`Editor::render`].
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    // Accessors

    /// The document being edited.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Give up the editor and keep the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Id of the selected section.
    pub fn selection(&self) -> Option<&SectionId> {
        self.selection.as_ref()
    }

    /// The selected section.
    pub fn selected_section(&self) -> Option<&Section> {
        self.selection
            .as_ref()
            .and_then(|id| self.document.section(id))
    }

    /// Last image picked from the gallery.
    pub fn selected_image(&self) -> Option<&str> {
        self.selected_image.as_deref()
    }

    /// Effect overlay of a section; default effects when none were set.
    pub fn effects(&self, id: &SectionId) -> EffectSpec {
        self.effects.get(id).cloned().unwrap_or_default()
    }

    /// All effect overlays.
    pub fn effect_map(&self) -> &EffectMap {
        &self.effects
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Zero-based page index of the page view, kept within the visible sections.
    pub fn current_page(&self) -> usize {
        self.current_page
            .min(self.page_count().saturating_sub(1))
    }

    /// Number of pages, one per visible section.
    pub fn page_count(&self) -> usize {
        self.document.visible_count()
    }

    /// The last rendered surface.
    pub fn rendered(&self) -> Option<&RenderedDocument> {
        self.rendered.as_ref()
    }

    // Document operations

    /// Merge title, subtitle and logo.
    pub fn update_document(mut self, patch: DocumentPatch) -> Self {
        patch.apply(&mut self.document);
        self
    }

    /// Append a default section and select it.
    pub fn add_section(mut self) -> Self {
        let id = self.fresh_id();
        log::debug!("adding section {}", id);
        self.document.sections.push(Section::new(id.clone()));
        self.selection = Some(id);
        self
    }

    /// Insert a copy of a section right after it.
    pub fn duplicate_section(mut self, id: &SectionId) -> Self {
        let Some(position) = self.document.position(id) else {
            log::debug!("duplicate: no section {}", id);
            return self;
        };
        let copy_id = self.fresh_id();
        let copy = self.document.sections[position].duplicate(copy_id);
        self.document.sections.insert(position + 1, copy);
        self
    }

    /// Swap a section with its neighbour.
    pub fn move_section(mut self, id: &SectionId, direction: Direction) -> Self {
        let Some(position) = self.document.position(id) else {
            log::debug!("move: no section {}", id);
            return self;
        };
        let target = match direction {
            Direction::Up => position.checked_sub(1),
            Direction::Down => Some(position + 1).filter(|&t| t < self.document.section_count()),
        };
        match target {
            Some(target) => self.document.sections.swap(position, target),
            None => log::debug!("move: section {} already at boundary", id),
        }
        self
    }

    /// Remove a section and its effects.
    ///
    /// Deleting the selected section selects the new first section.
    pub fn delete_section(mut self, id: &SectionId) -> Self {
        let Some(position) = self.document.position(id) else {
            log::debug!("delete: no section {}", id);
            return self;
        };
        self.document.sections.remove(position);
        self.effects.remove(id);
        if self.selection.as_ref() == Some(id) {
            self.selection = self.document.sections.first().map(|s| s.id.clone());
        }
        self
    }

    /// Shallow merge of section fields, visibility included.
    pub fn update_section(mut self, id: &SectionId, patch: SectionPatch) -> Self {
        match self.section_mut(id) {
            Some(section) => patch.apply(section),
            None => log::debug!("update: no section {}", id),
        }
        self
    }

    /// Merge into a section's base style.
    pub fn update_section_style(mut self, id: &SectionId, patch: StylePatch) -> Self {
        match self.section_mut(id) {
            Some(section) => patch.apply(&mut section.styles),
            None => log::debug!("update style: no section {}", id),
        }
        self
    }

    /// Replace all sections with the template's sections.
    ///
    /// Hero sections take the document title; the rest get numbered
    /// placeholder titles. Existing effects are dropped and the first new
    /// section is selected.
    pub fn apply_template(mut self, template: &Template) -> Self {
        log::debug!(
            "applying template {} ({} sections)",
            template.id,
            template.sections.len()
        );

        let mut sections = Vec::with_capacity(template.sections.len());
        for (index, entry) in template.sections.iter().enumerate() {
            let (title, content) = if entry.section_type == SectionType::Hero {
                (self.document.title.clone(), TEMPLATE_HERO_CONTENT.to_string())
            } else {
                (
                    format!("Section {}", index + 1),
                    Section::DEFAULT_CONTENT.to_string(),
                )
            };
            sections.push(
                Section::new(self.fresh_id_avoiding(&sections))
                    .with_type(entry.section_type)
                    .with_layout(entry.layout)
                    .with_title(title)
                    .with_content(content)
                    .with_styles(entry.styles.clone()),
            );
        }

        self.document.sections = sections;
        self.effects.clear();
        self.selection = self.document.sections.first().map(|s| s.id.clone());
        self.current_page = 0;
        self
    }

    /// Select a section.
    pub fn select_section(mut self, id: &SectionId) -> Self {
        if self.document.contains(id) {
            self.selection = Some(id.clone());
        } else {
            log::debug!("select: no section {}", id);
        }
        self
    }

    /// Set or clear a section's background image.
    pub fn set_section_image(mut self, id: &SectionId, uri: Option<String>) -> Self {
        match self.section_mut(id) {
            Some(section) => section.background_image = uri,
            None => log::debug!("set image: no section {}", id),
        }
        self
    }

    /// Pick an image and use it as the selected section's background.
    pub fn select_image(mut self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        self.selected_image = Some(uri.clone());
        match self.selection.clone() {
            Some(id) => self.set_section_image(&id, Some(uri)),
            None => {
                log::debug!("image picked without a selected section");
                self
            }
        }
    }

    /// Use an uploaded image as the selected section's background.
    pub fn attach_image(self, asset: &ImageAsset) -> Self {
        self.select_image(asset.to_data_uri())
    }

    // Effects

    /// Merge into a section's effect overlay.
    pub fn update_effects(mut self, id: &SectionId, patch: EffectPatch) -> Self {
        if !self.document.contains(id) {
            log::debug!("effects: no section {}", id);
            return self;
        }
        let current = self.effects(id);
        self.effects.insert(id.clone(), current.patched(&patch));
        self
    }

    /// Replace a section's transform with a preset.
    pub fn apply_transform_preset(self, id: &SectionId, preset: TransformPreset) -> Self {
        self.update_effects(id, EffectPatch::new().with_transform(preset.transform()))
    }

    /// Back to default effects.
    pub fn reset_effects(mut self, id: &SectionId) -> Self {
        self.effects.remove(id);
        self
    }

    // View

    pub fn set_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Advance the page view, wrapping after the last page.
    pub fn next_page(mut self) -> Self {
        let total = self.page_count();
        if total > 0 {
            self.current_page = (self.current_page() + 1) % total;
        }
        self
    }

    /// Step the page view back, wrapping before the first page.
    pub fn prev_page(mut self) -> Self {
        let total = self.page_count();
        if total > 0 {
            self.current_page = (self.current_page() + total - 1) % total;
        }
        self
    }

    /// Jump to a zero-based page index.
    pub fn go_to_page(mut self, index: usize) -> Self {
        if index < self.page_count() {
            self.current_page = index;
        } else {
            log::debug!("go to page: {} out of {}", index, self.page_count());
        }
        self
    }

    /// Project the current page as an isolated page.
    pub fn page_view(&self) -> Result<RenderedDocument> {
        self.projector().project_page(self.current_page() as u32 + 1)
    }

    // Render and export

    /// Project the whole document with current effects and keep the surface.
    pub fn render(mut self) -> Self {
        let rendered = self.projector().project_document();
        self.rendered = Some(rendered);
        self
    }

    /// Export the last rendered surface.
    ///
    /// Fails with `RenderTargetMissing` before the first [`Editor::render`].
    pub fn export(&self, options: &ExportOptions) -> Result<ExportArtifact> {
        export_document(self.rendered.as_ref(), options)
    }

    fn projector(&self) -> Projector<'_> {
        Projector::new(&self.document)
            .with_options(self.render_options.clone())
            .with_effects(&self.effects)
    }

    fn section_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.document.sections.iter_mut().find(|s| &s.id == id)
    }

    fn fresh_id(&mut self) -> SectionId {
        self.fresh_id_avoiding(&[])
    }

    /// Next id of the sequence that is not used by the document or `pending`.
    fn fresh_id_avoiding(&mut self, pending: &[Section]) -> SectionId {
        loop {
            let id = match self.next_id {
                Some(n) => {
                    self.next_id = n.checked_add(1);
                    SectionId::new(n.to_string())
                }
                None => {
                    self.spill = self.spill.wrapping_add(1);
                    SectionId::new(format!("{}-{}", u64::MAX, self.spill))
                }
            };
            if !self.document.contains(&id) && !pending.iter().any(|s| s.id == id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{find_template, Layout};

    fn ids(editor: &Editor) -> Vec<String> {
        editor
            .document()
            .sections
            .iter()
            .map(|s| s.id.to_string())
            .collect()
    }

    #[test]
    fn test_new_selects_first_section() {
        let editor = Editor::default();
        assert_eq!(editor.selection(), Some(&SectionId::new("1")));
        assert_eq!(editor.view(), View::Editor);
    }

    #[test]
    fn test_largest_numeric_id_does_not_exhaust_ids() {
        let doc = Document::new("Acme", "Tagline")
            .with_section(Section::new(u64::MAX.to_string()))
            .with_section(Section::new(format!("{}-1", u64::MAX)));
        let editor = Editor::new(doc)
            .add_section()
            .add_section()
            .duplicate_section(&SectionId::new(u64::MAX.to_string()));

        assert_eq!(editor.document().section_count(), 5);
        assert!(editor.document().has_unique_ids());
        assert_eq!(
            editor.document().sections[1].id,
            SectionId::new(format!("{}-4", u64::MAX))
        );
    }

    #[test]
    fn test_add_section_selects_it() {
        let editor = Editor::default().add_section();
        let added = editor.document().sections.last().unwrap();

        assert_eq!(added.title, Section::DEFAULT_TITLE);
        assert_eq!(editor.selection(), Some(&added.id));
        assert!(editor.document().has_unique_ids());
    }

    #[test]
    fn test_duplicate_inserts_after_source() {
        let editor = Editor::default().duplicate_section(&SectionId::new("2"));
        let sections = &editor.document().sections;

        assert_eq!(sections.len(), 7);
        assert_eq!(sections[2].title, format!("{} (Copy)", sections[1].title));
        assert_ne!(sections[2].id, sections[1].id);
        assert!(editor.document().has_unique_ids());
    }

    #[test]
    fn test_move_at_boundary_is_noop() {
        let editor = Editor::default();
        let before = ids(&editor);
        let editor = editor.move_section(&SectionId::new("1"), Direction::Up);
        assert_eq!(ids(&editor), before);

        let editor = editor.move_section(&SectionId::new("1"), Direction::Down);
        assert_eq!(&ids(&editor)[..2], ["2", "1"]);
    }

    #[test]
    fn test_delete_selected_falls_back_to_first() {
        let editor = Editor::default()
            .select_section(&SectionId::new("3"))
            .update_effects(&SectionId::new("3"), EffectPatch::new().blur(2.0))
            .delete_section(&SectionId::new("3"));

        assert_eq!(editor.selection(), Some(&SectionId::new("1")));
        assert!(editor.effect_map().is_empty());
        assert_eq!(editor.document().section_count(), 5);
    }

    #[test]
    fn test_missing_id_is_noop() {
        let editor = Editor::default();
        let before = editor.document().clone();
        let missing = SectionId::new("nope");
        let editor = editor
            .duplicate_section(&missing)
            .delete_section(&missing)
            .update_section(&missing, SectionPatch::new().title("x"))
            .select_section(&missing);

        assert_eq!(editor.document(), &before);
        assert_eq!(editor.selection(), Some(&SectionId::new("1")));
    }

    #[test]
    fn test_apply_template() {
        let template = find_template("minimal-clean").unwrap();
        let editor = Editor::default().apply_template(&template);
        let doc = editor.document();

        assert_eq!(doc.section_count(), template.sections.len());
        assert!(doc.has_unique_ids());
        for (index, section) in doc.sections.iter().enumerate() {
            assert_eq!(section.section_type, template.sections[index].section_type);
            if section.section_type == SectionType::Hero {
                assert_eq!(section.title, doc.title);
                assert_eq!(section.content, TEMPLATE_HERO_CONTENT);
            } else {
                assert_eq!(section.title, format!("Section {}", index + 1));
            }
        }
    }

    #[test]
    fn test_select_image_sets_background() {
        let editor = Editor::default().select_image("/office.jpg");
        assert_eq!(
            editor.selected_section().unwrap().background_image.as_deref(),
            Some("/office.jpg")
        );
        assert_eq!(editor.selected_image(), Some("/office.jpg"));
    }

    #[test]
    fn test_transform_preset_and_reset() {
        let id = SectionId::new("2");
        let editor = Editor::default().apply_transform_preset(&id, TransformPreset::ScaleUp);
        assert_eq!(editor.effects(&id).transform.scale, 110.0);

        let editor = editor.reset_effects(&id);
        assert_eq!(editor.effects(&id), EffectSpec::default());
    }

    #[test]
    fn test_page_navigation_wraps() {
        let editor = Editor::default().set_view(View::Pages);
        assert_eq!(editor.page_count(), 6);

        let editor = editor.prev_page();
        assert_eq!(editor.current_page(), 5);
        let editor = editor.next_page();
        assert_eq!(editor.current_page(), 0);
        let editor = editor.go_to_page(3).go_to_page(10);
        assert_eq!(editor.current_page(), 3);
    }

    #[test]
    fn test_render_applies_layout_change() {
        let id = SectionId::new("1");
        let editor = Editor::default()
            .update_section(&id, SectionPatch::new().layout(Layout::Split))
            .render();
        let rendered = editor.rendered().unwrap();
        assert_eq!(rendered.page_count(), 6);
    }
}
