//! Section-level types.

use super::StyleSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque section identity, unique within a document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Hero,
    #[default]
    Content,
    Services,
    Contact,
    Testimonial,
    Projects,
}

impl SectionType {
    /// Short description shown in page navigation.
    pub fn page_label(self) -> &'static str {
        match self {
            SectionType::Hero => "Cover Page",
            SectionType::Projects => "Project Gallery",
            SectionType::Contact => "Contact Info",
            SectionType::Content | SectionType::Services | SectionType::Testimonial => "Content",
        }
    }

    /// Lowercase name as used in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Hero => "hero",
            SectionType::Content => "content",
            SectionType::Services => "services",
            SectionType::Contact => "contact",
            SectionType::Testimonial => "testimonial",
            SectionType::Projects => "projects",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spatial arrangement of a section's title, content and image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Full,
    Split,
    Diagonal,
    Centered,
}

impl Layout {
    /// Lowercase name as used in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Full => "full",
            Layout::Split => "split",
            Layout::Diagonal => "diagonal",
            Layout::Centered => "centered",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One content block of a brochure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Identity, unique within the document
    pub id: SectionId,

    /// Section kind
    #[serde(rename = "type")]
    pub section_type: SectionType,

    /// Layout variant
    pub layout: Layout,

    /// Heading text
    pub title: String,

    /// Body text; `\n` is a hard line break
    pub content: String,

    /// Background image URI
    #[serde(default)]
    pub background_image: Option<String>,

    /// Whether the section is rendered and exported
    #[serde(default = "default_visible")]
    pub visible: bool,

    /// Base style
    #[serde(default)]
    pub styles: StyleSpec,
}

fn default_visible() -> bool {
    true
}

impl Section {
    /// Title given to freshly added sections.
    pub const DEFAULT_TITLE: &'static str = "New Section";
    /// Body given to freshly added sections.
    pub const DEFAULT_CONTENT: &'static str = "Add your content here...";

    /// Create a default content section with the given id.
    pub fn new(id: impl Into<SectionId>) -> Self {
        Self {
            id: id.into(),
            section_type: SectionType::Content,
            layout: Layout::Full,
            title: Self::DEFAULT_TITLE.to_string(),
            content: Self::DEFAULT_CONTENT.to_string(),
            background_image: None,
            visible: true,
            styles: StyleSpec::default(),
        }
    }

    /// Set the section type.
    pub fn with_type(mut self, section_type: SectionType) -> Self {
        self.section_type = section_type;
        self
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the background image.
    pub fn with_background(mut self, uri: impl Into<String>) -> Self {
        self.background_image = Some(uri.into());
        self
    }

    /// Set visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the style.
    pub fn with_styles(mut self, styles: StyleSpec) -> Self {
        self.styles = styles;
        self
    }

    /// Content split into hard lines.
    pub fn content_lines(&self) -> Vec<&str> {
        self.content.split('\n').collect()
    }

    /// Copy of this section under a new id with `" (Copy)"` appended to the title.
    pub fn duplicate(&self, id: SectionId) -> Self {
        Self {
            id,
            title: format!("{} (Copy)", self.title),
            ..self.clone()
        }
    }
}

/// Shallow partial update for [`Section`] fields other than id and styles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionPatch {
    pub section_type: Option<SectionType>,
    pub layout: Option<Layout>,
    pub title: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` clears the background image
    pub background_image: Option<Option<String>>,
    pub visible: Option<bool>,
}

impl SectionPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section_type(mut self, section_type: SectionType) -> Self {
        self.section_type = Some(section_type);
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn background_image(mut self, uri: Option<String>) -> Self {
        self.background_image = Some(uri);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Merge the present fields into `section`.
    pub fn apply(&self, section: &mut Section) {
        if let Some(section_type) = self.section_type {
            section.section_type = section_type;
        }
        if let Some(layout) = self.layout {
            section.layout = layout;
        }
        if let Some(ref title) = self.title {
            section.title = title.clone();
        }
        if let Some(ref content) = self.content {
            section.content = content.clone();
        }
        if let Some(ref background) = self.background_image {
            section.background_image = background.clone();
        }
        if let Some(visible) = self.visible {
            section.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_new_defaults() {
        let section = Section::new("42");
        assert_eq!(section.id.as_str(), "42");
        assert_eq!(section.section_type, SectionType::Content);
        assert_eq!(section.layout, Layout::Full);
        assert!(section.visible);
        assert_eq!(section.styles, StyleSpec::default());
        assert!(section.background_image.is_none());
    }

    #[test]
    fn test_content_lines_are_hard_breaks() {
        let section = Section::new("1").with_content("one\n\ntwo");
        assert_eq!(section.content_lines(), vec!["one", "", "two"]);
    }

    #[test]
    fn test_duplicate() {
        let section = Section::new("1").with_title("About").with_visible(false);
        let copy = section.duplicate(SectionId::new("2"));
        assert_eq!(copy.title, "About (Copy)");
        assert_eq!(copy.id.as_str(), "2");
        assert!(!copy.visible);
        assert_eq!(copy.content, section.content);
    }

    #[test]
    fn test_patch_clears_background() {
        let mut section = Section::new("1").with_background("/a.png");
        SectionPatch::new()
            .background_image(None)
            .title("Hi")
            .apply(&mut section);
        assert!(section.background_image.is_none());
        assert_eq!(section.title, "Hi");
    }

    #[test]
    fn test_section_json_shape() {
        let json = r##"{
            "id": "7",
            "type": "projects",
            "title": "Work",
            "content": "x",
            "backgroundImage": null,
            "layout": "split",
            "visible": true,
            "styles": {"backgroundColor": "#000", "textColor": "#fff", "fontSize": 14, "padding": 20, "blur": 1}
        }"##;
        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.section_type, SectionType::Projects);
        assert_eq!(section.layout, Layout::Split);
        assert_eq!(section.styles.blur, 1.0);
    }

    #[test]
    fn test_page_labels() {
        assert_eq!(SectionType::Hero.page_label(), "Cover Page");
        assert_eq!(SectionType::Projects.page_label(), "Project Gallery");
        assert_eq!(SectionType::Contact.page_label(), "Contact Info");
        assert_eq!(SectionType::Services.page_label(), "Content");
    }
}
