//! Static catalog of layout templates.

use super::{Layout, SectionType, StyleSpec};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Template family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Corporate,
    Modern,
    Creative,
    Minimal,
}

/// One section slot of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub layout: Layout,
    pub styles: StyleSpec,
}

impl TemplateSection {
    pub fn new(section_type: SectionType, layout: Layout, styles: StyleSpec) -> Self {
        Self {
            section_type,
            layout,
            styles,
        }
    }
}

/// A named, ordered list of section slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub sections: Vec<TemplateSection>,
}

impl Template {
    /// Create a template without sections.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: TemplateCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category,
            sections: Vec::new(),
        }
    }

    /// Append a section slot.
    pub fn with_section(mut self, section_type: SectionType, layout: Layout, styles: StyleSpec) -> Self {
        self.sections
            .push(TemplateSection::new(section_type, layout, styles));
        self
    }
}

/// All built-in templates.
pub fn catalog() -> Vec<Template> {
    use Layout::*;
    use SectionType::*;

    vec![
        Template::new(
            "corporate-classic",
            "Corporate Classic",
            "Traditional professional layout with clean sections",
            TemplateCategory::Corporate,
        )
        .with_section(Hero, Full, StyleSpec::new("#ffffff", "#1f2937", 18.0, 48.0, 0.0))
        .with_section(Services, Split, StyleSpec::new("#f8fafc", "#374151", 16.0, 32.0, 0.0))
        .with_section(Contact, Full, StyleSpec::new("#059669", "#ffffff", 16.0, 40.0, 0.0)),
        Template::new(
            "modern-gradient",
            "Modern Gradient",
            "Contemporary design with gradient backgrounds",
            TemplateCategory::Modern,
        )
        .with_section(
            Hero,
            Centered,
            StyleSpec::new(
                "linear-gradient(135deg, #059669 0%, #10b981 100%)",
                "#ffffff",
                20.0,
                60.0,
                0.0,
            ),
        )
        .with_section(Content, Diagonal, StyleSpec::new("#ffffff", "#1f2937", 16.0, 36.0, 0.0)),
        Template::new(
            "creative-angles",
            "Creative Angles",
            "Dynamic layout with angled sections and overlays",
            TemplateCategory::Creative,
        )
        .with_section(Hero, Diagonal, StyleSpec::new("#1f2937", "#ffffff", 18.0, 40.0, 0.0))
        .with_section(Services, Diagonal, StyleSpec::new("#f59e0b", "#1f2937", 16.0, 32.0, 0.0)),
        Template::new(
            "minimal-clean",
            "Minimal Clean",
            "Simple, clean design with lots of white space",
            TemplateCategory::Minimal,
        )
        .with_section(Hero, Centered, StyleSpec::new("#ffffff", "#374151", 16.0, 80.0, 0.0))
        .with_section(Content, Full, StyleSpec::new("#fafafa", "#4b5563", 14.0, 60.0, 0.0)),
    ]
}

/// Look up a built-in template by id.
pub fn find_template(id: &str) -> Result<Template> {
    catalog()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| Error::UnknownTemplate(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let templates = catalog();
        assert_eq!(templates.len(), 4);
        assert!(templates.iter().all(|t| !t.sections.is_empty()));
        assert_eq!(templates[0].sections.len(), 3);
    }

    #[test]
    fn test_find_template() {
        let template = find_template("creative-angles").unwrap();
        assert_eq!(template.category, TemplateCategory::Creative);
        assert!(template
            .sections
            .iter()
            .all(|s| s.layout == Layout::Diagonal));

        assert!(matches!(
            find_template("nope"),
            Err(Error::UnknownTemplate(id)) if id == "nope"
        ));
    }
}
