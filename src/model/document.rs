//! Document-level types.

use super::{Layout, Section, SectionId, SectionType, StyleSpec};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A brochure: document header plus an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Company name / brochure title
    pub title: String,

    /// Tagline
    pub subtitle: String,

    /// Logo URI
    #[serde(default)]
    pub logo: Option<String>,

    /// Sections in page order
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new document without sections.
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            logo: None,
            sections: Vec::new(),
        }
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the logo.
    pub fn with_logo(mut self, uri: impl Into<String>) -> Self {
        self.logo = Some(uri.into());
        self
    }

    /// Append a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Number of sections, visible or not.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get a section by id.
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Position of a section in document order.
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    /// Check whether a section with this id exists.
    pub fn contains(&self, id: &SectionId) -> bool {
        self.position(id).is_some()
    }

    /// Visible sections in document order.
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.visible)
    }

    /// Number of visible sections (the page count of the brochure).
    pub fn visible_count(&self) -> usize {
        self.visible_sections().count()
    }

    /// Position of a section counted only among visible sections.
    ///
    /// Returns `None` for hidden or unknown sections.
    pub fn visible_index(&self, id: &SectionId) -> Option<usize> {
        self.visible_sections().position(|s| &s.id == id)
    }

    /// Get the n-th visible section (1-indexed page number).
    pub fn visible_page(&self, page: u32) -> Option<&Section> {
        if page == 0 {
            return None;
        }
        self.visible_sections().nth((page - 1) as usize)
    }

    /// Check the id uniqueness invariant.
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::new();
        self.sections.iter().all(|s| seen.insert(&s.id))
    }

    /// The six-section company brochure the editor starts with.
    pub fn sample() -> Self {
        let section = |id: &str,
                       section_type: SectionType,
                       layout: Layout,
                       title: &str,
                       content: &str,
                       image: &str| {
            Section::new(id)
                .with_type(section_type)
                .with_layout(layout)
                .with_title(title)
                .with_content(content)
                .with_background(image)
        };

        Document::new("Anchorage Business Corp Pvt. Ltd.", "Empowering Your Business")
            .with_logo("/abc-logo.jpg")
            .with_section(
                section(
                    "1",
                    SectionType::Hero,
                    Layout::Full,
                    "Anchorage Business Corp Pvt. Ltd.",
                    "Your One-Stop Solution for All Your Needs\n\nYour partner in unlocking business potential through expert solutions and unparalleled services.\n\nwww.AnchorageBC.com | 90250 95059",
                    "/corporate-office-building.png",
                )
                .with_styles(StyleSpec::new("#1e40af", "#ffffff", 18.0, 48.0, 0.0)),
            )
            .with_section(
                section(
                    "2",
                    SectionType::Content,
                    Layout::Split,
                    "About Us & Why Choose Us",
                    "About Us\nAnchorage Business Corp Private Limited (ABC) is a diversified service provider dedicated to delivering excellence across a spectrum of industries.\n\nWhy Partner with ABC?\n• Expertise\n• Customized Solutions\n• Innovation & Technology\n• Sustainability Focus\n• Customer-Centric Approach",
                    "/business-team-meeting.png",
                )
                .with_styles(StyleSpec::new("#f8fafc", "#1f2937", 16.0, 40.0, 2.0)),
            )
            .with_section(
                section(
                    "3",
                    SectionType::Content,
                    Layout::Diagonal,
                    "Our Comprehensive Services",
                    "IT Solutions:\n• IT Infrastructure & Surveillance Solutions\n• Web and Mobile App Development\n\nConstruction & Fabrication:\n• Civil Engineering & Contracting\n• Fabrication & Interior Services\n\nBusiness Support & Logistics:\n• HR Solutions\n• Accounts and Auditing\n• Import & Export",
                    "/modern-technology-abstract.png",
                )
                .with_styles(StyleSpec::new("#0f172a", "#f1f5f9", 15.0, 36.0, 1.0)),
            )
            .with_section(
                section(
                    "4",
                    SectionType::Projects,
                    Layout::Split,
                    "Our Projects - Excellence in Action",
                    "Discover our portfolio of successful projects across construction, interior design, and commercial installations.\n\nEach project reflects our commitment to quality, innovation, and client satisfaction.",
                    "/project-willow-square.jpg",
                )
                .with_styles(StyleSpec::new("#0c4a6e", "#e0f2fe", 16.0, 40.0, 1.0)),
            )
            .with_section(
                section(
                    "5",
                    SectionType::Content,
                    Layout::Centered,
                    "Our Vision, Mission & Leadership",
                    "Vision:\nTo be the premier consortium that empowers businesses globally.\n\nMission:\nTo empower businesses with high-quality, expert services across IT, construction, logistics, and supply chains.",
                    "/professional-handshake-business.jpg",
                )
                .with_styles(StyleSpec::new("#065f46", "#ecfdf5", 16.0, 42.0, 1.0)),
            )
            .with_section(
                section(
                    "6",
                    SectionType::Contact,
                    Layout::Split,
                    "Get in Touch with Us",
                    "Let's build a stronger future for your business together.\nContact us for a consultation today.",
                    "/corporate-team-collaboration.jpg",
                )
                .with_styles(StyleSpec::new("#7c2d12", "#fef7ed", 16.0, 40.0, 2.0)),
            )
    }
}

/// Partial update for the document header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// `Some(None)` removes the logo
    pub logo: Option<Option<String>>,
}

impl DocumentPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn logo(mut self, logo: Option<String>) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Merge the present fields into `document`.
    pub fn apply(&self, document: &mut Document) {
        if let Some(ref title) = self.title {
            document.title = title.clone();
        }
        if let Some(ref subtitle) = self.subtitle {
            document.subtitle = subtitle.clone();
        }
        if let Some(ref logo) = self.logo {
            document.logo = logo.clone();
        }
    }
}
