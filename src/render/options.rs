//! Rendering options and configuration.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Preview page width in px.
pub const PAGE_WIDTH: u32 = 672;
/// Fullscreen preview page width in px.
pub const FULLSCREEN_PAGE_WIDTH: u32 = 896;

/// Largest page a range inside a page list may expand to.
pub const MAX_LISTED_PAGE: u32 = 10_000;

/// Options for projecting a document.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Render an isolated page: page-height blocks, no footer
    pub single_page: bool,

    /// Use the wide preview page
    pub fullscreen: bool,

    /// Emit a complete HTML page instead of a fragment
    pub standalone_html: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable single-page mode.
    pub fn with_single_page(mut self, single_page: bool) -> Self {
        self.single_page = single_page;
        self
    }

    /// Enable or disable the wide page.
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Wrap HTML output in a full page.
    pub fn with_standalone_html(mut self, standalone: bool) -> Self {
        self.standalone_html = standalone;
        self
    }

    /// Page width in px.
    pub fn page_width(&self) -> u32 {
        if self.fullscreen {
            FULLSCREEN_PAGE_WIDTH
        } else {
            PAGE_WIDTH
        }
    }
}

/// Page selection over visible sections (1-indexed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Check whether this selection restricts the page set.
    pub fn is_restricted(&self) -> bool {
        !matches!(self, PageSelection::All)
    }

    /// Resolve to concrete page numbers for a document of `total` pages.
    ///
    /// Every explicitly named page must exist.
    pub fn resolve(&self, total: u32) -> Result<Vec<u32>> {
        let pages: Vec<u32> = match self {
            PageSelection::All => (1..=total).collect(),
            PageSelection::Range(range) if range.is_empty() => Vec::new(),
            PageSelection::Range(range) => {
                let (start, end) = (*range.start(), *range.end());
                if start == 0 {
                    return Err(Error::PageOutOfRange(0, total));
                }
                if end > total {
                    return Err(Error::PageOutOfRange(start.max(total.saturating_add(1)), total));
                }
                range.clone().collect()
            }
            PageSelection::Pages(pages) => pages.clone(),
        };

        if let Some(&bad) = pages.iter().find(|&&p| p == 0 || p > total) {
            return Err(Error::PageOutOfRange(bad, total));
        }
        if pages.is_empty() && total > 0 {
            return Err(Error::InvalidPageRange("selection is empty".to_string()));
        }
        Ok(pages)
    }

    /// Parse a page selection string (e.g., "2", "1-3", "1,3,5-7").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let number = |part: &str| -> Result<u32> {
            part.trim()
                .parse()
                .map_err(|_| Error::InvalidPageRange(format!("invalid page number '{}'", part)))
        };

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let (start, end) = (number(start)?, number(end)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        // Comma-separated list with possible ranges
        let mut pages = BTreeSet::new();
        for part in s.split(',') {
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = (number(start)?, number(end)?);
                if start > end {
                    return Err(Error::InvalidPageRange(part.to_string()));
                }
                if end > MAX_LISTED_PAGE {
                    return Err(Error::InvalidPageRange(format!(
                        "page {} exceeds {}",
                        end, MAX_LISTED_PAGE
                    )));
                }
                pages.extend(start..=end);
            } else {
                pages.insert(number(part)?);
            }
        }

        Ok(PageSelection::Pages(pages.into_iter().collect()))
    }
}
