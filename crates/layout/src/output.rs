use crate::{LayoutElement, PositionedElement, TableSection};
use folio_traits::SharedResourceData;
use std::collections::HashMap;

/// Resource key under which the letterhead bytes are stored.
pub const LETTERHEAD_RESOURCE: &str = "letterhead";

/// A fully paginated document, ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct LaidOutDocument {
    /// Elements of each page in paint order.
    pub pages: Vec<Vec<PositionedElement>>,
    pub page_width: f32,
    pub page_height: f32,
    /// Image data referenced by image elements.
    pub resources: HashMap<String, SharedResourceData>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Text lines of one page in paint order.
    pub fn page_texts(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .into_iter()
            .flatten()
            .filter_map(|el| el.as_text().map(|t| t.content.as_str()))
            .collect()
    }

    /// Page index of the first text line equal to `content`.
    pub fn find_text(&self, content: &str) -> Option<(usize, &PositionedElement)> {
        self.pages.iter().enumerate().find_map(|(index, page)| {
            page.iter()
                .find(|el| el.as_text().is_some_and(|t| t.content == content))
                .map(|el| (index, el))
        })
    }

    /// Every element tagged with `section`, across all pages.
    pub fn section_elements(&self, section: TableSection) -> Vec<&PositionedElement> {
        self.pages
            .iter()
            .flatten()
            .filter(|el| el.section == Some(section))
            .collect()
    }

    pub fn image_count(&self) -> usize {
        self.pages
            .iter()
            .flatten()
            .filter(|el| matches!(el.element, LayoutElement::Image(_)))
            .count()
    }
}
