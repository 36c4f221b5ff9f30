use crate::fonts::FontFace;
use folio_types::{Color, Rect};

/// Which part of the portfolio table an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableSection {
    Head,
    /// `row` is the index of the source row in the loaded data.
    Body { row: usize },
    Foot,
}

/// An element placed on a page. `x`/`y` is the top-left corner in points,
/// with `y` growing down from the page top.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
    pub section: Option<TableSection>,
}

impl PositionedElement {
    pub fn new(bounds: Rect, element: LayoutElement) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            element,
            section: None,
        }
    }

    pub fn in_section(mut self, section: TableSection) -> Self {
        self.section = Some(section);
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.element {
            LayoutElement::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn fill(&self) -> Option<Color> {
        match &self.element {
            LayoutElement::Rect(rect) => Some(rect.fill),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rect(RectElement),
    Image(ImageElement),
}

/// A single line of text. The baseline sits at `y + 0.8 * font_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub font: FontFace,
    pub font_size: f32,
    pub color: Color,
    /// Extra advance after each space, in points.
    pub word_spacing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectElement {
    pub fill: Color,
}

/// A raster image stretched over the element bounds. `resource` names an
/// entry of [`crate::LaidOutDocument::resources`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub resource: String,
}
