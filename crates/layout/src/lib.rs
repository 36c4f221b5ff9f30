use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("{what} has a height of {height:.2} which exceeds the available page height of {available:.2}.")]
    ElementTooLarge {
        what: String,
        height: f32,
        available: f32,
    },
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
}

pub mod config;
pub mod fonts;
pub mod table;
pub mod wrap;

mod elements;
mod engine;
mod output;

pub use self::config::{LayoutConfig, Palette};
pub use self::elements::{
    ImageElement, LayoutElement, PositionedElement, RectElement, TableSection, TextElement,
};
pub use self::engine::{DocumentContent, LayoutEngine};
pub use self::fonts::FontFace;
pub use self::output::{LETTERHEAD_RESOURCE, LaidOutDocument};
pub use self::table::{BodyRow, CellAlign, FooterCell, TableContent};

// Geometry shared with the renderer.
pub use folio_types::{Color, Rect};

#[cfg(test)]
mod test_utils;
