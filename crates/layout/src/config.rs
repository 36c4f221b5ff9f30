use folio_types::Color;
use serde::{Deserialize, Serialize};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

pub fn mm(value: f32) -> f32 {
    value * PT_PER_MM
}

/// Page geometry and typography. Lengths are millimetres, font sizes points.
///
/// The defaults reproduce the established document look: US Letter, 15 mm
/// margins, a 16 pt bold title on a 40 mm baseline, 11 pt justified body
/// text on a 5 mm line step, an 8 pt striped table and bold 11 pt signature
/// blocks 30 mm below the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Left, right and bottom margin. Also the table's top margin on
    /// continuation pages unless `table_continuation_top_mm` says otherwise.
    pub margin_mm: f32,

    pub title_baseline_mm: f32,
    pub title_font_size: f32,

    /// Distance from the title baseline to the first body baseline.
    pub body_gap_mm: f32,
    pub body_font_size: f32,
    /// Baseline advance for body and signature lines.
    pub line_step_mm: f32,
    /// Space between the last body line and the table top.
    pub table_gap_mm: f32,

    pub table_font_size: f32,
    pub cell_padding_mm: f32,
    /// Table line height as a multiple of the table font size.
    pub table_line_height: f32,
    pub table_continuation_top_mm: f32,

    /// Distance from the table bottom to the first signature baseline.
    pub signature_gap_mm: f32,
    /// Minimum height the signature block claims when checking for overflow.
    pub signature_reserve_mm: f32,
    /// First signature baseline on a page added for signature overflow.
    pub signature_overflow_top_mm: f32,
    pub signature_font_size: f32,

    pub palette: Palette,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width_mm: 215.9,
            page_height_mm: 279.4,
            margin_mm: 15.0,
            title_baseline_mm: 40.0,
            title_font_size: 16.0,
            body_gap_mm: 10.0,
            body_font_size: 11.0,
            line_step_mm: 5.0,
            table_gap_mm: 2.0,
            table_font_size: 8.0,
            cell_padding_mm: 2.0,
            table_line_height: 1.15,
            table_continuation_top_mm: 15.0,
            signature_gap_mm: 30.0,
            signature_reserve_mm: 30.0,
            signature_overflow_top_mm: 60.0,
            signature_font_size: 11.0,
            palette: Palette::default(),
        }
    }
}

impl LayoutConfig {
    pub fn page_width(&self) -> f32 {
        mm(self.page_width_mm)
    }

    pub fn page_height(&self) -> f32 {
        mm(self.page_height_mm)
    }

    pub fn margin(&self) -> f32 {
        mm(self.margin_mm)
    }

    pub fn printable_width(&self) -> f32 {
        self.page_width() - 2.0 * self.margin()
    }

    /// Lowest y a table row may reach.
    pub fn content_bottom(&self) -> f32 {
        self.page_height() - self.margin()
    }
}

/// Fill and text colours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub text: Color,
    pub header_fill: Color,
    pub header_text: Color,
    pub body_text: Color,
    /// Fill of every other body row, starting with the first.
    pub stripe_fill: Color,
    pub footer_fill: Color,
    pub footer_text: Color,
    pub highlight_fill: Color,
    pub highlight_text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Color::BLACK,
            header_fill: Color::rgb(41, 75, 160),
            header_text: Color::WHITE,
            body_text: Color::gray(20),
            stripe_fill: Color::gray(245),
            footer_fill: Color::gray(240),
            footer_text: Color::BLACK,
            highlight_fill: Color::rgb(255, 240, 100),
            highlight_text: Color::BLACK,
        }
    }
}
