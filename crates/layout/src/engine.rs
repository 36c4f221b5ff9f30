use crate::config::{LayoutConfig, mm};
use crate::elements::{ImageElement, LayoutElement, PositionedElement, TextElement};
use crate::fonts::FontFace;
use crate::output::{LETTERHEAD_RESOURCE, LaidOutDocument};
use crate::table::TableContent;
use crate::wrap::{TextLine, layout_paragraphs, wrap_lines};
use crate::LayoutError;
use folio_traits::SharedResourceData;
use folio_types::Rect;
use std::collections::HashMap;

/// Baseline position inside a text line box, as a fraction of font size.
const BASELINE_RATIO: f32 = 0.8;
/// Line advance of wrapped title lines, as a multiple of the title size.
const TITLE_LINE_FACTOR: f32 = 1.15;

/// Everything that ends up on the pages, already merged and formatted.
#[derive(Debug, Clone, Default)]
pub struct DocumentContent {
    pub title: String,
    pub body: String,
    pub table: TableContent,
    pub signature_left: String,
    pub signature_right: String,
    /// Raw image bytes stretched over every page.
    pub letterhead: Option<SharedResourceData>,
}

/// Stages of a layout run, in the only order they are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Letterhead,
    Title,
    Body,
    Table,
    Signatures,
    Finished,
}

impl Stage {
    fn next(self) -> Stage {
        match self {
            Stage::Letterhead => Stage::Title,
            Stage::Title => Stage::Body,
            Stage::Body => Stage::Table,
            Stage::Table => Stage::Signatures,
            Stage::Signatures | Stage::Finished => Stage::Finished,
        }
    }
}

/// Lays out portfolio documents. Holds only configuration, so one engine can
/// serve concurrent layouts.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        validate(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(&self, content: &DocumentContent) -> Result<LaidOutDocument, LayoutError> {
        let mut composer = Composer::new(&self.config, content.letterhead.is_some());
        let mut stage = Stage::Letterhead;

        while stage != Stage::Finished {
            match stage {
                Stage::Letterhead => composer.stamp_letterhead(),
                Stage::Title => composer.place_title(&content.title),
                Stage::Body => composer.place_body(&content.body),
                Stage::Table => composer.place_table(&content.table)?,
                Stage::Signatures => {
                    composer.place_signatures(&content.signature_left, &content.signature_right)
                }
                Stage::Finished => {}
            }
            stage = stage.next();
        }

        let mut resources = HashMap::new();
        if let Some(letterhead) = &content.letterhead {
            resources.insert(LETTERHEAD_RESOURCE.to_string(), letterhead.clone());
        }
        Ok(LaidOutDocument {
            pages: composer.finish(),
            page_width: self.config.page_width(),
            page_height: self.config.page_height(),
            resources,
        })
    }
}

fn validate(config: &LayoutConfig) -> Result<(), LayoutError> {
    let positive = [
        ("printable width", config.printable_width()),
        ("page height", config.page_height()),
        ("title font size", config.title_font_size),
        ("body font size", config.body_font_size),
        ("table font size", config.table_font_size),
        ("signature font size", config.signature_font_size),
        ("table line height", config.table_line_height),
        ("line step", config.line_step_mm),
    ];
    match positive.iter().find(|(_, value)| !(*value > 0.0)) {
        Some((name, value)) => Err(LayoutError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        ))),
        None => Ok(()),
    }
}

/// Mutable state of one layout run: finished pages, the page being filled
/// and the vertical cursor.
pub(crate) struct Composer<'a> {
    pub(crate) config: &'a LayoutConfig,
    pub(crate) y: f32,
    finished: Vec<Vec<PositionedElement>>,
    current: Vec<PositionedElement>,
    letterhead: bool,
}

impl<'a> Composer<'a> {
    fn new(config: &'a LayoutConfig, letterhead: bool) -> Self {
        Self {
            config,
            y: 0.0,
            finished: Vec::new(),
            current: Vec::new(),
            letterhead,
        }
    }

    pub(crate) fn push(&mut self, element: PositionedElement) {
        self.current.push(element);
    }

    pub(crate) fn page_number(&self) -> usize {
        self.finished.len() + 1
    }

    /// Closes the current page and opens a new one with the letterhead.
    pub(crate) fn break_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
        self.stamp_letterhead();
    }

    fn finish(mut self) -> Vec<Vec<PositionedElement>> {
        self.finished.push(self.current);
        self.finished
    }

    fn stamp_letterhead(&mut self) {
        if !self.letterhead {
            return;
        }
        let page = Rect::new(0.0, 0.0, self.config.page_width(), self.config.page_height());
        let image = ImageElement {
            resource: LETTERHEAD_RESOURCE.to_string(),
        };
        self.push(PositionedElement::new(page, LayoutElement::Image(image)));
    }

    fn text_line(&mut self, x: f32, baseline: f32, line: &TextLine, font: FontFace, size: f32) {
        if line.text.is_empty() {
            return;
        }
        let width = line.width + line.word_spacing * line.space_count() as f32;
        let bounds = Rect::new(x, baseline - BASELINE_RATIO * size, width, size);
        let text = TextElement {
            content: line.text.clone(),
            font,
            font_size: size,
            color: self.config.palette.text,
            word_spacing: line.word_spacing,
        };
        self.push(PositionedElement::new(bounds, LayoutElement::Text(text)));
    }

    fn centered_line(&mut self, center: f32, baseline: f32, line: &TextLine, font: FontFace, size: f32) {
        self.text_line(center - line.width / 2.0, baseline, line, font, size);
    }

    /// Leaves the cursor on the last title baseline.
    fn place_title(&mut self, title: &str) {
        let size = self.config.title_font_size;
        let center = self.config.page_width() / 2.0;
        let lines = wrap_lines(title, FontFace::Bold, size, self.config.printable_width());

        let mut baseline = mm(self.config.title_baseline_mm);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                baseline += size * TITLE_LINE_FACTOR;
            }
            self.centered_line(center, baseline, line, FontFace::Bold, size);
        }
        self.y = baseline;
    }

    /// Leaves the cursor at the table top.
    fn place_body(&mut self, body: &str) {
        let size = self.config.body_font_size;
        let step = mm(self.config.line_step_mm);
        let left = self.config.margin();

        let mut baseline = self.y + mm(self.config.body_gap_mm);
        for line in layout_paragraphs(body, FontFace::Regular, size, self.config.printable_width()) {
            self.text_line(left, baseline, &line, FontFace::Regular, size);
            baseline += step;
        }
        self.y = baseline + mm(self.config.table_gap_mm);
    }

    /// Two centred columns below the table, moved to a fresh page when the
    /// block would run past the page bottom.
    fn place_signatures(&mut self, left: &str, right: &str) {
        let size = self.config.signature_font_size;
        let step = mm(self.config.line_step_mm);
        let half = self.config.page_width() / 2.0;
        let column_width = half - self.config.margin();

        let left_lines = wrap_lines(left, FontFace::Bold, size, column_width);
        let right_lines = wrap_lines(right, FontFace::Bold, size, column_width);
        let measured = left_lines.len().max(right_lines.len()) as f32 * step;
        let required = measured.max(mm(self.config.signature_reserve_mm));

        let mut start = self.y + mm(self.config.signature_gap_mm);
        if start + required > self.config.page_height() {
            self.break_page();
            start = mm(self.config.signature_overflow_top_mm);
            log::debug!("Signature block moved to page {}", self.page_number());
        }

        for (lines, center) in [(&left_lines, half / 2.0), (&right_lines, half * 1.5)] {
            let mut baseline = start;
            for line in lines {
                self.centered_line(center, baseline, line, FontFace::Bold, size);
                baseline += step;
            }
        }
        self.y = start + measured;
    }
}
