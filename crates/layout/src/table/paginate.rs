use super::content::{CellAlign, TableContent};
use crate::config::mm;
use crate::elements::{LayoutElement, PositionedElement, RectElement, TableSection, TextElement};
use crate::engine::Composer;
use crate::fonts::FontFace;
use crate::wrap::{TextLine, wrap_lines};
use crate::LayoutError;
use folio_types::{Color, Rect};

/// Column widths that fill `total_width` exactly.
///
/// Each column's natural width is its widest unwrapped cell plus padding.
/// Natural widths that fit are stretched proportionally; otherwise the
/// widest columns are narrowed first and their cells wrap.
pub fn column_widths(table: &TableContent, font_size: f32, padding: f32, total_width: f32) -> Vec<f32> {
    let columns = table.column_count();
    if columns == 0 {
        return Vec::new();
    }

    let widest = |text: &str, face: FontFace| {
        text.split('\n')
            .map(|line| face.text_width(line, font_size))
            .fold(0.0f32, f32::max)
    };
    let natural: Vec<f32> = (0..columns)
        .map(|col| {
            let head = table.header.get(col).map_or(0.0, |t| widest(t, FontFace::Bold));
            let foot = table.footer.get(col).map_or(0.0, |c| widest(&c.text, FontFace::Bold));
            let body = table
                .body
                .iter()
                .filter_map(|row| row.cells.get(col))
                .map(|t| widest(t, FontFace::Regular))
                .fold(0.0f32, f32::max);
            head.max(foot).max(body) + 2.0 * padding
        })
        .collect();

    let sum: f32 = natural.iter().sum();
    if sum <= 0.0 {
        return vec![total_width / columns as f32; columns];
    }
    if sum <= total_width {
        return natural.iter().map(|w| w * total_width / sum).collect();
    }

    // Too wide: cap the widest columns at a common width so narrow columns
    // keep their natural size.
    let capped_sum = |cap: f32| natural.iter().map(|w| w.min(cap)).sum::<f32>();
    let (mut low, mut high) = (0.0f32, natural.iter().fold(0.0f32, |a, b| a.max(*b)));
    for _ in 0..48 {
        let mid = (low + high) / 2.0;
        if capped_sum(mid) > total_width {
            high = mid;
        } else {
            low = mid;
        }
    }
    let capped: Vec<f32> = natural.iter().map(|w| w.min(low)).collect();
    let capped_total: f32 = capped.iter().sum();
    capped.iter().map(|w| w * total_width / capped_total).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VAlign {
    Top,
    Middle,
}

struct RowStyle {
    face: FontFace,
    text: Color,
    fill: Option<Color>,
    valign: VAlign,
}

/// A row with its cells already wrapped to the column widths.
struct MeasuredRow {
    cells: Vec<Vec<TextLine>>,
    aligns: Vec<CellAlign>,
    height: f32,
}

struct TableGeometry {
    widths: Vec<f32>,
    left: f32,
    font_size: f32,
    line_height: f32,
    padding: f32,
}

impl TableGeometry {
    fn measure(&self, texts: &[&str], aligns: Vec<CellAlign>, face: FontFace) -> MeasuredRow {
        let cells: Vec<Vec<TextLine>> = texts
            .iter()
            .zip(&self.widths)
            .map(|(text, width)| {
                let inner = (width - 2.0 * self.padding).max(1.0);
                wrap_lines(text, face, self.font_size, inner)
            })
            .collect();
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        MeasuredRow {
            cells,
            aligns,
            height: self.row_height(lines),
        }
    }

    fn row_height(&self, lines: usize) -> f32 {
        lines as f32 * self.line_height + 2.0 * self.padding
    }

    /// Cuts a row into pieces of at most `max_lines` wrapped lines so each
    /// piece fits on a page of its own.
    fn split(&self, row: MeasuredRow, max_lines: usize) -> Vec<MeasuredRow> {
        let lines = row.cells.iter().map(Vec::len).max().unwrap_or(0);
        if lines <= max_lines {
            return vec![row];
        }
        (0..lines)
            .step_by(max_lines)
            .map(|start| {
                let cells: Vec<Vec<TextLine>> = row
                    .cells
                    .iter()
                    .map(|cell| cell.iter().skip(start).take(max_lines).cloned().collect())
                    .collect();
                let count = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
                MeasuredRow {
                    cells,
                    aligns: row.aligns.clone(),
                    height: self.row_height(count),
                }
            })
            .collect()
    }
}

impl Composer<'_> {
    /// Places the table from the current cursor, breaking pages between
    /// rows. The header repeats on every page; the footer follows the last
    /// body row.
    pub(crate) fn place_table(&mut self, table: &TableContent) -> Result<(), LayoutError> {
        if table.is_empty() {
            log::warn!("No visible columns, the table is omitted");
            return Ok(());
        }

        let config = self.config;
        let padding = mm(config.cell_padding_mm);
        let font_size = config.table_font_size;
        let width = config.printable_width();
        let geometry = TableGeometry {
            widths: column_widths(table, font_size, padding, width),
            left: config.margin(),
            font_size,
            line_height: font_size * config.table_line_height,
            padding,
        };

        let centered = vec![CellAlign::Center; table.column_count()];
        let header_texts: Vec<&str> = table.header.iter().map(String::as_str).collect();
        let head = geometry.measure(&header_texts, centered.clone(), FontFace::Bold);
        let footer_texts: Vec<&str> = table.footer.iter().map(|c| c.text.as_str()).collect();
        let footer_aligns = table.footer.iter().map(|c| c.align).collect();
        let foot = geometry.measure(&footer_texts, footer_aligns, FontFace::Bold);

        let top = mm(config.table_continuation_top_mm);
        let bottom = config.content_bottom();
        let capacity = bottom - top - head.height;
        let max_lines = ((capacity - 2.0 * padding) / geometry.line_height).floor();

        let mut body: Vec<Vec<MeasuredRow>> = Vec::with_capacity(table.body.len());
        for row in &table.body {
            let texts: Vec<&str> = row.cells.iter().map(String::as_str).collect();
            let measured = geometry.measure(&texts, centered.clone(), FontFace::Regular);
            if measured.height <= capacity {
                body.push(vec![measured]);
                continue;
            }
            if max_lines < 1.0 {
                return Err(LayoutError::ElementTooLarge {
                    what: format!("Table row {}", row.source_index),
                    height: measured.height,
                    available: capacity,
                });
            }
            let pieces = geometry.split(measured, max_lines as usize);
            log::debug!(
                "Table row {} is taller than a page, split into {} pieces",
                row.source_index,
                pieces.len()
            );
            body.push(pieces);
        }
        if foot.height > capacity {
            return Err(LayoutError::ElementTooLarge {
                what: "Table footer".to_string(),
                height: foot.height,
                available: capacity,
            });
        }

        let palette = config.palette;
        let head_style = RowStyle {
            face: FontFace::Bold,
            text: palette.header_text,
            fill: Some(palette.header_fill),
            valign: VAlign::Middle,
        };

        let first = body
            .first()
            .and_then(|pieces| pieces.first())
            .map_or(foot.height, |piece| piece.height);
        if self.y + head.height + first > bottom {
            self.break_page();
            self.y = top;
        }
        self.place_row(&geometry, &head, &head_style, TableSection::Head);

        for (position, (row, pieces)) in table.body.iter().zip(&body).enumerate() {
            let style = if row.highlighted {
                RowStyle {
                    face: FontFace::Regular,
                    text: palette.highlight_text,
                    fill: Some(palette.highlight_fill),
                    valign: VAlign::Top,
                }
            } else {
                RowStyle {
                    face: FontFace::Regular,
                    text: palette.body_text,
                    fill: (position % 2 == 0).then_some(palette.stripe_fill),
                    valign: VAlign::Top,
                }
            };
            let section = TableSection::Body {
                row: row.source_index,
            };
            for piece in pieces {
                if self.y + piece.height > bottom {
                    self.break_page();
                    self.y = top;
                    log::debug!("Table continues on page {}", self.page_number());
                    self.place_row(&geometry, &head, &head_style, TableSection::Head);
                }
                self.place_row(&geometry, piece, &style, section);
            }
        }

        if self.y + foot.height > bottom {
            self.break_page();
            self.y = top;
            self.place_row(&geometry, &head, &head_style, TableSection::Head);
        }
        let foot_style = RowStyle {
            face: FontFace::Bold,
            text: palette.footer_text,
            fill: Some(palette.footer_fill),
            valign: VAlign::Top,
        };
        self.place_row(&geometry, &foot, &foot_style, TableSection::Foot);
        Ok(())
    }

    fn place_row(
        &mut self,
        geometry: &TableGeometry,
        row: &MeasuredRow,
        style: &RowStyle,
        section: TableSection,
    ) {
        let mut x = geometry.left;
        let y = self.y;

        for (col, width) in geometry.widths.iter().enumerate() {
            let cell = Rect::new(x, y, *width, row.height);
            if let Some(fill) = style.fill {
                self.push(
                    PositionedElement::new(cell, LayoutElement::Rect(RectElement { fill }))
                        .in_section(section),
                );
            }

            let lines = row.cells.get(col).map(Vec::as_slice).unwrap_or_default();
            let align = row.aligns.get(col).copied().unwrap_or_default();
            let block_height = lines.len() as f32 * geometry.line_height;
            let mut line_top = match style.valign {
                VAlign::Top => y + geometry.padding,
                VAlign::Middle => y + (row.height - block_height) / 2.0,
            };

            for line in lines {
                if !line.text.is_empty() {
                    let text_x = match align {
                        CellAlign::Left => x + geometry.padding,
                        CellAlign::Center => x + (width - line.width) / 2.0,
                        CellAlign::Right => x + width - geometry.padding - line.width,
                    };
                    let glyph_top = line_top + (geometry.line_height - geometry.font_size) / 2.0;
                    let bounds = Rect::new(text_x, glyph_top, line.width, geometry.font_size);
                    let text = TextElement {
                        content: line.text.clone(),
                        font: style.face,
                        font_size: geometry.font_size,
                        color: style.text,
                        word_spacing: 0.0,
                    };
                    self.push(
                        PositionedElement::new(bounds, LayoutElement::Text(text)).in_section(section),
                    );
                }
                line_top += geometry.line_height;
            }
            x += width;
        }
        self.y += row.height;
    }
}
