//! Line breaking and justification.

use crate::fonts::FontFace;

/// One laid-out line of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Natural width in points, before any word spacing is added.
    pub width: f32,
    /// Extra width added to every space, in points. Zero for lines that are
    /// not justified.
    pub word_spacing: f32,
}

impl TextLine {
    fn plain(text: String, face: FontFace, size: f32) -> Self {
        let width = face.text_width(&text, size);
        Self {
            text,
            width,
            word_spacing: 0.0,
        }
    }

    pub fn space_count(&self) -> usize {
        self.text.bytes().filter(|b| *b == b' ').count()
    }
}

/// Greedy word wrap of a single paragraph. Runs of whitespace collapse to
/// one space. A word wider than `max_width` is broken between characters.
/// Blank input yields one empty line.
pub fn wrap_paragraph(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if face.text_width(word, size) > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, face, size, max_width);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate_width = face.text_width(&current, size)
            + face.text_width(" ", size)
            + face.text_width(word, size);
        if candidate_width <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits an over-long word into pieces that fit, at least one character
/// per piece.
fn break_word(word: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;
    for ch in word.chars() {
        let advance = f32::from(face.advance(ch)) * size / 1000.0;
        if !piece.is_empty() && width + advance > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += advance;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Wraps a paragraph and stretches every line but the last to `max_width`.
/// Lines without a space stay left-aligned.
pub fn justify_paragraph(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<TextLine> {
    let wrapped = wrap_paragraph(text, face, size, max_width);
    let last = wrapped.len().saturating_sub(1);

    wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let mut line = TextLine::plain(text, face, size);
            let spaces = line.space_count();
            if i < last && spaces > 0 {
                line.word_spacing = ((max_width - line.width) / spaces as f32).max(0.0);
            }
            line
        })
        .collect()
}

/// Splits on explicit line breaks; each paragraph is justified on its own.
pub fn layout_paragraphs(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<TextLine> {
    text.split('\n')
        .flat_map(|paragraph| {
            justify_paragraph(paragraph.trim_end_matches('\r'), face, size, max_width)
        })
        .collect()
}

/// Splits on explicit line breaks and wraps without justification.
pub fn wrap_lines(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<TextLine> {
    text.split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph.trim_end_matches('\r'), face, size, max_width))
        .map(|line| TextLine::plain(line, face, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIZE: f32 = 10.0;

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(
            wrap_paragraph("Hello  world", FontFace::Regular, SIZE, 500.0),
            vec!["Hello world"]
        );
    }

    #[test]
    fn wraps_greedily_by_words() {
        // Each "aaaa" is 22.24pt, a space 2.78pt: two words fit in 50pt, three don't.
        let lines = wrap_paragraph("aaaa aaaa aaaa aaaa aaaa", FontFace::Regular, SIZE, 50.0);
        assert_eq!(lines, vec!["aaaa aaaa", "aaaa aaaa", "aaaa"]);
    }

    #[test]
    fn long_words_break_between_characters() {
        let lines = wrap_paragraph("x 0123456789", FontFace::Regular, SIZE, 20.0);
        assert_eq!(lines, vec!["x", "012", "345", "678", "9"]);
    }

    #[test]
    fn blank_paragraph_is_one_empty_line() {
        assert_eq!(wrap_paragraph("   ", FontFace::Regular, SIZE, 100.0), vec![""]);
        let lines = layout_paragraphs("First\n\nThird", FontFace::Regular, SIZE, 100.0);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "", "Third"]);
    }

    #[test]
    fn all_but_last_line_are_justified() {
        let lines = justify_paragraph("aaaa aaaa aaaa aaaa aaaa", FontFace::Regular, SIZE, 50.0);
        assert_eq!(lines.len(), 3);
        for line in &lines[..2] {
            let stretched = line.width + line.word_spacing * line.space_count() as f32;
            assert!((stretched - 50.0).abs() < 1e-3);
        }
        assert_eq!(lines[2].word_spacing, 0.0);
    }

    #[test]
    fn single_word_lines_are_not_stretched() {
        let lines = justify_paragraph("aaaaaaaa aaaaaaaa", FontFace::Regular, SIZE, 50.0);
        assert!(lines.iter().all(|l| l.word_spacing == 0.0));
    }

    #[test]
    fn each_paragraph_ends_left_aligned() {
        let lines = layout_paragraphs(
            "aaaa aaaa aaaa\naaaa aaaa aaaa",
            FontFace::Regular,
            SIZE,
            50.0,
        );
        let spacing: Vec<bool> = lines.iter().map(|l| l.word_spacing > 0.0).collect();
        assert_eq!(spacing, vec![true, false, true, false]);
    }
}
