//! Text measurement with the standard Helvetica metrics.
//!
//! Documents use the two base-14 faces below, so no font file is embedded
//! and widths come straight from the Adobe AFM tables (units of 1/1000 em).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
}

impl FontFace {
    /// PostScript name of the base-14 font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }

    /// Advance width of `ch` in 1/1000 em.
    pub fn advance(self, ch: char) -> u16 {
        let table = match self {
            FontFace::Regular => &HELVETICA,
            FontFace::Bold => &HELVETICA_BOLD,
        };
        let code = ch as u32;
        if (32..127).contains(&code) {
            return table[(code - 32) as usize];
        }
        match ch {
            '\u{2013}' | '\u{20AC}' => 556,
            '\u{2014}' | '\u{2026}' => 1000,
            '\u{2022}' => 350,
            '\u{2018}' | '\u{2019}' => match self {
                FontFace::Regular => 222,
                FontFace::Bold => 278,
            },
            '\u{201C}' | '\u{201D}' => match self {
                FontFace::Regular => 333,
                FontFace::Bold => 500,
            },
            '\u{00A0}' => table[0],
            'í' | 'ì' | 'î' | 'ï' => 278,
            _ => match base_letter(ch) {
                Some(base) => self.advance(base),
                None => 556,
            },
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.advance(ch))).sum();
        units as f32 * size / 1000.0
    }
}

/// Accented Latin-1 letters measure like their unaccented base letter.
fn base_letter(ch: char) -> Option<char> {
    Some(match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    })
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];
