use crate::RenderError;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use folio_layout::FontFace;
use std::io::Write;

/// Name of the page resource entry for `face`.
pub fn font_resource_name(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "F1",
        FontFace::Bold => "F2",
    }
}

/// Encodes text for the WinAnsiEncoding base fonts. Characters outside the
/// encoding become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{0080}'..='\u{009F}' => b'?',
            c if (c as u32) <= 0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Encodes a PDF text string such as a document-information entry. ASCII
/// stays as is; anything else is written as UTF-16BE behind a byte-order
/// mark so viewers show it unchanged.
pub fn to_text_string(s: &str) -> Vec<u8> {
    if s.is_ascii() {
        return s.as_bytes().to_vec();
    }
    let mut out = vec![0xFE, 0xFF];
    out.extend(s.encode_utf16().flat_map(u16::to_be_bytes));
    out
}

pub(crate) fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    #[test]
    fn latin1_passes_through() {
        assert_eq!(to_win_ansi("Café $1,200.00"), b"Caf\xE9 $1,200.00".to_vec());
    }

    #[test]
    fn punctuation_uses_win_ansi_slots() {
        assert_eq!(to_win_ansi("\u{2013}\u{2014}\u{2019}\u{20AC}"), vec![0x96, 0x97, 0x92, 0x80]);
        assert_eq!(to_win_ansi("\u{4E2D}\u{0085}"), b"??".to_vec());
    }

    #[test]
    fn text_strings_switch_to_utf16_outside_ascii() {
        assert_eq!(to_text_string("Amendment 7"), b"Amendment 7".to_vec());
        assert_eq!(
            to_text_string("A\u{2013}\u{00E9}"),
            vec![0xFE, 0xFF, 0x00, b'A', 0x20, 0x13, 0x00, 0xE9]
        );
    }

    #[test]
    fn deflate_round_trips() {
        let packed = deflate(b"BT /F1 12 Tf ET").unwrap();
        let mut out = Vec::new();
        ZlibDecoder::new(packed.as_slice()).read_to_end(&mut out).unwrap();
        assert_eq!(out, b"BT /F1 12 Tf ET");
    }
}
