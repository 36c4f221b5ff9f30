use lopdf::Document as LopdfDocument;
use lopdf::content::{Content, Operation};

pub fn page_operations(doc: &LopdfDocument, page: u32) -> Vec<Operation> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page) else {
        return Vec::new();
    };
    doc.get_page_content(*page_id)
        .ok()
        .and_then(|bytes| Content::decode(&bytes).ok())
        .map(|content| content.operations)
        .unwrap_or_default()
}

/// Decodes `Tj` operands. The fixtures only use ASCII and Latin-1 text, so
/// WinAnsi bytes map straight to chars.
pub fn shown_text(doc: &LopdfDocument, page: u32) -> Vec<String> {
    page_operations(doc, page)
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first()?.as_str().ok())
        .map(|bytes| bytes.iter().map(|&b| b as char).collect())
        .collect()
}

/// Every `rg` fill color set on a page, as 0..=1 components.
pub fn fill_colors(doc: &LopdfDocument, page: u32) -> Vec<[f32; 3]> {
    page_operations(doc, page)
        .iter()
        .filter(|op| op.operator == "rg" && op.operands.len() == 3)
        .filter_map(|op| {
            let mut components = op.operands.iter().map(|o| o.as_float().ok());
            Some([components.next()??, components.next()??, components.next()??])
        })
        .collect()
}

pub fn has_color(colors: &[[f32; 3]], rgb: (u8, u8, u8)) -> bool {
    let expected = [rgb.0, rgb.1, rgb.2].map(|c| c as f32 / 255.0);
    colors
        .iter()
        .any(|c| c.iter().zip(expected).all(|(a, b)| (a - b).abs() < 1e-3))
}

/// Names of the operators drawn on a page, in order.
pub fn operators(doc: &LopdfDocument, page: u32) -> Vec<String> {
    page_operations(doc, page)
        .into_iter()
        .map(|op| op.operator)
        .collect()
}

/// Number of image XObjects in the whole file.
pub fn image_xobject_count(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .is_ok_and(|name| name == b"Image")
        })
        .count()
}

pub fn info_title(doc: &LopdfDocument) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let title = doc.get_object(info).ok()?.as_dict().ok()?.get(b"Title").ok()?;
    let bytes = title.as_str().ok()?;
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks(2)
                .map(|pair| u16::from_be_bytes([pair[0], *pair.get(1).unwrap_or(&0)]))
                .collect();
            Some(String::from_utf16_lossy(&units))
        }
        None => Some(String::from_utf8_lossy(bytes).into_owned()),
    }
}
