use crate::RenderError;
use crate::helpers::deflate;
use image::codecs::jpeg::JpegDecoder;
use image::{ColorType, ImageDecoder, ImageFormat};
use lopdf::{Stream, dictionary};
use std::io::Cursor;

/// Builds an image XObject from encoded image bytes.
///
/// JPEG data is embedded untouched behind `DCTDecode`. Every other format
/// is decoded, flattened onto white and stored as Flate-compressed RGB.
pub(crate) fn image_xobject(resource: &str, bytes: &[u8]) -> Result<Stream, RenderError> {
    let fail = |message: String| RenderError::Image {
        resource: resource.to_string(),
        message,
    };

    let format = image::guess_format(bytes).map_err(|e| fail(e.to_string()))?;
    if format == ImageFormat::Jpeg {
        let decoder = JpegDecoder::new(Cursor::new(bytes)).map_err(|e| fail(e.to_string()))?;
        let (width, height) = decoder.dimensions();
        let color_space = match decoder.color_type() {
            ColorType::L8 | ColorType::L16 => "DeviceGray",
            _ => "DeviceRGB",
        };
        log::debug!("Embedding {width}x{height} JPEG '{resource}' as {color_space}");
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        };
        return Ok(Stream::new(dict, bytes.to_vec()));
    }

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| fail(e.to_string()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in decoded.pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.extend([r, g, b].map(|c| over_white(c, a)));
    }
    log::debug!("Embedding {width}x{height} {format:?} '{resource}' as Flate RGB");

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, deflate(&rgb)?))
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (u32::from(channel), u32::from(alpha));
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}
