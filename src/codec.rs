//! PNG data URI encoding and decoding for save/load

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{ImageFormat, RgbaImage};

use crate::error::CanvasError;
use crate::surface::RasterSurface;

/// Prefix of every URI produced by [`encode_data_uri`]
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode the surface as a `data:image/png;base64,` URI
pub fn encode_data_uri(surface: &RasterSurface) -> Result<String, CanvasError> {
    let mut buf = Cursor::new(Vec::new());
    surface.image().write_to(&mut buf, ImageFormat::Png)?;
    Ok(format!("{}{}", PNG_DATA_URI_PREFIX, BASE64.encode(buf.into_inner())))
}

/// Decode a base64 image data URI (or bare base64) into RGBA pixels.
///
/// The image format is sniffed from the payload, so JPEG templates load too.
pub fn decode_data_uri(data: &str) -> Result<RgbaImage, CanvasError> {
    let data = data.trim();
    let base64_data = if let Some(stripped) = data.strip_prefix(PNG_DATA_URI_PREFIX) {
        stripped
    } else if let Some(rest) = data.strip_prefix("data:") {
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CanvasError::InvalidDataUri("missing ',' separator".to_string()))?;
        if !header.ends_with(";base64") {
            return Err(CanvasError::InvalidDataUri(format!(
                "unsupported encoding '{}'",
                header
            )));
        }
        payload
    } else {
        data
    };

    let bytes = BASE64.decode(base64_data)?;
    let img = image::load_from_memory(&bytes)?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_encode_has_png_prefix() {
        let surface = RasterSurface::filled(3, 2, Rgba([1, 2, 3, 255]));
        let uri = encode_data_uri(&surface).unwrap();
        assert!(uri.starts_with(PNG_DATA_URI_PREFIX));
        assert!(uri.len() > PNG_DATA_URI_PREFIX.len());
    }

    #[test]
    fn test_decode_restores_pixels() {
        let mut surface = RasterSurface::new(5, 4);
        surface.put_pixel(4, 3, Rgba([200, 100, 50, 128]));
        let uri = encode_data_uri(&surface).unwrap();

        let img = decode_data_uri(&uri).unwrap();
        assert_eq!(img.dimensions(), (5, 4));
        assert_eq!(*img.get_pixel(4, 3), Rgba([200, 100, 50, 128]));
    }

    #[test]
    fn test_decode_bare_base64_and_other_mime() {
        let surface = RasterSurface::filled(2, 2, Rgba([9, 9, 9, 255]));
        let uri = encode_data_uri(&surface).unwrap();
        let payload = uri.strip_prefix(PNG_DATA_URI_PREFIX).unwrap();

        assert!(decode_data_uri(payload).is_ok());
        // Mislabelled MIME types still decode by sniffing the payload
        assert!(decode_data_uri(&format!("data:image/webp;base64,{}", payload)).is_ok());
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(matches!(
            decode_data_uri("data:image/png,rawbytes"),
            Err(CanvasError::InvalidDataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64"),
            Err(CanvasError::InvalidDataUri(_))
        ));
        assert!(matches!(decode_data_uri("!!!not base64!!!"), Err(CanvasError::Base64(_))));
        // Valid base64, not an image
        assert!(matches!(decode_data_uri("aGVsbG8="), Err(CanvasError::Image(_))));
    }
}
