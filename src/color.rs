//! Hex color parsing and formatting

use image::Rgba;

use crate::error::CanvasError;

/// Opaque black, used when a color string cannot be parsed.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Opaque white, the default background.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
pub fn parse_hex(input: &str) -> Result<Rgba<u8>, CanvasError> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CanvasError::InvalidColor(input.to_string()));
    }

    let byte = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| CanvasError::InvalidColor(input.to_string()))
    };

    match hex.len() {
        3 => {
            // #abc -> #aabbcc
            let mut out = [0u8; 4];
            for (i, c) in hex.chars().enumerate() {
                let v = c
                    .to_digit(16)
                    .ok_or_else(|| CanvasError::InvalidColor(input.to_string()))?
                    as u8;
                out[i] = v * 17;
            }
            out[3] = 255;
            Ok(Rgba(out))
        }
        6 => Ok(Rgba([byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?, 255])),
        8 => Ok(Rgba([
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        ])),
        _ => Err(CanvasError::InvalidColor(input.to_string())),
    }
}

/// Parse a color, falling back to opaque black on malformed input.
pub fn parse_hex_or_black(input: &str) -> Rgba<u8> {
    parse_hex(input).unwrap_or_else(|e| {
        tracing::warn!("{}, falling back to black", e);
        BLACK
    })
}

/// Format the RGB channels as `#rrggbb`.
pub fn to_hex(color: Rgba<u8>) -> String {
    let [r, g, b, _] = color.0;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        assert_eq!(parse_hex("#FF0000").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_hex("00ff7f").unwrap(), Rgba([0, 255, 127, 255]));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!(parse_hex("#fa0").unwrap(), Rgba([255, 170, 0, 255]));
    }

    #[test]
    fn test_parse_with_alpha() {
        assert_eq!(parse_hex("#10203080").unwrap(), Rgba([16, 32, 48, 128]));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#gggggg").is_err());
        assert!(parse_hex("").is_err());
        assert!(parse_hex("#ééé").is_err());
    }

    #[test]
    fn test_fallback_is_black() {
        assert_eq!(parse_hex_or_black("not a color"), BLACK);
    }

    #[test]
    fn test_to_hex_drops_alpha() {
        assert_eq!(to_hex(Rgba([255, 0, 16, 7])), "#ff0010");
    }
}
