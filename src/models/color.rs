//! Color codec for style values.
//!
//! Style slots store either a plain `#RRGGBB` hex string or an
//! `rgba(r, g, b, a)` string. The panel controls only understand hex plus a
//! separate opacity, so this module converts between the two encodings.
//!
//! Neither direction can fail: `decode` degrades to black for display and
//! `encode` degrades to [`FALLBACK_HEX`] for persistence.

/// Substituted by [`encode`] when the given hex is not a valid `#RRGGBB`.
pub const FALLBACK_HEX: &str = "#3c3c3c";

/// Substituted by [`encode`] when the opacity is non-numeric or out of range.
pub const FALLBACK_OPACITY: &str = "0.7";

/// Returned by [`decode`] for input it cannot make sense of.
pub const DECODE_FALLBACK_HEX: &str = "#000000";

/// Result of decoding a stored color.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub hex: String,
    /// `None` when the input was a bare hex string and carried no alpha.
    pub opacity: Option<f64>,
}

impl Decoded {
    fn fallback() -> Self {
        Self {
            hex: DECODE_FALLBACK_HEX.to_string(),
            opacity: Some(1.0),
        }
    }
}

/// Strict check for `#RRGGBB` (case-insensitive).
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Lenient check for user-typed hex: surrounding whitespace and a missing
/// `#` are accepted. Returns the canonical uppercase `#RRGGBB` form.
pub fn normalize_hex_input(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(format!("#{}", digits.to_ascii_uppercase()))
    } else {
        None
    }
}

/// Parse a strict `#RRGGBB` string into its channels.
pub fn hex_to_rgb(hex: &str) -> Option<[u8; 3]> {
    if !is_hex_color(hex) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(1)?, channel(3)?, channel(5)?])
}

/// Format channels as uppercase `#RRGGBB`.
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

/// Decode a stored color into hex + opacity.
///
/// Accepts `rgba(r,g,b,a)`, `rgb(r,g,b)` or a bare `#RRGGBB`. A bare hex is
/// returned untouched with no opacity so the caller can pick its own default.
pub fn decode(encoded: &str) -> Decoded {
    let value = encoded.trim();
    if is_hex_color(value) {
        return Decoded {
            hex: value.to_string(),
            opacity: None,
        };
    }

    match parse_rgb_function(value) {
        Some((rgb, opacity)) => Decoded {
            hex: rgb_to_hex(rgb),
            opacity: Some(opacity),
        },
        None => {
            log::debug!("COLOR: cannot decode {:?}, using black", encoded);
            Decoded::fallback()
        }
    }
}

/// Encode hex + opacity text as `rgba(R, G, B, opacity)`.
///
/// The opacity text is emitted as given (trimmed) when it parses to a number
/// in `[0, 1]`, so `"0.90"` stays `"0.90"`.
pub fn encode(hex: &str, opacity: &str) -> String {
    let rgb = match hex_to_rgb(hex) {
        Some(rgb) => rgb,
        None => {
            log::warn!(
                "COLOR: invalid hex color {:?}, falling back to {}",
                hex,
                FALLBACK_HEX
            );
            hex_to_rgb(FALLBACK_HEX).unwrap_or([60, 60, 60])
        }
    };

    let opacity = match parse_opacity(opacity) {
        Some(_) => opacity.trim(),
        None => {
            log::debug!(
                "COLOR: opacity {:?} rejected, using {}",
                opacity,
                FALLBACK_OPACITY
            );
            FALLBACK_OPACITY
        }
    };

    format!("rgba({}, {}, {}, {})", rgb[0], rgb[1], rgb[2], opacity)
}

/// [`encode`] for callers holding a numeric opacity.
pub fn encode_opacity(hex: &str, opacity: f64) -> String {
    encode(hex, &opacity.to_string())
}

/// Parse an opacity, rejecting non-numbers and values outside `[0, 1]`.
pub fn parse_opacity(value: &str) -> Option<f64> {
    let parsed: f64 = value.trim().parse().ok()?;
    if parsed.is_finite() && (0.0..=1.0).contains(&parsed) {
        Some(parsed)
    } else {
        None
    }
}

/// True when `value` decodes as an `rgb(...)`/`rgba(...)` function.
pub fn is_rgb_function(value: &str) -> bool {
    parse_rgb_function(value.trim()).is_some()
}

fn parse_rgb_function(value: &str) -> Option<([u8; 3], f64)> {
    let lower = value.to_ascii_lowercase();
    let (args, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let opacity = match (has_alpha, parts.len()) {
        (true, 4) => {
            let alpha: f64 = parts[3].parse().ok()?;
            if !alpha.is_finite() {
                return None;
            }
            alpha
        }
        (false, 3) => 1.0,
        _ => return None,
    };

    let mut rgb = [0u8; 3];
    for (out, part) in rgb.iter_mut().zip(&parts[..3]) {
        let channel: f64 = part.parse().ok()?;
        if !channel.is_finite() {
            return None;
        }
        *out = channel.round().clamp(0.0, 255.0) as u8;
    }

    Some((rgb, opacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rgba() {
        let decoded = decode("rgba(10,20,30,0.5)");
        assert_eq!(decoded.hex, "#0A141E");
        assert_eq!(decoded.opacity, Some(0.5));
    }

    #[test]
    fn test_decode_rgb_defaults_opacity_to_one() {
        let decoded = decode("rgb(255, 0, 128)");
        assert_eq!(decoded.hex, "#FF0080");
        assert_eq!(decoded.opacity, Some(1.0));
    }

    #[test]
    fn test_decode_clamps_channels() {
        let decoded = decode("rgba(300, -5, 16, 1)");
        assert_eq!(decoded.hex, "#FF0010");
    }

    #[test]
    fn test_decode_bare_hex_passthrough() {
        let decoded = decode("#abcdef");
        assert_eq!(decoded.hex, "#abcdef");
        assert_eq!(decoded.opacity, None);
    }

    #[test]
    fn test_decode_malformed_falls_back_to_black() {
        for input in ["", "red", "rgba(1,2)", "rgba(1,2,3,x)", "rgb(1,2,3", "#12345"] {
            assert_eq!(decode(input), Decoded::fallback(), "input {:?}", input);
        }
    }

    #[test]
    fn test_encode_basic() {
        assert_eq!(encode("#FF00FF", "0.9"), "rgba(255, 0, 255, 0.9)");
        assert_eq!(encode("#0a141e", "0.5"), "rgba(10, 20, 30, 0.5)");
    }

    #[test]
    fn test_encode_passes_opacity_verbatim() {
        assert_eq!(encode("#000000", "0.50"), "rgba(0, 0, 0, 0.50)");
        assert_eq!(encode("#000000", "1"), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn test_encode_invalid_hex_uses_fallback() {
        for hex in ["", "ff00ff", "#ff00f", "#gg0000", " #ff00ff", "#ff00ff00"] {
            assert_eq!(encode(hex, "0.4"), "rgba(60, 60, 60, 0.4)", "hex {:?}", hex);
        }
    }

    #[test]
    fn test_encode_invalid_opacity_uses_default() {
        for opacity in ["", "abc", "-0.1", "1.5", "NaN", "inf"] {
            assert_eq!(
                encode("#FFFFFF", opacity),
                "rgba(255, 255, 255, 0.7)",
                "opacity {:?}",
                opacity
            );
        }
    }

    #[test]
    fn test_encode_opacity_number() {
        assert_eq!(encode_opacity("#102030", 0.85), "rgba(16, 32, 48, 0.85)");
        assert_eq!(encode_opacity("#102030", 1.0), "rgba(16, 32, 48, 1)");
    }

    #[test]
    fn test_decode_then_encode_keeps_channels() {
        for (r, g, b) in [(0, 0, 0), (10, 20, 30), (255, 255, 255), (1, 128, 254)] {
            let input = format!("rgba({},{},{},0.25)", r, g, b);
            let decoded = decode(&input);
            let opacity = decoded.opacity.unwrap_or(1.0);
            assert_eq!(
                encode_opacity(&decoded.hex, opacity),
                format!("rgba({}, {}, {}, 0.25)", r, g, b)
            );
        }
    }

    #[test]
    fn test_normalize_hex_input() {
        assert_eq!(normalize_hex_input("ff00ff"), Some("#FF00FF".to_string()));
        assert_eq!(normalize_hex_input("  #a1b2c3 "), Some("#A1B2C3".to_string()));
        assert_eq!(normalize_hex_input("#a1b2c"), None);
        assert_eq!(normalize_hex_input("##a1b2c3"), None);
        assert_eq!(normalize_hex_input("zzzzzz"), None);
    }

    #[test]
    fn test_hex_rgb_helpers() {
        assert_eq!(hex_to_rgb("#0A141E"), Some([10, 20, 30]));
        assert_eq!(hex_to_rgb("0A141E"), None);
        assert_eq!(rgb_to_hex([10, 20, 30]), "#0A141E");
    }
}
