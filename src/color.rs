//! Color conversion utilities for design tokens
//!
//! Design tools deliver color channels as intensities in `[0, 1]`; tokens
//! store them as uppercase `#RRGGBB` strings with an optional separate alpha.
//! This module converts between the two and parses arbitrary CSS color
//! strings (`rgb()`, `hsl()`, named colors) for normalization.

use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Hex color without the leading '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Hex string for the color channels, ignoring alpha.
    pub fn to_hex(&self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha_fraction(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

/// Scale a `[0, 1]` channel intensity to a byte, rounding to nearest.
///
/// Out-of-range and non-finite inputs are clamped.
pub fn channel_to_byte(channel: f64) -> u8 {
    if !channel.is_finite() {
        return 0;
    }
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Encode channels as an uppercase `#RRGGBB` string.
///
/// ```
/// use tokenforge::color::rgb_to_hex;
///
/// assert_eq!(rgb_to_hex(255, 0, 0), "#FF0000");
/// ```
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Decode a `#RGB` or `#RRGGBB` string into channels.
///
/// Alpha digits (`#RGBA`, `#RRGGBBAA`) are accepted and dropped.
pub fn hex_to_rgb(s: &str) -> Result<(u8, u8, u8), ColorError> {
    let color = parse_hex_color(s)?;
    Ok((color.r, color.g, color.b))
}

/// Render an alpha value clamped to `0..=1`, keeping every stored digit.
pub fn format_alpha(alpha: f64) -> String {
    format!("{}", alpha.clamp(0.0, 1.0))
}

/// Parse a CSS color string into an RGBA color.
///
/// Hex colors take a fast path; everything else (`rgb()`, `hsl()`, `hwb()`,
/// named colors) goes through lightningcss.
///
/// ```
/// use tokenforge::color::{parse_color, Rgba};
///
/// assert_eq!(parse_color("#F00").unwrap(), Rgba::new(255, 0, 0, 255));
/// assert_eq!(parse_color("rgb(0, 255, 0)").unwrap(), Rgba::new(0, 255, 0, 255));
/// assert_eq!(parse_color("blue").unwrap(), Rgba::new(0, 0, 255, 255));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    parse_css_color(s)
}

fn parse_hex_color(s: &str) -> Result<Rgba, ColorError> {
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    let mut digits = Vec::with_capacity(hex.len());
    for c in hex.chars() {
        digits.push(c.to_digit(16).ok_or(ColorError::InvalidHex(c))? as u8);
    }

    match digits.as_slice() {
        [r, g, b] => Ok(Rgba::new(r * 17, g * 17, b * 17, 255)),
        [r, g, b, a] => Ok(Rgba::new(r * 17, g * 17, b * 17, a * 17)),
        [r1, r2, g1, g2, b1, b2] => {
            Ok(Rgba::new(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, 255))
        }
        [r1, r2, g1, g2, b1, b2, a1, a2] => {
            Ok(Rgba::new(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, a1 * 16 + a2))
        }
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

fn parse_css_color(s: &str) -> Result<Rgba, ColorError> {
    use lightningcss::values::color::FloatColor;

    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb_color = css_color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba::new(rgba.red, rgba.green, rgba.blue, rgba.alpha)),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => Ok(Rgba::new(
                channel_to_byte(rgb.r as f64),
                channel_to_byte(rgb.g as f64),
                channel_to_byte(rgb.b as f64),
                channel_to_byte(rgb.alpha as f64),
            )),
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_to_byte_rounds() {
        assert_eq!(channel_to_byte(1.0), 255);
        assert_eq!(channel_to_byte(0.0), 0);
        assert_eq!(channel_to_byte(0.5), 128);
        assert_eq!(channel_to_byte(0.2), 51);
    }

    #[test]
    fn test_channel_to_byte_clamps() {
        assert_eq!(channel_to_byte(1.5), 255);
        assert_eq!(channel_to_byte(-0.1), 0);
        assert_eq!(channel_to_byte(f64::NAN), 0);
    }

    #[test]
    fn test_rgb_to_hex_uppercase() {
        assert_eq!(rgb_to_hex(171, 205, 239), "#ABCDEF");
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
    }

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#FFFFFF", "#FF0000", "#1A2B3C", "#7F7F80", "#ABCDEF"] {
            let (r, g, b) = hex_to_rgb(hex).unwrap();
            assert_eq!(rgb_to_hex(r, g, b), hex);
        }
    }

    #[test]
    fn test_hex_round_trip_lowercase_input() {
        let (r, g, b) = hex_to_rgb("#abcdef").unwrap();
        assert_eq!(rgb_to_hex(r, g, b), "#ABCDEF");
    }

    #[test]
    fn test_channel_round_trip_within_tolerance() {
        for i in 0..=255u8 {
            let fraction = i as f64 / 255.0;
            let byte = channel_to_byte(fraction);
            assert!((byte as i16 - i as i16).abs() <= 1);
        }
    }

    #[test]
    fn test_hex_short_form() {
        assert_eq!(hex_to_rgb("#F0A").unwrap(), (255, 0, 170));
    }

    #[test]
    fn test_hex_errors() {
        assert_eq!(hex_to_rgb("FF0000"), Err(ColorError::MissingHash));
        assert_eq!(hex_to_rgb("#FF00"), Ok((255, 255, 0)));
        assert_eq!(hex_to_rgb("#FF000"), Err(ColorError::InvalidLength(5)));
        assert_eq!(hex_to_rgb("#GG0000"), Err(ColorError::InvalidHex('G')));
    }

    #[test]
    fn test_parse_color_empty() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("   "), Err(ColorError::Empty));
    }

    #[test]
    fn test_parse_color_functional() {
        assert_eq!(parse_color("rgb(255, 0, 0)").unwrap(), Rgba::new(255, 0, 0, 255));
        assert_eq!(parse_color("hsl(0, 100%, 50%)").unwrap(), Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn test_parse_color_invalid_css() {
        assert!(matches!(parse_color("notacolor"), Err(ColorError::CssParse(_))));
    }

    #[test]
    fn test_format_alpha() {
        assert_eq!(format_alpha(0.5), "0.5");
        assert_eq!(format_alpha(0.25098), "0.25098");
        assert_eq!(format_alpha(0.125), "0.125");
        assert_eq!(format_alpha(1.5), "1");
        assert_eq!(format_alpha(1.0), "1");
        assert_eq!(format_alpha(0.0), "0");
    }

    #[test]
    fn test_rgba_to_hex() {
        assert_eq!(Rgba::new(16, 32, 48, 128).to_hex(), "#102030");
    }
}
