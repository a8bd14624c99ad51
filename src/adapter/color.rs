//! Color style conversion.

use crate::color::{channel_to_byte, rgb_to_hex};
use crate::models::{ChannelColor, ColorStyle, Token, TokenType};

/// Hex string for a provider color, ignoring alpha.
pub fn channels_to_hex(color: &ChannelColor) -> String {
    rgb_to_hex(
        channel_to_byte(color.r.unwrap_or(0.0)),
        channel_to_byte(color.g.unwrap_or(0.0)),
        channel_to_byte(color.b.unwrap_or(0.0)),
    )
}

/// Convert a color style to a `color` token at `path`.
///
/// Returns `None` when the style carries no color. Alpha is kept only when it
/// differs from 1.
pub fn color_token(style: &ColorStyle, path: Vec<String>) -> Option<Token> {
    let color = style.color.as_ref()?;
    let mut token = Token::new(path, TokenType::Color, channels_to_hex(color));

    let alpha = color.alpha().clamp(0.0, 1.0);
    if alpha != 1.0 {
        token = token.with_alpha(alpha);
    }
    Some(token)
}
