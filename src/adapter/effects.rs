//! Effect style conversion.
//!
//! Drop and inner shadow layers are flattened into one CSS `box-shadow`
//! value. Blur effects and hidden layers are ignored.

use crate::color::{channel_to_byte, format_alpha};
use crate::models::{ChannelColor, EffectKind, EffectLayer, EffectStyle, Token, TokenType};
use crate::units::format_number;

/// Render one shadow layer: `[inset ]<x>px <y>px <blur>px <spread>px rgba(r,g,b,a)`.
///
/// Missing offset, radius and spread default to 0 and a missing color to
/// opaque black.
pub fn shadow_layer_css(layer: &EffectLayer) -> String {
    let offset = layer.offset.unwrap_or_default();
    let color = layer.color.unwrap_or_else(ChannelColor::black);

    let inset = if layer.kind == EffectKind::InnerShadow { "inset " } else { "" };
    format!(
        "{}{}px {}px {}px {}px rgba({},{},{},{})",
        inset,
        format_number(offset.x.unwrap_or(0.0)),
        format_number(offset.y.unwrap_or(0.0)),
        format_number(layer.radius.unwrap_or(0.0)),
        format_number(layer.spread.unwrap_or(0.0)),
        channel_to_byte(color.r.unwrap_or(0.0)),
        channel_to_byte(color.g.unwrap_or(0.0)),
        channel_to_byte(color.b.unwrap_or(0.0)),
        format_alpha(color.alpha()),
    )
}

/// Join every visible shadow layer with `", "`; `None` when there are none.
pub fn shadow_css(layers: &[EffectLayer]) -> Option<String> {
    let rendered: Vec<String> = layers
        .iter()
        .filter(|layer| layer.kind.is_shadow() && layer.visible != Some(false))
        .map(shadow_layer_css)
        .collect();

    if rendered.is_empty() {
        None
    } else {
        Some(rendered.join(", "))
    }
}

/// Convert an effect style to a `shadow` token at `path`.
pub fn shadow_token(style: &EffectStyle, path: Vec<String>) -> Option<Token> {
    shadow_css(&style.effects).map(|css| Token::new(path, TokenType::Shadow, css))
}
