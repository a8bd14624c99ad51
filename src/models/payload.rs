//! Provider style payload types.
//!
//! A payload holds three ordered style collections exported from a design
//! tool: color fills, text styles and effect styles. Records are parsed one
//! at a time so that a single malformed record is reported and skipped
//! instead of rejecting the whole payload. Within a record, numeric fields
//! are lenient: a field that is missing or of the wrong shape becomes `None`.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Error parsing a payload document as a whole
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("failed to read payload: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// RGBA color with channel intensities in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelColor {
    #[serde(default, deserialize_with = "lenient_number")]
    pub r: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub b: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub a: Option<f64>,
}

impl ChannelColor {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r: Some(r), g: Some(g), b: Some(b), a: Some(a) }
    }

    /// Opaque black, the fallback for shadow layers without a color.
    pub fn black() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 1.0)
    }

    /// Alpha channel, defaulting to opaque.
    pub fn alpha(&self) -> f64 {
        self.a.unwrap_or(1.0)
    }
}

/// Shadow offset in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    #[serde(default, deserialize_with = "lenient_number")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub y: Option<f64>,
}

/// Effect layer kind as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[default]
    #[serde(other)]
    Other,
}

impl EffectKind {
    pub fn is_shadow(&self) -> bool {
        matches!(self, EffectKind::DropShadow | EffectKind::InnerShadow)
    }
}

/// One layer of an effect style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectLayer {
    #[serde(rename = "type", default)]
    pub kind: EffectKind,
    #[serde(default, deserialize_with = "lenient_offset")]
    pub offset: Option<Offset>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub radius: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub spread: Option<f64>,
    #[serde(default, deserialize_with = "lenient_color")]
    pub color: Option<ChannelColor>,
    #[serde(default)]
    pub visible: Option<bool>,
}

/// A color fill style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorStyle {
    #[serde(default)]
    pub key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_color")]
    pub color: Option<ChannelColor>,
}

/// A text style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default)]
    pub key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub font_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub font_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub line_height_px: Option<f64>,
}

/// An effect (shadow) style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectStyle {
    #[serde(default)]
    pub key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub effects: Vec<EffectLayer>,
}

/// Borrowed view of one style record, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleRecord<'a> {
    Color(&'a ColorStyle),
    Text(&'a TextStyle),
    Effect(&'a EffectStyle),
}

impl<'a> StyleRecord<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            StyleRecord::Color(s) => &s.name,
            StyleRecord::Text(s) => &s.name,
            StyleRecord::Effect(s) => &s.name,
        }
    }

    pub fn key(&self) -> Option<&'a str> {
        match self {
            StyleRecord::Color(s) => s.key.as_deref(),
            StyleRecord::Text(s) => s.key.as_deref(),
            StyleRecord::Effect(s) => s.key.as_deref(),
        }
    }

    pub fn description(&self) -> Option<&'a str> {
        match self {
            StyleRecord::Color(s) => s.description.as_deref(),
            StyleRecord::Text(s) => s.description.as_deref(),
            StyleRecord::Effect(s) => s.description.as_deref(),
        }
    }

    /// Collection the record came from.
    pub fn collection(&self) -> &'static str {
        match self {
            StyleRecord::Color(_) => "colors",
            StyleRecord::Text(_) => "text",
            StyleRecord::Effect(_) => "effects",
        }
    }
}

/// A record that could not be parsed at all.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub collection: &'static str,
    pub index: usize,
    pub reason: String,
}

impl std::fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.collection, self.index, self.reason)
    }
}

/// The three style collections of a provider payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StylePayload {
    pub colors: Vec<ColorStyle>,
    pub text: Vec<TextStyle>,
    pub effects: Vec<EffectStyle>,
}

/// Result of parsing a payload: the usable records plus those rejected.
#[derive(Debug, Clone, Default)]
pub struct ParsedPayload {
    pub payload: StylePayload,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Deserialize)]
struct RawPayload {
    #[serde(default)]
    colors: Vec<serde_json::Value>,
    #[serde(default)]
    text: Vec<serde_json::Value>,
    #[serde(default)]
    effects: Vec<serde_json::Value>,
}

impl StylePayload {
    /// Parse a payload document, skipping malformed records.
    ///
    /// Fails only when the document itself is not a JSON object with array
    /// collections.
    pub fn from_json(source: &str) -> Result<ParsedPayload, PayloadError> {
        let raw: RawPayload = serde_json::from_str(source)?;
        let mut rejected = Vec::new();

        let payload = StylePayload {
            colors: parse_records(raw.colors, "colors", &mut rejected),
            text: parse_records(raw.text, "text", &mut rejected),
            effects: parse_records(raw.effects, "effects", &mut rejected),
        };

        Ok(ParsedPayload { payload, rejected })
    }

    /// Read and parse a payload file.
    pub fn load(path: &std::path::Path) -> Result<ParsedPayload, PayloadError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// All records in collection order: colors, then text, then effects.
    pub fn records(&self) -> impl Iterator<Item = StyleRecord<'_>> {
        self.colors
            .iter()
            .map(StyleRecord::Color)
            .chain(self.text.iter().map(StyleRecord::Text))
            .chain(self.effects.iter().map(StyleRecord::Effect))
    }

    pub fn record_count(&self) -> usize {
        self.colors.len() + self.text.len() + self.effects.len()
    }
}

fn parse_records<T: serde::de::DeserializeOwned>(
    values: Vec<serde_json::Value>,
    collection: &'static str,
    rejected: &mut Vec<RejectedRecord>,
) -> Vec<T> {
    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => rejected.push(RejectedRecord { collection, index, reason: e.to_string() }),
        }
    }
    records
}

/// Number or numeric string; anything else becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite()))
}

fn lenient_color<'de, D>(deserializer: D) -> Result<Option<ChannelColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_offset<'de, D>(deserializer: D) -> Result<Option<Offset>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
