//! Source adapter: provider style payload to canonical token tree.
//!
//! Adaptation never fails. Records that are malformed or only partially
//! populated contribute whatever tokens they can and leave an
//! [`AdaptWarning`] behind. Two records that parse to the same path
//! overwrite each other (last write wins); every such collision is logged
//! and reported.
//!
//! # Example
//!
//! ```
//! use tokenforge::adapter::{adapt, AdapterOptions};
//! use tokenforge::models::{ChannelColor, ColorStyle, StylePayload, TokenType};
//!
//! let payload = StylePayload {
//!     colors: vec![ColorStyle {
//!         key: None,
//!         name: "primary/500".to_string(),
//!         description: None,
//!         color: Some(ChannelColor::rgba(1.0, 0.0, 0.0, 1.0)),
//!     }],
//!     ..Default::default()
//! };
//!
//! let adapted = adapt(&payload, &AdapterOptions::default());
//! let token = adapted.tree.get_by_key("primary.500").unwrap();
//! assert_eq!(token.token_type, TokenType::Color);
//! assert_eq!(token.value, "#FF0000");
//! ```

pub mod color;
pub mod effects;
pub mod naming;
pub mod typography;

pub use color::*;
pub use effects::*;
pub use naming::*;
pub use typography::*;

use crate::models::{ParsedPayload, RejectedRecord, StylePayload, StyleRecord, Token, TokenTree};
use std::fmt;

/// Optional namespaces placed in front of every path of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterOptions {
    pub color_root: Option<String>,
    pub text_root: Option<String>,
    pub effect_root: Option<String>,
}

impl AdapterOptions {
    fn root_for(&self, record: &StyleRecord<'_>) -> Option<&str> {
        match record {
            StyleRecord::Color(_) => self.color_root.as_deref(),
            StyleRecord::Text(_) => self.text_root.as_deref(),
            StyleRecord::Effect(_) => self.effect_root.as_deref(),
        }
        .filter(|root| !root.is_empty())
    }
}

/// Something the adapter skipped or overwrote.
#[derive(Debug, Clone, PartialEq)]
pub enum AdaptWarning {
    /// The record could not be parsed at all
    Rejected(RejectedRecord),
    /// The style name produced no path segments
    EmptyName { collection: &'static str, name: String },
    /// Color style without a color
    MissingColor { name: String },
    /// Text style without any usable property
    EmptyTextStyle { name: String },
    /// Effect style without a visible shadow layer
    NoShadowLayers { name: String },
    /// Two records resolved to the same path; the later one was kept
    Collision { path: String, name: String },
}

impl fmt::Display for AdaptWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdaptWarning::Rejected(record) => write!(f, "skipped malformed record {}", record),
            AdaptWarning::EmptyName { collection, name } => {
                write!(f, "{} style '{}' has no usable name segments", collection, name)
            }
            AdaptWarning::MissingColor { name } => {
                write!(f, "color style '{}' has no color", name)
            }
            AdaptWarning::EmptyTextStyle { name } => {
                write!(f, "text style '{}' has no font properties", name)
            }
            AdaptWarning::NoShadowLayers { name } => {
                write!(f, "effect style '{}' has no shadow layers", name)
            }
            AdaptWarning::Collision { path, name } => {
                write!(f, "style '{}' overwrote an earlier token at '{}'", name, path)
            }
        }
    }
}

/// Output of an adaptation run.
#[derive(Debug, Clone, Default)]
pub struct Adapted {
    pub tree: TokenTree,
    pub warnings: Vec<AdaptWarning>,
}

/// Adapt a parsed payload, carrying its rejected records over as warnings.
pub fn adapt_parsed(parsed: &ParsedPayload, options: &AdapterOptions) -> Adapted {
    let mut adapted = adapt(&parsed.payload, options);
    let rejected = parsed.rejected.iter().cloned().map(AdaptWarning::Rejected);
    adapted.warnings.splice(0..0, rejected);
    adapted
}

/// Convert a provider payload into a token tree.
pub fn adapt(payload: &StylePayload, options: &AdapterOptions) -> Adapted {
    let mut adapted = Adapted::default();

    for record in payload.records() {
        let mut path = parse_style_name(record.name());
        if path.is_empty() {
            adapted.warn(AdaptWarning::EmptyName {
                collection: record.collection(),
                name: record.name().to_string(),
            });
            continue;
        }
        if let Some(root) = options.root_for(&record) {
            path.insert(0, root.to_string());
        }

        let tokens = match record {
            StyleRecord::Color(style) => match color_token(style, path) {
                Some(token) => vec![token],
                None => {
                    adapted.warn(AdaptWarning::MissingColor { name: style.name.clone() });
                    continue;
                }
            },
            StyleRecord::Text(style) => {
                let tokens = typography_tokens(style, &path);
                if tokens.is_empty() {
                    adapted.warn(AdaptWarning::EmptyTextStyle { name: style.name.clone() });
                    continue;
                }
                tokens
            }
            StyleRecord::Effect(style) => match shadow_token(style, path) {
                Some(token) => vec![token],
                None => {
                    adapted.warn(AdaptWarning::NoShadowLayers { name: style.name.clone() });
                    continue;
                }
            },
        };

        for token in tokens {
            let token = token
                .with_description(record.description().map(str::to_string))
                .with_source(record.key().map(str::to_string), Some(record.name().to_string()));
            adapted.emit(token, record.name());
        }
    }

    tracing::debug!(
        tokens = adapted.tree.token_count(),
        warnings = adapted.warnings.len(),
        "adapted style payload"
    );
    adapted
}

impl Adapted {
    fn warn(&mut self, warning: AdaptWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn emit(&mut self, token: Token, name: &str) {
        let path = token.path.clone();
        if self.tree.insert(&path, token).is_some() {
            self.warn(AdaptWarning::Collision { path: path.join("."), name: name.to_string() });
        }
    }
}
