//! JSON formats.
//!
//! # Output Formats
//!
//! - `json/flat`: `{ "<name>": "<value>" }` in token order
//! - `json/nested`: objects following each token's path, values at the leaves
//! - `json/structured`: tokens grouped by category with metadata
//!
//! # Example Output (`json/structured`)
//!
//! ```json
//! {
//!   "$schema": "design-tokens/v1",
//!   "metadata": { "totalTokens": 1, "version": "1.0.0" },
//!   "tokens": {
//!     "color": {
//!       "description": "Color palette",
//!       "tokens": [
//!         {
//!           "name": "color-primary-500",
//!           "value": "#FF0000",
//!           "type": "color",
//!           "path": "primary.500",
//!           "category": "color",
//!           "originalValue": "#FF0000",
//!           "originalType": "color"
//!         }
//!       ]
//!     }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::{TransformedToken, ATTR_SUBCATEGORY};

use super::{Format, FormatOptions, Result};

pub const STRUCTURED_SCHEMA: &str = "design-tokens/v1";
const DEFAULT_VERSION: &str = "1.0.0";

/// `json/flat`
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFlat;

impl Format for JsonFlat {
    fn name(&self) -> &'static str {
        "json/flat"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, tokens: &[TransformedToken], options: &FormatOptions) -> Result<String> {
        let flat: IndexMap<String, &str> = tokens
            .iter()
            .map(|t| (options.prefixed(&t.name, "-"), t.output_value(options.output_references)))
            .collect();
        Ok(to_pretty(&flat)?)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Node<'a> {
    Leaf(&'a str),
    Branch(IndexMap<&'a str, Node<'a>>),
}

impl<'a> Node<'a> {
    fn insert(&mut self, path: &'a [String], value: &'a str) {
        let Node::Branch(children) = self else { return };
        match path {
            [] => {}
            [leaf] => {
                children.insert(leaf.as_str(), Node::Leaf(value));
            }
            [head, rest @ ..] => {
                let child = children.entry(head.as_str()).or_insert_with(|| Node::Branch(IndexMap::new()));
                if matches!(child, Node::Leaf(_)) {
                    *child = Node::Branch(IndexMap::new());
                }
                child.insert(rest, value);
            }
        }
    }
}

/// `json/nested`
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonNested;

impl Format for JsonNested {
    fn name(&self) -> &'static str {
        "json/nested"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, tokens: &[TransformedToken], options: &FormatOptions) -> Result<String> {
        let mut root = Node::Branch(IndexMap::new());
        for token in tokens {
            root.insert(&token.path, token.output_value(options.output_references));
        }
        Ok(to_pretty(&root)?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StructuredDocument<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    metadata: Metadata<'a>,
    tokens: IndexMap<&'a str, Category<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<&'a str>,
    total_tokens: usize,
    version: &'a str,
}

#[derive(Serialize)]
struct Category<'a> {
    description: String,
    tokens: Vec<StructuredToken<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StructuredToken<'a> {
    name: &'a str,
    value: &'a str,
    #[serde(rename = "type")]
    token_type: &'static str,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subcategory: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provenance: Option<&'a str>,
    original_value: &'a str,
    original_type: &'static str,
}

/// Description of a known category; `<category> tokens` otherwise.
pub fn category_description(category: &str) -> String {
    match category {
        "color" => "Color palette".to_string(),
        "space" => "Spacing scale".to_string(),
        "typography" => "Typography styles".to_string(),
        "effect" => "Shadows and effects".to_string(),
        "radius" => "Corner radii".to_string(),
        other => format!("{} tokens", other),
    }
}

/// `json/structured`
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonStructured;

impl Format for JsonStructured {
    fn name(&self) -> &'static str {
        "json/structured"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, tokens: &[TransformedToken], options: &FormatOptions) -> Result<String> {
        let mut categories: IndexMap<&str, Category> = IndexMap::new();
        for token in tokens {
            let category = token.category();
            let entry = categories
                .entry(category)
                .or_insert_with(|| Category { description: category_description(category), tokens: Vec::new() });
            entry.tokens.push(StructuredToken {
                name: &token.name,
                value: token.output_value(options.output_references),
                token_type: token.token_type.as_str(),
                path: token.path_key(),
                description: token.description.as_deref(),
                category,
                subcategory: token.attribute(ATTR_SUBCATEGORY),
                provenance: token.provenance(),
                original_value: &token.original_value,
                original_type: token.original_type.as_str(),
            });
        }

        let document = StructuredDocument {
            schema: STRUCTURED_SCHEMA,
            metadata: Metadata {
                generated_at: options.timestamp.as_deref(),
                total_tokens: tokens.len(),
                version: options.version.as_deref().unwrap_or(DEFAULT_VERSION),
            },
            tokens: categories,
        };
        Ok(to_pretty(&document)?)
    }
}

fn to_pretty<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
