//! Token types: the canonical token and its flattened, transformable form.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Open attribute bag populated by attribute transforms.
pub type Attributes = IndexMap<String, String>;

pub const ATTR_CATEGORY: &str = "category";
pub const ATTR_SUBCATEGORY: &str = "subcategory";
pub const ATTR_STATE: &str = "state";
pub const ATTR_PROVENANCE: &str = "provenance";
pub const ATTR_COMMENT: &str = "comment";

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{([A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*)\}$").unwrap());

/// If `value` is exactly `{dot.separated.path}`, return the inner path.
///
/// ```
/// use tokenforge::models::reference_target;
///
/// assert_eq!(reference_target("{colors.primary.500}"), Some("colors.primary.500"));
/// assert_eq!(reference_target("{colors.primary} solid"), None);
/// ```
pub fn reference_target(value: &str) -> Option<&str> {
    REFERENCE_RE.captures(value).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Closed set of token types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    Dimension,
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    Shadow,
    Number,
    String,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TokenType {
    /// The camelCase name used in token files and structured output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontSize => "fontSize",
            TokenType::FontWeight => "fontWeight",
            TokenType::LineHeight => "lineHeight",
            TokenType::Shadow => "shadow",
            TokenType::Number => "number",
            TokenType::String => "string",
            TokenType::Unknown => "unknown",
        }
    }

    /// Whether values of this type are sizes measured in length units.
    pub fn is_size(&self) -> bool {
        matches!(self, TokenType::Dimension | TokenType::FontSize)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TokenType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "color" => Ok(TokenType::Color),
            "dimension" => Ok(TokenType::Dimension),
            "fontFamily" => Ok(TokenType::FontFamily),
            "fontSize" => Ok(TokenType::FontSize),
            "fontWeight" => Ok(TokenType::FontWeight),
            "lineHeight" => Ok(TokenType::LineHeight),
            "shadow" => Ok(TokenType::Shadow),
            "number" => Ok(TokenType::Number),
            "string" => Ok(TokenType::String),
            "unknown" => Ok(TokenType::Unknown),
            other => Err(format!("unknown token type '{}'", other)),
        }
    }
}

/// A canonical design token.
///
/// `path` is not serialized: in token files it is implied by the keys of
/// the enclosing groups and restored when the tree is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(skip)]
    pub path: Vec<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(rename = "type", default)]
    pub token_type: TokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: Attributes,
}

impl Token {
    /// Create a token with a type and value and no provenance.
    pub fn new(path: Vec<String>, token_type: TokenType, value: impl Into<String>) -> Self {
        Self { path, token_type, value: value.into(), ..Default::default() }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    pub fn with_source(mut self, key: Option<String>, name: Option<String>) -> Self {
        self.source_key = key;
        self.source_name = name;
        self
    }

    /// Dot-joined path, the form used inside references.
    pub fn path_key(&self) -> String {
        self.path.join(".")
    }

    /// Whether the value is an alias to another token.
    pub fn is_reference(&self) -> bool {
        reference_target(&self.value).is_some()
    }
}

/// Accept either a JSON string or number (or bool) for token values.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// A token as it moves through a transform group and into a format.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedToken {
    /// Display name produced by name transforms
    pub name: String,
    /// Rendered value produced by value transforms
    pub value: String,
    pub token_type: TokenType,
    pub path: Vec<String>,
    pub attributes: Attributes,
    pub alpha: Option<f64>,
    /// Value before any transform ran
    pub original_value: String,
    pub original_type: TokenType,
    pub description: Option<String>,
    pub source_key: Option<String>,
    pub source_name: Option<String>,
    /// Terminal value of the alias chain, for tokens whose original value is
    /// a reference
    pub resolved_value: Option<String>,
}

impl TransformedToken {
    pub fn from_token(token: &Token) -> Self {
        Self {
            name: token.path.join("-"),
            value: token.value.clone(),
            token_type: token.token_type,
            path: token.path.clone(),
            attributes: token.attributes.clone(),
            alpha: token.alpha,
            original_value: token.value.clone(),
            original_type: token.token_type,
            description: token.description.clone(),
            source_key: token.source_key.clone(),
            source_name: token.source_name.clone(),
            resolved_value: None,
        }
    }

    pub fn path_key(&self) -> String {
        self.path.join(".")
    }

    pub fn top_segment(&self) -> &str {
        self.path.first().map(String::as_str).unwrap_or("")
    }

    /// Whether the current value is still a raw `{reference}`.
    pub fn is_reference(&self) -> bool {
        reference_target(&self.value).is_some()
    }

    /// Whether the token was declared as an alias.
    pub fn is_alias(&self) -> bool {
        reference_target(&self.original_value).is_some()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Category attribute, falling back to the top-level path segment.
    pub fn category(&self) -> &str {
        self.attribute(ATTR_CATEGORY).unwrap_or_else(|| self.top_segment())
    }

    /// Value a format should print: the reference form when references are
    /// kept, otherwise the resolved alias value.
    pub fn output_value(&self, output_references: bool) -> &str {
        if output_references {
            &self.value
        } else {
            self.resolved_value.as_deref().unwrap_or(&self.value)
        }
    }

    /// Provenance attribute, else source key, else source name.
    pub fn provenance(&self) -> Option<&str> {
        self.attribute(ATTR_PROVENANCE)
            .or(self.source_key.as_deref())
            .or(self.source_name.as_deref())
    }
}
