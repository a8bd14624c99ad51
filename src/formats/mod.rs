//! Output formats for transformed tokens.
//!
//! A format turns the complete, transformed token list of one platform into
//! the contents of one file. Formats are pure: they never touch the
//! filesystem and never mutate tokens. Apart from the optional
//! `Generated on` header line, output depends only on the tokens and
//! options, so repeated builds are byte-identical.
//!
//! # Supported Formats
//!
//! - `css/variables`, `scss/variables` - stylesheet variables
//! - `javascript/es6`, `typescript/es6-declarations` - code constants
//! - `json/flat`, `json/nested`, `json/structured` - data files
//! - `markdown/table`, `html/docs` - documentation

pub mod css;
pub mod html;
pub mod javascript;
pub mod json;
pub mod markdown;

pub use css::*;
pub use html::*;
pub use javascript::*;
pub use json::*;
pub use markdown::*;

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::models::TransformedToken;
use crate::registry::Registry;

/// Errors raised while rendering a format.
#[derive(Debug, Error)]
pub enum FormatError {
    /// No format with this name is registered
    #[error("unknown format: {0}")]
    Unknown(String),
    /// Serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;

/// Per-file options handed to a format.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// CSS selector wrapping the variables
    pub selector: String,
    /// Prefix prepended to every variable name
    pub prefix: Option<String>,
    /// Document title for documentation formats
    pub title: Option<String>,
    /// Print `var(...)` references instead of resolved alias values
    pub output_references: bool,
    /// Emit the "Do not edit" header comment
    pub file_header: bool,
    /// Generation time for headers; omitted when `None`
    pub timestamp: Option<String>,
    pub version: Option<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            selector: ":root".to_string(),
            prefix: None,
            title: None,
            output_references: true,
            file_header: true,
            timestamp: None,
            version: None,
        }
    }
}

impl FormatOptions {
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_output_references(mut self, output_references: bool) -> Self {
        self.output_references = output_references;
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Title, or `fallback` when none is set.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }

    /// Apply the prefix, joined with `sep`.
    pub fn prefixed(&self, name: &str, sep: &str) -> String {
        match self.prefix.as_deref().filter(|p| !p.is_empty()) {
            Some(prefix) => format!("{}{}{}", prefix, sep, name),
            None => name.to_string(),
        }
    }
}

/// Trait for format implementations.
pub trait Format: Send + Sync {
    /// Registered name, e.g. `css/variables`.
    fn name(&self) -> &'static str;

    /// Default file extension for this format.
    fn extension(&self) -> &'static str;

    /// Render the complete token list into file contents.
    fn render(&self, tokens: &[TransformedToken], options: &FormatOptions) -> Result<String>;
}

/// Registry of formats by name.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    formats: HashMap<String, Arc<dyn Format>>,
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry").field("formats", &self.sorted_names()).finish()
    }
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in format.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(CssVariables);
        registry.register(ScssVariables);
        registry.register(JavascriptEs6);
        registry.register(TypescriptDeclarations);
        registry.register(JsonFlat);
        registry.register(JsonNested);
        registry.register(JsonStructured);
        registry.register(MarkdownTable);
        registry.register(HtmlDocs);
        registry
    }

    /// Register a format, replacing any with the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats.insert(format.name().to_string(), Arc::new(format));
    }

    /// Look up a format, failing with [`FormatError::Unknown`].
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Format>> {
        self.formats.get(name).cloned().ok_or_else(|| FormatError::Unknown(name.to_string()))
    }
}

impl Registry<Arc<dyn Format>> for FormatRegistry {
    fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&Arc<dyn Format>> {
        self.formats.get(name)
    }

    fn len(&self) -> usize {
        self.formats.len()
    }

    fn clear(&mut self) {
        self.formats.clear();
    }

    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        Box::new(self.formats.keys())
    }
}

/// `/** ... */` header block shared by the code formats.
pub(crate) fn block_header(options: &FormatOptions) -> String {
    if !options.file_header {
        return String::new();
    }
    let mut header = String::from("/**\n * Do not edit directly\n");
    if let Some(timestamp) = &options.timestamp {
        header.push_str(&format!(" * Generated on {}\n", timestamp));
    }
    header.push_str(" */\n\n");
    header
}

/// Group tokens by their first path segment, in first-seen order.
pub(crate) fn group_by_top_segment(tokens: &[TransformedToken]) -> IndexMap<&str, Vec<&TransformedToken>> {
    let mut groups: IndexMap<&str, Vec<&TransformedToken>> = IndexMap::new();
    for token in tokens {
        groups.entry(token.top_segment()).or_default().push(token);
    }
    groups
}

/// Upper-case the first character.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Token, TokenType, TransformedToken};
    use crate::transforms::{apply_transforms, TransformOptions, TransformRegistry};

    pub fn token(path: &str, token_type: TokenType, value: &str) -> Token {
        Token::new(path.split('.').map(String::from).collect(), token_type, value)
    }

    /// A small token set run through the named group.
    pub fn sample(group: &str) -> Vec<TransformedToken> {
        let tokens = vec![
            token("colors.primary.500", TokenType::Color, "#FF0000").with_description(Some("Brand red".into())),
            token("colors.overlay", TokenType::Color, "#000000").with_alpha(0.5),
            token("spacing.md", TokenType::Dimension, "16px"),
            token("button.bg", TokenType::Color, "{colors.primary.500}"),
        ];
        let refs: Vec<&Token> = tokens.iter().collect();
        let group = TransformRegistry::with_builtins().resolve_group(group).unwrap();
        apply_transforms(&refs, &group, &TransformOptions::default()).unwrap()
    }
}
