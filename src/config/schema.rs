//! Configuration schema types for `tokens.toml`
//!
//! Defines the structure and validation rules for a token build project:
//! where tokens come from and which platforms to render them for.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::adapter::AdapterOptions;
use crate::formats::FormatOptions;
use crate::models::{TokenType, TransformedToken};
use crate::transforms::TransformOptions;

/// Project metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Project version, written into structured output
    #[serde(default = "default_version")]
    pub version: String,
    /// Build output directory
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_out() -> PathBuf {
    PathBuf::from("build")
}

/// What the source files contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A provider style payload, adapted on load
    #[default]
    Payload,
    /// Canonical token files (JSON or JSON5), deep-merged
    Tokens,
}

/// Token source section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    /// Glob patterns, relative to the project root
    #[serde(default = "default_source_paths")]
    pub paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect_root: Option<String>,
}

fn default_source_paths() -> Vec<String> {
    vec!["styles.json".to_string()]
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            paths: default_source_paths(),
            color_root: None,
            text_root: None,
            effect_root: None,
        }
    }
}

impl SourceConfig {
    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions {
            color_root: self.color_root.clone(),
            text_root: self.text_root.clone(),
            effect_root: self.effect_root.clone(),
        }
    }
}

/// Token filter used at platform and file level. All set criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenFilter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
    /// Matches the `category` attribute (or top path segment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Dot-separated path prefix, matched segment-wise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
}

impl TokenFilter {
    pub fn matches(&self, token: &TransformedToken) -> bool {
        if self.token_type.is_some_and(|t| t != token.token_type) {
            return false;
        }
        if self.category.as_deref().is_some_and(|c| c != token.category()) {
            return false;
        }
        if let Some(prefix) = self.path_prefix.as_deref() {
            let segments: Vec<&str> = prefix.split('.').filter(|s| !s.is_empty()).collect();
            if segments.len() > token.path.len() || !segments.iter().zip(&token.path).all(|(a, b)| *a == b.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Per-file format options; keys follow the camelCase names formats use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_references: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_header: Option<bool>,
}

/// One output file of a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Path relative to the platform build path
    pub destination: String,
    /// Registered format name
    pub format: String,
    #[serde(default)]
    pub options: FileOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<TokenFilter>,
}

impl FileConfig {
    pub fn new(destination: impl Into<String>, format: impl Into<String>) -> Self {
        Self { destination: destination.into(), format: format.into(), options: FileOptions::default(), filter: None }
    }
}

/// A build target: one transform group and the files it renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_group: Option<String>,
    /// Explicit transform list, instead of a group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transforms: Option<Vec<String>>,
    /// Directory under the project output directory
    #[serde(default)]
    pub build_path: PathBuf,
    #[serde(default = "default_base_font_size")]
    pub base_font_size: f64,
    #[serde(default = "default_true")]
    pub output_references: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<TokenFilter>,
    #[serde(default)]
    pub files: Vec<FileConfig>,
}

fn default_base_font_size() -> f64 {
    16.0
}

fn default_true() -> bool {
    true
}

fn is_positive(n: f64) -> bool {
    n.is_finite() && n > 0.0
}

impl PlatformConfig {
    /// Platform using a named group.
    pub fn with_group(group: impl Into<String>, build_path: impl Into<PathBuf>) -> Self {
        Self {
            transform_group: Some(group.into()),
            transforms: None,
            build_path: build_path.into(),
            base_font_size: default_base_font_size(),
            output_references: true,
            filter: None,
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: FileConfig) -> Self {
        self.files.push(file);
        self
    }

    /// Transform options for one file. The file's `baseFontSize` and
    /// `outputReferences` override the platform's.
    pub fn transform_options(&self, file: &FileConfig) -> TransformOptions {
        TransformOptions::default()
            .with_base_font_size(file.options.base_font_size.unwrap_or(self.base_font_size))
            .with_output_references(file.options.output_references.unwrap_or(self.output_references))
    }

    /// Format options for one file: platform settings overlaid by the
    /// file's own options.
    pub fn format_options(&self, file: &FileConfig) -> FormatOptions {
        let defaults = FormatOptions::default();
        FormatOptions {
            selector: file.options.selector.clone().unwrap_or(defaults.selector),
            prefix: file.options.prefix.clone(),
            title: file.options.title.clone(),
            output_references: file.options.output_references.unwrap_or(self.output_references),
            file_header: file.options.file_header.unwrap_or(defaults.file_header),
            timestamp: None,
            version: None,
        }
    }
}

/// Watch mode configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Clear terminal between rebuilds
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

fn default_debounce_ms() -> u32 {
    100
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 100, clear_screen: true }
    }
}

/// Complete tokens.toml configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokensConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    #[serde(default)]
    pub source: SourceConfig,
    /// Platforms by name; built in name order
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformConfig>,
    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "platforms.css.files")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tokens.toml: '{}' {}", self.field, self.message)
    }
}

impl TokensConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut error = |field: String, message: &str| {
            errors.push(ConfigValidationError { field, message: message.to_string() });
        };

        if self.project.name.trim().is_empty() {
            error("project.name".to_string(), "must be a non-empty string");
        }

        if self.source.paths.is_empty() {
            error("source.paths".to_string(), "must contain at least one glob pattern");
        }

        for (name, platform) in &self.platforms {
            match (&platform.transform_group, &platform.transforms) {
                (Some(_), Some(_)) => {
                    error(format!("platforms.{}", name), "must set transform_group or transforms, not both")
                }
                (None, None) => error(format!("platforms.{}", name), "must set transform_group or transforms"),
                _ => {}
            }

            if !is_positive(platform.base_font_size) {
                error(format!("platforms.{}.base_font_size", name), "must be positive");
            }

            if platform.files.is_empty() {
                error(format!("platforms.{}.files", name), "must contain at least one file");
            }

            for (i, file) in platform.files.iter().enumerate() {
                if file.destination.trim().is_empty() {
                    error(format!("platforms.{}.files[{}].destination", name, i), "must be a non-empty path");
                }
                if file.format.trim().is_empty() {
                    error(format!("platforms.{}.files[{}].format", name, i), "must name a format");
                }
                if file.options.base_font_size.is_some_and(|b| !is_positive(b)) {
                    error(format!("platforms.{}.files[{}].options.baseFontSize", name, i), "must be positive");
                }
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
