//! Source discovery and loading for the build system.
//!
//! Resolves the `[source]` glob patterns against the project root and loads
//! every match into a single token tree, either by adapting provider
//! payloads or by deep-merging canonical token files.

use crate::adapter::adapt_parsed;
use crate::build::BuildContext;
use crate::config::SourceKind;
use crate::models::{PayloadError, StylePayload, TokenTree, TreeError};
use glob::glob;
use std::path::{Path, PathBuf};

/// Error during source discovery or loading.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Invalid glob pattern
    InvalidPattern(String, glob::PatternError),
    /// None of the configured patterns matched a file
    NoSources(Vec<String>),
    /// A payload file could not be read or is not a payload document
    Payload(PathBuf, PayloadError),
    /// A token file could not be read or parsed
    Tree(TreeError),
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::InvalidPattern(pattern, err) => {
                write!(f, "Invalid glob pattern '{}': {}", pattern, err)
            }
            DiscoveryError::NoSources(patterns) => {
                write!(f, "No source files match {}", patterns.join(", "))
            }
            DiscoveryError::Payload(path, err) => write!(f, "{}: {}", path.display(), err),
            DiscoveryError::Tree(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiscoveryError::InvalidPattern(_, err) => Some(err),
            DiscoveryError::Payload(_, err) => Some(err),
            DiscoveryError::Tree(err) => Some(err),
            DiscoveryError::NoSources(_) => None,
        }
    }
}

impl From<TreeError> for DiscoveryError {
    fn from(err: TreeError) -> Self {
        DiscoveryError::Tree(err)
    }
}

/// The token tree a run renders, plus where it came from.
#[derive(Debug, Default)]
pub struct LoadedSource {
    pub tree: TokenTree,
    /// Files that contributed, in load order
    pub files: Vec<PathBuf>,
    /// Adapter warnings and merge collisions
    pub warnings: Vec<String>,
}

/// Discover source files matching a glob pattern.
///
/// # Arguments
/// - `base_dir` - Base directory to resolve patterns from
/// - `pattern` - Glob pattern to match
///
/// # Returns
/// List of matching file paths, sorted.
pub fn discover_files(base_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let full_pattern = base_dir.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let paths =
        glob(&pattern_str).map_err(|e| DiscoveryError::InvalidPattern(pattern.to_string(), e))?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() && is_source_file(&path) {
                    files.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("error reading path: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Check if a path looks like a payload or token file.
pub fn is_source_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("json") | Some("json5"))
}

/// Discover all source files from config patterns.
///
/// Returns a sorted, deduplicated list. Matching nothing is an error: a
/// build without input would silently produce empty artifacts.
pub fn discover_sources(ctx: &BuildContext) -> Result<Vec<PathBuf>, DiscoveryError> {
    let patterns = &ctx.config().source.paths;
    let mut all_files = Vec::new();

    for pattern in patterns {
        all_files.extend(discover_files(ctx.project_root(), pattern)?);
    }

    all_files.sort();
    all_files.dedup();

    if all_files.is_empty() {
        return Err(DiscoveryError::NoSources(patterns.clone()));
    }
    Ok(all_files)
}

/// Discover and load every source into one tree.
///
/// Later files override earlier ones at equal paths; each override is
/// recorded as a warning.
pub fn load_sources(ctx: &BuildContext) -> Result<LoadedSource, DiscoveryError> {
    let files = discover_sources(ctx)?;
    let source = &ctx.config().source;
    let mut loaded = LoadedSource::default();

    for file in &files {
        let tree = match source.kind {
            SourceKind::Payload => {
                let parsed = StylePayload::load(file)
                    .map_err(|e| DiscoveryError::Payload(file.clone(), e))?;
                let adapted = adapt_parsed(&parsed, &source.adapter_options());
                loaded
                    .warnings
                    .extend(adapted.warnings.iter().map(|w| format!("{}: {}", file.display(), w)));
                adapted.tree
            }
            SourceKind::Tokens => TokenTree::load(file)?,
        };

        tracing::debug!(file = %file.display(), tokens = tree.token_count(), "loaded source");

        for path in loaded.tree.merge(tree) {
            tracing::warn!(file = %file.display(), path = %path, "token overrides an earlier source");
            loaded.warnings.push(format!("{}: '{}' overrides an earlier definition", file.display(), path));
        }
    }

    loaded.files = files;
    Ok(loaded)
}
