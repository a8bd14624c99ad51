//! Build context containing configuration and state for a build.

use crate::config::{PlatformConfig, TokensConfig};
use std::path::{Path, PathBuf};

/// Build context containing configuration and paths for a build operation.
///
/// The context carries everything a run needs besides the registries: the
/// loaded configuration, where relative paths are anchored, which platforms
/// to build and the timestamp stamped into generated headers.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The loaded configuration
    config: TokensConfig,
    /// Project root directory (where tokens.toml is located)
    project_root: PathBuf,
    /// Optional filter to build specific platforms only
    platform_filter: Option<Vec<String>>,
    /// Generation timestamp for file headers; `None` keeps output reproducible
    timestamp: Option<String>,
}

impl BuildContext {
    /// Create a new build context.
    ///
    /// # Arguments
    /// - `config` - The loaded configuration
    /// - `project_root` - The project root directory
    pub fn new(config: TokensConfig, project_root: PathBuf) -> Self {
        Self { config, project_root, platform_filter: None, timestamp: None }
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokensConfig {
        &self.config
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the output directory (resolved to absolute path).
    pub fn out_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.project.out)
    }

    /// Directory a platform writes its files into.
    pub fn platform_dir(&self, platform: &PlatformConfig) -> PathBuf {
        self.out_dir().join(&platform.build_path)
    }

    /// Set platform filter to build only specific platforms.
    ///
    /// An empty list clears the filter.
    pub fn with_filter(mut self, platforms: Vec<String>) -> Self {
        self.platform_filter = if platforms.is_empty() { None } else { Some(platforms) };
        self
    }

    /// Get the platform filter.
    pub fn platform_filter(&self) -> Option<&[String]> {
        self.platform_filter.as_deref()
    }

    /// Set the generation timestamp written into file headers.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Platform names from the filter that the configuration does not define.
    pub fn unknown_platforms(&self) -> Vec<String> {
        self.platform_filter
            .iter()
            .flatten()
            .filter(|name| !self.config.platforms.contains_key(name.as_str()))
            .cloned()
            .collect()
    }

    /// Platforms selected for this run, sorted by name.
    pub fn selected_platforms(&self) -> impl Iterator<Item = (&String, &PlatformConfig)> {
        self.config.platforms.iter().filter(move |(name, _)| match &self.platform_filter {
            Some(filter) => filter.iter().any(|f| f == *name),
            None => true,
        })
    }

    /// Resolve a path relative to the project root.
    ///
    /// If the path is absolute, returns it unchanged.
    /// If relative, joins it with the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        crate::config::resolve_path(&self.project_root, path)
    }
}
