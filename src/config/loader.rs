//! Configuration loading and discovery for `tokens.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{
    FileConfig, PlatformConfig, ProjectConfig, SourceConfig, TokensConfig, WatchConfig,
};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "tokens.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse tokens.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Build only these platforms
    pub platforms: Vec<String>,
}

/// Find tokens.toml by walking up from the current working directory.
///
/// # Returns
/// - `Some(path)` if a tokens.toml file is found
/// - `None` if no config file is found
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find tokens.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a tokens.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns a default
/// configuration.
///
/// # Example
/// ```ignore
/// // Load from discovered config
/// let config = load_config(None)?;
///
/// // Load from specific path
/// let config = load_config(Some(Path::new("design/tokens.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<TokensConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            tracing::debug!("no {} found, using default config", CONFIG_FILE_NAME);
            Ok(default_config())
        }
    }
}

/// Load configuration from a specific file path.
pub fn load_config_file(path: &Path) -> Result<TokensConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), platforms = config.platforms.len(), "loaded config");
    Ok(config)
}

/// Parse and validate configuration text.
pub fn parse_config(contents: &str) -> Result<TokensConfig, ConfigError> {
    let config: TokensConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Create a default configuration when no tokens.toml is found.
///
/// The project is named after the current directory and reads
/// `styles.json` as a provider payload. One platform is configured per
/// built-in transform group.
pub fn default_config() -> TokensConfig {
    let project_name = env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unnamed".to_string());

    let platforms = BTreeMap::from([
        (
            "css".to_string(),
            PlatformConfig::with_group("css", "css").with_file(FileConfig::new("variables.css", "css/variables")),
        ),
        (
            "scss".to_string(),
            PlatformConfig::with_group("scss", "scss").with_file(FileConfig::new("_variables.scss", "scss/variables")),
        ),
        (
            "js".to_string(),
            PlatformConfig::with_group("js", "js")
                .with_file(FileConfig::new("tokens.js", "javascript/es6"))
                .with_file(FileConfig::new("tokens.d.ts", "typescript/es6-declarations")),
        ),
        (
            "json".to_string(),
            PlatformConfig::with_group("json", "json")
                .with_file(FileConfig::new("tokens.json", "json/nested"))
                .with_file(FileConfig::new("tokens.flat.json", "json/flat"))
                .with_file(FileConfig::new("tokens.structured.json", "json/structured")),
        ),
        (
            "docs".to_string(),
            PlatformConfig::with_group("docs", "docs")
                .with_file(FileConfig::new("tokens.md", "markdown/table"))
                .with_file(FileConfig::new("index.html", "html/docs")),
        ),
    ]);

    TokensConfig {
        project: ProjectConfig {
            name: project_name,
            version: "0.1.0".to_string(),
            out: PathBuf::from("build"),
        },
        source: SourceConfig::default(),
        platforms,
        watch: WatchConfig::default(),
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The platform
/// selection is not applied here; the build pipeline filters platforms so
/// that unknown names can be reported.
pub fn merge_cli_overrides(config: &mut TokensConfig, overrides: &CliOverrides) {
    if let Some(ref out) = overrides.out {
        config.project.out = out.clone();
    }
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
