//! Build pipeline orchestration.
//!
//! The pipeline loads the source tree once, then runs every selected
//! platform against it: resolve transforms and formats, transform, filter,
//! render, write. A platform that fails is recorded and the next one runs.

use crate::build::{load_sources, BuildContext, BuildResult, DiscoveryError, PlatformResult};
use crate::config::{ConfigError, FileConfig, PlatformConfig};
use crate::formats::{Format, FormatError, FormatRegistry};
use crate::models::{TokenTree, TransformedToken};
use crate::transforms::{apply_transforms, ResolvedGroup, TransformError, TransformOptions, TransformRegistry};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Run-level build error. Nothing was built.
#[derive(Debug, Error)]
pub enum BuildError {
    /// tokens.toml could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Sources could not be found or loaded
    #[error("Source error: {0}")]
    Source(#[from] DiscoveryError),
    /// `--platform` named platforms the configuration does not define
    #[error("Unknown platform(s): {}", .0.join(", "))]
    UnknownPlatform(Vec<String>),
    /// A platform failed while rendering in memory
    #[error("Platform '{platform}' failed: {source}")]
    Platform {
        platform: String,
        #[source]
        source: PlatformError,
    },
}

/// Why a single platform failed.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Neither a transform group nor a transform list is configured
    #[error("no transform group or transform list configured")]
    NoTransforms,
    /// Unknown transform or group, or an unresolvable alias
    #[error(transparent)]
    Transform(#[from] TransformError),
    /// Unknown format or a render failure
    #[error("{destination}: {source}")]
    Format {
        destination: String,
        #[source]
        source: FormatError,
    },
    /// Writing an artifact failed
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One rendered output file, not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub platform: String,
    /// Destination as configured, relative to the platform build path
    pub destination: String,
    pub format: String,
    /// Absolute output path
    pub path: PathBuf,
    pub contents: String,
    /// Tokens rendered into this file after filtering
    pub token_count: usize,
}

/// Build pipeline for executing builds.
pub struct BuildPipeline {
    /// Build context
    context: BuildContext,
    transforms: TransformRegistry,
    formats: FormatRegistry,
    /// Whether to stop on first failed platform
    fail_fast: bool,
    /// Whether to do a dry run (render but don't write)
    dry_run: bool,
}

impl BuildPipeline {
    /// Create a new build pipeline with explicit registries.
    pub fn new(context: BuildContext, transforms: TransformRegistry, formats: FormatRegistry) -> Self {
        Self { context, transforms, formats, fail_fast: false, dry_run: false }
    }

    /// Pipeline using the built-in transforms and formats.
    pub fn with_builtins(context: BuildContext) -> Self {
        Self::new(context, TransformRegistry::with_builtins(), FormatRegistry::with_builtins())
    }

    /// Set fail-fast mode (stop on first failed platform).
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set dry-run mode (render without writing).
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Run the build pipeline.
    ///
    /// Loads the configured sources and builds every selected platform.
    /// Only a source or platform-selection problem is an `Err`; platform
    /// failures are reported in the result.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        self.check_platform_filter()?;

        let source = load_sources(&self.context)?;
        tracing::debug!(
            files = source.files.len(),
            tokens = source.tree.token_count(),
            "source tree ready"
        );

        let mut result = self.build_tree(&source.tree);
        result.sources = source.files;
        result.warnings = source.warnings;
        result.total_duration = start.elapsed();
        Ok(result)
    }

    /// Build every selected platform from an already loaded tree.
    pub fn build_tree(&self, tree: &TokenTree) -> BuildResult {
        let start = Instant::now();
        let mut result = BuildResult::new();

        for (name, platform) in self.context.selected_platforms() {
            let platform_result = self.execute_platform(name, platform, tree);
            let failed = platform_result.status.is_failure();
            result.add_result(platform_result);

            if failed && self.fail_fast {
                break;
            }
        }

        result.with_duration(start.elapsed())
    }

    /// Render every selected platform in memory without writing anything.
    ///
    /// Unlike [`build`](Self::build) the first failing platform aborts.
    pub fn render(&self, tree: &TokenTree) -> Result<Vec<Artifact>, BuildError> {
        self.check_platform_filter()?;

        let mut artifacts = Vec::new();
        for (name, platform) in self.context.selected_platforms() {
            let rendered = self
                .render_platform(name, platform, tree)
                .map_err(|source| BuildError::Platform { platform: name.clone(), source })?;
            artifacts.extend(rendered);
        }
        Ok(artifacts)
    }

    fn check_platform_filter(&self) -> Result<(), BuildError> {
        let unknown = self.context.unknown_platforms();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(BuildError::UnknownPlatform(unknown))
        }
    }

    /// Execute a single platform.
    fn execute_platform(&self, name: &str, platform: &PlatformConfig, tree: &TokenTree) -> PlatformResult {
        let start = Instant::now();
        tracing::debug!(platform = name, "building platform");

        let artifacts = match self.render_platform(name, platform, tree) {
            Ok(artifacts) => artifacts,
            Err(e) => {
                tracing::debug!(platform = name, error = %e, "platform failed");
                return PlatformResult::failed(name.to_string(), e.to_string(), start.elapsed());
            }
        };

        let warnings: Vec<String> = artifacts
            .iter()
            .filter(|a| a.token_count == 0)
            .map(|a| format!("{} has no tokens after filtering", a.destination))
            .collect();

        let outputs: Vec<PathBuf> = artifacts.iter().map(|a| a.path.clone()).collect();

        if self.dry_run {
            return PlatformResult::skipped(name.to_string(), outputs, start.elapsed()).with_warnings(warnings);
        }

        for artifact in &artifacts {
            if let Err(e) = write_artifact(artifact) {
                return PlatformResult::failed(name.to_string(), e.to_string(), start.elapsed());
            }
        }

        PlatformResult::success(name.to_string(), outputs, start.elapsed()).with_warnings(warnings)
    }

    /// Render one platform's files.
    ///
    /// Transforms and formats are resolved before any token is touched so a
    /// misconfigured platform fails without doing work. Files whose options
    /// give the same transform options share one transform pass.
    pub fn render_platform(
        &self,
        name: &str,
        platform: &PlatformConfig,
        tree: &TokenTree,
    ) -> Result<Vec<Artifact>, PlatformError> {
        let group = self.resolve_transforms(platform)?;
        let files = self.resolve_formats(platform)?;

        let tokens = tree.flatten();
        let platform_dir = self.context.platform_dir(platform);
        let mut passes: Vec<(TransformOptions, Vec<TransformedToken>)> = Vec::new();
        let mut artifacts = Vec::with_capacity(files.len());

        for (file, format) in files {
            let transform_options = platform.transform_options(file);
            let pass = match passes.iter().position(|(options, _)| *options == transform_options) {
                Some(pass) => pass,
                None => {
                    let mut transformed = apply_transforms(&tokens, &group, &transform_options)?;
                    if let Some(filter) = &platform.filter {
                        transformed.retain(|t| filter.matches(t));
                    }
                    tracing::debug!(
                        platform = name,
                        group = %group.name,
                        tokens = transformed.len(),
                        base_font_size = transform_options.base_font_size,
                        output_references = transform_options.output_references,
                        "transformed"
                    );
                    passes.push((transform_options, transformed));
                    passes.len() - 1
                }
            };
            let transformed = &passes[pass].1;

            let filtered: Vec<TransformedToken>;
            let selected: &[TransformedToken] = match &file.filter {
                Some(filter) => {
                    filtered = transformed.iter().filter(|t| filter.matches(t)).cloned().collect();
                    &filtered
                }
                None => transformed,
            };

            let mut options = platform.format_options(file);
            options.timestamp = self.context.timestamp().map(str::to_string);
            options.version = Some(self.context.config().project.version.clone());

            let contents = format
                .render(selected, &options)
                .map_err(|source| PlatformError::Format { destination: file.destination.clone(), source })?;

            tracing::debug!(platform = name, file = %file.destination, format = %file.format, "rendered");
            artifacts.push(Artifact {
                platform: name.to_string(),
                destination: file.destination.clone(),
                format: file.format.clone(),
                path: platform_dir.join(&file.destination),
                contents,
                token_count: selected.len(),
            });
        }

        Ok(artifacts)
    }

    fn resolve_transforms(&self, platform: &PlatformConfig) -> Result<ResolvedGroup, PlatformError> {
        match (&platform.transform_group, &platform.transforms) {
            (Some(group), _) => Ok(self.transforms.resolve_group(group)?),
            (None, Some(names)) => Ok(self.transforms.resolve_transforms(names)?),
            (None, None) => Err(PlatformError::NoTransforms),
        }
    }

    fn resolve_formats<'p>(
        &self,
        platform: &'p PlatformConfig,
    ) -> Result<Vec<(&'p FileConfig, Arc<dyn Format>)>, PlatformError> {
        platform
            .files
            .iter()
            .map(|file| {
                self.formats
                    .resolve(&file.format)
                    .map(|format| (file, format))
                    .map_err(|source| PlatformError::Format { destination: file.destination.clone(), source })
            })
            .collect()
    }
}

fn write_artifact(artifact: &Artifact) -> Result<(), PlatformError> {
    let io_err = |source| PlatformError::Io { path: artifact.path.clone(), source };
    if let Some(parent) = artifact.path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(&artifact.path, &artifact.contents).map_err(io_err)?;
    tracing::info!(
        platform = %artifact.platform,
        path = %artifact.path.display(),
        tokens = artifact.token_count,
        "wrote artifact"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::BuildOutcome;
    use crate::config::{default_config, SourceKind, TokenFilter};
    use crate::models::TokenType;
    use tempfile::TempDir;

    const PAYLOAD: &str = r#"{
        "colors": [
            {"key": "c1", "name": "primary/500", "description": "Brand red", "color": {"r": 1, "g": 0, "b": 0, "a": 1}},
            {"key": "c2", "name": "overlay", "color": {"r": 0, "g": 0, "b": 0, "a": 0.5}}
        ],
        "text": [
            {"key": "t1", "name": "heading/h1", "fontFamily": "Inter", "fontSize": 24, "fontWeight": 700, "lineHeightPx": 36}
        ],
        "effects": [
            {"key": "e1", "name": "elevation/1", "effects": [
                {"type": "DROP_SHADOW", "offset": {"x": 0, "y": 2}, "radius": 4, "color": {"r": 0, "g": 0, "b": 0, "a": 0.25}}
            ]}
        ]
    }"#;

    fn create_test_context() -> (TempDir, BuildContext) {
        let temp = TempDir::new().unwrap();
        let config = default_config();
        fs::write(temp.path().join("styles.json"), PAYLOAD).unwrap();
        let ctx = BuildContext::new(config, temp.path().to_path_buf());
        (temp, ctx)
    }

    fn alias_context() -> (TempDir, BuildContext) {
        let temp = TempDir::new().unwrap();
        let mut config = default_config();
        config.source.kind = SourceKind::Tokens;
        config.source.paths = vec!["tokens.json".to_string()];
        fs::write(
            temp.path().join("tokens.json"),
            r##"{
                "colors": {"primary": {"500": {"value": "#FF0000", "type": "color"}}},
                "button": {"bg": {"value": "{colors.primary.500}", "type": "color"}}
            }"##,
        )
        .unwrap();
        let ctx = BuildContext::new(config, temp.path().to_path_buf());
        (temp, ctx)
    }

    #[test]
    fn test_build_pipeline_new() {
        let (_temp, ctx) = create_test_context();
        let pipeline = BuildPipeline::with_builtins(ctx);
        assert!(!pipeline.fail_fast);
        assert!(!pipeline.dry_run);
    }

    #[test]
    fn test_build_pipeline_with_options() {
        let (_temp, ctx) = create_test_context();
        let pipeline = BuildPipeline::with_builtins(ctx).with_fail_fast(true).with_dry_run(true);

        assert!(pipeline.fail_fast);
        assert!(pipeline.dry_run);
    }

    #[test]
    fn test_build_writes_all_platforms() {
        let (temp, ctx) = create_test_context();
        let result = BuildPipeline::with_builtins(ctx).build().unwrap();

        assert_eq!(result.outcome(), BuildOutcome::Succeeded);
        assert_eq!(result.platforms.len(), 5);
        assert_eq!(result.all_outputs().len(), 9);
        assert_eq!(result.sources, vec![temp.path().join("styles.json")]);

        let css = fs::read_to_string(temp.path().join("build/css/variables.css")).unwrap();
        assert!(css.starts_with("/**\n * Do not edit directly\n */\n\n:root {\n"));
        assert!(css.contains("  --primary-500: #FF0000; /* Brand red */\n"));
        assert!(css.contains("  --overlay: rgba(0, 0, 0, 0.5);\n"));
        assert!(css.contains(": 1.500rem;"));

        assert!(temp.path().join("build/js/tokens.d.ts").exists());
        assert!(temp.path().join("build/docs/index.html").exists());
    }

    #[test]
    fn test_platforms_built_in_name_order() {
        let (_temp, ctx) = create_test_context();
        let result = BuildPipeline::with_builtins(ctx).with_dry_run(true).build().unwrap();
        let names: Vec<&str> = result.platforms.iter().map(|p| p.platform.as_str()).collect();
        assert_eq!(names, vec!["css", "docs", "js", "json", "scss"]);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (temp, ctx) = create_test_context();
        let result = BuildPipeline::with_builtins(ctx).with_dry_run(true).build().unwrap();

        assert!(result.is_success());
        assert_eq!(result.skipped_count(), 5);
        assert_eq!(result.all_outputs().len(), 9);
        assert!(!temp.path().join("build").exists());
    }

    #[test]
    fn test_unknown_format_isolated_to_platform() {
        let (temp, mut ctx) = create_test_context();
        let mut config = ctx.config().clone();
        config.platforms.get_mut("json").unwrap().files[0].format = "json/nope".to_string();
        ctx = BuildContext::new(config, temp.path().to_path_buf());

        let result = BuildPipeline::with_builtins(ctx).build().unwrap();
        assert_eq!(
            result.outcome(),
            BuildOutcome::PartiallySucceeded { failed: vec!["json".to_string()] }
        );
        assert!(temp.path().join("build/css/variables.css").exists());
        // formats resolve before rendering, so nothing from json was written
        assert!(!temp.path().join("build/json").exists());

        let failure = &result.failures()[0];
        assert_eq!(failure.status.to_string(), "failed: tokens.json: unknown format: json/nope");
    }

    #[test]
    fn test_unknown_group_fails_platform() {
        let (temp, ctx) = create_test_context();
        let mut config = ctx.config().clone();
        config.platforms.get_mut("css").unwrap().transform_group = Some("android".to_string());
        let ctx = BuildContext::new(config, temp.path().to_path_buf()).with_filter(vec!["css".to_string()]);

        let result = BuildPipeline::with_builtins(ctx).build().unwrap();
        assert_eq!(result.outcome(), BuildOutcome::Failed);
    }

    #[test]
    fn test_fail_fast_stops_after_first_failure() {
        let (temp, ctx) = create_test_context();
        let mut config = ctx.config().clone();
        config.platforms.get_mut("css").unwrap().transform_group = Some("android".to_string());
        let ctx = BuildContext::new(config, temp.path().to_path_buf());

        let result = BuildPipeline::with_builtins(ctx).with_fail_fast(true).build().unwrap();
        assert_eq!(result.platforms.len(), 1);
        assert_eq!(result.failed_count(), 1);
    }

    #[test]
    fn test_platform_filter() {
        let (temp, ctx) = create_test_context();
        let ctx = ctx.with_filter(vec!["scss".to_string()]);
        let result = BuildPipeline::with_builtins(ctx).build().unwrap();

        assert_eq!(result.platforms.len(), 1);
        assert!(temp.path().join("build/scss/_variables.scss").exists());
        assert!(!temp.path().join("build/css").exists());
    }

    #[test]
    fn test_unknown_platform_filter_is_run_error() {
        let (_temp, ctx) = create_test_context();
        let ctx = ctx.with_filter(vec!["android".to_string()]);
        let err = BuildPipeline::with_builtins(ctx).build().unwrap_err();
        assert_eq!(err.to_string(), "Unknown platform(s): android");
    }

    #[test]
    fn test_missing_source_is_run_error() {
        let temp = TempDir::new().unwrap();
        let ctx = BuildContext::new(default_config(), temp.path().to_path_buf());
        let err = BuildPipeline::with_builtins(ctx).build().unwrap_err();
        assert!(matches!(err, BuildError::Source(DiscoveryError::NoSources(_))));
    }

    #[test]
    fn test_render_in_memory() {
        let (temp, ctx) = alias_context();
        let pipeline = BuildPipeline::with_builtins(ctx.with_filter(vec!["css".to_string()]));
        let tree = load_sources(pipeline.context()).unwrap().tree;

        let artifacts = pipeline.render(&tree).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].path, temp.path().join("build/css/variables.css"));
        assert!(artifacts[0].contents.contains("  --button-bg: var(--colors-primary-500);"));
        assert!(!temp.path().join("build").exists());
    }

    #[test]
    fn test_file_output_references_off_prints_resolved() {
        let (temp, ctx) = alias_context();
        let mut config = ctx.config().clone();
        config.platforms.get_mut("css").unwrap().files[0].options.output_references = Some(false);
        let ctx = BuildContext::new(config, temp.path().to_path_buf()).with_filter(vec!["css".to_string()]);

        let pipeline = BuildPipeline::with_builtins(ctx);
        let tree = load_sources(pipeline.context()).unwrap().tree;
        let artifacts = pipeline.render(&tree).unwrap();
        assert!(artifacts[0].contents.contains("  --button-bg: #FF0000;"));
    }

    #[test]
    fn test_file_output_references_on_overrides_platform() {
        let (temp, ctx) = alias_context();
        let mut config = ctx.config().clone();
        let css = config.platforms.get_mut("css").unwrap();
        css.output_references = false;
        css.files[0].options.output_references = Some(true);
        css.files.push(FileConfig::new("resolved.css", "css/variables"));
        let ctx = BuildContext::new(config, temp.path().to_path_buf()).with_filter(vec!["css".to_string()]);

        let pipeline = BuildPipeline::with_builtins(ctx);
        let tree = load_sources(pipeline.context()).unwrap().tree;
        let artifacts = pipeline.render(&tree).unwrap();
        assert!(artifacts[0].contents.contains("  --button-bg: var(--colors-primary-500);"));
        assert!(artifacts[1].contents.contains("  --button-bg: #FF0000;"));
    }

    #[test]
    fn test_file_base_font_size_drives_rem_conversion() {
        let temp = TempDir::new().unwrap();
        let mut config = default_config();
        config.source.kind = SourceKind::Tokens;
        config.source.paths = vec!["tokens.json".to_string()];
        fs::write(temp.path().join("tokens.json"), r#"{"space": {"md": {"value": "20px", "type": "dimension"}}}"#)
            .unwrap();
        let css = config.platforms.get_mut("css").unwrap();
        css.files[0].options.base_font_size = Some(10.0);
        css.files.push(FileConfig::new("default.css", "css/variables"));
        let ctx = BuildContext::new(config, temp.path().to_path_buf()).with_filter(vec!["css".to_string()]);

        let pipeline = BuildPipeline::with_builtins(ctx);
        let tree = load_sources(pipeline.context()).unwrap().tree;
        let artifacts = pipeline.render(&tree).unwrap();
        assert!(artifacts[0].contents.contains("  --space-md: 2.000rem;"));
        // the platform base of 16 still applies to files without an override
        assert!(artifacts[1].contents.contains("  --space-md: 1.250rem;"));
    }

    #[test]
    fn test_unresolved_alias_fails_render() {
        let temp = TempDir::new().unwrap();
        let mut config = default_config();
        config.source.kind = SourceKind::Tokens;
        config.source.paths = vec!["tokens.json".to_string()];
        fs::write(
            temp.path().join("tokens.json"),
            r#"{"button": {"bg": {"value": "{colors.missing}", "type": "color"}}}"#,
        )
        .unwrap();
        let ctx = BuildContext::new(config, temp.path().to_path_buf()).with_filter(vec!["css".to_string()]);

        let pipeline = BuildPipeline::with_builtins(ctx);
        let tree = load_sources(pipeline.context()).unwrap().tree;
        let err = pipeline.render(&tree).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Platform { source: PlatformError::Transform(TransformError::UnresolvedReference { .. }), .. }
        ));
    }

    #[test]
    fn test_file_filter_and_empty_warning() {
        let (temp, ctx) = create_test_context();
        let mut config = ctx.config().clone();
        let css = config.platforms.get_mut("css").unwrap();
        css.files.push(FileConfig {
            filter: Some(TokenFilter { token_type: Some(TokenType::Color), ..Default::default() }),
            ..FileConfig::new("colors.css", "css/variables")
        });
        css.files.push(FileConfig {
            filter: Some(TokenFilter { path_prefix: Some("nothing.here".to_string()), ..Default::default() }),
            ..FileConfig::new("empty.css", "css/variables")
        });
        let ctx = BuildContext::new(config, temp.path().to_path_buf()).with_filter(vec!["css".to_string()]);

        let result = BuildPipeline::with_builtins(ctx).build().unwrap();
        assert!(result.is_success());
        assert_eq!(result.platforms[0].warnings, vec!["empty.css has no tokens after filtering"]);

        let colors = fs::read_to_string(temp.path().join("build/css/colors.css")).unwrap();
        assert_eq!(colors.matches("  --").count(), 2);
    }

    #[test]
    fn test_timestamp_in_header() {
        let (temp, ctx) = create_test_context();
        let ctx = ctx.with_filter(vec!["css".to_string()]).with_timestamp("2026-10-18T09:30:00Z");
        BuildPipeline::with_builtins(ctx).build().unwrap();

        let css = fs::read_to_string(temp.path().join("build/css/variables.css")).unwrap();
        assert!(css.contains(" * Generated on 2026-10-18T09:30:00Z\n"));
    }
}
