//! Build command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::build::{BuildContext, BuildOutcome, BuildPipeline};
use crate::config::{default_config, find_config, load_config, merge_cli_overrides, CliOverrides, ConfigError};

/// Flags of `tokenforge build`.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub platforms: Vec<String>,
    pub dry_run: bool,
    pub no_timestamp: bool,
    pub fail_fast: bool,
}

/// Load the config and assemble the build context for one run.
fn prepare_context(args: &BuildArgs) -> Result<BuildContext, ConfigError> {
    let config_path = args.config.clone().or_else(find_config);

    let (mut config, project_root) = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using config");
            let config = load_config(Some(&path))?;
            let root = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (config, root)
        }
        None => {
            tracing::debug!("no tokens.toml found, using defaults");
            (default_config(), std::env::current_dir()?)
        }
    };

    let overrides = CliOverrides { out: args.out.clone(), platforms: args.platforms.clone() };
    merge_cli_overrides(&mut config, &overrides);

    let mut context = BuildContext::new(config, project_root).with_filter(overrides.platforms);
    if !args.no_timestamp {
        context = context.with_timestamp(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true));
    }
    Ok(context)
}

/// Run the build command
pub fn run_build(args: BuildArgs) -> ExitCode {
    let context = match prepare_context(&args) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if args.dry_run {
        println!("Dry run - would write:");
    }

    let pipeline = BuildPipeline::with_builtins(context).with_fail_fast(args.fail_fast).with_dry_run(args.dry_run);
    match pipeline.build() {
        Ok(result) => {
            if args.dry_run {
                for output in result.all_outputs() {
                    println!("  {}", output.display());
                }
            }
            match result.outcome() {
                BuildOutcome::Succeeded => {
                    println!("{}", result.summary());
                    ExitCode::from(EXIT_SUCCESS)
                }
                BuildOutcome::PartiallySucceeded { .. } | BuildOutcome::Failed => {
                    eprintln!("{}", result.summary());
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
        Err(e) => {
            eprintln!("Build error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run the build command in watch mode
#[cfg(feature = "watch")]
pub fn run_watch(args: BuildArgs) -> ExitCode {
    use crate::build::{BuildError, BuildResult};
    use crate::watch::{watch_and_rebuild, WatchOptions};

    let context = match prepare_context(&args) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    println!("Starting watch mode...");
    println!("Press Ctrl+C to stop");
    println!();

    let options = WatchOptions::from_context(&context);
    // Config is reloaded on every rebuild so edits to tokens.toml apply.
    let rebuild = || -> Result<BuildResult, BuildError> {
        let context = prepare_context(&args)?;
        BuildPipeline::with_builtins(context).with_fail_fast(args.fail_fast).with_dry_run(args.dry_run).build()
    };

    match watch_and_rebuild(options, rebuild) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Watch error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
