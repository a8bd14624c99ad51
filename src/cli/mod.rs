//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod adapt;
mod build;
mod list;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;

/// tokenforge - Build design tokens for every platform from one source
#[derive(Parser)]
#[command(name = "tokenforge")]
#[command(about = "Turn design-tool style exports into platform token files")]
#[command(version)]
pub struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every configured platform
    Build {
        /// Path to tokens.toml (default: search upward from the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Build only this platform (repeatable)
        #[arg(short, long = "platform", value_name = "NAME")]
        platforms: Vec<String>,

        /// Render without writing any files
        #[arg(long)]
        dry_run: bool,

        /// Leave the generation timestamp out of file headers
        #[arg(long)]
        no_timestamp: bool,

        /// Stop at the first platform that fails
        #[arg(long)]
        fail_fast: bool,

        /// Watch for changes and rebuild automatically
        #[cfg(feature = "watch")]
        #[arg(short, long)]
        watch: bool,
    },

    /// Convert a provider style payload into a canonical token file
    Adapt {
        /// Payload JSON exported from the design tool
        payload: PathBuf,

        /// Output token file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Namespace for color styles
        #[arg(long)]
        color_root: Option<String>,

        /// Namespace for text styles
        #[arg(long)]
        text_root: Option<String>,

        /// Namespace for effect styles
        #[arg(long)]
        effect_root: Option<String>,
    },

    /// List registered transforms, transform groups and formats
    List,
}

/// Install the stderr log subscriber. `warn` by default, `debug` with -v.
fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        #[cfg(feature = "watch")]
        Commands::Build { config, out, platforms, dry_run, no_timestamp, fail_fast, watch } => {
            let args = build::BuildArgs { config, out, platforms, dry_run, no_timestamp, fail_fast };
            if watch {
                build::run_watch(args)
            } else {
                build::run_build(args)
            }
        }
        #[cfg(not(feature = "watch"))]
        Commands::Build { config, out, platforms, dry_run, no_timestamp, fail_fast } => {
            build::run_build(build::BuildArgs { config, out, platforms, dry_run, no_timestamp, fail_fast })
        }
        Commands::Adapt { payload, output, color_root, text_root, effect_root } => {
            let options = crate::adapter::AdapterOptions { color_root, text_root, effect_root };
            adapt::run_adapt(&payload, output.as_deref(), &options)
        }
        Commands::List => list::run_list(),
    }
}
