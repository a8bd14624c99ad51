//! Watch mode for automatic rebuilds on file changes
//!
//! Provides file system watching with debouncing for the
//! `tokenforge build --watch` command.

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::build::{BuildContext, BuildError, BuildResult};
use crate::config::{WatchConfig, CONFIG_FILE_NAME};

/// Error during watch mode
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize file watcher
    #[error("Failed to initialize file watcher: {0}")]
    WatcherInit(#[source] notify::Error),
    /// Failed to add watch path
    #[error("Failed to watch {}: {source}", path.display())]
    WatchPath {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
    /// Channel receive error
    #[error("Watch channel error: {0}")]
    ChannelError(String),
    /// None of the watch directories exist
    #[error("Nothing to watch: no source directory exists")]
    NothingToWatch,
}

/// Options for watch mode
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Directories to watch recursively
    pub dirs: Vec<PathBuf>,
    /// Changes under these paths never trigger a rebuild
    pub ignore: Vec<PathBuf>,
    /// Watch configuration (debounce, clear screen)
    pub config: WatchConfig,
}

impl WatchOptions {
    /// Watch the project root plus every directory a source pattern can
    /// match in; ignore the output directory.
    pub fn from_context(ctx: &BuildContext) -> Self {
        let mut dirs = vec![ctx.project_root().to_path_buf()];
        dirs.extend(ctx.config().source.paths.iter().map(|p| ctx.resolve_path(&pattern_root(p))));

        Self { dirs: collapse_dirs(dirs), ignore: vec![ctx.out_dir()], config: ctx.config().watch.clone() }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignore.iter().any(|dir| path.starts_with(dir))
    }
}

/// Longest literal directory prefix of a glob pattern.
pub fn pattern_root(pattern: &str) -> PathBuf {
    let components: Vec<_> = Path::new(pattern).components().collect();
    let mut root = PathBuf::new();
    for (i, component) in components.iter().enumerate() {
        let is_last = i + 1 == components.len();
        if is_last || component.as_os_str().to_string_lossy().contains(['*', '?', '[', '{']) {
            break;
        }
        root.push(component);
    }
    root
}

/// Sort, dedupe and drop directories already covered by a parent.
fn collapse_dirs(mut dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    dirs.sort();
    dirs.dedup();
    let mut kept: Vec<PathBuf> = Vec::new();
    for dir in dirs {
        if !kept.iter().any(|parent| dir.starts_with(parent)) {
            kept.push(dir);
        }
    }
    kept
}

/// Clear the terminal screen
fn clear_screen() {
    // ANSI escape code to clear screen and move cursor to top-left
    print!("\x1B[2J\x1B[1;1H");
}

/// Format duration for display
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Get current local time for console lines
fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Check if a file is relevant for rebuilding
pub fn is_relevant_file(path: &Path) -> bool {
    if path.file_name().is_some_and(|n| n == CONFIG_FILE_NAME) {
        return true;
    }
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "json" | "json5" | "toml")
        }
        None => false,
    }
}

/// Watch for file changes and rebuild automatically.
///
/// `rebuild` runs once on startup and again after each batch of relevant
/// changes. It is expected to reload configuration itself so that edits
/// to `tokens.toml` take effect. Failed builds are reported and watching
/// continues.
///
/// This function blocks until the watcher channel closes.
pub fn watch_and_rebuild<F>(options: WatchOptions, mut rebuild: F) -> Result<(), WatchError>
where
    F: FnMut() -> Result<BuildResult, BuildError>,
{
    let dirs: Vec<&PathBuf> = options.dirs.iter().filter(|d| d.is_dir()).collect();
    if dirs.is_empty() {
        return Err(WatchError::NothingToWatch);
    }

    let (tx, rx) = channel();

    let debounce_duration = Duration::from_millis(u64::from(options.config.debounce_ms));
    let mut debouncer = new_debouncer(debounce_duration, tx).map_err(WatchError::WatcherInit)?;

    for dir in &dirs {
        debouncer
            .watcher()
            .watch(dir, RecursiveMode::Recursive)
            .map_err(|source| WatchError::WatchPath { path: dir.to_path_buf(), source })?;
        tracing::debug!(dir = %dir.display(), "watching");
    }

    let run = |rebuild: &mut F| {
        if options.config.clear_screen {
            clear_screen();
        }
        println!("[{}] Building...", timestamp());
        let start = Instant::now();
        print_build_result(rebuild(), start.elapsed());
        println!("[{}] Watching for changes...", timestamp());
    };

    run(&mut rebuild);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        matches!(e.kind, DebouncedEventKind::Any)
                            && is_relevant_file(&e.path)
                            && !options.is_ignored(&e.path)
                    })
                    .collect();

                if relevant.is_empty() {
                    continue;
                }
                for event in &relevant {
                    if let Some(name) = event.path.file_name() {
                        println!("[{}] Changed: {}", timestamp(), name.to_string_lossy());
                    }
                }
                run(&mut rebuild);
            }
            Ok(Err(error)) => {
                eprintln!("[{}] Watch error: {:?}", timestamp(), error);
                eprintln!("[{}] Continuing to watch...", timestamp());
            }
            Err(e) => {
                return Err(WatchError::ChannelError(e.to_string()));
            }
        }
    }
}

fn print_build_result(result: Result<BuildResult, BuildError>, elapsed: Duration) {
    match result {
        Ok(result) if result.is_success() => {
            println!(
                "[{}] Build complete ({}) - Platforms: {} | Files: {}",
                timestamp(),
                format_duration(elapsed),
                result.platforms.len(),
                result.all_outputs().len()
            );
            for warning in result.all_warnings() {
                eprintln!("[{}] Warning: {}", timestamp(), warning);
            }
        }
        Ok(result) => {
            println!("[{}] Build failed ({})", timestamp(), format_duration(elapsed));
            eprintln!("{}", result.summary());
        }
        Err(e) => {
            eprintln!("[{}] Error: {}", timestamp(), e);
        }
    }
}
