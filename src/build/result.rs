//! Build result types.
//!
//! Contains types for representing the outcome of build operations.

use std::path::PathBuf;
use std::time::Duration;

/// Status of a single platform build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// Build succeeded
    Success,
    /// Rendered but not written (dry run)
    Skipped,
    /// Build failed with error
    Failed(String),
}

impl BuildStatus {
    /// Check if the status indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Success | BuildStatus::Skipped)
    }

    /// Check if the status indicates failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, BuildStatus::Failed(_))
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStatus::Success => write!(f, "success"),
            BuildStatus::Skipped => write!(f, "skipped"),
            BuildStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of building a single platform.
#[derive(Debug, Clone)]
pub struct PlatformResult {
    /// Platform name from the configuration
    pub platform: String,
    /// Build status
    pub status: BuildStatus,
    /// Files written (or that would be written, on a dry run)
    pub outputs: Vec<PathBuf>,
    /// Build duration
    pub duration: Duration,
    /// Warning messages (if any)
    pub warnings: Vec<String>,
}

impl PlatformResult {
    /// Create a successful result.
    pub fn success(platform: String, outputs: Vec<PathBuf>, duration: Duration) -> Self {
        Self { platform, status: BuildStatus::Success, outputs, duration, warnings: vec![] }
    }

    /// Create a skipped result for a platform that rendered without writing.
    pub fn skipped(platform: String, outputs: Vec<PathBuf>, duration: Duration) -> Self {
        Self { platform, status: BuildStatus::Skipped, outputs, duration, warnings: vec![] }
    }

    /// Create a failed result.
    pub fn failed(platform: String, error: String, duration: Duration) -> Self {
        Self {
            platform,
            status: BuildStatus::Failed(error),
            outputs: vec![],
            duration,
            warnings: vec![],
        }
    }

    /// Add warnings to the result.
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Check if this result is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Overall verdict of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Every selected platform built
    Succeeded,
    /// Some platforms failed; the named ones
    PartiallySucceeded { failed: Vec<String> },
    /// No platform built
    Failed,
}

/// Result of a complete build run.
#[derive(Debug, Default)]
pub struct BuildResult {
    /// Results for each platform, in build order
    pub platforms: Vec<PlatformResult>,
    /// Source files that fed the run
    pub sources: Vec<PathBuf>,
    /// Source-level warnings (adapter skips, merge overrides)
    pub warnings: Vec<String>,
    /// Total build duration
    pub total_duration: Duration,
}

impl BuildResult {
    /// Create a new empty build result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a platform result.
    pub fn add_result(&mut self, result: PlatformResult) {
        self.platforms.push(result);
    }

    /// Set the total duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.total_duration = duration;
        self
    }

    /// Get the number of platforms that wrote their files.
    pub fn success_count(&self) -> usize {
        self.platforms.iter().filter(|r| matches!(r.status, BuildStatus::Success)).count()
    }

    /// Get the number of skipped platforms.
    pub fn skipped_count(&self) -> usize {
        self.platforms.iter().filter(|r| matches!(r.status, BuildStatus::Skipped)).count()
    }

    /// Get the number of failed platforms.
    pub fn failed_count(&self) -> usize {
        self.platforms.iter().filter(|r| r.status.is_failure()).count()
    }

    /// Check if the overall build succeeded (no failures).
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Classify the run.
    ///
    /// A run with no platforms at all counts as succeeded; there was nothing
    /// to fail.
    pub fn outcome(&self) -> BuildOutcome {
        let failed: Vec<String> = self.failures().iter().map(|r| r.platform.clone()).collect();
        if failed.is_empty() {
            BuildOutcome::Succeeded
        } else if failed.len() == self.platforms.len() {
            BuildOutcome::Failed
        } else {
            BuildOutcome::PartiallySucceeded { failed }
        }
    }

    /// Get all outputs produced.
    pub fn all_outputs(&self) -> Vec<&PathBuf> {
        self.platforms.iter().flat_map(|r| r.outputs.iter()).collect()
    }

    /// Get all warnings, source-level first.
    pub fn all_warnings(&self) -> Vec<&String> {
        self.warnings.iter().chain(self.platforms.iter().flat_map(|r| r.warnings.iter())).collect()
    }

    /// Get failed platform results.
    pub fn failures(&self) -> Vec<&PlatformResult> {
        self.platforms.iter().filter(|r| r.status.is_failure()).collect()
    }

    /// Format a summary of the build result.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        let success = self.success_count();
        let skipped = self.skipped_count();
        let failed = self.failed_count();
        let total = self.platforms.len();

        if failed > 0 {
            lines.push(format!(
                "Build failed: {} succeeded, {} skipped, {} failed ({} total)",
                success, skipped, failed, total
            ));
            for platform in self.failures() {
                lines.push(format!("  - {}: {}", platform.platform, platform.status));
            }
        } else {
            lines.push(format!(
                "Build succeeded: {} built, {} skipped ({} total) in {:?}",
                success, skipped, total, self.total_duration
            ));
        }

        let warnings = self.all_warnings();
        if !warnings.is_empty() {
            lines.push(format!("Warnings ({}): ", warnings.len()));
            for warning in warnings.iter().take(5) {
                lines.push(format!("  - {}", warning));
            }
            if warnings.len() > 5 {
                lines.push(format!("  ... and {} more", warnings.len() - 5));
            }
        }

        lines.join("\n")
    }
}
