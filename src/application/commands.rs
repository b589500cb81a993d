//! Data Transfer Objects for application layer

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

use crate::config::{ConfigOverrides, Defaults};
use crate::generation::{GenerationResult, WriteOutcome};

/// Request to generate artifacts from one specification
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub spec_path: PathBuf,
    pub overrides: ConfigOverrides,
    pub defaults: Defaults,
    /// Explicit settings file; otherwise `oasrpc.toml` is searched for
    pub settings_path: Option<PathBuf>,
    pub skip_validation: bool,
    /// Shared by every artifact header of the run
    pub generated_at: DateTime<Utc>,
}

impl GenerateRequest {
    pub fn new(spec_path: impl Into<PathBuf>, generated_at: DateTime<Utc>) -> Self {
        Self {
            spec_path: spec_path.into(),
            overrides: ConfigOverrides::default(),
            defaults: Defaults::default(),
            settings_path: None,
            skip_validation: false,
            generated_at,
        }
    }
}

/// Outcome of a generate run
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub module_root: PathBuf,
    pub result: GenerationResult,
}

impl GenerateReport {
    fn count(&self, outcome: WriteOutcome) -> usize {
        self.result
            .artifacts
            .iter()
            .filter(|a| a.outcome == outcome)
            .count()
    }
}

impl fmt::Display for GenerateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for artifact in &self.result.artifacts {
            let shown = artifact
                .path
                .strip_prefix(&self.module_root)
                .unwrap_or(&artifact.path);
            writeln!(f, "{:>11}  {}", artifact.outcome, shown.display())?;
        }
        write!(
            f,
            "{} operations ({} paginated): {} written ({} created, {} overwritten), {} skipped",
            self.result.operation_count,
            self.result.list_operation_count,
            self.result.written(),
            self.count(WriteOutcome::Created),
            self.count(WriteOutcome::Overwritten),
            self.count(WriteOutcome::Skipped),
        )
    }
}
