//! Filesystem-based artifact writers

use std::fs;

use crate::generation::{Artifact, ArtifactWriter, GenerationError, WriteOutcome, WritePolicy};

/// Decides what writing `artifact` would do, without touching the disk
pub fn planned_outcome(artifact: &Artifact) -> WriteOutcome {
    match (artifact.path.exists(), artifact.policy) {
        (false, _) => WriteOutcome::Created,
        (true, WritePolicy::SkipIfExists) => WriteOutcome::Skipped,
        (true, WritePolicy::Overwrite) => WriteOutcome::Overwritten,
    }
}

/// Writes artifacts to the filesystem, honoring their write policy
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactWriter for FileSystemOutputService {
    fn write(&self, artifact: &Artifact) -> Result<WriteOutcome, GenerationError> {
        let outcome = planned_outcome(artifact);
        if outcome == WriteOutcome::Skipped {
            return Ok(outcome);
        }

        let failure = |source| GenerationError::WriteFailure {
            path: artifact.path.clone(),
            source,
        };

        // Create parent directory if needed
        if let Some(parent) = artifact.path.parent() {
            fs::create_dir_all(parent).map_err(failure)?;
        }
        fs::write(&artifact.path, artifact.content.as_bytes()).map_err(failure)?;

        Ok(outcome)
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Reports what would be written while leaving the filesystem alone
pub struct DryRunOutput;

impl DryRunOutput {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactWriter for DryRunOutput {
    fn write(&self, artifact: &Artifact) -> Result<WriteOutcome, GenerationError> {
        Ok(planned_outcome(artifact))
    }
}

impl Default for DryRunOutput {
    fn default() -> Self {
        Self::new()
    }
}
