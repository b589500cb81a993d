//! Core types for the generation domain

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::generation::WritePolicy;

/// A path of the form `/v<N>/<subject>.<method>` split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcPath {
    /// Version segment including the `v` prefix, e.g. `v1`
    pub version: String,
    pub subject: String,
    pub method: String,
}

/// One RPC extracted from a POST path entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    /// Canonical identifier, e.g. `UsersCreate`
    pub method_name: String,
    /// Source path, e.g. `/v1/users.create`
    pub path: String,
    /// Protocol constant identifier, e.g. `RPCUsersCreate`
    pub const_name: String,
    pub summary: String,
    /// Named schema of the request body
    pub request_type: String,
    /// Named schema of the success response body
    pub response_type: String,
}

/// An operation that passed the pagination heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListOperation {
    #[serde(flatten)]
    pub operation: Operation,
    pub iterator_name: String,
    pub fetcher_name: String,
    pub item_type: String,
    /// Response field holding the page of items, capitalized
    pub response_field: String,
}

/// A rendered artifact ready to be written
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: &'static str,
    pub path: PathBuf,
    pub content: String,
    pub policy: WritePolicy,
}

/// What happened (or would happen) to an artifact on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    Skipped,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            WriteOutcome::Created => "created",
            WriteOutcome::Overwritten => "overwritten",
            WriteOutcome::Skipped => "skipped",
        })
    }
}

/// Per-artifact entry of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOutcome {
    pub name: &'static str,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Result of generation
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    pub artifacts: Vec<ArtifactOutcome>,
    pub operation_count: usize,
    pub list_operation_count: usize,
    pub generated_at: String,
}

impl GenerationResult {
    /// Number of artifacts that reached the disk
    pub fn written(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.outcome != WriteOutcome::Skipped)
            .count()
    }
}
