//! Application layer error types

use thiserror::Error;

use crate::generation::{GenerationError, Violation};

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Specification violates the RPC convention ({count} violations)", count = .violations.len())]
    SpecRejected { violations: Vec<Violation> },
}

impl ApplicationError {
    /// Violations behind a rejection, empty for every other error
    pub fn violations(&self) -> &[Violation] {
        match self {
            ApplicationError::SpecRejected { violations } => violations,
            ApplicationError::Generation(_) => &[],
        }
    }
}
