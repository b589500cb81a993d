//! Generation domain module - turns a parsed specification into artifacts
//!
//! Extraction, naming and list classification produce the operations; the
//! render model and the artifact table drive rendering; the orchestrator runs
//! the linear pipeline against the ports in [`traits`].

pub mod artifacts;
pub mod context;
pub mod convention;
pub mod errors;
pub mod extractor;
pub mod naming;
pub mod orchestrator;
pub mod pagination;
pub mod rules;
pub mod sanitizers;
pub mod schemas;
pub mod traits;
pub mod types;

pub use artifacts::{
    ARTIFACTS, ArtifactLocation, ArtifactSpec, CommentStyle, Condition, Destination, Durability,
    WritePolicy,
};
pub use context::*;
pub use convention::{ConventionValidator, Violation};
pub use errors::*;
pub use orchestrator::*;
pub use traits::*;
pub use types::*;
