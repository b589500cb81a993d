//! Port interfaces for the generation domain

use openapiv3::OpenAPI;
use std::path::Path;

use crate::generation::{
    Artifact, ArtifactSpec, GenerationError, RenderModel, Violation, WriteOutcome,
};

/// Renders one artifact's template against the model
pub trait TemplateRenderer: Send + Sync {
    /// Render the artifact, provenance header included
    fn render(&self, spec: &ArtifactSpec, model: &RenderModel) -> Result<String, GenerationError>;
}

/// Normalizes rendered source before it is written
pub trait SourceFormatter: Send + Sync {
    /// Format `source` destined for `path`
    fn format(&self, path: &Path, source: String) -> Result<String, GenerationError>;
}

/// Checks a document against the RPC convention before generation
pub trait SpecValidator: Send + Sync {
    /// Every violation found; empty means the document may be generated from
    fn validate(&self, spec: &OpenAPI) -> Vec<Violation>;
}

/// Persists rendered artifacts according to their write policy
pub trait ArtifactWriter: Send + Sync {
    fn write(&self, artifact: &Artifact) -> Result<WriteOutcome, GenerationError>;
}

/// Loads OpenAPI specifications
pub trait OpenApiLoader: Send + Sync {
    /// Load and parse the document at `path`
    fn load(&self, path: &Path) -> Result<OpenAPI, GenerationError>;
}
