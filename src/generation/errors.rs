//! Error types for the generation domain

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which side of an operation a schema belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaLocation {
    Request,
    Response,
}

impl fmt::Display for SchemaLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaLocation::Request => write!(f, "request"),
            SchemaLocation::Response => write!(f, "response"),
        }
    }
}

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Module declaration not found: {0}")]
    ModuleNotFound(String),

    #[error("Invalid RPC path '{path}': expected /v<N>/<subject>.<method>")]
    InvalidPathFormat { path: String },

    #[error(
        "Operation {path} declares an inline {location} schema; use a named schema under #/components/schemas"
    )]
    UnsupportedInlineSchema {
        path: String,
        location: SchemaLocation,
    },

    #[error("Render error in {artifact}: {message}")]
    RenderFailure { artifact: String, message: String },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("OpenAPI loading error: {0}")]
    LoadError(String),
}

impl GenerationError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new render failure for the named artifact
    pub fn render<A: Into<String>, M: Into<String>>(artifact: A, message: M) -> Self {
        Self::RenderFailure {
            artifact: artifact.into(),
            message: message.into(),
        }
    }

    /// Whether the error stops the whole run
    ///
    /// Malformed paths only drop the offending operation.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GenerationError::InvalidPathFormat { .. })
    }
}
