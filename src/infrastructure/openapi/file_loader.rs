//! File-based OpenAPI spec loader

use openapiv3::OpenAPI;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::generation::{GenerationError, OpenApiLoader};

/// Loads OpenAPI specifications from local files
pub struct FileOpenApiLoader;

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self
    }
}

impl OpenApiLoader for FileOpenApiLoader {
    fn load(&self, path: &Path) -> Result<OpenAPI, GenerationError> {
        let content = fs::read_to_string(path).map_err(|e| {
            GenerationError::LoadError(format!("Failed to read {}: {e}", path.display()))
        })?;

        let extension = path.extension().and_then(|e| e.to_str());
        let spec: OpenAPI = match extension {
            Some("json") => serde_json::from_str(&content).map_err(|e| {
                GenerationError::LoadError(format!("Failed to parse JSON {}: {e}", path.display()))
            })?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
                GenerationError::LoadError(format!("Failed to parse YAML {}: {e}", path.display()))
            })?,
            // Try JSON first, then YAML
            _ => serde_json::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .map_err(|e| {
                    GenerationError::LoadError(format!(
                        "Failed to parse OpenAPI spec {}: {e}",
                        path.display()
                    ))
                })?,
        };

        debug!(
            path = %path.display(),
            title = %spec.info.title,
            paths = spec.paths.paths.len(),
            "Loaded OpenAPI document"
        );
        Ok(spec)
    }
}

impl Default for FileOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const YAML: &str = "openapi: 3.0.3\ninfo:\n  title: Tiny\n  version: 1.0.0\npaths: {}\n";

    #[test]
    fn test_load_yaml_and_json() {
        let dir = TempDir::new().unwrap();
        let yaml = dir.path().join("openapi.yaml");
        fs::write(&yaml, YAML).unwrap();
        let json = dir.path().join("openapi.json");
        fs::write(
            &json,
            r#"{"openapi":"3.0.3","info":{"title":"Tiny","version":"1.0.0"},"paths":{}}"#,
        )
        .unwrap();

        let loader = FileOpenApiLoader::new();
        assert_eq!(loader.load(&yaml).unwrap().info.title, "Tiny");
        assert_eq!(loader.load(&json).unwrap().info.title, "Tiny");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spec.txt");
        fs::write(&path, YAML).unwrap();
        assert!(FileOpenApiLoader::new().load(&path).is_ok());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = TempDir::new().unwrap();
        let err = FileOpenApiLoader::new()
            .load(&dir.path().join("absent.yaml"))
            .unwrap_err();
        assert!(matches!(err, GenerationError::LoadError(_)));
    }

    #[test]
    fn test_malformed_document_is_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "openapi: [unterminated\n").unwrap();
        let err = FileOpenApiLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, GenerationError::LoadError(_)));
    }
}
