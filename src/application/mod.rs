//! Application layer - orchestrates use cases and coordinates between domains

pub mod commands;
pub mod errors;
pub mod generate;

pub use commands::*;
pub use errors::*;
pub use generate::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SETTINGS_FILE;
    use crate::generation::{
        ArtifactSpec, ConventionValidator, GenerationError, GenerationOrchestrator, OpenApiLoader,
        RenderModel, SourceFormatter, TemplateRenderer,
    };
    use crate::infrastructure::DryRunOutput;
    use chrono::{TimeZone, Utc};
    use openapiv3::OpenAPI;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct InlineLoader(&'static str);

    impl OpenApiLoader for InlineLoader {
        fn load(&self, _path: &Path) -> Result<OpenAPI, GenerationError> {
            serde_yaml::from_str(self.0).map_err(|e| GenerationError::LoadError(e.to_string()))
        }
    }

    struct NameRenderer;

    impl TemplateRenderer for NameRenderer {
        fn render(&self, spec: &ArtifactSpec, _: &RenderModel) -> Result<String, GenerationError> {
            Ok(spec.name.to_string())
        }
    }

    struct Identity;

    impl SourceFormatter for Identity {
        fn format(&self, _: &Path, source: String) -> Result<String, GenerationError> {
            Ok(source)
        }
    }

    const MALFORMED: &str = r##"
openapi: 3.0.3
info:
  title: Broken
  version: 1.0.0
paths:
  /users:
    get:
      responses:
        "200":
          description: ok
"##;

    const VALID: &str = r##"
openapi: 3.0.3
info:
  title: Users
  version: 1.0.0
paths:
  /v1/users.create:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/CreateUserRequest"
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/CreateUserResponse"
components:
  schemas:
    CreateUserRequest:
      type: object
    CreateUserResponse:
      type: object
"##;

    fn use_case(doc: &'static str) -> GenerateUseCase {
        let orchestrator = GenerationOrchestrator::new(
            Arc::new(NameRenderer),
            Arc::new(Identity),
            Arc::new(DryRunOutput::new()),
        );
        GenerateUseCase::new(
            Arc::new(InlineLoader(doc)),
            Arc::new(ConventionValidator::new()),
            Arc::new(orchestrator),
        )
    }

    fn request(dir: &Path) -> GenerateRequest {
        let mut request = GenerateRequest::new(
            "openapi.yaml",
            Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap(),
        );
        request.overrides.output_dir = Some(dir.to_path_buf());
        request
    }

    fn module() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join("go.mod"), "module example.com/acme\n").unwrap();
        dir
    }

    #[test]
    fn test_generate_reports_every_artifact() {
        let dir = module();
        let report = use_case(VALID).execute(request(dir.path())).unwrap();
        assert_eq!(report.result.operation_count, 1);
        assert_eq!(report.result.artifacts.len(), 3);
        assert_eq!(report.module_root, fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn test_violations_block_generation() {
        let dir = module();
        let err = use_case(MALFORMED).execute(request(dir.path())).unwrap_err();
        let rules: Vec<&str> = err.violations().iter().map(|v| v.rule).collect();
        assert!(rules.contains(&"path-format"));
        assert!(rules.contains(&"post-only"));
    }

    #[test]
    fn test_skip_validation_generates_from_conforming_operations_only() {
        let dir = module();
        let mut request = request(dir.path());
        request.skip_validation = true;
        let report = use_case(MALFORMED).execute(request).unwrap();
        assert_eq!(report.result.operation_count, 0);
    }

    #[test]
    fn test_settings_file_is_discovered() {
        let dir = module();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            "[generate]\nfull = true\nvendor = \"acme\"\n",
        )
        .unwrap();

        let report = use_case(VALID).execute(request(dir.path())).unwrap();
        assert!(report.result.artifacts.iter().any(|a| a.name == "makefile"));
    }

    #[test]
    fn test_config_errors_surface_as_generation_errors() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut request = request(&dir.path().join("absent"));
        request.overrides.package_name = Some("main".to_string());
        let err = use_case(VALID).execute(request).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Generation(GenerationError::InvalidConfig(_))
        ));
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_validate_use_case() {
        let validate = ValidateUseCase::new(
            Arc::new(InlineLoader(VALID)),
            Arc::new(ConventionValidator::new()),
        );
        assert!(validate.execute(Path::new("openapi.yaml")).unwrap().is_empty());
    }
}
