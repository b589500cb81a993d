//! Generation orchestration - coordinates the generation workflow
//!
//! `Extract (may abort) -> Classify -> Build -> Render -> Write`, one pass,
//! no retry. Every artifact is rendered and formatted before the first write,
//! so extraction and render failures leave the filesystem untouched. A write
//! failure keeps whatever was already written in this run.

use chrono::{DateTime, Utc};
use openapiv3::OpenAPI;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::generation::artifacts;
use crate::generation::extractor::extract_operations;
use crate::generation::pagination::classify_all;
use crate::generation::{
    Artifact, ArtifactOutcome, ArtifactWriter, GenerationError, GenerationResult, RenderModel,
    SourceFormatter, TemplateRenderer,
};

/// Orchestrates the code generation workflow
pub struct GenerationOrchestrator {
    renderer: Arc<dyn TemplateRenderer>,
    formatter: Arc<dyn SourceFormatter>,
    writer: Arc<dyn ArtifactWriter>,
}

impl GenerationOrchestrator {
    /// Create a new generation orchestrator
    pub fn new(
        renderer: Arc<dyn TemplateRenderer>,
        formatter: Arc<dyn SourceFormatter>,
        writer: Arc<dyn ArtifactWriter>,
    ) -> Self {
        Self {
            renderer,
            formatter,
            writer,
        }
    }

    /// Execute the generation workflow
    pub fn generate(
        &self,
        spec: &OpenAPI,
        config: &Config,
        generated_at: DateTime<Utc>,
    ) -> Result<GenerationResult, GenerationError> {
        // 1. Extract; an inline schema aborts here
        let operations = extract_operations(spec)?;

        // 2. Classify
        let list_operations = classify_all(spec, &operations);
        info!(
            operations = operations.len(),
            list_operations = list_operations.len(),
            "Extracted operations"
        );

        // 3. Build the model
        let model = RenderModel::build(config, operations, list_operations, generated_at);

        // 4. Render and format every selected artifact
        let artifacts = self.render_all(&model, config)?;

        // 5. Write
        let mut outcomes = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            let outcome = self.writer.write(artifact)?;
            info!(
                artifact = artifact.name,
                path = %artifact.path.display(),
                outcome = %outcome,
                "Artifact processed"
            );
            outcomes.push(ArtifactOutcome {
                name: artifact.name,
                path: artifact.path.clone(),
                outcome,
            });
        }

        Ok(GenerationResult {
            artifacts: outcomes,
            operation_count: model.operations.len(),
            list_operation_count: model.list_operations.len(),
            generated_at: model.generated_at,
        })
    }

    fn render_all(
        &self,
        model: &RenderModel,
        config: &Config,
    ) -> Result<Vec<Artifact>, GenerationError> {
        artifacts::selected(model)
            .map(|spec| {
                let path = spec.target_path(config);
                debug!(artifact = spec.name, template = spec.template, "Rendering artifact");
                let rendered = self.renderer.render(spec, model)?;
                let content = self.formatter.format(&path, rendered)?;
                Ok(Artifact {
                    name: spec.name,
                    path,
                    content,
                    policy: spec.policy,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::context::fixtures::config;
    use crate::generation::schemas::fixtures::spec;
    use crate::generation::{ArtifactSpec, WriteOutcome, WritePolicy};
    use chrono::TimeZone;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;

    struct EchoRenderer;

    impl TemplateRenderer for EchoRenderer {
        fn render(
            &self,
            spec: &ArtifactSpec,
            model: &RenderModel,
        ) -> Result<String, GenerationError> {
            if spec.name == "server" && model.package_name == "broken" {
                return Err(GenerationError::render(spec.name, "boom"));
            }
            Ok(format!("{}\n{}\n", spec.header(&model.generated_at), spec.name))
        }
    }

    struct Identity;

    impl SourceFormatter for Identity {
        fn format(&self, _path: &Path, source: String) -> Result<String, GenerationError> {
            Ok(source)
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        written: Mutex<Vec<(String, WritePolicy)>>,
        attempts: Mutex<Vec<&'static str>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingWriter {
        fn failing_on(name: &'static str) -> Self {
            Self {
                fail_on: Some(name),
                ..Default::default()
            }
        }
    }

    impl ArtifactWriter for RecordingWriter {
        fn write(&self, artifact: &Artifact) -> Result<WriteOutcome, GenerationError> {
            self.attempts.lock().unwrap().push(artifact.name);
            if self.fail_on == Some(artifact.name) {
                return Err(GenerationError::WriteFailure {
                    path: artifact.path.clone(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.written
                .lock()
                .unwrap()
                .push((artifact.content.clone(), artifact.policy));
            Ok(WriteOutcome::Created)
        }
    }

    const DOC: &str = r##"
openapi: 3.0.3
info:
  title: Users
  version: 1.0.0
paths:
  /v1/users.list:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/ListUsersRequest"
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/ListUsersResponse"
components:
  schemas:
    ListUsersRequest:
      type: object
      properties:
        offset:
          type: integer
    ListUsersResponse:
      type: object
      properties:
        users:
          type: array
          items:
            $ref: "#/components/schemas/UserResponse"
    UserResponse:
      type: object
"##;

    fn orchestrator(writer: Arc<RecordingWriter>) -> GenerationOrchestrator {
        GenerationOrchestrator::new(Arc::new(EchoRenderer), Arc::new(Identity), writer)
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_pipeline_renders_selected_artifacts() {
        let writer = Arc::new(RecordingWriter::default());
        let result = orchestrator(writer.clone())
            .generate(&spec(DOC), &config(), at())
            .unwrap();

        assert_eq!(result.operation_count, 1);
        assert_eq!(result.list_operation_count, 1);
        let names: Vec<&str> = result.artifacts.iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["client", "server", "pagination", "proto"]);
        assert_eq!(result.generated_at, "2026-10-14T09:30:00Z");

        let written = writer.written.lock().unwrap();
        let header = "// Code generated by oasrpc at 2026-10-14T09:30:00Z. DO NOT EDIT.";
        assert!(written.iter().all(|(content, _)| content.starts_with(header)));
    }

    #[test]
    fn test_inline_schema_writes_nothing() {
        let doc = DOC.replace(
            "              $ref: \"#/components/schemas/ListUsersRequest\"",
            "              type: object",
        );
        let writer = Arc::new(RecordingWriter::default());
        let err = orchestrator(writer.clone())
            .generate(&spec(&doc), &config(), at())
            .unwrap_err();

        assert!(matches!(err, GenerationError::UnsupportedInlineSchema { .. }));
        assert!(writer.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_render_failure_writes_nothing() {
        let mut config = config();
        config.package_name = "broken".to_string();
        let writer = Arc::new(RecordingWriter::default());
        let err = orchestrator(writer.clone())
            .generate(&spec(DOC), &config, at())
            .unwrap_err();

        assert!(matches!(err, GenerationError::RenderFailure { .. }));
        assert!(writer.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_earlier_artifacts() {
        let writer = Arc::new(RecordingWriter::failing_on("pagination"));
        let err = orchestrator(writer.clone())
            .generate(&spec(DOC), &config(), at())
            .unwrap_err();

        match err {
            GenerationError::WriteFailure { path, .. } => {
                assert_eq!(path, Path::new("/work/acme/pagination.go"));
            }
            other => panic!("expected a write failure, got {other:?}"),
        }
        let written: Vec<String> = writer
            .written
            .lock()
            .unwrap()
            .iter()
            .map(|(content, _)| content.lines().nth(1).unwrap_or_default().to_string())
            .collect();
        assert_eq!(written, vec!["client", "server"]);
        // nothing after the failing artifact is attempted
        assert_eq!(
            *writer.attempts.lock().unwrap(),
            vec!["client", "server", "pagination"]
        );
    }

    #[test]
    fn test_full_scaffold_carries_policies() {
        let mut config = config();
        config.full_scaffold = true;
        let writer = Arc::new(RecordingWriter::default());
        orchestrator(writer.clone())
            .generate(&spec(DOC), &config, at())
            .unwrap();

        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), artifacts::ARTIFACTS.len());
        let protected = written
            .iter()
            .filter(|(_, policy)| *policy == WritePolicy::SkipIfExists)
            .count();
        assert_eq!(protected, 2);
    }
}
