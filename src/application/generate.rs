//! Use case for generating RPC artifacts from a specification

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::{ApplicationError, GenerateReport, GenerateRequest};
use crate::config::{Config, GenerateSettings, ProjectSettings};
use crate::generation::{GenerationOrchestrator, OpenApiLoader, SpecValidator, Violation};

/// Use case for generating artifacts
pub struct GenerateUseCase {
    openapi_loader: Arc<dyn OpenApiLoader>,
    validator: Arc<dyn SpecValidator>,
    generation_orchestrator: Arc<GenerationOrchestrator>,
}

impl GenerateUseCase {
    pub fn new(
        openapi_loader: Arc<dyn OpenApiLoader>,
        validator: Arc<dyn SpecValidator>,
        generation_orchestrator: Arc<GenerationOrchestrator>,
    ) -> Self {
        Self {
            openapi_loader,
            validator,
            generation_orchestrator,
        }
    }

    pub fn execute(&self, request: GenerateRequest) -> Result<GenerateReport, ApplicationError> {
        // 1. Resolve configuration
        let settings = self.load_settings(&request)?;
        let overrides = request.overrides.clone().with_settings(&settings);
        let config = Config::resolve(&overrides, &request.defaults)?;

        // 2. Load and check the specification
        let spec = self.openapi_loader.load(&request.spec_path)?;
        if request.skip_validation {
            warn!("Convention validation skipped");
        } else {
            let violations = self.validator.validate(&spec);
            if !violations.is_empty() {
                return Err(ApplicationError::SpecRejected { violations });
            }
        }

        // 3. Generate and write
        info!(
            spec = %request.spec_path.display(),
            output = %config.output_dir.display(),
            full = config.full_scaffold,
            "Generating artifacts"
        );
        let result = self
            .generation_orchestrator
            .generate(&spec, &config, request.generated_at)?;

        Ok(GenerateReport {
            output_dir: config.output_dir,
            module_root: config.module_root,
            result,
        })
    }

    fn load_settings(&self, request: &GenerateRequest) -> Result<GenerateSettings, ApplicationError> {
        let settings = match &request.settings_path {
            Some(path) => Some(ProjectSettings::load(path)?),
            None => {
                let start = request
                    .overrides
                    .output_dir
                    .clone()
                    .unwrap_or_else(|| request.defaults.output_dir.clone());
                // A missing output directory is reported by the resolver
                if start.is_dir() {
                    ProjectSettings::discover(&start)?
                } else {
                    None
                }
            }
        };
        Ok(settings.map(|s| s.generate).unwrap_or_default())
    }
}

/// Use case for checking a specification without generating
pub struct ValidateUseCase {
    openapi_loader: Arc<dyn OpenApiLoader>,
    validator: Arc<dyn SpecValidator>,
}

impl ValidateUseCase {
    pub fn new(openapi_loader: Arc<dyn OpenApiLoader>, validator: Arc<dyn SpecValidator>) -> Self {
        Self {
            openapi_loader,
            validator,
        }
    }

    /// Returns the violation report; an empty report means the document conforms
    pub fn execute(&self, spec_path: &Path) -> Result<Vec<Violation>, ApplicationError> {
        let spec = self.openapi_loader.load(spec_path)?;
        let violations = self.validator.validate(&spec);
        info!(
            spec = %spec_path.display(),
            violations = violations.len(),
            "Validated specification"
        );
        Ok(violations)
    }
}
