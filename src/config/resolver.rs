//! Config Resolver
//!
//! Turns optional user inputs plus the discovered module manifest into one
//! immutable [`Config`]. Every fallback lives in [`Defaults`] so the resolver
//! can be exercised against any set of defaults in tests.

use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::config::ModuleManifest;
use crate::config::settings::GenerateSettings;
use crate::generation::GenerationError;
use crate::generation::naming::is_version_segment;
use crate::generation::rules::validate_package_name;

/// Process-wide fallbacks for every optional input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub package_name: String,
    pub output_dir: PathBuf,
    pub artifact_path: String,
    pub vendor: String,
    pub manifest_file: String,
    /// Package name reserved for program entry points
    pub reserved_package: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            package_name: "api".to_string(),
            output_dir: PathBuf::from("."),
            artifact_path: "proto/api/v1/api.proto".to_string(),
            vendor: "pkg".to_string(),
            manifest_file: "go.mod".to_string(),
            reserved_package: "main".to_string(),
        }
    }
}

/// Raw user inputs; `None` means "use the fallback"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub package_name: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub artifact_path: Option<String>,
    pub proto_import_path: Option<String>,
    pub proto_package: Option<String>,
    pub vendor: Option<String>,
    pub full_scaffold: bool,
}

impl ConfigOverrides {
    /// Fills every unset field from a settings table.
    ///
    /// Values already present (from flags) win over the settings file.
    pub fn with_settings(self, settings: &GenerateSettings) -> Self {
        Self {
            package_name: self.package_name.or_else(|| settings.package.clone()),
            output_dir: self.output_dir.or_else(|| settings.output.clone()),
            artifact_path: self.artifact_path.or_else(|| settings.proto_path.clone()),
            proto_import_path: self
                .proto_import_path
                .or_else(|| settings.proto_import.clone()),
            proto_package: self.proto_package.or_else(|| settings.proto_package.clone()),
            vendor: self.vendor.or_else(|| settings.vendor.clone()),
            full_scaffold: self.full_scaffold || settings.full.unwrap_or(false),
        }
    }
}

/// Fully resolved configuration for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub package_name: String,
    /// Canonical output directory
    pub output_dir: PathBuf,
    /// Canonical directory holding the module manifest
    pub module_root: PathBuf,
    pub module_path: String,
    /// Output directory relative to the module root, `/`-separated, empty at the root
    pub output_rel: String,
    /// Wire-format definition path relative to the output directory
    pub artifact_path: String,
    /// Import path of the code generated from the wire-format definition
    pub proto_import_path: String,
    /// Import path of the generated package itself
    pub package_import_path: String,
    pub proto_package: String,
    pub full_scaffold: bool,
}

impl Config {
    /// Resolves overrides against defaults and the discovered manifest.
    pub fn resolve(overrides: &ConfigOverrides, defaults: &Defaults) -> Result<Self, GenerationError> {
        let package_name = overrides
            .package_name
            .clone()
            .unwrap_or_else(|| defaults.package_name.clone());
        validate_package_name(&package_name, &defaults.reserved_package)?;

        let requested_output = overrides
            .output_dir
            .clone()
            .unwrap_or_else(|| defaults.output_dir.clone());
        if !requested_output.is_dir() {
            return Err(GenerationError::config(format!(
                "output directory {} does not exist or is not a directory",
                requested_output.display()
            )));
        }
        let output_dir = fs::canonicalize(&requested_output).map_err(|e| {
            GenerationError::config(format!(
                "cannot resolve output directory {}: {e}",
                requested_output.display()
            ))
        })?;

        let artifact_path = overrides
            .artifact_path
            .clone()
            .unwrap_or_else(|| defaults.artifact_path.clone());
        let artifact_dir = validate_artifact_path(&artifact_path)?;

        let manifest = ModuleManifest::discover(&output_dir, &defaults.manifest_file)?;
        let output_rel = relative_slash_path(&output_dir, &manifest.root)?;

        let package_import_path = join_import(&[manifest.module_path.as_str(), output_rel.as_str()]);
        let proto_import_path = match &overrides.proto_import_path {
            Some(path) => path.clone(),
            None => join_import(&[
                manifest.module_path.as_str(),
                output_rel.as_str(),
                artifact_dir.as_str(),
            ]),
        };

        let vendor = overrides.vendor.as_deref().unwrap_or(&defaults.vendor);
        let proto_package = match &overrides.proto_package {
            Some(package) => package.clone(),
            None => derive_namespace(&artifact_path, vendor),
        };

        let config = Self {
            package_name,
            output_dir,
            module_root: manifest.root,
            module_path: manifest.module_path,
            output_rel,
            artifact_path,
            proto_import_path,
            package_import_path,
            proto_package,
            full_scaffold: overrides.full_scaffold,
        };
        debug!(
            package = %config.package_name,
            output = %config.output_dir.display(),
            proto_import = %config.proto_import_path,
            proto_package = %config.proto_package,
            "Resolved configuration"
        );
        Ok(config)
    }
}

/// Namespace from the last `v<N>` directory of the artifact path.
///
/// `proto/billing/v2/billing.proto` with vendor `acme` yields `acme.api.v2`;
/// without a version directory the namespace falls back to `v1`.
pub fn derive_namespace(artifact_path: &str, vendor: &str) -> String {
    let version = artifact_path
        .split('/')
        .rev()
        .skip(1)
        .find(|segment| is_version_segment(segment))
        .unwrap_or("v1");
    format!("{vendor}.api.{version}")
}

/// Joins import path elements with `/`, dropping empty elements.
pub fn join_import(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim_matches('/'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Checks the artifact path and returns its directory part.
fn validate_artifact_path(artifact_path: &str) -> Result<String, GenerationError> {
    let path = Path::new(artifact_path);
    if artifact_path.contains('\\')
        || path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(GenerationError::config(format!(
            "artifact path '{artifact_path}' must be a relative '/'-separated path without '..'"
        )));
    }
    if path.extension().and_then(|e| e.to_str()) != Some("proto") {
        return Err(GenerationError::config(format!(
            "artifact path '{artifact_path}' must end in .proto"
        )));
    }
    match artifact_path.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => Ok(dir.to_string()),
        _ => Err(GenerationError::config(format!(
            "artifact path '{artifact_path}' must live in a subdirectory of the output directory"
        ))),
    }
}

fn relative_slash_path(path: &Path, root: &Path) -> Result<String, GenerationError> {
    let rel = path.strip_prefix(root).map_err(|_| {
        GenerationError::config(format!(
            "output directory {} is outside module root {}",
            path.display(),
            root.display()
        ))
    })?;
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(segments.join("/"))
}
