//! Optional project settings file (`oasrpc.toml`)
//!
//! ```toml
//! [generate]
//! package = "billing"
//! output = "internal/billing"
//! proto_path = "proto/billing/v2/billing.proto"
//! vendor = "acme"
//! full = true
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::manifest::find_upward;
use crate::generation::GenerationError;

/// File name looked up when no explicit settings path is given
pub const SETTINGS_FILE: &str = "oasrpc.toml";

/// Parsed settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSettings {
    #[serde(default)]
    pub generate: GenerateSettings,
}

/// The `[generate]` table; every key mirrors a CLI flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSettings {
    pub package: Option<String>,
    pub output: Option<PathBuf>,
    pub proto_path: Option<String>,
    pub proto_import: Option<String>,
    pub proto_package: Option<String>,
    pub vendor: Option<String>,
    pub full: Option<bool>,
}

impl ProjectSettings {
    /// Reads and parses a settings file.
    ///
    /// A relative `output` is taken relative to the file's own directory.
    pub fn load(path: &Path) -> Result<Self, GenerationError> {
        let content = fs::read_to_string(path).map_err(|e| {
            GenerationError::config(format!("cannot read settings {}: {e}", path.display()))
        })?;
        let mut settings: Self = toml::from_str(&content).map_err(|e| {
            GenerationError::config(format!("invalid settings {}: {e}", path.display()))
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        if let Some(output) = settings.generate.output.take() {
            settings.generate.output = Some(if output.is_relative() {
                base.join(output)
            } else {
                output
            });
        }
        Ok(settings)
    }

    /// Loads `oasrpc.toml` from `start` or the nearest ancestor holding one.
    ///
    /// Returns `Ok(None)` when no settings file exists.
    pub fn discover(start: &Path) -> Result<Option<Self>, GenerationError> {
        match find_upward(start, SETTINGS_FILE) {
            Some(path) => {
                debug!(settings = %path.display(), "Loading project settings");
                Self::load(&path).map(Some)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_generate_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(
            &path,
            "[generate]\npackage = \"billing\"\nvendor = \"acme\"\nfull = true\n",
        )
        .unwrap();

        let settings = ProjectSettings::load(&path).unwrap();
        assert_eq!(settings.generate.package.as_deref(), Some("billing"));
        assert_eq!(settings.generate.vendor.as_deref(), Some("acme"));
        assert_eq!(settings.generate.full, Some(true));
        assert!(settings.generate.output.is_none());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[generate]\npackge = \"typo\"\n").unwrap();

        let err = ProjectSettings::load(&path).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidConfig(_)));
    }

    #[test]
    fn test_discover_from_nested_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "[generate]\nvendor = \"acme\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let settings = ProjectSettings::discover(&nested).unwrap().unwrap();
        assert_eq!(settings.generate.vendor.as_deref(), Some("acme"));
    }

    #[test]
    fn test_relative_output_follows_settings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[generate]\noutput = \"internal/rpc\"\n").unwrap();

        let settings = ProjectSettings::load(&path).unwrap();
        assert_eq!(
            settings.generate.output,
            Some(dir.path().join("internal/rpc"))
        );
    }

    #[test]
    fn test_absolute_output_is_kept() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(
            &path,
            format!("[generate]\noutput = {:?}\n", out.path().display().to_string()),
        )
        .unwrap();

        let settings = ProjectSettings::load(&path).unwrap();
        assert_eq!(settings.generate.output.as_deref(), Some(out.path()));
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "").unwrap();
        assert_eq!(ProjectSettings::load(&path).unwrap(), ProjectSettings::default());
    }
}
