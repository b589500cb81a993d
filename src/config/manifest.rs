//! Module-declaration discovery
//!
//! The module root is the nearest ancestor of the output directory holding the
//! manifest file (`go.mod`). Its `module <path>` line gives the import prefix
//! for everything generated below it.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::generation::GenerationError;

/// A discovered module manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleManifest {
    /// Directory containing the manifest file
    pub root: PathBuf,
    /// Declared module path, e.g. `example.com/acme/billing`
    pub module_path: String,
}

impl ModuleManifest {
    /// Searches `start` and its ancestors for `file_name` and parses it.
    pub fn discover(start: &Path, file_name: &str) -> Result<Self, GenerationError> {
        let manifest = find_upward(start, file_name).ok_or_else(|| {
            GenerationError::ModuleNotFound(format!(
                "no {file_name} found in {} or any parent directory",
                start.display()
            ))
        })?;

        let content = fs::read_to_string(&manifest).map_err(|e| {
            GenerationError::ModuleNotFound(format!("cannot read {}: {e}", manifest.display()))
        })?;
        let module_path = parse_module_declaration(&content).ok_or_else(|| {
            GenerationError::ModuleNotFound(format!(
                "{} has no module declaration",
                manifest.display()
            ))
        })?;

        let root = manifest
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        debug!(root = %root.display(), module = %module_path, "Discovered module manifest");

        Ok(Self { root, module_path })
    }
}

/// Returns the first `dir/file_name` that exists, walking from `start` upward.
pub fn find_upward(start: &Path, file_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}

/// Extracts the path from the first `module` directive.
///
/// Handles quoted paths and trailing `//` comments:
///
/// ```
/// use oasrpc::config::parse_module_declaration;
///
/// let manifest = "// tooling\nmodule \"example.com/acme/api\" // pinned\n\ngo 1.22\n";
/// assert_eq!(parse_module_declaration(manifest).as_deref(), Some("example.com/acme/api"));
/// ```
pub fn parse_module_declaration(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or_default().trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!path.is_empty()).then(|| path.to_string())
    })
}
