//! Configuration resolution: defaults, user overrides, project settings and
//! module discovery.

pub mod manifest;
pub mod resolver;
pub mod settings;

pub use manifest::{ModuleManifest, find_upward, parse_module_declaration};
pub use resolver::{Config, ConfigOverrides, Defaults, derive_namespace, join_import};
pub use settings::{GenerateSettings, ProjectSettings, SETTINGS_FILE};
