//! Business rules for the generation domain

use crate::generation::GenerationError;

/// Go keywords; none of them can name a package
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Validates the generated package name
pub fn validate_package_name(name: &str, reserved: &str) -> Result<(), GenerationError> {
    if name.is_empty() {
        return Err(GenerationError::config("Package name cannot be empty"));
    }

    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_well || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(GenerationError::config(format!(
            "Package name '{name}' must be a bare identifier (letters, digits, underscores)"
        )));
    }

    if name == reserved {
        return Err(GenerationError::config(format!(
            "Package name '{name}' is reserved for the program entry point"
        )));
    }

    if GO_KEYWORDS.contains(&name) {
        return Err(GenerationError::config(format!(
            "Package name '{name}' is a language keyword"
        )));
    }

    Ok(())
}
