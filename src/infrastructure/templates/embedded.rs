//! Templates embedded in the binary at compile time
//!
//! Every row of the artifact table names one of these templates, so the
//! generator works straight after `cargo install` with no template files on
//! disk.

/// `(template name, source)` pairs
pub const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    ("client.go", include_str!("../../../templates/go/client.go.tera")),
    ("server.go", include_str!("../../../templates/go/server.go.tera")),
    ("pagination.go", include_str!("../../../templates/go/pagination.go.tera")),
    ("api.proto", include_str!("../../../templates/go/api.proto.tera")),
    ("main.go", include_str!("../../../templates/go/main.go.tera")),
    ("service.go", include_str!("../../../templates/go/service.go.tera")),
    ("service_test.go", include_str!("../../../templates/go/service_test.go.tera")),
    ("Makefile", include_str!("../../../templates/go/Makefile.tera")),
    ("buf.yaml", include_str!("../../../templates/go/buf.yaml.tera")),
    ("buf.gen.yaml", include_str!("../../../templates/go/buf.gen.yaml.tera")),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ARTIFACTS;

    fn embedded_template(name: &str) -> Option<&'static str> {
        EMBEDDED_TEMPLATES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, source)| *source)
    }

    #[test]
    fn test_every_artifact_has_a_template() {
        for spec in ARTIFACTS {
            assert!(
                embedded_template(spec.template).is_some(),
                "missing template {}",
                spec.template
            );
        }
        assert_eq!(EMBEDDED_TEMPLATES.len(), ARTIFACTS.len());
    }

    #[test]
    fn test_unknown_template() {
        assert!(embedded_template("nope.go").is_none());
    }
}
