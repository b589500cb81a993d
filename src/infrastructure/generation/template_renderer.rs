//! Tera-based template renderer implementation

use std::error::Error as _;
use tera::{Context, Tera};

use crate::generation::{ArtifactSpec, GenerationError, RenderModel, TemplateRenderer};
use crate::infrastructure::templates::EMBEDDED_TEMPLATES;

/// Tera-based template renderer over the embedded templates
pub struct TeraTemplateRenderer {
    tera: Tera,
}

impl TeraTemplateRenderer {
    /// Parses every embedded template up front
    pub fn new() -> Result<Self, GenerationError> {
        Self::with_templates(EMBEDDED_TEMPLATES)
    }

    /// Builds a renderer over an explicit template set
    pub fn with_templates(templates: &[(&str, &str)]) -> Result<Self, GenerationError> {
        let mut tera = Tera::default();
        // Generated sources are not markup
        tera.autoescape_on(Vec::new());
        tera.add_raw_templates(templates.iter().copied())
            .map_err(|e| GenerationError::render("templates", error_chain(&e)))?;
        Ok(Self { tera })
    }
}

impl TemplateRenderer for TeraTemplateRenderer {
    fn render(&self, spec: &ArtifactSpec, model: &RenderModel) -> Result<String, GenerationError> {
        let context = Context::from_serialize(model)
            .map_err(|e| GenerationError::render(spec.name, error_chain(&e)))?;
        let body = self
            .tera
            .render(spec.template, &context)
            .map_err(|e| GenerationError::render(spec.name, error_chain(&e)))?;

        Ok(format!(
            "{}\n\n{}",
            spec.header(&model.generated_at),
            body.trim_start_matches('\n')
        ))
    }
}

/// Tera nests the useful message in the source chain
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::artifacts::find;
    use crate::generation::Operation;
    use crate::generation::context::fixtures::{config, list_operation, operation};
    use chrono::{TimeZone, Utc};

    fn model(full: bool) -> RenderModel {
        let mut config = config();
        config.full_scaffold = full;
        let create = Operation {
            summary: "Create a user".to_string(),
            ..operation("UsersCreate", "CreateUserRequest", "UserResponse")
        };
        let list = operation("UsersList", "ListUsersRequest", "ListUsersResponse");
        let lists = vec![list_operation(list.clone(), "UserResponse", "UserPageFetcher")];
        let at = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap();
        RenderModel::build(&config, vec![create, list], lists, at)
    }

    fn render(name: &str, model: &RenderModel) -> String {
        let renderer = TeraTemplateRenderer::new().unwrap();
        renderer.render(find(name).unwrap(), model).unwrap()
    }

    #[test]
    fn test_client_contains_constants_and_methods() {
        let out = render("client", &model(false));
        assert!(out.starts_with("// Code generated by oasrpc at 2026-10-14T09:30:00Z. DO NOT EDIT.\n\npackage api\n"));
        assert!(out.contains("pb \"example.com/acme/proto/api/v1\""));
        assert!(out.contains("RPCUsersCreate = \"/v1/userscreate\""));
        assert!(out.contains(
            "func (c *Client) UsersCreate(ctx context.Context, req *pb.CreateUserRequest) (*pb.UserResponse, error) {"
        ));
        assert!(out.contains("// Create a user\n"));
    }

    #[test]
    fn test_server_routes_every_operation() {
        let out = render("server", &model(false));
        assert!(out.contains("UsersList(ctx context.Context, req *pb.ListUsersRequest) (*pb.ListUsersResponse, error)"));
        assert!(out.contains("mux.Handle(RPCUsersCreate, handle("));
    }

    #[test]
    fn test_pagination_helpers() {
        let out = render("pagination", &model(false));
        assert!(out.contains(
            "type UserPageFetcher func(ctx context.Context, offset int64) ([]*pb.UserResponse, error)"
        ));
        assert!(out.contains("type UsersListIter struct {"));
        assert!(out.contains("return resp.Items, nil"));
    }

    #[test]
    fn test_proto_lists_each_message_once() {
        let out = render("proto", &model(false));
        assert!(out.contains("package pkg.api.v1;"));
        assert!(out.contains("option go_package = \"example.com/acme/proto/api/v1\";"));
        assert_eq!(out.matches("message UserResponse {}").count(), 1);
        assert_eq!(out.matches("message ").count(), 4);
    }

    #[test]
    fn test_scaffold_headers_and_paths() {
        let model = model(true);
        let makefile = render("makefile", &model);
        assert!(makefile.starts_with("# Generated by oasrpc at 2026-10-14T09:30:00Z. Safe to edit"));
        assert!(makefile.contains("PROTO_DIR := .\n"));
        assert!(makefile.contains("go run ./cmd/server"));

        let buf = render("buf", &model);
        assert!(buf.contains("  - path: proto\n"));

        let daemon = render("daemon", &model);
        assert!(daemon.contains("api \"example.com/acme\""));
    }

    #[test]
    fn test_empty_model_omits_proto_import() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let empty = RenderModel::build(&config(), Vec::new(), Vec::new(), at);
        let out = render("client", &empty);
        assert!(!out.contains("pb \""));
        assert!(!out.contains("const ("));
    }

    #[test]
    fn test_broken_template_is_render_failure() {
        let result = TeraTemplateRenderer::with_templates(&[("client.go", "{% if %}")]);
        assert!(matches!(result, Err(GenerationError::RenderFailure { .. })));
    }
}
