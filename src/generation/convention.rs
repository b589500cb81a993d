//! RPC convention checks run before generation
//!
//! Each rule is an independent function over one path entry. The validator
//! runs them all and returns every violation, so a single pass surfaces the
//! full report instead of stopping at the first problem. Two checks span the
//! whole document: colliding method identifiers and dangling component refs.

use openapiv3::{OpenAPI, PathItem, ReferenceOr, Schema, SchemaKind, Type};
use std::collections::HashMap;
use std::fmt;

use crate::generation::extractor::is_success_status;
use crate::generation::naming::{method_identifiers, parse_rpc_path};
use crate::generation::schemas::{ref_name, resolve_request_body, resolve_response};
use crate::generation::SpecValidator;

/// A single convention breach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: &'static str,
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.path, self.message)
    }
}

type Rule = fn(&OpenAPI, &str, &PathItem) -> Option<String>;

/// Rule identifiers paired with their checks, in report order
const RULES: &[(&str, Rule)] = &[
    ("path-format", path_format),
    ("post-only", post_only),
    ("request-body", request_body),
    ("request-schema", request_schema),
    ("success-response", success_response),
    ("named-request", named_request),
    ("named-response", named_response),
    ("schema-exists", schema_exists),
];

/// Checks a document against the RPC convention
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionValidator;

impl ConventionValidator {
    pub fn new() -> Self {
        Self
    }
}

impl SpecValidator for ConventionValidator {
    fn validate(&self, spec: &OpenAPI) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (path, item) in spec.paths.paths.iter() {
            let ReferenceOr::Item(item) = item else {
                violations.push(Violation {
                    rule: "path-format",
                    path: path.clone(),
                    message: "path items must be declared inline".to_string(),
                });
                continue;
            };
            for &(rule, check) in RULES {
                if let Some(message) = check(spec, path, item) {
                    violations.push(Violation {
                        rule,
                        path: path.clone(),
                        message,
                    });
                }
            }
        }
        violations.extend(colliding_identifiers(spec));
        violations.extend(dangling_component_refs(spec));
        violations
    }
}

fn path_format(_: &OpenAPI, path: &str, _: &PathItem) -> Option<String> {
    parse_rpc_path(path).err().map(|e| e.to_string())
}

fn post_only(_: &OpenAPI, _: &str, item: &PathItem) -> Option<String> {
    let others: Vec<&str> = [
        ("GET", item.get.is_some()),
        ("PUT", item.put.is_some()),
        ("DELETE", item.delete.is_some()),
        ("PATCH", item.patch.is_some()),
        ("HEAD", item.head.is_some()),
        ("OPTIONS", item.options.is_some()),
        ("TRACE", item.trace.is_some()),
    ]
    .into_iter()
    .filter_map(|(method, present)| present.then_some(method))
    .collect();

    if item.post.is_none() {
        Some("no POST operation declared".to_string())
    } else if !others.is_empty() {
        Some(format!("only POST is allowed, found {}", others.join(", ")))
    } else {
        None
    }
}

fn request_body(_: &OpenAPI, _: &str, item: &PathItem) -> Option<String> {
    let post = item.post.as_ref()?;
    post.request_body
        .is_none()
        .then(|| "operation has no request body".to_string())
}

fn request_schema(spec: &OpenAPI, _: &str, item: &PathItem) -> Option<String> {
    let body = item.post.as_ref()?.request_body.as_ref()?;
    let Some(body) = resolve_request_body(spec, body) else {
        return Some("request body reference does not resolve".to_string());
    };
    match body.content.values().next() {
        Some(media) if media.schema.is_some() => None,
        Some(_) => Some("first request content entry has no schema".to_string()),
        None => Some("request body declares no content".to_string()),
    }
}

fn success_response(spec: &OpenAPI, _: &str, item: &PathItem) -> Option<String> {
    let post = item.post.as_ref()?;
    let has_content = post
        .responses
        .responses
        .iter()
        .filter(|(code, _)| is_success_status(code))
        .filter_map(|(_, response)| resolve_response(spec, response))
        .any(|response| !response.content.is_empty());
    (!has_content).then(|| "no 2xx response carries content".to_string())
}

fn named_request(spec: &OpenAPI, _: &str, item: &PathItem) -> Option<String> {
    let body = item.post.as_ref()?.request_body.as_ref()?;
    let schema = resolve_request_body(spec, body)?
        .content
        .values()
        .next()?
        .schema
        .as_ref()?;
    inline_message(schema, "request")
}

fn named_response(spec: &OpenAPI, _: &str, item: &PathItem) -> Option<String> {
    let schema = success_schema(spec, item)?;
    inline_message(schema, "response")
}

fn schema_exists(spec: &OpenAPI, _: &str, item: &PathItem) -> Option<String> {
    let request = item
        .post
        .as_ref()?
        .request_body
        .as_ref()
        .and_then(|body| resolve_request_body(spec, body))
        .and_then(|body| body.content.values().next())
        .and_then(|media| media.schema.as_ref());
    let missing: Vec<&str> = [request, success_schema(spec, item)]
        .into_iter()
        .flatten()
        .filter_map(|schema| match schema {
            ReferenceOr::Reference { reference } if !schema_declared(spec, reference) => {
                Some(reference.as_str())
            }
            _ => None,
        })
        .collect();
    (!missing.is_empty()).then(|| format!("unresolved schema reference {}", missing.join(", ")))
}

fn success_schema<'a>(spec: &'a OpenAPI, item: &'a PathItem) -> Option<&'a ReferenceOr<Schema>> {
    item.post
        .as_ref()?
        .responses
        .responses
        .iter()
        .filter(|(code, _)| is_success_status(code))
        .filter_map(|(_, response)| resolve_response(spec, response))
        .find_map(|response| response.content.values().next())?
        .schema
        .as_ref()
}

fn inline_message(schema: &ReferenceOr<Schema>, side: &str) -> Option<String> {
    match schema {
        ReferenceOr::Item(_) => Some(format!(
            "{side} schema is inline; reference a schema under #/components/schemas"
        )),
        ReferenceOr::Reference { .. } => None,
    }
}

fn schema_declared(spec: &OpenAPI, reference: &str) -> bool {
    reference.starts_with("#/components/schemas/")
        && spec
            .components
            .as_ref()
            .is_some_and(|c| c.schemas.contains_key(ref_name(reference)))
}

/// Paths deriving a method identifier an earlier path already derives.
fn colliding_identifiers(spec: &OpenAPI) -> Vec<Violation> {
    let mut first_paths: HashMap<String, &str> = HashMap::new();
    let mut violations = Vec::new();
    for path in spec.paths.paths.keys() {
        let Ok(ids) = method_identifiers(path) else {
            continue;
        };
        match first_paths.get(&ids.method_name) {
            Some(first) => violations.push(Violation {
                rule: "unique-method",
                path: path.clone(),
                message: format!("derives {} like {first}", ids.method_name),
            }),
            None => {
                first_paths.insert(ids.method_name, path.as_str());
            }
        }
    }
    violations
}

/// References inside component schemas that point nowhere.
fn dangling_component_refs(spec: &OpenAPI) -> Vec<Violation> {
    let Some(components) = spec.components.as_ref() else {
        return Vec::new();
    };
    let mut violations = Vec::new();
    for (name, schema) in components.schemas.iter() {
        let mut refs = Vec::new();
        match schema {
            ReferenceOr::Reference { reference } => refs.push(reference.as_str()),
            ReferenceOr::Item(schema) => collect_refs(schema, &mut refs),
        }
        for reference in refs {
            if !schema_declared(spec, reference) {
                violations.push(Violation {
                    rule: "schema-exists",
                    path: format!("#/components/schemas/{name}"),
                    message: format!("unresolved schema reference {reference}"),
                });
            }
        }
    }
    violations
}

fn collect_refs<'a>(schema: &'a Schema, refs: &mut Vec<&'a str>) {
    match &schema.schema_kind {
        SchemaKind::Type(Type::Object(object)) => {
            for property in object.properties.values() {
                visit_child(property, refs);
            }
        }
        SchemaKind::Type(Type::Array(array)) => {
            if let Some(items) = array.items.as_ref() {
                visit_child(items, refs);
            }
        }
        SchemaKind::Any(any) => {
            for property in any.properties.values() {
                visit_child(property, refs);
            }
            if let Some(items) = any.items.as_ref() {
                visit_child(items, refs);
            }
        }
        _ => {}
    }
}

fn visit_child<'a>(child: &'a ReferenceOr<Box<Schema>>, refs: &mut Vec<&'a str>) {
    match child {
        ReferenceOr::Reference { reference } => refs.push(reference.as_str()),
        ReferenceOr::Item(inner) => collect_refs(inner, refs),
    }
}
