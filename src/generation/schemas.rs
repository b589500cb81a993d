//! Named-schema lookup over a parsed OpenAPI document

use openapiv3::{OpenAPI, ReferenceOr, RequestBody, Response, Schema, SchemaKind, Type};

/// Alias chains longer than this are treated as unresolvable
const MAX_REF_DEPTH: usize = 16;

/// Returns the component name a `$ref` points at.
///
/// `#/components/schemas/User` yields `User`.
pub fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Looks up a component schema by name, following alias references.
pub fn lookup<'a>(spec: &'a OpenAPI, name: &str) -> Option<&'a Schema> {
    lookup_at_depth(spec, name, 0)
}

fn lookup_at_depth<'a>(spec: &'a OpenAPI, name: &str, depth: usize) -> Option<&'a Schema> {
    if depth > MAX_REF_DEPTH {
        return None;
    }
    match spec.components.as_ref()?.schemas.get(name)? {
        ReferenceOr::Item(schema) => Some(schema),
        ReferenceOr::Reference { reference } => {
            lookup_at_depth(spec, ref_name(reference), depth + 1)
        }
    }
}

/// Resolves a property (boxed) schema to its definition.
pub fn resolve_boxed<'a>(
    spec: &'a OpenAPI,
    schema: &'a ReferenceOr<Box<Schema>>,
) -> Option<&'a Schema> {
    match schema {
        ReferenceOr::Item(schema) => Some(schema.as_ref()),
        ReferenceOr::Reference { reference } => lookup(spec, ref_name(reference)),
    }
}

/// Resolves a request body, following `#/components/requestBodies` references.
pub fn resolve_request_body<'a>(
    spec: &'a OpenAPI,
    body: &'a ReferenceOr<RequestBody>,
) -> Option<&'a RequestBody> {
    match body {
        ReferenceOr::Item(body) => Some(body),
        ReferenceOr::Reference { reference } => {
            match spec
                .components
                .as_ref()?
                .request_bodies
                .get(ref_name(reference))?
            {
                ReferenceOr::Item(body) => Some(body),
                ReferenceOr::Reference { .. } => None,
            }
        }
    }
}

/// Resolves a response, following `#/components/responses` references.
pub fn resolve_response<'a>(
    spec: &'a OpenAPI,
    response: &'a ReferenceOr<Response>,
) -> Option<&'a Response> {
    match response {
        ReferenceOr::Item(response) => Some(response),
        ReferenceOr::Reference { reference } => {
            match spec
                .components
                .as_ref()?
                .responses
                .get(ref_name(reference))?
            {
                ReferenceOr::Item(response) => Some(response),
                ReferenceOr::Reference { .. } => None,
            }
        }
    }
}

/// Declared properties of an object schema, in declaration order.
pub fn properties(schema: &Schema) -> Vec<(&str, &ReferenceOr<Box<Schema>>)> {
    let props = match &schema.schema_kind {
        SchemaKind::Type(Type::Object(object)) => &object.properties,
        SchemaKind::Any(any) => &any.properties,
        _ => return Vec::new(),
    };
    props.iter().map(|(k, v)| (k.as_str(), v)).collect()
}

/// Item schema of an array schema, if the schema is an array.
pub fn array_items(schema: &Schema) -> Option<&ReferenceOr<Box<Schema>>> {
    match &schema.schema_kind {
        SchemaKind::Type(Type::Array(array)) => array.items.as_ref(),
        SchemaKind::Any(any) if any.typ.as_deref() == Some("array") => any.items.as_ref(),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::spec;
    use super::*;

    const DOC: &str = r##"
openapi: 3.0.3
info:
  title: Fixture
  version: 1.0.0
paths: {}
components:
  schemas:
    User:
      type: object
      properties:
        name:
          type: string
        tags:
          type: array
          items:
            $ref: "#/components/schemas/Tag"
    Tag:
      type: object
    Member:
      $ref: "#/components/schemas/User"
    Loop:
      $ref: "#/components/schemas/Loop"
"##;

    #[test]
    fn test_ref_name() {
        assert_eq!(ref_name("#/components/schemas/User"), "User");
        assert_eq!(ref_name("User"), "User");
    }

    #[test]
    fn test_lookup_follows_aliases() {
        let doc = spec(DOC);
        let member = lookup(&doc, "Member").expect("alias resolves");
        let names: Vec<&str> = properties(member).into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["name", "tags"]);
    }

    #[test]
    fn test_lookup_stops_on_cycles() {
        let doc = spec(DOC);
        assert!(lookup(&doc, "Loop").is_none());
        assert!(lookup(&doc, "Missing").is_none());
    }

    #[test]
    fn test_array_items() {
        let doc = spec(DOC);
        let user = lookup(&doc, "User").unwrap();
        let props = properties(user);
        let (_, tags) = props[1];
        let tags = resolve_boxed(&doc, tags).unwrap();
        match array_items(tags) {
            Some(ReferenceOr::Reference { reference }) => assert_eq!(ref_name(reference), "Tag"),
            other => panic!("expected named items, got {other:?}"),
        }
        let (_, name) = props[0];
        assert!(array_items(resolve_boxed(&doc, name).unwrap()).is_none());
    }
}
