//! Operation extraction from the specification's path table
//!
//! Only POST operations take part. Request and response bodies must point
//! at named component schemas; an inline schema aborts the whole run because
//! generated wire types need a stable identity. Operations whose path does
//! not follow the RPC grammar are dropped with a warning instead, as is any
//! later path deriving an identifier an earlier path already took.

use openapiv3::{MediaType, OpenAPI, ReferenceOr, StatusCode};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::generation::naming;
use crate::generation::schemas::{ref_name, resolve_request_body, resolve_response};
use crate::generation::sanitizers::sanitize_comment;
use crate::generation::{GenerationError, Operation, SchemaLocation};

/// Whether a response code counts as success.
///
/// Explicit `2xx` codes and the `2XX` range qualify; `default` never does.
pub fn is_success_status(code: &StatusCode) -> bool {
    match code {
        StatusCode::Code(code) => (200..300).contains(code),
        StatusCode::Range(range) => *range == 2,
    }
}

/// Extracts every qualifying operation in specification-declaration order.
pub fn extract_operations(spec: &OpenAPI) -> Result<Vec<Operation>, GenerationError> {
    let mut operations: Vec<Operation> = Vec::new();
    // method identifier -> first path deriving it
    let mut seen: HashMap<String, String> = HashMap::new();

    for (path, item) in spec.paths.paths.iter() {
        let item = match item {
            ReferenceOr::Item(item) => item,
            ReferenceOr::Reference { reference } => {
                warn!(path = %path, reference = %reference, "Skipping referenced path item");
                continue;
            }
        };
        let Some(post) = item.post.as_ref() else {
            debug!(path = %path, "No POST operation, skipping path");
            continue;
        };

        let ids = match naming::method_identifiers(path) {
            Ok(ids) => ids,
            Err(e) if !e.is_fatal() => {
                warn!(path = %path, error = %e, "Skipping operation with malformed path");
                continue;
            }
            Err(e) => return Err(e),
        };
        if let Some(first) = seen.get(ids.method_name.as_str()) {
            warn!(
                path = %path,
                first = %first,
                method = %ids.method_name,
                "Skipping operation whose identifier is already taken"
            );
            continue;
        }

        let Some(request_type) = request_schema_name(spec, path, post)? else {
            warn!(path = %path, "Skipping operation without a request body schema");
            continue;
        };
        let Some(response_type) = response_schema_name(spec, path, post)? else {
            warn!(path = %path, "Skipping operation without a success response schema");
            continue;
        };

        let summary = post
            .summary
            .as_deref()
            .or(post.description.as_deref())
            .map(sanitize_comment)
            .unwrap_or_default();

        debug!(
            path = %path,
            method = %ids.method_name,
            request = %request_type,
            response = %response_type,
            "Extracted operation"
        );

        seen.insert(ids.method_name.clone(), path.clone());
        operations.push(Operation {
            method_name: ids.method_name,
            path: path.clone(),
            const_name: ids.const_name,
            summary,
            request_type,
            response_type,
        });
    }

    Ok(operations)
}

/// Name of the request body's first content schema.
fn request_schema_name(
    spec: &OpenAPI,
    path: &str,
    operation: &openapiv3::Operation,
) -> Result<Option<String>, GenerationError> {
    let Some(body) = operation.request_body.as_ref() else {
        return Ok(None);
    };
    let Some(body) = resolve_request_body(spec, body) else {
        return Ok(None);
    };
    match body.content.values().next() {
        Some(media) => named_schema(media, path, SchemaLocation::Request),
        None => Ok(None),
    }
}

/// Name of the first success response carrying content, in declared order.
fn response_schema_name(
    spec: &OpenAPI,
    path: &str,
    operation: &openapiv3::Operation,
) -> Result<Option<String>, GenerationError> {
    let media = operation
        .responses
        .responses
        .iter()
        .filter(|(code, _)| is_success_status(code))
        .filter_map(|(_, response)| resolve_response(spec, response))
        .find_map(|response| response.content.values().next());

    match media {
        Some(media) => named_schema(media, path, SchemaLocation::Response),
        None => Ok(None),
    }
}

fn named_schema(
    media: &MediaType,
    path: &str,
    location: SchemaLocation,
) -> Result<Option<String>, GenerationError> {
    match media.schema.as_ref() {
        Some(ReferenceOr::Reference { reference }) => Ok(Some(ref_name(reference).to_string())),
        Some(ReferenceOr::Item(_)) => Err(GenerationError::UnsupportedInlineSchema {
            path: path.to_string(),
            location,
        }),
        None => Ok(None),
    }
}
