//! List-operation classification
//!
//! An operation is treated as a paginated list when all three predicates
//! hold:
//!
//! 1. the method segment of its path mentions `list` (any case),
//! 2. its request schema declares an `offset` property (any case),
//! 3. its response schema declares an array property whose items are a
//!    named schema.
//!
//! When several response properties satisfy (3), the first in declaration
//! order wins. That tie-break lives in [`first_named_array_property`].

use openapiv3::{OpenAPI, ReferenceOr, Schema};
use tracing::debug;

use crate::generation::naming::{capitalize, parse_rpc_path};
use crate::generation::schemas::{array_items, lookup, properties, ref_name, resolve_boxed};
use crate::generation::{ListOperation, Operation, RpcPath};

/// Suffix appended to the method identifier for iterator types
pub const ITERATOR_SUFFIX: &str = "Iter";
/// Suffix appended to the item stem for page fetcher types
pub const FETCHER_SUFFIX: &str = "PageFetcher";

/// The response property chosen to carry a page of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedArrayProperty {
    pub field: String,
    pub item_type: String,
}

/// Criterion (a): the method segment contains `list`.
pub fn method_mentions_list(rpc: &RpcPath) -> bool {
    rpc.method.to_ascii_lowercase().contains("list")
}

/// Criterion (b): the request schema has an `offset` property.
pub fn request_has_offset(request: &Schema) -> bool {
    properties(request)
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("offset"))
}

/// Criterion (c) with its tie-break: the first array property, in declared
/// order, whose items reference a named schema.
pub fn first_named_array_property(spec: &OpenAPI, response: &Schema) -> Option<NamedArrayProperty> {
    properties(response).into_iter().find_map(|(field, property)| {
        let property = resolve_boxed(spec, property)?;
        match array_items(property)? {
            ReferenceOr::Reference { reference } => Some(NamedArrayProperty {
                field: field.to_string(),
                item_type: ref_name(reference).to_string(),
            }),
            ReferenceOr::Item(_) => None,
        }
    })
}

/// Fetcher identifier for an item type: `UserResponse` becomes `UserPageFetcher`.
pub fn fetcher_name(item_type: &str) -> String {
    let stem = item_type.strip_suffix("Response").unwrap_or(item_type);
    format!("{stem}{FETCHER_SUFFIX}")
}

/// Classifies one operation, returning its list metadata when it paginates.
pub fn classify(spec: &OpenAPI, operation: &Operation) -> Option<ListOperation> {
    let rpc = parse_rpc_path(&operation.path).ok()?;
    if !method_mentions_list(&rpc) {
        return None;
    }

    let request = lookup(spec, &operation.request_type)?;
    if !request_has_offset(request) {
        debug!(path = %operation.path, "List-like method without offset, not paginated");
        return None;
    }

    let response = lookup(spec, &operation.response_type)?;
    let Some(page) = first_named_array_property(spec, response) else {
        debug!(path = %operation.path, "List-like method without an item array, not paginated");
        return None;
    };

    Some(ListOperation {
        iterator_name: format!("{}{ITERATOR_SUFFIX}", operation.method_name),
        fetcher_name: fetcher_name(&page.item_type),
        response_field: capitalize(&page.field),
        item_type: page.item_type,
        operation: operation.clone(),
    })
}

/// Classifies every operation, keeping operation order.
pub fn classify_all(spec: &OpenAPI, operations: &[Operation]) -> Vec<ListOperation> {
    operations
        .iter()
        .filter_map(|operation| classify(spec, operation))
        .collect()
}
