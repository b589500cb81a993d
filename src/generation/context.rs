//! Render model - the single aggregate handed to every template

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::config::Config;
use crate::generation::{ListOperation, Operation};

/// One page-fetcher type; list operations sharing an item type share it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFetcher {
    pub fetcher_name: String,
    pub item_type: String,
}

/// Everything the templates can see, built once per invocation
#[derive(Debug, Clone, Serialize)]
pub struct RenderModel {
    pub package_name: String,
    pub package_import_path: String,
    pub proto_import_path: String,
    pub proto_package: String,
    /// Wire-format definition path relative to the output directory
    pub proto_path: String,
    /// First directory of `proto_path`; the buf module root
    pub proto_root: String,
    pub module_path: String,
    /// Output directory relative to the module root, `.` at the root
    pub output_rel: String,
    pub operations: Vec<Operation>,
    pub list_operations: Vec<ListOperation>,
    pub has_list_operations: bool,
    pub page_fetchers: Vec<PageFetcher>,
    /// Distinct schema names referenced by operations, in first-seen order
    pub messages: Vec<String>,
    pub generated_at: String,
    pub full_scaffold: bool,
}

impl RenderModel {
    /// Assembles the model. `generated_at` is formatted once here and shared
    /// by every artifact header.
    pub fn build(
        config: &Config,
        operations: Vec<Operation>,
        list_operations: Vec<ListOperation>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let proto_root = config
            .artifact_path
            .split('/')
            .next()
            .filter(|_| config.artifact_path.contains('/'))
            .unwrap_or(".")
            .to_string();
        let output_rel = if config.output_rel.is_empty() {
            ".".to_string()
        } else {
            config.output_rel.clone()
        };

        Self {
            package_name: config.package_name.clone(),
            package_import_path: config.package_import_path.clone(),
            proto_import_path: config.proto_import_path.clone(),
            proto_package: config.proto_package.clone(),
            proto_path: config.artifact_path.clone(),
            proto_root,
            module_path: config.module_path.clone(),
            output_rel,
            messages: collect_messages(&operations),
            page_fetchers: collect_page_fetchers(&list_operations),
            has_list_operations: !list_operations.is_empty(),
            operations,
            list_operations,
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            full_scaffold: config.full_scaffold,
        }
    }
}

/// Request and response names of every operation, coalesced by name.
pub fn collect_messages(operations: &[Operation]) -> Vec<String> {
    let mut seen = HashSet::new();
    operations
        .iter()
        .flat_map(|op| [&op.request_type, &op.response_type])
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

fn collect_page_fetchers(list_operations: &[ListOperation]) -> Vec<PageFetcher> {
    let mut seen = HashSet::new();
    list_operations
        .iter()
        .filter(|list| seen.insert(list.fetcher_name.as_str()))
        .map(|list| PageFetcher {
            fetcher_name: list.fetcher_name.clone(),
            item_type: list.item_type.clone(),
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_messages_coalesce_in_first_seen_order() {
        let operations = vec![
            operation("UsersGet", "GetUserRequest", "UserResponse"),
            operation("UsersUpdate", "UpdateUserRequest", "UserResponse"),
            operation("UsersRefresh", "GetUserRequest", "Empty"),
        ];
        assert_eq!(
            collect_messages(&operations),
            vec!["GetUserRequest", "UserResponse", "UpdateUserRequest", "Empty"]
        );
    }

    #[test]
    fn test_build_model() {
        let list = operation("UsersList", "ListUsersRequest", "ListUsersResponse");
        let operations = vec![
            operation("UsersCreate", "CreateUserRequest", "UserResponse"),
            list.clone(),
        ];
        let lists = vec![list_operation(list, "UserResponse", "UserPageFetcher")];
        let at = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap();

        let model = RenderModel::build(&config(), operations, lists, at);

        assert_eq!(model.generated_at, "2026-10-14T09:30:00Z");
        assert_eq!(model.proto_root, "proto");
        assert_eq!(model.output_rel, ".");
        assert!(model.has_list_operations);
        assert_eq!(model.messages.len(), 4);
        assert_eq!(model.page_fetchers.len(), 1);
    }

    #[test]
    fn test_page_fetchers_are_shared_by_item_type() {
        let lists = vec![
            list_operation(operation("UsersList", "A", "B"), "UserResponse", "UserPageFetcher"),
            list_operation(operation("UsersSearch", "C", "D"), "UserResponse", "UserPageFetcher"),
            list_operation(operation("GroupsList", "E", "F"), "Group", "GroupPageFetcher"),
        ];
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let model = RenderModel::build(&config(), Vec::new(), lists, at);

        let names: Vec<&str> = model
            .page_fetchers
            .iter()
            .map(|f| f.fetcher_name.as_str())
            .collect();
        assert_eq!(names, vec!["UserPageFetcher", "GroupPageFetcher"]);
        assert_eq!(model.list_operations.len(), 3);
    }

    #[test]
    fn test_empty_model() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let model = RenderModel::build(&config(), Vec::new(), Vec::new(), at);
        assert!(!model.has_list_operations);
        assert!(model.messages.is_empty());
    }
}
