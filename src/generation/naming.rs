//! Identifier derivation for RPC paths
//!
//! Paths follow `/v<N>/<subject>.<method>`. The subject and method are each
//! split on `-` and `_`, every token gets its first character uppercased, and
//! the tokens are concatenated:
//!
//! ```
//! use oasrpc::generation::naming::method_identifiers;
//!
//! let ids = method_identifiers("/v1/user-groups.add_member").unwrap();
//! assert_eq!(ids.method_name, "UserGroupsAddMember");
//! assert_eq!(ids.const_name, "RPCUserGroupsAddMember");
//! ```

use crate::generation::{GenerationError, RpcPath};

/// Prefix of every protocol constant identifier
pub const CONST_PREFIX: &str = "RPC";

/// Identifiers derived from one RPC path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodIdentifiers {
    pub method_name: String,
    pub const_name: String,
}

/// Returns true for segments like `v1` or `v42`
pub fn is_version_segment(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Returns true for segments that can seed an identifier: an ASCII letter
/// followed by letters, digits, `-` or `_`.
pub fn is_identifier_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Splits an RPC path into version, subject and method.
pub fn parse_rpc_path(path: &str) -> Result<RpcPath, GenerationError> {
    let invalid = || GenerationError::InvalidPathFormat {
        path: path.to_string(),
    };

    let rest = path.strip_prefix('/').ok_or_else(invalid)?;
    let (version, call) = rest.split_once('/').ok_or_else(invalid)?;
    if !is_version_segment(version) {
        return Err(invalid());
    }

    let parts: Vec<&str> = call.split('.').collect();
    if parts.len() != 2 || !parts.iter().all(|p| is_identifier_segment(p)) {
        return Err(invalid());
    }

    Ok(RpcPath {
        version: version.to_string(),
        subject: parts[0].to_string(),
        method: parts[1].to_string(),
    })
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Converts one path segment into a PascalCase identifier.
///
/// Only the first character of each `-`/`_` token is touched, so
/// `listAll` stays `ListAll` rather than becoming `Listall`.
pub fn segment_identifier(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|token| !token.is_empty())
        .map(capitalize)
        .collect()
}

/// Derives the method and constant identifiers for a parsed path.
pub fn identifiers_for(rpc: &RpcPath) -> MethodIdentifiers {
    let method_name = segment_identifier(&rpc.subject) + &segment_identifier(&rpc.method);
    let const_name = format!("{CONST_PREFIX}{method_name}");
    MethodIdentifiers {
        method_name,
        const_name,
    }
}

/// Parses `path` and derives its identifiers in one step.
pub fn method_identifiers(path: &str) -> Result<MethodIdentifiers, GenerationError> {
    parse_rpc_path(path).map(|rpc| identifiers_for(&rpc))
}
