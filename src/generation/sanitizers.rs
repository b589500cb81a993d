//! Sanitizers for text that ends up inside generated comments

use once_cell::sync::Lazy;
use regex::Regex;

static SMART_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2013}\u{2014}]").expect("static regex")
});
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Flattens free text into a single comment-safe line.
///
/// Smart quotes and dashes become ASCII, whitespace runs (including line
/// breaks) collapse to one space, and `*/` is defused so block comments in
/// the output stay closed.
///
/// ```
/// use oasrpc::generation::sanitizers::sanitize_comment;
///
/// assert_eq!(sanitize_comment("Create a\n  \u{201C}user\u{201D}"), "Create a \"user\"");
/// ```
pub fn sanitize_comment(input: &str) -> String {
    let ascii = SMART_PUNCTUATION.replace_all(input, |caps: &regex::Captures| match &caps[0] {
        "\u{2018}" | "\u{2019}" => "'",
        "\u{201C}" | "\u{201D}" => "\"",
        _ => "-",
    });
    WHITESPACE
        .replace_all(ascii.trim(), " ")
        .replace("*/", "* /")
}
