//! Source formatters applied to rendered artifacts

use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::generation::{GenerationError, SourceFormatter};
use crate::infrastructure::shell::CommandExecutor;

/// Whitespace normalization plus a delimiter sanity check
///
/// Trailing whitespace goes, blank-line runs collapse to one and the file ends
/// in exactly one newline. Go and proto sources must also balance their
/// brackets; an imbalance means a template and the model disagree.
pub struct NormalizingFormatter;

impl NormalizingFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NormalizingFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFormatter for NormalizingFormatter {
    fn format(&self, path: &Path, source: String) -> Result<String, GenerationError> {
        let mut out = String::with_capacity(source.len());
        let mut blank_run = false;
        for line in source.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                if blank_run || out.is_empty() {
                    continue;
                }
                blank_run = true;
            } else {
                blank_run = false;
            }
            out.push_str(line);
            out.push('\n');
        }
        while out.ends_with("\n\n") {
            out.pop();
        }

        if matches!(extension(path), Some("go") | Some("proto")) {
            check_balanced(&out).map_err(|message| {
                GenerationError::render(path.display().to_string(), message)
            })?;
        }
        Ok(out)
    }
}

/// Pipes Go sources through `gofmt`; other files pass through untouched
pub struct GofmtFormatter {
    executor: Arc<dyn CommandExecutor>,
}

impl GofmtFormatter {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }
}

impl SourceFormatter for GofmtFormatter {
    fn format(&self, path: &Path, source: String) -> Result<String, GenerationError> {
        if extension(path) != Some("go") {
            return Ok(source);
        }
        let result = self.executor.execute("gofmt", &[], &source)?;
        if !result.is_success() {
            return Err(GenerationError::render(
                path.display().to_string(),
                format!("gofmt failed: {}", result.stderr.trim()),
            ));
        }
        debug!(path = %path.display(), "Formatted with gofmt");
        Ok(result.stdout)
    }
}

/// Composite formatter that applies formatters in order
pub struct CompositeFormatter {
    formatters: Vec<Arc<dyn SourceFormatter>>,
}

impl CompositeFormatter {
    pub fn new(formatters: Vec<Arc<dyn SourceFormatter>>) -> Self {
        Self { formatters }
    }
}

impl SourceFormatter for CompositeFormatter {
    fn format(&self, path: &Path, source: String) -> Result<String, GenerationError> {
        self.formatters
            .iter()
            .try_fold(source, |source, formatter| formatter.format(path, source))
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Checks `{}`, `()` and `[]` nesting outside comments, strings and runes.
fn check_balanced(source: &str) -> Result<(), String> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        line += 1;
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                let mut closed = false;
                for next in chars.by_ref() {
                    if next == '\n' {
                        line += 1;
                    }
                    if prev == '*' && next == '/' {
                        closed = true;
                        break;
                    }
                    prev = next;
                }
                if !closed {
                    return Err("unterminated block comment".to_string());
                }
            }
            '"' | '\'' => {
                let quote = c;
                let mut closed = false;
                while let Some(next) = chars.next() {
                    match next {
                        '\\' => {
                            chars.next();
                        }
                        '\n' => return Err(format!("unterminated literal on line {line}")),
                        _ if next == quote => {
                            closed = true;
                            break;
                        }
                        _ => {}
                    }
                }
                if !closed {
                    return Err(format!("unterminated literal on line {line}"));
                }
            }
            '`' => {
                let mut closed = false;
                for next in chars.by_ref() {
                    if next == '\n' {
                        line += 1;
                    }
                    if next == '`' {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err("unterminated raw string".to_string());
                }
            }
            '{' | '(' | '[' => stack.push((c, line)),
            '}' | ')' | ']' => {
                let expected = match c {
                    '}' => '{',
                    ')' => '(',
                    _ => '[',
                };
                match stack.pop() {
                    Some((open, _)) if open == expected => {}
                    Some((open, opened)) => {
                        return Err(format!(
                            "'{c}' on line {line} closes '{open}' from line {opened}"
                        ));
                    }
                    None => return Err(format!("unmatched '{c}' on line {line}")),
                }
            }
            _ => {}
        }
    }

    match stack.pop() {
        Some((open, opened)) => Err(format!("'{open}' from line {opened} is never closed")),
        None => Ok(()),
    }
}
