//! Command executor for running external tools
//!
//! Used by the optional `gofmt` pass; the command reads the source on stdin
//! and writes the formatted result to stdout.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::generation::GenerationError;

/// Trait for executing external commands
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args`, piping `stdin` into it
    fn execute(
        &self,
        program: &str,
        args: &[&str],
        stdin: &str,
    ) -> Result<CommandResult, GenerationError>;
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// Check if the command was successful
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Default command executor using std::process
pub struct ShellCommandExecutor;

impl ShellCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ShellCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for ShellCommandExecutor {
    fn execute(
        &self,
        program: &str,
        args: &[&str],
        stdin: &str,
    ) -> Result<CommandResult, GenerationError> {
        let failed = |e: std::io::Error| {
            GenerationError::render(program, format!("Failed to execute '{program}': {e}"))
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(failed)?;

        if let Some(mut pipe) = child.stdin.take() {
            pipe.write_all(stdin.as_bytes()).map_err(failed)?;
        }
        let output = child.wait_with_output().map_err(failed)?;

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Mock command executor for testing
#[cfg(test)]
pub struct MockCommandExecutor {
    pub results: std::collections::HashMap<String, CommandResult>,
}

#[cfg(test)]
impl MockCommandExecutor {
    pub fn new() -> Self {
        Self {
            results: std::collections::HashMap::new(),
        }
    }

    pub fn with_result(mut self, program: &str, exit_code: i32, stdout: &str, stderr: &str) -> Self {
        self.results.insert(
            program.to_string(),
            CommandResult {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }
}

#[cfg(test)]
impl CommandExecutor for MockCommandExecutor {
    fn execute(
        &self,
        program: &str,
        _args: &[&str],
        _stdin: &str,
    ) -> Result<CommandResult, GenerationError> {
        self.results.get(program).cloned().ok_or_else(|| {
            GenerationError::render(program, format!("Mock executor has no result for {program}"))
        })
    }
}
