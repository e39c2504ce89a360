//! External Tool Invocation
//!
//! Handles running the browser's helper programs:
//! - Structured program + argument lists (no shell in between)
//! - Pluggable runners for real, dry-run and recorded execution
//! - Exit status reporting
//!
//! Tool failures never abort the caller. A non-zero exit or a program that
//! cannot be started is logged and the run carries on as if it succeeded.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info, warn};

/// A single external program call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    program: PathBuf,
    args: Vec<String>,
}

impl ToolInvocation {
    /// Creates an invocation with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends a path argument.
    pub fn path_arg(self, path: impl AsRef<Path>) -> Self {
        let value = path.as_ref().to_string_lossy().into_owned();
        self.arg(value)
    }

    /// Appends a flag followed by its value.
    pub fn option(self, flag: &str, value: impl Into<String>) -> Self {
        self.arg(flag).arg(value)
    }

    /// The program to execute.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments in call order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns true if `flag` appears as an argument.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == flag)
    }

    /// Returns the argument following the first occurrence of `flag`.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Builds the process command.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Renders the invocation the way it would be typed in a shell.
impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Single-quotes an argument when it would be split or expanded by a shell.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));

    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// What happened when a tool was handed to a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Exited with status zero
    Success,

    /// Exited with a non-zero status (None when killed by a signal)
    Failed(Option<i32>),

    /// Could not be started at all
    NotStarted(String),

    /// Not executed (dry run or recording)
    Skipped,
}

/// Executes external tool invocations.
pub trait CommandRunner {
    /// Runs one invocation to completion.
    fn run(&mut self, invocation: &ToolInvocation) -> ToolStatus;
}

/// Runs tools as child processes sharing the terminal.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> ToolStatus {
        debug!("Executing: {}", invocation);

        let status = match invocation.to_command().status() {
            Ok(status) if status.success() => ToolStatus::Success,
            Ok(status) => ToolStatus::Failed(status.code()),
            Err(e) => ToolStatus::NotStarted(e.to_string()),
        };

        match &status {
            ToolStatus::Failed(code) => warn!(
                "{} exited with code {:?}; continuing",
                invocation.program().display(),
                code
            ),
            ToolStatus::NotStarted(reason) => warn!(
                "Could not start {}: {}; continuing",
                invocation.program().display(),
                reason
            ),
            _ => {}
        }

        status
    }
}

/// Logs each invocation instead of executing it.
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> ToolStatus {
        info!("[dry-run] {}", invocation);
        ToolStatus::Skipped
    }
}

/// Keeps every invocation it receives, in order, without executing anything.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: Vec<ToolInvocation>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invocations received so far.
    pub fn invocations(&self) -> &[ToolInvocation] {
        &self.invocations
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> ToolStatus {
        self.invocations.push(invocation.clone());
        ToolStatus::Skipped
    }
}
