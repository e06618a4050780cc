//! # contract: the boundary between the pipeline and the processes it drives
//!
//! The deploy pipeline is glue over two external tools (a version-control
//! client and a static-site generator). Everything it asks of them goes
//! through the single [`CommandRunner`] trait defined here, so the whole
//! pipeline can be exercised against scripted or mock runners without
//! touching the host system.
//!
//! ## Interface & Extensibility
//! - Implement [`CommandRunner`] to supply a new execution backend (the
//!   production one lives in [`crate::exec`]).
//! - All invocations are blocking; the pipeline is strictly sequential and
//!   each step gates the next on the reported exit status.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests.

use std::path::{Path, PathBuf};

use mockall::automock;

/// Error type for command execution (boxed; launch failures originate in
/// `std::io`).
pub type CommandError = Box<dyn std::error::Error + Send + Sync>;

/// A single external command invocation, fully described.
///
/// Arguments are discrete strings handed to the operating system as an argv
/// array; nothing is routed through a shell, so branch names or remote URLs
/// containing shell metacharacters are never reinterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory for the child; `None` inherits the parent's.
    pub cwd: Option<PathBuf>,
    /// Capture stdout for inspection instead of streaming it to the console.
    pub capture: bool,
}

impl CommandSpec {
    /// A command whose stdout streams to the console (build tool, pushes).
    pub fn streamed(program: &str, args: &[&str]) -> Self {
        CommandSpec {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: None,
            capture: false,
        }
    }

    /// A command whose stdout is captured for parsing (queries).
    pub fn captured(program: &str, args: &[&str]) -> Self {
        CommandSpec {
            capture: true,
            ..CommandSpec::streamed(program, args)
        }
    }

    /// Run the command from `dir` instead of the inherited working directory.
    pub fn in_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }
}

/// Outcome of a command that ran to completion. A command that could not be
/// launched at all surfaces as a [`CommandError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status; `None` when the child was terminated by a signal.
    pub status: Option<i32>,
    /// Captured stdout; empty unless the invocation asked for capture.
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Exit status for reporting; signal termination maps to -1.
    pub fn code(&self) -> i32 {
        self.status.unwrap_or(-1)
    }
}

/// Trait for running one external command to completion, blocking.
/// Allows plugging in real, scripted or mockable runners.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait CommandRunner: Send + Sync {
    /// Run the described command and report how it exited.
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError>;
}
