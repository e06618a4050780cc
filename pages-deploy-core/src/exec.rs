//! Production [`CommandRunner`] backed by `std::process`.

use std::process::{Command, Stdio};

use tracing::{debug, error};

use crate::contract::{CommandError, CommandOutput, CommandRunner, CommandSpec};

/// Runs commands on the host system. Stateless; stderr always streams to the
/// console so external-tool diagnostics stay visible.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(dir) = &spec.cwd {
            command.current_dir(dir);
        }
        debug!(
            program = %spec.program,
            args = ?spec.args,
            cwd = ?spec.cwd,
            capture = spec.capture,
            "Running external command"
        );

        if spec.capture {
            let output = command.stderr(Stdio::inherit()).output().map_err(|e| {
                error!(error = ?e, program = %spec.program, "Failed to launch external command");
                CommandError::from(e)
            })?;
            Ok(CommandOutput {
                status: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            })
        } else {
            let status = command.status().map_err(|e| {
                error!(error = ?e, program = %spec.program, "Failed to launch external command");
                CommandError::from(e)
            })?;
            Ok(CommandOutput {
                status: status.code(),
                stdout: String::new(),
            })
        }
    }
}
