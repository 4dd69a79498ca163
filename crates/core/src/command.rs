//! Structured subprocess invocations
//!
//! Commands are built as explicit argument vectors so tests can inspect
//! exactly what would run, and executed synchronously through the
//! `CommandRunner` seam. No shell is involved anywhere.

use std::fmt;
use std::process::Command;

use tracing::debug;

use crate::error::CommandError;

/// A program plus its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn argv(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured output of a finished invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
}

/// Seam between the pipeline and subprocess execution.
///
/// The production implementation spawns the process and blocks; the
/// dry-run printer and the tests' recording runner substitute for it.
pub trait CommandRunner {
    /// Run to completion, capturing stdout. Non-zero exit is an error.
    fn run_captured(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError>;

    /// Run to completion with stdio inherited from this process.
    fn run(&self, invocation: &Invocation) -> Result<(), CommandError>;
}

/// Executes invocations with `std::process::Command`, blocking until exit.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run_captured(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        debug!(command = %invocation, "running (captured)");
        let output = Command::new(invocation.program())
            .args(invocation.argv())
            .output()
            .map_err(|source| CommandError::Spawn {
                command: invocation.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::ExitStatus {
                command: invocation.to_string(),
                code: output.status.code(),
            });
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    fn run(&self, invocation: &Invocation) -> Result<(), CommandError> {
        debug!(command = %invocation, "running");
        let status = Command::new(invocation.program())
            .args(invocation.argv())
            .status()
            .map_err(|source| CommandError::Spawn {
                command: invocation.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(CommandError::ExitStatus {
                command: invocation.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Prints what would run instead of running it.
///
/// Captured runs report empty stdout, so an image-existence probe answers
/// "absent" and the dry run shows the image build that would follow.
#[derive(Debug, Default)]
pub struct DryRunner;

impl CommandRunner for DryRunner {
    fn run_captured(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        println!("dry-run: {}", invocation);
        Ok(CommandOutput::default())
    }

    fn run(&self, invocation: &Invocation) -> Result<(), CommandError> {
        println!("dry-run: {}", invocation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_collects_args_in_order() {
        let invocation = Invocation::new("docker")
            .args(["run", "--rm"])
            .arg("-v")
            .arg("vol:/cache");

        assert_eq!(invocation.program(), "docker");
        assert_eq!(invocation.argv(), ["run", "--rm", "-v", "vol:/cache"]);
    }

    #[test]
    fn display_renders_one_line() {
        let invocation = Invocation::new("docker").args(["volume", "rm", "jtc-cache-volume"]);
        assert_eq!(invocation.to_string(), "docker volume rm jtc-cache-volume");
    }

    #[test]
    #[cfg(unix)]
    fn system_runner_captures_stdout() {
        let invocation = Invocation::new("/bin/sh").args(["-c", "echo hello"]);
        let output = SystemRunner.run_captured(&invocation).unwrap();
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    #[cfg(unix)]
    fn system_runner_reports_exit_code() {
        let invocation = Invocation::new("/bin/sh").args(["-c", "exit 3"]);
        let err = SystemRunner.run(&invocation).unwrap_err();
        assert!(matches!(err, CommandError::ExitStatus { code: Some(3), .. }));
    }

    #[test]
    fn system_runner_reports_spawn_failure() {
        let invocation = Invocation::new("/nonexistent-program-for-test");
        let err = SystemRunner.run(&invocation).unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[test]
    fn dry_runner_answers_absent_to_probes() {
        let invocation = Invocation::new("docker").args(["images", "-q", "build-jtc-image:ubuntu"]);
        let output = DryRunner.run_captured(&invocation).unwrap();
        assert!(output.stdout.is_empty());
    }
}
