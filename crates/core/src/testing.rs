//! Shared test doubles for pipeline tests.

use std::cell::RefCell;

use crate::command::{CommandOutput, CommandRunner, Invocation};
use crate::error::CommandError;

/// Records every invocation and answers with canned results.
pub(crate) struct RecordingRunner {
    /// Returned as stdout from every captured run.
    stdout: String,
    /// Whether plain runs report a non-zero exit.
    fail: bool,
    calls: RefCell<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::with_stdout("")
    }

    pub fn with_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            fail: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Probes succeed with `stdout`; plain runs fail.
    pub fn failing_with_stdout(stdout: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::with_stdout(stdout)
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run_captured(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok(CommandOutput {
            stdout: self.stdout.clone(),
        })
    }

    fn run(&self, invocation: &Invocation) -> Result<(), CommandError> {
        self.calls.borrow_mut().push(invocation.clone());
        if self.fail {
            return Err(CommandError::ExitStatus {
                command: invocation.to_string(),
                code: Some(1),
            });
        }
        Ok(())
    }
}
