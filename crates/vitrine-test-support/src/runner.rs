//! Fake `ProcessRunner` implementations for pipeline tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use vitrine_core::runner::{ProcessError, ProcessRunner};

/// One recorded external-command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The program that was requested.
    pub program: String,
    /// Its arguments.
    pub args: Vec<String>,
    /// The working directory it was run in.
    pub dir: PathBuf,
}

/// A process runner that records every invocation and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    /// Create a runner with no recorded invocations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all invocations so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<(), ProcessError> {
        self.calls.lock().unwrap().push(Invocation {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            dir: dir.to_path_buf(),
        });
        Ok(())
    }
}

/// A process runner on which every invocation fails with a non-zero exit.
#[derive(Debug, Default)]
pub struct FailingRunner;

#[async_trait]
impl ProcessRunner for FailingRunner {
    async fn run(&self, program: &str, _args: &[&str], _dir: &Path) -> Result<(), ProcessError> {
        Err(ProcessError::Failed {
            program: program.to_string(),
            code: 1,
        })
    }
}

/// A process runner that reports every program as missing from the
/// search path, for exercising fatal dependency errors.
#[derive(Debug, Default)]
pub struct MissingProgramRunner;

#[async_trait]
impl ProcessRunner for MissingProgramRunner {
    async fn run(&self, program: &str, _args: &[&str], _dir: &Path) -> Result<(), ProcessError> {
        Err(ProcessError::NotFound {
            program: program.to_string(),
        })
    }
}
