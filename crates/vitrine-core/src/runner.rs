//! Process-runner abstraction for the build pipeline's external commands.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program is not on the executable search path. This is a fatal
    /// configuration error, distinct from a transient run failure.
    #[error("cannot find {program} on the search path")]
    NotFound {
        /// The missing program.
        program: String,
    },

    /// The program ran but exited unsuccessfully.
    #[error("{program} exited unsuccessfully (exit code {code})")]
    Failed {
        /// The program that failed.
        program: String,
        /// Its exit code, or `-1` when terminated by a signal.
        code: i32,
    },

    /// The program could not be spawned or waited on.
    #[error("failed to run {program}: {source}")]
    Io {
        /// The program being run.
        program: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },
}

/// Runs an external command to completion in a working directory.
///
/// The build pipeline depends on this trait rather than on
/// `tokio::process` directly so stages can be tested with fake runners.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` inside `dir`, waiting for it to exit.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] when the program is missing from the
    /// search path, fails to spawn, or exits unsuccessfully.
    async fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<(), ProcessError>;
}
