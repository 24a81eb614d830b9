//! Real process runner backed by the executable search path.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use vitrine_core::runner::{ProcessError, ProcessRunner};

/// Runs external commands found on the search path, inheriting the
/// server's stdout/stderr so tool output is visible in the logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<(), ProcessError> {
        let resolved = which::which(program).map_err(|_| ProcessError::NotFound {
            program: program.to_string(),
        })?;
        let status = Command::new(resolved)
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ProcessError::Io {
                program: program.to_string(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::Failed {
                program: program.to_string(),
                code: status.code().unwrap_or(-1),
            })
        }
    }
}
