//! Server and build-pipeline error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use vitrine_core::runner::ProcessError;

/// Failures of the three build-pipeline stages, each wrapped with the
/// stage it occurred in. None are retried; the first failure aborts the
/// remaining pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Creating the Storybook working directory failed.
    #[error("failed to create storybook directory {path}: {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The install stage's scaffold command failed. A missing `npx` is a
    /// fatal configuration error, not a transient failure.
    #[error("cannot install storybook, check that Node.js is installed: {source}")]
    Install {
        /// The underlying process error.
        #[source]
        source: ProcessError,
    },

    /// Hashing the stories directory failed.
    #[error("failed to hash stories directory {path}: {source}")]
    HashStories {
        /// The directory being hashed.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Deleting or recreating the stories directory failed.
    #[error("failed to reset stories directory {path}: {source}")]
    ResetStories {
        /// The stories directory.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Serializing a story configuration failed.
    #[error("failed to encode story config for {title}: {source}")]
    EncodeConfig {
        /// The component whose config failed to encode.
        title: String,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing a story configuration file failed.
    #[error("failed to write story config {path}: {source}")]
    WriteConfig {
        /// The config file path.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Writing the preview-bridge script failed.
    #[error("failed to write storybook preview script {path}: {source}")]
    WritePreview {
        /// The script path.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The static-bundle build command failed. A missing `npm` is a
    /// fatal configuration error, not a transient failure.
    #[error("cannot build storybook static bundle, check that Node.js is installed: {source}")]
    Bundle {
        /// The underlying process error.
        #[source]
        source: ProcessError,
    },
}

/// Top-level errors of the serve lifecycle.
#[derive(Debug, Error)]
pub enum AppError {
    /// The startup build pipeline failed.
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// Binding the listener or serving failed.
    #[error("server error: {0}")]
    Server(#[from] io::Error),
}
