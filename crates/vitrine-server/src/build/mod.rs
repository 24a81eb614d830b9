//! The Storybook build pipeline.
//!
//! Three idempotent stages run once at startup, before the listener:
//! install the external tool if absent, regenerate the per-component
//! story configs (detecting whether they changed), and rebuild the
//! static bundle only when they did. Cancellation is checked between
//! stages; an already-launched command runs to completion.

mod dirhash;
mod preview_js;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::info;
use vitrine_core::config::StoryConfig;
use vitrine_core::runner::ProcessRunner;

use crate::error::BuildError;

pub use preview_js::PREVIEW_JS;

/// The ordered list of build stages, run against a working directory.
pub struct BuildPipeline<'a> {
    path: &'a Path,
    configs: &'a HashMap<String, StoryConfig>,
    runner: &'a dyn ProcessRunner,
}

impl<'a> BuildPipeline<'a> {
    /// Create a pipeline over the working directory `path` and the
    /// registered story configurations.
    #[must_use]
    pub fn new(
        path: &'a Path,
        configs: &'a HashMap<String, StoryConfig>,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            path,
            configs,
            runner,
        }
    }

    /// Run all three stages in order, short-circuiting on error and
    /// returning early (without error) when `cancel` fires between
    /// stages.
    ///
    /// # Errors
    ///
    /// Returns the first stage's [`BuildError`]; later stages do not run.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<(), BuildError> {
        info!("installing storybook");
        self.install().await?;
        if cancel.is_cancelled() {
            info!("build cancelled before configure stage");
            return Ok(());
        }

        info!("configuring storybook");
        let changed = self.configure()?;
        if cancel.is_cancelled() {
            info!("build cancelled before bundle stage");
            return Ok(());
        }

        if changed {
            info!("story config not present or changed, rebuilding storybook");
            self.bundle().await?;
        } else {
            info!("storybook is up to date, skipping build step");
        }
        Ok(())
    }

    /// Install stage: scaffold the Storybook server project into the
    /// working directory, or skip when the directory already exists.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::CreateDir`] or [`BuildError::Install`]; a
    /// missing `npx` surfaces as a fatal configuration error naming it.
    pub async fn install(&self) -> Result<(), BuildError> {
        if self.path.exists() {
            info!(path = %self.path.display(), "storybook already installed, skipping installation");
            return Ok(());
        }
        fs::create_dir_all(self.path).map_err(|source| BuildError::CreateDir {
            path: self.path.to_path_buf(),
            source,
        })?;
        self.runner
            .run("npx", &["sb", "init", "-t", "server"], self.path)
            .await
            .map_err(|source| BuildError::Install { source })
    }

    /// Configure stage: regenerate the stories directory wholesale and
    /// write the preview-bridge script. Returns whether the regenerated
    /// configs differ from the previous run's — the sole change signal
    /// consumed by the bundle stage.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] naming the file or directory that failed.
    pub fn configure(&self) -> Result<bool, BuildError> {
        let stories_dir = self.path.join("stories");
        let before = dirhash::hash_dir(&stories_dir).map_err(|source| BuildError::HashStories {
            path: stories_dir.clone(),
            source,
        })?;

        if stories_dir.exists() {
            fs::remove_dir_all(&stories_dir).map_err(|source| BuildError::ResetStories {
                path: stories_dir.clone(),
                source,
            })?;
        }
        fs::create_dir_all(&stories_dir).map_err(|source| BuildError::ResetStories {
            path: stories_dir.clone(),
            source,
        })?;

        // Sorted for stable log and write order; the hash is
        // order-independent either way.
        let mut configs: Vec<&StoryConfig> = self.configs.values().collect();
        configs.sort_by(|a, b| a.title.cmp(&b.title));
        for config in configs {
            let file_path = stories_dir.join(format!("{}.stories.json", config.title));
            let encoded =
                serde_json::to_vec(config).map_err(|source| BuildError::EncodeConfig {
                    title: config.title.clone(),
                    source,
                })?;
            fs::write(&file_path, encoded).map_err(|source| BuildError::WriteConfig {
                path: file_path.clone(),
                source,
            })?;
        }

        let after = dirhash::hash_dir(&stories_dir).map_err(|source| BuildError::HashStories {
            path: stories_dir.clone(),
            source,
        })?;

        let preview_dir = self.path.join(".storybook");
        fs::create_dir_all(&preview_dir).map_err(|source| BuildError::WritePreview {
            path: preview_dir.clone(),
            source,
        })?;
        let preview_path = preview_dir.join("preview.js");
        fs::write(&preview_path, PREVIEW_JS).map_err(|source| BuildError::WritePreview {
            path: preview_path,
            source,
        })?;

        Ok(before != after)
    }

    /// Bundle stage: rebuild the Storybook static bundle.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Bundle`]; a missing `npm` surfaces as a
    /// fatal configuration error naming it.
    pub async fn bundle(&self) -> Result<(), BuildError> {
        self.runner
            .run("npm", &["run", "build-storybook"], self.path)
            .await
            .map_err(|source| BuildError::Bundle { source })
    }
}
