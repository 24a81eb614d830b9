//! The component registry and top-level serve lifecycle.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio_util::sync::CancellationToken;
use tracing::info;
use vitrine_core::args::Arg;
use vitrine_core::config::StoryConfig;
use vitrine_core::dispatch::{Constructor, IntoConstructor};
use vitrine_core::runner::ProcessRunner;

use crate::build::BuildPipeline;
use crate::error::{AppError, BuildError};
use crate::preview::AppState;
use crate::router;
use crate::runner::SystemRunner;

/// A registered component: its argument descriptors in declaration order
/// and its dispatchable constructor.
#[derive(Clone)]
pub(crate) struct RegisteredComponent {
    pub args: Vec<Arg>,
    pub constructor: Constructor,
}

/// The component registry and HTTP facade.
///
/// Owns the name→configuration and name→component maps, populated during
/// single-threaded registration before the listener starts and treated as
/// read-only afterwards. Defaults: working directory `./storybook-server`,
/// listen address `0.0.0.0:60606`, empty route prefix.
pub struct Storybook {
    path: PathBuf,
    route_prefix: String,
    addr: SocketAddr,
    configs: HashMap<String, StoryConfig>,
    components: HashMap<String, RegisteredComponent>,
}

impl Default for Storybook {
    fn default() -> Self {
        Self::new()
    }
}

impl Storybook {
    /// Create a registry with default path, address, and route prefix.
    ///
    /// # Panics
    ///
    /// Never panics; the default address literal always parses.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("./storybook-server"),
            route_prefix: String::new(),
            addr: "0.0.0.0:60606".parse().expect("default address parses"),
            configs: HashMap::new(),
            components: HashMap::new(),
        }
    }

    /// Set the Storybook working directory.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the listen address.
    #[must_use]
    pub fn with_server_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Set the HTTP route prefix, e.g. `/prod`.
    #[must_use]
    pub fn with_route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = prefix.into();
        self
    }

    /// Register a component under `name` with a typed constructor.
    ///
    /// Builds the story configuration from the descriptors and stores it
    /// alongside the erased constructor. Re-registering a name silently
    /// replaces the prior entry (last write wins).
    ///
    /// # Panics
    ///
    /// Panics when the descriptor count or kinds do not match the
    /// constructor's declared parameters. That is a registration-time
    /// programming error, caught here rather than on every request.
    pub fn add_component<P>(
        &mut self,
        name: &str,
        constructor: impl IntoConstructor<P>,
        args: Vec<Arg>,
    ) {
        let constructor = constructor.into_constructor();
        assert_eq!(
            args.len(),
            constructor.arity(),
            "component {name}: {} descriptors for a constructor of arity {}",
            args.len(),
            constructor.arity(),
        );
        for (arg, param) in args.iter().zip(constructor.params()) {
            assert_eq!(
                arg.kind, *param,
                "component {name}: descriptor {} is {} but the constructor parameter is {param}",
                arg.name, arg.kind,
            );
        }
        self.add_raw_component(name, constructor, args);
    }

    /// Register a component with an already-erased constructor, skipping
    /// the fail-fast validation of `add_component`. Contract violations
    /// then surface at request time as 500 responses.
    pub fn add_raw_component(&mut self, name: &str, constructor: Constructor, args: Vec<Arg>) {
        self.configs
            .insert(name.to_string(), StoryConfig::new(name, &args));
        self.components
            .insert(name.to_string(), RegisteredComponent { args, constructor });
    }

    /// The registered story configurations, keyed by component name.
    #[must_use]
    pub fn configs(&self) -> &HashMap<String, StoryConfig> {
        &self.configs
    }

    /// Run the build pipeline against the working directory.
    ///
    /// # Errors
    ///
    /// Returns the failing stage's [`BuildError`].
    pub async fn build(
        &self,
        runner: &dyn ProcessRunner,
        cancel: &CancellationToken,
    ) -> Result<(), BuildError> {
        BuildPipeline::new(&self.path, &self.configs, runner)
            .run(cancel)
            .await
    }

    /// Assemble the HTTP router: the preview route under the configured
    /// prefix, static files from `<path>/storybook-static` for everything
    /// else, wrapped in permissive CORS and request tracing.
    #[must_use]
    pub fn router(&self) -> Router {
        let state = AppState {
            components: Arc::new(self.components.clone()),
        };
        router::build(state, self.path.join("storybook-static"), &self.route_prefix)
    }

    /// Run the build pipeline, then serve previews until `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] from the build pipeline, listener binding,
    /// or the serving task.
    pub async fn serve(&self, cancel: CancellationToken) -> Result<(), AppError> {
        self.build(&SystemRunner, &cancel).await?;

        let app = self.router();
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!(address = %self.addr, "starting preview server");
        axum::serve(listener, app)
            .with_graceful_shutdown(cancel.cancelled_owned())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::dispatch::ArgKind;

    #[test]
    fn test_registration_builds_config_with_default_story() {
        let mut sb = Storybook::new();
        sb.add_component(
            "greeting",
            |name: String| format!("Hello, {name}!"),
            vec![Arg::text("name", "World")],
        );

        let config = &sb.configs()["greeting"];
        assert_eq!(config.title, "greeting");
        assert_eq!(config.stories.len(), 1);
        assert_eq!(config.stories[0].name, "Default");
    }

    #[test]
    fn test_reregistering_a_name_replaces_the_prior_entry() {
        let mut sb = Storybook::new();
        sb.add_component("box", || "first".to_string(), vec![]);
        sb.add_component(
            "box",
            |label: String| label,
            vec![Arg::text("label", "second")],
        );

        assert_eq!(sb.configs().len(), 1);
        assert_eq!(sb.configs()["box"].args.len(), 1);
    }

    #[test]
    #[should_panic(expected = "descriptors for a constructor of arity")]
    fn test_descriptor_count_mismatch_fails_fast() {
        let mut sb = Storybook::new();
        sb.add_component("bad", |text: String| text, vec![]);
    }

    #[test]
    #[should_panic(expected = "but the constructor parameter is")]
    fn test_descriptor_kind_mismatch_fails_fast() {
        let mut sb = Storybook::new();
        sb.add_component(
            "bad",
            |text: String| text,
            vec![Arg::boolean("text", false)],
        );
    }

    #[test]
    fn test_raw_registration_skips_validation() {
        let mut sb = Storybook::new();
        sb.add_raw_component(
            "odd",
            Constructor::raw(vec![ArgKind::Text], |_| vec![]),
            vec![],
        );

        assert!(sb.configs().contains_key("odd"));
    }
}
