//! Router assembly: preview route, static fallback, CORS and tracing.

use std::path::PathBuf;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::preview::{self, AppState};

/// Build the application router.
///
/// The preview route lives under `route_prefix`; every other path is
/// served from the static bundle directory. All origins are allowed —
/// the Storybook UI runs on its own dev-server origin during development.
pub(crate) fn build(state: AppState, static_dir: PathBuf, route_prefix: &str) -> Router {
    let prefix = route_prefix.trim_end_matches('/');
    Router::new()
        .route(
            &format!("{prefix}/storybook_preview/{{name}}"),
            get(preview::preview),
        )
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
