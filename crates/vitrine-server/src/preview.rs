//! The preview request handler.
//!
//! Terminal outcomes per request: 200 with the rendered component body,
//! 404 for an unknown component name, 500 with the error text when
//! dispatch or rendering fails. Error detail is exposed to the client by
//! design; this is a local development tool.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tracing::info;
use vitrine_core::args::QueryValues;
use vitrine_core::dispatch::{self, ArgValue};

use crate::registry::RegisteredComponent;

/// Read-only state shared across requests once the listener starts.
#[derive(Clone)]
pub(crate) struct AppState {
    pub components: Arc<HashMap<String, RegisteredComponent>>,
}

/// GET `{route_prefix}/storybook_preview/{name}`
pub(crate) async fn preview(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> Response {
    let Some(component) = state.components.get(&name) else {
        info!(component = %name, path = %uri, "component name not found");
        return StatusCode::NOT_FOUND.into_response();
    };

    let query = QueryValues::from(params);
    let values: Vec<ArgValue> = component
        .args
        .iter()
        .map(|arg| arg.extract(&query))
        .collect();

    match dispatch::invoke(&name, &component.constructor, &values) {
        Ok(rendered) => {
            let mut body = Vec::new();
            match rendered.render(&mut body) {
                Ok(()) => (
                    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    body,
                )
                    .into_response(),
                Err(err) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed to render component {name}: {err}"),
                )
                    .into_response(),
            }
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}
