//! Shared test helpers for server integration tests.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use vitrine_core::args::Arg;
use vitrine_server::Storybook;

/// A registry with two typed demo components.
pub fn demo_storybook() -> Storybook {
    let mut storybook = Storybook::new();
    storybook.add_component(
        "greeting",
        |name: String| format!("<p>Hello, {name}!</p>"),
        vec![Arg::text("name", "World")],
    );
    storybook.add_component(
        "button",
        |text: String, disabled: bool| {
            format!(
                "<button{}>{text}</button>",
                if disabled { " disabled" } else { "" }
            )
        },
        vec![
            Arg::text("text", "Click me"),
            Arg::boolean("disabled", false),
        ],
    );
    storybook
}

/// Send a GET request and return the status and body text.
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}
