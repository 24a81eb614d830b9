//! Vitrine preview server entry point, with two illustrative components.

use std::error::Error;
use std::io;
use std::net::SocketAddr;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use vitrine_core::args::{Arg, IntConfig};
use vitrine_core::component::Renderable;
use vitrine_server::Storybook;

struct Greeting {
    name: String,
}

impl Renderable for Greeting {
    fn render(&self, writer: &mut dyn io::Write) -> io::Result<()> {
        write!(writer, "<p>Hello, {}!</p>", escape(&self.name))
    }
}

struct Button {
    label: String,
    disabled: bool,
    width: i64,
}

impl Renderable for Button {
    fn render(&self, writer: &mut dyn io::Write) -> io::Result<()> {
        write!(
            writer,
            r#"<button style="width: {}px"{}>{}</button>"#,
            self.width,
            if self.disabled { " disabled" } else { "" },
            escape(&self.label),
        )
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Vitrine preview server");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "60606".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;

    // Register components.
    let mut storybook = Storybook::new().with_server_addr(addr);
    storybook.add_component(
        "greeting",
        |name: String| Greeting { name },
        vec![Arg::text("name", "World")],
    );
    storybook.add_component(
        "button",
        |label: String, disabled: bool, width: i64| Button {
            label,
            disabled,
            width,
        },
        vec![
            Arg::text("label", "Click me"),
            Arg::boolean("disabled", false),
            Arg::integer(
                "width",
                120,
                IntConfig {
                    min: Some(40),
                    max: Some(400),
                    step: Some(10),
                },
            ),
        ],
    );

    // Cancel on Ctrl-C; the build pipeline checks between stages and the
    // listener shuts down gracefully.
    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    storybook.serve(cancel).await?;
    Ok(())
}
