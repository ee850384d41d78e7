//! PyLesson · Lesson content backend
//!
//! - Axum HTTP + WebSocket API serving the curriculum and rendered lesson HTML
//! - Lesson markdown → HTML renderer (see `markdown`)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                    : u16 (default 3000)
//!   CURRICULUM_CONFIG_PATH  : path to TOML config (render policy + sessions/lessons)
//!   LOG_LEVEL               : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT              : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod seeds;
mod state;
mod protocol;
mod logic;
mod markdown;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Curriculum is loaded once and shared read-only.
  let state = Arc::new(AppState::new());

  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "pylesson_backend", %addr, sessions = state.sessions().len(), "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
