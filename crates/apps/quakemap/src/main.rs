mod config;
mod feeds;
mod page;

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use clap::Parser;
use layers::MapDocument;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Command};
use crate::feeds::AppState;
use crate::page::{MARKERS_PATH, MarkerSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let state = AppState::new(
        cli.feed.client(reqwest::Client::new()),
        MapDocument::new(cli.map.view()),
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(state, cli.addr).await,
        Command::Snapshot { out } => snapshot(&state, &out).await,
    }
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/", get(feeds::index))
        .route("/healthz", get(feeds::healthz))
        .route("/api/map", get(feeds::map_document))
        .route(MARKERS_PATH, get(feeds::earthquakes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve(state: AppState, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    info!(feed = state.feed.url(), "quakemap listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn snapshot(state: &AppState, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let set = feeds::load_markers(&state.feed).await?;
    let html = page::render(&state.map, MarkerSource::Inline(&set))?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(out, html).await?;
    info!(markers = set.count, "snapshot written to {}", out.display());
    Ok(())
}
