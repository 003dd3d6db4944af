//! # Graph HTTP Server
//!
//! Exposes the engine to the visualization frontend over HTTP.
//!
//! ## Endpoints
//! - `GET /graph`         - load a game/team, replace the current graph, return its snapshot
//! - `GET /player/:name`  - stat line for one player of the current graph
//! - `GET /centrality`    - eigen-centrality of the current graph
//! - `GET /health`        - liveness plus which graph is loaded
//!
//! The current graph lives in a [`GraphHandle`] owned by the server, never
//! by the engine. Queries made before the first load get a structured
//! `graph_not_loaded` error.

pub mod api;
pub mod state;

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::graph::{Centrality, PlayerStats, Snapshot};
use crate::{HoopConfig, HoopResult};

pub use api::{ApiError, GraphQuery, HealthResponse};
pub use state::{GraphHandle, LoadedGraph};

/// Shared state for the routes.
#[derive(Clone)]
struct AppState {
    config: Arc<HoopConfig>,
    graph: GraphHandle,
}

/// HTTP server over a single swappable graph.
pub struct GraphServer {
    config: Arc<HoopConfig>,
    graph: GraphHandle,
}

impl GraphServer {
    /// Create a server with no graph loaded.
    pub fn new(config: &HoopConfig) -> Self {
        Self {
            config: Arc::new(config.clone()),
            graph: GraphHandle::new(),
        }
    }

    /// The handle the routes read and replace.
    pub fn handle(&self) -> GraphHandle {
        self.graph.clone()
    }

    pub fn bind_address(&self) -> String {
        format!(
            "{}:{}",
            self.config.server.bind_address, self.config.server.port
        )
    }

    /// Build the router with CORS for the configured origins.
    pub fn router(&self) -> Router {
        let state = AppState {
            config: Arc::clone(&self.config),
            graph: self.graph.clone(),
        };

        Router::new()
            .route("/graph", get(get_graph))
            .route("/player/:name", get(get_player_stats))
            .route("/centrality", get(get_centrality))
            .route("/health", get(get_health))
            .layer(cors_layer(&self.config.server.allowed_origins))
            .with_state(state)
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(&self) -> HoopResult<()> {
        let addr = self.bind_address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        log::info!("[SERVER] Listening on http://{}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log::info!("[SERVER] Stopped");
        Ok(())
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("[SERVER] Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("[SERVER] Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("[SERVER] Shutdown signal received");
}

/// Handler for GET /graph
async fn get_graph(
    State(state): State<AppState>,
    query: Result<Query<GraphQuery>, QueryRejection>,
) -> Result<Json<Snapshot>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        log::warn!("[SERVER] Rejected /graph query: {}", rejection.body_text());
        ApiError::InvalidQuery(rejection.body_text())
    })?;

    log::info!(
        "[SERVER] Loading graph for game {} team {}",
        query.game_id,
        query.team_id
    );

    let config = Arc::clone(&state.config);
    let (loaded, snapshot) = tokio::task::spawn_blocking(move || {
        api::load_graph(
            &config.data,
            &query,
            config.analytics.default_min_edge_weight,
        )
    })
    .await
    .map_err(|e| ApiError::IngestFailed(e.to_string()))??;

    state.graph.replace(loaded).await;
    Ok(Json(snapshot))
}

/// Handler for GET /player/:name
async fn get_player_stats(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerStats>, ApiError> {
    let current = state.graph.current().await;
    api::player_stats(current.as_deref().map(|l| &l.graph), &name).map(Json)
}

/// Handler for GET /centrality
async fn get_centrality(State(state): State<AppState>) -> Result<Json<Centrality>, ApiError> {
    let current = state.graph.current().await;
    api::centrality(
        current.as_deref().map(|l| &l.graph),
        state.config.analytics.centrality_max_iterations,
    )
    .map(Json)
}

/// Handler for GET /health
async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let current = state.graph.current().await;
    Json(api::health(current.as_deref()))
}
