//! # Graph API Handlers
//!
//! Request/response types and handler functions for the graph endpoints.
//! These are transport-agnostic: the axum routes in the parent module are
//! thin adapters over them, and the CLI can call them directly.
//!
//! ## Endpoints
//! - `GET /graph?game_id=&team_id=&min_edge_weight=` -> [`Snapshot`]
//! - `GET /player/:name`                             -> [`PlayerStats`]
//! - `GET /centrality`                               -> [`Centrality`]
//! - `GET /health`                                   -> [`HealthResponse`]

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assembler;
use crate::graph::{Centrality, GraphError, PlayerStats, Snapshot, WeightedGraph};
use crate::server::state::LoadedGraph;
use crate::DataConfig;

/// Every failure a client can see. Each maps to a status and a stable code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("no graph has been loaded yet")]
    GraphNotLoaded,

    #[error("player not found: {0}")]
    PlayerNotFound(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("could not load game data: {0}")]
    IngestFailed(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::GraphNotLoaded => "graph_not_loaded",
            ApiError::PlayerNotFound(_) => "player_not_found",
            ApiError::InvalidQuery(_) => "invalid_query",
            ApiError::IngestFailed(_) => "ingest_failed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::GraphNotLoaded => StatusCode::CONFLICT,
            ApiError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::IngestFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::UnknownName(name) => ApiError::PlayerNotFound(name),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// JSON error envelope: `{"error": "graph_not_loaded", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Query string for `GET /graph`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQuery {
    pub game_id: String,
    pub team_id: String,
    pub min_edge_weight: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub graph_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Load one game's files, build its graph and project the snapshot.
///
/// Blocking: reads files. Run it on a blocking task from async code.
pub fn load_graph(
    data: &DataConfig,
    query: &GraphQuery,
    default_min_edge_weight: f64,
) -> Result<(LoadedGraph, Snapshot), ApiError> {
    let (graph, report) = assembler::load_and_build(data, &query.game_id, &query.team_id)
        .map_err(|e| {
            log::error!(
                "[SERVER] Failed to load game {} team {}: {}",
                query.game_id,
                query.team_id,
                e
            );
            ApiError::IngestFailed(e.to_string())
        })?;

    let min_edge_weight = query.min_edge_weight.unwrap_or(default_min_edge_weight);
    let snapshot = graph.snapshot(min_edge_weight);
    let loaded = LoadedGraph::new(
        graph,
        query.game_id.clone(),
        query.team_id.clone(),
        min_edge_weight,
        report,
    );
    Ok((loaded, snapshot))
}

/// Stat line for one player of the current graph.
pub fn player_stats(current: Option<&WeightedGraph>, name: &str) -> Result<PlayerStats, ApiError> {
    let graph = current.ok_or(ApiError::GraphNotLoaded)?;
    Ok(graph.player_stats(name)?)
}

/// Centrality for every player of the current graph.
pub fn centrality(current: Option<&WeightedGraph>, max_iterations: usize) -> Result<Centrality, ApiError> {
    let graph = current.ok_or(ApiError::GraphNotLoaded)?;
    Ok(graph.eigen_centrality(max_iterations))
}

pub fn health(current: Option<&LoadedGraph>) -> HealthResponse {
    HealthResponse {
        status: "ok".to_string(),
        graph_loaded: current.is_some(),
        game_id: current.map(|l| l.game_id.clone()),
        team_id: current.map(|l| l.team_id.clone()),
        players: current.map(|l| l.graph.len()),
        loaded_at: current.map(|l| l.loaded_at),
    }
}
