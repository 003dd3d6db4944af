//! # hoopgraph - Core Library
//!
//! Models one team's offense in a single basketball game as a weighted
//! directed graph over players. The diagonal of the matrix holds points
//! scored; off-diagonal cells hold assist weight flowing from a passer to a
//! shooter.
//!
//! From that matrix the engine derives scoring, playmaking, receiving,
//! offense created, offense share, team points, an eigen-centrality ranking
//! and a node/link snapshot for visualization.
//!
//! ## Layout
//! - [`graph`] - the engine. Pure, no I/O, one matrix per instance.
//! - [`ingest`] - play-by-play and box-score file loaders, value sanitization.
//! - [`assembler`] - turns ingested records into a finished graph.
//! - [`server`] - HTTP exposure holding the current graph in a swappable handle.

pub mod assembler;
pub mod graph;
pub mod ingest;
pub mod server;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::graph::GraphError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Unified error type for hoopgraph.
#[derive(Error, Debug)]
pub enum HoopError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type HoopResult<T> = Result<T, HoopError>;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Top-level configuration.
///
/// Loaded from `hoopgraph.toml` in the working directory or a path supplied
/// via CLI flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoopConfig {
    /// Where ingest reads its input files.
    pub data: DataConfig,

    /// Analytics defaults.
    pub analytics: AnalyticsConfig,

    /// HTTP server settings.
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Assisted-shot play feed (`{"results": [...]}`).
    pub plays_path: PathBuf,

    /// Box score in stats-API `resultSets` shape.
    pub box_score_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Links lighter than this are left out of snapshots.
    pub default_min_edge_weight: f64,

    /// Iteration cap for eigen-centrality.
    pub centrality_max_iterations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1").
    pub bind_address: String,

    /// Port to listen on.
    pub port: u16,

    /// Origins allowed by CORS (the visualization frontend).
    pub allowed_origins: Vec<String>,
}

impl Default for HoopConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                plays_path: PathBuf::from("./data/plays.json"),
                box_score_path: PathBuf::from("./data/boxscore.json"),
            },
            analytics: AnalyticsConfig {
                default_min_edge_weight: graph::snapshot::DEFAULT_MIN_EDGE_WEIGHT,
                centrality_max_iterations: graph::centrality::DEFAULT_MAX_ITERATIONS,
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8000,
                allowed_origins: vec![
                    "http://localhost:5173".to_string(),
                    "http://127.0.0.1:5173".to_string(),
                ],
            },
        }
    }
}

impl HoopConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> HoopResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HoopConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &std::path::Path) -> HoopResult<Self> {
        if path.exists() {
            log::info!("Loading configuration from: {}", path.display());
            Self::from_file(path)
        } else {
            log::info!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Write the default configuration to a TOML file.
    pub fn write_default(path: &std::path::Path) -> HoopResult<()> {
        let config = Self::default();
        let content =
            toml::to_string_pretty(&config).map_err(|e| HoopError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_toml_roundtrip() {
        let config = HoopConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: HoopConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.analytics.centrality_max_iterations, 50);
        assert_eq!(parsed.analytics.default_min_edge_weight, 1.0);
        assert_eq!(parsed.server.port, 8000);
        assert_eq!(parsed.server.allowed_origins.len(), 2);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = std::env::temp_dir().join("hoopgraph_missing_config_xyz.toml");
        let _ = std::fs::remove_file(&path);
        let config = HoopConfig::load_or_default(&path).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1");
    }

    #[test]
    fn test_write_default_then_load() {
        let path = std::env::temp_dir().join("hoopgraph_test_config.toml");
        HoopConfig::write_default(&path).unwrap();
        let loaded = HoopConfig::from_file(&path).unwrap();
        assert_eq!(loaded.data.plays_path, PathBuf::from("./data/plays.json"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_graph_error_converts() {
        let err: HoopError = GraphError::UnknownName("Nobody".to_string()).into();
        assert!(err.to_string().contains("Nobody"));
    }
}
