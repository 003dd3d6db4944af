//! The server's "current graph": a handle that is swapped wholesale on each
//! load and never patched in place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::assembler::AssemblyReport;
use crate::graph::WeightedGraph;

/// A finished graph plus where it came from.
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: WeightedGraph,
    pub game_id: String,
    pub team_id: String,
    pub min_edge_weight: f64,
    pub report: AssemblyReport,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedGraph {
    pub fn new(
        graph: WeightedGraph,
        game_id: impl Into<String>,
        team_id: impl Into<String>,
        min_edge_weight: f64,
        report: AssemblyReport,
    ) -> Self {
        Self {
            graph,
            game_id: game_id.into(),
            team_id: team_id.into(),
            min_edge_weight,
            report,
            loaded_at: Utc::now(),
        }
    }
}

/// Shared, swappable reference to the most recently loaded graph.
///
/// Loads build a fresh graph off-lock and publish it with one write.
/// Readers clone the inner `Arc` and drop the lock before computing.
#[derive(Debug, Clone, Default)]
pub struct GraphHandle {
    inner: Arc<RwLock<Option<Arc<LoadedGraph>>>>,
}

impl GraphHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `loaded` as the current graph, returning the shared copy.
    pub async fn replace(&self, loaded: LoadedGraph) -> Arc<LoadedGraph> {
        let loaded = Arc::new(loaded);
        let mut slot = self.inner.write().await;
        if let Some(prev) = slot.as_ref() {
            log::debug!(
                "[SERVER] Replacing graph for game {} team {}",
                prev.game_id,
                prev.team_id
            );
        }
        *slot = Some(Arc::clone(&loaded));
        loaded
    }

    /// The current graph, or `None` before the first load.
    pub async fn current(&self) -> Option<Arc<LoadedGraph>> {
        self.inner.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
