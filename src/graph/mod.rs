// hoopgraph - Assist Network Engine
// mod.rs - Module exports and WeightedGraph struct (the main interface)
//
// The matrix is indexed by player. Row i, column j (i != j) holds assist
// weight passed from player i to player j. The diagonal holds points scored.
//
// Copyright (c) 2026 CIPS Corps. All rights reserved.

pub mod analytics;
pub mod centrality;
pub mod snapshot;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use analytics::{GraphStats, PlayerStats};
pub use centrality::Centrality;
pub use snapshot::{Snapshot, SnapshotLink, SnapshotNode};

/// Errors raised by name-keyed graph operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("player not found: {0}")]
    UnknownName(String),
}

/// Why a `directed_edge` call left the matrix untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No passer on the record (unassisted play).
    MissingPasser,
    MissingShooter,
    UnknownPasser(String),
    UnknownShooter(String),
    /// Passer and shooter are the same player. The diagonal is reserved for
    /// scoring, so these never land on it.
    SelfLoop,
}

/// Result of a `directed_edge` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeOutcome {
    Applied,
    Skipped(SkipReason),
}

impl EdgeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EdgeOutcome::Applied)
    }
}

/// Weighted passer -> shooter matrix for one team in one game.
///
/// Built once from a fixed name set, mutated during assembly, then treated
/// as read-only. A new game means a new instance.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    /// Player names in matrix order.
    names: Vec<String>,

    /// name -> row/column position. Derived once from `names`.
    index: HashMap<String, usize>,

    /// matrix[passer][shooter]; matrix[i][i] is player i's points.
    matrix: Vec<Vec<f64>>,
}

impl WeightedGraph {
    /// Create an all-zero graph over `names`.
    ///
    /// Indices are assigned in iteration order starting at 0. A name that
    /// appears twice keeps its first position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for name in names {
            let name = name.into();
            if index.contains_key(&name) {
                continue;
            }
            index.insert(name.clone(), ordered.len());
            ordered.push(name);
        }

        let n = ordered.len();
        Self {
            names: ordered,
            index,
            matrix: vec![vec![0.0; n]; n],
        }
    }

    /// Player names in matrix order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of players (N for the N x N matrix).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Matrix position of `name`.
    pub fn index_of(&self, name: &str) -> Result<usize, GraphError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownName(name.to_string()))
    }

    /// Raw cell access by position. Out-of-range positions read as 0.0.
    pub fn weight_at(&self, passer: usize, shooter: usize) -> f64 {
        self.matrix
            .get(passer)
            .and_then(|row| row.get(shooter))
            .copied()
            .unwrap_or(0.0)
    }

    /// Weight of the passer -> shooter edge, by name.
    pub fn edge_weight(&self, passer: &str, shooter: &str) -> Result<f64, GraphError> {
        let i = self.index_of(passer)?;
        let j = self.index_of(shooter)?;
        Ok(self.matrix[i][j])
    }

    /// The full matrix, rows are passers.
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    /// Write a player's points onto the diagonal, replacing any prior value.
    pub fn set_node_val(&mut self, name: &str, value: f64) -> Result<(), GraphError> {
        let i = self.index_of(name)?;
        self.matrix[i][i] = value;
        Ok(())
    }

    /// Resolve both endpoints of an edge, or say why the edge can't apply.
    fn both_names_known(
        &self,
        passer: Option<&str>,
        shooter: Option<&str>,
    ) -> Result<(usize, usize), SkipReason> {
        let passer = passer.ok_or(SkipReason::MissingPasser)?;
        let shooter = shooter.ok_or(SkipReason::MissingShooter)?;
        let i = *self
            .index
            .get(passer)
            .ok_or_else(|| SkipReason::UnknownPasser(passer.to_string()))?;
        let j = *self
            .index
            .get(shooter)
            .ok_or_else(|| SkipReason::UnknownShooter(shooter.to_string()))?;
        if i == j {
            return Err(SkipReason::SelfLoop);
        }
        Ok((i, j))
    }

    /// Add `value` to the passer -> shooter edge.
    ///
    /// Records without a passer are normal (unassisted shots), so missing or
    /// unknown endpoints are reported as `Skipped` instead of raised. A
    /// skipped call never touches the matrix.
    pub fn directed_edge(
        &mut self,
        passer: Option<&str>,
        shooter: Option<&str>,
        value: f64,
    ) -> EdgeOutcome {
        match self.both_names_known(passer, shooter) {
            Ok((i, j)) => {
                self.matrix[i][j] += value;
                EdgeOutcome::Applied
            }
            Err(reason) => EdgeOutcome::Skipped(reason),
        }
    }

    /// Positions of every non-finite cell, row-major.
    pub fn non_finite_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for (i, row) in self.matrix.iter().enumerate() {
            for (j, w) in row.iter().enumerate() {
                if !w.is_finite() {
                    cells.push((i, j));
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph_is_zero() {
        let graph = WeightedGraph::new(["A", "B", "C"]);
        assert_eq!(graph.len(), 3);
        for row in graph.matrix() {
            assert_eq!(row.len(), 3);
            assert!(row.iter().all(|w| *w == 0.0));
        }
    }

    #[test]
    fn test_index_follows_iteration_order() {
        let graph = WeightedGraph::new(vec!["Haliburton".to_string(), "Siakam".to_string()]);
        assert_eq!(graph.index_of("Haliburton").unwrap(), 0);
        assert_eq!(graph.index_of("Siakam").unwrap(), 1);
        assert_eq!(graph.names(), &["Haliburton".to_string(), "Siakam".to_string()]);
    }

    #[test]
    fn test_duplicate_names_keep_first_position() {
        let graph = WeightedGraph::new(["A", "B", "A"]);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.index_of("A").unwrap(), 0);
        assert_eq!(graph.index_of("B").unwrap(), 1);
    }

    #[test]
    fn test_empty_graph() {
        let graph = WeightedGraph::new(Vec::<String>::new());
        assert!(graph.is_empty());
        assert!(graph.matrix().is_empty());
        assert_eq!(
            graph.index_of("A"),
            Err(GraphError::UnknownName("A".to_string()))
        );
    }

    #[test]
    fn test_set_node_val_overwrites() {
        let mut graph = WeightedGraph::new(["A", "B"]);
        graph.set_node_val("A", 10.0).unwrap();
        graph.set_node_val("A", 14.0).unwrap();
        assert_eq!(graph.weight_at(0, 0), 14.0);
        assert_eq!(graph.weight_at(1, 1), 0.0);
    }

    #[test]
    fn test_set_node_val_unknown_name() {
        let mut graph = WeightedGraph::new(["A"]);
        let err = graph.set_node_val("Z", 3.0).unwrap_err();
        assert_eq!(err, GraphError::UnknownName("Z".to_string()));
        assert_eq!(err.to_string(), "player not found: Z");
    }

    #[test]
    fn test_directed_edge_accumulates() {
        let mut graph = WeightedGraph::new(["A", "B"]);
        assert!(graph.directed_edge(Some("A"), Some("B"), 2.0).is_applied());
        assert!(graph.directed_edge(Some("A"), Some("B"), 3.0).is_applied());
        assert_eq!(graph.edge_weight("A", "B").unwrap(), 5.0);
        assert_eq!(graph.edge_weight("B", "A").unwrap(), 0.0);
    }

    #[test]
    fn test_directed_edge_skips_missing_and_unknown() {
        let mut graph = WeightedGraph::new(["A", "B"]);
        let before = graph.matrix().to_vec();

        assert_eq!(
            graph.directed_edge(None, Some("B"), 2.0),
            EdgeOutcome::Skipped(SkipReason::MissingPasser)
        );
        assert_eq!(
            graph.directed_edge(Some("A"), None, 2.0),
            EdgeOutcome::Skipped(SkipReason::MissingShooter)
        );
        assert_eq!(
            graph.directed_edge(Some("Z"), Some("B"), 2.0),
            EdgeOutcome::Skipped(SkipReason::UnknownPasser("Z".to_string()))
        );
        assert_eq!(
            graph.directed_edge(Some("A"), Some("Z"), 2.0),
            EdgeOutcome::Skipped(SkipReason::UnknownShooter("Z".to_string()))
        );

        assert_eq!(graph.matrix(), before.as_slice());
    }

    #[test]
    fn test_self_loop_edge_rejected() {
        let mut graph = WeightedGraph::new(["A", "B"]);
        graph.set_node_val("A", 10.0).unwrap();
        assert_eq!(
            graph.directed_edge(Some("A"), Some("A"), 3.0),
            EdgeOutcome::Skipped(SkipReason::SelfLoop)
        );
        assert_eq!(graph.weight_at(0, 0), 10.0);
    }

    #[test]
    fn test_edge_order_independent() {
        let plays = [("A", "B", 2.0), ("B", "C", 3.0), ("A", "B", 3.0), ("C", "A", 2.0)];

        let mut forward = WeightedGraph::new(["A", "B", "C"]);
        for (p, s, v) in plays.iter() {
            forward.directed_edge(Some(*p), Some(*s), *v);
        }

        let mut reverse = WeightedGraph::new(["A", "B", "C"]);
        for (p, s, v) in plays.iter().rev() {
            reverse.directed_edge(Some(*p), Some(*s), *v);
        }

        assert_eq!(forward.matrix(), reverse.matrix());
    }

    #[test]
    fn test_weight_at_out_of_range() {
        let graph = WeightedGraph::new(["A"]);
        assert_eq!(graph.weight_at(5, 0), 0.0);
    }

    #[test]
    fn test_non_finite_cells() {
        let mut graph = WeightedGraph::new(["A", "B"]);
        assert!(graph.non_finite_cells().is_empty());
        graph.set_node_val("B", f64::NAN).unwrap();
        graph.directed_edge(Some("A"), Some("B"), f64::INFINITY);
        assert_eq!(graph.non_finite_cells(), vec![(0, 1), (1, 1)]);
    }
}
