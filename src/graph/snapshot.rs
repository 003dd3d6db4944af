// hoopgraph - Assist Network Engine
// snapshot.rs - Node/link projection of the matrix for visualization
//
// Copyright (c) 2026 CIPS Corps. All rights reserved.

use serde::{Deserialize, Serialize};

use crate::graph::WeightedGraph;

/// Links lighter than this are treated as noise.
pub const DEFAULT_MIN_EDGE_WEIGHT: f64 = 1.0;

/// A player and their points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: String,
    pub val: f64,
}

/// Assist weight from `source` (passer) to `target` (shooter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotLink {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Serializable view of the graph: `{"nodes": [...], "links": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<SnapshotNode>,
    pub links: Vec<SnapshotLink>,
}

impl Snapshot {
    /// Describe every node or link carrying a non-finite value.
    pub fn non_finite_entries(&self) -> Vec<String> {
        let nodes = self
            .nodes
            .iter()
            .filter(|n| !n.val.is_finite())
            .map(|n| format!("node {} = {}", n.id, n.val));
        let links = self
            .links
            .iter()
            .filter(|l| !l.weight.is_finite())
            .map(|l| format!("link {} -> {} = {}", l.source, l.target, l.weight));
        nodes.chain(links).collect()
    }
}

impl WeightedGraph {
    /// Project the matrix into nodes and links.
    ///
    /// Nodes follow name order. Links are every ordered pair of distinct
    /// players with weight >= `min_edge_weight`, passers in the outer loop.
    pub fn snapshot(&self, min_edge_weight: f64) -> Snapshot {
        let nodes = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| SnapshotNode {
                id: name.clone(),
                val: self.matrix[i][i],
            })
            .collect();

        let mut links = Vec::new();
        for (i, passer) in self.names.iter().enumerate() {
            for (j, shooter) in self.names.iter().enumerate() {
                let weight = self.matrix[i][j];
                if i != j && weight >= min_edge_weight {
                    links.push(SnapshotLink {
                        source: passer.clone(),
                        target: shooter.clone(),
                        weight,
                    });
                }
            }
        }

        Snapshot { nodes, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_graph() -> WeightedGraph {
        let mut graph = WeightedGraph::new(["A", "B"]);
        graph.set_node_val("A", 10.0).unwrap();
        graph.set_node_val("B", 6.0).unwrap();
        graph.directed_edge(Some("A"), Some("B"), 2.0);
        graph
    }

    #[test]
    fn test_snapshot_default_threshold() {
        let snap = two_player_graph().snapshot(DEFAULT_MIN_EDGE_WEIGHT);
        assert_eq!(
            snap.nodes,
            vec![
                SnapshotNode { id: "A".to_string(), val: 10.0 },
                SnapshotNode { id: "B".to_string(), val: 6.0 },
            ]
        );
        assert_eq!(
            snap.links,
            vec![SnapshotLink {
                source: "A".to_string(),
                target: "B".to_string(),
                weight: 2.0,
            }]
        );
    }

    #[test]
    fn test_snapshot_threshold_drops_light_links() {
        let snap = two_player_graph().snapshot(3.0);
        assert_eq!(snap.nodes.len(), 2);
        assert!(snap.links.is_empty());
    }

    #[test]
    fn test_snapshot_threshold_is_inclusive() {
        let snap = two_player_graph().snapshot(2.0);
        assert_eq!(snap.links.len(), 1);
    }

    #[test]
    fn test_snapshot_never_has_self_links() {
        let graph = two_player_graph();
        // Diagonal (10, 6) is above the threshold but must not appear as a link.
        let snap = graph.snapshot(0.0);
        assert!(snap.links.iter().all(|l| l.source != l.target));
        assert!(snap.links.iter().all(|l| l.weight >= 0.0));
    }

    #[test]
    fn test_snapshot_link_order() {
        let mut graph = WeightedGraph::new(["A", "B", "C"]);
        graph.directed_edge(Some("C"), Some("A"), 2.0);
        graph.directed_edge(Some("A"), Some("C"), 2.0);
        graph.directed_edge(Some("A"), Some("B"), 5.0);

        let pairs: Vec<(String, String)> = graph
            .snapshot(1.0)
            .links
            .into_iter()
            .map(|l| (l.source, l.target))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("C".to_string(), "A".to_string()),
            ]
        );
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let graph = two_player_graph();
        let before = graph.matrix().to_vec();
        let _ = graph.snapshot(0.5);
        assert_eq!(graph.matrix(), before.as_slice());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snap = two_player_graph().snapshot(1.0);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["nodes"][0]["id"], "A");
        assert_eq!(json["nodes"][1]["val"], 6.0);
        assert_eq!(json["links"][0]["source"], "A");
        assert_eq!(json["links"][0]["target"], "B");
        assert_eq!(json["links"][0]["weight"], 2.0);
    }

    #[test]
    fn test_non_finite_entries() {
        let mut graph = two_player_graph();
        assert!(graph.snapshot(1.0).non_finite_entries().is_empty());
        graph.set_node_val("B", f64::NAN).unwrap();
        let bad = graph.snapshot(1.0).non_finite_entries();
        assert_eq!(bad, vec!["node B = NaN".to_string()]);
    }
}
