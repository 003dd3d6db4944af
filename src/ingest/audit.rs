//! Diagnostics for non-numeric and non-finite values.
//!
//! Scans raw box-score points before sanitization, the assembled matrix,
//! and a snapshot payload. Nothing here changes data; it reports what the
//! sanitization step would have hidden.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::graph::WeightedGraph;
use crate::ingest::parse_numeric;

/// How many offenders of each kind a report keeps as examples.
pub const MAX_EXAMPLES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadValueKind {
    NonNumeric,
    NonFinite,
}

/// A raw points value that would have been sanitized to 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadValue {
    pub name: String,
    pub raw: Value,
    pub kind: BadValueKind,
}

/// Flag raw `(player, PTS)` entries that are not finite numbers.
pub fn scan_player_points(raw: &[(String, Value)]) -> Vec<BadValue> {
    raw.iter()
        .filter_map(|(name, value)| {
            let kind = match parse_numeric(value) {
                None => BadValueKind::NonNumeric,
                Some(v) if !v.is_finite() => BadValueKind::NonFinite,
                Some(_) => return None,
            };
            Some(BadValue {
                name: name.clone(),
                raw: value.clone(),
                kind,
            })
        })
        .collect()
}

/// Combined result of scanning points, matrix and snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub points_scanned: usize,
    pub bad_points: Vec<BadValue>,
    pub matrix_size: usize,
    pub non_finite_cell_count: usize,
    /// "passer -> shooter = value", up to `MAX_EXAMPLES`.
    pub non_finite_cells: Vec<String>,
    pub payload_offender_count: usize,
    pub payload_offenders: Vec<String>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.bad_points.is_empty()
            && self.non_finite_cell_count == 0
            && self.payload_offender_count == 0
    }
}

/// Run every scan against one game's inputs and the graph built from them.
pub fn audit(raw_points: &[(String, Value)], graph: &WeightedGraph, min_edge_weight: f64) -> AuditReport {
    let bad_points = scan_player_points(raw_points);

    let cells = graph.non_finite_cells();
    let names = graph.names();
    let non_finite_cells = cells
        .iter()
        .take(MAX_EXAMPLES)
        .map(|&(i, j)| format!("{} -> {} = {}", names[i], names[j], graph.weight_at(i, j)))
        .collect();

    let offenders = graph.snapshot(min_edge_weight).non_finite_entries();

    AuditReport {
        points_scanned: raw_points.len(),
        bad_points,
        matrix_size: graph.len(),
        non_finite_cell_count: cells.len(),
        non_finite_cells,
        payload_offender_count: offenders.len(),
        payload_offenders: offenders.into_iter().take(MAX_EXAMPLES).collect(),
    }
}
