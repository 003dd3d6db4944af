// hoopgraph - Assist Network Engine
// centrality.rs - Eigen-centrality by power iteration
//
// Approximates the dominant eigenvector of the assist matrix with the
// diagonal halved, so a player's rank reflects position in the passing
// network more than raw points. Not an exact eigensolver: callers cap the
// work with `max_iterations`.
//
// Copyright (c) 2026 CIPS Corps. All rights reserved.

use std::collections::BTreeMap;

use crate::graph::WeightedGraph;

/// Player name -> centrality score.
pub type Centrality = BTreeMap<String, f64>;

/// Multiplier applied to the scoring diagonal before iterating.
pub const DIAGONAL_DAMPING: f64 = 0.5;

/// Iteration stops once the norm moves by no more than this.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-8;

/// Iteration cap used by the HTTP surface.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

impl WeightedGraph {
    /// Power-iteration eigen-centrality, seeded with the all-ones vector.
    ///
    /// Returns 0.0 for every player when the network is degenerate: either
    /// the damped matrix has no weight at all, or an iterate collapses to the
    /// zero vector.
    pub fn eigen_centrality(&self, max_iterations: usize) -> Centrality {
        let n = self.len();

        let mut damped = self.matrix.clone();
        for (i, row) in damped.iter_mut().enumerate() {
            row[i] *= DIAGONAL_DAMPING;
        }

        if damped.iter().flatten().all(|w| *w == 0.0) {
            return self.zero_centrality();
        }

        let mut vector = vec![1.0; n];
        let mut prev_norm = 0.0_f64;
        let mut curr_norm = 1.0_f64;
        let mut remaining = max_iterations;

        while (curr_norm - prev_norm).abs() > CONVERGENCE_TOLERANCE && remaining != 0 {
            prev_norm = curr_norm;
            vector = mat_vec(&damped, &vector);
            curr_norm = euclidean_norm(&vector);
            if curr_norm == 0.0 {
                return self.zero_centrality();
            }
            for x in vector.iter_mut() {
                *x /= curr_norm;
            }
            remaining -= 1;
        }

        self.names
            .iter()
            .cloned()
            .zip(vector)
            .collect()
    }

    fn zero_centrality(&self) -> Centrality {
        self.names.iter().map(|name| (name.clone(), 0.0)).collect()
    }
}

fn mat_vec(matrix: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    matrix
        .iter()
        .map(|row| row.iter().zip(vector).map(|(a, b)| a * b).sum())
        .collect()
}

fn euclidean_norm(vector: &[f64]) -> f64 {
    vector.iter().map(|x| x * x).sum::<f64>().sqrt()
}
