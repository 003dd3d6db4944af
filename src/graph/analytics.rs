// hoopgraph - Assist Network Engine
// analytics.rs - Row/column reductions over the assist matrix
//
// Every value is recomputed from the live matrix on each call. Nothing is
// cached, so results always reflect the latest mutation.
//
// Copyright (c) 2026 CIPS Corps. All rights reserved.

use serde::{Deserialize, Serialize};

use crate::graph::{GraphError, WeightedGraph};

/// Per-player stat line, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub scoring: f64,
    pub playmaking: f64,
    pub off_created: f64,
    pub offense_share: f64,
    pub team_pts: f64,
}

/// Summary statistics about the whole graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub players: usize,
    pub team_pts: f64,
    /// Sum of all off-diagonal weight.
    pub total_assist_weight: f64,
    /// Off-diagonal cells with non-zero weight.
    pub active_links: usize,
    pub total_possible_links: usize,
    pub link_density: f64,
}

impl WeightedGraph {
    /// Points scored: the diagonal cell.
    pub fn scoring(&self, name: &str) -> Result<f64, GraphError> {
        let i = self.index_of(name)?;
        Ok(self.matrix[i][i])
    }

    /// Full row sum, diagonal included: points plus assist weight thrown.
    pub fn off_created(&self, name: &str) -> Result<f64, GraphError> {
        let i = self.index_of(name)?;
        Ok(self.matrix[i].iter().sum())
    }

    /// Row sum without the diagonal.
    pub fn playmaking(&self, name: &str) -> Result<f64, GraphError> {
        Ok(self.off_created(name)? - self.scoring(name)?)
    }

    /// Column sum without the diagonal: weight received from teammates.
    pub fn receiving(&self, name: &str) -> Result<f64, GraphError> {
        let j = self.index_of(name)?;
        let column: f64 = self.matrix.iter().map(|row| row[j]).sum();
        Ok(column - self.matrix[j][j])
    }

    /// Trace of the matrix.
    pub fn team_pts(&self) -> f64 {
        (0..self.len()).map(|i| self.matrix[i][i]).sum()
    }

    /// Fraction of team points this player created.
    ///
    /// 0.0 when the team scored nothing: there is no meaningful share of
    /// zero points, and NaN can't be serialized to clients.
    ///
    /// Shares across the roster sum to 1 only when there are no assists.
    /// Assist weight counts toward the passer's `off_created` on top of the
    /// shooter's points, so any assist pushes the sum above 1.
    pub fn offense_share(&self, name: &str) -> Result<f64, GraphError> {
        let created = self.off_created(name)?;
        let team = self.team_pts();
        if team == 0.0 {
            return Ok(0.0);
        }
        Ok(created / team)
    }

    /// Everything the stats endpoint reports for one player.
    pub fn player_stats(&self, name: &str) -> Result<PlayerStats, GraphError> {
        Ok(PlayerStats {
            name: name.to_string(),
            scoring: self.scoring(name)?,
            playmaking: self.playmaking(name)?,
            off_created: self.off_created(name)?,
            offense_share: self.offense_share(name)?,
            team_pts: self.team_pts(),
        })
    }

    pub fn stats(&self) -> GraphStats {
        let n = self.len();
        let mut total_assist_weight = 0.0;
        let mut active_links = 0;
        for (i, row) in self.matrix.iter().enumerate() {
            for (j, w) in row.iter().enumerate() {
                if i != j {
                    total_assist_weight += w;
                    if *w != 0.0 {
                        active_links += 1;
                    }
                }
            }
        }

        let total_possible_links = n * n.saturating_sub(1);
        let link_density = if total_possible_links == 0 {
            0.0
        } else {
            active_links as f64 / total_possible_links as f64
        };

        GraphStats {
            players: n,
            team_pts: self.team_pts(),
            total_assist_weight,
            active_links,
            total_possible_links,
            link_density,
        }
    }
}
