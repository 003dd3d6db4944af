//! # Graph Assembly
//!
//! Turns ingested box-score points and play records into a finished
//! [`WeightedGraph`]. Names are fixed first, then every player's points go on
//! the diagonal, then every play adds its shot value to the passer -> shooter
//! edge. Unassisted plays are skipped by the engine and counted here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::graph::{EdgeOutcome, SkipReason, WeightedGraph};
use crate::ingest::{self, PlayRecord};
use crate::{DataConfig, HoopResult};

/// What happened while building a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyReport {
    pub players: usize,
    pub plays: usize,
    pub edges_applied: usize,
    /// Plays without a passer. Expected for unassisted shots.
    pub unassisted: usize,
    /// Plays skipped for any other reason (unknown name, self-assist).
    pub edges_skipped: usize,
}

/// Player names in matrix order: box-score rows first, then anyone who only
/// shows up in the play feed, in order of first appearance.
pub fn collect_names(player_points: &[(String, f64)], plays: &[PlayRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    let from_box = player_points.iter().map(|(name, _)| name.as_str());
    let from_plays = plays.iter().flat_map(|p| {
        p.assist_player
            .as_deref()
            .into_iter()
            .chain(p.player.as_deref())
    });

    for name in from_box.chain(from_plays) {
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Build a graph from sanitized points and the plays of one game.
pub fn build_graph(
    player_points: &[(String, f64)],
    plays: &[PlayRecord],
) -> HoopResult<(WeightedGraph, AssemblyReport)> {
    let names = collect_names(player_points, plays);
    let mut graph = WeightedGraph::new(names);
    let mut report = AssemblyReport {
        players: graph.len(),
        plays: plays.len(),
        ..Default::default()
    };

    for (name, pts) in player_points {
        graph.set_node_val(name, *pts)?;
    }

    for play in plays {
        let outcome = graph.directed_edge(
            play.assist_player.as_deref(),
            play.player.as_deref(),
            play.shot_value(),
        );
        match outcome {
            EdgeOutcome::Applied => report.edges_applied += 1,
            EdgeOutcome::Skipped(SkipReason::MissingPasser) => report.unassisted += 1,
            EdgeOutcome::Skipped(reason) => {
                log::debug!("[ASSEMBLE] Skipped play {:?}: {:?}", play, reason);
                report.edges_skipped += 1;
            }
        }
    }

    log::info!(
        "[ASSEMBLE] Graph built: {} players, {} plays ({} assisted, {} unassisted, {} skipped)",
        report.players,
        report.plays,
        report.edges_applied,
        report.unassisted,
        report.edges_skipped,
    );
    if report.edges_skipped > 0 {
        log::warn!(
            "[ASSEMBLE] {} plays could not be attached to the graph",
            report.edges_skipped
        );
    }

    Ok((graph, report))
}

/// Load one game's files and build its graph.
pub fn load_and_build(
    data: &DataConfig,
    game_id: &str,
    team_id: &str,
) -> HoopResult<(WeightedGraph, AssemblyReport)> {
    let plays = ingest::load_plays(&data.plays_path, game_id)?;
    let player_points = ingest::load_player_points(&data.box_score_path, team_id)?;
    build_graph(&player_points, &plays)
}
