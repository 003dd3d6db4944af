//! Loader for per-player points from a traditional box score.
//!
//! Format is the stats-API `resultSets` table shape:
//! `{"resultSets": [{"name": "PlayerStats", "headers": ["TEAM_ID", "PLAYER_NAME", "PTS", ...], "rowSet": [[...], ...]}]}`
//!
//! The first result set is the player table. Columns are located by header
//! name, so extra or reordered columns are fine.
//!
//! Copyright (c) 2026 CIPS Corps. All rights reserved.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::ingest::{id_matches, parse_numeric, to_finite_float};
use crate::{HoopError, HoopResult};

const TEAM_ID_COLUMN: &str = "TEAM_ID";
const PLAYER_NAME_COLUMN: &str = "PLAYER_NAME";
const POINTS_COLUMN: &str = "PTS";

#[derive(Debug, Deserialize)]
struct BoxScoreFile {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(default)]
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    fn column(&self, header: &str) -> HoopResult<usize> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| {
                HoopError::Ingest(format!(
                    "result set '{}' has no {} column",
                    self.name, header
                ))
            })
    }
}

/// Parse a box score and return `(player, raw PTS value)` for `team_id`,
/// in row order. Values are not sanitized; see [`parse_player_points`].
pub fn parse_raw_player_points(json: &str, team_id: &str) -> HoopResult<Vec<(String, Value)>> {
    let file: BoxScoreFile = serde_json::from_str(json)?;
    let table = file
        .result_sets
        .first()
        .ok_or_else(|| HoopError::Ingest("box score has no result sets".to_string()))?;

    let team_col = table.column(TEAM_ID_COLUMN)?;
    let name_col = table.column(PLAYER_NAME_COLUMN)?;
    let pts_col = table.column(POINTS_COLUMN)?;

    let mut rows = Vec::new();
    for row in &table.row_set {
        if !row.get(team_col).is_some_and(|t| id_matches(t, team_id)) {
            continue;
        }
        let name = match row.get(name_col) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            other => {
                log::warn!("[INGEST] Skipping box score row with bad player name: {:?}", other);
                continue;
            }
        };
        let pts = row.get(pts_col).cloned().unwrap_or(Value::Null);
        rows.push((name, pts));
    }
    Ok(rows)
}

/// Sanitize raw points. A repeated name overwrites its earlier value but
/// keeps its first position.
pub fn sanitize_player_points(raw: &[(String, Value)]) -> Vec<(String, f64)> {
    let mut points: Vec<(String, f64)> = Vec::with_capacity(raw.len());
    for (name, value) in raw {
        let pts = to_finite_float(value);
        if parse_numeric(value) != Some(pts) {
            log::debug!("[INGEST] Sanitized PTS for {}: {} -> {}", name, value, pts);
        }
        match points.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = pts,
            None => points.push((name.clone(), pts)),
        }
    }
    points
}

/// Parse a box score into sanitized `(player, points)` pairs for `team_id`.
pub fn parse_player_points(json: &str, team_id: &str) -> HoopResult<Vec<(String, f64)>> {
    let raw = parse_raw_player_points(json, team_id)?;
    Ok(sanitize_player_points(&raw))
}

/// Load raw `(player, PTS)` pairs for `team_id` from the file at `path`.
pub fn load_raw_player_points(path: &Path, team_id: &str) -> HoopResult<Vec<(String, Value)>> {
    let json = std::fs::read_to_string(path)?;
    parse_raw_player_points(&json, team_id)
}

/// Load sanitized `(player, points)` pairs for `team_id` from `path`.
pub fn load_player_points(path: &Path, team_id: &str) -> HoopResult<Vec<(String, f64)>> {
    let raw = load_raw_player_points(path, team_id)?;
    let points = sanitize_player_points(&raw);
    log::info!(
        "[INGEST] Loaded points for {} players of team {} from {}",
        points.len(),
        team_id,
        path.display(),
    );
    Ok(points)
}
