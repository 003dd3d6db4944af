//! Loader for the assisted-shot play feed.
//!
//! Format: `{"results": [{"gid": "...", "player": "...", "assist_player": "...", "shot_value": 3}, ...]}`
//!
//! Records carry many more fields (clock, coordinates, shot type); only the
//! four above are read. `assist_player` is absent on unassisted shots.
//!
//! Copyright (c) 2026 CIPS Corps. All rights reserved.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ingest::{id_matches, to_finite_float};
use crate::HoopResult;

/// Shot value used when a record doesn't carry one.
pub const DEFAULT_SHOT_VALUE: f64 = 1.0;

/// One made shot, optionally assisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Game identifier. String in most feeds, number in some.
    #[serde(default)]
    pub gid: Value,

    /// The shooter.
    #[serde(default, deserialize_with = "non_empty_name")]
    pub player: Option<String>,

    /// The passer, if the shot was assisted.
    #[serde(default, deserialize_with = "non_empty_name")]
    pub assist_player: Option<String>,

    #[serde(default)]
    pub shot_value: Option<Value>,
}

impl PlayRecord {
    /// Sanitized shot value; absent or null means `DEFAULT_SHOT_VALUE`.
    pub fn shot_value(&self) -> f64 {
        match &self.shot_value {
            None | Some(Value::Null) => DEFAULT_SHOT_VALUE,
            Some(v) => to_finite_float(v),
        }
    }

    pub fn is_game(&self, game_id: &str) -> bool {
        id_matches(&self.gid, game_id)
    }
}

#[derive(Debug, Deserialize)]
struct PlaysFile {
    results: Vec<Value>,
}

/// Blank names are the same as no name.
fn non_empty_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.filter(|s| !s.trim().is_empty()))
}

/// Parse a play feed and keep the records for `game_id`, in file order.
///
/// A malformed record (e.g. a numeric player name) is logged and skipped;
/// only a feed without a `results` array fails.
pub fn parse_plays(json: &str, game_id: &str) -> HoopResult<Vec<PlayRecord>> {
    let file: PlaysFile = serde_json::from_str(json)?;
    let total = file.results.len();
    let mut plays = Vec::new();
    let mut malformed = 0;

    for (position, raw) in file.results.into_iter().enumerate() {
        match serde_json::from_value::<PlayRecord>(raw) {
            Ok(play) if play.is_game(game_id) => plays.push(play),
            Ok(_) => {}
            Err(e) => {
                malformed += 1;
                log::warn!("[INGEST] Skipping play record {}: {}", position, e);
            }
        }
    }

    log::debug!(
        "[INGEST] {} of {} play records belong to game {} ({} malformed)",
        plays.len(),
        total,
        game_id,
        malformed,
    );
    Ok(plays)
}

/// Load the play feed at `path` and keep the records for `game_id`.
pub fn load_plays(path: &Path, game_id: &str) -> HoopResult<Vec<PlayRecord>> {
    let json = std::fs::read_to_string(path)?;
    let plays = parse_plays(&json, game_id)?;
    log::info!(
        "[INGEST] Loaded {} plays for game {} from {}",
        plays.len(),
        game_id,
        path.display(),
    );
    Ok(plays)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "results": [
            {"gid": "0022401021", "player": "Pascal Siakam", "assist_player": "Tyrese Haliburton", "shot_value": 3, "clock": "10:21"},
            {"gid": "0022401021", "player": "Myles Turner"},
            {"gid": "0022401022", "player": "Pascal Siakam", "assist_player": "Andrew Nembhard", "shot_value": 2},
            {"gid": "0022401021", "player": "Aaron Nesmith", "assist_player": "", "shot_value": null},
            {"gid": "0022401021", "player": "Obi Toppin", "assist_player": "T.J. McConnell", "shot_value": "2"}
        ]
    }"#;

    #[test]
    fn test_filters_by_game() {
        let plays = parse_plays(FEED, "0022401021").unwrap();
        assert_eq!(plays.len(), 4);
        assert!(plays.iter().all(|p| p.is_game("0022401021")));
    }

    #[test]
    fn test_preserves_file_order() {
        let plays = parse_plays(FEED, "0022401021").unwrap();
        let shooters: Vec<&str> = plays.iter().filter_map(|p| p.player.as_deref()).collect();
        assert_eq!(
            shooters,
            vec!["Pascal Siakam", "Myles Turner", "Aaron Nesmith", "Obi Toppin"]
        );
    }

    #[test]
    fn test_shot_value_defaults() {
        let plays = parse_plays(FEED, "0022401021").unwrap();
        assert_eq!(plays[0].shot_value(), 3.0);
        assert_eq!(plays[1].shot_value(), DEFAULT_SHOT_VALUE);
        assert_eq!(plays[2].shot_value(), DEFAULT_SHOT_VALUE);
        assert_eq!(plays[3].shot_value(), 2.0);
    }

    #[test]
    fn test_blank_passer_is_none() {
        let plays = parse_plays(FEED, "0022401021").unwrap();
        assert_eq!(plays[1].assist_player, None);
        assert_eq!(plays[2].assist_player, None);
        assert_eq!(plays[0].assist_player.as_deref(), Some("Tyrese Haliburton"));
    }

    #[test]
    fn test_bad_shot_value_sanitized() {
        let json = r#"{"results": [{"gid": "g", "player": "A", "assist_player": "B", "shot_value": "three"}]}"#;
        let plays = parse_plays(json, "g").unwrap();
        assert_eq!(plays[0].shot_value(), 0.0);
    }

    #[test]
    fn test_numeric_gid() {
        let json = r#"{"results": [{"gid": 42, "player": "A"}]}"#;
        assert_eq!(parse_plays(json, "42").unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_record_skipped() {
        let json = r#"{"results": [
            {"gid": "g", "player": "A", "assist_player": "B", "shot_value": 2},
            {"gid": "g", "player": 23, "assist_player": "B"},
            {"gid": "g", "player": "C", "assist_player": ["B"]},
            {"gid": "g", "player": "B", "assist_player": "A", "shot_value": 3}
        ]}"#;
        let plays = parse_plays(json, "g").unwrap();
        let shooters: Vec<&str> = plays.iter().filter_map(|p| p.player.as_deref()).collect();
        assert_eq!(shooters, vec!["A", "B"]);
    }

    #[test]
    fn test_missing_results_is_error() {
        assert!(parse_plays(r#"{"data": []}"#, "g").is_err());
    }

    #[test]
    fn test_load_plays_missing_file() {
        let path = std::env::temp_dir().join("hoopgraph_no_such_plays.json");
        let _ = std::fs::remove_file(&path);
        assert!(load_plays(&path, "g").is_err());
    }
}
