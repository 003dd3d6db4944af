//! Ingest layer: reads game files and turns them into engine inputs.
//!
//! - [`plays`] - assisted-shot feed, one record per made shot.
//! - [`box_score`] - per-player points from a stats-API box score.
//! - [`audit`] - diagnostics for values that failed sanitization.
//!
//! Every numeric value crossing this boundary goes through
//! [`to_finite_float`], so the engine only ever sees finite weights.
//!
//! Copyright (c) 2026 CIPS Corps. All rights reserved.

pub mod audit;
pub mod box_score;
pub mod plays;

use serde_json::Value;

pub use box_score::{load_player_points, load_raw_player_points};
pub use plays::{load_plays, PlayRecord};

/// Read a JSON value as a number, accepting numeric strings.
///
/// Returns `None` for null, booleans, arrays, objects and strings that do not
/// parse. The result may be non-finite ("NaN", "inf").
pub fn parse_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Total conversion to a finite float. Anything non-numeric or non-finite
/// becomes 0.0.
pub fn to_finite_float(value: &Value) -> f64 {
    match parse_numeric(value) {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Compare a JSON identifier (string or number) against a string id.
///
/// Numbers also match by value, so `1610612754.0` matches `"1610612754"`.
/// Strings match exactly: leading zeros in game ids are significant.
pub(crate) fn id_matches(value: &Value, id: &str) -> bool {
    match value {
        Value::String(s) => s == id,
        Value::Number(n) => {
            if n.to_string() == id {
                return true;
            }
            match (n.as_f64(), id.trim().parse::<f64>()) {
                (Some(a), Ok(b)) => a == b,
                _ => false,
            }
        }
        _ => false,
    }
}
