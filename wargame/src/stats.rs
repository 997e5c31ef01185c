//! End-of-game statistics snapshot.
//!
//! Written to `game_stats.json` in the stats directory when a game ends.

use minimax::SearchStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use wargame_core::Player;

pub const STATS_FILE: &str = "game_stats.json";

/// Serializable stats for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStatsSnapshot {
    pub winner: Player,
    pub turns_played: u32,
    pub total_evaluations: u64,
    pub evaluations_per_depth: BTreeMap<usize, u64>,
    pub branching_factor: f64,
    pub total_seconds: f64,
    pub searches: u32,
    pub timeouts: u32,
    /// Depth of the last computer search, if the computer played.
    pub final_depth: Option<usize>,
    pub timestamp: u64,
}

impl GameStatsSnapshot {
    pub fn new(
        winner: Player,
        turns_played: u32,
        stats: &SearchStats,
        final_depth: Option<usize>,
    ) -> Self {
        Self {
            winner,
            turns_played,
            total_evaluations: stats.total_evaluations(),
            evaluations_per_depth: stats.evaluations_per_depth.clone(),
            branching_factor: stats.branching_factor(),
            total_seconds: stats.total_seconds,
            searches: stats.searches,
            timeouts: stats.timeouts,
            final_depth,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

/// Write the snapshot to `dir/game_stats.json` (atomic write-then-rename).
///
/// Failures are logged; returns the written path on success.
pub fn write_stats(dir: &Path, snapshot: &GameStatsSnapshot) -> Option<PathBuf> {
    if let Err(e) = fs::create_dir_all(dir) {
        warn!("Failed to create stats directory {}: {}", dir.display(), e);
        return None;
    }

    let json = match serde_json::to_string_pretty(snapshot) {
        Ok(j) => j,
        Err(e) => {
            warn!("Failed to serialize game stats: {}", e);
            return None;
        }
    };

    let stats_path = dir.join(STATS_FILE);
    let temp_path = dir.join(format!("{STATS_FILE}.tmp"));
    match fs::File::create(&temp_path) {
        Ok(mut file) => {
            if let Err(e) = file.write_all(json.as_bytes()) {
                warn!("Failed to write game stats: {}", e);
                return None;
            }
        }
        Err(e) => {
            warn!("Failed to create temp stats file: {}", e);
            return None;
        }
    }

    if let Err(e) = fs::rename(&temp_path, &stats_path) {
        warn!("Failed to rename stats file: {}", e);
        let _ = fs::remove_file(&temp_path);
        return None;
    }

    debug!("Wrote game stats to {}", stats_path.display());
    Some(stats_path)
}
