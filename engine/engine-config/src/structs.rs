//! Configuration struct definitions.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_dim() -> usize {
    defaults::dim()
}
fn d_max_turns() -> u32 {
    defaults::max_turns()
}
fn d_game_type() -> String {
    defaults::game_type().into()
}
fn d_trace_dir() -> String {
    defaults::trace_dir().into()
}
fn d_max_depth() -> usize {
    defaults::max_depth()
}
fn d_min_depth() -> usize {
    defaults::min_depth()
}
fn d_max_time() -> f64 {
    defaults::max_time()
}
fn d_alpha_beta() -> bool {
    defaults::alpha_beta()
}
fn d_randomize_moves() -> bool {
    defaults::randomize_moves()
}
fn d_adaptive_depth() -> bool {
    defaults::adaptive_depth()
}
fn d_attacker_heuristic() -> String {
    defaults::attacker_heuristic().into()
}
fn d_defender_heuristic() -> String {
    defaults::defender_heuristic().into()
}
fn d_retry_interval_ms() -> u64 {
    defaults::retry_interval_ms()
}
fn d_request_timeout_secs() -> u64 {
    defaults::request_timeout_secs()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub broker: BrokerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Where `game_stats.json` is written.
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            data_dir: defaults::data_dir().into(),
        }
    }
}

/// Board and game-loop settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    #[serde(default = "d_dim")]
    pub dim: usize,
    #[serde(default = "d_max_turns")]
    pub max_turns: u32,
    #[serde(default = "d_game_type")]
    pub game_type: String,
    /// Move broker URL. None plays locally.
    #[serde(default)]
    pub broker: Option<String>,
    #[serde(default = "d_trace_dir")]
    pub trace_dir: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dim: defaults::dim(),
            max_turns: defaults::max_turns(),
            game_type: defaults::game_type().into(),
            broker: None,
            trace_dir: defaults::trace_dir().into(),
        }
    }
}

/// Computer player search settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "d_max_depth")]
    pub max_depth: usize,
    #[serde(default = "d_min_depth")]
    pub min_depth: usize,
    /// Seconds per computer move
    #[serde(default = "d_max_time")]
    pub max_time: f64,
    #[serde(default = "d_alpha_beta")]
    pub alpha_beta: bool,
    #[serde(default = "d_randomize_moves")]
    pub randomize_moves: bool,
    #[serde(default = "d_adaptive_depth")]
    pub adaptive_depth: bool,
    #[serde(default = "d_attacker_heuristic")]
    pub attacker_heuristic: String,
    #[serde(default = "d_defender_heuristic")]
    pub defender_heuristic: String,
    /// RNG seed for tie-breaking. None seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::max_depth(),
            min_depth: defaults::min_depth(),
            max_time: defaults::max_time(),
            alpha_beta: defaults::alpha_beta(),
            randomize_moves: defaults::randomize_moves(),
            adaptive_depth: defaults::adaptive_depth(),
            attacker_heuristic: defaults::attacker_heuristic().into(),
            defender_heuristic: defaults::defender_heuristic().into(),
            seed: None,
        }
    }
}

/// Move broker HTTP client settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BrokerConfig {
    #[serde(default = "d_retry_interval_ms")]
    pub retry_interval_ms: u64,
    #[serde(default = "d_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            retry_interval_ms: defaults::retry_interval_ms(),
            request_timeout_secs: defaults::request_timeout_secs(),
        }
    }
}
