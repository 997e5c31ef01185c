//! Default configuration values loaded from config.defaults.toml.
//!
//! The file is embedded at compile time so the binary runs without any
//! config on disk.

use once_cell::sync::Lazy;
use serde::Deserialize;

const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    game: GameDefaults,
    search: SearchDefaults,
    broker: BrokerDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    data_dir: String,
}

#[derive(Debug, Deserialize)]
struct GameDefaults {
    dim: usize,
    max_turns: u32,
    game_type: String,
    trace_dir: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    max_depth: usize,
    min_depth: usize,
    max_time: f64,
    alpha_beta: bool,
    randomize_moves: bool,
    adaptive_depth: bool,
    attacker_heuristic: String,
    defender_heuristic: String,
}

#[derive(Debug, Deserialize)]
struct BrokerDefaults {
    retry_interval_ms: u64,
    request_timeout_secs: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}

// Game
pub fn dim() -> usize {
    DEFAULTS.game.dim
}
pub fn max_turns() -> u32 {
    DEFAULTS.game.max_turns
}
pub fn game_type() -> &'static str {
    &DEFAULTS.game.game_type
}
pub fn trace_dir() -> &'static str {
    &DEFAULTS.game.trace_dir
}

// Search
pub fn max_depth() -> usize {
    DEFAULTS.search.max_depth
}
pub fn min_depth() -> usize {
    DEFAULTS.search.min_depth
}
pub fn max_time() -> f64 {
    DEFAULTS.search.max_time
}
pub fn alpha_beta() -> bool {
    DEFAULTS.search.alpha_beta
}
pub fn randomize_moves() -> bool {
    DEFAULTS.search.randomize_moves
}
pub fn adaptive_depth() -> bool {
    DEFAULTS.search.adaptive_depth
}
pub fn attacker_heuristic() -> &'static str {
    &DEFAULTS.search.attacker_heuristic
}
pub fn defender_heuristic() -> &'static str {
    &DEFAULTS.search.defender_heuristic
}

// Broker
pub fn retry_interval_ms() -> u64 {
    DEFAULTS.broker.retry_interval_ms
}
pub fn request_timeout_secs() -> u64 {
    DEFAULTS.broker.request_timeout_secs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        assert_eq!(log_level(), "info");
        assert_eq!(data_dir(), "./data");
    }

    #[test]
    fn test_game_defaults() {
        assert_eq!(dim(), 5);
        assert_eq!(max_turns(), 100);
        assert_eq!(game_type(), "manual");
        assert_eq!(trace_dir(), ".");
    }

    #[test]
    fn test_search_defaults() {
        assert_eq!(max_depth(), 4);
        assert_eq!(min_depth(), 2);
        assert!((max_time() - 5.0).abs() < f64::EPSILON);
        assert!(alpha_beta());
        assert!(randomize_moves());
        assert!(!adaptive_depth());
        assert_eq!(attacker_heuristic(), "e2");
        assert_eq!(defender_heuristic(), "e1");
    }

    #[test]
    fn test_broker_defaults() {
        assert_eq!(retry_interval_ms(), 100);
        assert_eq!(request_timeout_secs(), 5);
    }
}
