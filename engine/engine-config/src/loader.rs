//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a crate dir)
];

/// Load the central configuration.
///
/// Searches in order:
/// 1. Path specified by the WARGAME_CONFIG environment variable
/// 2. [`CONFIG_SEARCH_PATHS`]
///
/// Falls back to the built-in defaults, then applies environment overrides.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("WARGAME_CONFIG") {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from WARGAME_CONFIG: {}", path.display());
            return load_from_path(path);
        }
        warn!(
            "WARGAME_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// An unreadable or malformed file is logged and replaced by the defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (usize, f64, bool, ...)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional string field
    ($config:expr, $section:ident . $field:ident, $key:expr, optional) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = Some(v);
        }
    };
    // Optional parseable field
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Variables follow the pattern WARGAME_<SECTION>_<KEY>. Values that fail
/// to parse are ignored.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "WARGAME_COMMON_LOG_LEVEL");
    env_override!(config, common.data_dir, "WARGAME_COMMON_DATA_DIR");

    // Game
    env_override!(config, game.dim, "WARGAME_GAME_DIM", parse);
    env_override!(config, game.max_turns, "WARGAME_GAME_MAX_TURNS", parse);
    env_override!(config, game.game_type, "WARGAME_GAME_GAME_TYPE");
    env_override!(config, game.broker, "WARGAME_GAME_BROKER", optional);
    env_override!(config, game.trace_dir, "WARGAME_GAME_TRACE_DIR");

    // Search
    env_override!(config, search.max_depth, "WARGAME_SEARCH_MAX_DEPTH", parse);
    env_override!(config, search.min_depth, "WARGAME_SEARCH_MIN_DEPTH", parse);
    env_override!(config, search.max_time, "WARGAME_SEARCH_MAX_TIME", parse);
    env_override!(config, search.alpha_beta, "WARGAME_SEARCH_ALPHA_BETA", parse);
    env_override!(
        config,
        search.randomize_moves,
        "WARGAME_SEARCH_RANDOMIZE_MOVES",
        parse
    );
    env_override!(
        config,
        search.adaptive_depth,
        "WARGAME_SEARCH_ADAPTIVE_DEPTH",
        parse
    );
    env_override!(
        config,
        search.attacker_heuristic,
        "WARGAME_SEARCH_ATTACKER_HEURISTIC"
    );
    env_override!(
        config,
        search.defender_heuristic,
        "WARGAME_SEARCH_DEFENDER_HEURISTIC"
    );
    env_override!(config, search.seed, "WARGAME_SEARCH_SEED", optional_parse);

    // Broker
    env_override!(
        config,
        broker.retry_interval_ms,
        "WARGAME_BROKER_RETRY_INTERVAL_MS",
        parse
    );
    env_override!(
        config,
        broker.request_timeout_secs,
        "WARGAME_BROKER_REQUEST_TIMEOUT_SECS",
        parse
    );

    config
}
