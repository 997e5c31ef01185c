//! Command-line configuration for the wargame binary
//!
//! Defaults come from the central config (config.toml plus `WARGAME_*`
//! environment overrides). CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use engine_config::{load_config, CentralConfig};
use minimax::HeuristicKind;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use wargame_core::{MAX_DIM, MIN_DIM};

use crate::options::{GameType, Options};

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_dim() -> usize {
    CENTRAL_CONFIG.game.dim
}

fn default_max_depth() -> usize {
    CENTRAL_CONFIG.search.max_depth
}

fn default_min_depth() -> usize {
    CENTRAL_CONFIG.search.min_depth
}

fn default_max_time() -> f64 {
    CENTRAL_CONFIG.search.max_time
}

fn default_max_turns() -> u32 {
    CENTRAL_CONFIG.game.max_turns
}

fn default_game_type() -> String {
    CENTRAL_CONFIG.game.game_type.clone()
}

fn default_alpha_beta() -> bool {
    CENTRAL_CONFIG.search.alpha_beta
}

fn default_randomize_moves() -> bool {
    CENTRAL_CONFIG.search.randomize_moves
}

fn default_adaptive_depth() -> bool {
    CENTRAL_CONFIG.search.adaptive_depth
}

fn default_attacker_heuristic() -> String {
    CENTRAL_CONFIG.search.attacker_heuristic.clone()
}

fn default_defender_heuristic() -> String {
    CENTRAL_CONFIG.search.defender_heuristic.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_trace_dir() -> String {
    CENTRAL_CONFIG.game.trace_dir.clone()
}

fn default_stats_dir() -> String {
    CENTRAL_CONFIG.common.data_dir.clone()
}

fn default_broker_retry_ms() -> u64 {
    CENTRAL_CONFIG.broker.retry_interval_ms
}

fn default_broker_timeout_secs() -> u64 {
    CENTRAL_CONFIG.broker.request_timeout_secs
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "wargame")]
#[command(about = "Two-player 5x5 wargame with an alpha-beta computer opponent")]
#[command(
    long_about = "Plays the wargame between any mix of humans, the minimax computer player
and a remote move broker. Moves are entered as two cell labels, e.g. 'E4 D4'.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Board size (cells per side)
    #[arg(long, default_value_t = default_dim())]
    pub dim: usize,

    /// Maximum search depth
    #[arg(long = "max_depth", default_value_t = default_max_depth())]
    pub max_depth: usize,

    /// Minimum search depth for adaptive depth
    #[arg(long = "min_depth", default_value_t = default_min_depth())]
    pub min_depth: usize,

    /// Maximum search time per move in seconds
    #[arg(long = "max_time", default_value_t = default_max_time())]
    pub max_time: f64,

    /// Number of turns after which the Defender wins
    #[arg(long = "max_turns", default_value_t = default_max_turns())]
    pub max_turns: u32,

    /// Game type: auto|attacker|defender|manual
    #[arg(long = "game_type", default_value_t = default_game_type())]
    pub game_type: String,

    /// Play via a game broker at this URL
    #[arg(long)]
    pub broker: Option<String>,

    /// Prune the search with alpha-beta bounds
    #[arg(long = "alpha_beta", default_value_t = default_alpha_beta(), action = ArgAction::Set)]
    pub alpha_beta: bool,

    /// Pick randomly among equally scored moves
    #[arg(long = "randomize_moves", default_value_t = default_randomize_moves(), action = ArgAction::Set)]
    pub randomize_moves: bool,

    /// Adjust the search depth between turns to fit the time budget
    #[arg(long = "adaptive_depth", default_value_t = default_adaptive_depth(), action = ArgAction::Set)]
    pub adaptive_depth: bool,

    /// Attacker heuristic (e0, e1, e2)
    #[arg(long = "attacker_heuristic", default_value_t = default_attacker_heuristic())]
    pub attacker_heuristic: String,

    /// Defender heuristic (e0, e1, e2)
    #[arg(long = "defender_heuristic", default_value_t = default_defender_heuristic())]
    pub defender_heuristic: String,

    /// Seed for move tie-breaking (random if unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log_level", default_value_t = default_log_level())]
    pub log_level: String,

    /// Directory for the game trace file
    #[arg(long = "trace_dir", default_value_t = default_trace_dir())]
    pub trace_dir: String,

    /// Directory for game_stats.json
    #[arg(long = "stats_dir", default_value_t = default_stats_dir())]
    pub stats_dir: String,

    /// Delay between broker polls in milliseconds
    #[arg(long = "broker_retry_ms", default_value_t = default_broker_retry_ms())]
    pub broker_retry_ms: u64,

    /// Broker request timeout in seconds
    #[arg(long = "broker_timeout_secs", default_value_t = default_broker_timeout_secs())]
    pub broker_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DIM..=MAX_DIM).contains(&self.dim) {
            return Err(anyhow!(
                "dim must be between {} and {}, got {}",
                MIN_DIM,
                MAX_DIM,
                self.dim
            ));
        }

        if self.max_depth == 0 {
            return Err(anyhow!("max_depth must be greater than 0"));
        }

        if self.min_depth == 0 {
            return Err(anyhow!("min_depth must be greater than 0"));
        }

        if self.min_depth > self.max_depth {
            return Err(anyhow!(
                "min_depth ({}) cannot exceed max_depth ({})",
                self.min_depth,
                self.max_depth
            ));
        }

        if !self.max_time.is_finite() || self.max_time <= 0.0 {
            return Err(anyhow!("max_time must be a positive number of seconds"));
        }
        if let Err(e) = Duration::try_from_secs_f64(self.max_time) {
            return Err(anyhow!("max_time {} is out of range: {}", self.max_time, e));
        }

        if self.max_turns == 0 {
            return Err(anyhow!("max_turns must be greater than 0"));
        }

        self.game_type.parse::<GameType>()?;
        self.attacker_heuristic.parse::<HeuristicKind>()?;
        self.defender_heuristic.parse::<HeuristicKind>()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Resolve into game options. Broker and seed fall back to the central
    /// config when not given on the command line.
    pub fn to_options(&self) -> Result<Options> {
        Ok(Options {
            dim: self.dim,
            max_depth: self.max_depth,
            min_depth: self.min_depth,
            max_time: self.max_time,
            game_type: self.game_type.parse()?,
            alpha_beta: self.alpha_beta,
            max_turns: self.max_turns,
            randomize_moves: self.randomize_moves,
            broker: self
                .broker
                .clone()
                .or_else(|| CENTRAL_CONFIG.game.broker.clone())
                .filter(|url| !url.trim().is_empty()),
            adaptive_depth: self.adaptive_depth,
            attacker_heuristic: self.attacker_heuristic.parse()?,
            defender_heuristic: self.defender_heuristic.parse()?,
            seed: self.seed.or(CENTRAL_CONFIG.search.seed),
            trace_dir: PathBuf::from(&self.trace_dir),
            stats_dir: PathBuf::from(&self.stats_dir),
            broker_retry: Duration::from_millis(self.broker_retry_ms),
            broker_timeout: Duration::from_secs(self.broker_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            dim: 5,
            max_depth: 4,
            min_depth: 2,
            max_time: 5.0,
            max_turns: 100,
            game_type: "manual".into(),
            broker: None,
            alpha_beta: true,
            randomize_moves: true,
            adaptive_depth: false,
            attacker_heuristic: "e2".into(),
            defender_heuristic: "e1".into(),
            seed: Some(1),
            log_level: "info".into(),
            trace_dir: ".".into(),
            stats_dir: "./data".into(),
            broker_retry_ms: 100,
            broker_timeout_secs: 5,
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_min_depth_above_max_depth() {
        let mut cfg = base_config();
        cfg.min_depth = 5;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("min_depth"));
    }

    #[test]
    fn validate_rejects_zero_max_depth() {
        let mut cfg = base_config();
        cfg.max_depth = 0;
        cfg.min_depth = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_depth"));
    }

    #[test]
    fn validate_rejects_zero_min_depth() {
        let mut cfg = base_config();
        cfg.min_depth = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("min_depth"));
    }

    #[test]
    fn validate_rejects_out_of_range_max_time() {
        let mut cfg = base_config();
        cfg.max_time = 1e20;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_time"));
    }

    #[test]
    fn validate_rejects_non_positive_max_time() {
        let mut cfg = base_config();
        cfg.max_time = 0.0;
        assert!(cfg.validate().unwrap_err().to_string().contains("max_time"));
        cfg.max_time = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_turns() {
        let mut cfg = base_config();
        cfg.max_turns = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_turns"));
    }

    #[test]
    fn validate_rejects_out_of_range_dim() {
        let mut cfg = base_config();
        cfg.dim = 3;
        assert!(cfg.validate().unwrap_err().to_string().contains("dim"));
        cfg.dim = 17;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_game_type() {
        let mut cfg = base_config();
        cfg.game_type = "chess".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("unknown game type"));
    }

    #[test]
    fn validate_accepts_aiwar_alias() {
        let mut cfg = base_config();
        cfg.game_type = "aiwar".into();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.to_options().unwrap().game_type, GameType::CompVsComp);
    }

    #[test]
    fn validate_rejects_unknown_heuristic() {
        let mut cfg = base_config();
        cfg.defender_heuristic = "e7".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("unknown heuristic"));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn to_options_carries_every_setting() {
        let mut cfg = base_config();
        cfg.game_type = "defender".into();
        cfg.max_time = 0.25;
        cfg.broker = Some("http://localhost:8001/test".into());
        cfg.broker_retry_ms = 20;

        let options = cfg.to_options().unwrap();
        assert_eq!(options.game_type, GameType::CompVsDefender);
        assert!((options.max_time - 0.25).abs() < f64::EPSILON);
        assert_eq!(options.broker.as_deref(), Some("http://localhost:8001/test"));
        assert_eq!(options.broker_retry, Duration::from_millis(20));
        assert_eq!(options.attacker_heuristic, HeuristicKind::E2);
        assert_eq!(options.seed, Some(1));
        assert_eq!(options.stats_dir, PathBuf::from("./data"));
    }

    #[test]
    fn to_options_drops_blank_broker() {
        let mut cfg = base_config();
        cfg.broker = Some("  ".into());
        assert!(cfg.to_options().unwrap().broker.is_none());
    }
}
