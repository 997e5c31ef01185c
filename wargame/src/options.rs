//! Per-game options, fixed for the lifetime of a game.

use minimax::{HeuristicKind, SearchConfig};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use wargame_core::{Player, DEFAULT_DIM};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown game type '{0}', expected one of auto, attacker, defender, manual")]
pub struct UnknownGameType(pub String);

/// Who controls each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameType {
    /// Two humans.
    #[default]
    AttackerVsDefender,
    /// Human Attacker against the computer.
    AttackerVsComp,
    /// Computer Attacker against a human Defender.
    CompVsDefender,
    /// Computer against computer.
    CompVsComp,
}

impl GameType {
    pub fn is_human(self, player: Player) -> bool {
        match self {
            GameType::AttackerVsDefender => true,
            GameType::AttackerVsComp => player == Player::Attacker,
            GameType::CompVsDefender => player == Player::Defender,
            GameType::CompVsComp => false,
        }
    }

    /// The command-line name.
    pub fn name(self) -> &'static str {
        match self {
            GameType::AttackerVsDefender => "manual",
            GameType::AttackerVsComp => "attacker",
            GameType::CompVsDefender => "defender",
            GameType::CompVsComp => "auto",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameType {
    type Err = UnknownGameType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(GameType::AttackerVsDefender),
            "attacker" => Ok(GameType::AttackerVsComp),
            "defender" => Ok(GameType::CompVsDefender),
            "auto" | "aiwar" => Ok(GameType::CompVsComp),
            _ => Err(UnknownGameType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub dim: usize,
    pub max_depth: usize,
    pub min_depth: usize,
    /// Seconds per computer move.
    pub max_time: f64,
    pub game_type: GameType,
    pub alpha_beta: bool,
    pub max_turns: u32,
    pub randomize_moves: bool,
    /// Move broker URL.
    pub broker: Option<String>,
    pub adaptive_depth: bool,
    pub attacker_heuristic: HeuristicKind,
    pub defender_heuristic: HeuristicKind,
    /// Seed for root tie-breaking. None seeds from entropy.
    pub seed: Option<u64>,
    pub trace_dir: PathBuf,
    pub stats_dir: PathBuf,
    /// Delay between broker polls.
    pub broker_retry: Duration,
    pub broker_timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            dim: DEFAULT_DIM,
            max_depth: search.max_depth,
            min_depth: search.min_depth,
            max_time: search.max_time.as_secs_f64(),
            game_type: GameType::default(),
            alpha_beta: search.alpha_beta,
            max_turns: 100,
            randomize_moves: search.randomize_moves,
            broker: None,
            adaptive_depth: search.adaptive_depth,
            attacker_heuristic: HeuristicKind::E2,
            defender_heuristic: HeuristicKind::E1,
            seed: None,
            trace_dir: PathBuf::from("."),
            stats_dir: PathBuf::from("./data"),
            broker_retry: Duration::from_millis(100),
            broker_timeout: Duration::from_secs(5),
        }
    }
}

impl Options {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.max_depth,
            min_depth: self.min_depth,
            max_time: Duration::from_secs_f64(self.max_time),
            alpha_beta: self.alpha_beta,
            randomize_moves: self.randomize_moves,
            adaptive_depth: self.adaptive_depth,
        }
    }

    pub fn heuristic_for(&self, player: Player) -> HeuristicKind {
        match player {
            Player::Attacker => self.attacker_heuristic,
            Player::Defender => self.defender_heuristic,
        }
    }

    pub fn is_human(&self, player: Player) -> bool {
        self.game_type.is_human(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_type_parsing() {
        assert_eq!("manual".parse::<GameType>().unwrap(), GameType::AttackerVsDefender);
        assert_eq!("attacker".parse::<GameType>().unwrap(), GameType::AttackerVsComp);
        assert_eq!("defender".parse::<GameType>().unwrap(), GameType::CompVsDefender);
        assert_eq!("auto".parse::<GameType>().unwrap(), GameType::CompVsComp);
        assert_eq!("aiwar".parse::<GameType>().unwrap(), GameType::CompVsComp);
        assert!("chess".parse::<GameType>().is_err());
    }

    #[test]
    fn test_who_is_human() {
        use Player::{Attacker, Defender};
        assert!(GameType::AttackerVsDefender.is_human(Attacker));
        assert!(GameType::AttackerVsDefender.is_human(Defender));
        assert!(GameType::AttackerVsComp.is_human(Attacker));
        assert!(!GameType::AttackerVsComp.is_human(Defender));
        assert!(!GameType::CompVsDefender.is_human(Attacker));
        assert!(GameType::CompVsDefender.is_human(Defender));
        assert!(!GameType::CompVsComp.is_human(Attacker));
    }

    #[test]
    fn test_search_config_from_options() {
        let options = Options {
            max_time: 0.5,
            alpha_beta: false,
            ..Options::default()
        };
        let config = options.search_config();
        assert_eq!(config.max_time, Duration::from_millis(500));
        assert!(!config.alpha_beta);
        assert_eq!(config.max_depth, 4);
    }

    #[test]
    fn test_heuristic_per_side() {
        let options = Options::default();
        assert_eq!(options.heuristic_for(Player::Attacker), HeuristicKind::E2);
        assert_eq!(options.heuristic_for(Player::Defender), HeuristicKind::E1);
    }
}
