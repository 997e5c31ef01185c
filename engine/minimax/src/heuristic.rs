//! Board evaluation functions.
//!
//! Every heuristic scores from the Attacker's side: Attacker units add,
//! Defender units subtract, whichever side is to move.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use wargame_core::{Board, Player, Unit, UnitType};

pub const AI_WEIGHT: i64 = 9999;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown heuristic '{0}', expected one of e0, e1, e2")]
pub struct UnknownHeuristic(pub String);

/// A static evaluation of a board.
///
/// Implementations:
/// - [`UnitCount`] (e0): AI units dwarf everything else
/// - [`HealthWeighted`] (e1): e0 scaled by each unit's health
/// - [`Tiered`] (e2): AI, then Virus/Tech/Program, then Firewall
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board) -> i64;

    fn name(&self) -> &'static str;
}

/// Sum `weight` over all units, positive for Attacker, negative for Defender.
fn signed_sum(board: &Board, weight: impl Fn(&Unit) -> i64) -> i64 {
    let side = |player: Player| -> i64 {
        board.player_units(player).map(|(_, u)| weight(u)).sum()
    };
    side(Player::MAX) - side(Player::MIN)
}

fn unit_count_weight(unit_type: UnitType) -> i64 {
    match unit_type {
        UnitType::AI => AI_WEIGHT,
        _ => 3,
    }
}

/// e0: AI 9999, every other unit 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCount;

impl Heuristic for UnitCount {
    fn evaluate(&self, board: &Board) -> i64 {
        signed_sum(board, |u| unit_count_weight(u.unit_type))
    }

    fn name(&self) -> &'static str {
        "e0"
    }
}

/// e1: e0 weights multiplied by current health.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthWeighted;

impl Heuristic for HealthWeighted {
    fn evaluate(&self, board: &Board) -> i64 {
        signed_sum(board, |u| unit_count_weight(u.unit_type) * u.health as i64)
    }

    fn name(&self) -> &'static str {
        "e1"
    }
}

/// e2: AI 9999, Virus/Tech/Program 9, Firewall 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tiered;

impl Heuristic for Tiered {
    fn evaluate(&self, board: &Board) -> i64 {
        signed_sum(board, |u| match u.unit_type {
            UnitType::AI => AI_WEIGHT,
            UnitType::Virus | UnitType::Tech | UnitType::Program => 9,
            UnitType::Firewall => 3,
        })
    }

    fn name(&self) -> &'static str {
        "e2"
    }
}

/// Selects a heuristic by name; used by configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    E0,
    E1,
    E2,
}

impl HeuristicKind {
    pub fn heuristic(self) -> &'static dyn Heuristic {
        match self {
            HeuristicKind::E0 => &UnitCount,
            HeuristicKind::E1 => &HealthWeighted,
            HeuristicKind::E2 => &Tiered,
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heuristic().name())
    }
}

impl FromStr for HeuristicKind {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e0" => Ok(HeuristicKind::E0),
            "e1" => Ok(HeuristicKind::E1),
            "e2" => Ok(HeuristicKind::E2),
            _ => Err(UnknownHeuristic(s.to_string())),
        }
    }
}
