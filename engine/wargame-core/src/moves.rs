//! Results of applying a move to the board.

use std::fmt;
use thiserror::Error;

use crate::coord::Coord;
use crate::unit::UnitType;

/// Direction a unit attempted to move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Direction from `src` to an orthogonally adjacent `dst`.
    pub fn between(src: Coord, dst: Coord) -> Option<Direction> {
        match (dst.row - src.row, dst.col - src.col) {
            (-1, 0) => Some(Direction::Up),
            (0, -1) => Some(Direction::Left),
            (1, 0) => Some(Direction::Down),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
        })
    }
}

/// Why a move was rejected. The board is unchanged whenever one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Invalid move!")]
    InvalidMove,

    #[error("This unit cannot move while engaged")]
    Engaged,

    #[error("This unit can't move {0}")]
    Backward(Direction),

    #[error("Invalid move! {0} can not repair")]
    CannotRepair(UnitType),

    #[error("Invalid move! {dst} can not be repaired by {src}")]
    IllegalRepair { src: UnitType, dst: UnitType },

    #[error("Invalid move! Can not be repaired when health is full")]
    FullHealth,
}

/// What a successful move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved {
        unit_type: UnitType,
        from: Coord,
        to: Coord,
    },
    SelfDestructed {
        unit_type: UnitType,
        at: Coord,
        total_damage: u32,
    },
    Repaired {
        unit_type: UnitType,
        from: Coord,
        to: Coord,
        amount: u8,
    },
    Attacked {
        unit_type: UnitType,
        from: Coord,
        to: Coord,
        to_source: u8,
        to_target: u8,
    },
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Moved {
                unit_type,
                from,
                to,
            } => write!(f, "Moved {unit_type} unit from {from} to {to}"),
            MoveOutcome::SelfDestructed {
                unit_type,
                at,
                total_damage,
            } => write!(
                f,
                "{unit_type} self-destructed at {at} for {total_damage} total damage"
            ),
            MoveOutcome::Repaired {
                unit_type,
                from,
                to,
                amount,
            } => write!(
                f,
                "{unit_type} repaired from {from} to {to} for {amount} health points"
            ),
            MoveOutcome::Attacked {
                unit_type,
                from,
                to,
                to_source,
                to_target,
            } => write!(
                f,
                "{unit_type} attacked from {from} to {to} (damage: to source = {to_source}, to target = {to_target})"
            ),
        }
    }
}
