//! Board and move model for a two-player 5x5 wargame.
//!
//! The Attacker (bottom right) tries to destroy the Defender's AI unit; the
//! Defender (top left) must keep its AI alive until the turn limit runs out.
//! Each side fields six units of five types, and every move is one of:
//!
//! - **move** into an empty orthogonal neighbour
//! - **attack** an adjacent enemy (both units take damage)
//! - **repair** an adjacent friendly unit
//! - **self-destruct**, damaging every unit in the surrounding 8 cells
//!
//! # Usage
//!
//! ```rust
//! use wargame_core::{Board, CoordPair, Player};
//!
//! let board = Board::default();
//! let first = board.move_candidates(Player::Attacker).next().unwrap();
//! let next = board.clone_and_move(&first, Player::Attacker);
//! assert!(next.is_some());
//!
//! let diagonal: CoordPair = "E4 D3".parse().unwrap();
//! assert!(board.clone_and_move(&diagonal, Player::Attacker).is_none());
//! ```

pub mod board;
pub mod coord;
pub mod moves;
pub mod player;
pub mod unit;

pub use board::{Board, DEFAULT_DIM, MAX_DIM, MIN_DIM, SELF_DESTRUCT_DAMAGE};
pub use coord::{Coord, CoordPair, ParseError};
pub use moves::{Direction, MoveError, MoveOutcome};
pub use player::Player;
pub use unit::{Unit, UnitType, MAX_HEALTH};
