//! Alpha-beta minimax search for the wargame.
//!
//! The search is fixed-depth and depth-first over owned board clones. The
//! Attacker maximizes, the Defender minimizes, and leaves are scored by a
//! pluggable [`Heuristic`].
//!
//! # Usage
//!
//! ```rust
//! use minimax::{suggest_move, HeuristicKind, SearchConfig, SearchStats};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use wargame_core::{Board, Player};
//!
//! let board = Board::default();
//! let config = SearchConfig::for_testing();
//! let mut stats = SearchStats::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = suggest_move(
//!     &board,
//!     Player::Attacker,
//!     HeuristicKind::E2.heuristic(),
//!     &config,
//!     &mut stats,
//!     &mut rng,
//! )
//! .unwrap();
//!
//! assert!(result.tied.contains(&result.best_move));
//! println!("{} scored {}", result.best_move, result.score);
//! ```
//!
//! # Time management
//!
//! Each search polls a [`TimeBudget`] and unwinds with the best score found
//! so far once 90% of `max_time` has passed. Between turns a
//! [`DepthManager`] can raise or lower the depth based on whether the
//! previous search timed out.

pub mod budget;
pub mod config;
pub mod heuristic;
pub mod search;
pub mod stats;

pub use budget::{DepthManager, TimeBudget, DEPTH_STEP, PERCENTAGE_THRESHOLD};
pub use config::SearchConfig;
pub use heuristic::{
    HealthWeighted, Heuristic, HeuristicKind, Tiered, UnitCount, UnknownHeuristic, AI_WEIGHT,
};
pub use search::{
    suggest_move, MinimaxSearch, SearchError, SearchResult, MAX_HEURISTIC_SCORE,
    MIN_HEURISTIC_SCORE,
};
pub use stats::SearchStats;
