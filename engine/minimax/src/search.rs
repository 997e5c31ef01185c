//! Minimax search with optional alpha-beta pruning.
//!
//! The recursion works on owned board clones, so sibling branches never see
//! each other's moves. The Attacker is always the maximizing side.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};
use wargame_core::{Board, CoordPair, Player};

use crate::budget::TimeBudget;
use crate::config::SearchConfig;
use crate::heuristic::Heuristic;
use crate::stats::SearchStats;

/// Score of a position where the maximizing side cannot move.
pub const MIN_HEURISTIC_SCORE: i64 = -2_000_000_000;
/// Score of a position where the minimizing side cannot move.
pub const MAX_HEURISTIC_SCORE: i64 = 2_000_000_000;

/// Errors that can occur during a search.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("{0} has no legal moves")]
    NoMoves(Player),

    #[error("search depth must be at least 1")]
    ZeroDepth,
}

/// Result of a root search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move chosen from the tied set.
    pub best_move: CoordPair,

    /// Minimax value of the best move.
    pub score: i64,

    /// All root moves sharing the best score, in candidate order.
    pub tied: Vec<CoordPair>,

    /// Depth the search was run to.
    pub depth: usize,

    /// Root moves that were searched before returning.
    pub root_moves: usize,

    pub elapsed: Duration,

    /// True if the time budget cut the search short.
    pub timed_out: bool,
}

/// One search invocation. Create a new one per turn so the time budget
/// starts fresh.
pub struct MinimaxSearch<'a> {
    heuristic: &'a dyn Heuristic,
    config: &'a SearchConfig,
    stats: &'a mut SearchStats,
    budget: TimeBudget,
    timed_out: bool,
}

/// Strict comparison: ties keep the move seen first.
fn is_better(is_max: bool, best: Option<i64>, score: i64) -> bool {
    match best {
        None => true,
        Some(best) if is_max => score > best,
        Some(best) => score < best,
    }
}

impl<'a> MinimaxSearch<'a> {
    pub fn new(
        heuristic: &'a dyn Heuristic,
        config: &'a SearchConfig,
        stats: &'a mut SearchStats,
    ) -> Self {
        Self {
            heuristic,
            config,
            stats,
            budget: TimeBudget::new(config.max_time),
            timed_out: false,
        }
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Poll the budget, latching the timeout once it trips.
    fn out_of_time(&mut self) -> bool {
        if !self.timed_out && self.budget.should_return() {
            self.timed_out = true;
        }
        self.timed_out
    }

    /// Score `board` with `is_max` to move, `depth` plies below the root.
    ///
    /// Prunes with `alpha`/`beta` when the config enables it. Returns the
    /// heuristic at `max_depth`, and a sentinel when the side to move has
    /// no units left.
    pub fn search(
        &mut self,
        board: &Board,
        is_max: bool,
        depth: usize,
        max_depth: usize,
        mut alpha: i64,
        mut beta: i64,
    ) -> i64 {
        self.stats.record_node(depth);
        if depth >= max_depth {
            return self.heuristic.evaluate(board);
        }

        let player = Player::from_max(is_max);
        let mut best = None;
        let mut children = 0u64;
        let mut interrupted = false;

        for pair in board.move_candidates(player) {
            if self.out_of_time() {
                interrupted = true;
                break;
            }
            let Some(child) = board.clone_and_move(&pair, player) else {
                continue;
            };
            children += 1;

            let score = self.search(&child, !is_max, depth + 1, max_depth, alpha, beta);
            if is_better(is_max, best, score) {
                best = Some(score);
                if self.config.alpha_beta {
                    if is_max {
                        alpha = alpha.max(score);
                    } else {
                        beta = beta.min(score);
                    }
                    if beta <= alpha {
                        break;
                    }
                }
            }
        }
        self.stats.record_branch(children);

        match best {
            Some(score) => score,
            None if interrupted => self.heuristic.evaluate(board),
            None if is_max => MIN_HEURISTIC_SCORE,
            None => MAX_HEURISTIC_SCORE,
        }
    }

    /// Search every root move for `player` to `max_depth` and pick one of
    /// the best.
    ///
    /// Each root move gets a full window so tied scores are exact. The
    /// first root move is always searched, even on an exhausted budget.
    pub fn run(
        &mut self,
        board: &Board,
        player: Player,
        max_depth: usize,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult, SearchError> {
        if max_depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        self.budget = TimeBudget::new(self.config.max_time);
        self.timed_out = false;

        let is_max = player.is_max();
        let mut best = None;
        let mut tied = Vec::new();
        let mut root_moves = 0usize;

        self.stats.record_node(0);
        for pair in board.move_candidates(player) {
            if root_moves > 0 && self.out_of_time() {
                break;
            }
            let Some(child) = board.clone_and_move(&pair, player) else {
                continue;
            };
            root_moves += 1;

            let score = self.search(&child, !is_max, 1, max_depth, i64::MIN, i64::MAX);
            trace!(candidate = %pair, score, "root move scored");

            if best == Some(score) {
                tied.push(pair);
            } else if is_better(is_max, best, score) {
                best = Some(score);
                tied.clear();
                tied.push(pair);
            }
        }
        self.stats.record_branch(root_moves as u64);

        let elapsed = self.budget.elapsed();
        self.stats.record_search(elapsed, self.timed_out);

        let score = best.ok_or(SearchError::NoMoves(player))?;
        let best_move = if self.config.randomize_moves {
            tied[rng.gen_range(0..tied.len())]
        } else {
            tied[0]
        };

        debug!(
            player = %player,
            heuristic = self.heuristic.name(),
            depth = max_depth,
            score,
            tied = tied.len(),
            root_moves,
            timed_out = self.timed_out,
            elapsed_ms = elapsed.as_millis() as u64,
            "search complete"
        );

        Ok(SearchResult {
            best_move,
            score,
            tied,
            depth: max_depth,
            root_moves,
            elapsed,
            timed_out: self.timed_out,
        })
    }
}

/// Convenience function to run a single search at `config.max_depth`.
pub fn suggest_move(
    board: &Board,
    player: Player,
    heuristic: &dyn Heuristic,
    config: &SearchConfig,
    stats: &mut SearchStats,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let mut search = MinimaxSearch::new(heuristic, config, stats);
    search.run(board, player, config.max_depth, rng)
}
