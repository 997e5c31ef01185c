//! Game state and the turn loop.
//!
//! A [`Game`] owns the live board, whose turn it is, and the search
//! statistics for the whole game. [`Game::run`] drives turns until someone
//! wins, dispatching each turn to the keyboard, the broker or the search.

use anyhow::Result;
use minimax::{DepthManager, MinimaxSearch, SearchResult, SearchStats};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::fmt;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};
use wargame_core::{Board, CoordPair, MoveError, MoveOutcome, Player};

use crate::broker::MoveRelay;
use crate::human::read_move;
use crate::options::Options;
use crate::trace::TraceLog;

/// A computer move that has been applied to the board.
#[derive(Debug, Clone)]
pub struct ComputerTurn {
    pub player: Player,
    pub search: SearchResult,
    pub outcome: MoveOutcome,
}

pub struct Game {
    board: Board,
    next_player: Player,
    turns_played: u32,
    options: Options,
    stats: SearchStats,
    depth: DepthManager,
    last_depth: Option<usize>,
    rng: ChaCha20Rng,
}

impl Game {
    /// A game in the initial deployment with the Attacker to move.
    pub fn new(options: Options) -> Self {
        let board = Board::new(options.dim);
        Self::with_board(options, board)
    }

    pub fn with_board(options: Options, board: Board) -> Self {
        let rng = match options.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self {
            board,
            next_player: Player::Attacker,
            turns_played: 0,
            depth: DepthManager::new(options.min_depth, options.max_depth),
            options,
            stats: SearchStats::new(),
            last_depth: None,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Depth of the most recent computer search.
    pub fn last_depth(&self) -> Option<usize> {
        self.last_depth
    }

    /// The winner, if the game is over.
    ///
    /// The Defender wins when the turn limit is reached or when the
    /// Attacker has lost its AI. The Attacker wins by destroying the
    /// Defender's AI while keeping its own.
    pub fn has_winner(&self) -> Option<Player> {
        if self.turns_played >= self.options.max_turns {
            return Some(Player::Defender);
        }
        match (
            self.board.has_ai(Player::Attacker),
            self.board.has_ai(Player::Defender),
        ) {
            (true, true) => None,
            (true, false) => Some(Player::Attacker),
            (false, _) => Some(Player::Defender),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.has_winner().is_some()
    }

    /// Apply a move for the side to move and, on success, pass the turn.
    pub fn play_move(&mut self, pair: &CoordPair) -> Result<MoveOutcome, MoveError> {
        let outcome = self.board.perform_move(pair, self.next_player)?;
        self.next_turn();
        Ok(outcome)
    }

    fn next_turn(&mut self) {
        self.next_player = self.next_player.next();
        self.turns_played += 1;
    }

    fn search_depth(&self) -> usize {
        if self.options.adaptive_depth {
            self.depth.depth()
        } else {
            self.options.max_depth
        }
    }

    /// Search for and apply a move for the side to move.
    pub fn computer_turn(&mut self) -> Result<ComputerTurn> {
        let player = self.next_player;
        let depth = self.search_depth();
        let config = self.options.search_config();
        let heuristic = self.options.heuristic_for(player).heuristic();

        let search = MinimaxSearch::new(heuristic, &config, &mut self.stats).run(
            &self.board,
            player,
            depth,
            &mut self.rng,
        )?;

        if self.options.adaptive_depth {
            self.depth.record(search.timed_out);
        }
        self.last_depth = Some(depth);

        let outcome = self.play_move(&search.best_move)?;
        Ok(ComputerTurn {
            player,
            search,
            outcome,
        })
    }

    /// Report lines for the most recent computer turn.
    pub fn search_report(&self, search: &SearchResult) -> Vec<String> {
        let stats = &self.stats;
        let mut lines = vec![
            format!("Heuristic score: {}", search.score),
            format!("Search depth: {}", search.depth),
            format!("Average recursive depth: {:.1}", stats.average_depth()),
            format!("Evals per depth: {}", stats.format_per_depth()),
            format!("Cumulative evals: {}", stats.total_evaluations()),
        ];
        if stats.total_seconds > 0.0 {
            lines.push(format!(
                "Eval perf.: {:.1}k/s",
                stats.evaluations_per_second() / 1000.0
            ));
        }
        lines.push(format!(
            "Average branching factor: {:.1}",
            stats.branching_factor()
        ));
        lines.push(format!(
            "Elapsed time: {:.1}s",
            search.elapsed.as_secs_f64()
        ));
        if search.timed_out {
            lines.push(format!(
                "Time limit reached after {} root moves",
                search.root_moves
            ));
        }
        lines
    }

    /// Play until the game has a winner.
    ///
    /// Human turns read from `input` unless a relay is given, in which case
    /// the relay supplies the human side's moves. Computer moves are posted
    /// to the relay.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        trace: &mut TraceLog,
        relay: Option<&dyn MoveRelay>,
    ) -> Result<Player> {
        loop {
            writeln!(output)?;
            writeln!(output, "{self}")?;

            if let Some(winner) = self.has_winner() {
                writeln!(output, "{winner} wins!")?;
                trace.record_winner(winner, self.turns_played);
                info!(
                    winner = %winner,
                    turns = self.turns_played,
                    evaluations = self.stats.total_evaluations(),
                    "Game over"
                );
                return Ok(winner);
            }

            let player = self.next_player;
            if self.options.is_human(player) {
                match relay {
                    Some(relay) => self.relay_turn(output, trace, relay)?,
                    None => self.human_turn(input, output, trace)?,
                }
            } else {
                let turn = match self.computer_turn() {
                    Ok(turn) => turn,
                    Err(e) => {
                        writeln!(output, "Computer doesn't know what to do!!!")?;
                        return Err(e);
                    }
                };
                self.report_computer_turn(output, trace, &turn)?;
                if let Some(relay) = relay {
                    if let Err(e) = relay.post_move(&turn.search.best_move, self.turns_played) {
                        warn!(error = %e, "Failed to post move to broker");
                    }
                }
            }
        }
    }

    fn human_turn<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        trace: &mut TraceLog,
    ) -> Result<()> {
        let player = self.next_player;
        loop {
            let pair = read_move(input, output, player, &self.board)?;
            match self.play_move(&pair) {
                Ok(outcome) => {
                    writeln!(output, "Player {player}: {outcome}")?;
                    self.log_move(trace, player, &pair, &outcome);
                    return Ok(());
                }
                Err(e) => {
                    debug!(%pair, error = %e, "Rejected move");
                    writeln!(output, "{e}")?;
                }
            }
        }
    }

    fn relay_turn<W: Write>(
        &mut self,
        output: &mut W,
        trace: &mut TraceLog,
        relay: &dyn MoveRelay,
    ) -> Result<()> {
        let player = self.next_player;
        writeln!(output, "Getting next move with auto-retry from game broker...")?;
        loop {
            match relay.fetch_move(self.turns_played + 1) {
                Ok(Some(pair)) => match self.play_move(&pair) {
                    Ok(outcome) => {
                        writeln!(output, "Broker {player}: {outcome}")?;
                        self.log_move(trace, player, &pair, &outcome);
                        return Ok(());
                    }
                    Err(e) => warn!(%pair, error = %e, "Broker sent an illegal move"),
                },
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Failed to get move from broker"),
            }
            std::thread::sleep(relay.retry_interval());
        }
    }

    fn report_computer_turn<W: Write>(
        &self,
        output: &mut W,
        trace: &mut TraceLog,
        turn: &ComputerTurn,
    ) -> Result<()> {
        let report = self.search_report(&turn.search);
        writeln!(output, "Computer {}: {}", turn.player, turn.outcome)?;
        for line in &report {
            writeln!(output, "{line}")?;
        }
        self.log_move(trace, turn.player, &turn.search.best_move, &turn.outcome);
        trace.record_search(&report);
        Ok(())
    }

    fn log_move(&self, trace: &mut TraceLog, player: Player, pair: &CoordPair, outcome: &MoveOutcome) {
        info!(turn = self.turns_played, player = %player, mv = %pair, "{}", outcome);
        trace.record_move(self.turns_played, player, pair, outcome, &self.board);
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Next player: {}", self.next_player)?;
        writeln!(f, "Turns played: {}", self.turns_played)?;
        write!(f, "{}", self.board)
    }
}
