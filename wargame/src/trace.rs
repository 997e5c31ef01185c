//! Plain-text game trace, one file per run.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use wargame_core::{Board, CoordPair, MoveOutcome, Player};

use crate::options::Options;

/// Writes the trace file. Write failures are logged and otherwise ignored,
/// so a full disk never ends a game.
pub struct TraceLog {
    path: Option<PathBuf>,
    writer: Option<BufWriter<File>>,
}

impl TraceLog {
    /// `gameTrace-{alpha_beta}-{max_time}-{max_turns}.txt`
    pub fn file_name(options: &Options) -> String {
        format!(
            "gameTrace-{}-{:?}-{}.txt",
            options.alpha_beta, options.max_time, options.max_turns
        )
    }

    /// Create the trace under `options.trace_dir` and write the header and
    /// initial board.
    pub fn create(options: &Options, board: &Board) -> io::Result<Self> {
        fs::create_dir_all(&options.trace_dir)?;
        let path = options.trace_dir.join(Self::file_name(options));
        let file = File::create(&path)?;

        let mut log = Self {
            path: Some(path),
            writer: Some(BufWriter::new(file)),
        };
        log.write_parameters(options);
        log.line("");
        log.line("INITIAL CONFIGURATION");
        log.line(board);
        Ok(log)
    }

    /// A trace that discards everything.
    pub fn disabled() -> Self {
        Self {
            path: None,
            writer: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn line(&mut self, text: impl Display) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{text}") {
            warn!("Failed to write game trace: {}", e);
        }
    }

    fn write_parameters(&mut self, options: &Options) {
        self.line("GAME PARAMETERS");
        self.line(format_args!("Timeout Value: {:?} seconds", options.max_time));
        self.line(format_args!("Max Turns: {}", options.max_turns));
        self.line(format_args!("Alpha-Beta: {}", options.alpha_beta));
        for (index, player) in [Player::Attacker, Player::Defender].into_iter().enumerate() {
            if options.is_human(player) {
                self.line(format_args!("Player {} ({player}) is a Human", index + 1));
            } else {
                self.line(format_args!(
                    "Player {} ({player}) is an AI with heuristic {}",
                    index + 1,
                    options.heuristic_for(player)
                ));
            }
        }
    }

    /// Log an applied move. `turn` is the turn number the move completed.
    pub fn record_move(
        &mut self,
        turn: u32,
        player: Player,
        pair: &CoordPair,
        outcome: &MoveOutcome,
        board: &Board,
    ) {
        self.line("");
        self.line(format_args!("Turn # {turn}"));
        self.line(format_args!("Current Player: {player}"));
        self.line(format_args!("Move: {pair}"));
        self.line(outcome);
        self.line(board);
    }

    /// Log a computer player's search report lines.
    pub fn record_search(&mut self, report: &[String]) {
        for entry in report {
            self.line(entry);
        }
    }

    pub fn record_winner(&mut self, winner: Player, turns: u32) {
        self.line(format_args!("{winner} wins in {turns} turns"));
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.flush() {
                warn!("Failed to flush game trace: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GameType;
    use tempfile::tempdir;

    #[test]
    fn test_file_name() {
        let options = Options::default();
        assert_eq!(TraceLog::file_name(&options), "gameTrace-true-5.0-100.txt");

        let options = Options {
            alpha_beta: false,
            max_time: 0.5,
            max_turns: 20,
            ..Options::default()
        };
        assert_eq!(TraceLog::file_name(&options), "gameTrace-false-0.5-20.txt");
    }

    #[test]
    fn test_trace_contents() {
        let dir = tempdir().unwrap();
        let options = Options {
            game_type: GameType::AttackerVsComp,
            trace_dir: dir.path().join("traces"),
            ..Options::default()
        };
        let mut board = Board::default();
        let mut log = TraceLog::create(&options, &board).unwrap();

        let pair: CoordPair = "C4 B4".parse().unwrap();
        let outcome = board.perform_move(&pair, Player::Attacker).unwrap();
        log.record_move(1, Player::Attacker, &pair, &outcome, &board);
        log.record_search(&["Heuristic score: 0".to_string()]);
        log.record_winner(Player::Defender, 1);

        let path = log.path().unwrap().to_path_buf();
        assert!(path.ends_with("traces/gameTrace-true-5.0-100.txt"));
        let content = fs::read_to_string(path).unwrap();

        assert!(content.starts_with("GAME PARAMETERS\n"));
        assert!(content.contains("Timeout Value: 5.0 seconds"));
        assert!(content.contains("Player 1 (Attacker) is a Human"));
        assert!(content.contains("Player 2 (Defender) is an AI with heuristic e1"));
        assert!(content.contains("INITIAL CONFIGURATION"));
        assert!(content.contains("Turn # 1\nCurrent Player: Attacker\nMove: C4 B4\n"));
        assert!(content.contains("Moved Program unit from C4 to B4"));
        assert!(content.contains("Heuristic score: 0"));
        assert!(content.trim_end().ends_with("Defender wins in 1 turns"));
    }

    #[test]
    fn test_disabled_trace_is_silent() {
        let mut log = TraceLog::disabled();
        log.record_winner(Player::Attacker, 3);
        assert!(log.path().is_none());
    }
}
