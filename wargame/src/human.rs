//! Keyboard move entry.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use tracing::debug;
use wargame_core::{Board, CoordPair, Player};

/// Prompt `player` until they type a pair of on-board coordinates.
///
/// Only the coordinates are checked here; legality is up to the board.
/// Fails if the input is closed.
pub fn read_move<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    player: Player,
    board: &Board,
) -> Result<CoordPair> {
    let mut line = String::new();
    loop {
        write!(output, "Player {player}, enter your move: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for {player}'s move");
        }

        match line.trim().parse::<CoordPair>() {
            Ok(pair) if board.is_valid_coord(pair.src) && board.is_valid_coord(pair.dst) => {
                return Ok(pair);
            }
            Ok(pair) => {
                debug!(%pair, "off-board coordinates");
                writeln!(output, "Invalid coordinates! Try again.")?;
            }
            Err(e) => {
                writeln!(output, "Invalid coordinates! Try again. ({e})")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(script: &str) -> (Result<CoordPair>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let board = Board::default();
        let result = read_move(&mut input, &mut output, Player::Attacker, &board);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_reads_valid_move() {
        let (result, output) = read("E4 D4\n");
        assert_eq!(result.unwrap(), "E4 D4".parse().unwrap());
        assert_eq!(output, "Player Attacker, enter your move: ");
    }

    #[test]
    fn test_reprompts_on_bad_input() {
        let (result, output) = read("hello\nZ9 Z8\ne4,d4\n");
        assert_eq!(result.unwrap(), "E4 D4".parse().unwrap());
        assert_eq!(output.matches("Invalid coordinates!").count(), 2);
        assert_eq!(output.matches("enter your move").count(), 3);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let (result, _) = read("");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }
}
