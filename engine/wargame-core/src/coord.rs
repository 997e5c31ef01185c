//! Grid coordinates and move descriptors.
//!
//! Labels put the row first as a letter and the column second as a
//! hexadecimal digit, so `E4` is row 4, column 4.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ROW_LABELS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const COL_LABELS: &str = "0123456789abcdef";
const SEPARATORS: &[char] = &[' ', ',', '.', ':', ';', '-', '_'];

/// Errors produced while parsing coordinate text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} characters, got '{input}'")]
    WrongLength { expected: usize, input: String },

    #[error("unknown row label '{0}'")]
    BadRow(char),

    #[error("unknown column label '{0}'")]
    BadColumn(char),
}

/// A cell position. May lie outside the board; the board validates it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn row_label(&self) -> char {
        label_at(ROW_LABELS, self.row)
    }

    pub fn col_label(&self) -> char {
        label_at(COL_LABELS, self.col)
    }

    /// Orthogonal neighbours in the order up, left, down, right.
    pub fn adjacent(&self) -> [Coord; 4] {
        [
            Coord::new(self.row - 1, self.col),
            Coord::new(self.row, self.col - 1),
            Coord::new(self.row + 1, self.col),
            Coord::new(self.row, self.col + 1),
        ]
    }

    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.adjacent().contains(other)
    }

    /// Every cell of the square of radius `dist` around `self`, centre
    /// included, in row-major order.
    pub fn iter_range(&self, dist: i32) -> impl Iterator<Item = Coord> {
        let Coord { row, col } = *self;
        (row - dist..=row + dist)
            .flat_map(move |r| (col - dist..=col + dist).map(move |c| Coord::new(r, c)))
    }

    fn parse_chars(row: char, col: char) -> Result<Self, ParseError> {
        let r = ROW_LABELS
            .find(row.to_ascii_uppercase())
            .ok_or(ParseError::BadRow(row))?;
        let c = COL_LABELS
            .find(col.to_ascii_lowercase())
            .ok_or(ParseError::BadColumn(col))?;
        Ok(Coord::new(r as i32, c as i32))
    }
}

fn label_at(labels: &str, index: i32) -> char {
    usize::try_from(index)
        .ok()
        .and_then(|i| labels.chars().nth(i))
        .unwrap_or('?')
}

fn strip_separators(s: &str) -> Vec<char> {
    s.trim().chars().filter(|c| !SEPARATORS.contains(c)).collect()
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_label(), self.col_label())
    }
}

impl FromStr for Coord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match strip_separators(s).as_slice() {
            [row, col] => Coord::parse_chars(*row, *col),
            _ => Err(ParseError::WrongLength {
                expected: 2,
                input: s.to_string(),
            }),
        }
    }
}

/// A move: source and destination. `src == dst` means self-destruct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoordPair {
    pub src: Coord,
    pub dst: Coord,
}

impl CoordPair {
    pub const fn new(src: Coord, dst: Coord) -> Self {
        Self { src, dst }
    }

    pub fn is_self_destruct(&self) -> bool {
        self.src == self.dst
    }
}

impl fmt::Display for CoordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.src, self.dst)
    }
}

impl FromStr for CoordPair {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match strip_separators(s).as_slice() {
            [r0, c0, r1, c1] => Ok(CoordPair::new(
                Coord::parse_chars(*r0, *c0)?,
                Coord::parse_chars(*r1, *c1)?,
            )),
            _ => Err(ParseError::WrongLength {
                expected: 4,
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!("E4".parse::<Coord>().unwrap(), Coord::new(4, 4));
        assert_eq!(" a0 ".parse::<Coord>().unwrap(), Coord::new(0, 0));
        assert_eq!("c:b".parse::<Coord>().unwrap(), Coord::new(2, 11));
    }

    #[test]
    fn test_parse_coord_errors() {
        assert!(matches!(
            "E".parse::<Coord>(),
            Err(ParseError::WrongLength { expected: 2, .. })
        ));
        assert_eq!("4E".parse::<Coord>(), Err(ParseError::BadRow('4')));
        assert_eq!("Ez".parse::<Coord>(), Err(ParseError::BadColumn('z')));
    }

    #[test]
    fn test_parse_pair_with_separators() {
        let pair: CoordPair = "E4 d-3".parse().unwrap();
        assert_eq!(pair.src, Coord::new(4, 4));
        assert_eq!(pair.dst, Coord::new(3, 3));
        assert!("E4D".parse::<CoordPair>().is_err());
    }

    #[test]
    fn test_display_round_trips_labels() {
        let pair = CoordPair::new(Coord::new(3, 4), Coord::new(2, 4));
        assert_eq!(pair.to_string(), "D4 C4");
        assert_eq!(Coord::new(-1, 2).to_string(), "?2");
    }

    #[test]
    fn test_adjacent_order() {
        let c = Coord::new(2, 2);
        assert_eq!(
            c.adjacent(),
            [
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(3, 2),
                Coord::new(2, 3)
            ]
        );
        assert!(c.is_adjacent(&Coord::new(3, 2)));
        assert!(!c.is_adjacent(&Coord::new(3, 3)));
        assert!(!c.is_adjacent(&c));
    }

    #[test]
    fn test_iter_range_covers_square() {
        let cells: Vec<_> = Coord::new(0, 0).iter_range(1).collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Coord::new(-1, -1));
        assert_eq!(cells[4], Coord::new(0, 0));
        assert_eq!(cells[8], Coord::new(1, 1));
    }

    #[test]
    fn test_self_destruct_designator() {
        let c = Coord::new(1, 1);
        assert!(CoordPair::new(c, c).is_self_destruct());
        assert!(!CoordPair::new(c, Coord::new(1, 2)).is_self_destruct());
    }

    #[test]
    fn test_coord_serializes_as_row_col() {
        let json = serde_json::to_string(&Coord::new(3, 1)).unwrap();
        assert_eq!(json, r#"{"row":3,"col":1}"#);
    }
}
