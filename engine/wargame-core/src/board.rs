//! The game board and its state transitions.
//!
//! # Initial deployment (5x5)
//!
//! ```text
//!     0   1   2   3   4
//! A: dA9 dT9 dF9  .   .
//! B: dT9 dP9  .   .   .
//! C: dF9  .   .   .  aP9
//! D:  .   .   .  aF9 aV9
//! E:  .   .  aP9 aV9 aA9
//! ```

use std::fmt;
use std::iter;

use crate::coord::{Coord, CoordPair};
use crate::moves::{Direction, MoveError, MoveOutcome};
use crate::player::Player;
use crate::unit::{Unit, UnitType};

pub const DEFAULT_DIM: usize = 5;
/// Smallest board on which the two deployments do not overlap.
pub const MIN_DIM: usize = 4;
/// Largest board the column labels can address.
pub const MAX_DIM: usize = 16;

pub const SELF_DESTRUCT_DAMAGE: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dim: usize,
    /// Row-major cells.
    cells: Vec<Option<Unit>>,
    attacker_has_ai: bool,
    defender_has_ai: bool,
}

impl Board {
    /// A board with both sides in their starting positions.
    pub fn new(dim: usize) -> Self {
        let mut board = Self::empty(dim);
        let md = dim as i32 - 1;
        let deployment = [
            (0, 0, Player::Defender, UnitType::AI),
            (1, 0, Player::Defender, UnitType::Tech),
            (0, 1, Player::Defender, UnitType::Tech),
            (2, 0, Player::Defender, UnitType::Firewall),
            (0, 2, Player::Defender, UnitType::Firewall),
            (1, 1, Player::Defender, UnitType::Program),
            (md, md, Player::Attacker, UnitType::AI),
            (md - 1, md, Player::Attacker, UnitType::Virus),
            (md, md - 1, Player::Attacker, UnitType::Virus),
            (md - 2, md, Player::Attacker, UnitType::Program),
            (md, md - 2, Player::Attacker, UnitType::Program),
            (md - 1, md - 1, Player::Attacker, UnitType::Firewall),
        ];
        for (row, col, player, unit_type) in deployment {
            board.set(Coord::new(row, col), Some(Unit::new(player, unit_type)));
        }
        board
    }

    /// A board with no units. Both AI flags are still set; placing units
    /// with [`Board::set`] does not change them.
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            cells: vec![None; dim * dim],
            attacker_has_ai: true,
            defender_has_ai: true,
        }
    }

    /// A board holding `units`. Dead units are left out. AI flags reflect
    /// which AIs are present.
    pub fn with_units(dim: usize, units: impl IntoIterator<Item = (Coord, Unit)>) -> Self {
        let mut board = Self::empty(dim);
        for (coord, unit) in units.into_iter().filter(|(_, u)| u.is_alive()) {
            board.set(coord, Some(unit));
        }
        for player in [Player::Attacker, Player::Defender] {
            let has_ai = board
                .player_units(player)
                .any(|(_, u)| u.unit_type == UnitType::AI);
            match player {
                Player::Attacker => board.attacker_has_ai = has_ai,
                Player::Defender => board.defender_has_ai = has_ai,
            }
        }
        board
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn has_ai(&self, player: Player) -> bool {
        match player {
            Player::Attacker => self.attacker_has_ai,
            Player::Defender => self.defender_has_ai,
        }
    }

    pub fn is_valid_coord(&self, coord: Coord) -> bool {
        let dim = self.dim as i32;
        (0..dim).contains(&coord.row) && (0..dim).contains(&coord.col)
    }

    #[inline]
    fn index(&self, coord: Coord) -> Option<usize> {
        self.is_valid_coord(coord)
            .then(|| coord.row as usize * self.dim + coord.col as usize)
    }

    pub fn get(&self, coord: Coord) -> Option<&Unit> {
        self.index(coord).and_then(|i| self.cells[i].as_ref())
    }

    fn get_mut(&mut self, coord: Coord) -> Option<&mut Unit> {
        self.index(coord).and_then(move |i| self.cells[i].as_mut())
    }

    /// Place or clear a cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, coord: Coord, unit: Option<Unit>) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = unit;
        }
    }

    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord).is_none()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let dim = self.dim as i32;
        (0..dim).flat_map(move |row| (0..dim).map(move |col| Coord::new(row, col)))
    }

    /// Units owned by `player`, row-major.
    pub fn player_units(&self, player: Player) -> impl Iterator<Item = (Coord, &Unit)> + '_ {
        self.coords()
            .filter_map(move |c| self.get(c).map(|u| (c, u)))
            .filter(move |(_, u)| u.player == player)
    }

    pub fn unit_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn total_health(&self) -> u32 {
        self.cells.iter().flatten().map(|u| u.health as u32).sum()
    }

    /// True if an enemy of `player` is orthogonally adjacent to `coord`.
    pub fn is_engaged(&self, coord: Coord, player: Player) -> bool {
        coord
            .adjacent()
            .iter()
            .filter_map(|&n| self.get(n))
            .any(|u| u.player != player)
    }

    /// Remove the unit at `coord` if it is dead, clearing the AI flag when
    /// needed.
    fn remove_dead(&mut self, coord: Coord) {
        let Some(unit) = self.get(coord).copied() else {
            return;
        };
        if unit.is_alive() {
            return;
        }
        self.set(coord, None);
        if unit.unit_type == UnitType::AI {
            match unit.player {
                Player::Attacker => self.attacker_has_ai = false,
                Player::Defender => self.defender_has_ai = false,
            }
        }
    }

    /// Change the health of the unit at `coord`, removing it if it dies.
    /// Returns the absolute health change actually applied.
    fn mod_health(&mut self, coord: Coord, delta: i32) -> u8 {
        let applied = match self.get_mut(coord) {
            Some(unit) => {
                let before = unit.health;
                unit.mod_health(delta);
                before.abs_diff(unit.health)
            }
            None => return 0,
        };
        self.remove_dead(coord);
        applied
    }

    /// Coordinates in range, `src` owned by `player`, and `dst` either
    /// `src` or an orthogonal neighbour.
    pub fn is_moveable(&self, pair: &CoordPair, player: Player) -> bool {
        if !self.is_valid_coord(pair.src) || !self.is_valid_coord(pair.dst) {
            return false;
        }
        match self.get(pair.src) {
            Some(unit) if unit.player == player => {
                pair.is_self_destruct() || pair.src.is_adjacent(&pair.dst)
            }
            _ => false,
        }
    }

    /// Validate and apply a move for `player`.
    pub fn perform_move(
        &mut self,
        pair: &CoordPair,
        player: Player,
    ) -> Result<MoveOutcome, MoveError> {
        if !self.is_moveable(pair, player) {
            return Err(MoveError::InvalidMove);
        }
        let src = *self.get(pair.src).ok_or(MoveError::InvalidMove)?;

        if pair.is_self_destruct() {
            return Ok(self.self_destruct(pair.src, src));
        }

        match self.get(pair.dst).copied() {
            None => self.move_unit(pair, src),
            Some(dst) if dst.player == player => self.repair(pair, src, dst),
            Some(dst) => Ok(self.attack(pair, src, dst)),
        }
    }

    fn move_unit(&mut self, pair: &CoordPair, unit: Unit) -> Result<MoveOutcome, MoveError> {
        if unit.unit_type.is_restricted() {
            if self.is_engaged(pair.src, unit.player) {
                return Err(MoveError::Engaged);
            }
            let direction =
                Direction::between(pair.src, pair.dst).ok_or(MoveError::InvalidMove)?;
            let backward = match unit.player {
                Player::Attacker => matches!(direction, Direction::Right | Direction::Down),
                Player::Defender => matches!(direction, Direction::Left | Direction::Up),
            };
            if backward {
                return Err(MoveError::Backward(direction));
            }
        }

        self.set(pair.dst, Some(unit));
        self.set(pair.src, None);
        Ok(MoveOutcome::Moved {
            unit_type: unit.unit_type,
            from: pair.src,
            to: pair.dst,
        })
    }

    fn self_destruct(&mut self, at: Coord, unit: Unit) -> MoveOutcome {
        self.mod_health(at, -(unit.health as i32));

        let mut total_damage = 0u32;
        for n in at.iter_range(1).filter(|&n| n != at) {
            total_damage += self.mod_health(n, -(SELF_DESTRUCT_DAMAGE as i32)) as u32;
        }

        MoveOutcome::SelfDestructed {
            unit_type: unit.unit_type,
            at,
            total_damage,
        }
    }

    fn repair(
        &mut self,
        pair: &CoordPair,
        src: Unit,
        dst: Unit,
    ) -> Result<MoveOutcome, MoveError> {
        let amount = src.repair_amount(&dst)?;
        self.mod_health(pair.dst, amount as i32);
        Ok(MoveOutcome::Repaired {
            unit_type: src.unit_type,
            from: pair.src,
            to: pair.dst,
            amount,
        })
    }

    fn attack(&mut self, pair: &CoordPair, src: Unit, dst: Unit) -> MoveOutcome {
        // Both amounts are fixed before either side takes damage.
        let to_target = src.damage_amount(&dst);
        let to_source = dst.damage_amount(&src);

        self.mod_health(pair.src, -(to_source as i32));
        self.mod_health(pair.dst, -(to_target as i32));

        MoveOutcome::Attacked {
            unit_type: src.unit_type,
            from: pair.src,
            to: pair.dst,
            to_source,
            to_target,
        }
    }

    /// Candidate moves for `player`: for each owned unit in row-major order,
    /// the moveable orthogonal neighbours followed by self-destruct.
    ///
    /// Candidates are not guaranteed to succeed; [`Board::clone_and_move`]
    /// filters the ones that fail.
    pub fn move_candidates(&self, player: Player) -> impl Iterator<Item = CoordPair> + '_ {
        self.player_units(player).flat_map(move |(src, _)| {
            src.adjacent()
                .into_iter()
                .map(move |dst| CoordPair::new(src, dst))
                .filter(move |pair| self.is_moveable(pair, player))
                .chain(iter::once(CoordPair::new(src, src)))
        })
    }

    /// Copy the board and apply `pair`, or `None` if the move is rejected.
    pub fn clone_and_move(&self, pair: &CoordPair, player: Player) -> Option<Board> {
        let mut board = self.clone();
        board.perform_move(pair, player).ok().map(|_| board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_DIM)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.dim as i32 {
            write!(f, "{:^3} ", Coord::new(0, col).col_label())?;
        }
        writeln!(f)?;
        for row in 0..self.dim as i32 {
            write!(f, "{}: ", Coord::new(row, 0).row_label())?;
            for col in 0..self.dim as i32 {
                match self.get(Coord::new(row, col)) {
                    Some(unit) => write!(f, "{:^3} ", unit)?,
                    None => write!(f, "{:^3} ", '.')?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
