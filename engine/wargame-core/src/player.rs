use serde::{Deserialize, Serialize};
use std::fmt;

/// The two sides. Attacker always maximizes heuristic scores, Defender
/// always minimizes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Attacker,
    Defender,
}

impl Player {
    pub const MAX: Player = Player::Attacker;
    pub const MIN: Player = Player::Defender;

    pub fn next(self) -> Player {
        match self {
            Player::Attacker => Player::Defender,
            Player::Defender => Player::Attacker,
        }
    }

    pub fn is_max(self) -> bool {
        self == Player::MAX
    }

    /// The side to move for a given role in the search tree.
    pub fn from_max(is_max: bool) -> Player {
        if is_max {
            Player::MAX
        } else {
            Player::MIN
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Attacker => "Attacker",
            Player::Defender => "Defender",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_alternates() {
        assert_eq!(Player::Attacker.next(), Player::Defender);
        assert_eq!(Player::Defender.next().next(), Player::Defender);
    }

    #[test]
    fn test_roles() {
        assert!(Player::Attacker.is_max());
        assert!(!Player::Defender.is_max());
        assert_eq!(Player::from_max(true), Player::Attacker);
        assert_eq!(Player::from_max(false), Player::Defender);
    }
}
