//! Units and their combat/repair tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::moves::MoveError;
use crate::player::Player;

pub const MAX_HEALTH: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    AI,
    Virus,
    Tech,
    Program,
    Firewall,
}

// Indexed [acting unit][target unit] in declaration order of `UnitType`.
const DAMAGE_TABLE: [[u8; 5]; 5] = [
    [3, 3, 3, 3, 1], // AI
    [9, 1, 6, 6, 1], // Virus
    [1, 6, 1, 1, 1], // Tech
    [3, 3, 3, 3, 1], // Program
    [1, 1, 1, 1, 1], // Firewall
];

// Zero means the pair cannot repair.
const REPAIR_TABLE: [[u8; 5]; 5] = [
    [0, 1, 1, 0, 0], // AI
    [0, 0, 0, 0, 0], // Virus
    [3, 0, 0, 3, 3], // Tech
    [0, 0, 0, 0, 0], // Program
    [0, 0, 0, 0, 0], // Firewall
];

impl UnitType {
    pub const ALL: [UnitType; 5] = [
        UnitType::AI,
        UnitType::Virus,
        UnitType::Tech,
        UnitType::Program,
        UnitType::Firewall,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// AI, Firewall and Program cannot move while engaged or backwards.
    pub fn is_restricted(self) -> bool {
        matches!(self, UnitType::AI | UnitType::Firewall | UnitType::Program)
    }

    pub fn can_repair(self) -> bool {
        matches!(self, UnitType::AI | UnitType::Tech)
    }

    /// Raw table damage `self` deals to `target`.
    pub fn damage_to(self, target: UnitType) -> u8 {
        DAMAGE_TABLE[self.index()][target.index()]
    }

    /// Raw table repair `self` gives `target`, `None` if the pair is illegal.
    pub fn repair_to(self, target: UnitType) -> Option<u8> {
        match REPAIR_TABLE[self.index()][target.index()] {
            0 => None,
            amount => Some(amount),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitType::AI => "AI",
            UnitType::Virus => "Virus",
            UnitType::Tech => "Tech",
            UnitType::Program => "Program",
            UnitType::Firewall => "Firewall",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A unit on the board. Owned by the cell that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub player: Player,
    pub unit_type: UnitType,
    pub health: u8,
}

impl Unit {
    pub fn new(player: Player, unit_type: UnitType) -> Self {
        Self {
            player,
            unit_type,
            health: MAX_HEALTH,
        }
    }

    /// A copy at `health`, clamped to `1..=MAX_HEALTH`.
    pub fn with_health(mut self, health: u8) -> Self {
        self.health = health.clamp(1, MAX_HEALTH);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply a signed health change, clamped to `0..=MAX_HEALTH`.
    pub fn mod_health(&mut self, delta: i32) {
        let health = (self.health as i32 + delta).clamp(0, MAX_HEALTH as i32);
        self.health = health as u8;
    }

    /// Damage this unit deals to `target`, never more than the target has.
    pub fn damage_amount(&self, target: &Unit) -> u8 {
        self.unit_type
            .damage_to(target.unit_type)
            .min(target.health)
    }

    /// Health this unit restores on `target`, never past `MAX_HEALTH`.
    pub fn repair_amount(&self, target: &Unit) -> Result<u8, MoveError> {
        if !self.unit_type.can_repair() {
            return Err(MoveError::CannotRepair(self.unit_type));
        }
        if target.health >= MAX_HEALTH {
            return Err(MoveError::FullHealth);
        }
        let amount = self
            .unit_type
            .repair_to(target.unit_type)
            .ok_or(MoveError::IllegalRepair {
                src: self.unit_type,
                dst: target.unit_type,
            })?;
        Ok(amount.min(MAX_HEALTH - target.health))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.player.name().chars().next().unwrap_or('?');
        let t = self.unit_type.name().chars().next().unwrap_or('?');
        let s = format!("{}{}{}", p.to_ascii_lowercase(), t, self.health);
        f.pad(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unit_has_full_health() {
        let unit = Unit::new(Player::Attacker, UnitType::Virus);
        assert_eq!(unit.health, MAX_HEALTH);
        assert!(unit.is_alive());
    }

    #[test]
    fn test_with_health_keeps_unit_alive() {
        let unit = Unit::new(Player::Attacker, UnitType::Tech);
        assert_eq!(unit.with_health(0).health, 1);
        assert!(unit.with_health(0).is_alive());
        assert_eq!(unit.with_health(12).health, MAX_HEALTH);
        assert_eq!(unit.with_health(4).health, 4);
    }

    #[test]
    fn test_mod_health_clamps() {
        let mut unit = Unit::new(Player::Defender, UnitType::Tech);
        unit.mod_health(5);
        assert_eq!(unit.health, 9);
        unit.mod_health(-20);
        assert_eq!(unit.health, 0);
        assert!(!unit.is_alive());
    }

    #[test]
    fn test_damage_table_samples() {
        assert_eq!(UnitType::Virus.damage_to(UnitType::AI), 9);
        assert_eq!(UnitType::Tech.damage_to(UnitType::Virus), 6);
        assert_eq!(UnitType::Virus.damage_to(UnitType::Tech), 6);
        assert_eq!(UnitType::AI.damage_to(UnitType::Firewall), 1);
        for t in UnitType::ALL {
            assert_eq!(UnitType::Firewall.damage_to(t), 1);
            assert!(t.damage_to(UnitType::Firewall) >= 1);
        }
    }

    #[test]
    fn test_damage_clamped_by_target_health() {
        let virus = Unit::new(Player::Attacker, UnitType::Virus);
        let ai = Unit::new(Player::Defender, UnitType::AI).with_health(4);
        assert_eq!(virus.damage_amount(&ai), 4);
    }

    #[test]
    fn test_repair_pairs() {
        let legal = [
            (UnitType::AI, UnitType::Virus, 1),
            (UnitType::AI, UnitType::Tech, 1),
            (UnitType::Tech, UnitType::AI, 3),
            (UnitType::Tech, UnitType::Firewall, 3),
            (UnitType::Tech, UnitType::Program, 3),
        ];
        for src in UnitType::ALL {
            for dst in UnitType::ALL {
                let expected = legal
                    .iter()
                    .find(|(s, d, _)| *s == src && *d == dst)
                    .map(|(_, _, a)| *a);
                assert_eq!(src.repair_to(dst), expected, "{src} -> {dst}");
            }
        }
    }

    #[test]
    fn test_repair_amount_errors() {
        let tech = Unit::new(Player::Defender, UnitType::Tech);
        let virus = Unit::new(Player::Defender, UnitType::Virus);
        let hurt_ai = Unit::new(Player::Defender, UnitType::AI).with_health(8);

        assert_eq!(tech.repair_amount(&hurt_ai), Ok(1));
        assert_eq!(
            tech.repair_amount(&Unit::new(Player::Defender, UnitType::AI)),
            Err(MoveError::FullHealth)
        );
        assert_eq!(
            virus.repair_amount(&hurt_ai),
            Err(MoveError::CannotRepair(UnitType::Virus))
        );
        let hurt_virus = virus.with_health(2);
        assert_eq!(
            tech.repair_amount(&hurt_virus),
            Err(MoveError::IllegalRepair {
                src: UnitType::Tech,
                dst: UnitType::Virus
            })
        );
    }

    #[test]
    fn test_display_is_three_chars() {
        let unit = Unit::new(Player::Attacker, UnitType::Firewall).with_health(7);
        assert_eq!(unit.to_string(), "aF7");
        assert_eq!(format!("{:^5}", unit), " aF7 ");
    }
}
