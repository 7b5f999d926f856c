//! Melee strike resolution.

use crate::config::GameConfig;
use crate::state::Fighter;

/// What a melee swing turns into before armour is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strike {
    /// The attacker stumbles and deals nothing.
    Confused,
    Normal(i32),
    Critical(i32),
}

impl Strike {
    pub fn raw_damage(self) -> i32 {
        match self {
            Strike::Confused => 0,
            Strike::Normal(damage) | Strike::Critical(damage) => damage,
        }
    }
}

/// Turns a d100 `roll` into a strike.
///
/// A roll at or below the attacker's critical chance multiplies the damage
/// by [`GameConfig::CRITICAL_MULTIPLIER`]. Negative strength hits for 0.
pub fn roll_strike(attacker: &Fighter, roll: u32) -> Strike {
    if attacker.is_confused() {
        return Strike::Confused;
    }
    let damage = attacker.strength.max(0);
    if i64::from(roll) <= i64::from(attacker.critical) {
        Strike::Critical(damage * GameConfig::CRITICAL_MULTIPLIER)
    } else {
        Strike::Normal(damage)
    }
}
