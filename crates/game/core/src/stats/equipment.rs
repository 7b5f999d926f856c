//! Equipment bonuses.

use crate::state::{Entity, ItemPower};

/// Adds (`sign = 1`) or removes (`sign = -1`) the bonuses of `power` on a holder.
pub fn apply_bonus(holder: &mut Entity, power: &ItemPower, sign: i32) {
    if let Some(fighter) = holder.fighter.as_mut() {
        for (stat, delta) in power.bonuses() {
            *fighter.stat_mut(stat) += sign * delta;
        }
    }
    if let Some(progression) = holder.progression.as_mut() {
        progression.xp_percent += sign * power.experience_bonus();
    }
}
