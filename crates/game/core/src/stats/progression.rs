//! Experience and leveling.

use crate::state::{Entity, Fighter, Progression};

/// Grants `xp` (scaled by the entity's experience percentage) and levels up
/// while the pool overflows. Returns the number of levels gained.
///
/// Entities without both a fighter and a progression block gain nothing.
pub fn add_xp(entity: &mut Entity, xp: i32) -> u32 {
    let Entity {
        fighter: Some(fighter),
        progression: Some(progression),
        ..
    } = entity
    else {
        return 0;
    };
    progression.current_xp += xp * progression.xp_percent / 100;

    let mut gained = 0;
    while progression.current_xp > progression.max_xp {
        level_up(fighter, progression);
        gained += 1;
    }
    if gained > 0 {
        tracing::debug!(target: "dungeon::stats", level = fighter.level, gained, "level up");
    }
    gained
}

fn level_up(fighter: &mut Fighter, progression: &mut Progression) {
    fighter.level += 1;
    let level = fighter.level;
    progression.current_xp -= progression.max_xp;
    progression.max_xp = level * 10;

    // floor(2 * sqrt(level))
    fighter.max_health += (4 * level).isqrt();
    fighter.health = fighter.max_health;
    fighter.strength += 1;
    if level % 3 == 0 {
        fighter.dexterity += 1;
        fighter.constitution += 1;
    }
    if level % 4 == 0 {
        fighter.intelligence += 1;
    }
    if level % 6 == 0 {
        fighter.charisma += 1;
    }
    if level % 10 == 0 && fighter.critical < 95 {
        fighter.critical += (100 - fighter.charisma) / 30;
    }
}
