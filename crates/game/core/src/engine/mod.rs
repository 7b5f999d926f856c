//! Turn simulation.
//!
//! [`Map::tick`] gives every entity one turn in registration order. The
//! [`Dungeon`] stacks floors on top of that and turns [`PlayerAction`]s into
//! ticks.
//!
//! [`PlayerAction`]: crate::action::PlayerAction

mod behavior;
mod dungeon;

pub use dungeon::{Dungeon, DungeonSnapshot, FloorGenerator, LoadOutcome, TurnReport};

use crate::config::GameConfig;
use crate::state::{EntityId, Map};
use crate::stats;

impl Map {
    /// Runs one round. Entities removed during the round lose their turn,
    /// entities added during the round first act in the next one.
    pub fn tick(&mut self, player: EntityId) {
        let order = self.entity_ids().to_vec();
        for id in order {
            if self.contains(id) {
                behavior::take_turn(self, id, player);
            }
        }
    }
}

/// Grants the experience of a kill to `killer`.
pub(crate) fn reward_kill(map: &mut Map, killer: EntityId) {
    let (min, max) = GameConfig::KILL_XP;
    let xp = map.dice_mut().range(min, max);
    if let Some(entity) = map.get_mut(killer) {
        if entity.progression.is_some() {
            stats::add_xp(entity, xp);
            map.logs.add_message(format!("You gain {xp} experience."));
        }
    }
}
