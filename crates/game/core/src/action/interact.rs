//! Dancing and talking.

use super::{ActionError, Interaction};
use crate::state::{Direction, EntityId, EntityKind, Map, Stat};

/// Rolls a d10 against charisma.
///
/// Success confuses every other fighter close enough. A failed 10 confuses
/// the dancer instead. The turn is spent either way.
pub fn dance(map: &mut Map, player: EntityId) -> Result<(), ActionError> {
    let entity = map.require(player)?;
    let here = entity.position;
    let charisma = entity.fighter.as_ref().map_or(0, |f| f.charisma);
    let radius_sq = map.config().dance_radius_sq;
    let ticks = map.config().confusion_ticks;

    let roll = map.dice_mut().roll_die(10);
    if i64::from(roll) <= i64::from(charisma) {
        let dazed: Vec<EntityId> = map
            .entities()
            .filter(|(id, other)| {
                *id != player
                    && other.is_fighter()
                    && other.position.distance_squared(here) <= radius_sq
            })
            .map(|(id, _)| id)
            .collect();
        for id in &dazed {
            if let Some(fighter) = map.get_mut(*id).and_then(|e| e.fighter.as_mut()) {
                fighter.apply_effect(Stat::Confused, 1, ticks);
            }
        }
        let message = if dazed.is_empty() {
            "It worked, but there is no one nearby...".to_string()
        } else {
            format!("It worked! Nearby enemies will be confused for {ticks} turns.")
        };
        map.logs.add_message(message);
    } else if roll == 10 {
        if let Some(fighter) = map.get_mut(player).and_then(|e| e.fighter.as_mut()) {
            fighter.apply_effect(Stat::Confused, 1, ticks);
        }
        map.logs
            .add_message(format!("You dance so badly that you are confused for {ticks} turns."));
    } else {
        map.logs.add_message("The dance was not effective...");
    }
    Ok(())
}

/// Talks to the friendly creature next to the player, if any.
pub fn interact(
    map: &mut Map,
    player: EntityId,
    direction: Direction,
) -> Result<Option<Interaction>, ActionError> {
    let target = map.require(player)?.position.step(direction);
    let Some((id, kind)) = map
        .entities()
        .find(|(_, entity)| entity.position == target && entity.is_friendly())
        .map(|(id, entity)| (id, entity.kind))
    else {
        return Ok(None);
    };

    let interaction = match kind {
        EntityKind::Merchant => Interaction::Store { merchant: id },
        EntityKind::Chest => Interaction::Chest { chest: id },
        _ => {
            let line = map
                .dice_mut()
                .choose(kind.dialogue())
                .map_or_else(String::new, |line| line.to_string());
            map.logs
                .add_message(format!("The {} said: {line}", kind.name()));
            Interaction::Dialogue { speaker: kind, line }
        }
    };
    Ok(Some(interaction))
}
