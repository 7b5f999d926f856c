//! Walking, bump attacks and pick-ups.

use super::ActionError;
use crate::combat;
use crate::engine::reward_kill;
use crate::state::{Direction, EntityId, EntityKind, ItemPower, Map, StateError, Tile};

/// Moves the player one step, resolving whatever stands in the way.
///
/// Bumping a fighter that is not a familiar attacks it. Items on the target
/// cell are picked up first. A closed door opens and is stepped into.
/// Returns whether the turn was spent.
pub fn move_player(
    map: &mut Map,
    player: EntityId,
    direction: Direction,
) -> Result<bool, ActionError> {
    let entity = map.require(player)?;
    if entity.is_dead() {
        return Err(ActionError::ActorDead);
    }
    let target = entity.position.step(direction);

    for other in map.entities_at(target) {
        let Some((fighter, familiar, item)) = map
            .get(other)
            .map(|occupant| (occupant.is_fighter(), occupant.is_familiar(), occupant.is_item()))
        else {
            continue;
        };
        if fighter {
            if familiar {
                continue;
            }
            if let Some(report) = combat::hit(map, player, other) {
                map.logs.add_message(report.to_string());
                if report.killed() {
                    reward_kill(map, player);
                }
            }
            return Ok(true);
        }
        if item {
            pick_up(map, player, other)?;
        }
    }

    if map.tile(target) == Some(Tile::Door) {
        map.set_tile(target, Tile::Floor)?;
        map.logs.add_message("The door opens.");
    }
    Ok(map.try_move_to(player, target))
}

/// Moves an item from the map into `holder`'s inventory.
///
/// Hearts heal on the spot instead of being stored. Explosions and armed
/// bombs cannot be picked up and stay where they are.
pub(crate) fn pick_up(map: &mut Map, holder: EntityId, item: EntityId) -> Result<(), ActionError> {
    let picked = map.require(item)?;
    let kind = picked.kind;
    let power = picked.item.as_ref().map(|data| data.power);

    match (kind, power) {
        (EntityKind::Explosion, _) | (_, Some(ItemPower::Explosive { armed: true, .. })) => {
            return Ok(());
        }
        _ => {}
    }
    if map.require(holder)?.holder.is_none() {
        return Err(StateError::MissingCapability {
            id: holder,
            capability: "inventory",
        }
        .into());
    }

    let Some(picked) = map.remove_entity(item) else {
        return Ok(());
    };
    let entity = map.require_mut(holder)?;
    let name = entity.kind.name();
    if let Some(ItemPower::Heal { amount }) = power {
        let healed = entity.fighter.as_mut().map_or(0, |fighter| fighter.heal(amount));
        map.logs
            .add_message(format!("The {name} eats the heart and regains {healed} health."));
        return Ok(());
    }
    if let Some(inventory) = entity.holder.as_mut() {
        inventory.inventory.push(picked);
    }
    map.logs
        .add_message(format!("The {name} picks up the {}.", kind.name()));
    Ok(())
}
