//! Inventory actions: equip, use, drop and launch.

use super::ActionError;
use crate::combat;
use crate::config::GameConfig;
use crate::engine::reward_kill;
use crate::state::{
    Direction, Entity, EntityId, EntityKind, ItemPower, Map, Position, Stat, StateError,
};
use crate::stats::{apply_bonus, swap_bodies};

fn inventory_len(entity: &Entity) -> usize {
    entity.holder.as_ref().map_or(0, |holder| holder.inventory.len())
}

fn check_index(map: &Map, holder: EntityId, index: usize) -> Result<EntityKind, ActionError> {
    let entity = map.require(holder)?;
    let Some(inventory) = entity.holder.as_ref() else {
        return Err(StateError::MissingCapability {
            id: holder,
            capability: "inventory",
        }
        .into());
    };
    inventory
        .inventory
        .get(index)
        .map(|item| item.kind)
        .ok_or(ActionError::InventoryIndex {
            index,
            len: inventory_len(entity),
        })
}

/// Flips the equipped flag of an inventory item and books its bonuses.
pub(crate) fn set_equipped(entity: &mut Entity, index: usize, equipped: bool) {
    let Some(item) = entity
        .holder
        .as_mut()
        .and_then(|holder| holder.inventory.get_mut(index))
        .and_then(|carried| carried.item.as_mut())
    else {
        return;
    };
    if item.equipped == equipped {
        return;
    }
    item.equipped = equipped;
    let power = item.power;
    apply_bonus(entity, &power, if equipped { 1 } else { -1 });
}

/// Removes an item from an inventory, unequipping it first.
pub(crate) fn take_out(entity: &mut Entity, index: usize) -> Option<Entity> {
    set_equipped(entity, index, false);
    let holder = entity.holder.as_mut()?;
    (index < holder.inventory.len()).then(|| holder.inventory.remove(index))
}

/// Equips an item, or unequips it when it already is.
///
/// Equipping frees the item's slot first.
pub fn equip(map: &mut Map, holder: EntityId, index: usize) -> Result<(), ActionError> {
    let kind = check_index(map, holder, index)?;
    let entity = map.require_mut(holder)?;
    let equipped = entity
        .holder
        .as_ref()
        .and_then(|h| h.inventory[index].item.as_ref())
        .is_some_and(|item| item.equipped);

    if equipped {
        set_equipped(entity, index, false);
        map.logs.add_message(format!("You unequip the {}.", kind.name()));
        return Ok(());
    }
    let occupied = entity
        .holder
        .as_ref()
        .and_then(|h| h.equipped_in(kind.equip_slot()));
    if let Some(current) = occupied {
        set_equipped(entity, current, false);
    }
    set_equipped(entity, index, true);
    map.logs.add_message(format!("You equip the {}.", kind.name()));
    Ok(())
}

/// Drops an item on the holder's cell.
pub fn drop_item(map: &mut Map, holder: EntityId, index: usize) -> Result<(), ActionError> {
    let kind = check_index(map, holder, index)?;
    let entity = map.require_mut(holder)?;
    let position = entity.position;
    if let Some(mut item) = take_out(entity, index) {
        item.position = position;
        map.add_entity(item);
        map.logs.add_message(format!("You drop the {}.", kind.name()));
    }
    Ok(())
}

/// Uses an inventory item. Returns false when the item has no use.
pub fn use_item(map: &mut Map, holder: EntityId, index: usize) -> Result<bool, ActionError> {
    let kind = check_index(map, holder, index)?;
    match kind {
        EntityKind::Heart => {
            let entity = map.require_mut(holder)?;
            let consumed = take_out(entity, index);
            let amount = match consumed.and_then(|item| item.item).map(|data| data.power) {
                Some(ItemPower::Heal { amount }) => amount,
                _ => 0,
            };
            if let Some(fighter) = entity.fighter.as_mut() {
                fighter.heal(amount);
            }
            Ok(true)
        }
        EntityKind::Bomb => arm_bomb(map, holder, index),
        EntityKind::ScrollofDamage => {
            read_scroll_of_damage(map, holder, index)?;
            Ok(true)
        }
        EntityKind::ScrollofWeakening => {
            read_scroll_of_weakening(map, holder, index)?;
            Ok(true)
        }
        EntityKind::BodySnatchPotion => drink_body_snatch(map, holder, index),
        _ => Ok(false),
    }
}

fn arm_bomb(map: &mut Map, holder: EntityId, index: usize) -> Result<bool, ActionError> {
    let fuse = map.config().bomb_fuse;
    let entity = map.require_mut(holder)?;
    let position = entity.position;
    let Some(mut bomb) = take_out(entity, index) else {
        return Ok(false);
    };
    if let Some(item) = bomb.item.as_mut() {
        if let ItemPower::Explosive {
            armed, fuse: timer, ..
        } = &mut item.power
        {
            *armed = true;
            *timer = fuse;
        }
    }
    bomb.position = position;
    bomb.focus = Some(holder);
    map.add_entity(bomb);
    map.logs.add_message("Bomb is armed.");
    Ok(true)
}

fn others_within(
    map: &Map,
    holder: EntityId,
    centre: Position,
    radius_sq: Option<i32>,
) -> Vec<EntityId> {
    map.entities()
        .filter(|(id, entity)| {
            *id != holder
                && entity.is_fighter()
                && radius_sq.is_none_or(|r| entity.position.distance_squared(centre) <= r)
        })
        .map(|(id, _)| id)
        .collect()
}

fn read_scroll_of_damage(map: &mut Map, holder: EntityId, index: usize) -> Result<(), ActionError> {
    let entity = map.require_mut(holder)?;
    take_out(entity, index);
    let centre = entity.position;
    let damage = entity.fighter.as_ref().map_or(0, |f| f.intelligence);

    for victim in others_within(map, holder, centre, Some(GameConfig::SCROLL_RADIUS_SQ)) {
        if let Some(report) = combat::take_damage(map, victim, damage) {
            map.logs.add_message(report.to_string());
        }
    }
    Ok(())
}

fn read_scroll_of_weakening(
    map: &mut Map,
    holder: EntityId,
    index: usize,
) -> Result<(), ActionError> {
    let entity = map.require_mut(holder)?;
    take_out(entity, index);
    let centre = entity.position;
    let amount = entity
        .fighter
        .as_ref()
        .map_or(1, |f| (f.intelligence / 2).max(1));

    for victim in others_within(map, holder, centre, None) {
        if let Some(fighter) = map.get_mut(victim).and_then(|e| e.fighter.as_mut()) {
            fighter.apply_effect(Stat::Strength, -amount, GameConfig::WEAKENING_TICKS);
        }
    }
    map.logs.add_message(format!(
        "The enemies have -{amount} strength for {} turns.",
        GameConfig::WEAKENING_TICKS
    ));
    Ok(())
}

fn drink_body_snatch(map: &mut Map, holder: EntityId, index: usize) -> Result<bool, ActionError> {
    let centre = map.require(holder)?.position;
    let candidates = others_within(map, holder, centre, None);
    let Some(&other) = map.dice_mut().choose(&candidates) else {
        return Err(ActionError::NoTarget);
    };

    let (me, them) = map.pair_mut(holder, other).ok_or(StateError::EntityNotFound(other))?;
    take_out(me, index);
    swap_bodies(me, them);
    let (here, is_player, their_kind) = (me.position, me.kind == EntityKind::Player, them.kind);

    if is_player {
        map.camera = here;
        let range = map.config().vision_range;
        map.compute_visibility(here, range);
    }
    map.recompute_paths(holder);
    map.recompute_paths(other);
    map.logs
        .add_message(format!("You exchange your body with the {}.", their_kind.name()));
    Ok(true)
}

/// Fires the equipped long-range weapon along `direction`.
///
/// Hits the nearest fighter on the line within the weapon's range. A fire
/// ball staff leaves an explosion on the target's cell. Returns whether
/// something was hit.
pub fn launch(map: &mut Map, holder: EntityId, direction: Direction) -> Result<bool, ActionError> {
    let entity = map.require(holder)?;
    let (weapon, damage, range, stat) = entity
        .holder
        .as_ref()
        .and_then(|h| h.ranged_weapon())
        .ok_or(ActionError::NoRangedWeapon)?;
    let weapon_kind = entity
        .holder
        .as_ref()
        .map_or(EntityKind::Bow, |h| h.inventory[weapon].kind);
    let bonus = entity.fighter.as_ref().map_or(0, |f| f.stat(stat));

    let mut cell = entity.position;
    let mut target = None;
    for _ in 0..range {
        cell = cell.step(direction);
        target = map.find_by(|other| other.position == cell && other.is_fighter()).first().copied();
        if target.is_some() {
            break;
        }
    }
    let Some(target) = target else {
        return Ok(false);
    };

    let Some(report) = combat::take_damage(map, target, damage + bonus) else {
        return Ok(false);
    };
    let verb = match weapon_kind {
        EntityKind::FireBallStaff => "is shot by a fire ball",
        _ => "is shot by an arrow",
    };
    let name = report.defender.name();
    map.logs.add_message(format!("The {name} {verb}. {report}"));
    if report.killed {
        reward_kill(map, holder);
    }
    if weapon_kind == EntityKind::FireBallStaff {
        map.add_entity(EntityKind::Explosion.spawn(cell));
    }
    Ok(true)
}
