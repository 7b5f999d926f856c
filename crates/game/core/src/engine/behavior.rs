//! Per-kind turn logic run by [`Map::tick`].

use crate::combat::{self, AttackReport};
use crate::state::{
    Direction, EntityId, EntityKind, ItemData, ItemPower, Map, Position, Role,
};

use super::reward_kill;

pub(super) fn take_turn(map: &mut Map, id: EntityId, player: EntityId) {
    let Some(entity) = map.get(id) else {
        return;
    };
    match (entity.role(), entity.kind) {
        (Role::Monster, _) => monster_turn(map, id),
        (Role::Familiar, _) => familiar_turn(map, id, player),
        (Role::Hero | Role::Friendly, _) => tick_effects(map, id),
        (Role::Item, EntityKind::Bomb) => bomb_turn(map, id),
        (Role::Item, EntityKind::Explosion) => {
            map.remove_entity(id);
        }
        (Role::Item, _) => {}
    }
}

fn tick_effects(map: &mut Map, id: EntityId) {
    if let Some(fighter) = map.get_mut(id).and_then(|entity| entity.fighter.as_mut()) {
        fighter.tick_effects();
    }
}

fn position_of(map: &Map, id: EntityId) -> Option<Position> {
    map.get(id).map(|entity| entity.position)
}

/// Ranked next hops from `from` in the path table of `target`.
fn hops_towards(map: &Map, target: EntityId, from: Position) -> Option<Vec<Position>> {
    map.get(target)?
        .paths
        .as_ref()?
        .next_hops(from)
        .map(<[Position]>::to_vec)
}

/// Steps along the first legal hop; strikes the target when stuck next to it.
fn pursue(
    map: &mut Map,
    id: EntityId,
    target: EntityId,
    hops: &[Position],
    may_strike: bool,
) -> Option<AttackReport> {
    if hops.iter().any(|hop| map.try_move_to(id, *hop)) {
        return None;
    }
    let here = position_of(map, id)?;
    let there = position_of(map, target)?;
    if !may_strike || here.distance_squared(there) > 1 {
        return None;
    }
    let report = combat::hit(map, id, target)?;
    map.logs.add_message(report.to_string());
    Some(report)
}

fn wander(map: &mut Map, id: EntityId) {
    for _ in 0..map.config().wander_attempts {
        let Some(&direction) = map.dice_mut().choose(&Direction::ALL) else {
            return;
        };
        if map.try_step(id, direction) {
            return;
        }
    }
}

fn monster_turn(map: &mut Map, id: EntityId) {
    tick_effects(map, id);
    let Some(here) = position_of(map, id) else {
        return;
    };
    let sight = map.config().monster_sight_sq;
    let range = map.config().monster_vision_range;

    let target = map
        .entities()
        .find(|(_, entity)| {
            entity.kind == EntityKind::Player && here.distance_squared(entity.position) <= sight
        })
        .map(|(target, entity)| (target, entity.position));

    if let Some((target, there)) = target {
        if let Some(hops) = hops_towards(map, target, here) {
            if map.is_visible_from(here, there, range) {
                pursue(map, id, target, &hops, true);
                return;
            }
        }
    }
    wander(map, id);
}

fn familiar_turn(map: &mut Map, id: EntityId, player: EntityId) {
    tick_effects(map, id);
    let Some(entity) = map.get(id) else {
        return;
    };
    let here = entity.position;
    let mut focus = entity
        .focus
        .filter(|focus| map.contains(*focus))
        .unwrap_or(player);

    if focus == player {
        let sight = map.config().familiar_sight_sq;
        let prey = map
            .entities()
            .find(|(_, other)| {
                other.role() == Role::Monster && here.distance_squared(other.position) <= sight
            })
            .map(|(prey, _)| prey);
        if let Some(prey) = prey {
            map.track(prey);
            focus = prey;
        }
    }
    if let Some(entity) = map.get_mut(id) {
        entity.focus = Some(focus);
    }

    match hops_towards(map, focus, here) {
        Some(hops) => {
            let report = pursue(map, id, focus, &hops, focus != player);
            if report.is_some_and(|report| report.killed()) {
                if let Some(entity) = map.get_mut(id) {
                    entity.focus = None;
                }
            }
        }
        None => wander(map, id),
    }
}

fn bomb_turn(map: &mut Map, id: EntityId) {
    let Some(entity) = map.get_mut(id) else {
        return;
    };
    let position = entity.position;
    let owner = entity.focus;
    let Some(ItemData {
        power: ItemPower::Explosive {
            damage,
            armed,
            fuse,
        },
        ..
    }) = entity.item.as_mut()
    else {
        return;
    };
    if !*armed {
        return;
    }
    if *fuse > 0 {
        *fuse -= 1;
        return;
    }
    let damage = *damage;
    explode(map, id, position, damage, owner);
}

fn explode(
    map: &mut Map,
    bomb: EntityId,
    position: Position,
    damage: i32,
    owner: Option<EntityId>,
) {
    map.logs.add_message("The bomb is exploding.");
    let radius = map.config().bomb_radius;
    let victims = map.find_by(|entity| {
        entity.is_fighter() && entity.position.manhattan(position) <= radius
    });
    for victim in victims {
        let Some(report) = combat::take_damage(map, victim, damage) else {
            continue;
        };
        map.logs.add_message(report.to_string());
        if report.killed {
            if let Some(owner) = owner {
                reward_kill(map, owner);
            }
        }
    }
    map.remove_entity(bomb);
    map.add_entity(EntityKind::Explosion.spawn(position));
    tracing::debug!(target: "dungeon::engine", %position, "bomb exploded");
}
