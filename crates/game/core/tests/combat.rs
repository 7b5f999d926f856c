use dungeon_core::combat::{self, AttackOutcome};
use dungeon_core::state::ItemPower;
use dungeon_core::{EntityId, EntityKind, Map, Position, Stat};

fn corridor(length: usize) -> Map {
    let wall = "#".repeat(length + 2);
    let text = format!("1 1\n{wall}\n#{}#\n{wall}\n", ".".repeat(length));
    Map::from_text(&text).unwrap().with_seed(7)
}

fn place(map: &mut Map, kind: EntityKind, y: i32, x: i32) -> EntityId {
    let position = Position::new(y, x);
    let id = map.add_entity(kind.spawn(position));
    map.move_entity(id, position).unwrap();
    id
}

fn health(map: &Map, id: EntityId) -> i32 {
    map.get(id).and_then(|e| e.fighter.as_ref()).map_or(0, |f| f.health)
}

#[test]
fn constitution_soaks_damage_but_never_below_one() {
    let mut map = corridor(3);
    let tiger = place(&mut map, EntityKind::Tiger, 1, 1);
    map.get_mut(tiger).unwrap().fighter.as_mut().unwrap().constitution = 2;

    let report = combat::take_damage(&mut map, tiger, 5).unwrap();
    assert_eq!(report.damage, 3);
    assert_eq!(health(&map, tiger), 27);

    let report = combat::take_damage(&mut map, tiger, 1).unwrap();
    assert_eq!(report.damage, 1);
    let report = combat::take_damage(&mut map, tiger, 0).unwrap();
    assert_eq!(report.damage, 0);
    assert_eq!(health(&map, tiger), 26);
}

#[test]
fn killing_removes_the_entity_and_later_hits_are_no_ops() {
    let mut map = corridor(3);
    let player = place(&mut map, EntityKind::Player, 1, 1);
    let rabbit = place(&mut map, EntityKind::Rabbit, 1, 2);
    map.get_mut(rabbit).unwrap().fighter.as_mut().unwrap().health = 1;

    let report = combat::hit(&mut map, player, rabbit).unwrap();
    assert!(report.killed());
    assert!(!map.contains(rabbit));
    assert!(map.entity_at(Position::new(1, 2)).is_none());

    assert!(combat::hit(&mut map, player, rabbit).is_none());
    assert!(combat::take_damage(&mut map, rabbit, 10).is_none());
    assert_eq!(map.len(), 1);
}

#[test]
fn chests_shrug_off_any_damage() {
    let mut map = corridor(3);
    let chest = place(&mut map, EntityKind::Chest, 1, 2);

    let report = combat::take_damage(&mut map, chest, 1_000).unwrap();
    assert!(report.immune);
    assert!(!report.killed);
    assert_eq!(health(&map, chest), 1);
    assert!(map.contains(chest));
}

#[test]
fn monsters_close_in_and_strike_the_player() {
    let mut map = corridor(5);
    let player = place(&mut map, EntityKind::Player, 1, 1);
    let tiger = place(&mut map, EntityKind::Tiger, 1, 4);

    map.tick(player);
    assert_eq!(map.get(tiger).unwrap().position, Position::new(1, 3));
    map.tick(player);
    assert_eq!(map.get(tiger).unwrap().position, Position::new(1, 2));
    assert_eq!(health(&map, player), 20);

    // Adjacent now: strength 5 against constitution 1.
    map.tick(player);
    assert_eq!(map.get(tiger).unwrap().position, Position::new(1, 2));
    assert_eq!(health(&map, player), 16);
    assert_eq!(
        map.logs.last(),
        Some("Tiger hits player. Player takes 4 damage.")
    );
}

#[test]
fn confused_monsters_hurt_nobody() {
    let mut map = corridor(3);
    let player = place(&mut map, EntityKind::Player, 1, 1);
    let tiger = place(&mut map, EntityKind::Tiger, 1, 2);
    map.get_mut(tiger)
        .unwrap()
        .fighter
        .as_mut()
        .unwrap()
        .apply_effect(Stat::Confused, 1, 3);

    map.tick(player);
    assert_eq!(health(&map, player), 20);
    assert!(map.logs.last().is_some_and(|line| line.contains("confused")));

    let report = combat::hit(&mut map, tiger, player).unwrap();
    assert_eq!(report.outcome, AttackOutcome::Confused);
    assert!(!report.killed());
}

#[test]
fn monsters_out_of_sight_only_wander() {
    let mut map = Map::from_text("1 1\n#######\n#.#...#\n#######\n").unwrap();
    let player = place(&mut map, EntityKind::Player, 1, 1);
    let tiger = place(&mut map, EntityKind::Tiger, 1, 4);

    for _ in 0..5 {
        map.tick(player);
    }
    let position = map.get(tiger).unwrap().position;
    assert!(position.x >= 3, "tiger crossed a wall to {position}");
    assert_eq!(health(&map, player), 20);
}

#[test]
fn familiars_hunt_monsters_near_them() {
    let mut map = corridor(7);
    let player = place(&mut map, EntityKind::Player, 1, 1);
    let hedgehog = place(&mut map, EntityKind::Hedgehog, 1, 5);
    let trumpet = place(&mut map, EntityKind::Trumpet, 1, 3);
    assert_eq!(map.entity_ids()[1], trumpet);

    map.tick(player);
    assert_eq!(map.get(trumpet).unwrap().position, Position::new(1, 4));
    assert_eq!(map.get(trumpet).unwrap().focus, Some(hedgehog));
    assert!(map.get(hedgehog).unwrap().is_tracked());

    map.tick(player);
    assert_eq!(health(&map, hedgehog), 7);
}

#[test]
fn familiars_never_attack_the_player() {
    let mut map = corridor(3);
    let player = place(&mut map, EntityKind::Player, 1, 1);
    let trumpet = place(&mut map, EntityKind::Trumpet, 1, 2);

    for _ in 0..4 {
        map.tick(player);
    }
    assert_eq!(health(&map, player), 20);
    assert!(map.contains(trumpet));
}

#[test]
fn bombs_blow_up_after_their_fuse_and_reward_the_thrower() {
    let mut map = Map::from_text("0 0\n........\n").unwrap().with_seed(3);
    let player = place(&mut map, EntityKind::Player, 0, 0);
    let mut bomb = EntityKind::Bomb.spawn(Position::new(0, 6));
    if let Some(ItemPower::Explosive { armed, fuse, .. }) =
        bomb.item.as_mut().map(|item| &mut item.power)
    {
        *armed = true;
        *fuse = 1;
    }
    bomb.focus = Some(player);
    let bomb = map.add_entity(bomb);
    let sunflower = place(&mut map, EntityKind::Sunflower, 0, 7);
    map.get_mut(sunflower).unwrap().fighter.as_mut().unwrap().health = 1;

    map.tick(player);
    assert!(map.contains(bomb));
    assert!(map.contains(sunflower));

    map.tick(player);
    assert!(!map.contains(bomb));
    assert!(!map.contains(sunflower));
    assert_eq!(health(&map, player), 20);
    let xp = map.get(player).unwrap().progression.unwrap().current_xp;
    assert!((3..=7).contains(&xp), "unexpected xp {xp}");
    let explosion = map.find_entities(EntityKind::Explosion);
    assert_eq!(explosion.len(), 1);

    map.tick(player);
    assert!(map.find_entities(EntityKind::Explosion).is_empty());
}
