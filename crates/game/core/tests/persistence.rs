use dungeon_core::action;
use dungeon_core::codec::{self, HolderSnapshot};
use dungeon_core::{
    CorruptSave, Dungeon, DungeonSnapshot, EntityKind, EntitySnapshot, GameConfig, GameError,
    LoadOutcome, Map, MapSnapshot, Position,
};
use dungeon_core::state::ItemPower;
use proptest::prelude::*;

const ROOM: &str = "\
2 2
#########
#...H...#
#.......#
#..&....#
#########
";

fn populated_floor() -> Map {
    let mut map = Map::from_text(ROOM).unwrap().with_seed(99);
    let start = map.start();
    let player = map.add_entity(EntityKind::Player.spawn(start));
    map.move_entity(player, start).unwrap();

    let sword = EntityKind::Sword.spawn(start);
    map.get_mut(player)
        .unwrap()
        .holder
        .as_mut()
        .unwrap()
        .inventory
        .push(sword);
    action::equip(&mut map, player, 0).unwrap();

    let merchant = EntityKind::Merchant.spawn_stocked(Position::new(1, 6), map.dice_mut());
    map.add_entity(merchant);
    let tiger = map.add_entity(EntityKind::Tiger.spawn(Position::new(3, 6)));
    map.track(tiger);
    map.add_entity(EntityKind::Trumpet.spawn(Position::new(2, 3)));
    map.add_entity(EntityKind::Heart.spawn(Position::new(3, 1)));
    map
}

#[test]
fn saving_a_loaded_save_reproduces_it() {
    let map = populated_floor();
    let snapshot = map.save_state();
    assert_eq!(snapshot.entities.len(), 5);
    assert_eq!(snapshot.entities[1].kind, "Trumpet");

    let restored = snapshot.restore().unwrap();
    assert_eq!(restored.save_state(), snapshot);
    assert_eq!(restored.draw_string(), map.draw_string());

    let player = restored.player().unwrap();
    let entity = restored.get(player).unwrap();
    assert_eq!(entity.fighter.as_ref().unwrap().strength, 8);
    assert!(entity.holder.as_ref().unwrap().inventory[0].item.as_ref().unwrap().equipped);
    assert!(entity.paths.as_ref().is_some_and(|table| !table.is_empty()));
}

#[test]
fn json_and_bincode_carry_the_same_snapshot() {
    let snapshot = populated_floor().save_state();

    let text = codec::to_json(&snapshot).unwrap();
    assert!(text.contains("\"type\": \"Player\""));
    assert_eq!(codec::from_json::<MapSnapshot>(&text).unwrap(), snapshot);

    let bytes = codec::to_bytes(&snapshot).unwrap();
    assert_eq!(codec::from_bytes::<MapSnapshot>(&bytes).unwrap(), snapshot);
}

#[test]
fn saves_without_dice_state_still_load() {
    let snapshot = populated_floor().save_state();
    let mut value = serde_json::to_value(&snapshot).unwrap();
    value.as_object_mut().unwrap().remove("rng");

    let loaded: MapSnapshot = serde_json::from_value(value).unwrap();
    assert_eq!(loaded.rng, Default::default());
    assert!(loaded.restore().is_ok());
}

#[test]
fn seen_memory_survives_but_visibility_starts_dark() {
    let map = populated_floor();
    assert!(map.is_seen(Position::new(2, 2)));

    let restored = map.save_state().restore().unwrap();
    assert!(restored.is_seen(Position::new(2, 2)));
    assert!(!restored.is_visible(Position::new(2, 2)));
}

fn assert_rejected(corrupt: MapSnapshot, code: &str) {
    let mut map = populated_floor();
    let before = map.save_state();
    let error = map.load_state(&corrupt).unwrap_err();
    assert_eq!(error.error_code(), code, "{error}");
    assert_eq!(map.save_state(), before, "a failed load must not touch the floor");
}

#[test]
fn unknown_kinds_are_rejected() {
    let mut snapshot = populated_floor().save_state();
    snapshot.entities[2].kind = "Dragon".to_string();
    assert_rejected(snapshot, "SAVE_UNKNOWN_KIND");
}

#[test]
fn unknown_glyphs_are_rejected() {
    let mut snapshot = populated_floor().save_state();
    snapshot.map = snapshot.map.replacen('.', "~", 1);
    assert_rejected(snapshot, "SAVE_INVALID_GLYPH");
}

#[test]
fn fighters_need_their_fighter_block() {
    let mut snapshot = populated_floor().save_state();
    snapshot.entities[2].fighter = None;
    assert_rejected(snapshot, "SAVE_MISSING_FIELD");
}

#[test]
fn inventories_only_hold_items() {
    let mut snapshot = populated_floor().save_state();
    let tiger = snapshot.entities[3].clone();
    if let Some(HolderSnapshot { inventory, .. }) = snapshot.entities[0].holder.as_mut() {
        inventory.push(tiger);
    }
    assert_rejected(snapshot, "SAVE_INVALID_FIELD");
}

#[test]
fn item_powers_must_match_their_kind() {
    let mut snapshot = populated_floor().save_state();
    let sword = snapshot.entities[0].holder.as_ref().unwrap().inventory[0].clone();
    let mut heart: EntitySnapshot = snapshot.entities[4].clone();
    heart.item = sword.item;
    snapshot.entities[4] = heart;
    assert_rejected(snapshot, "SAVE_INVALID_FIELD");
}

#[test]
fn saved_health_must_fit_the_living() {
    let mut snapshot = populated_floor().save_state();
    snapshot.entities[3].fighter.as_mut().unwrap().health = -7;
    assert_rejected(snapshot, "SAVE_INVALID_FIELD");

    let mut snapshot = populated_floor().save_state();
    snapshot.entities[3].fighter.as_mut().unwrap().health = 999;
    assert_rejected(snapshot, "SAVE_INVALID_FIELD");
}

#[test]
fn blocks_foreign_to_a_kind_are_rejected() {
    let mut snapshot = populated_floor().save_state();
    let tiger_fighter = snapshot.entities[3].fighter.clone();
    snapshot.entities[4].fighter = tiger_fighter;
    assert_rejected(snapshot, "SAVE_INVALID_FIELD");

    let mut snapshot = populated_floor().save_state();
    let heart_item = snapshot.entities[4].item.clone();
    snapshot.entities[3].item = heart_item;
    assert_rejected(snapshot, "SAVE_INVALID_FIELD");
}

#[test]
fn focus_must_point_at_a_saved_entity() {
    let mut snapshot = populated_floor().save_state();
    snapshot.entities[1].focus = Some(5);
    assert_rejected(snapshot, "SAVE_INVALID_FIELD");
}

#[test]
fn armed_bombs_still_credit_their_thrower_after_a_reload() {
    let mut map = Map::from_text("0 0\n#......\n").unwrap().with_seed(8);
    let player = map.add_entity(EntityKind::Player.spawn(Position::new(0, 1)));
    let mut bomb = EntityKind::Bomb.spawn(Position::new(0, 5));
    if let Some(ItemPower::Explosive { armed, fuse, .. }) =
        bomb.item.as_mut().map(|item| &mut item.power)
    {
        *armed = true;
        *fuse = 1;
    }
    bomb.focus = Some(player);
    map.add_entity(bomb);
    let hedgehog = map.add_entity(EntityKind::Hedgehog.spawn(Position::new(0, 6)));
    map.get_mut(hedgehog).unwrap().fighter.as_mut().unwrap().health = 1;

    let snapshot = map.save_state();
    assert_eq!(snapshot.entities[1].focus, Some(0));
    let mut reloaded = snapshot.restore().unwrap();
    assert_eq!(reloaded.save_state(), snapshot);

    let xp = |map: &Map| {
        let player = map.player().unwrap();
        map.get(player).unwrap().progression.unwrap().current_xp
    };
    for _ in 0..3 {
        let live_player = map.player().unwrap();
        map.tick(live_player);
        let reloaded_player = reloaded.player().unwrap();
        reloaded.tick(reloaded_player);
    }
    assert!(map.find_entities(EntityKind::Hedgehog).is_empty());
    assert!(reloaded.find_entities(EntityKind::Hedgehog).is_empty());
    assert!(xp(&map) > 0);
    assert_eq!(xp(&reloaded), xp(&map));
}

#[test]
fn grids_must_match_the_declared_size() {
    let mut snapshot = populated_floor().save_state();
    snapshot.seen_tiles.pop();
    assert_rejected(snapshot, "SAVE_DIMENSION_MISMATCH");

    let mut snapshot = populated_floor().save_state();
    snapshot.width += 1;
    assert_rejected(snapshot, "SAVE_DIMENSION_MISMATCH");
}

#[test]
fn entities_must_stand_on_the_map() {
    let mut snapshot = populated_floor().save_state();
    snapshot.entities[3].x = 40;
    assert_rejected(snapshot, "SAVE_OUT_OF_BOUNDS");

    let mut snapshot = populated_floor().save_state();
    snapshot.start_y = -1;
    assert_rejected(snapshot, "SAVE_OUT_OF_BOUNDS");
}

#[test]
fn garbage_input_is_malformed() {
    let error = codec::from_json::<MapSnapshot>("{ not json").unwrap_err();
    assert!(matches!(error, CorruptSave::Malformed { .. }));
    let error = codec::from_bytes::<MapSnapshot>(&[1, 2, 3]).unwrap_err();
    assert!(matches!(error, CorruptSave::Malformed { .. }));
}

#[test]
fn dungeon_saves_every_floor() {
    let mut dungeon = Dungeon::new(populated_floor(), GameConfig::default());
    dungeon.push_floor(Map::from_text(ROOM).unwrap());
    let snapshot = dungeon.save_state();
    assert_eq!(snapshot.floors.len(), 2);
    assert_eq!(snapshot.floors[1].floor, 1);

    let mut other = Dungeon::new(Map::from_text(ROOM).unwrap(), GameConfig::default());
    assert_eq!(other.load_state(&snapshot).unwrap(), LoadOutcome::Loaded);
    assert_eq!(other.save_state(), snapshot);
    assert_eq!(other.player_health(), 20);
}

#[test]
fn loading_a_floor_without_player_reports_it() {
    let empty = Map::from_text(ROOM).unwrap().save_state();
    let snapshot = DungeonSnapshot {
        floors: vec![empty],
        current_floor: 0,
    };
    let mut dungeon = Dungeon::new(populated_floor(), GameConfig::default());

    let outcome = dungeon.load_state(&snapshot).unwrap();
    let LoadOutcome::NoPlayer { message } = outcome else {
        panic!("expected a missing player, got {outcome:?}");
    };
    assert_eq!(message, "No player was found on this map! Maybe you died?");
    assert_eq!(dungeon.map().logs.last(), Some(message.as_str()));
    assert_eq!(dungeon.player_health(), 0);
    assert!(dungeon.perform(dungeon_core::PlayerAction::Wait).is_err());
}

#[test]
fn dungeon_rejects_a_current_floor_past_the_end() {
    let mut dungeon = Dungeon::new(populated_floor(), GameConfig::default());
    let before = dungeon.save_state();
    let mut snapshot = before.clone();
    snapshot.current_floor = 3;

    assert!(dungeon.load_state(&snapshot).is_err());
    assert_eq!(dungeon.save_state(), before);
}

proptest! {
    #[test]
    fn scattered_creatures_round_trip(
        placements in proptest::collection::vec((0usize..6, 1i32..4, 1i32..8), 0..12),
        seed in any::<u64>(),
    ) {
        let kinds = [
            EntityKind::Tiger,
            EntityKind::Rabbit,
            EntityKind::Chest,
            EntityKind::Bomb,
            EntityKind::RingXP,
            EntityKind::Merchant,
        ];
        let mut map = Map::from_text(ROOM).unwrap().with_seed(seed);
        for (kind, y, x) in placements {
            let entity = kinds[kind].spawn_stocked(Position::new(y, x), map.dice_mut());
            map.add_entity(entity);
        }
        let snapshot = map.save_state();
        let restored = snapshot.restore().unwrap();
        prop_assert_eq!(restored.save_state(), snapshot);
    }
}
