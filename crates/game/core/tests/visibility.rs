use dungeon_core::{Grid, Map, Position, Tile};
use proptest::prelude::*;

fn open_room(height: usize, width: usize) -> Map {
    Map::new(Grid::new(height, width, Tile::Floor), Position::ORIGIN)
}

#[test]
fn five_by_five_room_is_fully_visible_from_the_centre() {
    let mut map = open_room(5, 5);
    map.compute_visibility(Position::new(2, 2), 5);
    for (position, visible) in map.visible().iter() {
        assert!(*visible, "{position} should be visible");
        assert!(map.is_seen(position));
    }
}

#[test]
fn a_wall_hides_what_lies_behind_it() {
    let mut map = open_room(5, 5);
    map.set_tile(Position::new(2, 3), Tile::Wall).unwrap();
    map.compute_visibility(Position::new(2, 2), 5);

    assert!(map.is_visible(Position::new(2, 3)));
    assert!(!map.is_visible(Position::new(2, 4)));
    assert!(map.is_visible(Position::new(1, 4)));
}

#[test]
fn closed_doors_block_light_like_walls() {
    let mut map = Map::from_text("0 0\n..&..\n").unwrap();
    map.compute_visibility(Position::new(0, 0), 5);
    assert!(map.is_visible(Position::new(0, 2)));
    assert!(!map.is_visible(Position::new(0, 3)));
}

#[test]
fn seen_cells_are_remembered() {
    let mut map = Map::from_text("0 0\n..........\n").unwrap();
    map.compute_visibility(Position::new(0, 0), 3);
    map.compute_visibility(Position::new(0, 9), 3);
    assert!(!map.is_visible(Position::new(0, 1)));
    assert!(map.is_seen(Position::new(0, 1)));
    assert!(!map.is_seen(Position::new(0, 5)));
}

#[test]
fn probing_line_of_sight_leaves_the_map_untouched() {
    let mut map = open_room(6, 6);
    map.set_tile(Position::new(2, 3), Tile::Wall).unwrap();
    map.compute_visibility(Position::new(0, 0), 2);
    let before = (map.visible().clone(), map.seen().clone());

    assert!(map.is_visible_from(Position::new(5, 5), Position::new(5, 1), 5));
    assert!(!map.is_visible_from(Position::new(2, 2), Position::new(2, 4), 5));
    assert_eq!((map.visible().clone(), map.seen().clone()), before);
}

proptest! {
    #[test]
    fn open_rooms_show_exactly_the_manhattan_diamond(
        height in 1usize..10,
        width in 1usize..10,
        oy in 0usize..10,
        ox in 0usize..10,
        range in 0i32..9,
    ) {
        let origin = Position::new((oy % height) as i32, (ox % width) as i32);
        let mut map = open_room(height, width);
        map.compute_visibility(origin, range);
        for (position, visible) in map.visible().iter() {
            prop_assert_eq!(*visible, position.manhattan(origin) <= range, "{}", position);
        }
    }

    #[test]
    fn recomputing_is_idempotent_and_memory_only_grows(
        walls in proptest::collection::vec(proptest::bool::weighted(0.3), 64),
        origins in proptest::collection::vec((0i32..8, 0i32..8), 1..6),
        range in 1i32..8,
    ) {
        let mut map = open_room(8, 8);
        for (i, wall) in walls.iter().enumerate() {
            if *wall {
                map.set_tile(Position::new((i / 8) as i32, (i % 8) as i32), Tile::Wall).unwrap();
            }
        }
        for (y, x) in origins {
            let origin = Position::new(y, x);
            let seen_before = map.seen().clone();
            map.compute_visibility(origin, range);
            let first = map.visible().clone();
            map.compute_visibility(origin, range);
            prop_assert_eq!(map.visible(), &first);

            for (position, seen) in seen_before.iter() {
                prop_assert!(!*seen || map.is_seen(position));
            }
            for (position, visible) in map.visible().iter() {
                prop_assert!(!*visible || map.is_seen(position));
            }
        }
    }

    #[test]
    fn walls_in_reach_are_always_lit_when_adjacent(
        walls in proptest::collection::vec(proptest::bool::weighted(0.3), 49),
    ) {
        let mut map = open_room(7, 7);
        for (i, wall) in walls.iter().enumerate() {
            if *wall {
                map.set_tile(Position::new((i / 7) as i32, (i % 7) as i32), Tile::Wall).unwrap();
            }
        }
        let origin = Position::new(3, 3);
        map.compute_visibility(origin, 5);
        prop_assert!(map.is_visible(origin));
        for neighbour in [(2, 3), (4, 3), (3, 2), (3, 4)] {
            prop_assert!(map.is_visible(Position::new(neighbour.0, neighbour.1)));
        }
    }
}
