//! Multi-source Dijkstra producing next-hop tables.
//!
//! One expansion runs from each walkable neighbour of the owner, so a
//! follower gets several ranked ways in. Costs are `(hops, crowding)`
//! compared lexicographically: `hops` counts steps, `crowding` counts how
//! many occupied cells the route expanded through.

mod table;

pub use table::PathTable;

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use crate::state::{Direction, Map, Position};

/// Neighbour order shared by seeding and expansion.
const EXPANSION_ORDER: [Direction; 4] = [
    Direction::Down,
    Direction::Up,
    Direction::Right,
    Direction::Left,
];

type Cost = (i32, i32);

struct Expansion {
    costs: BTreeMap<Position, Cost>,
    predecessors: BTreeMap<Position, Position>,
}

fn walkable(map: &Map, position: Position) -> bool {
    map.tile(position).is_some_and(|tile| tile.can_walk())
}

fn expand(map: &Map, origin: Position, seed: Position, max_distance: i32) -> Expansion {
    let mut heap = BinaryHeap::new();
    heap.push(Reverse(((1, 0), seed)));
    let mut visited = BTreeSet::from([origin]);
    let mut costs = BTreeMap::from([(origin, (0, 0)), (seed, (1, 0))]);
    let mut predecessors = BTreeMap::from([(seed, origin)]);

    while let Some(Reverse((cost, cell))) = heap.pop() {
        if cost.0 >= max_distance || !visited.insert(cell) {
            continue;
        }
        let crowding = i32::from(!map.is_free(cell));
        for direction in EXPANSION_ORDER {
            let next = cell.step(direction);
            if !walkable(map, next) {
                continue;
            }
            let candidate = (cost.0 + 1, cost.1 + crowding);
            if costs.get(&next).is_none_or(|known| *known > candidate) {
                costs.insert(next, candidate);
                predecessors.insert(next, cell);
                heap.push(Reverse((candidate, next)));
            }
        }
    }

    Expansion {
        costs,
        predecessors,
    }
}

/// Builds the next-hop table that leads towards `origin`.
pub fn plan(map: &Map, origin: Position, max_distance: i32) -> PathTable {
    let expansions: Vec<Expansion> = EXPANSION_ORDER
        .into_iter()
        .map(|direction| origin.step(direction))
        .filter(|seed| walkable(map, *seed))
        .map(|seed| expand(map, origin, seed, max_distance))
        .collect();

    let cells: BTreeSet<Position> = expansions
        .iter()
        .flat_map(|expansion| expansion.predecessors.keys().copied())
        .collect();

    let routes = cells
        .into_iter()
        .map(|cell| {
            let mut ranked: Vec<(Cost, Position)> = expansions
                .iter()
                .filter_map(|expansion| {
                    let predecessor = expansion.predecessors.get(&cell)?;
                    let cost = expansion.costs.get(&cell)?;
                    Some((*cost, *predecessor))
                })
                .collect();
            ranked.sort();
            (cell, ranked.into_iter().map(|(_, hop)| hop).collect())
        })
        .collect();

    PathTable::from_routes(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_end_corridor() {
        let map = Map::from_text("1 1\n#####\n#...#\n#####\n").unwrap();
        let table = plan(&map, Position::new(1, 1), 12);
        assert_eq!(table.next_hops(Position::new(1, 2)), Some(&[Position::new(1, 1)][..]));
        assert_eq!(table.next_hops(Position::new(1, 3)), Some(&[Position::new(1, 2)][..]));
        // the owner's own cell is never a key
        assert!(!table.contains(Position::new(1, 1)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn hop_cap_bounds_the_table() {
        let map = Map::from_text("0 0\n..........\n").unwrap();
        let table = plan(&map, Position::new(0, 0), 3);
        let reached: Vec<i32> = table.iter().map(|(cell, _)| cell.x).collect();
        assert_eq!(reached, vec![1, 2, 3]);
    }

    #[test]
    fn boxed_in_owner_has_an_empty_table() {
        let map = Map::from_text("1 1\n###\n#.#\n###\n").unwrap();
        assert!(plan(&map, Position::new(1, 1), 12).is_empty());
    }

    #[test]
    fn open_field_offers_several_ranked_hops() {
        let map = Map::from_text("1 1\n...\n...\n...\n").unwrap();
        let table = plan(&map, Position::new(1, 1), 12);
        let hops = table.next_hops(Position::new(0, 0)).unwrap();
        assert!(hops.len() >= 2);
        assert!(hops.iter().all(|hop| hop.manhattan(Position::new(0, 0)) == 1));
    }
}
