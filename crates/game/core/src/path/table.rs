use std::collections::BTreeMap;

use crate::state::Position;

/// Next-hop table of a tracked entity.
///
/// For every reachable cell it lists the cells to step onto, best first,
/// in order to walk towards the table's owner. Duplicates are kept: two
/// seed expansions may agree on a predecessor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathTable {
    routes: BTreeMap<Position, Vec<Position>>,
}

impl PathTable {
    pub(crate) fn from_routes(routes: BTreeMap<Position, Vec<Position>>) -> Self {
        Self { routes }
    }

    /// Ranked next hops from `position`, if it can reach the owner.
    pub fn next_hops(&self, position: Position) -> Option<&[Position]> {
        self.routes.get(&position).map(Vec::as_slice)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.routes.contains_key(&position)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &[Position])> {
        self.routes.iter().map(|(cell, hops)| (*cell, hops.as_slice()))
    }
}
