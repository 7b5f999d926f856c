use super::{EntityId, EntityKind, Fighter, Holder, ItemData, Position, Progression, Role};
use crate::path::PathTable;

/// A thing on the map, described by optional capability blocks.
///
/// The kind decides which blocks are present at spawn time; the engine
/// only ever asks "does it fight", "does it hold items", and so on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Position,
    pub fighter: Option<Fighter>,
    pub holder: Option<Holder>,
    pub item: Option<ItemData>,
    pub progression: Option<Progression>,
    /// Present on tracked entities; refreshed whenever they move.
    pub paths: Option<PathTable>,
    /// Familiar: current target. Armed bomb: whoever threw it.
    pub focus: Option<EntityId>,
}

impl Entity {
    pub(crate) fn bare(kind: EntityKind, position: Position) -> Self {
        Self {
            kind,
            position,
            fighter: None,
            holder: None,
            item: None,
            progression: None,
            paths: None,
            focus: None,
        }
    }

    pub fn role(&self) -> Role {
        self.kind.role()
    }

    pub fn is_fighter(&self) -> bool {
        self.fighter.is_some()
    }

    pub fn is_friendly(&self) -> bool {
        self.role() == Role::Friendly
    }

    pub fn is_familiar(&self) -> bool {
        self.role() == Role::Familiar
    }

    pub fn is_item(&self) -> bool {
        self.item.is_some()
    }

    pub fn is_tracked(&self) -> bool {
        self.paths.is_some()
    }

    pub fn is_dead(&self) -> bool {
        self.fighter.as_ref().is_some_and(Fighter::is_dead)
    }
}
