//! Entity placement loader.
//!
//! A scenario file is a RON list of placements applied on top of a floor
//! loaded with [`MapLoader`](super::MapLoader):
//!
//! ```ron
//! [
//!     (kind: "Player", y: 1, x: 1),
//!     (kind: "Tiger", y: 4, x: 7),
//!     (kind: "Merchant", y: 2, x: 3),
//! ]
//! ```

use std::path::Path;
use std::str::FromStr;

use dungeon_core::{EntityId, EntityKind, Map, Position};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: String,
    pub y: i32,
    pub x: i32,
}

impl Placement {
    pub fn position(&self) -> Position {
        Position::new(self.y, self.x)
    }
}

pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Placement>> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario {}: {}", path.display(), e))
    }

    /// Spawns every placement on `map`, stocking merchants and chests from
    /// the map's dice.
    ///
    /// All placements are checked before the first spawn, so a bad entry
    /// leaves the map as it was.
    pub fn apply(map: &mut Map, placements: &[Placement]) -> LoadResult<Vec<EntityId>> {
        let mut resolved = Vec::with_capacity(placements.len());
        for placement in placements {
            let kind = EntityKind::from_str(&placement.kind)
                .map_err(|_| anyhow::anyhow!("Unknown entity kind {:?}", placement.kind))?;
            let position = placement.position();
            if map.tile(position).is_none() {
                anyhow::bail!("{} placed outside the map at {}", placement.kind, position);
            }
            resolved.push((kind, position));
        }

        let mut ids = Vec::with_capacity(resolved.len());
        for (kind, position) in resolved {
            let entity = kind.spawn_stocked(position, map.dice_mut());
            let id = map.add_entity(entity);
            map.move_entity(id, position)?;
            ids.push(id);
        }
        tracing::debug!(target: "dungeon::content", placed = ids.len(), "scenario applied");
        Ok(ids)
    }

    pub fn load_into(path: &Path, map: &mut Map) -> LoadResult<Vec<EntityId>> {
        let placements = Self::load(path)?;
        Self::apply(map, &placements)
    }
}
