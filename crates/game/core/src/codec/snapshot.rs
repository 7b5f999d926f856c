//! Plain-data snapshots of floors and entities.
//!
//! Capability blocks are plain `Option`s and the kind is a string tag, so
//! the same types encode to JSON and to bincode.

use std::mem::discriminant;
use std::str::FromStr;

use super::CorruptSave;
use crate::config::GameConfig;
use crate::env::Dice;
use crate::path::PathTable;
use crate::state::{
    Entity, EntityId, EntityKind, Fighter, Grid, Holder, ItemData, Map, Position, Progression, Tile,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HolderSnapshot {
    pub hazel: i32,
    pub inventory: Vec<EntitySnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub y: i32,
    pub x: i32,
    pub fighter: Option<Fighter>,
    pub holder: Option<HolderSnapshot>,
    pub item: Option<ItemData>,
    pub progression: Option<Progression>,
    /// Whether the entity keeps a path table.
    pub tracked: bool,
    /// Index into the floor's entity list: a familiar's target or a bomb's thrower.
    #[cfg_attr(feature = "serde", serde(default))]
    pub focus: Option<usize>,
}

/// Everything needed to rebuild one floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSnapshot {
    pub width: i32,
    pub height: i32,
    pub start_y: i32,
    pub start_x: i32,
    pub camera_y: i32,
    pub camera_x: i32,
    pub floor: usize,
    pub seen_tiles: Vec<Vec<bool>>,
    /// Glyph rows joined by `\n`.
    pub map: String,
    pub entities: Vec<EntitySnapshot>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rng: Dice,
}

impl EntitySnapshot {
    pub fn capture(entity: &Entity) -> Self {
        Self {
            kind: entity.kind.as_str().to_string(),
            y: entity.position.y,
            x: entity.position.x,
            fighter: entity.fighter.clone(),
            holder: entity.holder.as_ref().map(|holder| HolderSnapshot {
                hazel: holder.hazel,
                inventory: holder.inventory.iter().map(Self::capture).collect(),
            }),
            item: entity.item.clone(),
            progression: entity.progression,
            tracked: entity.is_tracked(),
            focus: None,
        }
    }

    /// Rebuilds the entity, checking every block its kind requires.
    pub fn restore(&self) -> Result<Entity, CorruptSave> {
        let kind = EntityKind::from_str(&self.kind).map_err(|_| CorruptSave::UnknownKind {
            kind: self.kind.clone(),
        })?;
        let missing = |field| CorruptSave::MissingField {
            kind: self.kind.clone(),
            field,
        };
        let invalid = |field| CorruptSave::InvalidField {
            kind: self.kind.clone(),
            field,
        };
        let mut entity = kind.spawn(Position::new(self.y, self.x));

        let unexpected = [
            (self.fighter.is_some() && entity.fighter.is_none(), "fighter"),
            (self.holder.is_some() && entity.holder.is_none(), "holder"),
            (self.item.is_some() && entity.item.is_none(), "item"),
            (self.progression.is_some() && entity.progression.is_none(), "progression"),
        ];
        if let Some((_, field)) = unexpected.into_iter().find(|(extra, _)| *extra) {
            return Err(invalid(field));
        }

        if entity.fighter.is_some() {
            let fighter = self.fighter.clone().ok_or_else(|| missing("fighter"))?;
            if fighter.health <= 0 || fighter.health > fighter.max_health {
                return Err(invalid("fighter.health"));
            }
            entity.fighter = Some(fighter);
        }
        if entity.holder.is_some() {
            let saved = self.holder.as_ref().ok_or_else(|| missing("holder"))?;
            let mut holder = Holder::new(saved.hazel);
            for carried in &saved.inventory {
                let item = carried.restore()?;
                if !item.is_item() {
                    return Err(invalid("inventory"));
                }
                holder.inventory.push(item);
            }
            entity.holder = Some(holder);
        }
        if let Some(blueprint) = entity.item.take() {
            let saved = self.item.clone().ok_or_else(|| missing("item"))?;
            if discriminant(&saved.power) != discriminant(&blueprint.power) {
                return Err(invalid("item.power"));
            }
            entity.item = Some(saved);
        }
        if entity.progression.is_some() {
            entity.progression = Some(self.progression.ok_or_else(|| missing("progression"))?);
        }
        entity.paths = self.tracked.then(PathTable::default);
        Ok(entity)
    }
}

fn dimension(value: i32, field: &'static str) -> Result<usize, CorruptSave> {
    usize::try_from(value).map_err(|_| CorruptSave::Malformed {
        detail: format!("{field} must not be negative, found {value}"),
    })
}

impl MapSnapshot {
    /// Validates the snapshot fully and builds a fresh floor from it.
    pub fn restore(&self) -> Result<Map, CorruptSave> {
        self.restore_with(GameConfig::default())
    }

    /// Like [`restore`](Self::restore), computing path tables under `config`.
    pub fn restore_with(&self, config: GameConfig) -> Result<Map, CorruptSave> {
        let width = dimension(self.width, "width")?;
        let height = dimension(self.height, "height")?;

        let lines: Vec<&str> = if self.map.is_empty() {
            Vec::new()
        } else {
            self.map.split('\n').collect()
        };
        if lines.len() != height {
            return Err(CorruptSave::DimensionMismatch {
                field: "map rows",
                expected: height,
                found: lines.len(),
            });
        }
        let mut rows = Vec::with_capacity(height);
        for (row, line) in lines.iter().enumerate() {
            let cells = line
                .chars()
                .enumerate()
                .map(|(column, glyph)| {
                    Tile::from_glyph(glyph).ok_or(CorruptSave::InvalidGlyph { glyph, row, column })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if cells.len() != width {
                return Err(CorruptSave::DimensionMismatch {
                    field: "map columns",
                    expected: width,
                    found: cells.len(),
                });
            }
            rows.push(cells);
        }

        if self.seen_tiles.len() != height {
            return Err(CorruptSave::DimensionMismatch {
                field: "seen_tiles rows",
                expected: height,
                found: self.seen_tiles.len(),
            });
        }
        if let Some(bad) = self.seen_tiles.iter().find(|row| row.len() != width) {
            return Err(CorruptSave::DimensionMismatch {
                field: "seen_tiles columns",
                expected: width,
                found: bad.len(),
            });
        }

        let tiles = Grid::from_rows(rows).unwrap_or_else(|| Grid::new(height, width, Tile::Empty));
        let seen = Grid::from_rows(self.seen_tiles.clone())
            .unwrap_or_else(|| Grid::new(height, width, false));

        let out_of_bounds = |what: &str, y: i32, x: i32| CorruptSave::OutOfBounds {
            what: what.to_string(),
            y,
            x,
        };
        let start = Position::new(self.start_y, self.start_x);
        if !tiles.contains(start) {
            return Err(out_of_bounds("start", start.y, start.x));
        }
        let camera = Position::new(self.camera_y, self.camera_x);
        if !tiles.contains(camera) {
            return Err(out_of_bounds("camera", camera.y, camera.x));
        }

        let mut entities = Vec::with_capacity(self.entities.len());
        for saved in &self.entities {
            let entity = saved.restore()?;
            if !tiles.contains(entity.position) {
                return Err(out_of_bounds(&saved.kind, saved.y, saved.x));
            }
            if saved.focus.is_some_and(|index| index >= self.entities.len()) {
                return Err(CorruptSave::InvalidField {
                    kind: saved.kind.clone(),
                    field: "focus",
                });
            }
            entities.push(entity);
        }

        let mut map = Map::new(tiles, start).with_config(config);
        map.floor = self.floor;
        map.camera = camera;
        map.restore_seen(seen);
        *map.dice_mut() = self.rng.clone();
        let ids: Vec<_> = entities
            .into_iter()
            .map(|entity| map.push_entity(entity))
            .collect();
        for (saved, id) in self.entities.iter().zip(&ids) {
            let focus = saved.focus.and_then(|index| ids.get(index).copied());
            if let (Some(focus), Some(entity)) = (focus, map.get_mut(*id)) {
                entity.focus = Some(focus);
            }
        }
        for id in ids {
            map.recompute_paths(id);
        }
        Ok(map)
    }
}

impl Map {
    pub fn save_state(&self) -> MapSnapshot {
        let order: Vec<EntityId> = self.entities().map(|(id, _)| id).collect();
        let entities = self
            .entities()
            .map(|(_, entity)| EntitySnapshot {
                focus: entity
                    .focus
                    .and_then(|focus| order.iter().position(|id| *id == focus)),
                ..EntitySnapshot::capture(entity)
            })
            .collect();
        MapSnapshot {
            width: self.width() as i32,
            height: self.height() as i32,
            start_y: self.start().y,
            start_x: self.start().x,
            camera_y: self.camera.y,
            camera_x: self.camera.x,
            floor: self.floor,
            seen_tiles: self.seen().to_rows(),
            map: self.draw_string(),
            entities,
            rng: self.dice().clone(),
        }
    }

    /// Replaces this floor with the snapshot's content, keeping the config.
    ///
    /// On error the floor is left untouched. Visibility starts empty.
    pub fn load_state(&mut self, snapshot: &MapSnapshot) -> Result<(), CorruptSave> {
        *self = snapshot.restore_with(self.config().clone())?;
        Ok(())
    }
}
