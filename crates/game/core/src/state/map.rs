//! One dungeon floor: terrain, visibility memory and the entity arena.

use super::{
    Direction, Entity, EntityId, EntityKind, Grid, Logs, Position, StateError, Tile,
};
use crate::codec::CorruptSave;
use crate::config::GameConfig;
use crate::env::Dice;
use crate::{path, vision};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// A single floor of the dungeon.
///
/// Entities live in a generational arena; `order` is the tick order and the
/// save order. Handles of removed entities stop resolving immediately.
#[derive(Clone, Debug)]
pub struct Map {
    /// Index of this floor in the dungeon, 0 at the top.
    pub floor: usize,
    start: Position,
    /// Viewport centre, follows the player.
    pub camera: Position,
    tiles: Grid<Tile>,
    visible: Grid<bool>,
    seen: Grid<bool>,
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<EntityId>,
    pub logs: Logs,
    dice: Dice,
    config: GameConfig,
}

impl Map {
    pub fn new(tiles: Grid<Tile>, start: Position) -> Self {
        let (height, width) = (tiles.height(), tiles.width());
        Self {
            floor: 0,
            start,
            camera: start,
            tiles,
            visible: Grid::new(height, width, false),
            seen: Grid::new(height, width, false),
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            logs: Logs::default(),
            dice: Dice::default(),
            config: GameConfig::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.dice = Dice::new(seed);
        self
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses the text map format.
    ///
    /// The first line holds `start_y start_x`, every following non-empty line
    /// is a row of glyphs. Short rows are padded with [`Tile::Empty`].
    pub fn from_text(text: &str) -> Result<Self, CorruptSave> {
        let mut lines = text.lines();
        let header = lines.next().unwrap_or_default();
        let mut coords = header.split_whitespace().map(str::parse::<i32>);
        let (Some(Ok(start_y)), Some(Ok(start_x)), None) =
            (coords.next(), coords.next(), coords.next())
        else {
            return Err(CorruptSave::Malformed {
                detail: format!("expected `start_y start_x` header, found {header:?}"),
            });
        };

        let raw: Vec<&str> = lines.filter(|line| !line.is_empty()).collect();
        let width = raw.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let mut rows = Vec::with_capacity(raw.len());
        for (row, line) in raw.iter().enumerate() {
            let mut cells = Vec::with_capacity(width);
            for (column, glyph) in line.chars().enumerate() {
                let tile = Tile::from_glyph(glyph)
                    .ok_or(CorruptSave::InvalidGlyph { glyph, row, column })?;
                cells.push(tile);
            }
            cells.resize(width, Tile::Empty);
            rows.push(cells);
        }

        let tiles = Grid::from_rows(rows).ok_or_else(|| CorruptSave::Malformed {
            detail: "ragged map rows".to_string(),
        })?;
        let start = Position::new(start_y, start_x);
        if !tiles.contains(start) {
            return Err(CorruptSave::OutOfBounds {
                what: "start".to_string(),
                y: start_y,
                x: start_x,
            });
        }
        Ok(Self::new(tiles, start))
    }

    /// Glyph rows joined by newlines, the inverse of the body of [`from_text`](Self::from_text).
    pub fn draw_string(&self) -> String {
        self.tiles
            .rows()
            .map(|row| row.iter().map(|tile| tile.glyph()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ===== terrain =====

    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    pub fn tile(&self, position: Position) -> Option<Tile> {
        self.tiles.get(position).copied()
    }

    pub fn set_tile(&mut self, position: Position, tile: Tile) -> Result<(), StateError> {
        if self.tiles.set(position, tile) {
            Ok(())
        } else {
            Err(StateError::PositionOutOfBounds {
                position,
                height: self.height(),
                width: self.width(),
            })
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn dice_mut(&mut self) -> &mut Dice {
        &mut self.dice
    }

    // ===== visibility =====

    pub fn visible(&self) -> &Grid<bool> {
        &self.visible
    }

    pub fn seen(&self) -> &Grid<bool> {
        &self.seen
    }

    pub(crate) fn restore_seen(&mut self, seen: Grid<bool>) {
        self.seen = seen;
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.visible.get(position).copied().unwrap_or(false)
    }

    pub fn is_seen(&self, position: Position) -> bool {
        self.seen.get(position).copied().unwrap_or(false)
    }

    /// Recomputes the visible set from `origin`; every visible cell becomes seen.
    pub fn compute_visibility(&mut self, origin: Position, max_range: i32) {
        self.visible.fill(false);
        vision::compute(&self.tiles, origin, max_range, &mut self.visible);
        for (position, visible) in self.visible.iter() {
            if *visible {
                self.seen.set(position, true);
            }
        }
    }

    /// Line-of-sight probe that leaves the map's own visibility untouched.
    pub fn is_visible_from(&self, from: Position, to: Position, max_range: i32) -> bool {
        let mut scratch = Grid::new(self.height(), self.width(), false);
        vision::compute(&self.tiles, from, max_range, &mut scratch);
        scratch.get(to).copied().unwrap_or(false)
    }

    // ===== entity arena =====

    fn allocate(&mut self, entity: Entity) -> EntityId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            return EntityId::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entity: Some(entity),
        });
        EntityId::new(index, 0)
    }

    /// Registers an entity. Familiars act right after the first entity.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let familiar = entity.is_familiar();
        let id = self.allocate(entity);
        if familiar && !self.order.is_empty() {
            self.order.insert(1, id);
        } else {
            self.order.push(id);
        }
        id
    }

    /// Appends without reordering; used when restoring a saved order.
    pub(crate) fn push_entity(&mut self, entity: Entity) -> EntityId {
        let id = self.allocate(entity);
        self.order.push(id);
        id
    }

    /// Unregisters an entity. Removing twice is a no-op.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.order.retain(|other| *other != id);
        Some(entity)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.slots.get(id.index as usize)?;
        (slot.generation == id.generation)
            .then_some(slot.entity.as_ref())
            .flatten()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_mut()
    }

    pub fn require(&self, id: EntityId) -> Result<&Entity, StateError> {
        self.get(id).ok_or(StateError::EntityNotFound(id))
    }

    pub fn require_mut(&mut self, id: EntityId) -> Result<&mut Entity, StateError> {
        self.get_mut(id).ok_or(StateError::EntityNotFound(id))
    }

    /// Two distinct entities borrowed mutably at once.
    pub fn pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        if a.index == b.index || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let (low, high) = (a.index.min(b.index) as usize, a.index.max(b.index) as usize);
        let (head, tail) = self.slots.split_at_mut(high);
        let first = head[low].entity.as_mut()?;
        let second = tail[0].entity.as_mut()?;
        if a.index < b.index {
            Some((first, second))
        } else {
            Some((second, first))
        }
    }

    /// Handles in tick order.
    pub fn entity_ids(&self) -> &[EntityId] {
        &self.order
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.order
            .iter()
            .filter_map(|id| self.get(*id).map(|entity| (*id, entity)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn find_entities(&self, kind: EntityKind) -> Vec<EntityId> {
        self.find_by(|entity| entity.kind == kind)
    }

    pub fn find_by(&self, mut predicate: impl FnMut(&Entity) -> bool) -> Vec<EntityId> {
        self.entities()
            .filter(|(_, entity)| predicate(entity))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn player(&self) -> Option<EntityId> {
        self.entities()
            .find(|(_, entity)| entity.kind == EntityKind::Player)
            .map(|(id, _)| id)
    }

    pub fn entities_at(&self, position: Position) -> Vec<EntityId> {
        self.find_by(|entity| entity.position == position)
    }

    pub fn entity_at(&self, position: Position) -> Option<EntityId> {
        self.entities()
            .find(|(_, entity)| entity.position == position)
            .map(|(id, _)| id)
    }

    /// In bounds, walkable and not occupied by any entity.
    pub fn is_free(&self, position: Position) -> bool {
        self.tile(position).is_some_and(Tile::can_walk) && self.entity_at(position).is_none()
    }

    /// Whether a friendly creature stands on `position`.
    pub fn entity_is_present(&self, position: Position) -> bool {
        self.entities()
            .any(|(_, entity)| entity.position == position && entity.is_friendly())
    }

    // ===== movement =====

    /// Places an entity and runs the movement hooks: tracked entities refresh
    /// their path table, the player also moves the camera and its field of view.
    pub fn move_entity(&mut self, id: EntityId, position: Position) -> Result<(), StateError> {
        let entity = self.require_mut(id)?;
        entity.position = position;
        let is_player = entity.kind == EntityKind::Player;
        let tracked = entity.is_tracked();
        if tracked {
            self.recompute_paths(id);
        }
        if is_player {
            self.camera = position;
            self.compute_visibility(position, self.config.vision_range);
        }
        Ok(())
    }

    /// Moves onto `target` only when it is free. Returns whether it moved.
    pub fn try_move_to(&mut self, id: EntityId, target: Position) -> bool {
        self.is_free(target) && self.move_entity(id, target).is_ok()
    }

    pub fn try_step(&mut self, id: EntityId, direction: Direction) -> bool {
        match self.get(id) {
            Some(entity) => {
                let target = entity.position.step(direction);
                self.try_move_to(id, target)
            }
            None => false,
        }
    }

    /// Rebuilds the path table of a tracked entity.
    pub fn recompute_paths(&mut self, id: EntityId) {
        let Some(origin) = self
            .get(id)
            .filter(|entity| entity.is_tracked())
            .map(|entity| entity.position)
        else {
            return;
        };
        let table = path::plan(self, origin, self.config.path_max_distance);
        if let Some(entity) = self.get_mut(id) {
            entity.paths = Some(table);
        }
    }

    /// Starts tracking an entity and computes its first table.
    pub fn track(&mut self, id: EntityId) {
        if let Some(entity) = self.get_mut(id) {
            if entity.paths.is_none() {
                entity.paths = Some(Default::default());
            }
        }
        self.recompute_paths(id);
    }
}
