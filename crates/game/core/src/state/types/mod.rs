pub mod common;
pub mod entity;
pub mod fighter;
pub mod grid;
pub mod inventory;
pub mod kind;
pub mod progression;
pub mod tile;

pub use common::{Direction, EntityId, Position};
pub use entity::Entity;
pub use fighter::{Effect, Fighter, SWAPPED_STATS, Stat};
pub use grid::Grid;
pub use inventory::{EquipSlot, Holder, ItemData, ItemPower, RingBonus};
pub use kind::{EntityKind, Role};
pub use progression::Progression;
pub use tile::Tile;
