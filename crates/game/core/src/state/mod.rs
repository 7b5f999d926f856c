//! Authoritative simulation state.
//!
//! A [`Map`] owns one floor: terrain, visibility memory, the entity arena
//! and the message log. Everything else in the crate reads and mutates the
//! world through it.
mod error;
mod logs;
mod map;
pub mod types;

pub use error::StateError;
pub use logs::Logs;
pub use map::Map;
pub use types::{
    Direction, Effect, Entity, EntityId, EntityKind, EquipSlot, Fighter, Grid, Holder, ItemData,
    ItemPower, Position, Progression, RingBonus, Role, SWAPPED_STATS, Stat, Tile,
};
