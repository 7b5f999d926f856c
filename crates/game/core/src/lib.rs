//! Deterministic rules of a turn-based dungeon crawl.
//!
//! `dungeon-core` owns the floor model ([`Map`]), field of view
//! ([`vision`]), follower pathing ([`path`]), combat and stats, the per-tick
//! creature behaviour and the save codec. Front-ends feed it
//! [`PlayerAction`]s through a [`Dungeon`] and read the resulting state.
pub mod action;
pub mod codec;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod path;
pub mod state;
pub mod stats;
pub mod vision;

pub use action::{ActionError, Interaction, PlayerAction};
pub use codec::{CorruptSave, EntitySnapshot, MapSnapshot};
pub use config::GameConfig;
pub use engine::{Dungeon, DungeonSnapshot, FloorGenerator, LoadOutcome, TurnReport};
pub use env::{Dice, PcgRng, RngOracle};
pub use error::{ErrorSeverity, GameError};
pub use path::PathTable;
pub use state::{
    Direction, Entity, EntityId, EntityKind, Fighter, Grid, Logs, Map, Position, Role, Stat,
    StateError, Tile,
};
