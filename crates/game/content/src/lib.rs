//! File-backed content for the dungeon.
//!
//! - text map files and TOML configuration (`loaders`)
//! - RON placement files that populate a floor (`loaders::scenario`)
//! - JSON save files for a whole [`Dungeon`](dungeon_core::Dungeon) (`save`)
//!
//! The core never touches the file system; everything that does lives here.

#[cfg(feature = "loaders")]
pub mod loaders;
pub mod save;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, MapLoader, Placement, ScenarioLoader};
pub use save::{SaveError, SaveFile};
