//! Player actions.
//!
//! Each action is a plain function over a [`Map`](crate::state::Map) and the
//! acting entity's handle. [`Dungeon::perform`](crate::engine::Dungeon::perform)
//! dispatches [`PlayerAction`]s to them and decides how many ticks follow.
//!
//! # Module Structure
//!
//! - `movement`: walking, bump attacks, doors, pick-ups
//! - `inventory`: equip, use, drop, launch
//! - `interact`: dance and talking to friendly creatures
//! - `trade`: moving items between holders, paid or free

mod error;
pub mod interact;
pub mod inventory;
pub mod movement;
pub mod trade;

pub use error::ActionError;
pub use interact::{dance, interact};
pub use inventory::{drop_item, equip, launch, use_item};
pub use movement::move_player;
pub use trade::{buy, give_to_chest, sell, take_from_chest};

use crate::state::{Direction, EntityId, EntityKind};

/// Closed set of inputs the core accepts from a front-end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    Move(Direction),
    Wait,
    Dance,
    Launch(Direction),
    Interact(Direction),
    ClimbLadder,
    UseItem(usize),
    /// Toggles: equips an unequipped item, unequips an equipped one.
    EquipItem(usize),
    DropItem(usize),
}

/// Result of talking to a friendly creature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    Dialogue { speaker: EntityKind, line: String },
    /// The merchant's inventory is open for [`buy`] and [`sell`].
    Store { merchant: EntityId },
    /// The chest's content is open for [`take_from_chest`] and [`give_to_chest`].
    Chest { chest: EntityId },
}
