//! Player action errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::StateError;

/// Reasons a player action could not be carried out.
///
/// A rejected action never advances time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// No player on the current floor.
    #[error("There is no player on this floor")]
    NoPlayer,

    /// Actor is dead (health is 0).
    #[error("Actor is dead")]
    ActorDead,

    #[error("No item at inventory slot {index} (inventory holds {len})")]
    InventoryIndex { index: usize, len: usize },

    #[error("Not enough hazel: costs {price}, purse holds {hazel}")]
    NotEnoughHazel { price: i32, hazel: i32 },

    /// Launch without an equipped long-range weapon.
    #[error("No long-range weapon equipped")]
    NoRangedWeapon,

    /// The action needs another creature and none qualifies.
    #[error("No valid target")]
    NoTarget,

    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            NoPlayer | ActorDead | NotEnoughHazel { .. } | NoRangedWeapon | NoTarget => {
                ErrorSeverity::Recoverable
            }
            InventoryIndex { .. } => ErrorSeverity::Validation,
            State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            NoPlayer => "ACTION_NO_PLAYER",
            ActorDead => "ACTION_ACTOR_DEAD",
            InventoryIndex { .. } => "ACTION_INVENTORY_INDEX",
            NotEnoughHazel { .. } => "ACTION_NOT_ENOUGH_HAZEL",
            NoRangedWeapon => "ACTION_NO_RANGED_WEAPON",
            NoTarget => "ACTION_NO_TARGET",
            State(error) => error.error_code(),
        }
    }
}
