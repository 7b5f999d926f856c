//! State management errors.
//!
//! Errors raised when a caller addresses something the map does not hold.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Handle is stale or was never issued by this map.
    #[error("Entity {0} is not on this map")]
    EntityNotFound(EntityId),

    /// Entity exists but lacks the capability the operation needs.
    #[error("Entity {id} has no {capability} capability")]
    MissingCapability {
        id: EntityId,
        capability: &'static str,
    },

    /// Position is outside the map bounds.
    #[error("Position {position} is out of bounds (map size: {height}x{width})")]
    PositionOutOfBounds {
        position: Position,
        height: usize,
        width: usize,
    },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            // Stale handles are caller bugs
            EntityNotFound(_) | MissingCapability { .. } => ErrorSeverity::Internal,
            PositionOutOfBounds { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            EntityNotFound(_) => "STATE_ENTITY_NOT_FOUND",
            MissingCapability { .. } => "STATE_MISSING_CAPABILITY",
            PositionOutOfBounds { .. } => "STATE_POSITION_OUT_OF_BOUNDS",
        }
    }
}
