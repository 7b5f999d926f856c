//! Save-file validation errors.

use crate::error::{ErrorSeverity, GameError};

/// A snapshot or text map that cannot be turned back into a floor.
///
/// Loading is all-or-nothing: when any of these is raised, nothing was
/// modified.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CorruptSave {
    /// Not decodable at all (bad JSON or bytes, bad header).
    #[error("Malformed save: {detail}")]
    Malformed { detail: String },

    #[error("Unknown entity type {kind:?}")]
    UnknownKind { kind: String },

    #[error("Invalid map glyph {glyph:?} at row {row}, column {column}")]
    InvalidGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },

    /// A capability block required by the entity's kind is absent.
    #[error("Entity {kind} is missing its {field} block")]
    MissingField { kind: String, field: &'static str },

    /// A field is present but does not fit the entity's kind.
    #[error("Entity {kind} has an invalid {field}")]
    InvalidField { kind: String, field: &'static str },

    #[error("{field}: expected {expected}, found {found}")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{what} at ({y}, {x}) lies outside the map")]
    OutOfBounds { what: String, y: i32, x: i32 },
}

impl GameError for CorruptSave {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use CorruptSave::*;
        match self {
            Malformed { .. } => "SAVE_MALFORMED",
            UnknownKind { .. } => "SAVE_UNKNOWN_KIND",
            InvalidGlyph { .. } => "SAVE_INVALID_GLYPH",
            MissingField { .. } => "SAVE_MISSING_FIELD",
            InvalidField { .. } => "SAVE_INVALID_FIELD",
            DimensionMismatch { .. } => "SAVE_DIMENSION_MISMATCH",
            OutOfBounds { .. } => "SAVE_OUT_OF_BOUNDS",
        }
    }
}
