//! Persistence codec.
//!
//! [`Map::save_state`](crate::state::Map::save_state) captures a floor as a
//! [`MapSnapshot`]; [`MapSnapshot::restore`] validates one completely before
//! building anything. The helpers below put snapshots on the wire as JSON
//! (human-editable saves) or bincode (compact saves).

mod error;
mod snapshot;

pub use error::CorruptSave;
pub use snapshot::{EntitySnapshot, HolderSnapshot, MapSnapshot};

#[cfg(feature = "serde")]
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CorruptSave> {
    serde_json::to_string_pretty(value).map_err(|e| CorruptSave::Malformed {
        detail: e.to_string(),
    })
}

#[cfg(feature = "serde")]
pub fn from_json<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, CorruptSave> {
    serde_json::from_str(text).map_err(|e| CorruptSave::Malformed {
        detail: format!("invalid JSON: {e}"),
    })
}

#[cfg(feature = "serde")]
pub fn to_bytes<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, CorruptSave> {
    bincode::serialize(value).map_err(|e| CorruptSave::Malformed {
        detail: e.to_string(),
    })
}

#[cfg(feature = "serde")]
pub fn from_bytes<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, CorruptSave> {
    bincode::deserialize(bytes).map_err(|e| CorruptSave::Malformed {
        detail: format!("invalid bytes: {e}"),
    })
}
