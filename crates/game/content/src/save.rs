//! JSON save files for a whole dungeon.

use std::fs;
use std::path::Path;

use dungeon_core::codec;
use dungeon_core::{CorruptSave, Dungeon, DungeonSnapshot, ErrorSeverity, GameError, LoadOutcome};

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Corrupt(#[from] CorruptSave),
}

impl GameError for SaveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SaveError::Io(_) => ErrorSeverity::Recoverable,
            SaveError::Corrupt(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SaveError::Io(_) => "SAVE_IO",
            SaveError::Corrupt(inner) => inner.error_code(),
        }
    }
}

/// Reads and writes [`DungeonSnapshot`]s as pretty-printed JSON.
///
/// Writes go to a sibling temp file first and are renamed over the target,
/// so an interrupted write never leaves half a save behind.
pub struct SaveFile;

impl SaveFile {
    pub fn write(path: &Path, snapshot: &DungeonSnapshot) -> Result<(), SaveError> {
        let text = codec::to_json(snapshot)?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, text)?;
        fs::rename(&temp_path, path)?;
        tracing::debug!(
            target: "dungeon::content",
            path = %path.display(),
            floors = snapshot.floors.len(),
            "game saved"
        );
        Ok(())
    }

    pub fn read(path: &Path) -> Result<DungeonSnapshot, SaveError> {
        let text = fs::read_to_string(path)?;
        let snapshot = codec::from_json(&text)?;
        tracing::debug!(target: "dungeon::content", path = %path.display(), "save read");
        Ok(snapshot)
    }

    pub fn save(path: &Path, dungeon: &Dungeon) -> Result<(), SaveError> {
        Self::write(path, &dungeon.save_state())
    }

    /// Reads `path` into `dungeon`. On error the dungeon is unchanged.
    pub fn load(path: &Path, dungeon: &mut Dungeon) -> Result<LoadOutcome, SaveError> {
        let snapshot = Self::read(path)?;
        let outcome = dungeon.load_state(&snapshot)?;
        if let LoadOutcome::NoPlayer { message } = &outcome {
            tracing::warn!(target: "dungeon::content", path = %path.display(), "{message}");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::{Direction, GameConfig, Map, PlayerAction};
    use tempfile::TempDir;

    const FLOOR: &str = "1 1\n######\n#....#\n#..H.#\n######\n";

    fn setup() -> (TempDir, Dungeon) {
        let temp_dir = TempDir::new().unwrap();
        let map = Map::from_text(FLOOR).unwrap().with_seed(21);
        let mut dungeon = Dungeon::new(map, GameConfig::default());
        dungeon.spawn_player().unwrap();
        (temp_dir, dungeon)
    }

    #[test]
    fn save_then_load_restores_the_game() {
        let (temp, mut dungeon) = setup();
        dungeon.perform(PlayerAction::Move(Direction::Right)).unwrap();
        let path = temp.path().join("game.json");
        SaveFile::save(&path, &dungeon).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let mut restored = Dungeon::new(Map::from_text(FLOOR).unwrap(), GameConfig::default());
        let outcome = SaveFile::load(&path, &mut restored).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(restored.save_state(), dungeon.save_state());
        assert_eq!(restored.player().unwrap().position, dungeon.player().unwrap().position);
    }

    #[test]
    fn overwriting_replaces_the_previous_save() {
        let (temp, mut dungeon) = setup();
        let path = temp.path().join("game.json");
        SaveFile::save(&path, &dungeon).unwrap();
        dungeon.perform(PlayerAction::Move(Direction::Down)).unwrap();
        SaveFile::save(&path, &dungeon).unwrap();

        assert_eq!(SaveFile::read(&path).unwrap(), dungeon.save_state());
    }

    #[test]
    fn missing_files_are_io_errors() {
        let temp = TempDir::new().unwrap();
        let error = SaveFile::read(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(error, SaveError::Io(_)));
        assert!(error.severity().is_recoverable());
    }

    #[test]
    fn corrupt_files_leave_the_game_running() {
        let (temp, mut dungeon) = setup();
        let before = dungeon.save_state();

        let path = temp.path().join("garbage.json");
        fs::write(&path, "{ \"floors\": 3 }").unwrap();
        let error = SaveFile::load(&path, &mut dungeon).unwrap_err();
        assert_eq!(error.error_code(), "SAVE_MALFORMED");

        let mut snapshot = before.clone();
        snapshot.floors[0].entities[0].kind = "Wizard".to_string();
        let text = codec::to_json(&snapshot).unwrap();
        fs::write(&path, text).unwrap();
        let error = SaveFile::load(&path, &mut dungeon).unwrap_err();
        assert_eq!(error.error_code(), "SAVE_UNKNOWN_KIND");

        assert_eq!(dungeon.save_state(), before);
    }
}
