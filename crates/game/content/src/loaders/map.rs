//! Text map loader.
//!
//! A map file starts with a `start_y start_x` line followed by one glyph row
//! per line. Entities are placed separately through scenario files.

use std::path::Path;

use dungeon_core::Map;

use crate::loaders::{LoadResult, read_file};

pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<Map> {
        let content = read_file(path)?;
        let map = Map::from_text(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map {}: {}", path.display(), e))?;
        tracing::debug!(
            target: "dungeon::content",
            path = %path.display(),
            height = map.height(),
            width = map.width(),
            "map loaded"
        );
        Ok(map)
    }
}
