/// Game configuration constants and tunable parameters.
///
/// Every field has a default, so partial TOML files only override what they name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Range of the player's visibility recompute after every move.
    pub vision_range: i32,
    /// Hop cap of every path table expansion.
    pub path_max_distance: i32,
    /// Squared distance within which a monster notices the player.
    pub monster_sight_sq: i32,
    /// Range of the line-of-sight probe a monster runs before chasing.
    pub monster_vision_range: i32,
    /// Squared distance within which a familiar picks a monster to fight.
    pub familiar_sight_sq: i32,
    /// How many random directions a wandering creature tries.
    pub wander_attempts: u32,
    /// Squared distance reached by a successful dance.
    pub dance_radius_sq: i32,
    /// Duration of the confusion a dance inflicts.
    pub confusion_ticks: i32,
    /// Turns an armed bomb waits before exploding.
    pub bomb_fuse: i32,
    /// Manhattan radius of a bomb explosion.
    pub bomb_radius: i32,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const CRITICAL_MULTIPLIER: i32 = 4;
    pub const D100: u32 = 100;
    /// Experience granted for a kill, inclusive bounds.
    pub const KILL_XP: (i32, i32) = (3, 7);
    pub const SCROLL_RADIUS_SQ: i32 = 25;
    pub const WEAKENING_TICKS: i32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VISION_RANGE: i32 = 5;
    pub const DEFAULT_PATH_MAX_DISTANCE: i32 = 12;

    pub fn new() -> Self {
        Self {
            vision_range: Self::DEFAULT_VISION_RANGE,
            path_max_distance: Self::DEFAULT_PATH_MAX_DISTANCE,
            monster_sight_sq: 25,
            monster_vision_range: 5,
            familiar_sight_sq: 9,
            wander_attempts: 100,
            dance_radius_sq: 9,
            confusion_ticks: 3,
            bomb_fuse: 4,
            bomb_radius: 3,
        }
    }

    pub fn with_vision_range(mut self, vision_range: i32) -> Self {
        self.vision_range = vision_range;
        self
    }

    pub fn with_path_max_distance(mut self, path_max_distance: i32) -> Self {
        self.path_max_distance = path_max_distance;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
