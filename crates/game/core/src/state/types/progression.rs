/// Experience track of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    pub current_xp: i32,
    pub max_xp: i32,
    /// Percentage applied to every experience gain.
    pub xp_percent: i32,
}

impl Progression {
    pub fn new(max_xp: i32) -> Self {
        Self {
            current_xp: 0,
            max_xp,
            xp_percent: 100,
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(10)
    }
}
