/// Terrain of a single map cell.
///
/// Each tile has a one-character glyph used by the text map format and by
/// saved games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// Void outside of the dungeon.
    #[default]
    Empty,
    Wall,
    Floor,
    Ladder,
    /// Closed door; becomes floor once the player walks into it.
    Door,
}

impl Tile {
    pub const ALL: [Tile; 5] = [Tile::Empty, Tile::Wall, Tile::Floor, Tile::Ladder, Tile::Door];

    pub const fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Ladder => 'H',
            Tile::Door => '&',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.into_iter().find(|tile| tile.glyph() == glyph)
    }

    /// Whether the tile stops light. Walls and closed doors do.
    pub const fn is_wall(self) -> bool {
        matches!(self, Tile::Wall | Tile::Door)
    }

    pub const fn is_ladder(self) -> bool {
        matches!(self, Tile::Ladder)
    }

    pub const fn can_walk(self) -> bool {
        !self.is_wall() && !matches!(self, Tile::Empty)
    }
}
