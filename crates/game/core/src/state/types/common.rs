use std::fmt;

/// Handle to an entity slot inside a [`Map`](crate::state::Map) arena.
///
/// The generation changes whenever a slot is reused, so a handle kept after
/// its entity was removed never resolves to a newcomer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl EntityId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Discrete grid position, row first.
///
/// Ordering compares `y` then `x`, which is the row-major order used for
/// every deterministic tie-break on the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub y: i32,
    pub x: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { y: 0, x: 0 };

    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    /// Neighbouring cell one step towards `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dy, dx) = direction.delta();
        Self::new(self.y + dy, self.x + dx)
    }

    pub fn distance_squared(self, other: Self) -> i32 {
        let dy = self.y - other.y;
        let dx = self.x - other.x;
        dy * dy + dx * dx
    }

    pub fn manhattan(self, other: Self) -> i32 {
        (self.y - other.y).abs() + (self.x - other.x).abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

/// One of the four orthogonal moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(dy, dx)` offset, y grows downwards.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_order_row_major() {
        let mut cells = vec![Position::new(1, 0), Position::new(0, 2), Position::new(0, 1)];
        cells.sort();
        assert_eq!(
            cells,
            vec![Position::new(0, 1), Position::new(0, 2), Position::new(1, 0)]
        );
    }

    #[test]
    fn step_and_distances() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.step(Direction::Up), Position::new(2, 3));
        assert_eq!(origin.step(Direction::Right), Position::new(3, 4));
        assert_eq!(origin.distance_squared(Position::new(5, 4)), 5);
        assert_eq!(origin.manhattan(Position::new(5, 4)), 3);
    }
}
