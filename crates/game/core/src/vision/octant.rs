use crate::state::Position;

/// One of the eight 45° wedges around the viewer.
///
/// Inside an octant, `x` is the distance from the viewer along the primary
/// axis and `y` the offset along the secondary axis, `0 <= y <= x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Octant(u8);

impl Octant {
    pub fn all() -> impl Iterator<Item = Octant> {
        (0..8).map(Octant)
    }

    /// Map coordinates of the local cell `(y, x)` seen from `origin`.
    pub fn transform(self, origin: Position, y: i32, x: i32) -> Position {
        let (oy, ox) = (origin.y, origin.x);
        match self.0 {
            0 => Position::new(oy - y, ox + x),
            1 => Position::new(oy - x, ox + y),
            2 => Position::new(oy - x, ox - y),
            3 => Position::new(oy - y, ox - x),
            4 => Position::new(oy + y, ox - x),
            5 => Position::new(oy + x, ox - y),
            6 => Position::new(oy + x, ox + y),
            _ => Position::new(oy + y, ox + x),
        }
    }
}
