//! Field of view by recursive shadow casting.
//!
//! The area around the viewer is split into eight octants, each scanned
//! column by column while a `[bottom, top]` slope window narrows around
//! opaque cells. Walls and closed doors are always lit when the window
//! reaches them; cells past the map edge count as transparent and are
//! simply never marked. Range is Manhattan: a cell at local `(y, x)` is
//! considered only while `x + y <= max_range`.

mod octant;
mod slope;

pub use octant::Octant;
pub use slope::Slope;

use crate::state::{Grid, Position, Tile};

/// Marks every cell visible from `origin` in `visible`. Cells are only ever
/// set, never cleared.
pub fn compute(tiles: &Grid<Tile>, origin: Position, max_range: i32, visible: &mut Grid<bool>) {
    visible.set(origin, true);
    let mut caster = ShadowCaster {
        tiles,
        visible,
        origin,
        max_range,
    };
    for octant in Octant::all() {
        caster.cast(octant, 1, Slope::new(1, 1), Slope::new(0, 1));
    }
}

struct ShadowCaster<'a> {
    tiles: &'a Grid<Tile>,
    visible: &'a mut Grid<bool>,
    origin: Position,
    max_range: i32,
}

impl ShadowCaster<'_> {
    fn blocks_light(&self, octant: Octant, y: i32, x: i32) -> bool {
        self.tiles
            .get(octant.transform(self.origin, y, x))
            .is_some_and(|tile| tile.is_wall())
    }

    fn reveal(&mut self, octant: Octant, y: i32, x: i32) {
        self.visible.set(octant.transform(self.origin, y, x), true);
    }

    /// Highest row of column `x` touched by the top slope.
    fn top_row(&self, octant: Octant, x: i32, top: Slope) -> i32 {
        if top.x == 1 {
            return x;
        }
        let mut top_y = ((x * 2 - 1) * top.y + top.x) / (top.x * 2);
        if self.blocks_light(octant, top_y, x) {
            if top >= Slope::new(top_y * 2 + 1, x * 2) && !self.blocks_light(octant, top_y + 1, x)
            {
                top_y += 1;
            }
        } else {
            let mut ax = x * 2;
            if self.blocks_light(octant, top_y + 1, x + 1) {
                ax += 1;
            }
            if top > Slope::new(top_y * 2 + 1, ax) {
                top_y += 1;
            }
        }
        top_y
    }

    /// Lowest row of column `x` touched by the bottom slope.
    fn bottom_row(&self, octant: Octant, x: i32, bottom: Slope) -> i32 {
        if bottom.y == 0 {
            return 0;
        }
        let mut bottom_y = ((x * 2 - 1) * bottom.y + bottom.x) / (bottom.x * 2);
        if bottom >= Slope::new(bottom_y * 2 + 1, x * 2)
            && self.blocks_light(octant, bottom_y, x)
            && !self.blocks_light(octant, bottom_y + 1, x)
        {
            bottom_y += 1;
        }
        bottom_y
    }

    fn cast(&mut self, octant: Octant, distance: i32, mut top: Slope, mut bottom: Slope) {
        for x in distance..=self.max_range {
            let top_y = self.top_row(octant, x, top);
            let bottom_y = self.bottom_row(octant, x, bottom);
            // None until the first in-range cell of the column.
            let mut was_opaque: Option<bool> = None;

            for y in (bottom_y..=top_y).rev() {
                if x + y > self.max_range {
                    continue;
                }
                let opaque = self.blocks_light(octant, y, x);
                let lit = opaque
                    || ((y != top_y || top >= Slope::new(y, x))
                        && (y != bottom_y || bottom <= Slope::new(y, x)));
                if lit {
                    self.reveal(octant, y, x);
                }
                if x == self.max_range {
                    continue;
                }

                if opaque && was_opaque == Some(false) {
                    let mut nx = x * 2;
                    if self.blocks_light(octant, y + 1, x) {
                        nx -= 1;
                    }
                    let edge = Slope::new(y * 2 + 1, nx);
                    if top > edge {
                        if y == bottom_y {
                            bottom = edge;
                            break;
                        }
                        self.cast(octant, x + 1, top, edge);
                    } else if y == bottom_y {
                        return;
                    }
                } else if !opaque && was_opaque == Some(true) {
                    let mut nx = x * 2;
                    if self.blocks_light(octant, y + 1, x + 1) {
                        nx += 1;
                    }
                    let edge = Slope::new(y * 2 + 1, nx);
                    if bottom >= edge {
                        return;
                    }
                    top = edge;
                }
                was_opaque = Some(opaque);
            }

            if was_opaque != Some(false) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(height: usize, width: usize) -> Grid<Tile> {
        Grid::new(height, width, Tile::Floor)
    }

    fn visible_from(tiles: &Grid<Tile>, origin: Position, range: i32) -> Grid<bool> {
        let mut visible = Grid::new(tiles.height(), tiles.width(), false);
        compute(tiles, origin, range, &mut visible);
        visible
    }

    #[test]
    fn open_room_is_fully_visible() {
        let tiles = floor(5, 5);
        let visible = visible_from(&tiles, Position::new(2, 2), 5);
        assert!(visible.iter().all(|(_, v)| *v));
    }

    #[test]
    fn wall_casts_a_shadow() {
        let mut tiles = floor(5, 5);
        tiles.set(Position::new(2, 3), Tile::Wall);
        let visible = visible_from(&tiles, Position::new(2, 2), 5);
        assert!(visible.get(Position::new(2, 3)).copied().unwrap());
        assert!(!visible.get(Position::new(2, 4)).copied().unwrap());
        assert!(visible.get(Position::new(1, 4)).copied().unwrap());
    }

    #[test]
    fn range_is_manhattan() {
        let tiles = floor(9, 9);
        let visible = visible_from(&tiles, Position::new(4, 4), 2);
        for (position, lit) in visible.iter() {
            assert_eq!(*lit, position.manhattan(Position::new(4, 4)) <= 2, "{position}");
        }
    }

    #[test]
    fn origin_in_a_closet_sees_only_its_walls() {
        let mut tiles = Grid::new(5, 5, Tile::Floor);
        for (position, _) in floor(5, 5).iter() {
            let centre = Position::new(2, 2);
            if position.manhattan(centre) == 1 || position.distance_squared(centre) == 2 {
                tiles.set(position, Tile::Wall);
            }
        }
        let visible = visible_from(&tiles, Position::new(2, 2), 5);
        let lit: Vec<Position> = visible.iter().filter(|(_, v)| **v).map(|(p, _)| p).collect();
        assert_eq!(lit.len(), 9);
    }
}
