use super::Position;

/// Dense row-major 2-D buffer addressed by [`Position`].
///
/// Out-of-bounds reads return `None` and out-of-bounds writes are ignored,
/// which lets the visibility and path code probe past the map edge freely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(height: usize, width: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Builds a grid from rows; `None` when rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> Grid<T> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, position: Position) -> Option<usize> {
        let y = usize::try_from(position.y).ok()?;
        let x = usize::try_from(position.x).ok()?;
        (y < self.height && x < self.width).then(|| y * self.width + x)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.offset(position).is_some()
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.offset(position).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.offset(position).map(|i| &mut self.cells[i])
    }

    /// Writes `value` at `position`; returns false when out of bounds.
    pub fn set(&mut self, position: Position, value: T) -> bool {
        match self.get_mut(position) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Every cell with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Position::new((i / width) as i32, (i % width) as i32), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(Grid::from_rows(vec![vec![1, 2], vec![3]]).is_none());
        let grid = Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(grid.get(Position::new(1, 0)), Some(&3));
        assert_eq!(grid.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn out_of_bounds_access_is_harmless() {
        let mut grid = Grid::new(2, 3, false);
        assert!(!grid.set(Position::new(-1, 0), true));
        assert!(!grid.set(Position::new(0, 3), true));
        assert_eq!(grid.get(Position::new(2, 0)), None);
        assert!(grid.iter().all(|(_, v)| !v));
        assert!(grid.set(Position::new(1, 2), true));
        assert_eq!(
            grid.iter().find(|(_, v)| **v).map(|(p, _)| p),
            Some(Position::new(1, 2))
        );
    }
}
