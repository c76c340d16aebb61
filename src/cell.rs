use core::fmt;
use grid_util::point::Point;

/// Identity of a grid cell. Ordered lexicographically by `(row, column)`, which is also the
/// order used to break ties on the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub const fn new(row: usize, column: usize) -> Cell {
        Cell { row, column }
    }

    /// Straight-line distance in grid units.
    pub fn euclidean_distance(&self, other: &Cell) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.column as f64 - other.column as f64;
        dr.hypot(dc)
    }

    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Converts to an x/y [Point] where x is the column and y the row. Returns [None] if a
    /// coordinate does not fit in an [i32].
    pub fn to_point(self) -> Option<Point> {
        let x = i32::try_from(self.column).ok()?;
        let y = i32::try_from(self.row).ok()?;
        Some(Point::new(x, y))
    }

    /// Inverse of [to_point](Self::to_point); [None] for negative coordinates.
    pub fn from_point(point: Point) -> Option<Cell> {
        let column = usize::try_from(point.x).ok()?;
        let row = usize::try_from(point.y).ok()?;
        Some(Cell { row, column })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, column): (usize, usize)) -> Cell {
        Cell { row, column }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Flat index of a vertex in the grid arena (`row * columns + column`). Neighbour references and
/// back-pointers are stored as these indices rather than references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_row_major() {
        assert!(Cell::new(0, 5) < Cell::new(1, 0));
        assert!(Cell::new(1, 0) < Cell::new(1, 1));
    }

    #[test]
    fn distances() {
        let a = Cell::new(0, 0);
        let b = Cell::new(3, 4);
        assert_eq!(a.euclidean_distance(&b), 5.0);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
    }

    #[test]
    fn point_conversion_swaps_axes() {
        let cell = Cell::new(2, 7);
        let point = cell.to_point().unwrap();
        assert_eq!((point.x, point.y), (7, 2));
        assert_eq!(Cell::from_point(point), Some(cell));
        assert_eq!(Cell::from_point(Point::new(-1, 0)), None);
    }
}
