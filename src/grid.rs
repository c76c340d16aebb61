use crate::cell::{Cell, VertexId};
use crate::error::{EndpointIssue, GridError, Result};
use crate::vertex::{Direction, Status, Vertex};
use core::fmt;
use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [Grid] owns every [Vertex] in a flat row-major arena. Obstacles are plain flags on the
/// vertices; the adjacency lists derived from them are only refreshed by
/// [recompute_adjacency](Self::recompute_adjacency), which also regenerates the connected
/// components kept in a [UnionFind] for cheap reachability queries.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    columns: usize,
    vertices: Vec<Vertex>,
    components: UnionFind<usize>,
    pub adjacency_dirty: bool,
}

impl Grid {
    /// Allocates a `rows` x `columns` grid of free vertices with infinite costs. Adjacency is
    /// computed immediately, so a freshly built grid is ready to search. Only the vertex arena
    /// is reserved fallibly; the [UnionFind] cannot report allocation failure.
    pub fn build(rows: usize, columns: usize) -> Result<Grid> {
        let n = rows
            .checked_mul(columns)
            .ok_or(GridError::AllocationFailure { vertices: usize::MAX })?;
        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(n)
            .map_err(|_| GridError::AllocationFailure { vertices: n })?;
        vertices.extend(iproduct!(0..rows, 0..columns).map(|(r, c)| Vertex::new(Cell::new(r, c))));
        let mut grid = Grid {
            rows,
            columns,
            vertices,
            components: UnionFind::new(n),
            adjacency_dirty: true,
        };
        grid.recompute_adjacency();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn columns(&self) -> usize {
        self.columns
    }
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn in_bounds(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns
    }

    /// Arena index of a cell, [None] if out of bounds.
    pub fn id(&self, cell: Cell) -> Option<VertexId> {
        self.in_bounds(cell.row, cell.column)
            .then(|| VertexId(cell.row * self.columns + cell.column))
    }

    pub fn cell(&self, id: VertexId) -> Cell {
        self.vertices[id.0].cell()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.0]
    }

    pub fn vertex_at(&self, cell: Cell) -> Option<&Vertex> {
        self.id(cell).map(|id| self.vertex(id))
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Maps an x/y point (x is the column, y the row) to the cell it falls on.
    pub fn cell_at_point(&self, point: Point) -> Option<Cell> {
        Cell::from_point(point).filter(|c| self.in_bounds(c.row, c.column))
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.vertex_at(cell).is_some_and(Vertex::is_blocked)
    }

    /// Marks or clears an obstacle. Out-of-bounds cells are ignored. Adjacency is stale until
    /// the next [recompute_adjacency](Self::recompute_adjacency) or [update](Self::update).
    pub fn set_blocked(&mut self, row: usize, column: usize, blocked: bool) {
        if let Some(id) = self.id(Cell::new(row, column)) {
            let vertex = self.vertex_mut(id);
            if vertex.blocked != blocked {
                vertex.blocked = blocked;
                self.adjacency_dirty = true;
            }
        }
    }

    /// Recomputes adjacency (and components) only if obstacles changed since the last time.
    pub fn update(&mut self) {
        if self.adjacency_dirty {
            self.recompute_adjacency();
        }
    }

    /// Rebuilds every vertex's neighbour list from the current obstacles: a neighbour is linked
    /// iff it is in bounds and free. Blocked vertices get no list at all.
    pub fn recompute_adjacency(&mut self) {
        for ix in 0..self.vertices.len() {
            let neighbours = if self.vertices[ix].blocked {
                None
            } else {
                let cell = self.vertices[ix].cell();
                Some(Direction::ALL.map(|dir| {
                    self.step(cell, dir)
                        .filter(|&n| !self.vertices[n.0].blocked)
                }))
            };
            self.vertices[ix].neighbours = neighbours;
        }
        self.adjacency_dirty = false;
        self.generate_components();
    }

    /// The cell one move away in `dir`, if it is inside the grid.
    fn step(&self, cell: Cell, dir: Direction) -> Option<VertexId> {
        let (dr, dc) = dir.delta();
        let row = cell.row.checked_add_signed(dr)?;
        let column = cell.column.checked_add_signed(dc)?;
        self.id(Cell::new(row, column))
    }

    /// Live neighbours of a vertex in up, left, right, down order.
    pub fn neighbors_of(&self, id: VertexId) -> SmallVec<[VertexId; 4]> {
        self.vertices[id.0]
            .neighbours
            .iter()
            .flatten()
            .flatten()
            .copied()
            .collect()
    }

    /// Clears costs, back-pointers and status of every vertex. Obstacles are kept.
    pub fn reset_search_state(&mut self) {
        for vertex in &mut self.vertices {
            vertex.reset();
        }
    }

    pub(crate) fn set_status(&mut self, id: VertexId, status: Status) {
        self.vertices[id.0].status = status;
    }

    /// Validates a start or goal cell.
    pub fn check_endpoint(&self, cell: Cell) -> Result<VertexId> {
        let id = self.id(cell).ok_or(GridError::InvalidEndpoint {
            cell,
            reason: EndpointIssue::OutOfBounds,
        })?;
        if self.vertex(id).blocked {
            return Err(GridError::InvalidEndpoint {
                cell,
                reason: EndpointIssue::Blocked,
            });
        }
        Ok(id)
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn component(&self, cell: Cell) -> Option<usize> {
        self.id(cell).map(|id| self.components.find(id.0))
    }

    /// Checks if two free cells are on the same connected component. Reflects the obstacles as
    /// of the last adjacency computation.
    pub fn reachable(&self, a: Cell, b: Cell) -> bool {
        match (self.check_endpoint(a), self.check_endpoint(b)) {
            (Ok(a_ix), Ok(b_ix)) => self.components.equiv(a_ix.0, b_ix.0),
            _ => false,
        }
    }

    /// Generates a new [UnionFind] structure and links up each free vertex with its right and
    /// down neighbours.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.vertices.len());
        for (ix, vertex) in self.vertices.iter().enumerate() {
            if let Some(neighbours) = vertex.neighbours {
                for n in [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter_map(|dir| neighbours[dir as usize])
                {
                    self.components.union(ix, n.0);
                }
            }
        }
        let n_components = (0..self.vertices.len())
            .filter(|&ix| !self.vertices[ix].blocked)
            .map(|ix| self.components.find(ix))
            .unique()
            .count();
        info!(
            "Generated {} connected components on a {}x{} grid",
            n_components, self.rows, self.columns
        );
        debug!("{} blocked cells", self.vertices.iter().filter(|v| v.blocked).count());
    }

    fn symbol(vertex: &Vertex) -> char {
        if vertex.blocked {
            '#'
        } else {
            vertex.status().symbol()
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.vertices.chunks(self.columns.max(1)) {
            writeln!(f, "{}", row.iter().map(Grid::symbol).join(""))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(grid: &Grid, ids: &[VertexId]) -> Vec<Cell> {
        ids.iter().map(|&id| grid.cell(id)).collect()
    }

    #[test]
    fn build_allocates_free_vertices() {
        let grid = Grid::build(2, 3).unwrap();
        assert_eq!(grid.len(), 6);
        assert!(grid.vertices().all(|v| !v.is_blocked() && !v.is_reached()));
        assert_eq!(grid.cell(VertexId(4)), Cell::new(1, 1));
    }

    #[test]
    fn oversized_grid_reports_allocation_failure() {
        let err = Grid::build(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, GridError::AllocationFailure { .. }));
    }

    /// Neighbours are listed up, left, right, down.
    #[test]
    fn neighbour_order() {
        let grid = Grid::build(3, 3).unwrap();
        let centre = grid.id(Cell::new(1, 1)).unwrap();
        assert_eq!(
            cells(&grid, &grid.neighbors_of(centre)),
            vec![
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 2),
                Cell::new(2, 1)
            ]
        );
        let corner = grid.id(Cell::new(0, 0)).unwrap();
        assert_eq!(
            cells(&grid, &grid.neighbors_of(corner)),
            vec![Cell::new(0, 1), Cell::new(1, 0)]
        );
    }

    #[test]
    fn blocked_cells_are_unlinked() {
        // |.#.|
        // |...|
        let mut grid = Grid::build(2, 3).unwrap();
        grid.set_blocked(0, 1, true);
        grid.set_blocked(7, 7, true);
        assert!(grid.adjacency_dirty);
        grid.recompute_adjacency();
        let blocked = grid.id(Cell::new(0, 1)).unwrap();
        assert!(grid.neighbors_of(blocked).is_empty());
        let left = grid.id(Cell::new(0, 0)).unwrap();
        assert_eq!(cells(&grid, &grid.neighbors_of(left)), vec![Cell::new(1, 0)]);
        let below = grid.id(Cell::new(1, 1)).unwrap();
        assert_eq!(grid.neighbors_of(below).len(), 2);
    }

    #[test]
    fn reset_keeps_obstacles() {
        let mut grid = Grid::build(2, 2).unwrap();
        grid.set_blocked(1, 1, true);
        grid.update();
        let id = grid.id(Cell::new(0, 0)).unwrap();
        {
            let v = grid.vertex_mut(id);
            v.g_cost = 3;
            v.from = Some(VertexId(1));
            v.status = Status::Closed;
        }
        grid.reset_search_state();
        let v = grid.vertex(id);
        assert!(!v.is_reached());
        assert_eq!(v.from(), None);
        assert_eq!(v.status(), Status::Unvisited);
        assert!(grid.is_blocked(Cell::new(1, 1)));
    }

    #[test]
    fn endpoint_validation() {
        let mut grid = Grid::build(2, 2).unwrap();
        grid.set_blocked(0, 1, true);
        assert!(grid.check_endpoint(Cell::new(0, 0)).is_ok());
        assert_eq!(
            grid.check_endpoint(Cell::new(0, 1)),
            Err(GridError::InvalidEndpoint {
                cell: Cell::new(0, 1),
                reason: EndpointIssue::Blocked
            })
        );
        assert_eq!(
            grid.check_endpoint(Cell::new(2, 0)),
            Err(GridError::InvalidEndpoint {
                cell: Cell::new(2, 0),
                reason: EndpointIssue::OutOfBounds
            })
        );
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn component_generation() {
        // |.#.|
        // |.#.|
        let mut grid = Grid::build(2, 3).unwrap();
        grid.set_blocked(0, 1, true);
        grid.set_blocked(1, 1, true);
        grid.recompute_adjacency();
        assert!(grid.reachable(Cell::new(0, 0), Cell::new(1, 0)));
        assert!(!grid.reachable(Cell::new(0, 0), Cell::new(0, 2)));
        assert!(!grid.reachable(Cell::new(0, 0), Cell::new(0, 1)));
        assert_eq!(
            grid.component(Cell::new(0, 2)),
            grid.component(Cell::new(1, 2))
        );
    }

    /// Diagonal contact does not connect two cells on a 4-grid.
    #[test]
    fn diagonal_is_not_reachable() {
        // |.#|
        // |#.|
        let mut grid = Grid::build(2, 2).unwrap();
        grid.set_blocked(0, 1, true);
        grid.set_blocked(1, 0, true);
        grid.update();
        assert!(!grid.reachable(Cell::new(0, 0), Cell::new(1, 1)));
    }

    #[test]
    fn cell_at_point() {
        let grid = Grid::build(2, 3).unwrap();
        assert_eq!(grid.cell_at_point(Point::new(2, 1)), Some(Cell::new(1, 2)));
        assert_eq!(grid.cell_at_point(Point::new(3, 0)), None);
        assert_eq!(grid.cell_at_point(Point::new(0, -1)), None);
    }

    #[test]
    fn display() {
        let mut grid = Grid::build(2, 3).unwrap();
        grid.set_blocked(0, 1, true);
        let id = grid.id(Cell::new(1, 2)).unwrap();
        grid.set_status(id, Status::Goal);
        assert_eq!(grid.to_string(), ".#.\n..G\n");
    }
}
