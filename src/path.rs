use crate::cell::{Cell, VertexId};
use crate::grid::Grid;
use crate::vertex::Status;
use crate::{INFINITE_COST, UNIT_COST};
use itertools::Itertools;

/// A reconstructed path, stored goal first. Empty if the goal was never reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Cells from goal to start.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells from start to goal.
    pub fn start_to_goal(&self) -> Vec<Cell> {
        self.cells.iter().rev().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves along the path.
    pub fn edges(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Total move cost, saturating at [INFINITE_COST].
    pub fn cost(&self) -> u32 {
        edge_cost(self.edges())
    }

    pub fn goal(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Checks that consecutive cells are exactly one cardinal move apart.
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.manhattan_distance(b) == 1)
    }
}

fn edge_cost(edges: usize) -> u32 {
    u32::try_from(edges).map_or(INFINITE_COST, |e| e.saturating_mul(UNIT_COST))
}

/// Walks the back-pointers from `goal` to the start, marking every vertex except the start as
/// [Status::Path]. The start is the vertex without predecessor whose cost is zero; a goal that
/// has no predecessor and is not the start yields an empty path.
pub fn reconstruct(grid: &mut Grid, goal: VertexId) -> Path {
    let goal_vertex = grid.vertex(goal);
    if goal_vertex.from().is_none() && goal_vertex.g_cost() != 0 {
        return Path::default();
    }
    let ids: Vec<VertexId> = std::iter::successors(Some(goal), |&id| grid.vertex(id).from())
        .take(grid.len())
        .collect();
    for &id in &ids {
        if grid.vertex(id).from().is_some() {
            grid.set_status(id, Status::Path);
        }
    }
    Path {
        cells: ids.into_iter().map(|id| grid.cell(id)).collect(),
    }
}
