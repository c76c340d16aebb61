use crate::cell::{Cell, VertexId};
use crate::INFINITE_COST;

/// Presentation tag for a vertex. Only harnesses read this; the search itself relies on
/// frontier and visited membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Unvisited,
    Open,
    Closed,
    Start,
    Goal,
    Path,
}

impl Status {
    /// Single character used by the textual grid rendering.
    pub fn symbol(self) -> char {
        match self {
            Status::Unvisited => '.',
            Status::Open => 'o',
            Status::Closed => 'x',
            Status::Start => 'S',
            Status::Goal => 'G',
            Status::Path => '*',
        }
    }
}

/// The four cardinal moves in the order neighbours are listed and relaxed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// Row and column delta of the move.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// A single grid cell together with its adjacency and per-run search state.
#[derive(Clone, Debug)]
pub struct Vertex {
    cell: Cell,
    pub(crate) blocked: bool,
    /// Indexed by [Direction]; [None] for blocked vertices, which have no adjacency at all.
    pub(crate) neighbours: Option<[Option<VertexId>; 4]>,
    pub(crate) g_cost: u32,
    pub(crate) h_cost: f64,
    pub(crate) f_cost: f64,
    pub(crate) from: Option<VertexId>,
    pub(crate) status: Status,
}

impl Vertex {
    pub(crate) fn new(cell: Cell) -> Vertex {
        Vertex {
            cell,
            blocked: false,
            neighbours: None,
            g_cost: INFINITE_COST,
            h_cost: f64::INFINITY,
            f_cost: f64::INFINITY,
            from: None,
            status: Status::Unvisited,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.g_cost = INFINITE_COST;
        self.h_cost = f64::INFINITY;
        self.f_cost = f64::INFINITY;
        self.from = None;
        self.status = Status::Unvisited;
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }
    /// Best known cost from the start, [INFINITE_COST] if not reached yet.
    pub fn g_cost(&self) -> u32 {
        self.g_cost
    }
    pub fn h_cost(&self) -> f64 {
        self.h_cost
    }
    pub fn f_cost(&self) -> f64 {
        self.f_cost
    }
    /// Predecessor on the current best path.
    pub fn from(&self) -> Option<VertexId> {
        self.from
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn is_reached(&self) -> bool {
        self.g_cost != INFINITE_COST
    }
}
