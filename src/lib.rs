//! # grid_astar
//!
//! Incremental [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search on a
//! 4-connected grid where every move costs the same. The search can be driven one expansion at
//! a time so a harness can draw the open and closed sets between steps, or run headless to
//! completion.
//!
//! The heuristic is the straight-line (Euclidean) distance, which never overestimates on a
//! 4-connected unit-cost grid, so reconstructed paths are shortest paths. Ties on the frontier
//! are broken by the lowest `(row, column)`, which makes the chosen path deterministic.
//!
//! ```
//! use grid_astar::{find_path, Cell, Grid};
//!
//! let mut grid = Grid::build(3, 3).unwrap();
//! grid.set_blocked(1, 1, true);
//! grid.recompute_adjacency();
//! let path = find_path(&mut grid, Cell::new(0, 0), Cell::new(2, 2))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(path.edges(), 4);
//! ```
pub mod cell;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod path;
pub mod scenario;
pub mod vertex;
pub mod visited;

pub use cell::{Cell, VertexId};
pub use engine::{find_path, Headless, SearchEngine, SearchObserver, SearchState, Snapshot};
pub use error::{EndpointIssue, GridError, Result};
pub use grid::Grid;
pub use path::Path;
pub use scenario::Scenario;
pub use vertex::{Direction, Status, Vertex};

/// Cost of every move between neighbouring cells.
pub const UNIT_COST: u32 = 1;
/// Cost of a vertex that has not been reached, larger than any path cost.
pub const INFINITE_COST: u32 = u32::MAX;
