//! The A* state machine. A [SearchEngine] borrows a [Grid] exclusively for one run and advances
//! one expansion per [step](SearchEngine::step), or loops to a terminal state in
//! [run](SearchEngine::run) while reporting each expansion to a [SearchObserver].
use crate::cell::{Cell, VertexId};
use crate::error::{GridError, Result};
use crate::frontier::{Frontier, FrontierKey};
use crate::grid::Grid;
use crate::path::{self, Path};
use crate::vertex::Status;
use crate::visited::Visited;
use crate::UNIT_COST;
use log::{debug, info, trace, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum SearchState {
    /// Costs are not initialized yet; the first step seeds the frontier with the start.
    Ready,
    Running,
    /// The goal was popped from the frontier.
    Found(VertexId),
    /// The frontier ran dry before the goal was popped.
    Exhausted,
    /// Start or goal is out of bounds or blocked; the loop was never entered.
    Rejected(GridError),
    /// The observer asked to stop between two expansions.
    Cancelled,
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchState::Ready | SearchState::Running)
    }
}

/// What an observer sees after each expansion.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub state: &'a SearchState,
    /// The vertex expanded by the step that produced this snapshot.
    pub current: Option<VertexId>,
    pub expansions: usize,
    pub frontier_len: usize,
}

/// Progress hook invoked by [SearchEngine::run]. Observers only read; they cannot alter the
/// search apart from requesting cancellation, which is polled once before every expansion.
pub trait SearchObserver {
    fn observe(&mut self, snapshot: &Snapshot<'_>);

    fn cancelled(&self) -> bool {
        false
    }
}

/// Observer that ignores every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl SearchObserver for Headless {
    fn observe(&mut self, _: &Snapshot<'_>) {}
}

impl<F> SearchObserver for F
where
    F: FnMut(&Snapshot<'_>),
{
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

#[derive(Debug)]
pub struct SearchEngine<'g> {
    grid: &'g mut Grid,
    frontier: Frontier,
    visited: Visited,
    start: Cell,
    goal: Cell,
    endpoints: Option<(VertexId, VertexId)>,
    state: SearchState,
    current: Option<VertexId>,
    expansions: usize,
}

impl<'g> SearchEngine<'g> {
    /// Prepares a run from `start` to `goal`: refreshes stale adjacency, clears all search
    /// state on the grid and allocates the open and closed sets. Fails only if those sets
    /// cannot be allocated; unusable endpoints surface as [SearchState::Rejected] on the first
    /// step.
    pub fn new(grid: &'g mut Grid, start: Cell, goal: Cell) -> Result<SearchEngine<'g>> {
        grid.update();
        grid.reset_search_state();
        let frontier = Frontier::try_with_capacity(grid.len())?;
        let visited = Visited::try_with_capacity(grid.len())?;
        Ok(SearchEngine {
            grid,
            frontier,
            visited,
            start,
            goal,
            endpoints: None,
            state: SearchState::Ready,
            current: None,
            expansions: 0,
        })
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }
    pub fn visited(&self) -> &Visited {
        &self.visited
    }
    pub fn start(&self) -> Cell {
        self.start
    }
    pub fn goal(&self) -> Cell {
        self.goal
    }
    /// Number of vertices moved to the closed set so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &*self.grid,
            state: &self.state,
            current: self.current,
            expansions: self.expansions,
            frontier_len: self.frontier.len(),
        }
    }

    /// Validates the endpoints and seeds the frontier with the start.
    fn begin(&mut self) {
        let endpoints = self
            .grid
            .check_endpoint(self.start)
            .and_then(|s| self.grid.check_endpoint(self.goal).map(|g| (s, g)));
        let (start, goal) = match endpoints {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Not searching from {} to {}: {}", self.start, self.goal, e);
                self.state = SearchState::Rejected(e);
                return;
            }
        };
        info!("Searching from {} to {}", self.start, self.goal);
        let h_cost = self.start.euclidean_distance(&self.goal);
        let vertex = self.grid.vertex_mut(start);
        vertex.g_cost = 0;
        vertex.h_cost = h_cost;
        vertex.f_cost = h_cost;
        self.grid.set_status(start, Status::Start);
        self.grid.set_status(goal, Status::Goal);
        self.frontier.push(
            start,
            FrontierKey {
                f_cost: h_cost,
                cell: self.start,
            },
        );
        self.endpoints = Some((start, goal));
        self.state = SearchState::Running;
    }

    /// Performs one iteration of the loop: pop the best candidate, stop if it is the goal,
    /// otherwise relax its neighbours and close it. Terminal states are sticky.
    pub fn step(&mut self) -> &SearchState {
        if self.state == SearchState::Ready {
            self.begin();
        }
        let Some((start, goal)) = self.endpoints else {
            return &self.state;
        };
        if self.state.is_terminal() {
            return &self.state;
        }
        let Some(current) = self.frontier.pop_min() else {
            info!(
                "Frontier exhausted after {} expansions, {} is unreachable",
                self.expansions, self.goal
            );
            self.current = None;
            self.state = SearchState::Exhausted;
            return &self.state;
        };
        self.current = Some(current);
        if current == goal {
            info!(
                "Reached {} with cost {} after {} expansions",
                self.goal,
                self.grid.vertex(goal).g_cost(),
                self.expansions
            );
            self.state = SearchState::Found(goal);
            return &self.state;
        }
        debug!(
            "Expanding {} (f = {:.3})",
            self.grid.cell(current),
            self.grid.vertex(current).f_cost()
        );
        let candidate = self.grid.vertex(current).g_cost().saturating_add(UNIT_COST);
        for n in self.grid.neighbors_of(current) {
            self.relax(current, n, candidate, goal);
        }
        self.visited.insert(current);
        if current != start {
            self.grid.set_status(current, Status::Closed);
        }
        self.expansions += 1;
        &self.state
    }

    /// Updates `n` through `current` if that is strictly cheaper than its recorded cost.
    fn relax(&mut self, current: VertexId, n: VertexId, candidate: u32, goal: VertexId) {
        let cell = self.grid.cell(n);
        if candidate >= self.grid.vertex(n).g_cost() {
            trace!("Keeping {} at cost {}", cell, self.grid.vertex(n).g_cost());
            return;
        }
        let h_cost = cell.euclidean_distance(&self.goal);
        let f_cost = candidate as f64 + h_cost;
        let vertex = self.grid.vertex_mut(n);
        vertex.from = Some(current);
        vertex.g_cost = candidate;
        vertex.h_cost = h_cost;
        vertex.f_cost = f_cost;
        trace!("Relaxed {} to cost {}", cell, candidate);
        if self.visited.contains(n) {
            return;
        }
        let key = FrontierKey { f_cost, cell };
        if !self.frontier.update_key(n, key) {
            self.frontier.push(n, key);
        }
        if n != goal {
            self.grid.set_status(n, Status::Open);
        }
    }

    /// Steps until a terminal state, showing every expansion to `observer` and polling its
    /// cancellation flag before each one.
    pub fn run<O: SearchObserver>(&mut self, observer: &mut O) -> &SearchState {
        while !self.state.is_terminal() {
            if observer.cancelled() {
                info!("Search cancelled after {} expansions", self.expansions);
                self.state = SearchState::Cancelled;
                break;
            }
            self.step();
            observer.observe(&self.snapshot());
        }
        &self.state
    }

    /// Runs headless to completion.
    pub fn run_to_completion(&mut self) -> &SearchState {
        self.run(&mut Headless)
    }

    /// Reconstructs the path to the goal once it was found, marking it on the grid. Empty in
    /// every other state.
    pub fn path(&mut self) -> Path {
        match self.state {
            SearchState::Found(goal) => path::reconstruct(self.grid, goal),
            _ => Path::default(),
        }
    }
}

/// One-shot headless search. Returns [None] if the goal cannot be reached and an error if an
/// endpoint is unusable or the search collections could not be allocated.
pub fn find_path(grid: &mut Grid, start: Cell, goal: Cell) -> Result<Option<Path>> {
    let mut engine = SearchEngine::new(grid, start, goal)?;
    match engine.run_to_completion().clone() {
        SearchState::Found(_) => Ok(Some(engine.path())),
        SearchState::Rejected(e) => Err(e),
        _ => Ok(None),
    }
}
