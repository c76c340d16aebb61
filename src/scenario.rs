use crate::cell::Cell;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use core::fmt;
use std::str::FromStr;

/// Everything a harness configures before a run: dimensions, obstacles and the two endpoints.
///
/// Parses from and prints to an ASCII map with one line per row, where `.` is free, `#` or `@`
/// is blocked, `S` is the start and `G` the goal:
///
/// ```
/// use grid_astar::Scenario;
///
/// let scenario: Scenario = "S.#\n..G".parse().unwrap();
/// assert_eq!((scenario.rows, scenario.columns), (2, 3));
/// assert_eq!(scenario.obstacles.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub rows: usize,
    pub columns: usize,
    pub obstacles: Vec<Cell>,
    pub start: Cell,
    pub goal: Cell,
}

impl Scenario {
    /// Builds the grid, places the obstacles (out-of-bounds ones are ignored) and computes
    /// adjacency. The endpoints are not validated here; the search rejects unusable ones.
    pub fn build_grid(&self) -> Result<Grid> {
        let mut grid = Grid::build(self.rows, self.columns)?;
        for cell in &self.obstacles {
            grid.set_blocked(cell.row, cell.column, true);
        }
        grid.recompute_adjacency();
        grid.reset_search_state();
        Ok(grid)
    }
}

impl FromStr for Scenario {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Scenario> {
        let parse_error = |line: usize, reason: &str| GridError::ParseScenario {
            line,
            reason: reason.to_owned(),
        };
        let mut columns = None;
        let mut rows = 0;
        let mut obstacles = Vec::new();
        let mut start = None;
        let mut goal = None;
        for (row, line) in s.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let width = line.chars().count();
            if *columns.get_or_insert(width) != width {
                return Err(parse_error(row + 1, "rows differ in length"));
            }
            for (column, ch) in line.chars().enumerate() {
                let cell = Cell::new(row, column);
                match ch {
                    '.' => {}
                    '#' | '@' => obstacles.push(cell),
                    'S' if start.is_none() => start = Some(cell),
                    'G' if goal.is_none() => goal = Some(cell),
                    'S' | 'G' => return Err(parse_error(row + 1, "endpoint given twice")),
                    _ => return Err(parse_error(row + 1, &format!("unexpected character {ch:?}"))),
                }
            }
            rows += 1;
        }
        Ok(Scenario {
            rows,
            columns: columns.unwrap_or(0),
            obstacles,
            start: start.ok_or_else(|| parse_error(rows, "missing start"))?,
            goal: goal.ok_or_else(|| parse_error(rows, "missing goal"))?,
        })
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.columns)
                .map(|column| {
                    let cell = Cell::new(row, column);
                    if cell == self.start {
                        'S'
                    } else if cell == self.goal {
                        'G'
                    } else if self.obstacles.contains(&cell) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
