//! Terminal harness: redraws the grid after every expansion, then overlays the path.
//!
//! Run with `RUST_LOG=debug cargo run --example stepping` to see the search log as well. An
//! optional argument gives the delay between frames in milliseconds.
use grid_astar::{Scenario, SearchEngine, SearchState, Snapshot};
use grid_util::point::Point;
use std::thread;
use std::time::Duration;

const MAP: &str = "
    S.........
    .######...
    ......#...
    .####.#.##
    ....#.#...
    ###.#.###.
    ....#....G
";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let delay = std::env::args()
        .nth(1)
        .and_then(|ms| ms.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::ZERO);

    let scenario: Scenario = MAP.parse().unwrap();
    let mut grid = scenario.build_grid().unwrap();
    // A harness that takes clicks would map the clicked point like this
    if let Some(clicked) = grid.cell_at_point(Point::new(9, 6)) {
        println!("Point (9, 6) lies on cell {}", clicked);
    }

    let mut engine = SearchEngine::new(&mut grid, scenario.start, scenario.goal).unwrap();
    let mut frame = |snapshot: &Snapshot<'_>| {
        println!(
            "expansion {} ({} open)\n{}",
            snapshot.expansions, snapshot.frontier_len, snapshot.grid
        );
        thread::sleep(delay);
    };
    match engine.run(&mut frame).clone() {
        SearchState::Found(_) => {
            let path = engine.path();
            println!("Path with {} moves:\n{}", path.edges(), engine.grid());
        }
        state => println!("No path: {:?}", state),
    }
}
