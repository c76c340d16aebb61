use grid_astar::{find_path, Cell, Grid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = Grid::build(3, 3).unwrap();
    grid.set_blocked(1, 1, true);
    grid.recompute_adjacency();
    let start = Cell::new(0, 0);
    let end = Cell::new(2, 2);
    let path = find_path(&mut grid, start, end).unwrap().unwrap();
    println!("{}", grid);
    println!("Path:");
    for c in path.start_to_goal() {
        println!("{}", c);
    }
}
