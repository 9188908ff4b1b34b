use grid_routing::{BfsSolver, Cell, GridSolver, RoutingGrid};
use grid_util::point::Point;

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
    let grid = RoutingGrid::from_cells(&[Cell::blocked(1, 1), Cell::walkable(2, 2)]).unwrap();
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = BfsSolver.find_path(&grid, start, end);
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
