use grid_routing::{Cell, RouteOptimizer, RoutingGrid};
use grid_util::point::Point;

// In this example the shortest route through three waypoints is found on a 5x5 grid with shape
//  _____
// |W   W|
// | ### |
// |     |
// |  #  |
// |  W  |
//  _____
// where
// - # marks an obstacle
// - W marks a waypoint
// The route may visit the waypoints in any order.

fn main() {
    let cells = [
        Cell::blocked(1, 1),
        Cell::blocked(2, 1),
        Cell::blocked(3, 1),
        Cell::blocked(2, 3),
        Cell::walkable(4, 4),
    ];
    let grid = RoutingGrid::from_cells(&cells).unwrap();
    println!("{}", grid);
    let waypoints = [Point::new(0, 0), Point::new(4, 0), Point::new(2, 4)];
    match RouteOptimizer::default().optimize(&grid, &waypoints) {
        Ok(route) => {
            println!("Order: {:?}\n", route.order);
            println!("Path ({} steps):", route.steps());
            for p in route.path {
                println!("{:?}", p);
            }
        }
        Err(e) => println!("{}", e),
    }
}
