//! # grid_routing
//!
//! Route planning on a 4-connected grid with blocked cells. Two kinds of query are supported:
//!
//! - a shortest path between two cells, found by breadth-first search ([BfsSolver]);
//! - a shortest route visiting every cell of a waypoint set in some order, found exactly by
//!   trying every ordering and stitching the pairwise shortest paths ([RouteOptimizer]).
//!
//! All moves have unit cost and diagonal moves are not allowed. The [RoutingGrid] is immutable
//! once built and precomputes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! so that queries between disconnected cells are answered without flood-filling.
//!
//! ```
//! use grid_routing::{Cell, GridSolver, BfsSolver, RouteOptimizer, RoutingGrid};
//! use grid_util::point::Point;
//!
//! let grid = RoutingGrid::from_cells(&[Cell::blocked(1, 1), Cell::walkable(2, 2)]).unwrap();
//! let path = BfsSolver.find_path(&grid, Point::new(0, 0), Point::new(2, 2));
//! assert_eq!(path.len(), 5);
//!
//! let waypoints = [Point::new(0, 0), Point::new(2, 0), Point::new(0, 2)];
//! let route = RouteOptimizer::default().optimize(&grid, &waypoints).unwrap();
//! assert_eq!(route.len(), 5);
//! ```
pub mod error;
pub mod optimizer;
pub mod path;
pub mod routing_grid;
pub mod search;
pub mod solver;
pub mod structures;

pub use error::{RouteError, RouteResult};
pub use optimizer::{CancelToken, OptimizerConfig, Route, RouteOptimizer};
pub use routing_grid::{Cell, RoutingGrid};
pub use solver::{astar::AstarSolver, bfs::BfsSolver, GridSolver};
pub use structures::{Structure, StructureIndex};

/// Offsets of the 4-neighbourhood in the order in which searches enumerate them: left, right,
/// up, down. Ties between equally short paths are broken by this order.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Every move between neighbouring cells costs the same.
pub const STEP_COST: u32 = 1;

/// Waypoint counts above this take noticeably long to optimize exactly; the optimizer logs a
/// warning but still runs.
pub const EXACT_WAYPOINT_LIMIT: usize = 10;
