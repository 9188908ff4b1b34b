use grid_util::point::Point;
use thiserror::Error;

/// Failures reported by grid construction, lookups and the route optimizer.
///
/// An unreachable goal in a single search is not an error: solvers return an
/// empty path for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("cannot build a grid from an empty cell list")]
    EmptyGridInput,

    #[error("cell ({x}, {y}) lies beyond the largest supported coordinate")]
    CoordinateOverflow { x: usize, y: usize },

    #[error("no structure named '{0}' on the map")]
    PointNotFound(String),

    #[error("point ({}, {}) lies outside the {width}x{height} grid", .point.x, .point.y)]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },

    #[error("no waypoints to visit")]
    EmptyWaypointSet,

    #[error("no ordering of the {waypoints} waypoints connects all of them")]
    NoValidRoute { waypoints: usize },

    #[error("route optimization was cancelled before all orderings were tried")]
    Cancelled,
}

pub type RouteResult<T> = Result<T, RouteError>;
