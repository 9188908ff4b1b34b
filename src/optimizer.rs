//! Exact shortest routes through a set of waypoints.
//!
//! Every ordering of the waypoints is tried. An ordering is valid if each waypoint can be reached
//! from the one before it, and its length is that of the path obtained by stitching the shortest
//! paths between consecutive waypoints. The running time grows factorially with the number of
//! waypoints, which is fine for the handful of stops of a typical errand but not beyond
//! [EXACT_WAYPOINT_LIMIT].
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::error::{RouteError, RouteResult};
use crate::path::stitch;
use crate::routing_grid::RoutingGrid;
use crate::solver::{bfs::BfsSolver, GridSolver};
use crate::EXACT_WAYPOINT_LIMIT;

/// How many orderings are evaluated between two looks at the cancellation token and the clock.
const CHECK_INTERVAL: usize = 64;

/// Tuning knobs of the [RouteOptimizer]. None of them change the length of the returned route.
#[derive(Clone, Debug)]
pub struct OptimizerConfig {
    /// Spreads the orderings over the rayon thread pool, grouped by first waypoint.
    pub parallel: bool,
    /// Abandons an ordering as soon as its partial length exceeds the best complete route.
    pub prune: bool,
    /// Gives up with [RouteError::Cancelled] once this much time has passed.
    pub time_limit: Option<Duration>,
}

impl Default for OptimizerConfig {
    fn default() -> OptimizerConfig {
        OptimizerConfig {
            parallel: true,
            prune: true,
            time_limit: None,
        }
    }
}

/// Shared flag through which another thread can stop a running optimization.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// The best route found: the order in which the waypoints are visited and the full cell-by-cell
/// path through them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub order: Vec<Point>,
    pub path: Vec<Point>,
}

impl Route {
    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Combines the caller's token with the configured deadline. Once tripped it stays tripped so
/// that all workers stop promptly.
struct Stopper<'a> {
    token: &'a CancelToken,
    deadline: Option<Instant>,
    tripped: AtomicBool,
}

impl<'a> Stopper<'a> {
    fn new(token: &'a CancelToken, time_limit: Option<Duration>) -> Stopper<'a> {
        Stopper {
            token,
            deadline: time_limit.map(|limit| Instant::now() + limit),
            tripped: AtomicBool::new(false),
        }
    }
    fn should_stop(&self) -> bool {
        if self.tripped.load(Ordering::Relaxed) {
            return true;
        }
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        if expired || self.token.is_cancelled() {
            self.tripped.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }
}

/// Shortest paths between every ordered pair of waypoints, computed once per optimization.
/// `paths[i * n + j]` leads from waypoint `i` to waypoint `j` and is empty if there is none.
struct SegmentTable {
    n: usize,
    paths: Vec<Vec<Point>>,
}

impl SegmentTable {
    fn build<S: GridSolver>(
        solver: &S,
        grid: &RoutingGrid,
        waypoints: &[Point],
        parallel: bool,
        stop: &Stopper,
    ) -> RouteResult<SegmentTable> {
        let n = waypoints.len();
        let pairs = (0..n).tuple_combinations::<(usize, usize)>().collect::<Vec<_>>();
        let solve_pair = |&(i, j): &(usize, usize)| -> RouteResult<(Vec<Point>, Vec<Point>)> {
            if stop.should_stop() {
                return Err(RouteError::Cancelled);
            }
            let (a, b) = (waypoints[i], waypoints[j]);
            let forward = solver.find_path(grid, a, b);
            // Between walkable cells a shortest path read backwards is a shortest path the
            // other way. A blocked waypoint can only be left, never entered, so both directions
            // are searched.
            let backward = if !forward.is_empty() && grid.is_walkable(a) && grid.is_walkable(b) {
                forward.iter().rev().copied().collect()
            } else {
                solver.find_path(grid, b, a)
            };
            Ok((forward, backward))
        };
        let solved: Vec<(Vec<Point>, Vec<Point>)> = if parallel {
            pairs.par_iter().map(solve_pair).collect::<RouteResult<_>>()?
        } else {
            pairs.iter().map(solve_pair).collect::<RouteResult<_>>()?
        };

        let mut paths = vec![Vec::new(); n * n];
        for (&(i, j), (forward, backward)) in pairs.iter().zip(solved) {
            paths[i * n + j] = forward;
            paths[j * n + i] = backward;
        }
        for i in 0..n {
            paths[i * n + i] = vec![waypoints[i]];
        }
        Ok(SegmentTable { n, paths })
    }

    fn segment(&self, from: usize, to: usize) -> &[Point] {
        &self.paths[from * self.n + to]
    }

    /// Stitched length of the ordering `first, tail..`, or [None] if a segment is missing or the
    /// partial length exceeds `bound`.
    fn ordering_len(&self, first: usize, tail: &[usize], bound: usize) -> Option<usize> {
        let mut len = 1;
        let mut prev = first;
        for &next in tail {
            let segment = self.segment(prev, next);
            if segment.is_empty() {
                return None;
            }
            len += segment.len() - 1;
            if len > bound {
                return None;
            }
            prev = next;
        }
        Some(len)
    }
}

/// Best ordering found within one branch of the search, i.e. among the orderings that start at
/// the same waypoint.
struct Candidate {
    len: usize,
    first: usize,
    tail: Vec<usize>,
}

/// Finds the shortest route visiting a set of waypoints, using `S` for the point-to-point
/// segments.
#[derive(Clone, Debug)]
pub struct RouteOptimizer<S: GridSolver = BfsSolver> {
    pub solver: S,
    pub config: OptimizerConfig,
}

impl Default for RouteOptimizer<BfsSolver> {
    fn default() -> RouteOptimizer<BfsSolver> {
        RouteOptimizer::new(BfsSolver, OptimizerConfig::default())
    }
}

impl<S: GridSolver> RouteOptimizer<S> {
    pub fn new(solver: S, config: OptimizerConfig) -> RouteOptimizer<S> {
        RouteOptimizer { solver, config }
    }

    /// Computes a minimum-length route through all `waypoints`. Duplicate waypoints are visited
    /// once. Among several optimal routes the one found first in enumeration order is returned.
    pub fn optimize(&self, grid: &RoutingGrid, waypoints: &[Point]) -> RouteResult<Route> {
        self.optimize_with_cancel(grid, waypoints, &CancelToken::new())
    }

    /// Same as [optimize](Self::optimize), but fails with [RouteError::Cancelled] if `cancel` is
    /// triggered or the configured time limit runs out before every ordering was tried. No partial
    /// result is returned in that case.
    pub fn optimize_with_cancel(
        &self,
        grid: &RoutingGrid,
        waypoints: &[Point],
        cancel: &CancelToken,
    ) -> RouteResult<Route> {
        let waypoints: Vec<Point> = waypoints
            .iter()
            .copied()
            .collect::<IndexSet<Point, FxBuildHasher>>()
            .into_iter()
            .collect();
        if waypoints.is_empty() {
            return Err(RouteError::EmptyWaypointSet);
        }
        for &p in &waypoints {
            grid.check_point(p)?;
        }
        let n = waypoints.len();
        if n == 1 {
            return Ok(Route {
                order: waypoints.clone(),
                path: waypoints,
            });
        }
        if n > EXACT_WAYPOINT_LIMIT {
            warn!(
                "Optimizing {} waypoints exactly, this tries {} orderings",
                n,
                orderings(n).map_or("too many".to_owned(), |c| c.to_string())
            );
        }
        // Connectivity is an equivalence on walkable cells, so one separated pair rules out
        // every ordering.
        if let Some((a, b)) = waypoints
            .iter()
            .tuple_combinations()
            .find(|(a, b)| grid.unreachable(**a, **b))
        {
            info!("{:?} and {:?} are not connected, no route exists", a, b);
            return Err(RouteError::NoValidRoute { waypoints: n });
        }

        let stop = Stopper::new(cancel, self.config.time_limit);
        let table =
            SegmentTable::build(&self.solver, grid, &waypoints, self.config.parallel, &stop)?;
        let best_len = AtomicUsize::new(usize::MAX);
        let search = |first| self.search_branch(&table, first, &best_len, &stop);
        let candidates: Vec<Option<Candidate>> = if self.config.parallel {
            (0..n).into_par_iter().map(search).collect::<RouteResult<_>>()?
        } else {
            (0..n).map(search).collect::<RouteResult<_>>()?
        };

        let best = candidates
            .into_iter()
            .flatten()
            .min_by_key(|c| (c.len, c.first))
            .ok_or(RouteError::NoValidRoute { waypoints: n })?;
        let order = std::iter::once(best.first)
            .chain(best.tail.iter().copied())
            .collect::<Vec<_>>();
        let path = stitch(order.windows(2).map(|w| table.segment(w[0], w[1])));
        debug_assert_eq!(path.len(), best.len);
        info!(
            "Best route through {} waypoints visits {} cells",
            n,
            path.len()
        );
        Ok(Route {
            order: order.into_iter().map(|i| waypoints[i]).collect(),
            path,
        })
    }

    /// Tries every ordering that starts at waypoint `first`.
    fn search_branch(
        &self,
        table: &SegmentTable,
        first: usize,
        best_len: &AtomicUsize,
        stop: &Stopper,
    ) -> RouteResult<Option<Candidate>> {
        let rest = (0..table.n).filter(|&i| i != first).collect::<Vec<_>>();
        let mut best: Option<Candidate> = None;
        for (count, tail) in rest.iter().copied().permutations(rest.len()).enumerate() {
            if count % CHECK_INTERVAL == 0 && stop.should_stop() {
                debug!("Branch {} stopped after {} orderings", first, count);
                return Err(RouteError::Cancelled);
            }
            let bound = if self.config.prune {
                best_len.load(Ordering::Relaxed)
            } else {
                usize::MAX
            };
            let Some(len) = table.ordering_len(first, &tail, bound) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| len < b.len) {
                best_len.fetch_min(len, Ordering::Relaxed);
                best = Some(Candidate { len, first, tail });
            }
        }
        Ok(best)
    }
}

/// n! if it fits in a [usize].
fn orderings(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}
