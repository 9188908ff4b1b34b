//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! in which discovered nodes live in an insertion-ordered arena and refer to their parent by
//! arena index.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Heap entry of the frontier. The derived ordering pops the lowest estimate first and, among
/// equal estimates, the entry that has come furthest, which tends to be closest to the goal.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Frontier<C> {
    estimate: Reverse<C>,
    cost: C,
    slot: usize,
}

/// Discovered nodes with their parent slot and best known cost, in discovery order.
type Arena<N, C> = FxIndexMap<N, (usize, C)>;

/// Records `node` as reached from `parent` at `cost` unless it is already known at no higher
/// cost. Returns the arena slot of the node if it was recorded.
fn relax<N: Eq + Hash, C: Ord + Copy>(
    arena: &mut Arena<N, C>,
    node: N,
    parent: usize,
    cost: C,
) -> Option<usize> {
    match arena.entry(node) {
        Vacant(e) => {
            let slot = e.index();
            e.insert((parent, cost));
            Some(slot)
        }
        Occupied(mut e) if cost < e.get().1 => {
            e.insert((parent, cost));
            Some(e.index())
        }
        Occupied(_) => None,
    }
}

/// Follows parent slots from `slot` back to the root and returns the nodes root first.
fn reverse_path<N: Clone, C>(arena: &Arena<N, C>, slot: usize) -> Vec<N> {
    let mut path: Vec<N> = std::iter::successors(Some(slot), |&i| {
        arena.get_index(i).map(|(_, &(parent, _))| parent)
    })
    .map_while(|i| arena.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Best-first search from `start` until `success` holds for an expanded node. With a zero
/// heuristic this is uniform-cost search. Returns the node sequence and its cost, or [None] if
/// the frontier runs dry first.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut arena: Arena<N, C> = FxIndexMap::default();
    arena.insert(start.clone(), (usize::MAX, C::zero()));
    let mut frontier = BinaryHeap::from([Frontier {
        estimate: Reverse(C::zero()),
        cost: C::zero(),
        slot: 0,
    }]);

    while let Some(Frontier { cost, slot, .. }) = frontier.pop() {
        let (node, &(_, best)) = arena.get_index(slot)?;
        // Stale entry, the node was reached more cheaply after this one was pushed
        if cost > best {
            continue;
        }
        if success(node) {
            return Some((reverse_path(&arena, slot), cost));
        }
        let next = successors(node);
        for (successor, step) in next {
            let reached = cost + step;
            if let Some(successor_slot) = relax(&mut arena, successor, slot, reached) {
                let (successor, _) = arena.get_index(successor_slot)?;
                frontier.push(Frontier {
                    estimate: Reverse(reached + heuristic(successor)),
                    cost: reached,
                    slot: successor_slot,
                });
            }
        }
    }
    None
}
