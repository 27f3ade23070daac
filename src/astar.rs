use fxhash::FxBuildHasher;
/// This module implements a variant of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
/// with two departures the searcher here relies on: the success test runs
/// when a successor is generated rather than when a node is expanded, and
/// every node that gets expanded is reported back in expansion order.
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cost.eq(&other.cost)
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then creates subordering
        // based on cost, favoring exploration of deeper nodes first
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}

/// Arena entry for one discovered node: the parent's arena index
/// ([usize::MAX] for the root), the best known cost to reach it, and
/// whether it has been finalized.
struct NodeEntry<C> {
    parent: usize,
    cost: C,
    closed: bool,
}

/// What a traced search produced: the path with its total cost if the
/// success test was met, and every node that was closed, in close order.
pub struct SearchTrace<N, C> {
    pub path: Option<(Vec<N>, C)>,
    pub closed: Vec<N>,
}

fn reverse_path<N, C>(parents: &FxIndexMap<N, NodeEntry<C>>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, entry)| {
            *i = entry.parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

pub fn astar_traced<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> SearchTrace<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut closed: Vec<N> = Vec::new();
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: Zero::zero(),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, NodeEntry<C>> = FxIndexMap::default();
    parents.insert(
        start.clone(),
        NodeEntry {
            parent: usize::MAX,
            cost: Zero::zero(),
            closed: false,
        },
    );
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let (node, entry) = parents.get_index_mut(index).unwrap();
            // A node can sit in the heap several times when better routes
            // to it were found after it was first pushed; only the first
            // pop finalizes it.
            if entry.closed {
                continue;
            }
            entry.closed = true;
            closed.push(node.clone());
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            if success(&successor) {
                let mut path = reverse_path(&parents, index);
                path.push(successor);
                return SearchTrace {
                    path: Some((path, new_cost)),
                    closed,
                };
            }
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(NodeEntry {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    // Finalized positions are never reopened, even if a
                    // cheaper route to one turns up later.
                    if e.get().closed || e.get().cost <= new_cost {
                        continue;
                    }
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(NodeEntry {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    SearchTrace { path: None, closed }
}
