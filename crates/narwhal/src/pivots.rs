//! Pivot selection and the pivot-distance matrix.
//!
//! Pivots are picked by farthest-point sampling: after each BFS, the next pivot is the node whose
//! distance to the closest already-chosen pivot is largest. Row `i` of the matrix holds the hop
//! distance from pivot `i` to every node.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::graph::{LinkedGraph, NodeIndex};
use crate::matrix::Matrix;

#[derive(Debug, Clone)]
pub struct PivotDistances<K> {
    /// `pivots.len() x nodes.len()` hop distances.
    pub matrix: Matrix,
    /// Pivot ids in selection order; entry `i` owns matrix row `i`.
    pub pivots: Vec<K>,
}

/// Runs one BFS per pivot, starting from `first`.
///
/// `pivot_count` is clamped to the node count. Fails with [`Error::DisconnectedGraph`] as soon as
/// a BFS does not reach every node.
pub fn build_pivot_distances<G>(
    graph: &G,
    nodes: &NodeIndex<G::NodeId>,
    pivot_count: usize,
    first: &G::NodeId,
) -> Result<PivotDistances<G::NodeId>>
where
    G: LinkedGraph,
{
    let node_count = nodes.len();
    let pivot_count = pivot_count.min(node_count);

    let mut matrix = Matrix::new(pivot_count, node_count);
    let mut pivots: Vec<G::NodeId> = Vec::with_capacity(pivot_count);
    let mut min_dist: Vec<f64> = vec![f64::INFINITY; node_count];

    if pivot_count == 0 {
        return Ok(PivotDistances { matrix, pivots });
    }

    let mut pivot = nodes
        .index_of(first)
        .ok_or_else(|| Error::UnknownNode {
            node: format!("{first:?}"),
        })?;

    for row in 0..pivot_count {
        let pivot_id = nodes.id(pivot).ok_or(Error::IndexOutOfRange {
            row,
            column: pivot,
            rows: pivot_count,
            columns: node_count,
        })?;
        pivots.push(pivot_id.clone());
        fill_row(graph, nodes, &mut matrix, row, pivot, &mut min_dist)?;

        if row + 1 < pivot_count {
            pivot = farthest(&min_dist);
        }
    }

    Ok(PivotDistances { matrix, pivots })
}

fn fill_row<G>(
    graph: &G,
    nodes: &NodeIndex<G::NodeId>,
    matrix: &mut Matrix,
    row: usize,
    pivot: usize,
    min_dist: &mut [f64],
) -> Result<()>
where
    G: LinkedGraph,
{
    let node_count = nodes.len();
    let mut dist: Vec<Option<u32>> = vec![None; node_count];
    let mut q: VecDeque<usize> = VecDeque::new();
    let mut visited = 1usize;

    dist[pivot] = Some(0);
    q.push_back(pivot);

    while let Some(v) = q.pop_front() {
        let d = dist[v].unwrap_or_default();
        let hops = f64::from(d);
        matrix.set(row, v, hops)?;
        if hops < min_dist[v] {
            min_dist[v] = hops;
        }

        let Some(id) = nodes.id(v) else {
            continue;
        };
        let mut unknown: Option<G::NodeId> = None;
        graph.for_each_linked_node(id, |other| {
            let Some(u) = nodes.index_of(other) else {
                unknown.get_or_insert_with(|| other.clone());
                return;
            };
            if dist[u].is_none() {
                dist[u] = Some(d + 1);
                visited += 1;
                q.push_back(u);
            }
        });
        if let Some(node) = unknown {
            return Err(Error::UnknownNode {
                node: format!("{node:?}"),
            });
        }
    }

    if visited != node_count {
        let pivot_id = nodes.id(pivot).map(|id| format!("{id:?}")).unwrap_or_default();
        return Err(Error::DisconnectedGraph {
            pivot: pivot_id,
            visited,
            total: node_count,
        });
    }
    Ok(())
}

/// Index of the largest value; ties resolve to the lowest index.
fn farthest(min_dist: &[f64]) -> usize {
    let mut best = 0usize;
    for (i, &d) in min_dist.iter().enumerate() {
        if d > min_dist[best] {
            best = i;
        }
    }
    best
}
