//! Helper algorithms over [`UndirectedGraph`].

use crate::UndirectedGraph;
use std::collections::VecDeque;
use std::hash::Hash;

/// Connected components in index order of their first node.
///
/// Each component lists its nodes in BFS order starting from that first node.
pub fn components<K>(g: &UndirectedGraph<K>) -> Vec<Vec<K>>
where
    K: Clone + Eq + Hash,
{
    component_indices(g)
        .into_iter()
        .map(|comp| {
            comp.into_iter()
                .filter_map(|idx| g.node(idx).cloned())
                .collect()
        })
        .collect()
}

/// The subgraph induced by the largest connected component.
///
/// Ties go to the component whose first node was inserted earliest. Node order and link order
/// follow the source graph.
pub fn largest_component<K>(g: &UndirectedGraph<K>) -> UndirectedGraph<K>
where
    K: Clone + Eq + Hash,
{
    let comps = component_indices(g);
    let mut best: Option<&Vec<usize>> = None;
    for comp in &comps {
        if best.is_none_or(|b| comp.len() > b.len()) {
            best = Some(comp);
        }
    }
    let Some(best) = best else {
        return UndirectedGraph::new();
    };

    let mut keep = vec![false; g.node_count()];
    for &idx in best {
        keep[idx] = true;
    }

    let mut out = UndirectedGraph::with_capacity(best.len());
    for (idx, id) in g.nodes().enumerate() {
        if keep[idx] {
            out.add_node(id.clone());
        }
    }
    for (a, b) in g.links() {
        // Both endpoints share a component, so checking one side is enough.
        if g.node_index(a).is_some_and(|idx| keep[idx]) {
            out.add_link(a.clone(), b.clone());
        }
    }
    out
}

fn component_indices<K>(g: &UndirectedGraph<K>) -> Vec<Vec<usize>>
where
    K: Clone + Eq + Hash,
{
    let n = g.node_count();
    let mut visited = vec![false; n];
    let mut out: Vec<Vec<usize>> = Vec::new();
    let mut q: VecDeque<usize> = VecDeque::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        q.push_back(start);
        let mut comp: Vec<usize> = Vec::new();

        while let Some(v) = q.pop_front() {
            comp.push(v);
            for &u in g.neighbor_indices(v) {
                if !visited[u] {
                    visited[u] = true;
                    q.push_back(u);
                }
            }
        }

        out.push(comp);
    }

    out
}
