//! The graph surface the embedding reads from.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;
use narwhal_graphlib::UndirectedGraph;
use rustc_hash::FxBuildHasher;

use crate::error::{Error, Result};

/// Read-only view of a connected, undirected, unweighted graph.
///
/// Implementations must enumerate every node exactly once, in a stable order. The first node
/// yielded by [`for_each_node`](LinkedGraph::for_each_node) seeds pivot selection.
pub trait LinkedGraph {
    type NodeId: Clone + Eq + Hash + fmt::Debug;

    fn node_count(&self) -> usize;

    fn link_count(&self) -> usize;

    fn for_each_node<F>(&self, f: F)
    where
        F: FnMut(&Self::NodeId);

    fn for_each_link<F>(&self, f: F)
    where
        F: FnMut(&Self::NodeId, &Self::NodeId);

    /// Visits the direct neighbors of `id`. Unknown ids have no neighbors.
    fn for_each_linked_node<F>(&self, id: &Self::NodeId, f: F)
    where
        F: FnMut(&Self::NodeId);
}

impl<K> LinkedGraph for UndirectedGraph<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    type NodeId = K;

    fn node_count(&self) -> usize {
        UndirectedGraph::node_count(self)
    }

    fn link_count(&self) -> usize {
        UndirectedGraph::link_count(self)
    }

    fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&K),
    {
        for id in self.nodes() {
            f(id);
        }
    }

    fn for_each_link<F>(&self, mut f: F)
    where
        F: FnMut(&K, &K),
    {
        for (a, b) in self.links() {
            f(a, b);
        }
    }

    fn for_each_linked_node<F>(&self, id: &K, mut f: F)
    where
        F: FnMut(&K),
    {
        for other in self.neighbors(id) {
            f(other);
        }
    }
}

/// Bijection between node identifiers and dense indices `0..n`, in enumeration order.
#[derive(Debug, Clone)]
pub struct NodeIndex<K> {
    ids: IndexSet<K, FxBuildHasher>,
}

impl<K> NodeIndex<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Enumerates `graph` once and checks that every link endpoint is one of its nodes.
    pub fn from_graph<G>(graph: &G) -> Result<Self>
    where
        G: LinkedGraph<NodeId = K>,
    {
        let mut ids: IndexSet<K, FxBuildHasher> =
            IndexSet::with_capacity_and_hasher(graph.node_count(), FxBuildHasher);
        graph.for_each_node(|id| {
            ids.insert(id.clone());
        });

        let mut missing: Option<K> = None;
        graph.for_each_link(|a, b| {
            if missing.is_some() {
                return;
            }
            if !ids.contains(a) {
                missing = Some(a.clone());
            } else if !ids.contains(b) {
                missing = Some(b.clone());
            }
        });
        if let Some(node) = missing {
            return Err(Error::UnknownNode {
                node: format!("{node:?}"),
            });
        }

        Ok(Self { ids })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.ids.get_index_of(id)
    }

    pub fn id(&self, index: usize) -> Option<&K> {
        self.ids.get_index(index)
    }

    pub fn first(&self) -> Option<&K> {
        self.ids.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.ids.iter()
    }
}
