use rustc_hash::FxBuildHasher;
use std::hash::Hash;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// An undirected, unweighted simple graph.
///
/// Nodes are indexed densely in the order they are first seen (either through [`add_node`] or as
/// an endpoint of [`add_link`]). Links are kept in insertion order and a link is stored once no
/// matter which direction it is added from.
///
/// [`add_node`]: UndirectedGraph::add_node
/// [`add_link`]: UndirectedGraph::add_link
#[derive(Debug, Clone)]
pub struct UndirectedGraph<K> {
    nodes: Vec<K>,
    node_index: HashMap<K, usize>,

    links: Vec<(usize, usize)>,
    link_index: HashSet<(usize, usize)>,

    // Neighbor indices per node, in link insertion order.
    adjacency: Vec<Vec<usize>>,
}

impl<K> Default for UndirectedGraph<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> UndirectedGraph<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            node_index: HashMap::with_capacity_and_hasher(nodes, FxBuildHasher),
            links: Vec::new(),
            link_index: HashSet::default(),
            adjacency: Vec::with_capacity(nodes),
        }
    }

    /// Builds a graph from `(from, to)` pairs, inserting endpoints in first-seen order.
    pub fn from_links<I>(links: I) -> Self
    where
        I: IntoIterator<Item = (K, K)>,
    {
        let mut g = Self::new();
        for (a, b) in links {
            g.add_link(a, b);
        }
        g
    }

    /// Inserts `id` if it is not present yet and returns its dense index.
    pub fn add_node(&mut self, id: K) -> usize {
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(id.clone());
        self.node_index.insert(id, idx);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Adds an undirected link between `a` and `b`.
    ///
    /// Returns `false` when the link (in either direction) already exists.
    pub fn add_link(&mut self, a: K, b: K) -> bool {
        let a = self.add_node(a);
        let b = self.add_node(b);
        let key = if a <= b { (a, b) } else { (b, a) };
        if !self.link_index.insert(key) {
            return false;
        }
        self.links.push((a, b));
        self.adjacency[a].push(b);
        if a != b {
            self.adjacency[b].push(a);
        }
        true
    }

    pub fn has_node(&self, id: &K) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn has_link(&self, a: &K, b: &K) -> bool {
        let (Some(&a), Some(&b)) = (self.node_index.get(a), self.node_index.get(b)) else {
            return false;
        };
        let key = if a <= b { (a, b) } else { (b, a) };
        self.link_index.contains(&key)
    }

    pub fn node_index(&self, id: &K) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node(&self, index: usize) -> Option<&K> {
        self.nodes.get(index)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.nodes.iter()
    }

    pub fn links(&self) -> impl Iterator<Item = (&K, &K)> {
        self.links
            .iter()
            .map(|&(a, b)| (&self.nodes[a], &self.nodes[b]))
    }

    /// Neighbors of `id`; empty for unknown nodes.
    pub fn neighbors<'a>(&'a self, id: &K) -> impl Iterator<Item = &'a K> + use<'a, K> {
        let adj: &'a [usize] = match self.node_index.get(id) {
            Some(&idx) => &self.adjacency[idx],
            None => &[],
        };
        adj.iter().map(move |&w| &self.nodes[w])
    }

    /// Neighbor indices of the node at `index`.
    pub fn neighbor_indices(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, id: &K) -> usize {
        self.node_index
            .get(id)
            .map(|&idx| self.adjacency[idx].len())
            .unwrap_or(0)
    }
}
