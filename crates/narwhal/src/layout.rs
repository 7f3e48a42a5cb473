//! The layout entry point: pivot distances, centering, covariance, eigenvectors, projection.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{LinkedGraph, NodeIndex};
use crate::matrix::Matrix;
use crate::pivots::build_pivot_distances;
use crate::power_iteration::{PowerIterationOptions, power_iteration};

pub const DEFAULT_PIVOT_COUNT: usize = 50;
pub const DEFAULT_DIMENSIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HdeOptions {
    /// How many pivots (BFS sources) to use. Values below 3 rarely give a good embedding.
    /// Clamped to the node count; `0` means the default.
    pub pivot_count: usize,
    /// Layout dimensionality. Clamped to the effective pivot count; `0` means the default.
    pub dimensions: usize,
    pub solver: PowerIterationOptions,
}

impl Default for HdeOptions {
    fn default() -> Self {
        Self {
            pivot_count: DEFAULT_PIVOT_COUNT,
            dimensions: DEFAULT_DIMENSIONS,
            solver: PowerIterationOptions::default(),
        }
    }
}

impl HdeOptions {
    /// Effective `(pivot_count, dimensions)` for a graph with `node_count` nodes.
    pub fn clamped(&self, node_count: usize) -> (usize, usize) {
        let pivot_count = if self.pivot_count > 0 {
            self.pivot_count
        } else {
            DEFAULT_PIVOT_COUNT
        };
        let dimensions = if self.dimensions > 0 {
            self.dimensions
        } else {
            DEFAULT_DIMENSIONS
        };
        let pivot_count = pivot_count.min(node_count);
        (pivot_count, dimensions.min(pivot_count))
    }
}

/// A computed high-dimensional embedding.
///
/// Everything is computed in [`HdeLayout::new`]; afterwards the layout is read-only and node
/// positions are projected on demand.
#[derive(Debug, Clone)]
pub struct HdeLayout<K> {
    nodes: NodeIndex<K>,
    matrix: Matrix,
    pivots: Vec<K>,
    vectors: Vec<DVector<f64>>,
}

impl<K> HdeLayout<K>
where
    K: Clone + Eq + std::hash::Hash + std::fmt::Debug,
{
    pub fn new<G>(graph: &G, opts: &HdeOptions) -> Result<Self>
    where
        G: LinkedGraph<NodeId = K>,
    {
        let nodes = NodeIndex::from_graph(graph)?;
        let (pivot_count, dimensions) = opts.clamped(nodes.len());

        tracing::debug!(
            nodes = nodes.len(),
            links = graph.link_count(),
            pivot_count,
            dimensions,
            "computing high-dimensional embedding"
        );

        let Some(first) = nodes.first().cloned() else {
            return Ok(Self {
                nodes,
                matrix: Matrix::new(0, 0),
                pivots: Vec::new(),
                vectors: Vec::new(),
            });
        };

        let distances = build_pivot_distances(graph, &nodes, pivot_count, &first)?;
        let mut matrix = distances.matrix;
        let covariance = matrix.center()?.covariance();
        let vectors = power_iteration(&covariance.to_dmatrix(), dimensions, &opts.solver)?;

        Ok(Self {
            nodes,
            matrix,
            pivots: distances.pivots,
            vectors,
        })
    }

    /// Coordinates of `id`: its centered distance profile projected onto each eigenvector.
    pub fn node_position(&self, id: &K) -> Result<Vec<f64>> {
        let column = self.nodes.index_of(id).ok_or_else(|| Error::UnknownNode {
            node: format!("{id:?}"),
        })?;
        self.position_at(column)
    }

    fn position_at(&self, column: usize) -> Result<Vec<f64>> {
        self.vectors
            .iter()
            .map(|v| self.matrix.project_column(column, v.as_slice()))
            .collect()
    }

    /// Every node with its position, in enumeration order.
    pub fn positions(&self) -> impl Iterator<Item = (&K, Result<Vec<f64>>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(column, id)| (id, self.position_at(column)))
    }

    pub fn pivot_nodes(&self) -> &[K] {
        &self.pivots
    }

    pub fn dimensions(&self) -> usize {
        self.vectors.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.nodes.iter()
    }

    pub fn eigenvectors(&self) -> &[DVector<f64>] {
        &self.vectors
    }

    /// The centered pivot-distance matrix.
    pub fn distance_matrix(&self) -> &Matrix {
        &self.matrix
    }
}
