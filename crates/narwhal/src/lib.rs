#![forbid(unsafe_code)]

//! High-dimensional embedding (HDE) of connected, undirected, unweighted graphs.
//!
//! The layout picks pivot nodes by farthest-point sampling, records BFS hop distances from each
//! pivot to every node, centers that matrix, and projects each node's distance profile onto the
//! top eigenvectors of the pivot covariance matrix. Graph distance is thereby approximated by
//! Euclidean distance in a low-dimensional space.
//!
//! Reference: Harel & Koren, "Graph Drawing by High-Dimensional Embedding".

pub use narwhal_graphlib as graphlib;

pub mod error;
pub mod graph;
pub mod layout;
pub mod matrix;
pub mod pivots;
pub mod power_iteration;
mod rng;

pub use error::{Error, Result};
pub use graph::{LinkedGraph, NodeIndex};
pub use layout::{HdeLayout, HdeOptions};
pub use matrix::Matrix;
pub use pivots::{PivotDistances, build_pivot_distances};
pub use power_iteration::{PowerIterationOptions, power_iteration};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless layout entry point.
pub fn layout<G>(graph: &G, opts: &HdeOptions) -> Result<HdeLayout<G::NodeId>>
where
    G: LinkedGraph,
{
    HdeLayout::new(graph, opts)
}
