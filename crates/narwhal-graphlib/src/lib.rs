//! Graph container APIs used by `narwhal`.
//!
//! The container is undirected and unweighted. Node identifiers are opaque keys; every node gets
//! a dense index in first-seen order, which is also the enumeration order.

pub mod alg;
mod graph;

pub use graph::UndirectedGraph;
