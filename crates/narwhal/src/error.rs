#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("index out of range: ({row}, {column}) in a {rows}x{columns} matrix")]
    IndexOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    #[error("row is out of range: {row} (matrix has {rows} rows)")]
    InvalidRow { row: usize, rows: usize },
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error(
        "graph has a disconnected component: BFS from pivot {pivot} reached {visited} of {total} nodes; lay out each component separately"
    )]
    DisconnectedGraph {
        pivot: String,
        visited: usize,
        total: usize,
    },
    #[error("requested {requested} eigenvectors from a {dimension}x{dimension} matrix")]
    RequestedCountExceedsDimension { requested: usize, dimension: usize },
    #[error("unknown node: {node}")]
    UnknownNode { node: String },
}

pub type Result<T> = std::result::Result<T, Error>;
