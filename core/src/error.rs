use thiserror::Error;

/// Errors returned by fallible graph queries.
///
/// Unknown vertices and missing paths are not errors; they surface as
/// `None` or empty results. Only the exponential Hamiltonian search refuses
/// work, when the graph is too large for its configured table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph has {vertices} vertices, Hamiltonian search is limited to {limit}")]
    TooManyVertices { vertices: usize, limit: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results using `GraphError`.
pub type Result<T> = std::result::Result<T, GraphError>;
