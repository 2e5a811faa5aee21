use linkgraph_core::GraphError;
use thiserror::Error;

/// Errors surfaced by the `linkgraph` command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("loaded graph uses {used_mb}MB, exceeds --max-memory-mb={max_mb}MB")]
    MemoryLimit { used_mb: usize, max_mb: usize },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `CliError`.
pub type Result<T> = std::result::Result<T, CliError>;
