use docent_core::EmbeddingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorDbError {
    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("operation failed: {0}")]
    OperationFailed(String),
    #[error("collection '{0}' does not exist")]
    MissingCollection(String),
    #[error("{0} requires an embedder")]
    MissingEmbedder(&'static str),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}

pub type VectorDbResult<T> = Result<T, VectorDbError>;
