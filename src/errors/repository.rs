use thiserror::Error;
use redis::RedisError;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Corrupt document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database call timed out after {0} seconds")]
    Timeout(u64),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
