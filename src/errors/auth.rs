use thiserror::Error;

use super::RepositoryError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Password is longer than {0} bytes")]
    PasswordTooLong(usize),

    #[error("Session token rejected: {0}")]
    Token(String),

    #[error("Credential lookup failed: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Hashing task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

pub type AuthResult<T> = Result<T, AuthError>;
