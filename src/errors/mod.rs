use thiserror::Error;

pub mod response;
pub mod repository;
pub mod auth;

// Re-export commonly used types
pub use repository::{RepositoryError, RepositoryResult};
pub use auth::{AuthError, AuthResult};

#[derive(Error, Debug)]
pub enum AppError {
    // Carries the message shown on the login page.
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("Session error: {0}")]
    Session(#[from] AuthError),

    #[error("Template error: {0}")]
    Template(#[from] std::io::Error),

    #[error("Invalid form: {0}")]
    Form(String),
}

pub type AppResult<T> = Result<T, AppError>;
