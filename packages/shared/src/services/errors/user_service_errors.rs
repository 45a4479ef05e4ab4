use thiserror::Error;

use crate::repositories::errors::user_repository_errors::UserRepositoryError;

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Wrong password")]
    WrongPassword,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] UserRepositoryError),
}
