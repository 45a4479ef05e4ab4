use thiserror::Error;

use crate::services::errors::user_service_errors::UserServiceError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error(transparent)]
    UserServiceError(#[from] UserServiceError),
    #[error("JWT error: {0}")]
    JwtError(String),
    #[error("Invalid JWT token")]
    InvalidToken,
    #[error("JWT token has expired")]
    ExpiredToken,
}
