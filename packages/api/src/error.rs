use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shared::services::errors::{
    auth_service_errors::AuthServiceError, user_service_errors::UserServiceError,
};
use thiserror::Error;
use tracing::{debug, error, Level};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UserService(#[from] UserServiceError),
    #[error(transparent)]
    AuthService(#[from] AuthServiceError),
    #[error("Invalid request body: {0}")]
    InvalidJson(#[from] JsonRejection),
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),
    #[error("Missing or malformed bearer token")]
    Unauthorized,
}

fn user_service_status(error: &UserServiceError) -> StatusCode {
    match error {
        UserServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        UserServiceError::UserNotFound => StatusCode::NOT_FOUND,
        UserServiceError::WrongPassword => StatusCode::UNAUTHORIZED,
        UserServiceError::UserAlreadyExists => StatusCode::CONFLICT,
        UserServiceError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserService(err) => user_service_status(err),
            ApiError::AuthService(AuthServiceError::UserServiceError(err)) => {
                user_service_status(err)
            }
            ApiError::AuthService(AuthServiceError::JwtError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::AuthService(
                AuthServiceError::InvalidToken | AuthServiceError::ExpiredToken,
            ) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidJson(_) | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    /// Client mistakes are routine; only server-side failures are errors.
    pub fn log_level(&self) -> Level {
        if self.status().is_server_error() {
            Level::ERROR
        } else {
            Level::DEBUG
        }
    }

    pub fn logged(self, context: &str) -> Self {
        if self.log_level() == Level::ERROR {
            error!("{}: {}", context, self);
        } else {
            debug!("{}: {}", context, self);
        }
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
