use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::debug;

use crate::{
    error::ApiError, extract::AppJson, middleware::auth::AuthenticatedUser, state::AppState,
};
use shared::models::auth::requests::{
    AuthenticationRequest, ProfileUpdateRequest, RegistrationRequest,
};
use shared::models::auth::responses::LoginResponse;
use shared::models::user::UserResponse;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/user",
            post(register)
                .get(get_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .route("/auth/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    AppJson(registration): AppJson<RegistrationRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .user_service
        .register(&registration)
        .await
        .map_err(|e| ApiError::from(e).logged("Failed to register user"))?;
    debug!("User registered successfully: {}", user.id);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

async fn login(
    State(state): State<AppState>,
    AppJson(credentials): AppJson<AuthenticationRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    state
        .auth_service
        .login(&credentials)
        .await
        .map(Json)
        .map_err(|e| ApiError::from(e).logged("Failed to authenticate user"))
}

async fn get_user(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiError> {
    state
        .user_service
        .find_by_id(&authenticated_user.user_id)
        .await
        .map(|user| Json(UserResponse::from(user)))
        .map_err(|e| {
            ApiError::from(e).logged(&format!(
                "Failed to retrieve user {}",
                authenticated_user.user_id
            ))
        })
}

async fn update_user(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    AppJson(update): AppJson<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .update_profile(&authenticated_user.user_id, &update)
        .await
        .map_err(|e| {
            ApiError::from(e).logged(&format!(
                "Failed to update user {}",
                authenticated_user.user_id
            ))
        })?;
    debug!("User updated successfully: {}", user.id);
    Ok(Json(UserResponse::from(user)))
}

async fn delete_user(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .delete_user(&authenticated_user.user_id)
        .await
        .map_err(|e| {
            ApiError::from(e).logged(&format!(
                "Failed to delete user {}",
                authenticated_user.user_id
            ))
        })?;
    debug!("User deleted successfully: {}", authenticated_user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
