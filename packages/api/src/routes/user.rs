use axum::{extract::State, routing::get, Json, Router};

use crate::{
    error::ApiError, extract::AppQuery, middleware::auth::AuthenticatedUser, state::AppState,
};
use shared::models::auth::requests::FindByEmailQuery;
use shared::models::user::UserResponse;

pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(find_by_email))
}

async fn find_by_email(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    AppQuery(query): AppQuery<FindByEmailQuery>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .find_by_email(&query.email)
        .await
        .map_err(|e| {
            ApiError::from(e).logged(&format!(
                "User {} failed an email lookup",
                authenticated_user.user_id
            ))
        })?;
    Ok(Json(UserResponse::from(user)))
}
