/// User endpoints
///
/// - `GET /v1/users/:user_id` - Public profile of any user
/// - `PUT /v1/users` - Change the caller's password

use super::not_blank;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use plando_shared::{auth::AuthUser, services::UserResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(custom(function = "not_blank"))]
    pub old_password: String,

    /// Checked against the password policy by the service
    #[validate(custom(function = "not_blank"))]
    pub new_password: String,
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    Ok(Json(state.services.users.get_user(user_id).await?))
}

/// Changes the authenticated user's password
///
/// # Errors
///
/// - `400 Bad Request`: Weak new password, same as current, or wrong old password
/// - `404 Not Found`: The account no longer exists
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    state
        .services
        .users
        .change_password(auth_user.id, &req.old_password, &req.new_password)
        .await?;

    Ok(StatusCode::OK)
}
