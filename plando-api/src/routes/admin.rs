/// Admin endpoints
///
/// Mounted behind the JWT middleware, the admin gate and execution tracking.
///
/// - `PATCH /v1/admin/users/:user_id` - Change a user's role
/// - `DELETE /v1/admin/comments/:comment_id` - Delete any comment

use super::not_blank;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    /// `USER` or `ADMIN`, case-insensitive
    #[validate(custom(function = "not_blank"))]
    pub role: String,
}

/// Changes a user's role
///
/// # Errors
///
/// - `400 Bad Request`: Unknown role
/// - `404 Not Found`: Unknown user
pub async fn change_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<ChangeRoleRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    state
        .services
        .user_admin
        .change_user_role(user_id, &req.role)
        .await?;

    Ok(StatusCode::OK)
}

/// Deletes a comment; deleting a comment that does not exist also succeeds
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.services.comment_admin.delete_comment(comment_id).await?;
    Ok(StatusCode::OK)
}
