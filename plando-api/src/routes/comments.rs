/// Comment endpoints
///
/// - `POST /v1/todos/:todo_id/comments` - Comment on a todo
/// - `GET /v1/todos/:todo_id/comments` - List a todo's comments

use super::not_blank;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use plando_shared::{auth::AuthUser, services::CommentResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SaveCommentRequest {
    #[validate(custom(function = "not_blank"))]
    pub contents: String,
}

pub async fn save_comment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(todo_id): Path<i64>,
    Json(req): Json<SaveCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    req.validate()?;

    let comment = state
        .services
        .comments
        .save_comment(&auth_user, todo_id, &req.contents)
        .await?;

    Ok(Json(comment))
}

pub async fn get_comments(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    Ok(Json(state.services.comments.get_comments(todo_id).await?))
}
