/// Todo endpoints
///
/// - `POST /v1/todos` - Create a todo owned by the caller
/// - `GET /v1/todos?page=1&size=10` - List todos, newest first (size at most 100)
/// - `GET /v1/todos/:todo_id` - Single todo with its owner

use super::not_blank;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use plando_shared::{
    auth::AuthUser,
    services::{PageResponse, TodoResponse},
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SaveTodoRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub title: String,

    #[validate(custom(function = "not_blank"))]
    pub contents: String,
}

/// Pagination query, 1-based
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// Creates a todo stamped with today's weather
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Blank title or contents, or a title longer
///   than 255 characters
/// - `500 Internal Server Error`: Weather feed unavailable
pub async fn save_todo(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(req): Json<SaveTodoRequest>,
) -> ApiResult<Json<TodoResponse>> {
    req.validate()?;

    let todo = state
        .services
        .todos
        .save_todo(&auth_user, &req.title, &req.contents)
        .await?;

    Ok(Json(todo))
}

pub async fn get_todos(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PageResponse<TodoResponse>>> {
    let page = state.services.todos.get_todos(params.page, params.size).await?;
    Ok(Json(page))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> ApiResult<Json<TodoResponse>> {
    Ok(Json(state.services.todos.get_todo(todo_id).await?))
}
