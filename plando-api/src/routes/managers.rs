/// Manager endpoints
///
/// - `POST /v1/todos/:todo_id/managers` - Register a manager (owner only)
/// - `GET /v1/todos/:todo_id/managers` - List managers
/// - `DELETE /v1/todos/:todo_id/managers/:manager_id` - Remove a manager (owner only)

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use plando_shared::{auth::AuthUser, services::ManagerResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SaveManagerRequest {
    /// User to register as manager
    pub manager_user_id: i64,
}

/// Registers a manager for the todo
///
/// # Errors
///
/// - `400 Bad Request`: Caller does not own the todo, or the owner tried to
///   register themselves
/// - `404 Not Found`: Unknown todo or manager user
pub async fn save_manager(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(todo_id): Path<i64>,
    Json(req): Json<SaveManagerRequest>,
) -> ApiResult<Json<ManagerResponse>> {
    let manager = state
        .services
        .managers
        .save_manager(&auth_user, todo_id, req.manager_user_id)
        .await?;

    Ok(Json(manager))
}

pub async fn get_managers(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> ApiResult<Json<Vec<ManagerResponse>>> {
    Ok(Json(state.services.managers.get_managers(todo_id).await?))
}

/// Removes a manager on behalf of the caller
///
/// # Errors
///
/// - `400 Bad Request`: Caller does not own the todo, or the manager belongs
///   to another todo
/// - `404 Not Found`: Unknown user, todo or manager
pub async fn delete_manager(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((todo_id, manager_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .services
        .managers
        .delete_manager(auth_user.id, todo_id, manager_id)
        .await?;

    Ok(StatusCode::OK)
}
