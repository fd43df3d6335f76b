/// Manager service
///
/// A todo's owner delegates it to other users. The owner can never be
/// registered as a manager of their own todo, and only the owner may add or
/// remove managers.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::{ServiceError, ServiceResult, TODO_NOT_FOUND, USER_NOT_FOUND};
use crate::auth::AuthUser;
use crate::models::{CreateManager, ManagerWithUser, UserSummary};
use crate::repository::{ManagerRepository, TodoRepository, UserRepository};

const SAVE_OWNER_INVALID: &str =
    "담당자를 등록하려고 하는 유저가 일정을 만든 유저가 유효하지 않습니다.";
const MANAGER_USER_NOT_FOUND: &str = "등록하려고 하는 담당자 유저가 존재하지 않습니다.";
const SELF_ASSIGNMENT: &str = "일정 작성자는 본인을 담당자로 등록할 수 없습니다.";
const DELETE_OWNER_INVALID: &str = "해당 일정을 만든 유저가 유효하지 않습니다.";
const MANAGER_NOT_FOUND: &str = "Manager not found";
const MANAGER_TODO_MISMATCH: &str = "해당 일정에 등록된 담당자가 아닙니다.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerResponse {
    pub id: i64,
    pub user: UserSummary,
}

impl From<ManagerWithUser> for ManagerResponse {
    fn from(row: ManagerWithUser) -> Self {
        Self {
            id: row.manager.id,
            user: row.user,
        }
    }
}

#[derive(Clone)]
pub struct ManagerService {
    users: Arc<dyn UserRepository>,
    todos: Arc<dyn TodoRepository>,
    managers: Arc<dyn ManagerRepository>,
}

impl ManagerService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        todos: Arc<dyn TodoRepository>,
        managers: Arc<dyn ManagerRepository>,
    ) -> Self {
        Self {
            users,
            todos,
            managers,
        }
    }

    /// Registers `manager_user_id` as a manager of the todo
    ///
    /// # Errors
    ///
    /// - `NotFound` if the todo or the manager user does not exist
    /// - `InvalidRequest` if the caller is not the todo's owner or the
    ///   owner tries to register themselves
    pub async fn save_manager(
        &self,
        auth_user: &AuthUser,
        todo_id: i64,
        manager_user_id: i64,
    ) -> ServiceResult<ManagerResponse> {
        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TODO_NOT_FOUND))?;

        let owner = self
            .users
            .find_by_id(todo.user_id)
            .await?
            .filter(|owner| owner.id == auth_user.id)
            .ok_or_else(|| ServiceError::invalid(SAVE_OWNER_INVALID))?;

        let manager_user = self
            .users
            .find_by_id(manager_user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(MANAGER_USER_NOT_FOUND))?;

        if manager_user.id == owner.id {
            return Err(ServiceError::invalid(SELF_ASSIGNMENT));
        }

        let manager = self
            .managers
            .create(CreateManager {
                user_id: manager_user.id,
                todo_id: todo.id,
            })
            .await?;

        info!(
            manager_id = manager.id,
            todo_id = todo.id,
            manager_user_id = manager_user.id,
            "Manager registered"
        );

        Ok(ManagerResponse {
            id: manager.id,
            user: UserSummary::from(&manager_user),
        })
    }

    pub async fn get_managers(&self, todo_id: i64) -> ServiceResult<Vec<ManagerResponse>> {
        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TODO_NOT_FOUND))?;

        let managers = self.managers.find_by_todo_id_with_user(todo.id).await?;
        Ok(managers.into_iter().map(ManagerResponse::from).collect())
    }

    /// Removes a manager from a todo on behalf of `user_id`
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user, todo or manager does not exist
    /// - `InvalidRequest` if `user_id` is not the todo's owner or the manager
    ///   belongs to another todo
    pub async fn delete_manager(
        &self,
        user_id: i64,
        todo_id: i64,
        manager_id: i64,
    ) -> ServiceResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(USER_NOT_FOUND))?;

        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TODO_NOT_FOUND))?;

        let owner = self.users.find_by_id(todo.user_id).await?;
        if owner.map(|o| o.id) != Some(user.id) {
            return Err(ServiceError::invalid(DELETE_OWNER_INVALID));
        }

        let manager = self
            .managers
            .find_by_id(manager_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(MANAGER_NOT_FOUND))?;

        if manager.todo_id != todo.id {
            return Err(ServiceError::invalid(MANAGER_TODO_MISMATCH));
        }

        self.managers.delete(manager.id).await?;

        info!(manager_id = manager.id, todo_id = todo.id, user_id = user.id, "Manager removed");
        Ok(())
    }
}
