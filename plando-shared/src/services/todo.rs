/// Todo service
///
/// New todos are stamped with the weather of the day they are created.
/// Listing is paginated (1-based) with the most recently modified todo
/// first.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::{ServiceError, ServiceResult, TODO_NOT_FOUND};
use crate::auth::AuthUser;
use crate::models::{CreateTodo, TodoWithUser, UserSummary};
use crate::repository::TodoRepository;
use crate::weather::WeatherClient;

/// Todo as returned to clients, with its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserSummary,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<TodoWithUser> for TodoResponse {
    fn from(row: TodoWithUser) -> Self {
        Self {
            id: row.todo.id,
            title: row.todo.title,
            contents: row.todo.contents,
            weather: row.todo.weather,
            user: row.user,
            created_at: row.todo.created_at,
            modified_at: row.todo.modified_at,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,

    /// 1-based page number that was requested
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn new(content: Vec<T>, page: i64, size: i64, total_elements: i64) -> Self {
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages: page_count(total_elements, size),
        }
    }
}

/// Number of pages needed for `total` rows; a non-positive `size` yields 0
fn page_count(total: i64, size: i64) -> i64 {
    if total <= 0 || size <= 0 {
        0
    } else {
        (total - 1) / size + 1
    }
}

/// Largest page size `get_todos` accepts
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct TodoService {
    todos: Arc<dyn TodoRepository>,
    weather: Arc<dyn WeatherClient>,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoRepository>, weather: Arc<dyn WeatherClient>) -> Self {
        Self { todos, weather }
    }

    /// Creates a todo owned by the caller
    ///
    /// # Errors
    ///
    /// `Weather` if today's weather cannot be fetched; nothing is stored then.
    pub async fn save_todo(
        &self,
        auth_user: &AuthUser,
        title: &str,
        contents: &str,
    ) -> ServiceResult<TodoResponse> {
        let weather = self.weather.get_today_weather().await?;

        let todo = self
            .todos
            .create(CreateTodo {
                title: title.to_string(),
                contents: contents.to_string(),
                weather,
                user_id: auth_user.id,
            })
            .await?;

        info!(todo_id = todo.id, user_id = auth_user.id, "Todo created");

        let user = UserSummary {
            id: auth_user.id,
            email: auth_user.email.clone(),
        };
        Ok(TodoResponse::from(TodoWithUser { todo, user }))
    }

    /// Lists todos, most recently modified first
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if `page` or `size` is below 1, or `size` exceeds
    /// [`MAX_PAGE_SIZE`].
    pub async fn get_todos(&self, page: i64, size: i64) -> ServiceResult<PageResponse<TodoResponse>> {
        if page < 1 || size < 1 {
            return Err(ServiceError::invalid(
                "page와 size는 1 이상이어야 합니다.",
            ));
        }

        if size > MAX_PAGE_SIZE {
            return Err(ServiceError::invalid(format!(
                "size는 {} 이하여야 합니다.",
                MAX_PAGE_SIZE
            )));
        }

        let offset = (page - 1).saturating_mul(size);
        let result = self.todos.find_page_with_user(offset, size).await?;

        Ok(PageResponse::new(
            result.items.into_iter().map(TodoResponse::from).collect(),
            page,
            size,
            result.total,
        ))
    }

    pub async fn get_todo(&self, todo_id: i64) -> ServiceResult<TodoResponse> {
        let todo = self
            .todos
            .find_by_id_with_user(todo_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TODO_NOT_FOUND))?;

        Ok(TodoResponse::from(todo))
    }
}
