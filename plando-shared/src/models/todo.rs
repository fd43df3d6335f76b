/// Todo model
///
/// A todo is owned by exactly one user and carries the weather observed on
/// the day it was created.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     contents TEXT NOT NULL,
///     weather VARCHAR(255) NOT NULL,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{User, UserSummary};

/// Todo row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub contents: String,

    /// Weather snapshot taken at creation time, stored verbatim
    pub weather: String,

    /// Owner (foreign key to users)
    pub user_id: i64,

    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Input for creating a todo
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: i64,
}

/// Todo joined with its owner
#[derive(Debug, Clone)]
pub struct TodoWithUser {
    pub todo: Todo,
    pub user: UserSummary,
}

/// Flat row produced by `todos JOIN users`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TodoUserRow {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub user_email: String,
}

impl From<TodoUserRow> for TodoWithUser {
    fn from(row: TodoUserRow) -> Self {
        Self {
            user: UserSummary {
                id: row.user_id,
                email: row.user_email,
            },
            todo: Todo {
                id: row.id,
                title: row.title,
                contents: row.contents,
                weather: row.weather,
                user_id: row.user_id,
                created_at: row.created_at,
                modified_at: row.modified_at,
            },
        }
    }
}

impl TodoWithUser {
    pub fn new(todo: Todo, user: &User) -> Self {
        Self {
            todo,
            user: UserSummary::from(user),
        }
    }
}
