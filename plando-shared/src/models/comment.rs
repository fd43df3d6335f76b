/// Comment model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id BIGSERIAL PRIMARY KEY,
///     contents TEXT NOT NULL,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     todo_id BIGINT NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// Comment row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub contents: String,

    /// Author
    pub user_id: i64,

    /// Todo the comment belongs to
    pub todo_id: i64,

    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Input for creating a comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub contents: String,
    pub user_id: i64,
    pub todo_id: i64,
}

/// Comment joined with its author
#[derive(Debug, Clone)]
pub struct CommentWithUser {
    pub comment: Comment,
    pub user: UserSummary,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentUserRow {
    pub id: i64,
    pub contents: String,
    pub user_id: i64,
    pub todo_id: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub user_email: String,
}

impl From<CommentUserRow> for CommentWithUser {
    fn from(row: CommentUserRow) -> Self {
        Self {
            user: UserSummary {
                id: row.user_id,
                email: row.user_email,
            },
            comment: Comment {
                id: row.id,
                contents: row.contents,
                user_id: row.user_id,
                todo_id: row.todo_id,
                created_at: row.created_at,
                modified_at: row.modified_at,
            },
        }
    }
}
