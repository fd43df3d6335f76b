/// Manager model
///
/// A manager is a user delegated to a todo by the todo's owner. The owner
/// can never be their own manager.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE managers (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     todo_id BIGINT NOT NULL REFERENCES todos(id) ON DELETE CASCADE
/// );
/// ```

use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// Manager row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Manager {
    pub id: i64,

    /// The delegated user
    pub user_id: i64,

    /// The todo being managed
    pub todo_id: i64,
}

/// Input for assigning a manager
#[derive(Debug, Clone)]
pub struct CreateManager {
    pub user_id: i64,
    pub todo_id: i64,
}

/// Manager joined with the managing user
#[derive(Debug, Clone)]
pub struct ManagerWithUser {
    pub manager: Manager,
    pub user: UserSummary,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ManagerUserRow {
    pub id: i64,
    pub user_id: i64,
    pub todo_id: i64,
    pub user_email: String,
}

impl From<ManagerUserRow> for ManagerWithUser {
    fn from(row: ManagerUserRow) -> Self {
        Self {
            user: UserSummary {
                id: row.user_id,
                email: row.user_email,
            },
            manager: Manager {
                id: row.id,
                user_id: row.user_id,
                todo_id: row.todo_id,
            },
        }
    }
}
