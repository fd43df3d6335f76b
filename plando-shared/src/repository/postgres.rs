/// PostgreSQL repositories
///
/// Raw `sqlx::query_as` against the tables created by `migrations/`.
/// Joined lookups alias the user columns (`user_email`) and decode into the
/// flat `*UserRow` types from `models`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{
    CommentRepository, ManagerRepository, Page, RepoResult, TodoRepository, UserRepository,
};
use crate::models::{
    comment::CommentUserRow, manager::ManagerUserRow, todo::TodoUserRow, Comment,
    CommentWithUser, CreateComment, CreateManager, CreateTodo, CreateUser, Manager,
    ManagerWithUser, Todo, TodoWithUser, User, UserRole,
};

const USER_COLUMNS: &str = "id, email, password, user_role, created_at, modified_at";

const TODO_WITH_USER_SELECT: &str = r#"
    SELECT t.id, t.title, t.contents, t.weather, t.user_id,
           t.created_at, t.modified_at, u.email AS user_email
    FROM todos t
    JOIN users u ON u.id = t.user_id
"#;

/// Store implementing every repository trait over one pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create(&self, input: CreateUser) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password, user_role) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(input.email)
        .bind(input.password)
        .bind(input.user_role)
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password = $2, modified_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_role(&self, id: i64, role: UserRole) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_role = $2, modified_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(role)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TodoRepository for PgStore {
    async fn create(&self, input: CreateTodo) -> RepoResult<Todo> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, contents, weather, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, contents, weather, user_id, created_at, modified_at
            "#,
        )
        .bind(input.title)
        .bind(input.contents)
        .bind(input.weather)
        .bind(input.user_id)
        .fetch_one(&self.pool)
        .await?;

        debug!(todo_id = todo.id, user_id = todo.user_id, "Inserted todo");
        Ok(todo)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, contents, weather, user_id, created_at, modified_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn find_by_id_with_user(&self, id: i64) -> RepoResult<Option<TodoWithUser>> {
        let row = sqlx::query_as::<_, TodoUserRow>(&format!(
            "{} WHERE t.id = $1",
            TODO_WITH_USER_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TodoWithUser::from))
    }

    async fn find_page_with_user(&self, offset: i64, limit: i64) -> RepoResult<Page<TodoWithUser>> {
        let rows = sqlx::query_as::<_, TodoUserRow>(&format!(
            "{} ORDER BY t.modified_at DESC, t.id DESC LIMIT $1 OFFSET $2",
            TODO_WITH_USER_SELECT
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page {
            items: rows.into_iter().map(TodoWithUser::from).collect(),
            total,
        })
    }
}

#[async_trait]
impl ManagerRepository for PgStore {
    async fn create(&self, input: CreateManager) -> RepoResult<Manager> {
        let manager = sqlx::query_as::<_, Manager>(
            r#"
            INSERT INTO managers (user_id, todo_id)
            VALUES ($1, $2)
            RETURNING id, user_id, todo_id
            "#,
        )
        .bind(input.user_id)
        .bind(input.todo_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(manager)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Manager>> {
        let manager = sqlx::query_as::<_, Manager>(
            "SELECT id, user_id, todo_id FROM managers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(manager)
    }

    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> RepoResult<Vec<ManagerWithUser>> {
        let rows = sqlx::query_as::<_, ManagerUserRow>(
            r#"
            SELECT m.id, m.user_id, m.todo_id, u.email AS user_email
            FROM managers m
            JOIN users u ON u.id = m.user_id
            WHERE m.todo_id = $1
            ORDER BY m.id
            "#,
        )
        .bind(todo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ManagerWithUser::from).collect())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM managers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentRepository for PgStore {
    async fn create(&self, input: CreateComment) -> RepoResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (contents, user_id, todo_id)
            VALUES ($1, $2, $3)
            RETURNING id, contents, user_id, todo_id, created_at, modified_at
            "#,
        )
        .bind(input.contents)
        .bind(input.user_id)
        .bind(input.todo_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> RepoResult<Vec<CommentWithUser>> {
        let rows = sqlx::query_as::<_, CommentUserRow>(
            r#"
            SELECT c.id, c.contents, c.user_id, c.todo_id, c.created_at, c.modified_at,
                   u.email AS user_email
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.todo_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(todo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentWithUser::from).collect())
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
