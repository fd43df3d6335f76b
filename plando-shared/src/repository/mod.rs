/// Persistence layer
///
/// One async trait per aggregate. Services only ever see these traits, so the
/// same business rules run against PostgreSQL in production and against the
/// in-memory store in tests.
///
/// Joins are explicit: `find_by_id` never loads the owner, the `*_with_user`
/// methods always do.
///
/// # Example
///
/// ```no_run
/// use plando_shared::repository::Repositories;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let repos = Repositories::postgres(pool);
/// let user = repos.users.find_by_email("user@example.com").await?;
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::models::{
    Comment, CommentWithUser, CreateComment, CreateManager, CreateTodo, CreateUser, Manager,
    ManagerWithUser, Todo, TodoWithUser, User, UserRole,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Unique or foreign key constraint violated
    #[error("Constraint violation: {0}")]
    Conflict(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if let Some(constraint) = db_err.constraint() {
                return RepositoryError::Conflict(constraint.to_string());
            }
        }
        RepositoryError::Database(err)
    }
}

/// Repository result type alias
pub type RepoResult<T> = Result<T, RepositoryError>;

/// A page of rows plus the total number of rows across all pages
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `Conflict` when the email is taken.
    async fn create(&self, input: CreateUser) -> RepoResult<User>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> RepoResult<bool>;

    /// Replaces the stored password hash. Returns false if the user is gone.
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<bool>;

    /// Overwrites the role. Returns false if the user is gone.
    async fn update_role(&self, id: i64, role: UserRole) -> RepoResult<bool>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn create(&self, input: CreateTodo) -> RepoResult<Todo>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Todo>>;

    /// Loads the todo together with its owner in one query
    async fn find_by_id_with_user(&self, id: i64) -> RepoResult<Option<TodoWithUser>>;

    /// Most recently modified first, ties broken by id descending
    async fn find_page_with_user(&self, offset: i64, limit: i64) -> RepoResult<Page<TodoWithUser>>;
}

#[async_trait]
pub trait ManagerRepository: Send + Sync {
    async fn create(&self, input: CreateManager) -> RepoResult<Manager>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Manager>>;

    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> RepoResult<Vec<ManagerWithUser>>;

    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, input: CreateComment) -> RepoResult<Comment>;

    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> RepoResult<Vec<CommentWithUser>>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> RepoResult<bool>;
}

/// Bundle of repository handles shared by all services
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub todos: Arc<dyn TodoRepository>,
    pub managers: Arc<dyn ManagerRepository>,
    pub comments: Arc<dyn CommentRepository>,

    /// Present when backed by PostgreSQL, used for health checks
    pool: Option<PgPool>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            users: store.clone(),
            todos: store.clone(),
            managers: store.clone(),
            comments: store,
            pool: Some(pool),
        }
    }

    /// Repositories backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::memory(MemoryStore::new())
    }

    /// Repositories sharing an existing in-memory store
    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            todos: store.clone(),
            managers: store.clone(),
            comments: store,
            pool: None,
        }
    }

    /// Returns the underlying pool, if any
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Checks that the backing store answers
    pub async fn ping(&self) -> bool {
        match &self.pool {
            Some(pool) => crate::db::pool::health_check(pool).await.is_ok(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_database_error() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    #[tokio::test]
    async fn test_in_memory_ping() {
        let repos = Repositories::in_memory();
        assert!(repos.ping().await);
        assert!(repos.pool().is_none());
    }
}
