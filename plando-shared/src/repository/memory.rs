/// In-memory repositories (for development/testing)
///
/// All four tables live behind one `RwLock` so joins see a consistent
/// snapshot. Unique and foreign key constraints from the SQL schema are
/// mirrored and reported as `RepositoryError::Conflict` with the same
/// constraint names PostgreSQL would use.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{
    CommentRepository, ManagerRepository, Page, RepoResult, RepositoryError, TodoRepository,
    UserRepository,
};
use crate::models::{
    Comment, CommentWithUser, CreateComment, CreateManager, CreateTodo, CreateUser, Manager,
    ManagerWithUser, Todo, TodoWithUser, User, UserRole, UserSummary,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    todos: BTreeMap<i64, Todo>,
    managers: BTreeMap<i64, Manager>,
    comments: BTreeMap<i64, Comment>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn summary(&self, user_id: i64) -> Option<UserSummary> {
        self.users.get(&user_id).map(UserSummary::from)
    }

    fn require_user(&self, user_id: i64, constraint: &str) -> RepoResult<()> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(RepositoryError::Conflict(constraint.to_string()))
        }
    }

    fn require_todo(&self, todo_id: i64, constraint: &str) -> RepoResult<()> {
        if self.todos.contains_key(&todo_id) {
            Ok(())
        } else {
            Err(RepositoryError::Conflict(constraint.to_string()))
        }
    }
}

/// Shared in-memory store; clones share the same tables
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, input: CreateUser) -> RepoResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == input.email) {
            return Err(RepositoryError::Conflict("users_email_key".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            email: input.email,
            password: input.password,
            user_role: input.user_role,
            created_at: now,
            modified_at: now,
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&id) {
            Some(user) => {
                user.password = password_hash.to_string();
                user.modified_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn update_role(&self, id: i64, role: UserRole) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&id) {
            Some(user) => {
                user.user_role = role;
                user.modified_at = Utc::now();
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn create(&self, input: CreateTodo) -> RepoResult<Todo> {
        let mut tables = self.tables.write().await;
        tables.require_user(input.user_id, "todos_user_id_fkey")?;

        let now = Utc::now();
        let todo = Todo {
            id: tables.next_id(),
            title: input.title,
            contents: input.contents,
            weather: input.weather,
            user_id: input.user_id,
            created_at: now,
            modified_at: now,
        };
        tables.todos.insert(todo.id, todo.clone());

        Ok(todo)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Todo>> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn find_by_id_with_user(&self, id: i64) -> RepoResult<Option<TodoWithUser>> {
        let tables = self.tables.read().await;
        let joined = tables.todos.get(&id).and_then(|todo| {
            tables.summary(todo.user_id).map(|user| TodoWithUser {
                todo: todo.clone(),
                user,
            })
        });

        Ok(joined)
    }

    async fn find_page_with_user(&self, offset: i64, limit: i64) -> RepoResult<Page<TodoWithUser>> {
        let tables = self.tables.read().await;

        let mut todos: Vec<&Todo> = tables.todos.values().collect();
        todos.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let items = todos
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .filter_map(|todo| {
                tables.summary(todo.user_id).map(|user| TodoWithUser {
                    todo: todo.clone(),
                    user,
                })
            })
            .collect();

        Ok(Page {
            items,
            total: tables.todos.len() as i64,
        })
    }
}

#[async_trait]
impl ManagerRepository for MemoryStore {
    async fn create(&self, input: CreateManager) -> RepoResult<Manager> {
        let mut tables = self.tables.write().await;
        tables.require_user(input.user_id, "managers_user_id_fkey")?;
        tables.require_todo(input.todo_id, "managers_todo_id_fkey")?;

        let manager = Manager {
            id: tables.next_id(),
            user_id: input.user_id,
            todo_id: input.todo_id,
        };
        tables.managers.insert(manager.id, manager.clone());

        Ok(manager)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Manager>> {
        Ok(self.tables.read().await.managers.get(&id).cloned())
    }

    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> RepoResult<Vec<ManagerWithUser>> {
        let tables = self.tables.read().await;
        let managers = tables
            .managers
            .values()
            .filter(|m| m.todo_id == todo_id)
            .filter_map(|m| {
                tables.summary(m.user_id).map(|user| ManagerWithUser {
                    manager: m.clone(),
                    user,
                })
            })
            .collect();

        Ok(managers)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.write().await.managers.remove(&id).is_some())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, input: CreateComment) -> RepoResult<Comment> {
        let mut tables = self.tables.write().await;
        tables.require_user(input.user_id, "comments_user_id_fkey")?;
        tables.require_todo(input.todo_id, "comments_todo_id_fkey")?;

        let now = Utc::now();
        let comment = Comment {
            id: tables.next_id(),
            contents: input.contents,
            user_id: input.user_id,
            todo_id: input.todo_id,
            created_at: now,
            modified_at: now,
        };
        tables.comments.insert(comment.id, comment.clone());

        Ok(comment)
    }

    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> RepoResult<Vec<CommentWithUser>> {
        let tables = self.tables.read().await;
        let comments = tables
            .comments
            .values()
            .filter(|c| c.todo_id == todo_id)
            .filter_map(|c| {
                tables.summary(c.user_id).map(|user| CommentWithUser {
                    comment: c.clone(),
                    user,
                })
            })
            .collect();

        Ok(comments)
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }
}
