/// Business services
///
/// Services own the rules of the application and nothing else: they take
/// plain arguments, talk to repositories through the traits in
/// [`crate::repository`], and return response types ready to be serialized.
///
/// # Services
///
/// - [`AuthService`]: signup and signin
/// - [`UserService`] / [`UserAdminService`]: profile, password, role changes
/// - [`TodoService`]: todos with a weather snapshot
/// - [`ManagerService`]: delegating todos to other users
/// - [`CommentService`] / [`CommentAdminService`]: comments on todos

pub mod auth;
pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;

use chrono::Duration;
use std::sync::Arc;

use crate::auth::jwt::JwtError;
use crate::auth::password::PasswordError;
use crate::models::InvalidUserRole;
use crate::repository::{Repositories, RepositoryError};
use crate::weather::{WeatherClient, WeatherError};

pub use auth::AuthService;
pub use comment::{CommentAdminService, CommentResponse, CommentService};
pub use manager::{ManagerResponse, ManagerService};
pub use todo::{PageResponse, TodoResponse, TodoService};
pub use user::{UserAdminService, UserResponse, UserService};

/// Error type shared by all services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Business rule violated by the caller
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Credentials did not match
    #[error("{0}")]
    Auth(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl ServiceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ServiceError::InvalidRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}

impl From<InvalidUserRole> for ServiceError {
    fn from(err: InvalidUserRole) -> Self {
        ServiceError::InvalidRequest(err.to_string())
    }
}

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

pub(crate) const USER_NOT_FOUND: &str = "User not found";
pub(crate) const TODO_NOT_FOUND: &str = "Todo not found";

/// Token settings used by [`AuthService`]
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub expires_in: Duration,
}

/// Every service, wired to one set of repositories
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub user_admin: UserAdminService,
    pub todos: TodoService,
    pub managers: ManagerService,
    pub comments: CommentService,
    pub comment_admin: CommentAdminService,
}

impl Services {
    pub fn new(repos: &Repositories, weather: Arc<dyn WeatherClient>, tokens: TokenSettings) -> Self {
        Self {
            auth: AuthService::new(repos.users.clone(), tokens),
            users: UserService::new(repos.users.clone()),
            user_admin: UserAdminService::new(repos.users.clone()),
            todos: TodoService::new(repos.todos.clone(), weather),
            managers: ManagerService::new(
                repos.users.clone(),
                repos.todos.clone(),
                repos.managers.clone(),
            ),
            comments: CommentService::new(repos.todos.clone(), repos.comments.clone()),
            comment_admin: CommentAdminService::new(repos.comments.clone()),
        }
    }
}
