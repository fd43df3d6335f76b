/// Database models for Plando
///
/// Plain row types plus the joined views the services ask for explicitly.
/// Associations are foreign-key fields; loading the related user is always a
/// separate repository call or an explicit `*_with_user` query.
///
/// # Models
///
/// - `user`: User accounts and the `UserRole` enum
/// - `todo`: Todos owned by a user
/// - `manager`: Users delegated to a todo
/// - `comment`: Comments on a todo

pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;

pub use comment::{Comment, CommentWithUser, CreateComment};
pub use manager::{CreateManager, Manager, ManagerWithUser};
pub use todo::{CreateTodo, Todo, TodoWithUser};
pub use user::{CreateUser, InvalidUserRole, User, UserRole, UserSummary};
