/// Comment services

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::{ServiceError, ServiceResult, TODO_NOT_FOUND};
use crate::auth::AuthUser;
use crate::models::{CommentWithUser, CreateComment, UserSummary};
use crate::repository::{CommentRepository, TodoRepository};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub contents: String,
    pub user: UserSummary,
}

impl From<CommentWithUser> for CommentResponse {
    fn from(row: CommentWithUser) -> Self {
        Self {
            id: row.comment.id,
            contents: row.comment.contents,
            user: row.user,
        }
    }
}

#[derive(Clone)]
pub struct CommentService {
    todos: Arc<dyn TodoRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(todos: Arc<dyn TodoRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { todos, comments }
    }

    pub async fn save_comment(
        &self,
        auth_user: &AuthUser,
        todo_id: i64,
        contents: &str,
    ) -> ServiceResult<CommentResponse> {
        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TODO_NOT_FOUND))?;

        let comment = self
            .comments
            .create(CreateComment {
                contents: contents.to_string(),
                user_id: auth_user.id,
                todo_id: todo.id,
            })
            .await?;

        info!(comment_id = comment.id, todo_id = todo.id, user_id = auth_user.id, "Comment created");

        Ok(CommentResponse {
            id: comment.id,
            contents: comment.contents,
            user: UserSummary {
                id: auth_user.id,
                email: auth_user.email.clone(),
            },
        })
    }

    /// Comments of a todo in creation order; an unknown todo has none
    pub async fn get_comments(&self, todo_id: i64) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.comments.find_by_todo_id_with_user(todo_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }
}

#[derive(Clone)]
pub struct CommentAdminService {
    comments: Arc<dyn CommentRepository>,
}

impl CommentAdminService {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }

    /// Deletes a comment by id; deleting a missing comment succeeds
    pub async fn delete_comment(&self, comment_id: i64) -> ServiceResult<()> {
        if self.comments.delete_by_id(comment_id).await? {
            info!(comment_id, "Comment deleted");
        } else {
            debug!(comment_id, "Comment to delete did not exist");
        }

        Ok(())
    }
}
