/// Signup and signin
///
/// Both operations answer with a bearer token (`"Bearer <jwt>"`) carrying
/// the user's id, email and role.

use std::sync::Arc;
use tracing::info;

use super::{ServiceError, ServiceResult, TokenSettings};
use crate::auth::jwt::{create_bearer_token, Claims};
use crate::auth::password::{hash_password, verify_password};
use crate::models::{CreateUser, User, UserRole};
use crate::repository::{RepositoryError, UserRepository};

const EMAIL_TAKEN: &str = "이미 존재하는 이메일입니다.";
const UNKNOWN_EMAIL: &str = "가입되지 않은 유저입니다.";
const WRONG_PASSWORD: &str = "잘못된 비밀번호입니다.";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenSettings,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenSettings) -> Self {
        Self { users, tokens }
    }

    /// Registers a new account and returns its bearer token
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the email is taken or the role is unknown.
    pub async fn signup(&self, email: &str, password: &str, user_role: &str) -> ServiceResult<String> {
        if self.users.exists_by_email(email).await? {
            return Err(ServiceError::invalid(EMAIL_TAKEN));
        }

        let user_role: UserRole = user_role.parse()?;

        let user = self
            .users
            .create(CreateUser {
                email: email.to_string(),
                password: hash_password(password)?,
                user_role,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => ServiceError::invalid(EMAIL_TAKEN),
                other => ServiceError::Repository(other),
            })?;

        info!(user_id = user.id, role = %user.user_role, "User signed up");
        self.issue_token(&user)
    }

    /// Checks credentials and returns a fresh bearer token
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown email, `Auth` for a wrong password.
    pub async fn signin(&self, email: &str, password: &str) -> ServiceResult<String> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::not_found(UNKNOWN_EMAIL))?;

        if !verify_password(password, &user.password)? {
            return Err(ServiceError::Auth(WRONG_PASSWORD.to_string()));
        }

        info!(user_id = user.id, "User signed in");
        self.issue_token(&user)
    }

    fn issue_token(&self, user: &User) -> ServiceResult<String> {
        let claims = Claims::new(user.id, &user.email, user.user_role, self.tokens.expires_in);
        Ok(create_bearer_token(&claims, &self.tokens.secret)?)
    }
}
