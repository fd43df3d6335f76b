/// Account services
///
/// [`UserService`] serves the caller's own account; [`UserAdminService`]
/// holds the operations reserved for administrators.

use std::sync::Arc;
use tracing::info;

use super::{ServiceError, ServiceResult, USER_NOT_FOUND};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::models::{UserRole, UserSummary};
use crate::repository::UserRepository;

const SAME_PASSWORD: &str = "새 비밀번호는 기존 비밀번호와 같을 수 없습니다.";
const WRONG_PASSWORD: &str = "잘못된 비밀번호입니다.";

/// Public view of a user
pub type UserResponse = UserSummary;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn get_user(&self, user_id: i64) -> ServiceResult<UserResponse> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(USER_NOT_FOUND))?;

        Ok(UserResponse::from(&user))
    }

    /// Replaces the password after checking the old one
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the new password fails the policy, equals the
    ///   current one, or the old password does not match
    /// - `NotFound` if the user does not exist
    pub async fn change_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> ServiceResult<()> {
        validate_password_strength(new_password).map_err(ServiceError::invalid)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(USER_NOT_FOUND))?;

        if verify_password(new_password, &user.password)? {
            return Err(ServiceError::invalid(SAME_PASSWORD));
        }

        if !verify_password(old_password, &user.password)? {
            return Err(ServiceError::invalid(WRONG_PASSWORD));
        }

        let password_hash = hash_password(new_password)?;
        if !self.users.update_password(user.id, &password_hash).await? {
            return Err(ServiceError::not_found(USER_NOT_FOUND));
        }

        info!(user_id = user.id, "Password changed");
        Ok(())
    }
}

#[derive(Clone)]
pub struct UserAdminService {
    users: Arc<dyn UserRepository>,
}

impl UserAdminService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Overwrites a user's role
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for an unknown role, `NotFound` for an unknown user.
    pub async fn change_user_role(&self, user_id: i64, user_role: &str) -> ServiceResult<()> {
        let role: UserRole = user_role.parse()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(USER_NOT_FOUND))?;

        if !self.users.update_role(user.id, role).await? {
            return Err(ServiceError::not_found(USER_NOT_FOUND));
        }

        info!(user_id = user.id, from = %user.user_role, to = %role, "User role changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::PASSWORD_POLICY_MESSAGE;
    use crate::repository::Repositories;
    use crate::services::test_support::{insert_user, services};

    #[tokio::test]
    async fn test_get_user() {
        let repos = Repositories::in_memory();
        let user = insert_user(&repos, "a@a.com", "Password1").await;

        let response = services(&repos).users.get_user(user.id).await.unwrap();
        assert_eq!(response.id, user.id);
        assert_eq!(response.email, "a@a.com");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let repos = Repositories::in_memory();

        let err = services(&repos).users.get_user(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == USER_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let repos = Repositories::in_memory();
        let user = insert_user(&repos, "a@a.com", "OldPassword1").await;
        let users = services(&repos).users;

        users
            .change_password(user.id, "OldPassword1", "NewPassword1")
            .await
            .unwrap();

        let stored = repos.users.find_by_id(user.id).await.unwrap().unwrap();
        assert!(verify_password("NewPassword1", &stored.password).unwrap());
        assert!(!verify_password("OldPassword1", &stored.password).unwrap());
    }

    #[tokio::test]
    async fn test_change_password_user_not_found() {
        let repos = Repositories::in_memory();

        let err = services(&repos)
            .users
            .change_password(1, "OldPassword1", "NewPassword1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_change_password_same_as_current() {
        let repos = Repositories::in_memory();
        let user = insert_user(&repos, "a@a.com", "NewPassword1").await;

        let err = services(&repos)
            .users
            .change_password(user.id, "NewPassword1", "NewPassword1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(ref m) if m == SAME_PASSWORD));
    }

    #[tokio::test]
    async fn test_change_password_wrong_old_password() {
        let repos = Repositories::in_memory();
        let user = insert_user(&repos, "a@a.com", "OldPassword1").await;

        let err = services(&repos)
            .users
            .change_password(user.id, "Mistyped1", "NewPassword1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(ref m) if m == WRONG_PASSWORD));
    }

    #[tokio::test]
    async fn test_change_password_weak_new_password_checked_first() {
        let repos = Repositories::in_memory();

        let err = services(&repos)
            .users
            .change_password(999, "OldPassword1", "weak")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(ref m) if m == PASSWORD_POLICY_MESSAGE));
    }

    #[tokio::test]
    async fn test_change_user_role() {
        let repos = Repositories::in_memory();
        let user = insert_user(&repos, "a@a.com", "Password1").await;

        services(&repos)
            .user_admin
            .change_user_role(user.id, "ADMIN")
            .await
            .unwrap();

        let stored = repos.users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.user_role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_change_user_role_errors() {
        let repos = Repositories::in_memory();
        let user = insert_user(&repos, "a@a.com", "Password1").await;
        let admin = services(&repos).user_admin;

        let err = admin.change_user_role(user.id, "ROOT").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));

        let err = admin.change_user_role(user.id + 100, "ADMIN").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == USER_NOT_FOUND));
    }
}
