/// User model and role enumeration
///
/// Users sign up with an email/password pair and carry exactly one role.
/// Passwords are stored as Argon2id hashes, never in plaintext.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('USER', 'ADMIN');
///
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password VARCHAR(255) NOT NULL,
///     user_role user_role NOT NULL DEFAULT 'USER',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Regular account: owns todos, comments, manager assignments
    User,

    /// Administrator: may change roles and delete any comment
    Admin,
}

impl UserRole {
    /// Converts role to its wire/storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role string does not name a known role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("유효하지 않은 UserRole")]
pub struct InvalidUserRole;

impl FromStr for UserRole {
    type Err = InvalidUserRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(InvalidUserRole),
        }
    }
}

/// User account row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash (PHC string)
    #[serde(skip_serializing)]
    pub password: String,

    /// Role of the account
    pub user_role: UserRole,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified (password or role change)
    pub modified_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password: String,

    /// Initial role
    pub user_role: UserRole,
}

/// Public view of a user, embedded in most responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}
