/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Signup and signin
/// - `users`: Own profile and password
/// - `todos`: Todo creation and listing
/// - `managers`: Todo manager assignment
/// - `comments`: Comments on todos
/// - `admin`: Role changes and comment moderation

pub mod admin;
pub mod auth;
pub mod comments;
pub mod health;
pub mod managers;
pub mod todos;
pub mod users;

use std::borrow::Cow;
use validator::ValidationError;

/// Rejects empty and whitespace-only strings
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("must not be blank"));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("todo").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("  \t").is_err());
    }
}
