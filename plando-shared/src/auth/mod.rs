/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and the password policy
/// - [`jwt`]: Bearer token issuing and validation
/// - [`middleware`]: Axum middleware that authenticates requests and gates
///   admin-only routes
///
/// # Example
///
/// ```no_run
/// use plando_shared::auth::jwt::{create_bearer_token, validate_bearer, Claims};
/// use plando_shared::auth::password::{hash_password, verify_password};
/// use plando_shared::models::UserRole;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Password1")?;
/// assert!(verify_password("Password1", &hash)?);
///
/// let secret = "a-secret-key-that-is-at-least-32-bytes";
/// let claims = Claims::new(1, "user@example.com", UserRole::User, chrono::Duration::minutes(60));
/// let bearer = create_bearer_token(&claims, secret)?;
/// let validated = validate_bearer(&bearer, secret)?;
/// assert_eq!(validated.user_id()?, 1);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;

pub use middleware::{AuthError, AuthUser};
