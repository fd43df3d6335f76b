/// JWT token generation and validation
///
/// Tokens are HS256-signed and handed to clients with a `"Bearer "` prefix.
/// Besides the registered claims they carry the user's email and role so the
/// authentication middleware can build an [`AuthUser`](super::AuthUser)
/// without touching the database.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use plando_shared::auth::jwt::{create_token, validate_token, Claims};
/// use plando_shared::models::UserRole;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "your-secret-key-at-least-32-bytes-long";
/// let claims = Claims::new(7, "user@example.com", UserRole::Admin, Duration::minutes(60));
///
/// let token = create_token(&claims, secret)?;
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.user_id()?, 7);
/// assert_eq!(validated.user_role, UserRole::Admin);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::UserRole;

/// Issuer written into and required from every token
pub const ISSUER: &str = "plando";

/// Prefix of the `Authorization` header value and of issued tokens
pub const BEARER_PREFIX: &str = "Bearer ";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, issuer or claim validation failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Not a `Bearer <token>` value
    #[error("Invalid token format: {0}")]
    InvalidFormat(String),
}

/// JWT claims
///
/// `sub` holds the user id in decimal form, as registered claims are strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: String,

    pub email: String,

    pub user_role: UserRole,

    /// Issuer - always [`ISSUER`]
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Creates claims valid from now for `expires_in`
    pub fn new(user_id: i64, email: &str, user_role: UserRole, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            user_role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Parses the subject back into a user id
    ///
    /// # Errors
    ///
    /// Returns `JwtError::ValidationError` if `sub` is not an integer.
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::ValidationError(format!("Invalid subject: {}", self.sub)))
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims with HS256
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Signs claims and prepends [`BEARER_PREFIX`]
pub fn create_bearer_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    Ok(format!("{}{}", BEARER_PREFIX, create_token(claims, secret)?))
}

/// Validates signature, expiry, not-before and issuer, then returns the claims
///
/// # Errors
///
/// Returns `JwtError::Expired` for expired tokens and
/// `JwtError::ValidationError` for anything else that fails.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

/// Strips [`BEARER_PREFIX`] from a header value
///
/// # Errors
///
/// Returns `JwtError::InvalidFormat` if the prefix is missing or nothing
/// follows it.
pub fn strip_bearer(value: &str) -> Result<&str, JwtError> {
    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(JwtError::InvalidFormat("Expected Bearer token".to_string())),
    }
}

/// [`strip_bearer`] followed by [`validate_token`]
pub fn validate_bearer(value: &str, secret: &str) -> Result<Claims, JwtError> {
    validate_token(strip_bearer(value)?, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(42, "a@a.com", UserRole::User, Duration::minutes(60));

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_validate_bearer() {
        let claims = Claims::new(1, "a@a.com", UserRole::Admin, Duration::minutes(60));
        let bearer = create_bearer_token(&claims, SECRET).expect("Should create token");
        assert!(bearer.starts_with("Bearer "));

        let validated = validate_bearer(&bearer, SECRET).expect("Should validate token");
        assert_eq!(validated.user_id().unwrap(), 1);
        assert_eq!(validated.email, "a@a.com");
        assert_eq!(validated.user_role, UserRole::Admin);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::new(1, "a@a.com", UserRole::User, Duration::minutes(60));
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, "another-secret-key-at-least-32-bytes");
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = Claims::new(1, "a@a.com", UserRole::User, Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_foreign_issuer() {
        let mut claims = Claims::new(1, "a@a.com", UserRole::User, Duration::minutes(60));
        claims.iss = "someone-else".to_string();
        let token = create_token(&claims, SECRET).unwrap();

        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_strip_bearer() {
        assert_eq!(strip_bearer("Bearer abc.def").unwrap(), "abc.def");
        assert!(matches!(strip_bearer("abc.def"), Err(JwtError::InvalidFormat(_))));
        assert!(matches!(strip_bearer("Basic xyz"), Err(JwtError::InvalidFormat(_))));
        assert!(matches!(strip_bearer("Bearer "), Err(JwtError::InvalidFormat(_))));
    }

    #[test]
    fn test_non_numeric_subject() {
        let mut claims = Claims::new(1, "a@a.com", UserRole::User, Duration::minutes(60));
        claims.sub = "not-a-number".to_string();
        assert!(claims.user_id().is_err());
    }
}
