/// Authentication middleware for Axum
///
/// [`jwt_auth_middleware`] reads `Authorization: Bearer <token>`, validates
/// the token and inserts an [`AuthUser`] into the request extensions.
/// [`require_admin`] runs after it on admin-only routes.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use plando_shared::auth::middleware::{jwt_auth_middleware, AuthUser};
///
/// async fn me(Extension(user): Extension<AuthUser>) -> String {
///     format!("Hello, {}!", user.email)
/// }
///
/// let secret = "a-secret-key-that-is-at-least-32-bytes".to_string();
/// let app: Router = Router::new()
///     .route("/me", get(me))
///     .layer(middleware::from_fn(
///         move |req: axum::extract::Request, next: middleware::Next| {
///             jwt_auth_middleware(secret.clone(), req, next)
///         },
///     ));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::jwt::{strip_bearer, validate_token, Claims, JwtError};
use crate::models::UserRole;

/// Authenticated caller, added to request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub user_role: UserRole,
}

impl AuthUser {
    pub fn new(id: i64, email: impl Into<String>, user_role: UserRole) -> Self {
        Self {
            id,
            email: email.into(),
            user_role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email,
            user_role: claims.user_role,
        })
    }
}

/// Error type for authentication middleware
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    #[error("{0}")]
    InvalidFormat(String),

    /// Signature, issuer or expiry check failed
    #[error("{0}")]
    InvalidToken(String),

    /// Authenticated but not allowed
    #[error("관리자 권한이 없습니다.")]
    Forbidden,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials | AuthError::InvalidToken(_) => "unauthorized",
            AuthError::InvalidFormat(_) => "bad_request",
            AuthError::Forbidden => "forbidden",
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidFormat(msg) => AuthError::InvalidFormat(msg),
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            other => AuthError::InvalidToken(format!("Invalid token: {}", other)),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });

        (self.status_code(), Json(body)).into_response()
    }
}

/// Extracts and validates the caller from the `Authorization` header
pub fn authenticate(req: &Request, secret: &str) -> Result<AuthUser, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("Authorization header is not valid ASCII".to_string()))?;

    let token = strip_bearer(value)?;
    let claims = validate_token(token, secret)?;

    Ok(AuthUser::try_from(claims)?)
}

/// JWT authentication middleware
///
/// # Errors
///
/// - 401 when the header is missing or the token is invalid or expired
/// - 400 when the header is not a bearer token
pub async fn jwt_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_user = authenticate(&req, &secret)?;
    debug!(user_id = auth_user.id, role = %auth_user.user_role, "Authenticated request");

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

/// Rejects callers that are not administrators
///
/// Must be layered inside [`jwt_auth_middleware`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    let auth_user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or(AuthError::MissingCredentials)?;

    if !auth_user.is_admin() {
        debug!(user_id = auth_user.id, "Rejected non-admin caller");
        return Err(AuthError::Forbidden);
    }

    Ok(next.run(req).await)
}
