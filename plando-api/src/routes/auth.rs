/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/signup` - Register a new account
/// - `POST /v1/auth/signin` - Exchange credentials for a token
///
/// Both answer with `{ "bearer_token": "Bearer eyJ..." }`; the value is sent
/// back verbatim in the `Authorization` header.

use super::not_blank;
use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub email: String,

    #[validate(custom(function = "not_blank"))]
    pub password: String,

    /// `USER` or `ADMIN`, case-insensitive
    #[validate(custom(function = "not_blank"))]
    pub user_role: String,
}

/// Signin request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub email: String,

    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

/// Token response shared by signup and signin
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub bearer_token: String,
}

/// Signup endpoint
///
/// ```text
/// POST /v1/auth/signup
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "Password1", "user_role": "USER" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Email already registered or unknown role
/// - `422 Unprocessable Entity`: Validation failed
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let bearer_token = state
        .services
        .auth
        .signup(&req.email, &req.password, &req.user_role)
        .await?;

    Ok(Json(TokenResponse { bearer_token }))
}

/// Signin endpoint
///
/// ```text
/// POST /v1/auth/signin
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "Password1" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Wrong password
/// - `404 Not Found`: No account for the email
/// - `422 Unprocessable Entity`: Validation failed
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let bearer_token = state.services.auth.signin(&req.email, &req.password).await?;

    Ok(Json(TokenResponse { bearer_token }))
}
