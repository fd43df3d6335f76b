/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use plando_api::{app::{build_router, AppState}, config::Config};
/// use plando_shared::{
///     db::pool::{create_pool, DatabaseConfig},
///     repository::Repositories,
///     weather::HttpWeatherClient,
/// };
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..DatabaseConfig::default()
/// })
/// .await?;
/// let weather = Arc::new(HttpWeatherClient::new(config.weather.url.clone())?);
/// let state = AppState::new(Repositories::postgres(pool), weather, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::tracking::track_time, routes};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use chrono::Duration;
use plando_shared::{
    auth::middleware::{jwt_auth_middleware, require_admin, AuthError},
    repository::Repositories,
    services::{Services, TokenSettings},
    weather::WeatherClient,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; every
/// field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,

    /// Kept for health checks
    pub repos: Repositories,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repos: Repositories, weather: Arc<dyn WeatherClient>, config: Config) -> Self {
        let tokens = TokenSettings {
            secret: config.jwt.secret.clone(),
            expires_in: Duration::minutes(config.jwt.expiration_minutes),
        };

        Self {
            services: Services::new(&repos, weather, tokens),
            repos,
            config: Arc::new(config),
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /health                              # public
/// └── /v1/
///     ├── /auth/                               # public
///     │   ├── POST /signup
///     │   └── POST /signin
///     ├── /users/                              # JWT
///     │   ├── GET  /:user_id
///     │   └── PUT  /
///     ├── /todos/                              # JWT
///     │   ├── POST /, GET /?page=&size=
///     │   ├── GET  /:todo_id
///     │   ├── POST /:todo_id/managers, GET /:todo_id/managers
///     │   ├── DELETE /:todo_id/managers/:manager_id
///     │   └── POST /:todo_id/comments, GET /:todo_id/comments
///     └── /admin/                              # JWT + ADMIN + tracked
///         ├── PATCH  /users/:user_id
///         └── DELETE /comments/:comment_id
/// ```
///
/// # Middleware Stack
///
/// Outermost first: CORS, request tracing, then per-group authentication,
/// the admin gate and execution tracking.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/signin", post(routes::auth::signin));

    let user_routes = Router::new()
        .route("/users", put(routes::users::change_password))
        .route("/users/:user_id", get(routes::users::get_user))
        .route(
            "/todos",
            post(routes::todos::save_todo).get(routes::todos::get_todos),
        )
        .route("/todos/:todo_id", get(routes::todos::get_todo))
        .route(
            "/todos/:todo_id/managers",
            post(routes::managers::save_manager).get(routes::managers::get_managers),
        )
        .route(
            "/todos/:todo_id/managers/:manager_id",
            delete(routes::managers::delete_manager),
        )
        .route(
            "/todos/:todo_id/comments",
            post(routes::comments::save_comment).get(routes::comments::get_comments),
        )
        .layer(middleware::from_fn_with_state(state.clone(), jwt_auth_layer));

    let admin_routes = Router::new()
        .route("/users/:user_id", patch(routes::admin::change_user_role))
        .route("/comments/:comment_id", delete(routes::admin::delete_comment))
        .layer(middleware::from_fn(track_time))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), jwt_auth_layer));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes)
        .merge(user_routes);

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Permissive CORS for `*`, otherwise an explicit origin list
fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Validates the bearer token with the configured secret and injects
/// `AuthUser` into request extensions
async fn jwt_auth_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    jwt_auth_middleware(state.jwt_secret().to_string(), req, next).await
}
