/// Execution tracking for admin endpoints
///
/// [`track_time`] wraps a handler and emits exactly one `INFO` event per
/// request with the elapsed time, the authenticated caller, when the request
/// arrived and the full request URL. The event is emitted from a drop guard,
/// so it is written whether the handler succeeds, returns an error response,
/// panics or is cancelled. The response itself is never touched.
///
/// Must run inside the JWT middleware so that [`AuthUser`] is available.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::delete, Router};
/// use plando_api::middleware::tracking::track_time;
///
/// async fn delete_comment() {}
///
/// let admin: Router = Router::new()
///     .route("/comments/:comment_id", delete(delete_comment))
///     .layer(middleware::from_fn(track_time));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Local};
use plando_shared::auth::AuthUser;
use std::time::Instant;
use tracing::info;

/// Drop guard that logs one execution record
#[derive(Debug)]
struct ExecutionTrace {
    started: Instant,
    request_time: DateTime<Local>,
    user_id: Option<i64>,
    request_url: String,
    status: Option<StatusCode>,
}

impl ExecutionTrace {
    fn start(req: &Request) -> Self {
        Self {
            started: Instant::now(),
            request_time: Local::now(),
            user_id: req.extensions().get::<AuthUser>().map(|user| user.id),
            request_url: request_url(req),
            status: None,
        }
    }
}

impl Drop for ExecutionTrace {
    fn drop(&mut self) {
        info!(
            execution_time_ms = self.started.elapsed().as_millis() as u64,
            user_id = self.user_id,
            request_time = %self.request_time.to_rfc3339(),
            request_url = %self.request_url,
            status = self.status.map(|status| status.as_u16()),
            "Admin API request"
        );
    }
}

/// Reconstructs the URL the client asked for: host, path and query string
pub fn request_url(req: &Request) -> String {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().host());

    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| req.uri().path());

    match host {
        Some(host) => format!("{}{}", host, path_and_query),
        None => path_and_query.to_string(),
    }
}

/// Logs execution time of the wrapped handler
pub async fn track_time(req: Request, next: Next) -> Response {
    let mut trace = ExecutionTrace::start(&req);

    let response = next.run(req).await;
    trace.status = Some(response.status());

    response
}
