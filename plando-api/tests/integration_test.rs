/// End-to-end tests for the HTTP API
///
/// Requests go through the complete router, middleware included, backed by
/// the in-memory store.

mod common;

use axum::http::{Method, StatusCode};
use common::{TestContext, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_signup_and_signin() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "user").await;
    assert!(user.token.starts_with("Bearer "));

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/auth/signin",
            None,
            Some(json!({ "email": "user@example.com", "password": PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["bearer_token"].as_str().unwrap().starts_with("Bearer "));
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let ctx = TestContext::new();
    ctx.signup("dup@example.com", "USER").await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/auth/signup",
            None,
            Some(json!({ "email": "dup@example.com", "password": PASSWORD, "user_role": "USER" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "이미 존재하는 이메일입니다.");
}

#[tokio::test]
async fn test_signup_unknown_role() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/auth/signup",
            None,
            Some(json!({ "email": "a@example.com", "password": PASSWORD, "user_role": "ROOT" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "유효하지 않은 UserRole");
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/auth/signup",
            None,
            Some(json!({ "email": "not-an-email", "password": "", "user_role": "USER" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "password"]);
}

#[tokio::test]
async fn test_signin_failures() {
    let ctx = TestContext::new();
    ctx.signup("user@example.com", "USER").await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/auth/signin",
            None,
            Some(json!({ "email": "user@example.com", "password": "WrongPass1" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "잘못된 비밀번호입니다.");

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/auth/signin",
            None,
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "가입되지 않은 유저입니다.");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let ctx = TestContext::new();

    let (status, _) = ctx.send(Method::GET, "/v1/todos", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx
        .send(Method::GET, "/v1/todos", Some("Token abc"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .send(Method::GET, "/v1/todos", Some("Bearer not.a.jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "USER").await;

    let (status, body) = ctx
        .send(Method::GET, &format!("/v1/users/{}", user.id), Some(&user.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": user.id, "email": "user@example.com" }));

    let (status, _) = ctx
        .send(Method::GET, "/v1/users/9999", Some(&user.token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_change_password() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "USER").await;

    let (status, body) = ctx
        .send(
            Method::PUT,
            "/v1/users",
            Some(&user.token),
            Some(json!({ "old_password": PASSWORD, "new_password": "weak" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "새 비밀번호는 8자 이상이어야 하고, 숫자와 대문자를 포함해야 합니다."
    );

    let (status, _) = ctx
        .send(
            Method::PUT,
            "/v1/users",
            Some(&user.token),
            Some(json!({ "old_password": PASSWORD, "new_password": "NewPassword2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .send(
            Method::POST,
            "/v1/auth/signin",
            None,
            Some(json!({ "email": "user@example.com", "password": "NewPassword2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_todo_lifecycle() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "USER").await;

    let todo_id = ctx.create_todo(&user, "Write tests").await;

    let (status, body) = ctx
        .send(Method::GET, &format!("/v1/todos/{}", todo_id), Some(&user.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Write tests");
    assert_eq!(body["weather"], "Sunny");
    assert_eq!(body["user"]["email"], "user@example.com");

    let (status, _) = ctx
        .send(Method::GET, "/v1/todos/9999", Some(&user.token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_todo_blank_title_rejected() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "USER").await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/todos",
            Some(&user.token),
            Some(json!({ "title": "   ", "contents": "x" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "title");
}

#[tokio::test]
async fn test_todo_title_too_long_rejected() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "USER").await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/todos",
            Some(&user.token),
            Some(json!({ "title": "t".repeat(256), "contents": "x" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "title");
    assert_eq!(body["details"][0]["message"], "must be at most 255 characters");

    let (status, _) = ctx
        .send(
            Method::POST,
            "/v1/todos",
            Some(&user.token),
            Some(json!({ "title": "t".repeat(255), "contents": "x" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_todo_page_size_limit() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "USER").await;
    ctx.create_todo(&user, "one").await;
    ctx.create_todo(&user, "two").await;

    let uri = format!("/v1/todos?page=1&size={}", i64::MAX);
    let (status, body) = ctx.send(Method::GET, &uri, Some(&user.token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "size는 100 이하여야 합니다.");

    let (status, body) = ctx
        .send(Method::GET, "/v1/todos?page=1&size=100", Some(&user.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_pages"], 1);
}

#[tokio::test]
async fn test_todo_pagination() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "USER").await;

    for title in ["one", "two", "three"] {
        ctx.create_todo(&user, title).await;
    }

    let (status, body) = ctx
        .send(Method::GET, "/v1/todos?page=1&size=2", Some(&user.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_elements"], 3);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["content"].as_array().unwrap().len(), 2);
    assert_eq!(body["content"][0]["title"], "three");

    let (_, body) = ctx
        .send(Method::GET, "/v1/todos?page=2&size=2", Some(&user.token), None)
        .await;
    assert_eq!(body["content"][0]["title"], "one");

    let (_, body) = ctx.send(Method::GET, "/v1/todos", Some(&user.token), None).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["size"], 10);

    let (status, _) = ctx
        .send(Method::GET, "/v1/todos?page=0", Some(&user.token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_manager_flow() {
    let ctx = TestContext::new();
    let owner = ctx.signup("owner@example.com", "USER").await;
    let helper = ctx.signup("helper@example.com", "USER").await;
    let todo_id = ctx.create_todo(&owner, "Shared").await;
    let managers_uri = format!("/v1/todos/{}/managers", todo_id);

    let (status, body) = ctx
        .send(
            Method::POST,
            &managers_uri,
            Some(&owner.token),
            Some(json!({ "manager_user_id": owner.id })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "일정 작성자는 본인을 담당자로 등록할 수 없습니다.");

    let (status, body) = ctx
        .send(
            Method::POST,
            &managers_uri,
            Some(&owner.token),
            Some(json!({ "manager_user_id": helper.id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "helper@example.com");
    let manager_id = body["id"].as_i64().unwrap();

    let (_, body) = ctx.send(Method::GET, &managers_uri, Some(&helper.token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = ctx
        .send(
            Method::POST,
            &managers_uri,
            Some(&helper.token),
            Some(json!({ "manager_user_id": helper.id })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "담당자를 등록하려고 하는 유저가 일정을 만든 유저가 유효하지 않습니다."
    );

    let delete_uri = format!("{}/{}", managers_uri, manager_id);

    let (status, body) = ctx.send(Method::DELETE, &delete_uri, Some(&helper.token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "해당 일정을 만든 유저가 유효하지 않습니다.");

    let (status, _) = ctx.send(Method::DELETE, &delete_uri, Some(&owner.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = ctx.send(Method::GET, &managers_uri, Some(&owner.token), None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comments() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "USER").await;
    let todo_id = ctx.create_todo(&user, "Discuss").await;
    let uri = format!("/v1/todos/{}/comments", todo_id);

    let (status, body) = ctx
        .send(Method::POST, &uri, Some(&user.token), Some(json!({ "contents": "First!" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contents"], "First!");
    assert_eq!(body["user"]["id"], user.id);

    let (status, body) = ctx.send(Method::GET, &uri, Some(&user.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = ctx
        .send(
            Method::POST,
            "/v1/todos/9999/comments",
            Some(&user.token),
            Some(json!({ "contents": "lost" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_routes_reject_regular_users() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "USER").await;

    let (status, body) = ctx
        .send(
            Method::PATCH,
            &format!("/v1/admin/users/{}", user.id),
            Some(&user.token),
            Some(json!({ "role": "ADMIN" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "관리자 권한이 없습니다.");

    let (status, _) = ctx.send(Method::DELETE, "/v1/admin/comments/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_change_role() {
    let ctx = TestContext::new();
    let admin = ctx.signup("admin@example.com", "ADMIN").await;
    let user = ctx.signup("user@example.com", "USER").await;

    let (status, _) = ctx
        .send(
            Method::PATCH,
            &format!("/v1/admin/users/{}", user.id),
            Some(&admin.token),
            Some(json!({ "role": "admin" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Role lives in the token, so the promotion shows after signing in again
    let (_, body) = ctx
        .send(
            Method::POST,
            "/v1/auth/signin",
            None,
            Some(json!({ "email": user.email, "password": PASSWORD })),
        )
        .await;
    let token = body["bearer_token"].as_str().unwrap().to_string();

    let (status, _) = ctx
        .send(Method::DELETE, "/v1/admin/comments/1", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .send(
            Method::PATCH,
            "/v1/admin/users/9999",
            Some(&admin.token),
            Some(json!({ "role": "USER" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_delete_comment() {
    let ctx = TestContext::new();
    let admin = ctx.signup("admin@example.com", "ADMIN").await;
    let user = ctx.signup("user@example.com", "USER").await;
    let todo_id = ctx.create_todo(&user, "Noisy").await;
    let uri = format!("/v1/todos/{}/comments", todo_id);

    let (_, body) = ctx
        .send(Method::POST, &uri, Some(&user.token), Some(json!({ "contents": "spam" })))
        .await;
    let comment_id = body["id"].as_i64().unwrap();

    let delete_uri = format!("/v1/admin/comments/{}", comment_id);
    let (status, _) = ctx.send(Method::DELETE, &delete_uri, Some(&admin.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = ctx.send(Method::GET, &uri, Some(&user.token), None).await;
    assert!(body.as_array().unwrap().is_empty());

    // Deleting again is still a success
    let (status, _) = ctx.send(Method::DELETE, &delete_uri, Some(&admin.token), None).await;
    assert_eq!(status, StatusCode::OK);
}
