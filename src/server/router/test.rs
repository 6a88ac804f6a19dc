use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use test_utils::{builder::TestBuilder, context::TestContext, factory};
use tower::ServiceExt;

use crate::server::{
    router::router,
    service::{admin::code::AdminCodeService, auth::token::TokenService},
    state::AppState,
};

async fn setup() -> (TestContext, Router, AdminCodeService) {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap().clone();
    let admin_codes = AdminCodeService::new();

    let app = router().with_state(AppState::new(
        db,
        TokenService::new("router-test-secret", 1),
        admin_codes.clone(),
        4,
    ));

    (test, app, admin_codes)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

async fn register(app: &Router, username: &str, admin_code: Option<String>) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "correct horse",
            "adminCode": admin_code,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    body["token"].as_str().unwrap().to_string()
}

/// Tests that the OpenAPI document lists the API routes.
///
/// Expected: 200 with comic like and pages paths present
#[tokio::test]
async fn serves_openapi_document() {
    let (_test, app, _) = setup().await;

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/comics/{id}/like"].is_object());
    assert!(body["paths"]["/api/comics/{id}/pages/{page_id}"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer"].is_object());
}

/// Tests registering, logging in and reading the current user over HTTP.
///
/// Expected: login returns a token that `/api/auth/me` accepts
#[tokio::test]
async fn register_login_and_me() {
    let (_test, app, _) = setup().await;

    register(&app, "reader", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "Reader@Example.com", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, me) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "reader");
    assert_eq!(me["role"], "user");
}

/// Tests that a wrong password gets the generic error body.
///
/// Expected: 401 with an `error` field
#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let (_test, app, _) = setup().await;

    register(&app, "reader", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "reader@example.com", "password": "wrong password" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

/// Tests admin route protection.
///
/// Expected: 401 without a token, 403 for a regular user, 201 for the bootstrap admin
#[tokio::test]
async fn admin_routes_require_admin_role() {
    let (_test, app, admin_codes) = setup().await;

    let code = admin_codes.generate().await;
    let admin = register(&app, "editor", Some(code)).await;
    let user = register(&app, "reader", None).await;
    let genre = json!({ "name": "Science Fiction" });

    let (status, _) = send(&app, Method::POST, "/api/genres", None, Some(genre.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/genres", Some(&user), Some(genre.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::POST, "/api/genres", Some(&admin), Some(genre)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["slug"], "science-fiction");
}

/// Tests the public comic flow: list, read by slug and visitor likes.
///
/// Expected: drafts hidden, a view counted, a repeated like counted once
#[tokio::test]
async fn public_comic_reads_and_visitor_likes() {
    let (test, app, _) = setup().await;
    let db = test.db.as_ref().unwrap();

    let comic = factory::comic::ComicFactory::new(db)
        .title("Night Shift")
        .slug("night-shift")
        .build()
        .await
        .unwrap();
    factory::comic::ComicFactory::new(db)
        .status(entity::comic::ComicStatus::Draft)
        .build()
        .await
        .unwrap();

    let (status, list) = send(&app, Method::GET, "/api/comics", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);

    let (status, read) = send(&app, Method::GET, "/api/comics/slug/night-shift", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["views"], 1);

    let like_uri = format!("/api/comics/{}/like?visitorId=visitor-1", comic.id);
    send(&app, Method::POST, &like_uri, None, None).await;
    let (status, liked) = send(&app, Method::POST, &like_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(liked["likes"], 1);
    assert_eq!(liked["changed"], false);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/comics/{}/like", comic.id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Tests an unknown slug.
///
/// Expected: 404 with an `error` field
#[tokio::test]
async fn unknown_blog_slug_is_not_found() {
    let (_test, app, _) = setup().await;

    let (status, body) = send(&app, Method::GET, "/api/blogs/slug/missing", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

/// Tests that bodies missing required fields get the JSON error body.
///
/// Expected: 400 with an `error` message naming the missing field
#[tokio::test]
async fn incomplete_body_is_bad_request() {
    let (_test, app, _) = setup().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "abc" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
}

/// Tests that malformed query parameters get the JSON error body.
///
/// Expected: 400 with an `error` message
#[tokio::test]
async fn malformed_query_is_bad_request() {
    let (_test, app, _) = setup().await;

    let (status, body) = send(&app, Method::GET, "/api/comics?page=abc", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

/// Tests listing with the largest page number a client can send.
///
/// Expected: 200 with an empty page
#[tokio::test]
async fn huge_page_number_lists_nothing() {
    let (_test, app, _) = setup().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/comics?page=18446744073709551615",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comics"], json!([]));
}
