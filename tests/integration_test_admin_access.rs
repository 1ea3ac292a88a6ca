mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/reservations")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/reservations")
            .header(header::COOKIE, "access_token=garbage")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutations_require_csrf_token() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;

    // Cookie alone is not enough for a write.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/hero-slides")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"image": "x.jpg", "title": "X"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/hero-slides")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", "wrong")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"image": "x.jpg", "title": "X"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "username": common::ADMIN_USERNAME,
                "password": "wrong-password"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_member_management() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/users")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", auth.csrf_token.clone())
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "username": "colleague",
                "password": "colleague-pass-1"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created = parse_body(res).await;
    assert!(created["password_hash"].is_null(), "Hashes never leave the API");

    // The new member can log in and use the back office.
    let member_auth = app.login("colleague", "colleague-pass-1").await;
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/reservations")
            .header(header::COOKIE, format!("access_token={}", member_auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Duplicate usernames are refused.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/users")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", auth.csrf_token.clone())
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "username": "colleague",
                "password": "other"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/users")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let users = parse_body(res).await;
    let self_id = users.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE")
            .uri(format!("/api/v1/admin/users/{}", self_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", auth.csrf_token.clone())
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_refresh_rotates_session() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "username": common::ADMIN_USERNAME,
                "password": common::ADMIN_PASSWORD
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let refresh_cookie = res.headers().get_all(header::SET_COOKIE).iter()
        .map(|h| h.to_str().unwrap().to_string())
        .find(|c| c.contains("refresh_token="))
        .expect("No refresh_token cookie");

    let start = refresh_cookie.find("refresh_token=").unwrap() + 14;
    let end = refresh_cookie[start..].find(';').unwrap_or(refresh_cookie.len() - start);
    let refresh_token = &refresh_cookie[start..start+end];

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The old refresh token was rotated out.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
