mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::{AuthHeaders, TestApp};
use estate_backend::background::drain_pending_jobs;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn future_date(days_ahead: i64) -> String {
    (Utc::now() + Duration::days(days_ahead)).date_naive().to_string()
}

async fn admin_post(app: &TestApp, auth: &AuthHeaders, uri: String, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", auth.csrf_token.clone())
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap()
}

/// Books one pending reservation on a freshly configured date and returns it.
async fn seed_reservation(app: &TestApp, auth: &AuthHeaders, date: &str, time: &str) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT")
            .uri(format!("/api/v1/admin/availabilities/{}", date))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", auth.csrf_token.clone())
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"times": [time]}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/booking/reservations")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "date": date,
                "time": time,
                "name": "Elena Ivanova",
                "email": "elena@example.com",
                "phone": "+359 888 777"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await
}

/// Clears the booking notification queued by seeding so email asserts only
/// see lifecycle mail.
async fn flush_outbox(app: &TestApp) {
    drain_pending_jobs(&app.state).await.unwrap();
    app.emails.sent.lock().unwrap().clear();
}

#[tokio::test]
async fn test_confirm_sets_status_and_sends_email() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;
    let date = future_date(7);

    let reservation = seed_reservation(&app, &auth, &date, "10:00").await;
    let id = reservation["id"].as_str().unwrap();
    flush_outbox(&app).await;

    let res = admin_post(&app, &auth,
        format!("/api/v1/admin/reservations/{}/confirm", id),
        json!({"meet_link": "https://meet.example.com/abc"})
    ).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["meet_link"], "https://meet.example.com/abc");

    drain_pending_jobs(&app.state).await.unwrap();

    let sent = app.emails.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "elena@example.com");
    assert!(sent[0].subject.contains("confirmed"));
    assert!(sent[0].html_body.contains("Elena Ivanova"));
    assert!(sent[0].html_body.contains("10:00"));
    assert!(sent[0].html_body.contains("https://meet.example.com/abc"));
    assert_eq!(sent[0].attachment_name.as_deref(), Some("invite.ics"));
}

#[tokio::test]
async fn test_confirm_is_idempotent() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;
    let date = future_date(7);

    let reservation = seed_reservation(&app, &auth, &date, "10:00").await;
    let id = reservation["id"].as_str().unwrap();
    flush_outbox(&app).await;

    let res = admin_post(&app, &auth, format!("/api/v1/admin/reservations/{}/confirm", id), json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    drain_pending_jobs(&app.state).await.unwrap();
    assert_eq!(app.emails.sent_emails().len(), 1);

    // Confirming a confirmed reservation changes nothing and mails nothing.
    let res = admin_post(&app, &auth, format!("/api/v1/admin/reservations/{}/confirm", id), json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["status"], "confirmed");

    drain_pending_jobs(&app.state).await.unwrap();
    assert_eq!(app.emails.sent_emails().len(), 1);
}

#[tokio::test]
async fn test_reject_sends_reason() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;
    let date = future_date(7);

    let reservation = seed_reservation(&app, &auth, &date, "11:00").await;
    let id = reservation["id"].as_str().unwrap();
    flush_outbox(&app).await;

    let res = admin_post(&app, &auth,
        format!("/api/v1/admin/reservations/{}/reject", id),
        json!({"reason": "The agent is out of office that week."})
    ).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["status"], "cancelled");

    drain_pending_jobs(&app.state).await.unwrap();

    let sent = app.emails.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "elena@example.com");
    assert!(sent[0].html_body.contains("The agent is out of office that week."));
}

#[tokio::test]
async fn test_reject_already_cancelled_is_noop() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;
    let date = future_date(7);

    let reservation = seed_reservation(&app, &auth, &date, "11:00").await;
    let id = reservation["id"].as_str().unwrap();
    flush_outbox(&app).await;

    let res = admin_post(&app, &auth, format!("/api/v1/admin/reservations/{}/reject", id), json!({"reason": "first"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    drain_pending_jobs(&app.state).await.unwrap();
    assert_eq!(app.emails.sent_emails().len(), 1);

    let res = admin_post(&app, &auth, format!("/api/v1/admin/reservations/{}/reject", id), json!({"reason": "second"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["status"], "cancelled");

    drain_pending_jobs(&app.state).await.unwrap();
    assert_eq!(app.emails.sent_emails().len(), 1, "No second rejection email");
}

#[tokio::test]
async fn test_confirm_cancelled_conflicts() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;
    let date = future_date(7);

    let reservation = seed_reservation(&app, &auth, &date, "11:00").await;
    let id = reservation["id"].as_str().unwrap();

    admin_post(&app, &auth, format!("/api/v1/admin/reservations/{}/reject", id), json!({"reason": "no"})).await;

    let res = admin_post(&app, &auth, format!("/api/v1/admin/reservations/{}/confirm", id), json!({})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_stale_version_token_conflicts() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;
    let date = future_date(7);

    let reservation = seed_reservation(&app, &auth, &date, "10:00").await;
    let id = reservation["id"].as_str().unwrap();

    let stale = (Utc::now() - Duration::hours(2)).to_rfc3339();
    let res = admin_post(&app, &auth,
        format!("/api/v1/admin/reservations/{}/confirm", id),
        json!({"updated_at": stale})
    ).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Status is untouched after the conflicted attempt.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/admin/reservations/{}", id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn test_delete_is_unconditional_and_silent() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;
    let date = future_date(7);

    let reservation = seed_reservation(&app, &auth, &date, "10:00").await;
    let id = reservation["id"].as_str().unwrap();
    flush_outbox(&app).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE")
            .uri(format!("/api/v1/admin/reservations/{}", id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", auth.csrf_token.clone())
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/admin/reservations/{}", id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    drain_pending_jobs(&app.state).await.unwrap();
    assert!(app.emails.sent_emails().is_empty(), "Deletion sends no email");
}

#[tokio::test]
async fn test_job_for_deleted_reservation_completes_silently() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;
    let date = future_date(7);

    let reservation = seed_reservation(&app, &auth, &date, "10:00").await;
    let id = reservation["id"].as_str().unwrap();

    // The booking notification is still queued when the admin deletes.
    app.router.clone().oneshot(
        Request::builder().method("DELETE")
            .uri(format!("/api/v1/admin/reservations/{}", id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", auth.csrf_token.clone())
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    drain_pending_jobs(&app.state).await.unwrap();
    assert!(app.emails.sent_emails().is_empty());

    let status: String = sqlx::query_scalar("SELECT status FROM jobs LIMIT 1")
        .fetch_one(&app.pool).await.unwrap();
    assert_eq!(status, "COMPLETED");
}

#[tokio::test]
async fn test_list_reservations_ordered_by_slot() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;

    let later_day = future_date(9);
    let earlier_day = future_date(8);
    seed_reservation(&app, &auth, &later_day, "09:00").await;
    seed_reservation(&app, &auth, &earlier_day, "15:00").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/v1/admin/reservations")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["date"], earlier_day);
    assert_eq!(list[1]["date"], later_day);
}
