mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn admin_request(app: &TestApp, auth: &AuthHeaders, method: &str, uri: String, payload: Option<Value>) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri)
        .header(header::COOKIE, format!("access_token={}", auth.access_token))
        .header("X-CSRF-Token", auth.csrf_token.clone());

    let body = match payload {
        Some(p) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(p.to_string())
        }
        None => Body::empty(),
    };

    app.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

#[tokio::test]
async fn test_public_hero_slides_active_and_ordered() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;

    for (title, active, sort_order) in [("Second", true, 2), ("First", true, 1), ("Draft", false, 0)] {
        let res = admin_request(&app, &auth, "POST", "/api/v1/admin/hero-slides".to_string(), Some(json!({
            "image": "slides/slide.jpg",
            "title": title,
            "highlight": "First",
            "subtitle": "Find your home",
            "active": active,
            "sort_order": sort_order
        }))).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/hero-slides")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let slides = parse_body(res).await;
    let slides = slides.as_array().unwrap().clone();

    assert_eq!(slides.len(), 2, "Inactive slides stay hidden");
    assert_eq!(slides[0]["title"], "First");
    assert_eq!(slides[1]["title"], "Second");
}

#[tokio::test]
async fn test_blog_publish_lifecycle() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;

    let res = admin_request(&app, &auth, "POST", "/api/v1/admin/blog".to_string(), Some(json!({
        "title": "Market report",
        "slug": "market-report-2025",
        "excerpt": "Where prices are heading",
        "content": "<p>Long form content</p>",
        "author": "Office Team"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let post = parse_body(res).await;
    assert_eq!(post["status"], "draft");
    assert!(post["published_at"].is_null());

    // Drafts are invisible publicly.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/blog/market-report-2025")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = admin_request(&app, &auth, "PUT",
        format!("/api/v1/admin/blog/{}", post["id"].as_str().unwrap()),
        Some(json!({"status": "published"}))
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    let published = parse_body(res).await;
    assert_eq!(published["status"], "published");
    assert!(!published["published_at"].is_null(), "published_at stamped on publish");

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/blog/market-report-2025")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/blog")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_blog_slug_rules() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;

    let res = admin_request(&app, &auth, "POST", "/api/v1/admin/blog".to_string(), Some(json!({
        "title": "Bad slug",
        "slug": "Not A Slug!",
        "excerpt": "x",
        "content": "x",
        "author": "x"
    }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let valid = json!({
        "title": "Fine",
        "slug": "fine-slug",
        "excerpt": "x",
        "content": "x",
        "author": "x"
    });
    let res = admin_request(&app, &auth, "POST", "/api/v1/admin/blog".to_string(), Some(valid.clone())).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = admin_request(&app, &auth, "POST", "/api/v1/admin/blog".to_string(), Some(valid)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_property_images_round_trip_and_cover() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;

    let res = admin_request(&app, &auth, "POST", "/api/v1/admin/properties".to_string(), Some(json!({
        "title": "Penthouse",
        "description": "Top floor",
        "price": 420000,
        "listing_type": "sale",
        "location": "Sofia",
        "property_type": "apartment",
        "area": 140.0,
        "images": ["img/a.jpg", "img/b.jpg", "img/c.jpg"],
        "rooms": [{"name": "Living room", "area": 45.5}]
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let property = parse_body(res).await;
    let id = property["id"].as_str().unwrap();

    // Round trip preserves the order as stored.
    let res = admin_request(&app, &auth, "GET", format!("/api/v1/admin/properties/{}", id), None).await;
    let fetched = parse_body(res).await;
    assert_eq!(fetched["images"], json!(["img/a.jpg", "img/b.jpg", "img/c.jpg"]));
    assert_eq!(fetched["rooms"][0]["name"], "Living room");

    // Promoting b makes it the cover; a and c keep their relative order.
    let res = admin_request(&app, &auth, "POST",
        format!("/api/v1/admin/properties/{}/cover", id),
        Some(json!({"image": "img/b.jpg"}))
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["images"], json!(["img/b.jpg", "img/a.jpg", "img/c.jpg"]));

    let res = admin_request(&app, &auth, "POST",
        format!("/api/v1/admin/properties/{}/cover", id),
        Some(json!({"image": "img/unknown.jpg"}))
    ).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_property_stale_update_conflicts() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;

    let res = admin_request(&app, &auth, "POST", "/api/v1/admin/properties".to_string(), Some(json!({
        "title": "House",
        "description": "Yard included",
        "price": 300000,
        "listing_type": "sale",
        "location": "Plovdiv",
        "property_type": "house",
        "area": 210.0
    }))).await;
    let property = parse_body(res).await;
    let id = property["id"].as_str().unwrap();
    let first_seen = property["updated_at"].clone();

    // Someone else edits in between.
    let res = admin_request(&app, &auth, "PUT",
        format!("/api/v1/admin/properties/{}", id),
        Some(json!({"price": 310000}))
    ).await;
    assert_eq!(res.status(), StatusCode::OK);

    // The edit based on the stale snapshot is refused.
    let res = admin_request(&app, &auth, "PUT",
        format!("/api/v1/admin/properties/{}", id),
        Some(json!({"price": 295000, "updated_at": first_seen}))
    ).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = admin_request(&app, &auth, "GET", format!("/api/v1/admin/properties/{}", id), None).await;
    let current = parse_body(res).await;
    assert_eq!(current["price"], 310000);
}

#[tokio::test]
async fn test_hero_slide_update_and_delete() {
    let app = TestApp::new().await;
    let auth = app.admin_login().await;

    let res = admin_request(&app, &auth, "POST", "/api/v1/admin/hero-slides".to_string(), Some(json!({
        "image": "slides/home.jpg",
        "title": "Live by the sea"
    }))).await;
    let slide = parse_body(res).await;
    let id = slide["id"].as_str().unwrap();
    assert_eq!(slide["active"], true);

    let res = admin_request(&app, &auth, "PUT",
        format!("/api/v1/admin/hero-slides/{}", id),
        Some(json!({"active": false, "highlight": "sea"}))
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["active"], false);
    assert_eq!(updated["highlight"], "sea");

    let res = admin_request(&app, &auth, "DELETE", format!("/api/v1/admin/hero-slides/{}", id), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = admin_request(&app, &auth, "DELETE", format!("/api/v1/admin/hero-slides/{}", id), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
