use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, availability, blog, booking, catalog, contact, health, hero_slide, member, property, reservation, upload};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Public catalog
        .route("/api/v1/properties", get(catalog::list_properties))
        .route("/api/v1/properties/{property_id}", get(catalog::get_property))

        // Public content
        .route("/api/v1/hero-slides", get(hero_slide::list_active_slides))
        .route("/api/v1/blog", get(blog::list_published_posts))
        .route("/api/v1/blog/{slug}", get(blog::get_published_post))

        // Public booking flow
        .route("/api/v1/booking/dates", get(booking::get_available_dates))
        .route("/api/v1/booking/slots", get(booking::get_slots))
        .route("/api/v1/booking/reservations", post(booking::create_reservation))
        .route("/api/v1/contact", post(contact::send_contact_message))

        // Admin members
        .route("/api/v1/admin/users", post(member::create_member).get(member::list_members))
        .route("/api/v1/admin/users/{user_id}", delete(member::delete_member))

        // Admin listings
        .route("/api/v1/admin/properties", post(property::create_property).get(property::list_properties))
        .route("/api/v1/admin/properties/{property_id}", get(property::get_property).put(property::update_property).delete(property::delete_property))
        .route("/api/v1/admin/properties/{property_id}/cover", post(property::set_cover_image))

        // Admin content
        .route("/api/v1/admin/hero-slides", get(hero_slide::list_slides).post(hero_slide::create_slide))
        .route("/api/v1/admin/hero-slides/{slide_id}", put(hero_slide::update_slide).delete(hero_slide::delete_slide))
        .route("/api/v1/admin/blog", get(blog::list_posts).post(blog::create_post))
        .route("/api/v1/admin/blog/{post_id}", put(blog::update_post).delete(blog::delete_post))

        // Admin booking calendar
        .route("/api/v1/admin/availabilities", get(availability::list_availabilities))
        .route("/api/v1/admin/availabilities/{date}", put(availability::upsert_availability).delete(availability::delete_availability))

        // Admin reservation lifecycle
        .route("/api/v1/admin/reservations", get(reservation::list_reservations))
        .route("/api/v1/admin/reservations/{reservation_id}", get(reservation::get_reservation).delete(reservation::delete_reservation))
        .route("/api/v1/admin/reservations/{reservation_id}/confirm", post(reservation::confirm_reservation))
        .route("/api/v1/admin/reservations/{reservation_id}/reject", post(reservation::reject_reservation))

        // Admin media
        .route("/api/v1/admin/uploads", post(upload::upload_file))
        .route("/api/v1/admin/uploads/{key}", delete(upload::delete_file))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
