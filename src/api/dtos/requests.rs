use crate::domain::models::property::RoomSpec;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateMemberRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub date: String,
    pub time: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub budget: Option<String>,
    pub property_type: Option<String>,
    pub investment_type: Option<String>,
    pub reason: Option<String>,
    pub referral_source: Option<String>,
    pub desired_properties: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct ConfirmReservationRequest {
    pub meet_link: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct RejectReservationRequest {
    pub reason: String,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Deserialize)]
pub struct CreatePropertyRequest {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub listing_type: String,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_type: String,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: f64,
    pub year_built: Option<i32>,
    pub floor_number: Option<i32>,
    pub total_floors: Option<i32>,
    pub parking_spaces: Option<i32>,
    pub furnished: Option<bool>,
    pub heating_type: Option<String>,
    pub cooling_type: Option<String>,
    pub images: Option<Vec<String>>,
    pub floor_plans: Option<Vec<String>>,
    pub rooms: Option<Vec<RoomSpec>>,
    pub amenities: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub listing_type: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_type: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
    pub year_built: Option<i32>,
    pub floor_number: Option<i32>,
    pub total_floors: Option<i32>,
    pub parking_spaces: Option<i32>,
    pub furnished: Option<bool>,
    pub heating_type: Option<String>,
    pub cooling_type: Option<String>,
    pub images: Option<Vec<String>>,
    pub floor_plans: Option<Vec<String>>,
    pub rooms: Option<Vec<RoomSpec>>,
    pub amenities: Option<Vec<String>>,
    /// Last-seen version token; a stale value is rejected with a conflict.
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct SetCoverRequest {
    pub image: String,
}

#[derive(Deserialize)]
pub struct CreateHeroSlideRequest {
    pub image: String,
    pub title: String,
    pub highlight: Option<String>,
    pub subtitle: Option<String>,
    pub active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateHeroSlideRequest {
    pub image: Option<String>,
    pub title: Option<String>,
    // Empty string clears the field.
    pub highlight: Option<String>,
    pub subtitle: Option<String>,
    pub active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateBlogPostRequest {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub author: String,
    pub status: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateBlogPostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    // Empty string clears the field.
    pub featured_image: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpsertAvailabilityRequest {
    pub times: Vec<String>,
}

#[derive(Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    pub content_base64: String,
    pub content_type: Option<String>,
}
