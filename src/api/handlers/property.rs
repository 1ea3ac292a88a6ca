use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreatePropertyRequest, SetCoverRequest, UpdatePropertyRequest};
use crate::domain::models::property::{NewPropertyParams, Property};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use sqlx::types::Json as SqlJson;
use tracing::info;

fn validate_listing_type(listing_type: &str) -> Result<(), AppError> {
    match listing_type {
        "sale" | "rent" => Ok(()),
        _ => Err(AppError::Validation("Invalid listing_type".into())),
    }
}

fn validate_status(status: &str) -> Result<(), AppError> {
    match status {
        "active" | "sold" | "rented" | "inactive" => Ok(()),
        _ => Err(AppError::Validation("Invalid status".into())),
    }
}

pub async fn create_property(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Json(payload): Json<CreatePropertyRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_listing_type(&payload.listing_type)?;

    let status = payload.status.unwrap_or_else(|| "active".to_string());
    validate_status(&status)?;

    if payload.price < 0 {
        return Err(AppError::Validation("Price cannot be negative".into()));
    }

    let property = Property::new(NewPropertyParams {
        title: payload.title,
        description: payload.description,
        price: payload.price,
        listing_type: payload.listing_type,
        status,
        featured: payload.featured.unwrap_or(false),
        location: payload.location,
        latitude: payload.latitude,
        longitude: payload.longitude,
        property_type: payload.property_type,
        bedrooms: payload.bedrooms,
        bathrooms: payload.bathrooms,
        area: payload.area,
        year_built: payload.year_built,
        floor_number: payload.floor_number,
        total_floors: payload.total_floors,
        parking_spaces: payload.parking_spaces,
        furnished: payload.furnished,
        heating_type: payload.heating_type,
        cooling_type: payload.cooling_type,
        images: payload.images.unwrap_or_default(),
        floor_plans: payload.floor_plans.unwrap_or_default(),
        rooms: payload.rooms.unwrap_or_default(),
        amenities: payload.amenities.unwrap_or_default(),
    });

    let created = state.property_repo.create(&property).await?;
    info!("Listing created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let properties = state.property_repo.list().await?;
    Ok(Json(properties))
}

pub async fn get_property(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(property_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let property = state.property_repo.find_by_id(&property_id).await?
        .ok_or(AppError::NotFound("Listing not found".into()))?;
    Ok(Json(property))
}

pub async fn update_property(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(property_id): Path<String>,
    Json(payload): Json<UpdatePropertyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut property = state.property_repo.find_by_id(&property_id).await?
        .ok_or(AppError::NotFound("Listing not found".into()))?;

    let expected = payload.updated_at.unwrap_or(property.updated_at);

    if let Some(val) = payload.title { property.title = val; }
    if let Some(val) = payload.description { property.description = val; }
    if let Some(val) = payload.price {
        if val < 0 {
            return Err(AppError::Validation("Price cannot be negative".into()));
        }
        property.price = val;
    }
    if let Some(val) = payload.listing_type {
        validate_listing_type(&val)?;
        property.listing_type = val;
    }
    if let Some(val) = payload.status {
        validate_status(&val)?;
        property.status = val;
    }
    if let Some(val) = payload.featured { property.featured = val; }
    if let Some(val) = payload.location { property.location = val; }
    if let Some(val) = payload.latitude { property.latitude = Some(val); }
    if let Some(val) = payload.longitude { property.longitude = Some(val); }
    if let Some(val) = payload.property_type { property.property_type = val; }
    if let Some(val) = payload.bedrooms { property.bedrooms = Some(val); }
    if let Some(val) = payload.bathrooms { property.bathrooms = Some(val); }
    if let Some(val) = payload.area { property.area = val; }
    if let Some(val) = payload.year_built { property.year_built = Some(val); }
    if let Some(val) = payload.floor_number { property.floor_number = Some(val); }
    if let Some(val) = payload.total_floors { property.total_floors = Some(val); }
    if let Some(val) = payload.parking_spaces { property.parking_spaces = Some(val); }
    if let Some(val) = payload.furnished { property.furnished = Some(val); }
    if let Some(val) = payload.heating_type { property.heating_type = Some(val); }
    if let Some(val) = payload.cooling_type { property.cooling_type = Some(val); }
    if let Some(val) = payload.images { property.images = SqlJson(val); }
    if let Some(val) = payload.floor_plans { property.floor_plans = SqlJson(val); }
    if let Some(val) = payload.rooms { property.rooms = SqlJson(val); }
    if let Some(val) = payload.amenities { property.amenities = SqlJson(val); }

    property.updated_at = Utc::now();

    let updated = state.property_repo.update(&property, expected).await?;
    info!("Listing updated: {}", updated.id);
    Ok(Json(updated))
}

/// Moves an existing image key to index 0. The first image is the cover
/// used on listing cards; the rest keep their relative order.
pub async fn set_cover_image(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(property_id): Path<String>,
    Json(payload): Json<SetCoverRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut property = state.property_repo.find_by_id(&property_id).await?
        .ok_or(AppError::NotFound("Listing not found".into()))?;

    let expected = property.updated_at;

    if !property.set_cover(&payload.image) {
        return Err(AppError::Validation("Image does not belong to this listing".into()));
    }

    property.updated_at = Utc::now();

    let updated = state.property_repo.update(&property, expected).await?;
    info!("Cover image changed for listing: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_property(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(property_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.property_repo.delete(&property_id).await?;
    info!("Listing deleted: {}", property_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
