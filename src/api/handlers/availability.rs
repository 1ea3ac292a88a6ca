use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::UpsertAvailabilityRequest;
use crate::domain::models::availability::Availability;
use crate::domain::services::availability::parse_slot;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::NaiveDate;
use tracing::info;

pub async fn list_availabilities(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let start_str = params.get("start").ok_or(AppError::Validation("start required".into()))?;
    let end_str = params.get("end").ok_or(AppError::Validation("end required".into()))?;

    let start = NaiveDate::parse_from_str(start_str, "%Y-%m-%d").map_err(|_| AppError::Validation("Invalid start".into()))?;
    let end = NaiveDate::parse_from_str(end_str, "%Y-%m-%d").map_err(|_| AppError::Validation("Invalid end".into()))?;

    let availabilities = state.availability_repo.list_by_range(start, end).await?;
    Ok(Json(availabilities))
}

/// Replaces the configured times for one date. An empty list is allowed and
/// means the date is not offered.
pub async fn upsert_availability(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(date): Path<String>,
    Json(payload): Json<UpsertAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    for time in &payload.times {
        if parse_slot(time).is_none() {
            return Err(AppError::Validation(format!("Invalid time '{}' (expected HH:MM)", time)));
        }
    }

    let availability = Availability::new(date, payload.times);
    let saved = state.availability_repo.upsert(&availability).await?;

    info!("Availability updated for {}: {} slots", saved.date, saved.times.0.len());
    Ok(Json(saved))
}

pub async fn delete_availability(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    state.availability_repo.delete(date).await?;
    info!("Availability removed for {}", date);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
