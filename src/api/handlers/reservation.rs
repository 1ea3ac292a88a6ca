use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{ConfirmReservationRequest, RejectReservationRequest};
use crate::domain::models::job::Job;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let reservations = state.reservation_repo.list().await?;
    Ok(Json(reservations))
}

pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_by_id(&reservation_id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;
    Ok(Json(reservation))
}

/// pending -> confirmed. The status change is the source of truth; the
/// confirmation email is queued in the same transaction and delivered
/// best-effort by the worker.
pub async fn confirm_reservation(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(reservation_id): Path<String>,
    Json(payload): Json<ConfirmReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_by_id(&reservation_id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    if reservation.status == "confirmed" {
        return Ok(Json(reservation));
    }
    if reservation.status == "cancelled" {
        return Err(AppError::Conflict("Reservation is cancelled".into()));
    }

    let expected = payload.updated_at.unwrap_or(reservation.updated_at);

    let mut updated = reservation.clone();
    updated.status = "confirmed".to_string();
    updated.meet_link = payload.meet_link;
    updated.updated_at = Utc::now();

    let job = Job::for_reservation("CONFIRMATION", updated.id.clone(), None);
    let confirmed = state.reservation_repo.transition(&updated, expected, vec![job]).await?;

    info!("Reservation confirmed: {}", confirmed.id);
    Ok(Json(confirmed))
}

/// pending/confirmed -> cancelled, carrying a human-readable reason for the
/// rejection email. Cancelling an already-cancelled reservation is a no-op
/// and sends nothing.
pub async fn reject_reservation(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(reservation_id): Path<String>,
    Json(payload): Json<RejectReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_by_id(&reservation_id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    if reservation.status == "cancelled" {
        return Ok(Json(reservation));
    }

    let expected = payload.updated_at.unwrap_or(reservation.updated_at);

    let mut updated = reservation.clone();
    updated.status = "cancelled".to_string();
    updated.updated_at = Utc::now();

    let job = Job::for_reservation("REJECTION", updated.id.clone(), Some(payload.reason));
    let cancelled = state.reservation_repo.transition(&updated, expected, vec![job]).await?;

    info!("Reservation rejected: {}", cancelled.id);
    Ok(Json(cancelled))
}

pub async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.reservation_repo.delete(&reservation_id).await?;
    info!("Reservation deleted: {}", reservation_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
