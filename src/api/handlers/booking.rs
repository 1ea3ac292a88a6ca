use axum::{extract::{State, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::CreateReservationRequest,
    responses::{SlotStatus, SlotsResponse},
};
use crate::domain::models::job::Job;
use crate::domain::models::reservation::{NewReservationParams, Reservation};
use crate::domain::services::availability::{open_dates, parse_slot, resolve_slots};
use crate::domain::services::booking_flow::{BookingWizard, ContactDetails};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

fn today_in_site_tz(state: &AppState) -> NaiveDate {
    let tz: Tz = state.config.site_timezone.parse().unwrap_or(chrono_tz::UTC);
    Utc::now().with_timezone(&tz).date_naive()
}

/// Dates in [start, end] that still have at least one open slot. The range
/// start is clamped to today; fully booked days and days without an
/// availability record are left out.
pub async fn get_available_dates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let start_str = params.get("start").ok_or(AppError::Validation("start required".into()))?;
    let end_str = params.get("end").ok_or(AppError::Validation("end required".into()))?;

    let start_date = NaiveDate::parse_from_str(start_str, "%Y-%m-%d").map_err(|_| AppError::Validation("Invalid start".into()))?;
    let end_date = NaiveDate::parse_from_str(end_str, "%Y-%m-%d").map_err(|_| AppError::Validation("Invalid end".into()))?;

    let start_date = start_date.max(today_in_site_tz(&state));
    if end_date < start_date {
        return Ok(Json(Vec::<String>::new()));
    }

    let availabilities = state.availability_repo.list_by_range(start_date, end_date).await?;
    let booked = state.reservation_repo.booked_times_in_range(start_date, end_date).await?;

    let days: Vec<_> = availabilities.into_iter()
        .map(|a| (a.date, a.times.0))
        .collect();

    let dates: Vec<String> = open_dates(&days, &booked).into_iter()
        .map(|d| d.to_string())
        .collect();

    Ok(Json(dates))
}

/// Per-slot status for one date. Booked slots are reported as unavailable
/// rather than omitted so the picker can render them disabled.
pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let date_str = params.get("date").ok_or(AppError::Validation("Date required".into()))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    if date < today_in_site_tz(&state) {
        return Err(AppError::Validation("Date is in the past".into()));
    }

    let availability = state.availability_repo.find_by_date(date).await?;

    let Some(availability) = availability else {
        return Ok(Json(SlotsResponse { date: date_str.clone(), slots: Vec::new() }));
    };

    let booked = state.reservation_repo.booked_times(date).await?;
    let open = resolve_slots(&availability.times.0, &booked);

    let mut seen = std::collections::HashSet::new();
    let slots: Vec<SlotStatus> = availability.times.0.iter()
        .filter(|t| parse_slot(t).is_some())
        .filter(|t| seen.insert(t.as_str().to_string()))
        .map(|t| SlotStatus {
            time: t.clone(),
            available: open.contains(t),
        })
        .collect();

    Ok(Json(SlotsResponse { date: date_str.clone(), slots }))
}

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    if date < today_in_site_tz(&state) {
        return Err(AppError::Validation("Cannot book in the past".into()));
    }

    // The submission replays the wizard, so partial or out-of-order input
    // fails the same way it would in the multi-step flow.
    let mut wizard = BookingWizard::new();
    wizard.select_date(date).map_err(|e| AppError::Validation(e.to_string()))?;
    wizard.select_time(payload.time.clone()).map_err(|e| AppError::Validation(e.to_string()))?;
    wizard.set_details(ContactDetails {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        message: payload.message,
        budget: payload.budget,
        property_type: payload.property_type,
        investment_type: payload.investment_type,
        reason: payload.reason,
        referral_source: payload.referral_source,
        desired_properties: payload.desired_properties.unwrap_or_default(),
    }).map_err(|e| AppError::Validation(e.to_string()))?;

    let draft = wizard.submit().map_err(|e| AppError::Validation(e.to_string()))?;

    let time = parse_slot(&draft.time)
        .ok_or(AppError::Validation("Invalid time format (HH:MM)".into()))?;

    let availability = state.availability_repo.find_by_date(date).await?
        .ok_or(AppError::Conflict("Date is not open for booking".into()))?;

    let booked = state.reservation_repo.booked_times(date).await?;
    let open = resolve_slots(&availability.times.0, &booked);

    if !open.contains(&draft.time) {
        warn!("Reservation rejected: slot {} {} not available. Open slots: {:?}", date, draft.time, open);
        return Err(AppError::Conflict("Selected time slot is not available or valid".into()));
    }

    let details = draft.details;
    let reservation = Reservation::new(NewReservationParams {
        name: details.name,
        email: details.email,
        phone: details.phone,
        message: details.message,
        date,
        time,
        budget: details.budget,
        property_type: details.property_type,
        investment_type: details.investment_type,
        reason: details.reason,
        referral_source: details.referral_source,
        desired_properties: details.desired_properties,
    });

    let notification = Job::for_reservation("BOOKING_NOTIFICATION", reservation.id.clone(), None);

    // Insert and enqueue together; a failed insert must never notify.
    let created = state.reservation_repo.create(&reservation, vec![notification]).await?;
    wizard.complete();

    info!("Reservation created: {} for {} {}", created.id, created.date, created.time);
    Ok((StatusCode::CREATED, Json(created)))
}
