use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::domain::models::job::{Job, JobPayload};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;
use crate::api::dtos::requests::ContactRequest;

/// Queues the contact email and reports success; delivery happens
/// out-of-band through the outbox worker.
pub async fn send_contact_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(AppError::Validation("a valid email is required".into()));
    }
    if payload.message.trim().is_empty() {
        return Err(AppError::Validation("message is required".into()));
    }

    let job = Job::new(
        "CONTACT",
        JobPayload::Contact {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            message: payload.message,
        },
        Utc::now(),
    );

    state.job_repo.create(&job).await?;

    info!("Contact message queued: {}", job.id);
    Ok(Json(serde_json::json!({"success": true})))
}
