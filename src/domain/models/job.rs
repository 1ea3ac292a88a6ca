use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const MAX_JOB_ATTEMPTS: i32 = 5;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobPayload {
    Reservation {
        reservation_id: String,
        reason: Option<String>,
    },
    Contact {
        name: String,
        email: String,
        phone: Option<String>,
        message: String,
    },
}

/// Outbox entry for one transactional email. Created alongside the primary
/// write and drained by the background worker.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Job {
    pub id: String,
    pub job_type: String, // BOOKING_NOTIFICATION | CONFIRMATION | REJECTION | CONTACT
    pub payload: Json<JobPayload>,
    pub execute_at: DateTime<Utc>,
    pub status: String,
    pub attempts: i32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(job_type: &str, payload: JobPayload, execute_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            job_type: job_type.to_string(),
            payload: Json(payload),
            execute_at,
            status: "PENDING".to_string(),
            attempts: 0,
            error_message: None,
            created_at: Utc::now(),
        }
    }

    pub fn for_reservation(job_type: &str, reservation_id: String, reason: Option<String>) -> Self {
        Self::new(job_type, JobPayload::Reservation { reservation_id, reason }, Utc::now())
    }
}
