use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

/// Admin-configured set of bookable times for a single calendar day.
/// An empty `times` list means the date is not offered at all.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Availability {
    pub id: String,
    pub date: NaiveDate,
    pub times: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Availability {
    pub fn new(date: NaiveDate, times: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            times: Json(times),
            created_at: now,
            updated_at: now,
        }
    }
}
