use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Reservation {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: String,
    pub budget: Option<String>,
    pub property_type: Option<String>,
    pub investment_type: Option<String>,
    pub reason: Option<String>,
    pub referral_source: Option<String>,
    pub desired_properties: Json<Vec<String>>,
    pub meet_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewReservationParams {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub budget: Option<String>,
    pub property_type: Option<String>,
    pub investment_type: Option<String>,
    pub reason: Option<String>,
    pub referral_source: Option<String>,
    pub desired_properties: Vec<String>,
}

impl Reservation {
    pub fn new(params: NewReservationParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            email: params.email,
            phone: params.phone,
            message: params.message,
            date: params.date,
            time: params.time,
            status: "pending".to_string(),
            budget: params.budget,
            property_type: params.property_type,
            investment_type: params.investment_type,
            reason: params.reason,
            referral_source: params.referral_source,
            desired_properties: Json(params.desired_properties),
            meet_link: None,
            created_at: now,
            updated_at: now,
        }
    }
}
