use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct HeroSlide {
    pub id: String,
    pub image: String,
    pub title: String,
    // Substring of title the frontend renders emphasized; stored verbatim.
    pub highlight: Option<String>,
    pub subtitle: Option<String>,
    pub active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HeroSlide {
    pub fn new(image: String, title: String, highlight: Option<String>, subtitle: Option<String>, active: bool, sort_order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            image,
            title,
            highlight,
            subtitle,
            active,
            sort_order,
            created_at: now,
            updated_at: now,
        }
    }
}
