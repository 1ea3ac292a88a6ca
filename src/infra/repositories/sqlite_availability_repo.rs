use crate::domain::{models::availability::Availability, ports::AvailabilityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteAvailabilityRepo {
    pool: SqlitePool,
}

impl SqliteAvailabilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepo {
    async fn upsert(&self, availability: &Availability) -> Result<Availability, AppError> {
        sqlx::query_as::<_, Availability>(
            "INSERT INTO availabilities (id, date, times, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(date) DO UPDATE SET times = excluded.times, updated_at = excluded.updated_at
             RETURNING *"
        )
            .bind(&availability.id).bind(availability.date).bind(&availability.times)
            .bind(availability.created_at).bind(availability.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<Availability>, AppError> {
        sqlx::query_as::<_, Availability>("SELECT * FROM availabilities WHERE date = ?")
            .bind(date).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Availability>, AppError> {
        sqlx::query_as::<_, Availability>(
            "SELECT * FROM availabilities WHERE date >= ? AND date <= ? ORDER BY date ASC"
        )
            .bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, date: NaiveDate) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM availabilities WHERE date = ?")
            .bind(date).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("No availability configured for that date".into()));
        }
        Ok(())
    }
}
