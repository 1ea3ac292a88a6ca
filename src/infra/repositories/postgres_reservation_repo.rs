use crate::domain::{models::{job::Job, reservation::Reservation}, ports::ReservationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;

pub struct PostgresReservationRepo {
    pool: PgPool,
}

impl PostgresReservationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepo {
    async fn create(&self, reservation: &Reservation, jobs: Vec<Job>) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (id, name, email, phone, message, date, time, status, budget, property_type, investment_type, reason, referral_source, desired_properties, meet_link, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING *"
        )
            .bind(&reservation.id).bind(&reservation.name).bind(&reservation.email).bind(&reservation.phone)
            .bind(&reservation.message).bind(reservation.date).bind(reservation.time).bind(&reservation.status)
            .bind(&reservation.budget).bind(&reservation.property_type).bind(&reservation.investment_type)
            .bind(&reservation.reason).bind(&reservation.referral_source).bind(&reservation.desired_properties)
            .bind(&reservation.meet_link).bind(reservation.created_at).bind(reservation.updated_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        for job in jobs {
            sqlx::query("INSERT INTO jobs (id, job_type, payload, execute_at, status, attempts, error_message, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)")
                .bind(&job.id).bind(&job.job_type).bind(&job.payload).bind(job.execute_at)
                .bind(&job.status).bind(job.attempts).bind(&job.error_message).bind(job.created_at)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations ORDER BY date ASC, time ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn booked_times(&self, date: NaiveDate) -> Result<Vec<NaiveTime>, AppError> {
        sqlx::query_scalar::<_, NaiveTime>(
            "SELECT time FROM reservations WHERE date = $1 AND status != 'cancelled'"
        )
            .bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn booked_times_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<(NaiveDate, NaiveTime)>, AppError> {
        sqlx::query_as::<_, (NaiveDate, NaiveTime)>(
            "SELECT date, time FROM reservations WHERE date >= $1 AND date <= $2 AND status != 'cancelled'"
        )
            .bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn transition(&self, reservation: &Reservation, expected_updated_at: DateTime<Utc>, jobs: Vec<Job>) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = $1, meet_link = $2, updated_at = $3
             WHERE id = $4 AND updated_at = $5
             RETURNING *"
        )
            .bind(&reservation.status).bind(&reservation.meet_link).bind(reservation.updated_at)
            .bind(&reservation.id).bind(expected_updated_at)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        let Some(updated) = updated else {
            let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reservations WHERE id = $1")
                .bind(&reservation.id)
                .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
            return if exists > 0 {
                Err(AppError::Conflict("Reservation was modified concurrently".to_string()))
            } else {
                Err(AppError::NotFound("Reservation not found".to_string()))
            };
        };

        for job in jobs {
            sqlx::query("INSERT INTO jobs (id, job_type, payload, execute_at, status, attempts, error_message, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)")
                .bind(&job.id).bind(&job.job_type).bind(&job.payload).bind(job.execute_at)
                .bind(&job.status).bind(job.attempts).bind(&job.error_message).bind(job.created_at)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Reservation not found".into()));
        }
        Ok(())
    }
}
