use crate::domain::models::{
    availability::Availability, blog_post::BlogPost, hero_slide::HeroSlide, job::Job,
    property::Property, reservation::Reservation, user::AdminUser,
    auth::RefreshTokenRecord,
};
use crate::domain::services::catalog::CatalogQuery;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: &Property) -> Result<Property, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, AppError>;
    /// Updates all mutable columns, guarded by the caller's last-seen
    /// `updated_at`. A stale token yields `Conflict`.
    async fn update(&self, property: &Property, expected_updated_at: DateTime<Utc>) -> Result<Property, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// Public catalog page: status scope, filters, fixed ordering. Returns
    /// the page plus the total match count.
    async fn search(&self, query: &CatalogQuery) -> Result<(Vec<Property>, i64), AppError>;
    async fn list(&self) -> Result<Vec<Property>, AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts the reservation and its outbox jobs in one transaction.
    async fn create(&self, reservation: &Reservation, jobs: Vec<Job>) -> Result<Reservation, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError>;
    async fn list(&self) -> Result<Vec<Reservation>, AppError>;
    /// Times of non-cancelled reservations on `date`.
    async fn booked_times(&self, date: NaiveDate) -> Result<Vec<NaiveTime>, AppError>;
    async fn booked_times_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<(NaiveDate, NaiveTime)>, AppError>;
    /// Writes status/meet_link and the transition's outbox jobs in one
    /// transaction, guarded by `expected_updated_at`.
    async fn transition(&self, reservation: &Reservation, expected_updated_at: DateTime<Utc>, jobs: Vec<Job>) -> Result<Reservation, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn upsert(&self, availability: &Availability) -> Result<Availability, AppError>;
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<Availability>, AppError>;
    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Availability>, AppError>;
    async fn delete(&self, date: NaiveDate) -> Result<(), AppError>;
}

#[async_trait]
pub trait HeroSlideRepository: Send + Sync {
    async fn create(&self, slide: &HeroSlide) -> Result<HeroSlide, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<HeroSlide>, AppError>;
    async fn update(&self, slide: &HeroSlide) -> Result<HeroSlide, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn list_active(&self) -> Result<Vec<HeroSlide>, AppError>;
    async fn list(&self) -> Result<Vec<HeroSlide>, AppError>;
}

#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    async fn create(&self, post: &BlogPost) -> Result<BlogPost, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<BlogPost>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError>;
    async fn update(&self, post: &BlogPost) -> Result<BlogPost, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn list(&self) -> Result<Vec<BlogPost>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &AdminUser) -> Result<AdminUser, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<AdminUser>, AppError>;
    async fn list(&self) -> Result<Vec<AdminUser>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    /// Due PENDING jobs, oldest first.
    async fn find_pending(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
    /// Pushes a failed job back into the queue at `execute_at`.
    async fn reschedule(&self, id: &str, execute_at: DateTime<Utc>, error_message: Option<String>) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str, attachment_name: Option<&str>, attachment_data: Option<&[u8]>) -> Result<(), AppError>;
}

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> Result<(), AppError>;
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}
