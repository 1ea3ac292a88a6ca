pub mod postgres_auth_repo;
pub mod postgres_availability_repo;
pub mod postgres_blog_repo;
pub mod postgres_hero_slide_repo;
pub mod postgres_job_repo;
pub mod postgres_property_repo;
pub mod postgres_reservation_repo;
pub mod postgres_user_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_availability_repo;
pub mod sqlite_blog_repo;
pub mod sqlite_hero_slide_repo;
pub mod sqlite_job_repo;
pub mod sqlite_property_repo;
pub mod sqlite_reservation_repo;
pub mod sqlite_user_repo;
