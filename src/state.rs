use std::sync::Arc;
use crate::domain::ports::{
    PropertyRepository, ReservationRepository, AvailabilityRepository,
    HeroSlideRepository, BlogPostRepository, UserRepository, AuthRepository,
    JobRepository, EmailService, StorageService,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub property_repo: Arc<dyn PropertyRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub hero_slide_repo: Arc<dyn HeroSlideRepository>,
    pub blog_repo: Arc<dyn BlogPostRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub storage_service: Arc<dyn StorageService>,
    pub templates: Arc<Tera>,
}
