use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::user::AdminUser;
use crate::domain::services::auth_service::AuthService;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::storage::http_storage_service::HttpStorageService;
use crate::infra::repositories::{
    postgres_property_repo::PostgresPropertyRepo, postgres_reservation_repo::PostgresReservationRepo,
    postgres_availability_repo::PostgresAvailabilityRepo, postgres_hero_slide_repo::PostgresHeroSlideRepo,
    postgres_blog_repo::PostgresBlogRepo, postgres_user_repo::PostgresUserRepo,
    postgres_auth_repo::PostgresAuthRepo, postgres_job_repo::PostgresJobRepo,
    sqlite_property_repo::SqlitePropertyRepo, sqlite_reservation_repo::SqliteReservationRepo,
    sqlite_availability_repo::SqliteAvailabilityRepo, sqlite_hero_slide_repo::SqliteHeroSlideRepo,
    sqlite_blog_repo::SqliteBlogRepo, sqlite_user_repo::SqliteUserRepo,
    sqlite_auth_repo::SqliteAuthRepo, sqlite_job_repo::SqliteJobRepo,
};

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("booking_notification.html", include_str!("../templates/booking_notification.html"))
        .expect("Failed to load booking notification template");
    tera.add_raw_template("booking_confirmation.html", include_str!("../templates/booking_confirmation.html"))
        .expect("Failed to load booking confirmation template");
    tera.add_raw_template("booking_rejection.html", include_str!("../templates/booking_rejection.html"))
        .expect("Failed to load booking rejection template");
    tera.add_raw_template("contact_message.html", include_str!("../templates/contact_message.html"))
        .expect("Failed to load contact template");
    tera
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));
    let storage_service = Arc::new(HttpStorageService::new(
        config.storage_service_url.clone(),
        config.storage_service_token.clone(),
    ));

    let templates = Arc::new(load_templates());

    let state = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            property_repo: Arc::new(PostgresPropertyRepo::new(pool.clone())),
            reservation_repo: Arc::new(PostgresReservationRepo::new(pool.clone())),
            availability_repo: Arc::new(PostgresAvailabilityRepo::new(pool.clone())),
            hero_slide_repo: Arc::new(PostgresHeroSlideRepo::new(pool.clone())),
            blog_repo: Arc::new(PostgresBlogRepo::new(pool.clone())),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            auth_repo,
            job_repo: Arc::new(PostgresJobRepo::new(pool.clone())),
            auth_service,
            email_service,
            storage_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            property_repo: Arc::new(SqlitePropertyRepo::new(pool.clone())),
            reservation_repo: Arc::new(SqliteReservationRepo::new(pool.clone())),
            availability_repo: Arc::new(SqliteAvailabilityRepo::new(pool.clone())),
            hero_slide_repo: Arc::new(SqliteHeroSlideRepo::new(pool.clone())),
            blog_repo: Arc::new(SqliteBlogRepo::new(pool.clone())),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            auth_service,
            email_service,
            storage_service,
            templates,
        }
    };

    seed_default_admin(&state).await;
    state
}

/// Single-tenant bootstrap: the first start creates the back-office login
/// from ADMIN_USERNAME / ADMIN_PASSWORD.
async fn seed_default_admin(state: &AppState) {
    let existing = state.user_repo.count().await.expect("Failed to query admin users");
    if existing > 0 {
        return;
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(state.config.admin_password.as_bytes(), &salt)
        .expect("Failed to hash admin password")
        .to_string();

    let admin = AdminUser::new(state.config.admin_username.clone(), password_hash);
    state.user_repo.create(&admin).await.expect("Failed to seed admin user");
    info!("Seeded default admin user '{}'", admin.username);
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
