use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub notify_email: String,
    pub storage_service_url: String,
    pub storage_service_token: String,
    pub storage_public_url: String,
    pub site_name: String,
    pub frontend_url: String,
    pub site_timezone: String,
    pub jwt_secret_key: String, // Private key (PEM)
    pub jwt_public_key: String, // Public key (PEM)
    pub auth_issuer: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            notify_email: env::var("NOTIFY_EMAIL").unwrap_or_else(|_| "office@estate.local".to_string()),
            storage_service_url: env::var("STORAGE_SERVICE_URL").unwrap_or_else(|_| "http://localhost:9000/storage/v1/object".to_string()),
            storage_service_token: env::var("STORAGE_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            storage_public_url: env::var("STORAGE_PUBLIC_URL").unwrap_or_else(|_| "http://localhost:9000/storage/v1/object/public".to_string()),
            site_name: env::var("SITE_NAME").unwrap_or_else(|_| "Estate".to_string()),
            frontend_url: env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string()),
            site_timezone: env::var("SITE_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
            jwt_secret_key: env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set (Ed25519 Private Key)"),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").expect("JWT_PUBLIC_KEY must be set (Ed25519 Public Key)"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.estate.local".to_string()),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "change-me".to_string()),
        }
    }
}
