use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{requests::UploadRequest, responses::UploadResponse};
use crate::error::AppError;
use std::sync::Arc;
use base64::{Engine as _, engine::general_purpose};
use uuid::Uuid;
use tracing::info;

fn sanitize_filename(filename: &str) -> String {
    filename.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Json(payload): Json<UploadRequest>,
) -> Result<impl IntoResponse, AppError> {
    let data = general_purpose::STANDARD.decode(&payload.content_base64)
        .map_err(|_| AppError::Validation("content_base64 is not valid base64".into()))?;

    if data.is_empty() {
        return Err(AppError::Validation("File is empty".into()));
    }

    let key = format!("{}-{}", Uuid::new_v4(), sanitize_filename(&payload.filename));
    let content_type = payload.content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    state.storage_service.upload(&key, &data, &content_type).await?;

    info!("Uploaded object: {} ({} bytes)", key, data.len());

    Ok(Json(UploadResponse {
        url: format!("{}/{}", state.config.storage_public_url, key),
        key,
    }))
}

pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.storage_service.remove(&key).await?;
    info!("Removed object: {}", key);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
