use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateHeroSlideRequest, UpdateHeroSlideRequest};
use crate::domain::models::hero_slide::HeroSlide;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn list_active_slides(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let slides = state.hero_slide_repo.list_active().await?;
    Ok(Json(slides))
}

pub async fn list_slides(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let slides = state.hero_slide_repo.list().await?;
    Ok(Json(slides))
}

pub async fn create_slide(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Json(payload): Json<CreateHeroSlideRequest>,
) -> Result<impl IntoResponse, AppError> {
    let slide = HeroSlide::new(
        payload.image,
        payload.title,
        payload.highlight,
        payload.subtitle,
        payload.active.unwrap_or(true),
        payload.sort_order.unwrap_or(0),
    );

    let created = state.hero_slide_repo.create(&slide).await?;
    info!("Hero slide created: {}", created.id);
    Ok(Json(created))
}

pub async fn update_slide(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(slide_id): Path<String>,
    Json(payload): Json<UpdateHeroSlideRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut slide = state.hero_slide_repo.find_by_id(&slide_id).await?
        .ok_or(AppError::NotFound("Slide not found".into()))?;

    if let Some(val) = payload.image { slide.image = val; }
    if let Some(val) = payload.title { slide.title = val; }
    if let Some(val) = payload.highlight {
        slide.highlight = if val.is_empty() { None } else { Some(val) };
    }
    if let Some(val) = payload.subtitle {
        slide.subtitle = if val.is_empty() { None } else { Some(val) };
    }
    if let Some(val) = payload.active { slide.active = val; }
    if let Some(val) = payload.sort_order { slide.sort_order = val; }
    slide.updated_at = Utc::now();

    let updated = state.hero_slide_repo.update(&slide).await?;
    info!("Hero slide updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_slide(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(slide_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.hero_slide_repo.delete(&slide_id).await?;
    info!("Hero slide deleted: {}", slide_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
