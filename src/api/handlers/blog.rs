use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateBlogPostRequest, UpdateBlogPostRequest};
use crate::domain::models::blog_post::{is_valid_slug, BlogPost, NewBlogPostParams};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

fn validate_post_status(status: &str) -> Result<(), AppError> {
    match status {
        "draft" | "published" => Ok(()),
        _ => Err(AppError::Validation("Invalid status".into())),
    }
}

pub async fn list_published_posts(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let posts = state.blog_repo.list_published().await?;
    Ok(Json(posts))
}

pub async fn get_published_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = state.blog_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Post not found".into()))?;

    if post.status != "published" {
        return Err(AppError::NotFound("Post not found".into()));
    }

    Ok(Json(post))
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Json(payload): Json<CreateBlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_slug(&payload.slug) {
        return Err(AppError::Validation("Slug must be lowercase letters, digits and hyphens".into()));
    }

    let status = payload.status.unwrap_or_else(|| "draft".to_string());
    validate_post_status(&status)?;

    if state.blog_repo.find_by_slug(&payload.slug).await?.is_some() {
        return Err(AppError::Conflict("Slug already exists".into()));
    }

    let post = BlogPost::new(NewBlogPostParams {
        title: payload.title,
        slug: payload.slug,
        excerpt: payload.excerpt,
        content: payload.content,
        featured_image: payload.featured_image,
        author: payload.author,
        status,
        featured: payload.featured.unwrap_or(false),
    });

    let created = state.blog_repo.create(&post).await?;
    info!("Blog post created: {}", created.slug);
    Ok(Json(created))
}

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let posts = state.blog_repo.list().await?;
    Ok(Json(posts))
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(post_id): Path<String>,
    Json(payload): Json<UpdateBlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut post = state.blog_repo.find_by_id(&post_id).await?
        .ok_or(AppError::NotFound("Post not found".into()))?;

    if let Some(val) = payload.title { post.title = val; }
    if let Some(val) = payload.slug {
        if !is_valid_slug(&val) {
            return Err(AppError::Validation("Slug must be lowercase letters, digits and hyphens".into()));
        }
        if val != post.slug && state.blog_repo.find_by_slug(&val).await?.is_some() {
            return Err(AppError::Conflict("Slug already exists".into()));
        }
        post.slug = val;
    }
    if let Some(val) = payload.excerpt { post.excerpt = val; }
    if let Some(val) = payload.content { post.content = val; }
    if let Some(val) = payload.featured_image {
        post.featured_image = if val.is_empty() { None } else { Some(val) };
    }
    if let Some(val) = payload.author { post.author = val; }
    if let Some(val) = payload.status {
        validate_post_status(&val)?;
        // published_at marks the moment of going live, not the last edit.
        if val == "published" && post.status != "published" {
            post.published_at = Some(Utc::now());
        }
        post.status = val;
    }
    if let Some(val) = payload.featured { post.featured = val; }
    post.updated_at = Utc::now();

    let updated = state.blog_repo.update(&post).await?;
    info!("Blog post updated: {}", updated.slug);
    Ok(Json(updated))
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    _admin: AuthUser,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.blog_repo.delete(&post_id).await?;
    info!("Blog post deleted: {}", post_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
