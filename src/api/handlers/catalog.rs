use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::responses::CatalogResponse;
use crate::domain::services::catalog::{CatalogParams, CatalogQuery};
use crate::error::AppError;
use std::sync::Arc;

/// Public catalog: filtered, featured-first, 20 per page. Pages past the end
/// come back empty with the true total so the pager can still render.
pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CatalogParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = CatalogQuery::from_params(params)?;
    let (properties, total) = state.property_repo.search(&query).await?;

    Ok(Json(CatalogResponse {
        properties,
        total,
        page: query.page,
        total_pages: CatalogQuery::total_pages(total),
    }))
}

pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let property = state.property_repo.find_by_id(&property_id).await?
        .ok_or(AppError::NotFound("Listing not found".into()))?;

    // Inactive listings are fully hidden from the public site.
    if property.status == "inactive" {
        return Err(AppError::NotFound("Listing not found".into()));
    }

    Ok(Json(property))
}
