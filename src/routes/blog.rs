//! Blog admin routes.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::blog_post::BlogPostSummary;
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::blog::{self as blog_service, BlogFilters};
use crate::AppState;

/// GET /api/v1/blog: list posts by status, category, text and creation date.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<BlogFilters>,
) -> Result<Json<ApiResponse<PagedResult<BlogPostSummary>>>, AppError> {
    let page = pagination.request(state.config.list_page_size)?;
    let result = blog_service::list(&state.db, &filters, page).await?;
    Ok(ApiResponse::success(result.into()))
}
