//! Review moderation routes.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::review::ReviewSummary;
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::review::{self as review_service, ReviewFilters};
use crate::AppState;

/// GET /api/v1/reviews: moderation queue with filters and pagination.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<ReviewFilters>,
) -> Result<Json<ApiResponse<PagedResult<ReviewSummary>>>, AppError> {
    let page = pagination.request(state.config.list_page_size)?;
    let result = review_service::list(&state.db, &filters, page).await?;
    Ok(ApiResponse::success(result.into()))
}
