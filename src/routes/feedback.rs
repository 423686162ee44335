use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::feedback::FeedbackSummary;
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::feedback::{self as feedback_service, FeedbackFilters};
use crate::AppState;

/// GET /api/v1/feedback
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<FeedbackFilters>,
) -> Result<Json<ApiResponse<PagedResult<FeedbackSummary>>>, AppError> {
    let page = pagination.request(state.config.list_page_size)?;
    let result = feedback_service::list(&state.db, &filters, page).await?;
    Ok(ApiResponse::success(result.into()))
}
