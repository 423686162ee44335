//! Catering request routes.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::catering_request::CateringRequestSummary;
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::catering::{self as catering_service, CateringFilters};
use crate::AppState;

/// GET /api/v1/catering: list catering requests, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<CateringFilters>,
) -> Result<Json<ApiResponse<PagedResult<CateringRequestSummary>>>, AppError> {
    let page = pagination.request(state.config.list_page_size)?;
    let result = catering_service::list(&state.db, &filters, page).await?;
    Ok(ApiResponse::success(result.into()))
}
