//! Customer routes.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::customer::CustomerSummary;
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::customer::{self as customer_service, CustomerFilters};
use crate::AppState;

/// GET /api/v1/customers: list customers; accepts `sort` and `dir`.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<CustomerFilters>,
) -> Result<Json<ApiResponse<PagedResult<CustomerSummary>>>, AppError> {
    let page = pagination.request(state.config.list_page_size)?;
    let result = customer_service::list(&state.db, &filters, page).await?;
    Ok(ApiResponse::success(result.into()))
}
