//! Order routes.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::order::OrderSummary;
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::order::{self as order_service, OrderFilters};
use crate::AppState;

/// GET /api/v1/orders: list orders; accepts `sort` and `dir`.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<OrderFilters>,
) -> Result<Json<ApiResponse<PagedResult<OrderSummary>>>, AppError> {
    let page = pagination.request(state.config.list_page_size)?;
    let result = order_service::list(&state.db, &filters, page).await?;
    Ok(ApiResponse::success(result.into()))
}
