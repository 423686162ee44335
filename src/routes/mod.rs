//! Route definitions for the caterdesk admin API.

pub mod blog;
pub mod catering;
pub mod customer;
pub mod feedback;
pub mod health;
pub mod order;
pub mod review;

use axum::routing::get;
use axum::Router;

use crate::errors::AppError;
use crate::AppState;

/// All routes, with state applied. Middleware layers are added by the caller.
pub fn router(state: AppState) -> Router {
    let list_routes = Router::new()
        .route("/blog", get(blog::list))
        .route("/catering", get(catering::list))
        .route("/customers", get(customer::list))
        .route("/feedback", get(feedback::list))
        .route("/orders", get(order::list))
        .route("/reviews", get(review::list));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", list_routes)
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}
