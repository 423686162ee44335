//! Unified error handling with consistent API response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::listing::ListQueryError;

/// Error detail in the API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for all API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("List query error: {0}")]
    ListQuery(ListQueryError),
}

impl AppError {
    /// Check if this error is the client's fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Validation(_))
    }
}

impl From<ListQueryError> for AppError {
    fn from(err: ListQueryError) -> Self {
        match err {
            // Bad client input is a 400; everything else stays a server fault.
            ListQueryError::InvalidValue { field, value } => {
                AppError::Validation(format!("invalid value '{value}' for '{field}'"))
            }
            other => AppError::ListQuery(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort_unstable();
        AppError::Validation(format!("invalid filter parameters: {}", fields.join(", ")))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::debug!(error = %self, "Request rejected");
        }

        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::ListQuery(e) => {
                if e.is_configuration() {
                    tracing::error!(error = %e, "List query misconfigured");
                } else {
                    tracing::error!(error = %e, "List query failed");
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()> {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message,
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::DataSourceError;

    #[test]
    fn api_response_success() {
        let response = ApiResponse::success("hello");
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["data"], "hello");
        assert!(json["error"].is_null());
    }

    #[test]
    fn not_found_renders_error_envelope() {
        let response = AppError::NotFound("No such route".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn not_found_is_client_error() {
        let err = AppError::NotFound("route".to_string());
        assert!(err.is_client_error());
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Validation("search is too long".to_string());
        assert_eq!(err.to_string(), "Validation error: search is too long");
    }

    #[test]
    fn invalid_filter_value_is_client_error() {
        let err: AppError = ListQueryError::InvalidValue {
            field: "created_at".into(),
            value: "yesterday".into(),
        }
        .into();
        assert!(err.is_client_error());
        assert_eq!(
            err.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn configuration_error_fails_loudly() {
        let err: AppError = ListQueryError::Configuration("column 'x' is not filterable".into()).into();
        assert!(!err.is_client_error());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn data_source_error_is_server_error() {
        let err: AppError =
            ListQueryError::from(DataSourceError::new("connection refused")).into();
        assert!(matches!(err, AppError::ListQuery(ListQueryError::DataSource(_))));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
