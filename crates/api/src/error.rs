//! Error-to-response mapping for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No row matches the requested primary key.
    #[error("resource not found")]
    NotFound,

    /// Caller supplied a negative limit or offset.
    #[error("limit and offset must be non-negative")]
    InvalidPagination,

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Db(#[from] db::DbError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidPagination => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::UnknownColumn { .. }) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::Persistence(_)) | Self::Db(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Backend details are logged, not leaked to the client.
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {self}");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_pagination_maps_to_400() {
        assert_eq!(ApiError::InvalidPagination.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_column_maps_to_400() {
        let err = ApiError::from(ServiceError::UnknownColumn {
            column: "color".into(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn persistence_failure_maps_to_500() {
        let err = ApiError::from(ServiceError::Persistence(sqlx::Error::PoolClosed));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
