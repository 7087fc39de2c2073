//! API error type with IntoResponse
//!
//! Errors become plain-text responses. Client mistakes get a short fixed
//! message; backend failures echo the store's error text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed id, query parameter or body (400)
    BadRequest(&'static str),

    /// No row with this id (404)
    NotFound { resource: &'static str, id: i64 },

    /// Store or connectivity failure (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource = resource, id = id, "not found");
                (StatusCode::NOT_FOUND, "not found").into_response()
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        tracing::debug!("rejected body: {}", e);
        Self::BadRequest("invalid body")
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::from(ValidationError::Empty { field: "name" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "invalid body");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::from(DbError::NotFound {
            resource: "item",
            id: 3,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "not found");
    }

    #[tokio::test]
    async fn backend_error_is_500_with_message() {
        let err = ApiError::from(DbError::Constraint("fk violated".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "fk violated");
    }
}
