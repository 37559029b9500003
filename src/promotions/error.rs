use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for promotion write-side operations
#[derive(Debug, thiserror::Error)]
pub enum PromotionError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Promotion not found")]
    NotFound,

    #[error("Product not found: {0}")]
    ProductNotFound(i32),

    #[error("Invalid promotion definition: {0}")]
    InvalidDefinition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for PromotionError {
    fn from(err: sqlx::Error) -> Self {
        PromotionError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for PromotionError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            PromotionError::DatabaseError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            PromotionError::NotFound => {
                (StatusCode::NOT_FOUND, "Promotion not found".to_string())
            }
            PromotionError::ProductNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Product with id {} not found", id),
            ),
            PromotionError::InvalidDefinition(msg) => (StatusCode::BAD_REQUEST, msg),
            PromotionError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
