use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use expenses_engine::AnnotateError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Weekly expenses unavailable: {0}")]
    Annotation(#[from] AnnotateError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            // Upstream handed us a week with no days
            ApiError::Annotation(AnnotateError::EmptyInput) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
