use crate::error::ProductError;
use crate::exception::ExceptionFilter;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::error::Error;

/// Default exception filter rendering errors as a JSON body
/// `{"timestamp", "status", "error", "message"}`.
#[derive(Default)]
pub struct HttpExceptionFilter;

impl ExceptionFilter for HttpExceptionFilter {
    fn catch(&self, error: Box<dyn Error + Send + Sync>) -> Response {
        let (status, code, message) = match error.downcast_ref::<ProductError>() {
            Some(product_error) => {
                tracing::warn!(error = %product_error, "Request rejected");
                (
                    product_error.status(),
                    product_error.code().to_string(),
                    product_error.to_string(),
                )
            }
            None => {
                tracing::error!(error = %error, "Unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError".to_string(),
                    "Internal Server Error".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "status": status.as_u16(),
                "error": code,
                "message": message,
            })),
        )
            .into_response()
    }
}
