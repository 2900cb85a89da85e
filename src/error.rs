use crate::exception::{ExceptionFilter, http::HttpExceptionFilter};
use axum::http::StatusCode;
use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProductError>;

/// Errors raised while handling a product request.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to bind field '{field}': {message}")]
    Binding { field: String, message: String },

    #[error("Malformed request body: {0}")]
    Parse(String),

    #[error("Required multipart field '{0}' is missing")]
    MissingPart(String),
}

/// Machine-readable name reported in the `error` field of an error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum ErrorCode {
    InvalidInput,
    BindingError,
    ParseError,
    MissingPart,
}

impl ProductError {
    pub fn binding(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Binding {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProductError::InvalidInput(_) => ErrorCode::InvalidInput,
            ProductError::Binding { .. } => ErrorCode::BindingError,
            ProductError::Parse(_) => ErrorCode::ParseError,
            ProductError::MissingPart(_) => ErrorCode::MissingPart,
        }
    }

    /// Every request error is the caller's fault.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl axum::response::IntoResponse for ProductError {
    fn into_response(self) -> axum::response::Response {
        HttpExceptionFilter.catch(Box::new(self))
    }
}

/// Errors raised by the dependency injection container.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("Module registration failed: {message}")]
    ModuleRegistrationFailed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_variants() {
        assert_eq!(
            ProductError::InvalidInput("id".into()).code(),
            ErrorCode::InvalidInput
        );
        assert_eq!(
            ProductError::binding("price", "not a number").code(),
            ErrorCode::BindingError
        );
        assert_eq!(ProductError::Parse("eof".into()).code(), ErrorCode::ParseError);
        assert_eq!(
            ProductError::MissingPart("file".into()).code(),
            ErrorCode::MissingPart
        );
    }

    #[test]
    fn test_code_display_is_variant_name() {
        assert_eq!(ErrorCode::BindingError.to_string(), "BindingError");
        let name: &'static str = ErrorCode::MissingPart.into();
        assert_eq!(name, "MissingPart");
    }

    #[test]
    fn test_binding_message_names_field() {
        let err = ProductError::binding("price", "must not be negative");
        assert_eq!(
            err.to_string(),
            "Failed to bind field 'price': must not be negative"
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
