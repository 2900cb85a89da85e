use crate::error::ProductError;
use async_trait::async_trait;

pub mod builtins;

pub use builtins::{FieldMap, IdRule, JsonProductPipe, ParseDecimalPipe, ParseIntPipe, ProductFieldsPipe};

pub type PipeResult<T> = Result<T, PipeError>;

#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    #[error("Required field '{0}' is missing")]
    Missing(String),

    #[error("Field '{field}' is invalid: {message}")]
    Validation { field: String, message: String },

    #[error("Transformation failed: {0}")]
    Transformation(String),
}

impl PipeError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<PipeError> for ProductError {
    fn from(err: PipeError) -> Self {
        match err {
            PipeError::Missing(field) => ProductError::binding(field, "required field is missing"),
            PipeError::Validation { field, message } => ProductError::binding(field, message),
            PipeError::Transformation(message) => ProductError::Parse(message),
        }
    }
}

/// The Pipe trait for decoding raw request input into typed values
///
/// Each pipe enumerates the fields it expects and either produces the typed
/// value or explains which field could not be bound.
#[async_trait]
pub trait Pipe: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    async fn transform(&self, input: Self::Input) -> PipeResult<Self::Output>;
}
