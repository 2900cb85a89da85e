//! The product resource: model, decoding-aware controller, stateless service
//! and the diagnostics collaborator used by mutating operations.

pub mod controller;
pub mod diagnostics;
pub mod model;
pub mod service;

pub use controller::ProductController;
pub use diagnostics::{Diagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use model::{Product, RenderingParseError};
pub use service::{ProductService, UPDATE_SUCCESS_SUFFIX, UPLOAD_SUCCESS_PREFIX};

use crate::di::{Container, Injectable};
use crate::error::ContainerError;
use crate::module::Module;

/// Registers `ProductService` and `ProductController`.
///
/// Requires a `dyn Diagnostics` binding in the container.
pub struct ProductModule;

impl Module for ProductModule {
    fn register(container: &mut Container) -> Result<(), ContainerError> {
        let service = ProductService::inject(container).map_err(|e| {
            ContainerError::ModuleRegistrationFailed {
                message: format!("ProductService: {}", e),
            }
        })?;
        container.register(service);

        let controller = ProductController::inject(container).map_err(|e| {
            ContainerError::ModuleRegistrationFailed {
                message: format!("ProductController: {}", e),
            }
        })?;
        container.register(controller);

        tracing::debug!("ProductModule registered");
        Ok(())
    }
}
