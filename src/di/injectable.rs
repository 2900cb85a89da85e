use crate::di::Container;
use crate::error::ContainerError;

/// Trait for types that can be built from the DI container
///
/// # Example
/// ```
/// use product_rest::di::{Container, Injectable};
/// use product_rest::error::ContainerError;
/// use product_rest::product::Diagnostics;
/// use std::sync::Arc;
///
/// pub struct AuditTrail {
///     diagnostics: Arc<dyn Diagnostics>,
/// }
///
/// impl Injectable for AuditTrail {
///     fn inject(container: &Container) -> Result<Self, ContainerError> {
///         Ok(Self {
///             diagnostics: container.resolve_trait::<dyn Diagnostics>()?,
///         })
///     }
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Create an instance by resolving dependencies from the container
    ///
    /// # Errors
    /// Returns an error if any required dependency is not found in the container.
    fn inject(container: &Container) -> Result<Self, ContainerError>;
}
