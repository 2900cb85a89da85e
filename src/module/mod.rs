use crate::di::Container;
use crate::error::ContainerError;

/// Trait for application modules
///
/// A module registers its providers and controllers into the container.
/// Dependencies a module expects from outside, such as trait bindings, must
/// be registered before `register` runs.
pub trait Module {
    fn register(container: &mut Container) -> Result<(), ContainerError>;
}
