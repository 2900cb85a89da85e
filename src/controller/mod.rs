use crate::di::Injectable;
use axum::Router;
use std::sync::Arc;

/// A group of routes mounted under a common path.
///
/// Controllers are built from the container and own their router; the
/// application nests each router under `base_path()`.
pub trait Controller: Injectable {
    fn base_path() -> &'static str;

    fn router(self: Arc<Self>) -> Router;
}
