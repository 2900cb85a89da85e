//! Application wiring: container, router and server loop.

use crate::controller::Controller;
use crate::di::{Container, ContainerBuilder};
use crate::error::ContainerError;
use crate::interceptor::{InterceptorLayer, LoggingInterceptor};
use crate::module::Module;
use crate::product::{Diagnostics, ProductController, ProductModule};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the container with `diagnostics` bound as the `dyn Diagnostics`
/// collaborator and every module registered.
pub fn build_container<D>(diagnostics: Arc<D>) -> Result<Container, ContainerError>
where
    D: Diagnostics + 'static,
{
    let mut container = ContainerBuilder::new()
        .register_arc(diagnostics)
        .bind::<dyn Diagnostics, D, _>(|d| d as Arc<dyn Diagnostics>)
        .build();

    ProductModule::register(&mut container)?;
    Ok(container)
}

/// Nests every controller under its base path and installs request logging.
pub fn build_router(container: &Container) -> Result<Router, ContainerError> {
    let product_controller = container.resolve::<ProductController>()?;

    Ok(Router::new()
        .nest(
            ProductController::base_path(),
            product_controller.router(),
        )
        .layer(InterceptorLayer::new(vec![Box::new(LoggingInterceptor)])))
}

/// Serves `router` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Server running on http://{}", addr);
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
