use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;

mod layer;
mod logging;

pub use layer::{InterceptorLayer, InterceptorMiddleware};
pub use logging::LoggingInterceptor;

/// standard return type for Interceptors
pub type InterceptorResult = Result<Response, InterceptorError>;

/// A type-erased error for interceptors
pub type InterceptorError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future produced by each link of the chain
pub type InterceptorFuture = Pin<Box<dyn Future<Output = InterceptorResult> + Send>>;

/// Represents the rest of the chain, ending at the routed handler
pub struct Next {
    run: Box<dyn FnOnce(Request<Body>) -> InterceptorFuture + Send>,
}

impl Next {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> InterceptorFuture + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Execute the next handler
    pub async fn run(self, request: Request<Body>) -> InterceptorResult {
        (self.run)(request).await
    }
}

/// The Interceptor trait
///
/// Interceptors can inspect the request before it reaches the handler,
/// and inspect the response after the handler returns.
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult;
}
