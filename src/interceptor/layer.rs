use crate::interceptor::{Interceptor, InterceptorFuture, Next};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer running a shared chain of interceptors around every request.
///
/// The first interceptor in the list is the outermost one.
#[derive(Clone)]
pub struct InterceptorLayer {
    interceptors: Arc<Vec<Box<dyn Interceptor>>>,
}

impl InterceptorLayer {
    pub fn new(interceptors: Vec<Box<dyn Interceptor>>) -> Self {
        Self {
            interceptors: Arc::new(interceptors),
        }
    }
}

impl<S> Layer<S> for InterceptorLayer {
    type Service = InterceptorMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InterceptorMiddleware {
            inner,
            interceptors: Arc::clone(&self.interceptors),
        }
    }
}

#[derive(Clone)]
pub struct InterceptorMiddleware<S> {
    inner: S,
    interceptors: Arc<Vec<Box<dyn Interceptor>>>,
}

impl<S> Service<Request<Body>> for InterceptorMiddleware<S>
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let interceptors = Arc::clone(&self.interceptors);
        // Keep the service that was driven to readiness, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut chain = Next::new(move |req| -> InterceptorFuture {
                Box::pin(async move {
                    match inner.call(req).await {
                        Ok(response) => Ok(response),
                        Err(never) => match never {},
                    }
                })
            });

            for index in (0..interceptors.len()).rev() {
                let shared = Arc::clone(&interceptors);
                let next = chain;
                chain = Next::new(move |req| -> InterceptorFuture {
                    Box::pin(async move { shared[index].intercept(req, next).await })
                });
            }

            match chain.run(request).await {
                Ok(response) => Ok(response),
                Err(e) => {
                    tracing::error!(error = %e, "Interceptor chain failed");
                    Ok(StatusCode::INTERNAL_SERVER_ERROR.into_response())
                }
            }
        })
    }
}
