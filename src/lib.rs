//! # product-rest
//!
//! A CRUD-style controller for a `Product` resource, served with axum, and a
//! blocking client exercising every endpoint.
//!
//! Requests are bound explicitly: each encoding (query string, url-encoded
//! form, JSON body, path segment, multipart) goes through a [`pipe::Pipe`]
//! that names the fields it expects and turns failures into
//! [`error::ProductError`]s. Controllers and services are wired through a
//! small DI [`di::Container`], which is also how the diagnostics collaborator
//! reaches the mutating operations.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use product_rest::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let container = app::build_container(Arc::new(TracingDiagnostics))?;
//!     let router = app::build_router(&container)?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     app::serve(listener, router, shutdown_signal()).await?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod di;
pub mod error;
pub mod exception;
pub mod interceptor;
pub mod lifecycle;
pub mod module;
pub mod pipe;
pub mod product;

pub use error::{ContainerError, ProductError, Result};
pub use product::Product;

/// Prelude module for convenient imports
///
/// ```
/// use product_rest::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app;
    pub use crate::client::{ClientError, Exchange, ProductClient};
    pub use crate::config::{ClientConfig, ConfigService, ServerConfig};
    pub use crate::controller::Controller;
    pub use crate::di::{Container, ContainerBuilder, Injectable};
    pub use crate::error::{ContainerError, ErrorCode, ProductError};
    pub use crate::exception::{ExceptionFilter, http::HttpExceptionFilter};
    pub use crate::interceptor::{Interceptor, InterceptorLayer, LoggingInterceptor, Next};
    pub use crate::lifecycle::shutdown_signal;
    pub use crate::module::Module;
    pub use crate::pipe::{Pipe, PipeError, PipeResult};
    pub use crate::product::{
        Diagnostics, Product, ProductController, ProductModule, ProductService, TracingDiagnostics,
    };
}
