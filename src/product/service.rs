use super::diagnostics::Diagnostics;
use super::model::Product;
use crate::di::{Container, Injectable};
use crate::error::{ContainerError, ProductError, Result};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Appended to the rendering of an updated product.
pub const UPDATE_SUCCESS_SUFFIX: &str = " updated successfully";

/// Precedes the original filename in an upload confirmation.
pub const UPLOAD_SUCCESS_PREFIX: &str = "upload success filename: ";

/// Price carried by every product the service makes up.
pub fn catalog_price() -> Decimal {
    Decimal::new(66660, 1)
}

/// Stateless product operations. Nothing is stored; every call builds its
/// answer from its arguments.
pub struct ProductService {
    diagnostics: Arc<dyn Diagnostics>,
}

impl Injectable for ProductService {
    fn inject(container: &Container) -> std::result::Result<Self, ContainerError> {
        Ok(Self::new(container.resolve_trait::<dyn Diagnostics>()?))
    }
}

impl ProductService {
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { diagnostics }
    }

    pub fn fetch_fixed(&self) -> Product {
        Product::new(Some(1), "ProductA", catalog_price())
    }

    pub fn fetch_by_id(&self, id: Option<i32>) -> Result<Product> {
        let id = id.ok_or_else(|| ProductError::InvalidInput("id is required".to_string()))?;
        Ok(Product::new(Some(id), "ProductC", catalog_price()))
    }

    pub fn describe(&self, product: &Product) -> String {
        product.to_string()
    }

    pub fn create(&self, product: &Product) -> String {
        tracing::debug!(name = %product.name, "Creating product");
        product.to_string()
    }

    /// Nothing backs the catalog, so deletion always succeeds.
    pub fn delete(&self, id: i32) -> String {
        let result = format!("Product with id {} deleted successfully", id);
        self.diagnostics.report(&result);
        result
    }

    pub fn update(&self, product: &Product) -> String {
        let result = format!("{}{}", product, UPDATE_SUCCESS_SUFFIX);
        self.diagnostics.report(&result);
        result
    }

    pub fn upload(&self, filename: &str) -> String {
        format!("{}{}", UPLOAD_SUCCESS_PREFIX, filename)
    }
}
