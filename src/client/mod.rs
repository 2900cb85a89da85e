//! Blocking client for the product endpoints.
//!
//! Each method shapes its request the way the matching endpoint binds it
//! (query string, url-encoded form, JSON body, path segment or multipart)
//! and returns the status together with the decoded body. Non-2xx answers
//! become [`ClientError::Status`]; nothing is retried.

mod error;

pub use error::{ClientError, Result};

use crate::config::ClientConfig;
use crate::product::Product;
use reqwest::blocking::{Client, RequestBuilder, Response, multipart};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// A completed exchange: the status line and the decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange<T> {
    pub status: StatusCode,
    pub body: T,
}

pub struct ProductClient {
    http: Client,
    base_url: String,
}

impl ProductClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /product/get_product1` read as raw text.
    pub fn get_product1_text(&self) -> Result<Exchange<String>> {
        let request = self.http.get(self.url("get_product1"));
        self.text(request)
    }

    /// `GET /product/get_product1` decoded into a product.
    pub fn get_product1(&self) -> Result<Exchange<Product>> {
        let request = self
            .http
            .get(self.url("get_product1"))
            .header(ACCEPT, "application/json");
        self.json(request)
    }

    pub fn get_product2(&self, id: i32) -> Result<Exchange<Product>> {
        let request = self
            .http
            .get(self.url("get_product2"))
            .query(&[("id", id)]);
        self.json(request)
    }

    pub fn get_product3(&self, product: &Product) -> Result<Exchange<String>> {
        let request = self
            .http
            .get(self.url("get_product3"))
            .query(&product_fields(product));
        self.text(request)
    }

    pub fn post_product1(&self, product: &Product) -> Result<Exchange<String>> {
        let request = self
            .http
            .post(self.url("post_product1"))
            .form(&product_fields(product));
        self.text(request)
    }

    /// Sends an already encoded form body, e.g. `id=1&name=a&price=2`.
    pub fn post_product1_raw(&self, body: impl Into<String>) -> Result<Exchange<String>> {
        let request = self
            .http
            .post(self.url("post_product1"))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body.into());
        self.text(request)
    }

    pub fn post_product2(&self, product: &Product) -> Result<Exchange<String>> {
        let request = self
            .http
            .post(self.url("post_product2"))
            .header(ACCEPT, "application/json")
            .json(product);
        self.text(request)
    }

    pub fn delete(&self, id: i32) -> Result<Exchange<String>> {
        let request = self.http.delete(self.url(&format!("delete/{}", id)));
        self.text(request)
    }

    pub fn update(&self, product: &Product) -> Result<Exchange<String>> {
        let request = self
            .http
            .put(self.url("update"))
            .form(&product_fields(product));
        self.text(request)
    }

    /// Uploads `content` as the `file` part named `file_name`.
    pub fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<Exchange<String>> {
        let part = multipart::Part::bytes(content).file_name(file_name.to_string());
        self.upload_form(multipart::Form::new().part("file", part))
    }

    /// Posts an arbitrary multipart form to the upload endpoint.
    pub fn upload_form(&self, form: multipart::Form) -> Result<Exchange<String>> {
        let request = self.http.post(self.url("upload")).multipart(form);
        self.text(request)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/product/{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        tracing::debug!(url = %response.url(), %status, "Exchange completed");

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(response)
    }

    fn text(&self, request: RequestBuilder) -> Result<Exchange<String>> {
        let response = self.send(request)?;
        let status = response.status();
        Ok(Exchange {
            status,
            body: response.text()?,
        })
    }

    fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Exchange<T>> {
        let response = self.send(request)?;
        let status = response.status();
        let bytes = response.bytes()?;
        let body = serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Exchange { status, body })
    }
}

/// The fields a product is bound from, in `id`, `name`, `price` order.
/// A missing id is left out rather than sent empty.
pub fn product_fields(product: &Product) -> Vec<(&'static str, String)> {
    let mut fields = Vec::with_capacity(3);
    if let Some(id) = product.id {
        fields.push(("id", id.to_string()));
    }
    fields.push(("name", product.name.clone()));
    fields.push(("price", product.price.to_string()));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_product_fields_order() {
        let product = Product::new(Some(201), "Macbook", Decimal::from(10000));
        assert_eq!(
            product_fields(&product),
            vec![
                ("id", "201".to_string()),
                ("name", "Macbook".to_string()),
                ("price", "10000".to_string()),
            ]
        );
    }

    #[test]
    fn test_product_fields_skip_missing_id() {
        let product = Product::new(None, "Macbook", Decimal::new(99990, 1));
        let fields = product_fields(&product);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1], ("price", "9999.0".to_string()));
    }

    #[test]
    fn test_base_url_is_normalised() {
        let client = ProductClient::new(&ClientConfig::with_base_url("http://localhost:8080/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("delete/3"), "http://localhost:8080/product/delete/3");
    }
}
