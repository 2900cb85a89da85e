//! Calls every product endpoint once, in order, against a running server.
//!
//! The server address and timeouts come from `PRODUCT_BASE_URL`,
//! `PRODUCT_CONNECT_TIMEOUT_MS` and `PRODUCT_READ_TIMEOUT_MS`.

use anyhow::{Context, ensure};
use product_rest::client::product_fields;
use product_rest::prelude::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::load(&ConfigService::from_env())?;
    let client = ProductClient::new(&config)?;
    tracing::info!(base_url = client.base_url(), "Invoking product endpoints");

    let text = client.get_product1_text()?;
    ensure!(!text.body.is_empty(), "get_product1 returned an empty body");
    tracing::info!(body = %text.body, "get_product1");

    let fixed = client.get_product1()?;
    tracing::info!(product = %fixed.body, status = %fixed.status, "get_product1 decoded");

    let fetched = client.get_product2(101)?;
    ensure!(fetched.body.id == Some(101), "get_product2 did not echo the id");
    tracing::info!(product = %fetched.body, "get_product2");

    let macbook = Product::new(Some(201), "Macbook", Decimal::from(10000));
    let described = client.get_product3(&macbook)?;
    tracing::info!(body = %described.body, "get_product3");

    let raw_form = product_fields(&macbook)
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");
    let created = client.post_product1_raw(raw_form)?;
    tracing::info!(body = %created.body, "post_product1 (encoded string)");

    let created = client.post_product1(&macbook)?;
    tracing::info!(body = %created.body, "post_product1 (field map)");

    let document = Product::new(Some(2), "Macbook", Decimal::from(10000));
    let created = client.post_product2(&document)?;
    let echoed: Product = created
        .body
        .parse()
        .context("post_product2 did not answer with a product rendering")?;
    ensure!(echoed == document, "post_product2 changed the product");
    tracing::info!(body = %created.body, "post_product2");

    let deleted = client.delete(101)?;
    tracing::info!(body = %deleted.body, "delete");

    let updated = client.update(&Product::new(Some(101), "iWatch", Decimal::from(2333)))?;
    tracing::info!(body = %updated.body, "update");

    let uploaded = client.upload("b.txt", b"product-invoker upload".to_vec())?;
    tracing::info!(body = %uploaded.body, "upload");

    Ok(())
}
