use crate::pipe::{Pipe, PipeError, PipeResult};
use crate::product::Product;
use async_trait::async_trait;
use axum::body::Bytes;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Key/value pairs carried by a query string or an url-encoded form.
///
/// Repeated keys keep their order; lookups return the first value.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    pairs: Vec<(String, String)>,
}

impl FieldMap {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Like [`FieldMap::get`], but a blank value counts as absent.
    pub fn present(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }

    fn require(&self, name: &str) -> PipeResult<&str> {
        self.get(name).ok_or_else(|| PipeError::Missing(name.to_string()))
    }
}

impl From<Vec<(String, String)>> for FieldMap {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

/// Whether a product decoder insists on an `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRule {
    Optional,
    Required,
}

/// Parses a string into an `i32`
#[derive(Debug, Clone, Copy)]
pub struct ParseIntPipe {
    field: &'static str,
}

impl ParseIntPipe {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

#[async_trait]
impl Pipe for ParseIntPipe {
    type Input = String;
    type Output = i32;

    async fn transform(&self, input: String) -> PipeResult<i32> {
        parse_int(self.field, &input)
    }
}

/// Parses a string into a non-negative `Decimal`
#[derive(Debug, Clone, Copy)]
pub struct ParseDecimalPipe {
    field: &'static str,
}

impl ParseDecimalPipe {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

#[async_trait]
impl Pipe for ParseDecimalPipe {
    type Input = String;
    type Output = Decimal;

    async fn transform(&self, input: String) -> PipeResult<Decimal> {
        parse_price(self.field, &input)
    }
}

/// Binds `id`, `name` and `price` from query or form fields.
#[derive(Debug, Clone, Copy)]
pub struct ProductFieldsPipe {
    id: IdRule,
}

impl ProductFieldsPipe {
    pub fn new(id: IdRule) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Pipe for ProductFieldsPipe {
    type Input = FieldMap;
    type Output = Product;

    async fn transform(&self, fields: FieldMap) -> PipeResult<Product> {
        let id = match (fields.present("id"), self.id) {
            (Some(raw), _) => Some(ParseIntPipe::new("id").transform(raw.to_string()).await?),
            (None, IdRule::Optional) => None,
            (None, IdRule::Required) => return Err(PipeError::Missing("id".to_string())),
        };
        let name = fields.require("name")?;
        let price = ParseDecimalPipe::new("price")
            .transform(fields.require("price")?.to_string())
            .await?;

        Ok(Product::new(id, name, price))
    }
}

/// Decodes a JSON document `{"id", "name", "price"}` into a product.
#[derive(Debug, Clone, Copy)]
pub struct JsonProductPipe {
    id: IdRule,
}

impl JsonProductPipe {
    pub fn new(id: IdRule) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Pipe for JsonProductPipe {
    type Input = Bytes;
    type Output = Product;

    async fn transform(&self, body: Bytes) -> PipeResult<Product> {
        let document: Value = serde_json::from_slice(&body)
            .map_err(|e| PipeError::Transformation(e.to_string()))?;
        let Value::Object(fields) = document else {
            return Err(PipeError::Transformation(
                "expected a JSON object".to_string(),
            ));
        };

        let id = match fields.get("id") {
            None | Some(Value::Null) if self.id == IdRule::Optional => None,
            None | Some(Value::Null) => return Err(PipeError::Missing("id".to_string())),
            Some(Value::Number(number)) => Some(
                number
                    .as_i64()
                    .and_then(|id| i32::try_from(id).ok())
                    .ok_or_else(|| {
                        PipeError::validation("id", format!("'{}' is not a valid integer", number))
                    })?,
            ),
            Some(other) => {
                return Err(PipeError::validation(
                    "id",
                    format!("expected an integer, found {}", other),
                ));
            }
        };

        let name = match fields.get("name") {
            Some(Value::String(name)) => name.clone(),
            None | Some(Value::Null) => return Err(PipeError::Missing("name".to_string())),
            Some(other) => {
                return Err(PipeError::validation(
                    "name",
                    format!("expected a string, found {}", other),
                ));
            }
        };

        let price = match fields.get("price") {
            // Numbers keep their source text, so the digits reach `Decimal` untouched.
            Some(Value::Number(number)) => parse_price("price", &number.to_string())?,
            Some(Value::String(raw)) => parse_price("price", raw)?,
            None | Some(Value::Null) => return Err(PipeError::Missing("price".to_string())),
            Some(other) => {
                return Err(PipeError::validation(
                    "price",
                    format!("expected a number, found {}", other),
                ));
            }
        };

        Ok(Product::new(id, name, price))
    }
}

fn parse_int(field: &str, raw: &str) -> PipeResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| PipeError::validation(field, format!("'{}' is not a valid integer", raw)))
}

fn parse_price(field: &str, raw: &str) -> PipeResult<Decimal> {
    let raw = raw.trim();
    let price = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| PipeError::validation(field, format!("'{}' is not a valid decimal", raw)))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(PipeError::validation(field, "must not be negative"));
    }
    Ok(price)
}
