use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The product resource.
///
/// `id` is absent only on create requests. `price` is fixed-point and never
/// negative once a value has passed through one of the binding pipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

impl Product {
    pub fn new(id: Option<i32>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Renders `Product(id=1, name=ProductA, price=6666.0)`; a missing id is `null`.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Product(id={}, name={}, price={})", id, self.name, self.price),
            None => write!(f, "Product(id=null, name={}, price={})", self.name, self.price),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Not a product rendering: {0}")]
pub struct RenderingParseError(String);

/// Parses the text rendering produced by `Display`. The price is taken from
/// the last `, price=` so names may contain commas.
impl FromStr for Product {
    type Err = RenderingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RenderingParseError(s.to_string());

        let inner = s
            .trim()
            .strip_prefix("Product(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;
        let rest = inner.strip_prefix("id=").ok_or_else(malformed)?;
        let (id, rest) = rest.split_once(", name=").ok_or_else(malformed)?;
        let (name, price) = rest.rsplit_once(", price=").ok_or_else(malformed)?;

        let id = match id {
            "null" => None,
            digits => Some(digits.parse::<i32>().map_err(|_| malformed())?),
        };
        let price = Decimal::from_str(price).map_err(|_| malformed())?;

        Ok(Product::new(id, name, price))
    }
}
