//! Catalog products and lookup results.
//!
//! The product API answers `{"NAME": ..., "PRICE": ..., "CODE": ...}`. Real
//! backends are loose about the types in that object, so `PRICE` and `CODE`
//! are decoded leniently:
//!
//! | `PRICE` on the wire            | decoded as      |
//! |--------------------------------|-----------------|
//! | `120`, `"120"`, `120.0`        | `Some(120円)`   |
//! | `"-"`, `""`, `null`, missing   | `None`          |
//! | `-5`, `"-5"`, `-0.5`           | `None`          |
//!
//! `CODE` may be a string or an integer.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};

use super::code::ProductCode;
use super::price::Price;

/// Text shown in place of a product name when the lookup found nothing.
pub const NOT_FOUND_MESSAGE: &str = "商品が見つかりません";

/// A product returned by the product API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "NAME", default)]
    pub name: String,
    /// `None` when the backend reported no usable price.
    #[serde(rename = "PRICE", default, deserialize_with = "deserialize_price")]
    pub price: Option<Price>,
    #[serde(rename = "CODE", default, deserialize_with = "deserialize_code")]
    pub code: String,
}

impl Product {
    /// Create a product with a known price.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            code: code.into(),
        }
    }
}

/// Outcome of looking a product code up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductLookup {
    /// The backend knows the product.
    Found(Product),
    /// The lookup failed; the code that was searched for is kept for display.
    NotFound {
        /// The code that was looked up.
        code: ProductCode,
    },
}

impl ProductLookup {
    /// Returns the found product, if any.
    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        match self {
            Self::Found(product) => Some(product),
            Self::NotFound { .. } => None,
        }
    }

    /// Name to display: the product name, or [`NOT_FOUND_MESSAGE`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Found(product) => &product.name,
            Self::NotFound { .. } => NOT_FOUND_MESSAGE,
        }
    }

    /// Code to display.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Found(product) => &product.code,
            Self::NotFound { code } => code.as_str(),
        }
    }

    /// Whether this result can be added to the purchase list.
    ///
    /// Only found products with a non-empty name qualify.
    #[must_use]
    pub fn is_addable(&self) -> bool {
        self.product().is_some_and(|p| !p.name.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Integer(i64),
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Integer(u64),
    Text(String),
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawPrice>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| match raw {
        RawPrice::Integer(yen) => non_negative(yen),
        RawPrice::Number(n) => Decimal::try_from(n).ok().and_then(whole_yen),
        RawPrice::Text(s) => parse_price_text(&s),
    }))
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCode>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCode::Integer(n)) => n.to_string(),
        Some(RawCode::Text(s)) => s,
        None => String::new(),
    })
}

fn parse_price_text(s: &str) -> Option<Price> {
    let s = s.trim();
    if let Ok(yen) = s.parse::<i64>() {
        return non_negative(yen);
    }
    s.parse::<Decimal>().ok().and_then(whole_yen)
}

fn whole_yen(d: Decimal) -> Option<Price> {
    if d.is_sign_negative() {
        return None;
    }
    d.trunc().to_i64().and_then(non_negative)
}

fn non_negative(yen: i64) -> Option<Price> {
    (yen >= 0).then(|| Price::new(yen))
}
