//! Product records from the upstream price list
//!
//! The upstream API returns loosely typed JSON objects. A [`Product`] keeps the
//! original record intact so it can be re-emitted unchanged, and exposes typed
//! accessors for the fields the classifiers and views read.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::Error;

/// Field names used by the upstream price list
pub mod fields {
    pub const CODE: &str = "code";
    pub const DESC: &str = "desc";
    pub const NAME: &str = "name";
    pub const CATEGORY: &str = "category";
    pub const BRAND: &str = "brand";
    pub const PRICE: &str = "price";
    pub const STATUS: &str = "status";
}

/// One sellable voucher record.
///
/// A `Product` always carries a non-empty `code` and `desc`; records without
/// them are rejected by [`Product::from_record`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Product {
    record: Map<String, Value>,
}

impl Product {
    /// Validate a raw upstream record.
    ///
    /// Returns `None` when the record is not a JSON object or lacks a
    /// non-empty `code` or `desc`.
    pub fn from_record(record: &Value) -> Option<Self> {
        let object = record.as_object()?;
        let product = Self {
            record: object.clone(),
        };
        if product.text(fields::CODE).is_none() || product.text(fields::DESC).is_none() {
            return None;
        }
        Some(product)
    }

    /// SKU code
    pub fn code(&self) -> Cow<'_, str> {
        self.text(fields::CODE).unwrap_or_default()
    }

    /// Free-text description
    pub fn desc(&self) -> Cow<'_, str> {
        self.text(fields::DESC).unwrap_or_default()
    }

    pub fn name(&self) -> Option<Cow<'_, str>> {
        self.text(fields::NAME)
    }

    pub fn category_hint(&self) -> Option<Cow<'_, str>> {
        self.text(fields::CATEGORY)
    }

    pub fn brand(&self) -> Option<Cow<'_, str>> {
        self.text(fields::BRAND)
    }

    /// Price used for ordering; missing or non-numeric prices count as 0
    pub fn sort_price(&self) -> f64 {
        match self.record.get(fields::PRICE) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Whether the product is currently available ("Open").
    ///
    /// `false`, `0`, `""`, `null` and a missing status are unavailable.
    pub fn is_available(&self) -> bool {
        self.record.get(fields::STATUS).is_some_and(is_truthy)
    }

    /// The untouched upstream record
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// Text of a truthy scalar field.
    ///
    /// Non-zero numbers and `true` are rendered as text. Falsy values
    /// (`""`, `0`, `false`, `null`), arrays and objects count as absent.
    fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        let value = self.record.get(key).filter(|v| is_truthy(v))?;
        match value {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }
}

/// Upstream flags and identifiers follow JavaScript truthiness
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

impl TryFrom<Value> for Product {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Product::from_record(&value).ok_or_else(|| {
            Error::InvalidInput("product record requires non-empty code and desc".to_string())
        })
    }
}
