use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier. The backend keys records either by a numeric id or by
/// their canonical URL, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Int(i64),
    Text(String),
}

impl ProductId {
    /// Build an id from a raw JSON value. Numeric strings stay textual so a
    /// URL-keyed catalog and an int-keyed catalog never collide.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(ProductId::Int),
            serde_json::Value::String(s) if !s.trim().is_empty() => {
                Some(ProductId::Text(s.trim().to_string()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Int(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Int(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}
