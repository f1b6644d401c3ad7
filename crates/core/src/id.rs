//! Strongly-typed identifiers used across the forecasting crates.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Identifier of a product / inventory item.
///
/// Store platforms hand out opaque ids (numeric or string), so the id is kept
/// as trimmed text. An empty id is never constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Create an identifier, rejecting empty or whitespace-only input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ForecastError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ForecastError::missing_id());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ForecastError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_rejects_blank_ids() {
        assert_eq!(ProductId::new("  gid-42 ").unwrap().as_str(), "gid-42");
        assert_eq!(ProductId::new("   ").unwrap_err(), ForecastError::MissingId);
        assert!("".parse::<ProductId>().is_err());
    }

    #[test]
    fn serde_is_transparent_text() {
        let id: ProductId = serde_json::from_str("\"sku-1\"").unwrap();
        assert_eq!(id.to_string(), "sku-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sku-1\"");
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
    }
}
