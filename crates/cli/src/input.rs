//! JSON input loading.
//!
//! Files may hold a bare array or an envelope object such as
//! `{"products": [...]}`; both shapes come out of the data connector.
//! A document of the wrong shape is an error; a single bad entry is not.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use stockcast_forecast::SimulationScenario;
use stockcast_inventory::{
    InventoryItem, OrderRecord, ProductRecord, deserialize_each, enrich_with_order_history,
    normalize_products,
};

use crate::args::SourceArgs;

pub const PRODUCT_KEYS: &[&str] = &["products", "items"];
pub const ORDER_KEYS: &[&str] = &["orders"];
pub const SCENARIO_KEYS: &[&str] = &["scenarios"];

pub fn read_json(path: &Path) -> Result<JsonValue> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Extract a list from a bare array or from the first matching envelope key.
///
/// Entries are decoded one at a time; those that do not fit `T` are logged
/// and dropped.
pub fn list_from<T: DeserializeOwned>(value: &JsonValue, keys: &[&str]) -> Result<Vec<T>> {
    let kind = keys.first().copied().unwrap_or("entries");
    let entries = match value {
        JsonValue::Array(entries) => entries,
        JsonValue::Object(map) => match keys.iter().find_map(|k| map.get(*k).map(|v| (*k, v))) {
            Some((_, JsonValue::Array(entries))) => entries,
            Some((key, _)) => bail!("`{key}` must be an array"),
            None => bail!("expected an array or an object with one of: {}", keys.join(", ")),
        },
        _ => bail!("expected an array or an object with one of: {}", keys.join(", ")),
    };

    let decoded: Vec<T> = deserialize_each(entries.iter().cloned(), kind);
    if decoded.len() < entries.len() {
        warn!(kind, total = entries.len(), skipped = entries.len() - decoded.len(), "dropped malformed entries");
    }
    Ok(decoded)
}

/// Optional list: `None` when the envelope does not carry any of `keys`.
pub fn optional_list_from<T: DeserializeOwned>(value: &JsonValue, keys: &[&str]) -> Result<Option<Vec<T>>> {
    match value {
        JsonValue::Object(map) if keys.iter().any(|k| map.contains_key(*k)) => list_from(value, keys).map(Some),
        _ => Ok(None),
    }
}

/// Load, normalize and (when orders are given) enrich the products.
///
/// Returns the raw products document too, so callers can look for extra keys.
pub fn load_items(source: &SourceArgs) -> Result<(Vec<InventoryItem>, JsonValue)> {
    let document = read_json(&source.products)?;
    let records: Vec<ProductRecord> = list_from(&document, PRODUCT_KEYS)
        .with_context(|| format!("failed to load products from {}", source.products.display()))?;
    let mut items = normalize_products(records);

    if let Some(path) = &source.orders {
        let orders: Vec<OrderRecord> = list_from(&read_json(path)?, ORDER_KEYS)
            .with_context(|| format!("failed to load orders from {}", path.display()))?;
        enrich_with_order_history(&mut items, &orders);
    }

    if items.is_empty() {
        warn!(path = %source.products.display(), "no usable products in input");
    }
    info!(items = items.len(), "loaded inventory items");
    Ok((items, document))
}

/// Scenarios from an explicit file, else from the products document, else none.
pub fn load_scenarios(path: Option<&Path>, products_document: &JsonValue) -> Result<Option<Vec<SimulationScenario>>> {
    match path {
        Some(path) => {
            let scenarios = list_from(&read_json(path)?, SCENARIO_KEYS)
                .with_context(|| format!("failed to load scenarios from {}", path.display()))?;
            Ok(Some(scenarios))
        }
        None => optional_list_from(products_document, SCENARIO_KEYS),
    }
}
