//! Boundary records as delivered by the store data connector.
//!
//! These mirror the connector's loose JSON: ids may be numbers or strings,
//! prices may be text, velocity may be a bare number or a breakdown. All of
//! it is normalized here, once, into [`InventoryItem`] so the forecasting
//! engine never has to inspect shapes.
//!
//! A field of the wrong JSON type never fails its record: it lands in an
//! `Other` variant and falls back to its default. Lists are decoded entry by
//! entry ([`deserialize_each`]) so one unusable entry only drops itself.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use stockcast_core::{ForecastError, ProductId};

use crate::item::{
    DEFAULT_HOLDING_COST_RATE, DEFAULT_LEAD_TIME_DAYS, DEFAULT_ORDER_COST, InventoryItem, SaleRecord,
};
use crate::velocity::SalesVelocity;

/// Product / order identifier as found on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
    Other(JsonValue),
}

impl RawId {
    pub fn to_product_id(&self) -> Result<ProductId, ForecastError> {
        match self {
            RawId::Number(n) => ProductId::new(n.to_string()),
            RawId::Text(s) => ProductId::new(s),
            RawId::Other(v) => Err(ForecastError::invalid_input(format!("unsupported id {v}"))),
        }
    }
}

/// Text that may arrive as a JSON string or as a number (`"sku": 1042`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Text(String),
    Other(JsonValue),
}

impl TextField {
    /// Non-blank text, or `None` when the field holds no usable text.
    pub fn text(&self) -> Option<String> {
        let text = match self {
            TextField::Text(s) => s.trim().to_string(),
            TextField::Other(JsonValue::Number(n)) => n.to_string(),
            TextField::Other(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

/// A number that may arrive as JSON number or as text (`"19.99"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
    Other(JsonValue),
}

impl NumericField {
    /// Finite numeric value, or `None` when the field is not a usable number.
    pub fn value(&self) -> Option<f64> {
        let v = match self {
            NumericField::Number(n) => *n,
            NumericField::Text(s) => s.trim().parse::<f64>().ok()?,
            NumericField::Other(_) => return None,
        };
        v.is_finite().then_some(v)
    }
}

/// Reported velocity: either a bare daily number or a `{daily, weekly, monthly}` map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VelocityRecord {
    Daily(f64),
    Breakdown {
        #[serde(default)]
        daily: Option<NumericField>,
        #[serde(default)]
        weekly: Option<NumericField>,
        #[serde(default)]
        monthly: Option<NumericField>,
    },
    Other(JsonValue),
}

impl VelocityRecord {
    /// Normalized velocity, or `None` when nothing positive was reported.
    pub fn to_velocity(&self) -> Option<SalesVelocity> {
        let daily = match self {
            VelocityRecord::Daily(d) => Some(*d),
            VelocityRecord::Breakdown {
                daily,
                weekly,
                monthly,
            } => {
                let daily = daily.as_ref().and_then(NumericField::value);
                let weekly = weekly.as_ref().and_then(NumericField::value);
                let monthly = monthly.as_ref().and_then(NumericField::value);
                daily
                    .filter(|d| *d > 0.0)
                    .or_else(|| weekly.map(|w| w / 7.0))
                    .or_else(|| monthly.map(|m| m / 30.0))
            }
            VelocityRecord::Other(_) => None,
        }?;
        let velocity = SalesVelocity::from_daily(daily);
        (!velocity.is_zero()).then_some(velocity)
    }
}

/// Product record from the connector.
///
/// Accepts both the store's field names (`title`, `inventory_quantity`,
/// `leadTime`, ...) and the already-normalized names (`name`, `currentStock`,
/// `leadTimeDays`, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    pub id: Option<RawId>,
    #[serde(alias = "name")]
    pub title: Option<TextField>,
    pub sku: Option<TextField>,
    #[serde(alias = "currentStock", alias = "quantity")]
    pub inventory_quantity: Option<NumericField>,
    pub price: Option<NumericField>,
    pub cost: Option<NumericField>,
    #[serde(rename = "leadTime", alias = "leadTimeDays")]
    pub lead_time: Option<NumericField>,
    #[serde(rename = "orderCost", alias = "orderCostFixed")]
    pub order_cost: Option<NumericField>,
    #[serde(rename = "holdingCost", alias = "holdingCostRate")]
    pub holding_cost: Option<NumericField>,
    #[serde(rename = "salesHistory", deserialize_with = "lenient_list")]
    pub sales_history: Vec<SaleRecord>,
    #[serde(rename = "salesVelocity")]
    pub sales_velocity: Option<VelocityRecord>,
}

impl TryFrom<ProductRecord> for InventoryItem {
    type Error = ForecastError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .as_ref()
            .ok_or_else(ForecastError::missing_id)?
            .to_product_id()?;

        let current_stock = numeric(&record.inventory_quantity, &id, "inventory_quantity")
            .map(|q| if q > 0.0 { q.floor() as u64 } else { 0 })
            .unwrap_or(0);
        let lead_time_days = numeric(&record.lead_time, &id, "leadTime")
            .filter(|d| *d >= 0.0)
            .map(|d| d.round() as u32)
            .unwrap_or(DEFAULT_LEAD_TIME_DAYS);

        let mut item = InventoryItem::new(
            id.clone(),
            record
                .title
                .as_ref()
                .and_then(TextField::text)
                .unwrap_or_else(|| "Unknown Product".to_string()),
        )
        .with_stock(current_stock)
        .with_lead_time(lead_time_days)
        .with_order_cost(numeric(&record.order_cost, &id, "orderCost").unwrap_or(DEFAULT_ORDER_COST))
        .with_holding_cost_rate(
            numeric(&record.holding_cost, &id, "holdingCost").unwrap_or(DEFAULT_HOLDING_COST_RATE),
        )
        .with_sales_history(record.sales_history);

        if let Some(sku) = record.sku.as_ref().and_then(TextField::text) {
            item = item.with_sku(sku);
        }
        item.price = numeric(&record.price, &id, "price");
        item.cost = numeric(&record.cost, &id, "cost");
        item.reported_velocity = record.sales_velocity.as_ref().and_then(VelocityRecord::to_velocity);

        Ok(item)
    }
}

fn numeric(field: &Option<NumericField>, id: &ProductId, name: &str) -> Option<f64> {
    let field = field.as_ref()?;
    let value = field.value();
    if value.is_none() {
        debug!(product_id = %id, field = name, raw = ?field, "non-numeric field; using default");
    }
    value
}

/// Decode each JSON entry on its own, dropping (and logging) the ones that
/// do not fit `T`. Input order is preserved.
pub fn deserialize_each<T, I>(entries: I, kind: &str) -> Vec<T>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = JsonValue>,
{
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(kind, index, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect()
}

/// Field-level list decoding: a non-array becomes empty, bad entries are dropped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::Array(entries) => deserialize_each(entries, "list entry"),
        JsonValue::Null => Vec::new(),
        other => {
            debug!(value = %other, "expected a list; ignoring field");
            Vec::new()
        }
    })
}

/// Normalize connector records into inventory items.
///
/// Records without an id are skipped (not an error); order is preserved.
pub fn normalize_products<I>(records: I) -> Vec<InventoryItem>
where
    I: IntoIterator<Item = ProductRecord>,
{
    let mut skipped = 0usize;
    let items: Vec<InventoryItem> = records
        .into_iter()
        .filter_map(|record| match InventoryItem::try_from(record) {
            Ok(item) => Some(item),
            Err(e) => {
                skipped += 1;
                debug!(error = %e, "skipping product record");
                None
            }
        })
        .collect();

    info!(items = items.len(), skipped, "normalized product records");
    items
}

/// One line of an order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineItemRecord {
    pub product_id: Option<RawId>,
    pub quantity: Option<NumericField>,
}

/// One historical sale as found inside a product record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SaleRow {
    pub date: Option<TextField>,
    pub quantity: Option<NumericField>,
}

impl From<SaleRow> for SaleRecord {
    fn from(row: SaleRow) -> Self {
        SaleRecord {
            date: row.date.as_ref().and_then(TextField::text),
            quantity: row.quantity.as_ref().and_then(NumericField::value).unwrap_or(0.0),
        }
    }
}

/// Order record from the connector.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderRecord {
    pub created_at: Option<TextField>,
    #[serde(deserialize_with = "lenient_list")]
    pub line_items: Vec<LineItemRecord>,
}

/// Parse an order timestamp (RFC 3339, naive ISO datetime, or bare date) to its calendar day.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Group order line items into per-product sales histories, sorted by date.
pub fn sales_history_from_orders(orders: &[OrderRecord]) -> HashMap<ProductId, Vec<SaleRecord>> {
    let mut history: HashMap<ProductId, Vec<SaleRecord>> = HashMap::new();

    for order in orders {
        let created_at = order.created_at.as_ref().and_then(TextField::text);
        let Some(date) = created_at.as_deref().and_then(parse_order_date) else {
            warn!(created_at = ?created_at, "skipping order with unparseable timestamp");
            continue;
        };
        let day = date.format("%Y-%m-%d").to_string();

        for line in &order.line_items {
            let Some(product_id) = line.product_id.as_ref().and_then(|id| id.to_product_id().ok()) else {
                continue;
            };
            let quantity = line
                .quantity
                .as_ref()
                .and_then(NumericField::value)
                .unwrap_or(0.0);
            history
                .entry(product_id)
                .or_default()
                .push(SaleRecord::new(day.clone(), quantity));
        }
    }

    for sales in history.values_mut() {
        // ISO dates order lexicographically; stable sort keeps same-day order.
        sales.sort_by(|a, b| a.date.cmp(&b.date));
    }
    history
}

/// Fill the sales history of items that have none from order records.
///
/// Returns how many items were enriched.
pub fn enrich_with_order_history(items: &mut [InventoryItem], orders: &[OrderRecord]) -> usize {
    let mut by_product = sales_history_from_orders(orders);
    let mut enriched = 0;

    for item in items.iter_mut().filter(|i| i.sales_history.is_empty()) {
        if let Some(sales) = by_product.remove(&item.id) {
            item.sales_history = sales;
            enriched += 1;
        }
    }

    info!(enriched, orders = orders.len(), "enriched items with order history");
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse_products(json: &str) -> Vec<ProductRecord> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn normalize_applies_defaults_and_skips_missing_ids() {
        let records = parse_products(
            r#"[
                {"title": "No id"},
                {"id": "", "title": "Blank id"},
                {"id": 1001, "title": "Lamp"}
            ]"#,
        );

        let items = normalize_products(records);
        assert_eq!(items.len(), 1);

        let lamp = &items[0];
        assert_eq!(lamp.id.as_str(), "1001");
        assert_eq!(lamp.name, "Lamp");
        assert_eq!(lamp.sku, "unknown");
        assert_eq!(lamp.current_stock, 0);
        assert_eq!(lamp.lead_time_days, 14);
        assert_eq!(lamp.order_cost_fixed, 25.0);
        assert_eq!(lamp.holding_cost_rate, 0.2);
        assert!(lamp.price.is_none());
        assert!(lamp.reported_velocity.is_none());
    }

    #[test]
    fn normalize_reads_store_and_normalized_field_names() {
        let records = parse_products(
            r#"[
                {"id": "a", "title": "Kettle", "sku": "K-1", "inventory_quantity": 12,
                 "price": "19.99", "cost": 8, "leadTime": 7, "orderCost": 40, "holdingCost": 0.25},
                {"id": "b", "name": "Cup", "currentStock": 3.7, "leadTimeDays": 10,
                 "orderCostFixed": 15, "holdingCostRate": 0.1}
            ]"#,
        );

        let items = normalize_products(records);
        assert_eq!(items[0].sku, "K-1");
        assert_eq!(items[0].current_stock, 12);
        assert_eq!(items[0].price, Some(19.99));
        assert_eq!(items[0].cost, Some(8.0));
        assert_eq!(items[0].lead_time_days, 7);
        assert_eq!(items[0].order_cost_fixed, 40.0);
        assert_eq!(items[0].holding_cost_rate, 0.25);

        assert_eq!(items[1].name, "Cup");
        assert_eq!(items[1].current_stock, 3);
        assert_eq!(items[1].lead_time_days, 10);
        assert_eq!(items[1].order_cost_fixed, 15.0);
    }

    #[test]
    fn non_numeric_fields_fall_back_to_defaults() {
        let records = parse_products(
            r#"[{"id": "x", "inventory_quantity": -4, "price": "n/a", "leadTime": "soon"}]"#,
        );
        let item = &normalize_products(records)[0];
        assert_eq!(item.current_stock, 0);
        assert!(item.price.is_none());
        assert_eq!(item.lead_time_days, 14);
    }

    #[test]
    fn wrong_field_types_degrade_instead_of_failing() {
        let records = parse_products(
            r#"[{"id": "b", "title": 123, "sku": false, "leadTime": [7],
                 "salesVelocity": "fast",
                 "salesHistory": [
                    {"date": "2025-01-01", "quantity": 2.5},
                    {"date": 20250102, "quantity": "3"},
                    "not a sale"
                 ]}]"#,
        );
        let item = &normalize_products(records)[0];
        assert_eq!(item.name, "123");
        assert_eq!(item.sku, "unknown");
        assert_eq!(item.lead_time_days, 14);
        assert!(item.reported_velocity.is_none());
        assert_eq!(
            item.sales_history,
            vec![SaleRecord::new("2025-01-01", 2.5), SaleRecord::new("20250102", 3.0)]
        );

        let history: ProductRecord = serde_json::from_str(r#"{"id": 1, "salesHistory": {"a": 1}}"#).unwrap();
        assert!(history.sales_history.is_empty());
    }

    #[test]
    fn deserialize_each_drops_only_unusable_entries() {
        let entries = vec![
            serde_json::json!({"id": "a"}),
            serde_json::json!("just text"),
            serde_json::json!({"id": {"nested": true}}),
            serde_json::json!({"id": 7, "salesVelocity": {"weekly": "14"}}),
        ];
        let records: Vec<ProductRecord> = deserialize_each(entries, "product");
        assert_eq!(records.len(), 3);

        let items = normalize_products(records);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "7"]);
        assert_eq!(items[1].reported_velocity.unwrap().daily(), 2.0);
    }

    #[test]
    fn orders_with_loose_fields_still_contribute() {
        let orders: Vec<OrderRecord> = serde_json::from_str(
            r#"[
                {"created_at": 20250201, "line_items": [{"product_id": 1, "quantity": 9}]},
                {"created_at": "2025-02-02", "line_items": [
                    {"product_id": 1, "quantity": "1.5"}, 42, {"product_id": -3, "quantity": 1}]},
                {"created_at": "2025-02-03", "line_items": "none"}
            ]"#,
        )
        .unwrap();

        let history = sales_history_from_orders(&orders);
        assert_eq!(history.len(), 1);
        assert_eq!(
            history[&ProductId::new("1").unwrap()],
            vec![SaleRecord::new("2025-02-02", 1.5)]
        );
    }

    #[test]
    fn velocity_accepts_number_or_breakdown() {
        let records = parse_products(
            r#"[
                {"id": "n", "salesVelocity": 2.5},
                {"id": "m", "salesVelocity": {"daily": 1.5, "weekly": 10.5, "monthly": 45}},
                {"id": "w", "salesVelocity": {"weekly": 14}},
                {"id": "z", "salesVelocity": {"daily": 0}}
            ]"#,
        );
        let items = normalize_products(records);
        assert_eq!(items[0].reported_velocity.unwrap().daily(), 2.5);
        assert_eq!(items[1].reported_velocity.unwrap().daily(), 1.5);
        assert_eq!(items[2].reported_velocity.unwrap().daily(), 2.0);
        assert!(items[3].reported_velocity.is_none());
    }

    #[test]
    fn order_dates_parse_in_common_shapes() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(parse_order_date("2025-03-09T10:15:00Z"), Some(d));
        assert_eq!(parse_order_date("2025-03-09T10:15:00-05:00"), Some(d));
        assert_eq!(parse_order_date("2025-03-09T10:15:00"), Some(d));
        assert_eq!(parse_order_date("2025-03-09"), Some(d));
        assert_eq!(parse_order_date("yesterday"), None);
    }

    #[test]
    fn history_groups_by_product_and_sorts_by_date() {
        let orders: Vec<OrderRecord> = serde_json::from_str(
            r#"[
                {"created_at": "2025-02-03T09:00:00Z", "line_items": [
                    {"product_id": 1, "quantity": 2}, {"product_id": "2", "quantity": 1}]},
                {"created_at": "not a date", "line_items": [{"product_id": 1, "quantity": 50}]},
                {"created_at": "2025-02-01T09:00:00Z", "line_items": [
                    {"product_id": 1, "quantity": 4}, {"quantity": 9}]}
            ]"#,
        )
        .unwrap();

        let history = sales_history_from_orders(&orders);
        let p1 = &history[&ProductId::new("1").unwrap()];
        assert_eq!(
            p1,
            &vec![SaleRecord::new("2025-02-01", 4.0), SaleRecord::new("2025-02-03", 2.0)]
        );
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn enrichment_only_fills_empty_histories() {
        let orders: Vec<OrderRecord> = serde_json::from_str(
            r#"[{"created_at": "2025-02-01", "line_items": [
                {"product_id": "a", "quantity": 3}, {"product_id": "b", "quantity": 5}]}]"#,
        )
        .unwrap();

        let mut items = vec![
            InventoryItem::new(ProductId::new("a").unwrap(), "A"),
            InventoryItem::new(ProductId::new("b").unwrap(), "B")
                .with_sales_history(vec![SaleRecord::new("2024-12-31", 1.0)]),
        ];

        assert_eq!(enrich_with_order_history(&mut items, &orders), 1);
        assert_eq!(items[0].sales_history, vec![SaleRecord::new("2025-02-01", 3.0)]);
        assert_eq!(items[1].sales_history, vec![SaleRecord::new("2024-12-31", 1.0)]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: grouping line items never invents or drops units.
        #[test]
        fn grouped_history_preserves_total_quantity(
            lines in prop::collection::vec((0u64..5, 0i64..100, 1u32..28), 0..40)
        ) {
            let orders: Vec<OrderRecord> = lines
                .iter()
                .map(|(product, qty, day)| OrderRecord {
                    created_at: Some(TextField::Text(format!("2025-01-{day:02}T12:00:00Z"))),
                    line_items: vec![LineItemRecord {
                        product_id: Some(RawId::Number(*product)),
                        quantity: Some(NumericField::Number(*qty as f64)),
                    }],
                })
                .collect();

            let history = sales_history_from_orders(&orders);
            let grouped: f64 = history.values().flatten().map(|s| s.quantity).sum();
            let expected: f64 = lines.iter().map(|(_, q, _)| *q as f64).sum();
            prop_assert_eq!(grouped, expected);

            for sales in history.values() {
                prop_assert!(sales.windows(2).all(|w| w[0].date <= w[1].date));
            }
        }
    }
}
