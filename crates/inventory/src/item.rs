use serde::{Deserialize, Serialize};

use stockcast_core::{Entity, ProductId};

use crate::record::SaleRow;
use crate::velocity::SalesVelocity;

pub const DEFAULT_LEAD_TIME_DAYS: u32 = 14;
pub const DEFAULT_ORDER_COST: f64 = 25.0;
/// Fraction of unit price per year.
pub const DEFAULT_HOLDING_COST_RATE: f64 = 0.2;

/// One historical sale: units sold on a calendar day.
///
/// The date stays raw text (`YYYY-MM-DD`); parsing happens in the estimator so
/// that a malformed date only degrades precision instead of rejecting the item.
/// Deserialization goes through [`SaleRow`] and never fails on field types.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "SaleRow")]
pub struct SaleRecord {
    pub date: Option<String>,
    pub quantity: f64,
}

impl SaleRecord {
    pub fn new(date: impl Into<String>, quantity: f64) -> Self {
        Self {
            date: Some(date.into()),
            quantity,
        }
    }

    pub fn undated(quantity: f64) -> Self {
        Self {
            date: None,
            quantity,
        }
    }
}

/// Normalized inventory item consumed by the planner and the simulator.
///
/// Every item carries an id; records without one are dropped during
/// normalization and never reach this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub current_stock: u64,
    /// Unit sale price. `None` when the source did not provide one.
    pub price: Option<f64>,
    /// Unit cost. `None` when the source did not provide one.
    pub cost: Option<f64>,
    pub lead_time_days: u32,
    pub order_cost_fixed: f64,
    pub holding_cost_rate: f64,
    /// Sales history, ordered by date.
    pub sales_history: Vec<SaleRecord>,
    /// Velocity reported by the data source, if any.
    pub reported_velocity: Option<SalesVelocity>,
}

impl InventoryItem {
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sku: "unknown".to_string(),
            current_stock: 0,
            price: None,
            cost: None,
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            order_cost_fixed: DEFAULT_ORDER_COST,
            holding_cost_rate: DEFAULT_HOLDING_COST_RATE,
            sales_history: Vec::new(),
            reported_velocity: None,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn with_stock(mut self, current_stock: u64) -> Self {
        self.current_stock = current_stock;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_lead_time(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    pub fn with_order_cost(mut self, order_cost_fixed: f64) -> Self {
        self.order_cost_fixed = order_cost_fixed;
        self
    }

    pub fn with_holding_cost_rate(mut self, rate: f64) -> Self {
        self.holding_cost_rate = rate;
        self
    }

    pub fn with_sales_history(mut self, history: Vec<SaleRecord>) -> Self {
        self.sales_history = history;
        self
    }

    pub fn with_reported_velocity(mut self, velocity: SalesVelocity) -> Self {
        self.reported_velocity = Some(velocity);
        self
    }
}

impl Entity for InventoryItem {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_carries_documented_defaults() {
        let item = InventoryItem::new(ProductId::new("p-1").unwrap(), "Mug");
        assert_eq!(item.current_stock, 0);
        assert_eq!(item.lead_time_days, 14);
        assert_eq!(item.order_cost_fixed, 25.0);
        assert_eq!(item.holding_cost_rate, 0.2);
        assert_eq!(item.sku, "unknown");
        assert!(item.price.is_none());
        assert!(item.sales_history.is_empty());
    }

    #[test]
    fn sale_record_tolerates_missing_fields() {
        let sale: SaleRecord = serde_json::from_str(r#"{"quantity": 3}"#).unwrap();
        assert_eq!(sale, SaleRecord::undated(3.0));
        let sale: SaleRecord = serde_json::from_str(r#"{"date": "2025-01-01"}"#).unwrap();
        assert_eq!(sale.quantity, 0.0);
    }

    #[test]
    fn sale_record_recovers_loose_field_types() {
        let sale: SaleRecord = serde_json::from_str(r#"{"date": "2025-01-01", "quantity": 2.5}"#).unwrap();
        assert_eq!(sale, SaleRecord::new("2025-01-01", 2.5));

        let sale: SaleRecord = serde_json::from_str(r#"{"date": 20250101, "quantity": "3"}"#).unwrap();
        assert_eq!(sale, SaleRecord::new("20250101", 3.0));

        let sale: SaleRecord = serde_json::from_str(r#"{"date": true, "quantity": [1]}"#).unwrap();
        assert_eq!(sale, SaleRecord::undated(0.0));
    }
}
