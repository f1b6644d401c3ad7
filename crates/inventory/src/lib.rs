//! Inventory input model.
//!
//! This crate contains the normalized item shape the forecasting engine
//! consumes, plus the boundary records it is normalized from. Everything here
//! is deterministic data handling (no IO, no HTTP, no storage).

pub mod item;
pub mod record;
pub mod velocity;

pub use item::{
    DEFAULT_HOLDING_COST_RATE, DEFAULT_LEAD_TIME_DAYS, DEFAULT_ORDER_COST, InventoryItem, SaleRecord,
};
pub use record::{
    LineItemRecord, NumericField, OrderRecord, ProductRecord, RawId, SaleRow, TextField, VelocityRecord,
    deserialize_each, enrich_with_order_history, normalize_products, parse_order_date,
    sales_history_from_orders,
};
pub use velocity::SalesVelocity;
