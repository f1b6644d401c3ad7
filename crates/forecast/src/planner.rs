//! Restock planning: need, urgency, EOQ order quantity and restock date.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use stockcast_core::{ForecastError, ForecastResult, ProductId};
use stockcast_inventory::InventoryItem;

use crate::batch::BatchOutcome;
use crate::config::PlannerConfig;
use crate::velocity::{days_until_stockout, estimate_velocity};

/// How soon an order has to go out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestockUrgency {
    Low,
    Medium,
    High,
}

impl core::fmt::Display for RestockUrgency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            RestockUrgency::Low => "low",
            RestockUrgency::Medium => "medium",
            RestockUrgency::High => "high",
        })
    }
}

/// Restock recommendation for one item. Built fresh per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockPrediction {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub current_stock: u64,
    pub avg_daily_sales: f64,
    pub days_until_stockout: f64,
    pub lead_time_days: u32,
    pub restock_needed: bool,
    pub restock_urgency: RestockUrgency,
    pub recommended_order_quantity: u64,
    pub restock_date: Option<NaiveDate>,
    pub confidence_score: f64,
}

/// Economic order quantity, floored by lead-time demand.
///
/// `max(floor(sqrt(2 × annual_demand × order_cost / holding_cost)),
/// floor(velocity × buffer_lead_days × buffer_multiplier))`, where the holding
/// cost is `price × holding_rate` or `min_holding_cost` when that is not
/// positive.
pub fn economic_order_quantity(
    daily_velocity: f64,
    price: f64,
    order_cost: f64,
    holding_rate: f64,
    config: &PlannerConfig,
) -> u64 {
    let annual_demand = daily_velocity * 365.0;
    let mut holding_cost = price * holding_rate;
    if holding_cost <= 0.0 {
        holding_cost = config.min_holding_cost;
    }

    let eoq = (2.0 * annual_demand * order_cost / holding_cost).sqrt();
    let lead_time_buffer = daily_velocity * config.buffer_lead_days * config.buffer_multiplier;
    let quantity = eoq.floor().max(lead_time_buffer.floor());

    if quantity.is_finite() && quantity > 0.0 {
        quantity as u64
    } else {
        0
    }
}

/// Turns inventory items into restock predictions.
#[derive(Debug, Clone, Default)]
pub struct RestockPlanner {
    config: PlannerConfig,
}

impl RestockPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan one item as of `today`.
    pub fn plan(&self, item: &InventoryItem, today: NaiveDate) -> ForecastResult<RestockPrediction> {
        let price = validate_inputs(item)?;
        let cfg = &self.config;

        let velocity = estimate_velocity(&item.sales_history).daily();
        let stockout_days = days_until_stockout(item.current_stock, velocity);
        let lead_time = item.lead_time_days as f64;

        let restock_needed = stockout_days < lead_time * cfg.restock_buffer;

        let restock_urgency = if !restock_needed {
            RestockUrgency::Low
        } else if stockout_days < lead_time * cfg.high_urgency_ratio {
            RestockUrgency::High
        } else if stockout_days < lead_time * cfg.medium_urgency_ratio {
            RestockUrgency::Medium
        } else {
            RestockUrgency::Low
        };

        let recommended_order_quantity = if restock_needed {
            economic_order_quantity(
                velocity,
                price,
                item.order_cost_fixed,
                item.holding_cost_rate,
                cfg,
            )
            .max(cfg.min_order_quantity)
        } else {
            0
        };

        let restock_date = if restock_needed {
            let offset = (stockout_days - lead_time * cfg.safety_lead_ratio).max(0.0).floor();
            let date = today.checked_add_days(Days::new(offset as u64)).ok_or_else(|| {
                ForecastError::internal(format!("restock date overflows calendar ({offset} days)"))
            })?;
            Some(date)
        } else {
            None
        };

        debug!(
            product_id = %item.id,
            velocity,
            stockout_days,
            restock_needed,
            urgency = %restock_urgency,
            "planned item"
        );

        Ok(RestockPrediction {
            product_id: item.id.clone(),
            name: item.name.clone(),
            sku: item.sku.clone(),
            current_stock: item.current_stock,
            avg_daily_sales: velocity,
            days_until_stockout: stockout_days,
            lead_time_days: item.lead_time_days,
            restock_needed,
            restock_urgency,
            recommended_order_quantity,
            restock_date,
            confidence_score: cfg.confidence_score,
        })
    }

    /// Plan every item; a failing item is logged and excluded, never fatal.
    pub fn plan_batch(&self, items: &[InventoryItem], today: NaiveDate) -> BatchOutcome<RestockPrediction> {
        let mut outcome = BatchOutcome::new();
        for item in items {
            outcome.record(&item.id, self.plan(item, today));
        }

        info!(
            planned = outcome.results.len(),
            failed = outcome.failed_count(),
            restock_needed = outcome.results.iter().filter(|p| p.restock_needed).count(),
            "restock planning finished"
        );
        outcome
    }
}

/// Reject numbers the planner cannot reason about. Returns the price to use.
fn validate_inputs(item: &InventoryItem) -> ForecastResult<f64> {
    let price = item.price.unwrap_or(0.0);
    if !(price.is_finite() && price >= 0.0) {
        return Err(ForecastError::invalid_input(format!("{}: price must be a non-negative number", item.id)));
    }
    if let Some(cost) = item.cost {
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(ForecastError::invalid_input(format!("{}: cost must be a non-negative number", item.id)));
        }
    }
    if !(item.order_cost_fixed.is_finite() && item.order_cost_fixed >= 0.0) {
        return Err(ForecastError::invalid_input(format!(
            "{}: order cost must be a non-negative number",
            item.id
        )));
    }
    if !item.holding_cost_rate.is_finite() {
        return Err(ForecastError::invalid_input(format!("{}: holding cost rate must be finite", item.id)));
    }
    Ok(price)
}
