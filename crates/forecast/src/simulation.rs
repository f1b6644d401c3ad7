//! Day-stepped inventory simulation under demand-shift scenarios.
//!
//! Model, per item:
//! - demand per day is the item's velocity scaled by `1 + demand_change_rate`;
//! - sales are capped by stock on hand, unmet demand is a stockout valued at price;
//! - when stock would not cover demand through the lead time, one order for
//!   `reorder_cover_days` of demand is placed and arrives `lead_time` days later.
//!
//! The simulation is deterministic: identical inputs give bit-identical output.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use stockcast_core::{ForecastError, ForecastResult, ProductId};
use stockcast_inventory::InventoryItem;

use crate::batch::BatchOutcome;
use crate::config::SimulationConfig;
use crate::scenario::{BASELINE_SCENARIO, SimulationScenario, default_scenarios};
use crate::velocity::effective_velocity;

/// Per-item simulation trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTrace {
    pub id: ProductId,
    pub name: String,
    pub original_velocity: f64,
    pub adjusted_velocity: f64,
    pub ending_stock: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub had_stockout: bool,
    pub stockout_days: u32,
    pub stockout_impact: f64,
    pub units_sold: f64,
    pub units_received: f64,
    /// Stock on hand at day 0 and every `trace_interval_days` after.
    pub stock_trace: Vec<f64>,
}

/// Aggregate outcome of one scenario over an item set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub demand_change_rate: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    /// Item-days with unmet demand, summed over items.
    pub stockout_days: u64,
    /// Lost revenue from unmet demand.
    pub stockout_impact_value: f64,
    pub items: Vec<ItemTrace>,
    /// Items that could not be simulated (invalid numbers).
    pub skipped_items: Vec<ProductId>,
}

#[derive(Debug, Clone, Copy)]
struct PendingOrder {
    arrival_day: u32,
    quantity: f64,
}

/// Runs inventory simulations.
#[derive(Debug, Clone, Default)]
pub struct InventorySimulator {
    config: SimulationConfig,
}

impl InventorySimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate every item under one demand shift and aggregate the totals.
    pub fn simulate(&self, items: &[InventoryItem], demand_change_rate: f64) -> SimulationResult {
        let mut outcome = BatchOutcome::new();
        for item in items {
            outcome.record(&item.id, self.simulate_item(item, demand_change_rate));
        }

        let traces = outcome.results;
        let result = SimulationResult {
            demand_change_rate,
            total_revenue: traces.iter().map(|t| t.total_revenue).sum(),
            total_profit: traces.iter().map(|t| t.total_profit).sum(),
            stockout_days: traces.iter().map(|t| t.stockout_days as u64).sum(),
            stockout_impact_value: traces.iter().map(|t| t.stockout_impact).sum(),
            skipped_items: outcome.failures.into_iter().map(|(id, _)| id).collect(),
            items: traces,
        };

        debug!(
            demand_change_rate,
            items = result.items.len(),
            skipped = result.skipped_items.len(),
            total_revenue = result.total_revenue,
            stockout_days = result.stockout_days,
            "simulation finished"
        );
        result
    }

    /// Run the baseline plus each scenario (the defaults when none are given).
    ///
    /// Scenarios with a blank name, a non-finite rate, a duplicate name, or the
    /// reserved baseline name are skipped with a warning.
    pub fn run_scenarios(
        &self,
        items: &[InventoryItem],
        scenarios: Option<&[SimulationScenario]>,
    ) -> BTreeMap<String, SimulationResult> {
        let defaults;
        let scenarios = match scenarios {
            Some(s) if !s.is_empty() => s,
            _ => {
                defaults = default_scenarios();
                defaults.as_slice()
            }
        };

        let mut results = BTreeMap::new();
        results.insert(BASELINE_SCENARIO.to_string(), self.simulate(items, 0.0));

        for scenario in scenarios {
            let name = scenario.name.trim();
            if name.is_empty() {
                debug!("skipping scenario without a name");
                continue;
            }
            if !scenario.demand_change_rate.is_finite() {
                warn!(scenario = name, "skipping scenario with non-finite demand change");
                continue;
            }
            if results.contains_key(name) {
                warn!(scenario = name, "skipping duplicate scenario name");
                continue;
            }
            results.insert(name.to_string(), self.simulate(items, scenario.demand_change_rate));
        }

        info!(
            items = items.len(),
            scenarios = results.len(),
            "scenario simulations finished"
        );
        results
    }

    fn simulate_item(&self, item: &InventoryItem, demand_change_rate: f64) -> ForecastResult<ItemTrace> {
        let cfg = &self.config;

        let price = item.price.unwrap_or(cfg.default_price);
        let cost = item.cost.unwrap_or(price * cfg.default_cost_ratio);
        if !(price.is_finite() && price >= 0.0 && cost.is_finite()) {
            return Err(ForecastError::invalid_input(format!(
                "{}: price and cost must be finite",
                item.id
            )));
        }

        let original_velocity = effective_velocity(item).daily();
        let adjusted_velocity = (original_velocity * (1.0 + demand_change_rate)).max(0.0);
        if !adjusted_velocity.is_finite() {
            return Err(ForecastError::invalid_input(format!(
                "{}: adjusted velocity is not finite",
                item.id
            )));
        }

        let lead_time = item.lead_time_days;
        let interval = cfg.trace_interval_days.max(1);

        let mut stock = item.current_stock as f64;
        let mut revenue = 0.0;
        let mut profit = 0.0;
        let mut stockout_days = 0u32;
        let mut stockout_impact = 0.0;
        let mut units_sold = 0.0;
        let mut units_received = 0.0;
        let mut pending: Option<PendingOrder> = None;
        let mut stock_trace = vec![stock];

        for day in 1..cfg.horizon_days {
            let sold = stock.min(adjusted_velocity);
            units_sold += sold;
            revenue += sold * price;
            profit += sold * (price - cost);

            if sold < adjusted_velocity {
                stockout_days += 1;
                stockout_impact += (adjusted_velocity - sold) * price;
            }

            let mut end_stock = stock - sold;

            if let Some(order) = pending {
                if order.arrival_day <= day {
                    end_stock += order.quantity;
                    units_received += order.quantity;
                    pending = None;
                }
            }

            if pending.is_none() && end_stock < adjusted_velocity * lead_time as f64 {
                pending = Some(PendingOrder {
                    arrival_day: day.saturating_add(lead_time),
                    quantity: adjusted_velocity * cfg.reorder_cover_days,
                });
            }

            stock = end_stock;
            if day % interval == 0 {
                stock_trace.push(stock);
            }
        }

        Ok(ItemTrace {
            id: item.id.clone(),
            name: item.name.clone(),
            original_velocity,
            adjusted_velocity,
            ending_stock: stock,
            total_revenue: revenue,
            total_profit: profit,
            had_stockout: stockout_days > 0,
            stockout_days,
            stockout_impact,
            units_sold,
            units_received,
            stock_trace,
        })
    }
}
