//! Tunable thresholds for planning, simulation and summaries.
//!
//! `Default` carries the canonical values; the `with_*` setters exist for
//! callers (and tests) that need to move a single knob.

/// Restock planner thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Restock when stockout is closer than `lead_time × restock_buffer` days.
    pub restock_buffer: f64,
    /// High urgency below `lead_time × high_urgency_ratio` days.
    pub high_urgency_ratio: f64,
    /// Medium urgency below `lead_time × medium_urgency_ratio` days.
    pub medium_urgency_ratio: f64,
    /// Share of lead time shaved off the projected stockout to date the order.
    pub safety_lead_ratio: f64,
    /// Lead-time demand floor for EOQ: `velocity × buffer_lead_days × buffer_multiplier`.
    pub buffer_lead_days: f64,
    pub buffer_multiplier: f64,
    /// Smallest non-zero order.
    pub min_order_quantity: u64,
    /// Holding cost used when `price × rate` is not positive.
    pub min_holding_cost: f64,
    /// Reported confidence. Constant until variance data is available.
    pub confidence_score: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            restock_buffer: 1.5,
            high_urgency_ratio: 0.5,
            medium_urgency_ratio: 1.0,
            safety_lead_ratio: 0.3,
            buffer_lead_days: 14.0,
            buffer_multiplier: 1.5,
            min_order_quantity: 5,
            min_holding_cost: 0.1,
            confidence_score: 0.75,
        }
    }
}

impl PlannerConfig {
    pub fn with_restock_buffer(mut self, restock_buffer: f64) -> Self {
        self.restock_buffer = restock_buffer;
        self
    }

    pub fn with_min_order_quantity(mut self, min_order_quantity: u64) -> Self {
        self.min_order_quantity = min_order_quantity;
        self
    }

    pub fn with_confidence_score(mut self, confidence_score: f64) -> Self {
        self.confidence_score = confidence_score.clamp(0.0, 1.0);
        self
    }
}

/// Inventory simulator parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Simulated days including day 0.
    pub horizon_days: u32,
    /// Stock is sampled into the trace every `trace_interval_days`.
    pub trace_interval_days: u32,
    /// Auto-reorders cover this many days of adjusted demand.
    pub reorder_cover_days: f64,
    /// Unit price assumed when an item has none.
    pub default_price: f64,
    /// Unit cost as a share of price when an item has none.
    pub default_cost_ratio: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_days: 90,
            trace_interval_days: 7,
            reorder_cover_days: 30.0,
            default_price: 10.0,
            default_cost_ratio: 0.5,
        }
    }
}

impl SimulationConfig {
    pub fn with_horizon_days(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days.max(1);
        self
    }

    pub fn with_trace_interval_days(mut self, days: u32) -> Self {
        self.trace_interval_days = days.max(1);
        self
    }
}

/// Health summary parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsConfig {
    /// Items with fewer units on hand are reported as low stock.
    pub low_stock_threshold: u64,
    pub top_sellers: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
            top_sellers: 5,
        }
    }
}

impl InsightsConfig {
    pub fn with_low_stock_threshold(mut self, threshold: u64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }
}
