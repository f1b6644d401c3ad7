//! `stockcast-forecast`
//!
//! **Responsibility:** the forecasting and simulation engine.
//!
//! - Velocity & stockout estimation from sales history.
//! - Restock planning (urgency, EOQ order quantity, restock date).
//! - Day-stepped inventory simulation under demand-shift scenarios.
//! - A deterministic inventory health summary.
//!
//! Everything here is a pure function of its inputs: no IO, no clock, no
//! process-wide state. Callers inject configuration and the planning date.

pub mod batch;
pub mod config;
pub mod insights;
pub mod planner;
pub mod scenario;
pub mod simulation;
pub mod velocity;

pub use batch::BatchOutcome;
pub use config::{InsightsConfig, PlannerConfig, SimulationConfig};
pub use insights::{HealthStatus, InventoryInsights, summarize};
pub use planner::{RestockPlanner, RestockPrediction, RestockUrgency, economic_order_quantity};
pub use scenario::{BASELINE_SCENARIO, SimulationScenario, default_scenarios};
pub use simulation::{InventorySimulator, ItemTrace, SimulationResult};
pub use velocity::{STOCKOUT_SENTINEL_DAYS, days_until_stockout, effective_velocity, estimate_velocity};
