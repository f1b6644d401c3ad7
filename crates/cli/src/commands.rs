use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde_json::Value as JsonValue;
use tracing::info;

use stockcast_forecast::{
    InsightsConfig, InventorySimulator, RestockPlanner, SimulationConfig, summarize,
};

use crate::args::{Command, InsightsArgs, PlanArgs, SimulateArgs};
use crate::dto::{InsightsResponse, PlanResponse, SimulateResponse};
use crate::input::{load_items, load_scenarios};

/// Run one command and return the JSON document to print.
pub fn run(command: &Command) -> Result<JsonValue> {
    match command {
        Command::Plan(args) => to_json(&plan(args)?),
        Command::Simulate(args) => to_json(&simulate(args)?),
        Command::Insights(args) => to_json(&insights(args)?),
    }
}

pub fn plan(args: &PlanArgs) -> Result<PlanResponse> {
    let (items, _) = load_items(&args.source)?;
    let today = args.today.unwrap_or_else(today_utc);

    let outcome = RestockPlanner::default().plan_batch(&items, today);
    info!(%today, predictions = outcome.results.len(), "generated restock predictions");

    Ok(PlanResponse {
        success: true,
        predictions: outcome.results,
        failures: outcome.failures.into_iter().map(Into::into).collect(),
    })
}

pub fn simulate(args: &SimulateArgs) -> Result<SimulateResponse> {
    let (items, document) = load_items(&args.source)?;
    let scenarios = load_scenarios(args.scenarios.as_deref(), &document)?;

    let simulator = InventorySimulator::new(SimulationConfig::default().with_horizon_days(args.horizon_days));
    info!(
        items = items.len(),
        scenarios = scenarios.as_ref().map_or(0, Vec::len),
        "running simulations"
    );
    let results = simulator.run_scenarios(&items, scenarios.as_deref());

    Ok(SimulateResponse {
        success: true,
        results,
    })
}

pub fn insights(args: &InsightsArgs) -> Result<InsightsResponse> {
    let (items, _) = load_items(&args.source)?;
    let today = args.today.unwrap_or_else(today_utc);

    let predictions = RestockPlanner::default().plan_batch(&items, today).into_results();
    let config = InsightsConfig::default().with_low_stock_threshold(args.low_stock_threshold);

    Ok(InsightsResponse {
        success: true,
        insights: summarize(&items, &predictions, &config),
    })
}

fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<JsonValue> {
    serde_json::to_value(value).context("failed to serialize response")
}
