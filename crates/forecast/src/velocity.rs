//! Velocity & stockout estimation.

use chrono::NaiveDate;
use tracing::debug;

use stockcast_core::{ForecastError, ForecastResult};
use stockcast_inventory::{InventoryItem, SaleRecord, SalesVelocity};

/// Days-until-stockout reported when nothing is selling.
///
/// A finite sentinel keeps downstream arithmetic (thresholds, dates) finite.
pub const STOCKOUT_SENTINEL_DAYS: f64 = 999.0;

/// Window assumed when the history's dates cannot be trusted.
const FALLBACK_WINDOW_DAYS: f64 = 30.0;

/// Estimate daily velocity from a sales history.
///
/// `total quantity / max(1, last date - first date + 1)`. A missing or
/// malformed date anywhere in the history switches to a 30-day window;
/// this never fails.
pub fn estimate_velocity(history: &[SaleRecord]) -> SalesVelocity {
    if history.is_empty() {
        return SalesVelocity::ZERO;
    }

    let total: f64 = history.iter().map(|s| s.quantity).sum();
    let window = match date_range_days(history) {
        Ok(days) => days.max(1) as f64,
        Err(e) => {
            debug!(error = %e, records = history.len(), "falling back to 30-day window");
            FALLBACK_WINDOW_DAYS
        }
    };

    SalesVelocity::from_daily(total / window)
}

/// Velocity used for simulation and ranking: the source-reported value when
/// present, otherwise estimated from the item's history.
pub fn effective_velocity(item: &InventoryItem) -> SalesVelocity {
    item.reported_velocity
        .unwrap_or_else(|| estimate_velocity(&item.sales_history))
}

/// Days until current stock runs out at `daily_velocity`, rounded to one decimal.
pub fn days_until_stockout(current_stock: u64, daily_velocity: f64) -> f64 {
    if !(daily_velocity.is_finite() && daily_velocity > 0.0) {
        return STOCKOUT_SENTINEL_DAYS;
    }
    round_tenths(current_stock as f64 / daily_velocity)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Inclusive day span covered by the history's dates.
fn date_range_days(history: &[SaleRecord]) -> ForecastResult<i64> {
    let mut first: Option<NaiveDate> = None;
    let mut last: Option<NaiveDate> = None;

    for sale in history {
        let raw = sale
            .date
            .as_deref()
            .ok_or_else(|| ForecastError::invalid_date("sale without a date"))?;
        let date = parse_sale_date(raw)?;
        first = Some(first.map_or(date, |d| d.min(date)));
        last = Some(last.map_or(date, |d| d.max(date)));
    }

    match (first, last) {
        (Some(first), Some(last)) => Ok((last - first).num_days() + 1),
        _ => Err(ForecastError::invalid_date("history has no dates")),
    }
}

fn parse_sale_date(raw: &str) -> ForecastResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| ForecastError::invalid_date(format!("{raw:?}: {e}")))
}
