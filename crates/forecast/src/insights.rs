//! Deterministic inventory health summary.
//!
//! Same shape the dashboard expects from narrative insights, built only from
//! stock levels, velocities and restock predictions. Sellers are ranked by the
//! velocity the planner used, so rankings and recommendations agree.

use std::collections::HashMap;

use serde::Serialize;

use stockcast_inventory::InventoryItem;

use crate::config::InsightsConfig;
use crate::planner::{RestockPrediction, RestockUrgency};
use crate::velocity::estimate_velocity;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    NeedsAttention,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryInsights {
    pub status: HealthStatus,
    pub inventory_health: String,
    pub key_insights: Vec<String>,
    pub action_items: Vec<String>,
    pub low_stock_items: Vec<String>,
    pub top_selling_items: Vec<String>,
    pub restock_recommendations: Vec<String>,
}

/// Summarize inventory health from items and their restock predictions.
pub fn summarize(
    items: &[InventoryItem],
    predictions: &[RestockPrediction],
    config: &InsightsConfig,
) -> InventoryInsights {
    let low_stock_items: Vec<String> = items
        .iter()
        .filter(|i| i.current_stock < config.low_stock_threshold)
        .map(|i| i.name.clone())
        .collect();

    let planned: HashMap<&str, f64> = predictions
        .iter()
        .map(|p| (p.product_id.as_str(), p.avg_daily_sales))
        .collect();
    let mut ranked: Vec<(f64, &str)> = items
        .iter()
        .map(|i| {
            let velocity = planned
                .get(i.id.as_str())
                .copied()
                .unwrap_or_else(|| estimate_velocity(&i.sales_history).daily());
            (velocity, i.name.as_str())
        })
        .filter(|(v, _)| *v > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    let top_selling_items: Vec<String> = ranked
        .iter()
        .take(config.top_sellers)
        .map(|(_, name)| name.to_string())
        .collect();
    let idle = items.len() - ranked.len();

    let mut needed: Vec<&RestockPrediction> = predictions.iter().filter(|p| p.restock_needed).collect();
    needed.sort_by(|a, b| {
        b.restock_urgency
            .cmp(&a.restock_urgency)
            .then_with(|| a.days_until_stockout.total_cmp(&b.days_until_stockout))
    });
    let count = |urgency: RestockUrgency| needed.iter().filter(|p| p.restock_urgency == urgency).count();
    let (high, medium) = (count(RestockUrgency::High), count(RestockUrgency::Medium));

    let restock_recommendations: Vec<String> = needed
        .iter()
        .map(|p| match p.restock_date {
            Some(date) => format!(
                "Order {} units of {} by {} ({} urgency)",
                p.recommended_order_quantity, p.name, date, p.restock_urgency
            ),
            None => format!(
                "Order {} units of {} ({} urgency)",
                p.recommended_order_quantity, p.name, p.restock_urgency
            ),
        })
        .collect();

    let status = if high > 0 {
        HealthStatus::Critical
    } else if !needed.is_empty() {
        HealthStatus::NeedsAttention
    } else {
        HealthStatus::Healthy
    };
    let inventory_health = match status {
        HealthStatus::Critical => format!(
            "Critical: {high} item(s) will stock out before a new order can arrive"
        ),
        HealthStatus::NeedsAttention => format!(
            "Needs attention: {} item(s) should be reordered within their lead-time buffer",
            needed.len()
        ),
        HealthStatus::Healthy => format!("Healthy: all {} item(s) are covered beyond their lead time", items.len()),
    };

    let mut key_insights = vec![
        format!("{} of {} item(s) need restocking", needed.len(), predictions.len()),
        format!(
            "{} item(s) have fewer than {} units on hand",
            low_stock_items.len(),
            config.low_stock_threshold
        ),
    ];
    if let Some((velocity, name)) = ranked.first() {
        key_insights.push(format!("Top seller is {name} at {velocity:.1} units/day"));
    }
    if idle > 0 {
        key_insights.push(format!("{idle} item(s) have no recorded sales"));
    }

    let mut action_items = Vec::new();
    if high > 0 {
        action_items.push(format!("Place orders immediately for {high} high-urgency item(s)"));
    }
    if medium > 0 {
        action_items.push(format!("Schedule orders this week for {medium} medium-urgency item(s)"));
    }
    if needed.is_empty() {
        action_items.push("No restock orders required; review again next planning cycle".to_string());
    }
    if idle > 0 {
        action_items.push(format!("Review {idle} slow-moving item(s) for markdown or delisting"));
    }

    InventoryInsights {
        status,
        inventory_health,
        key_insights,
        action_items,
        low_stock_items,
        top_selling_items,
        restock_recommendations,
    }
}
