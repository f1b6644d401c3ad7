use std::collections::BTreeMap;

use serde::Serialize;

use stockcast_core::{ForecastError, ProductId};
use stockcast_forecast::{InventoryInsights, RestockPrediction, SimulationResult};

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    pub product_id: ProductId,
    pub error: String,
}

impl From<(ProductId, ForecastError)> for ItemFailure {
    fn from((product_id, error): (ProductId, ForecastError)) -> Self {
        Self {
            product_id,
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub success: bool,
    pub predictions: Vec<RestockPrediction>,
    pub failures: Vec<ItemFailure>,
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub success: bool,
    pub results: BTreeMap<String, SimulationResult>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub success: bool,
    pub insights: InventoryInsights,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
