//! `stockcast-core`: foundation building blocks shared by the forecasting crates.
//!
//! This crate contains **pure** primitives (no IO, no clocks, no configuration).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{ForecastError, ForecastResult};
pub use id::ProductId;
pub use value_object::ValueObject;
