use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use stockcast_core::ValueObject;

/// Average units sold per day, with the weekly/monthly views derived from it.
///
/// Built once per item per planning cycle and never mutated afterwards.
/// Negative and non-finite inputs collapse to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesVelocity {
    daily: f64,
}

impl SalesVelocity {
    pub const ZERO: SalesVelocity = SalesVelocity { daily: 0.0 };

    pub fn from_daily(daily: f64) -> Self {
        if daily.is_finite() && daily > 0.0 {
            Self { daily }
        } else {
            Self::ZERO
        }
    }

    pub fn daily(&self) -> f64 {
        self.daily
    }

    pub fn weekly(&self) -> f64 {
        self.daily * 7.0
    }

    pub fn monthly(&self) -> f64 {
        self.daily * 30.0
    }

    pub fn is_zero(&self) -> bool {
        self.daily <= 0.0
    }
}

impl ValueObject for SalesVelocity {}

impl Serialize for SalesVelocity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SalesVelocity", 3)?;
        s.serialize_field("daily", &self.daily())?;
        s.serialize_field("weekly", &self.weekly())?;
        s.serialize_field("monthly", &self.monthly())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_views_scale_daily() {
        let v = SalesVelocity::from_daily(2.0);
        assert_eq!(v.weekly(), 14.0);
        assert_eq!(v.monthly(), 60.0);
    }

    #[test]
    fn degenerate_inputs_collapse_to_zero() {
        assert!(SalesVelocity::from_daily(-3.0).is_zero());
        assert!(SalesVelocity::from_daily(f64::NAN).is_zero());
        assert!(SalesVelocity::from_daily(f64::INFINITY).is_zero());
    }

    #[test]
    fn serializes_all_three_views() {
        let json = serde_json::to_value(SalesVelocity::from_daily(1.0)).unwrap();
        assert_eq!(json["daily"], 1.0);
        assert_eq!(json["weekly"], 7.0);
        assert_eq!(json["monthly"], 30.0);
    }
}
