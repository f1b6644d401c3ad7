use stockcast_core::{ForecastError, ProductId};
use tracing::warn;

/// Outcome of a per-item batch operation.
///
/// A batch never fails as a whole: successful items land in `results` (in
/// input order) and every per-item error is kept in `failures` after being
/// logged.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome<T> {
    pub results: Vec<T>,
    pub failures: Vec<(ProductId, ForecastError)>,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BatchOutcome<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one item's outcome.
    pub fn record(&mut self, id: &ProductId, outcome: Result<T, ForecastError>) {
        match outcome {
            Ok(value) => self.results.push(value),
            Err(e) => {
                warn!(product_id = %id, error = %e, "item excluded from batch");
                self.failures.push((id.clone(), e));
            }
        }
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_splits_ok_and_err_without_stopping() {
        let a = ProductId::new("a").unwrap();
        let b = ProductId::new("b").unwrap();
        let c = ProductId::new("c").unwrap();

        let mut outcome = BatchOutcome::new();
        outcome.record(&a, Ok(1));
        outcome.record(&b, Err(ForecastError::invalid_input("bad price")));
        outcome.record(&c, Ok(3));

        assert_eq!(outcome.failed_count(), 1);
        assert_eq!(outcome.failures[0].0, b);
        assert_eq!(outcome.into_results(), vec![1, 3]);
    }
}
