use super::{optimal_path, CostModel, TransitionCosts};
use crate::error::{Result, TrendlabError};
use crate::labelling::scaling::scale_binary;
use crate::labelling::{verify_series, TrendLabeller};
use crate::types::Label;

const DOWN: usize = 0;
const UP: usize = 1;

struct BinaryCosts {
    transaction_cost: f64,
}

impl CostModel for BinaryCosts {
    fn state_count(&self) -> usize {
        2
    }

    fn build_costs(&self, series: &[f64]) -> TransitionCosts {
        let steps = series.len() - 1;
        let mut costs = TransitionCosts::new(steps, 2, 0.0);
        for t in 0..steps {
            let delta = series[t + 1] - series[t];
            let switch = -series[t] * self.transaction_cost;
            costs.set(t, DOWN, DOWN, 0.0);
            costs.set(t, UP, UP, delta);
            costs.set(t, DOWN, UP, switch);
            costs.set(t, UP, DOWN, switch);
        }
        costs
    }
}

/// Two-state oracle labeller.
///
/// Staying long earns the raw price delta, staying flat earns nothing, and
/// switching either way is charged proportionally on the price at the
/// departure bar. The returned sequence maximizes total reward over the
/// whole series.
pub struct OracleBinaryLabeller {
    transaction_cost: f64,
}

impl OracleBinaryLabeller {
    pub fn new(transaction_cost: f64) -> Result<Self> {
        if !transaction_cost.is_finite() || transaction_cost < 0.0 {
            return Err(TrendlabError::Validation(
                "transaction_cost must be a finite non-negative value".to_string(),
            ));
        }
        Ok(Self { transaction_cost })
    }

    pub fn transaction_cost(&self) -> f64 {
        self.transaction_cost
    }
}

impl TrendLabeller for OracleBinaryLabeller {
    fn name(&self) -> &'static str {
        "oracle_binary"
    }

    fn get_labels(&self, series: &[f64]) -> Result<Vec<Label>> {
        verify_series(series)?;
        let model = BinaryCosts {
            transaction_cost: self.transaction_cost,
        };
        let path = optimal_path(series, &model);
        Ok(scale_binary(&path))
    }
}
