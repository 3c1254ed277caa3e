use super::{optimal_path, CostModel, TransitionCosts};
use crate::error::{Result, TrendlabError};
use crate::labelling::scaling::scale_ternary;
use crate::labelling::{verify_series, TrendLabeller};
use crate::types::Label;

const DOWN: usize = 0;
const NEUTRAL: usize = 1;
const UP: usize = 2;

struct TernaryCosts {
    transaction_cost: f64,
    trend_coeff: f64,
}

impl CostModel for TernaryCosts {
    fn state_count(&self) -> usize {
        3
    }

    fn build_costs(&self, series: &[f64]) -> TransitionCosts {
        let steps = series.len() - 1;
        // Down↔up entries keep the -inf fill: every route goes via neutral.
        let mut costs = TransitionCosts::new(steps, 3, f64::NEG_INFINITY);
        for t in 0..steps {
            let delta = series[t + 1] - series[t];
            let switch = -series[t] * self.transaction_cost;
            costs.set(t, DOWN, DOWN, -delta);
            costs.set(t, NEUTRAL, NEUTRAL, delta.abs() * self.trend_coeff);
            costs.set(t, UP, UP, delta);
            costs.set(t, DOWN, NEUTRAL, switch);
            costs.set(t, NEUTRAL, DOWN, switch);
            costs.set(t, NEUTRAL, UP, switch);
            costs.set(t, UP, NEUTRAL, switch);
        }
        costs
    }
}

/// Three-state oracle labeller.
///
/// Short positions earn the negated delta, flat bars earn a fraction
/// `trend_coeff` of the absolute delta, long bars earn the delta. Switching
/// is charged on the departure bar's price, and direct down↔up jumps are
/// forbidden outright.
pub struct OracleTernaryLabeller {
    transaction_cost: f64,
    trend_coeff: f64,
}

impl OracleTernaryLabeller {
    pub fn new(transaction_cost: f64, trend_coeff: f64) -> Result<Self> {
        if !transaction_cost.is_finite() || transaction_cost < 0.0 {
            return Err(TrendlabError::Validation(
                "transaction_cost must be a finite non-negative value".to_string(),
            ));
        }
        if !trend_coeff.is_finite() || trend_coeff < 0.0 {
            return Err(TrendlabError::Validation(
                "trend_coeff must be a finite non-negative value".to_string(),
            ));
        }
        Ok(Self {
            transaction_cost,
            trend_coeff,
        })
    }

    pub fn transaction_cost(&self) -> f64 {
        self.transaction_cost
    }

    pub fn trend_coeff(&self) -> f64 {
        self.trend_coeff
    }
}

impl TrendLabeller for OracleTernaryLabeller {
    fn name(&self) -> &'static str {
        "oracle_ternary"
    }

    fn get_labels(&self, series: &[f64]) -> Result<Vec<Label>> {
        verify_series(series)?;
        let model = TernaryCosts {
            transaction_cost: self.transaction_cost,
            trend_coeff: self.trend_coeff,
        };
        let path = optimal_path(series, &model);
        Ok(scale_ternary(&path))
    }
}
