use super::fees::FeesConfig;
use crate::error::{Result, TrendlabError};
use crate::types::Label;

/// Turns a labelled price series into a scalar return figure.
///
/// The optimiser maximises this value, so an estimator doubles as the
/// objective function of a parameter search.
pub trait ReturnEstimator: Send + Sync {
    fn estimate_return(&self, prices: &[f64], labels: &[Label]) -> Result<f64>;
}

fn verify_alignment(prices: &[f64], labels: &[Label]) -> Result<()> {
    if prices.len() != labels.len() {
        return Err(TrendlabError::Validation(
            "prices and labels must have the same length".to_string(),
        ));
    }
    Ok(())
}

/// Sum of per-bar price deltas weighted by the bar's position label.
fn label_weighted_return(prices: &[f64], labels: &[Label]) -> f64 {
    let mut total = 0.0;
    for i in 1..prices.len() {
        total += (prices[i] - prices[i - 1]) * f64::from(labels[i].as_i8());
    }
    total
}

/// Frictionless return estimation: position changes are free and holding
/// costs nothing.
pub struct SimpleReturnEstimator;

impl ReturnEstimator for SimpleReturnEstimator {
    fn estimate_return(&self, prices: &[f64], labels: &[Label]) -> Result<f64> {
        verify_alignment(prices, labels)?;
        Ok(label_weighted_return(prices, labels))
    }
}

/// Return estimation net of transaction and holding fees.
///
/// Beyond realism, the fees act as a regularizer during parameter search:
/// they penalize labellings that flip positions on every wiggle or stretch
/// trends across genuinely neutral stretches.
pub struct ReturnsEstimatorWithFees {
    fees: FeesConfig,
}

impl ReturnsEstimatorWithFees {
    pub fn new(fees: FeesConfig) -> Self {
        Self { fees }
    }

    /// Per-bar charge for each bar spent long or short.
    fn holding_fees(&self, labels: &[Label]) -> f64 {
        let longs = labels.iter().filter(|&&l| l == Label::Up).count();
        let shorts = labels.iter().filter(|&&l| l == Label::Down).count();
        longs as f64 * self.fees.lp_holding_fees() + shorts as f64 * self.fees.sp_holding_fees()
    }

    /// Entry charge whenever a bar opens a position its predecessor did not
    /// hold, proportional to the entry bar's price.
    fn transaction_fees(&self, prices: &[f64], labels: &[Label]) -> f64 {
        let sides = [
            (Label::Up, self.fees.lp_transaction_fees()),
            (Label::Down, self.fees.sp_transaction_fees()),
        ];
        let mut total = 0.0;
        for (side, fee) in sides {
            let mut entry_prices = 0.0;
            if labels[0] == side {
                entry_prices += prices[0];
            }
            for i in 1..labels.len() {
                if labels[i] == side && labels[i - 1] != side {
                    entry_prices += prices[i];
                }
            }
            total += entry_prices * fee;
        }
        total
    }
}

impl ReturnEstimator for ReturnsEstimatorWithFees {
    fn estimate_return(&self, prices: &[f64], labels: &[Label]) -> Result<f64> {
        verify_alignment(prices, labels)?;
        if prices.is_empty() {
            return Ok(0.0);
        }
        let fees = self.transaction_fees(prices, labels) + self.holding_fees(labels);
        Ok(label_weighted_return(prices, labels) - fees)
    }
}
