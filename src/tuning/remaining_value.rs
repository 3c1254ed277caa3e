use super::smoothing::Smoother;
use crate::error::{Result, TrendlabError};
use crate::types::Label;

/// Options for a remaining value tuning pass.
#[derive(Default)]
pub struct TuneOptions<'a> {
    /// Ignore uncaptured countertrend moves inside a run, so the output
    /// never increases in magnitude within one trend.
    pub enforce_monotonicity: bool,
    /// Divide each run by its own maximum absolute value, clipping the
    /// result into [-1, 1].
    pub normalise_over_interval: bool,
    /// Move the output forward (positive) or backward (negative) in time,
    /// filling the vacated bars with zero.
    pub shift_periods: isize,
    /// Smoother applied to the final output.
    pub smoother: Option<&'a dyn Smoother>,
}

/// Replaces each trend label with the price distance still to be covered
/// before its trend run ends.
///
/// For a run of equal non-neutral labels over bars `a..=b` the output at bar
/// `t` is `prices[b] - prices[t]`, so magnitudes decay towards zero at the
/// run's last bar. Neutral bars stay at zero.
pub struct RemainingValueTuner;

impl RemainingValueTuner {
    pub fn tune(
        &self,
        prices: &[f64],
        labels: &[Label],
        options: &TuneOptions<'_>,
    ) -> Result<Vec<f64>> {
        verify_inputs(prices, labels)?;

        let mut result = vec![0.0; prices.len()];
        for (start, end) in label_runs(labels) {
            if labels[start] == Label::Neutral {
                continue;
            }
            let end_value = prices[end];
            let mut run = Vec::with_capacity(end - start + 1);
            if options.enforce_monotonicity {
                let mut reference = prices[start];
                for t in start..=end {
                    reference = if labels[start] == Label::Down {
                        reference.min(prices[t])
                    } else {
                        reference.max(prices[t])
                    };
                    run.push(end_value - reference);
                }
            } else {
                for t in start..=end {
                    run.push(end_value - prices[t]);
                }
            }
            if options.normalise_over_interval {
                normalise(&mut run);
            }
            result[start..=end].copy_from_slice(&run);
        }

        apply_shift(&mut result, options.shift_periods);

        if let Some(smoother) = options.smoother {
            result = smoother.smooth(&result);
        }

        Ok(result)
    }
}

fn verify_inputs(prices: &[f64], labels: &[Label]) -> Result<()> {
    if prices.is_empty() {
        return Err(TrendlabError::Tuning(
            "time series cannot be empty".to_string(),
        ));
    }
    if labels.is_empty() {
        return Err(TrendlabError::Tuning("labels cannot be empty".to_string()));
    }
    if prices.len() != labels.len() {
        return Err(TrendlabError::Tuning(
            "time series and labels must have the same length".to_string(),
        ));
    }
    Ok(())
}

/// Inclusive (start, end) bounds of each maximal run of equal labels.
fn label_runs(labels: &[Label]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..labels.len() {
        if labels[i] != labels[i - 1] {
            runs.push((start, i - 1));
            start = i;
        }
    }
    runs.push((start, labels.len() - 1));
    runs
}

fn normalise(values: &mut [f64]) {
    let max_abs = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if max_abs == 0.0 {
        return;
    }
    for value in values.iter_mut() {
        *value = (*value / max_abs).clamp(-1.0, 1.0);
    }
}

fn apply_shift(values: &mut [f64], periods: isize) {
    let len = values.len();
    if periods == 0 || len == 0 {
        return;
    }
    let magnitude = periods.unsigned_abs().min(len);
    if periods > 0 {
        values.rotate_right(magnitude);
        for j in 0..magnitude {
            values[j] = 0.0;
        }
    } else {
        values.rotate_left(magnitude);
        for j in (len - magnitude)..len {
            values[j] = 0.0;
        }
    }
}
