use super::{verify_series, TrendLabeller};
use crate::error::{Result, TrendlabError};
use crate::types::Label;

/// Binary continuous-trend labeller.
///
/// Sweeps the series once, tracking a running extremum in the current
/// direction. A proportional retracement of more than `omega` from that
/// extremum confirms the leg: every bar between the previous opposite
/// extremum and the current one is back-filled with the ending direction,
/// then the direction flips. Bars never covered by a confirmed leg stay
/// neutral.
pub struct BinaryCtlLabeller {
    omega: f64,
}

impl BinaryCtlLabeller {
    /// `omega` is the proportional breakout/reversal threshold.
    pub fn new(omega: f64) -> Result<Self> {
        if !omega.is_finite() || omega < 0.0 {
            return Err(TrendlabError::Validation(
                "omega must be a finite non-negative value".to_string(),
            ));
        }
        Ok(Self { omega })
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }
}

impl TrendLabeller for BinaryCtlLabeller {
    fn name(&self) -> &'static str {
        "binary_ctl"
    }

    fn get_labels(&self, series: &[f64]) -> Result<Vec<Label>> {
        verify_series(series)?;

        let len = series.len();
        let mut labels = vec![Label::Neutral; len];

        let first_price = series[0];
        let mut current_high = series[0];
        let mut high_time = 0usize;
        let mut current_low = series[0];
        let mut low_time = 0usize;
        let mut direction = 0i8;
        let mut extreme_idx = 0usize;

        // First sweep: the initial proportional breakout from the first
        // price fixes the starting direction and extreme point.
        for (i, &price) in series.iter().enumerate() {
            if price > first_price * (1.0 + self.omega) {
                current_high = price;
                high_time = i;
                extreme_idx = i;
                direction = 1;
                break;
            }
            if price < first_price * (1.0 - self.omega) {
                current_low = price;
                low_time = i;
                extreme_idx = i;
                direction = -1;
                break;
            }
        }

        if direction == 0 {
            // No breakout anywhere: the series never leaves the omega band.
            return Ok(labels);
        }

        let initial = if direction > 0 { Label::Up } else { Label::Down };
        for j in 0..=extreme_idx {
            labels[j] = initial;
        }

        // Second sweep: extremum tracking with retroactive leg confirmation.
        for i in (extreme_idx + 1)..len {
            let price = series[i];
            if direction > 0 {
                if price > current_high {
                    current_high = price;
                    high_time = i;
                }
                if price < current_high - current_high * self.omega && low_time <= high_time {
                    for j in (low_time + 1)..=high_time {
                        labels[j] = Label::Up;
                    }
                    current_low = price;
                    low_time = i;
                    direction = -1;
                }
            } else {
                if price < current_low {
                    current_low = price;
                    low_time = i;
                }
                if price > current_low + current_low * self.omega && high_time <= low_time {
                    for j in (high_time + 1)..=low_time {
                        labels[j] = Label::Down;
                    }
                    current_high = price;
                    high_time = i;
                    direction = 1;
                }
            }
        }

        // Close the trailing leg: bars after the last opposite extremum
        // belong to the direction still in force at the end of the data.
        if direction > 0 {
            for j in (low_time + 1)..len {
                labels[j] = Label::Up;
            }
        } else {
            for j in (high_time + 1)..len {
                labels[j] = Label::Down;
            }
        }

        Ok(labels)
    }
}
