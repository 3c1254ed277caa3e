use super::{verify_series, TrendLabeller};
use crate::error::{Result, TrendlabError};
use crate::types::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrendState {
    Down,
    Neutral,
    Up,
}

/// Ternary continuous-trend labeller.
///
/// A three-way state machine anchored at a `trend_start` cursor. Each bar is
/// compared against the anchor's price: a proportional move beyond
/// `marginal_change_thres` confirms a trend and back-fills the bars since
/// the anchor; a continuation re-anchors on the current bar; when
/// `window_size` bars pass with neither, the state decays toward neutral
/// without writing labels.
pub struct TernaryCtlLabeller {
    marginal_change_thres: f64,
    window_size: usize,
}

impl TernaryCtlLabeller {
    /// `marginal_change_thres` is the proportional significant-move
    /// threshold; `window_size` the confirmation horizon in bars.
    pub fn new(marginal_change_thres: f64, window_size: usize) -> Result<Self> {
        if !marginal_change_thres.is_finite() || marginal_change_thres < 0.0 {
            return Err(TrendlabError::Validation(
                "marginal_change_thres must be a finite non-negative value".to_string(),
            ));
        }
        if window_size == 0 {
            return Err(TrendlabError::Validation(
                "window_size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            marginal_change_thres,
            window_size,
        })
    }

    pub fn marginal_change_thres(&self) -> f64 {
        self.marginal_change_thres
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

impl TrendLabeller for TernaryCtlLabeller {
    fn name(&self) -> &'static str {
        "ternary_ctl"
    }

    fn get_labels(&self, series: &[f64]) -> Result<Vec<Label>> {
        verify_series(series)?;

        let len = series.len();
        let mut labels = vec![Label::Neutral; len];
        let mut state = TrendState::Neutral;
        let mut trend_start = 0usize;

        for idx in 1..len {
            let price = series[idx];
            let reference = series[trend_start];
            let threshold = self.marginal_change_thres * reference;
            let window_elapsed = idx - trend_start > self.window_size;

            match state {
                TrendState::Neutral => {
                    if price >= reference + threshold {
                        // Entry back-fill covers the anchor itself.
                        for j in trend_start..=idx {
                            labels[j] = Label::Up;
                        }
                        state = TrendState::Up;
                        trend_start = idx;
                    } else if price <= reference - threshold {
                        for j in trend_start..=idx {
                            labels[j] = Label::Down;
                        }
                        state = TrendState::Down;
                        trend_start = idx;
                    } else if window_elapsed {
                        // Stale anchor: re-anchor without labelling.
                        trend_start = idx;
                    }
                }
                TrendState::Up => {
                    if price > reference {
                        // Continuation re-anchors on the new high ground.
                        labels[idx] = Label::Up;
                        trend_start = idx;
                    } else if price <= reference - threshold {
                        // Reversal back-fill starts after the anchor, which
                        // already belongs to the old trend.
                        for j in (trend_start + 1)..=idx {
                            labels[j] = Label::Down;
                        }
                        state = TrendState::Down;
                        trend_start = idx;
                    } else if window_elapsed {
                        state = TrendState::Neutral;
                        trend_start = idx;
                    }
                }
                TrendState::Down => {
                    if price < reference {
                        labels[idx] = Label::Down;
                        trend_start = idx;
                    } else if price >= reference + threshold {
                        for j in (trend_start + 1)..=idx {
                            labels[j] = Label::Up;
                        }
                        state = TrendState::Up;
                        trend_start = idx;
                    } else if window_elapsed {
                        state = TrendState::Neutral;
                        trend_start = idx;
                    }
                }
            }
        }

        Ok(labels)
    }
}
