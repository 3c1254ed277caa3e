use crate::error::{Result, TrendlabError};
use std::str::FromStr;

/// Window alignment for a smoothing pass.
///
/// `Left` anchors the window on the current bar and reaches forward;
/// `Centered` straddles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Centered,
}

impl FromStr for Direction {
    type Err = TrendlabError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Direction::Left),
            "centered" => Ok(Direction::Centered),
            other => Err(TrendlabError::Validation(format!(
                "unknown smoothing direction '{}'",
                other
            ))),
        }
    }
}

/// Smooths a tuned value series. Output length always equals input length.
pub trait Smoother: Send + Sync {
    fn smooth(&self, values: &[f64]) -> Vec<f64>;
}

fn verify_window(window_size: usize) -> Result<()> {
    if window_size < 2 {
        return Err(TrendlabError::Validation(
            "window_size must be at least 2".to_string(),
        ));
    }
    Ok(())
}

fn centered_offset(window_size: usize) -> isize {
    -((window_size / 2) as isize)
}

/// Equal-weight window mean. Positions outside the series count as zero.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    window_size: usize,
    direction: Direction,
}

impl SimpleMovingAverage {
    pub fn new(window_size: usize, direction: Direction) -> Result<Self> {
        verify_window(window_size)?;
        Ok(Self {
            window_size,
            direction,
        })
    }
}

impl Smoother for SimpleMovingAverage {
    fn smooth(&self, values: &[f64]) -> Vec<f64> {
        let offset = match self.direction {
            Direction::Left => 0,
            Direction::Centered => centered_offset(self.window_size),
        };
        let mut out = Vec::with_capacity(values.len());
        for i in 0..values.len() {
            let start = i as isize + offset;
            let mut sum = 0.0;
            for k in 0..self.window_size {
                let idx = start + k as isize;
                if idx >= 0 && (idx as usize) < values.len() {
                    sum += values[idx as usize];
                }
            }
            out.push(sum / self.window_size as f64);
        }
        out
    }
}

/// Weighted window mean with weights rising towards the window's far end
/// (left) or peaking at its centre (centered). Positions outside the series
/// take the nearest edge value.
#[derive(Debug, Clone)]
pub struct LinearWeightedAverage {
    window_size: usize,
    direction: Direction,
}

impl LinearWeightedAverage {
    pub fn new(window_size: usize, direction: Direction) -> Result<Self> {
        verify_window(window_size)?;
        Ok(Self {
            window_size,
            direction,
        })
    }
}

impl Smoother for LinearWeightedAverage {
    fn smooth(&self, values: &[f64]) -> Vec<f64> {
        if values.is_empty() {
            return Vec::new();
        }
        let (weights, offset) = match self.direction {
            Direction::Left => (ascending_weights(self.window_size), 0),
            Direction::Centered => (
                triangular_weights(self.window_size),
                centered_offset(self.window_size),
            ),
        };
        let last = (values.len() - 1) as isize;
        let mut out = Vec::with_capacity(values.len());
        for i in 0..values.len() {
            let start = i as isize + offset;
            let mut acc = 0.0;
            for (k, weight) in weights.iter().enumerate() {
                let idx = (start + k as isize).clamp(0, last) as usize;
                acc += weight * values[idx];
            }
            out.push(acc);
        }
        out
    }
}

fn ascending_weights(window_size: usize) -> Vec<f64> {
    let total = (window_size * (window_size + 1) / 2) as f64;
    (1..=window_size).map(|k| k as f64 / total).collect()
}

fn triangular_weights(window_size: usize) -> Vec<f64> {
    let mut raw = Vec::with_capacity(window_size);
    for k in 0..window_size {
        let mirrored = k.min(window_size - 1 - k);
        let value = if window_size % 2 == 1 {
            2.0 * (mirrored + 1) as f64 / (window_size + 1) as f64
        } else {
            (2 * (mirrored + 1) - 1) as f64 / window_size as f64
        };
        raw.push(value);
    }
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}
