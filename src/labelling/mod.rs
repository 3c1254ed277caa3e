pub mod binary_ctl;
pub mod oracle;
pub mod scaling;
pub mod ternary_ctl;

pub use binary_ctl::BinaryCtlLabeller;
pub use oracle::{OracleBinaryLabeller, OracleTernaryLabeller};
pub use ternary_ctl::TernaryCtlLabeller;

use crate::error::{Result, TrendlabError};
use crate::types::Label;
use std::collections::HashMap;

/// Base capability shared by every labeller variant.
///
/// `get_labels` validates its input before any computation: the series must
/// hold at least two elements and be free of NaN or infinite values. A call
/// either returns a label per input bar or fails with no partial output.
pub trait TrendLabeller: Send + Sync {
    /// Display name
    fn name(&self) -> &'static str;

    /// Label every bar of `series` with its trend state.
    fn get_labels(&self, series: &[f64]) -> Result<Vec<Label>>;
}

/// Shared input validation, run by every labeller before touching the data.
pub fn verify_series(series: &[f64]) -> Result<()> {
    if series.len() < 2 {
        return Err(TrendlabError::Validation(
            "time series must contain at least two elements".to_string(),
        ));
    }
    if series.iter().any(|v| v.is_nan()) {
        return Err(TrendlabError::InvalidSeries(
            "time series cannot contain NaN values".to_string(),
        ));
    }
    if series.iter().any(|v| v.is_infinite()) {
        return Err(TrendlabError::InvalidSeries(
            "time series cannot contain infinite values".to_string(),
        ));
    }
    Ok(())
}

/// The closed set of labeller variants the crate ships.
///
/// Used wherever a labeller must be chosen at runtime (the optimiser, the
/// chart app) instead of at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabellerFamily {
    BinaryCtl,
    TernaryCtl,
    OracleBinary,
    OracleTernary,
}

impl LabellerFamily {
    pub const ALL: [LabellerFamily; 4] = [
        LabellerFamily::BinaryCtl,
        LabellerFamily::TernaryCtl,
        LabellerFamily::OracleBinary,
        LabellerFamily::OracleTernary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LabellerFamily::BinaryCtl => "binary_ctl",
            LabellerFamily::TernaryCtl => "ternary_ctl",
            LabellerFamily::OracleBinary => "oracle_binary",
            LabellerFamily::OracleTernary => "oracle_ternary",
        }
    }

    /// Construct a labeller of this family from named parameter values.
    ///
    /// Integer-valued parameters (`window_size`) are passed as f64 and
    /// rounded; this is the seam the optimiser drives with sampled
    /// candidates.
    pub fn build(&self, params: &HashMap<String, f64>) -> Result<Box<dyn TrendLabeller>> {
        let get = |key: &str| -> Result<f64> {
            params.get(key).copied().ok_or_else(|| {
                TrendlabError::Validation(format!(
                    "missing parameter '{}' for {}",
                    key,
                    self.name()
                ))
            })
        };

        match self {
            LabellerFamily::BinaryCtl => {
                let labeller = BinaryCtlLabeller::new(get("omega")?)?;
                Ok(Box::new(labeller))
            }
            LabellerFamily::TernaryCtl => {
                let window = get("window_size")?.round();
                if window < 1.0 {
                    return Err(TrendlabError::Validation(
                        "window_size must be at least 1".to_string(),
                    ));
                }
                let labeller =
                    TernaryCtlLabeller::new(get("marginal_change_thres")?, window as usize)?;
                Ok(Box::new(labeller))
            }
            LabellerFamily::OracleBinary => {
                let labeller = OracleBinaryLabeller::new(get("transaction_cost")?)?;
                Ok(Box::new(labeller))
            }
            LabellerFamily::OracleTernary => {
                let labeller =
                    OracleTernaryLabeller::new(get("transaction_cost")?, get("trend_coeff")?)?;
                Ok(Box::new(labeller))
            }
        }
    }
}
