use crate::error::{Result, TrendlabError};
use serde::{Deserialize, Serialize};

/// Fee rates applied by the fee-aware return estimator.
///
/// Transaction fees are charged once per position entry, proportionally to
/// the entry bar's price; holding fees accrue per bar while the position
/// stays open. Long (`lp_`) and short (`sp_`) sides are charged separately.
/// Values are immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeesConfig {
    lp_transaction_fees: f64,
    sp_transaction_fees: f64,
    lp_holding_fees: f64,
    sp_holding_fees: f64,
}

impl FeesConfig {
    pub fn new(
        lp_transaction_fees: f64,
        sp_transaction_fees: f64,
        lp_holding_fees: f64,
        sp_holding_fees: f64,
    ) -> Result<Self> {
        let fields = [
            ("lp_transaction_fees", lp_transaction_fees),
            ("sp_transaction_fees", sp_transaction_fees),
            ("lp_holding_fees", lp_holding_fees),
            ("sp_holding_fees", sp_holding_fees),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(TrendlabError::Validation(format!(
                    "{} must be a finite number",
                    name
                )));
            }
            if value < 0.0 {
                return Err(TrendlabError::Validation(format!(
                    "{} must be non-negative",
                    name
                )));
            }
        }
        Ok(Self {
            lp_transaction_fees,
            sp_transaction_fees,
            lp_holding_fees,
            sp_holding_fees,
        })
    }

    pub fn lp_transaction_fees(&self) -> f64 {
        self.lp_transaction_fees
    }

    pub fn sp_transaction_fees(&self) -> f64 {
        self.sp_transaction_fees
    }

    pub fn lp_holding_fees(&self) -> f64 {
        self.lp_holding_fees
    }

    pub fn sp_holding_fees(&self) -> f64 {
        self.sp_holding_fees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let config = FeesConfig::default();
        assert_eq!(config.lp_transaction_fees(), 0.0);
        assert_eq!(config.sp_transaction_fees(), 0.0);
        assert_eq!(config.lp_holding_fees(), 0.0);
        assert_eq!(config.sp_holding_fees(), 0.0);
    }

    #[test]
    fn test_custom_values() {
        let config = FeesConfig::new(0.001, 0.002, 0.0005, 0.0008).unwrap();
        assert_eq!(config.lp_transaction_fees(), 0.001);
        assert_eq!(config.sp_transaction_fees(), 0.002);
        assert_eq!(config.lp_holding_fees(), 0.0005);
        assert_eq!(config.sp_holding_fees(), 0.0008);
    }

    #[test]
    fn test_rejects_negative_fees() {
        let err = FeesConfig::new(0.001, -0.001, 0.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("sp_transaction_fees"));
        assert!(FeesConfig::new(0.0, 0.0, -0.0005, 0.0).is_err());
        assert!(FeesConfig::new(0.0, 0.0, 0.0, -0.0008).is_err());
    }

    #[test]
    fn test_rejects_non_finite_fees() {
        assert!(FeesConfig::new(f64::NAN, 0.0, 0.0, 0.0).is_err());
        assert!(FeesConfig::new(0.0, f64::INFINITY, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_zero_values_allowed() {
        assert!(FeesConfig::new(0.0, 0.0, 0.0, 0.0).is_ok());
    }
}
