use super::traits::ConfigSection;
use crate::error::{Result, TrendlabError};
use crate::labelling::LabellerFamily;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default labeller parameters used when the caller supplies none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabellingConfig {
    pub omega: f64,
    pub marginal_change_thres: f64,
    pub window_size: usize,
    pub transaction_cost: f64,
    pub trend_coeff: f64,
}

impl Default for LabellingConfig {
    fn default() -> Self {
        Self {
            omega: 0.005,
            marginal_change_thres: 0.01,
            window_size: 30,
            transaction_cost: 0.001,
            trend_coeff: 0.05,
        }
    }
}

impl LabellingConfig {
    /// Parameter map for constructing a labeller of the given family.
    pub fn params_for(&self, family: LabellerFamily) -> HashMap<String, f64> {
        let mut params = HashMap::new();
        match family {
            LabellerFamily::BinaryCtl => {
                params.insert("omega".to_string(), self.omega);
            }
            LabellerFamily::TernaryCtl => {
                params.insert(
                    "marginal_change_thres".to_string(),
                    self.marginal_change_thres,
                );
                params.insert("window_size".to_string(), self.window_size as f64);
            }
            LabellerFamily::OracleBinary => {
                params.insert("transaction_cost".to_string(), self.transaction_cost);
            }
            LabellerFamily::OracleTernary => {
                params.insert("transaction_cost".to_string(), self.transaction_cost);
                params.insert("trend_coeff".to_string(), self.trend_coeff);
            }
        }
        params
    }
}

impl ConfigSection for LabellingConfig {
    fn section_name() -> &'static str {
        "labelling"
    }

    fn validate(&self) -> Result<()> {
        if !self.omega.is_finite() || self.omega < 0.0 {
            return Err(TrendlabError::Configuration(
                "Omega must be a non-negative finite number".to_string(),
            ));
        }
        if !self.marginal_change_thres.is_finite() || self.marginal_change_thres < 0.0 {
            return Err(TrendlabError::Configuration(
                "Marginal change threshold must be a non-negative finite number".to_string(),
            ));
        }
        if self.window_size == 0 {
            return Err(TrendlabError::Configuration(
                "Window size must be at least 1".to_string(),
            ));
        }
        if !self.transaction_cost.is_finite() || self.transaction_cost < 0.0 {
            return Err(TrendlabError::Configuration(
                "Transaction cost must be a non-negative finite number".to_string(),
            ));
        }
        if !self.trend_coeff.is_finite() || self.trend_coeff < 0.0 {
            return Err(TrendlabError::Configuration(
                "Trend coefficient must be a non-negative finite number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(LabellingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_omega_rejected() {
        let config = LabellingConfig {
            omega: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = LabellingConfig {
            window_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_params_build_every_family() {
        let config = LabellingConfig::default();
        for family in LabellerFamily::ALL {
            let params = config.params_for(family);
            assert!(family.build(&params).is_ok());
        }
    }
}
