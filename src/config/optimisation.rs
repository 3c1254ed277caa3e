use super::traits::ConfigSection;
use crate::error::{Result, TrendlabError};
use crate::optimisation::OptimiserConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimisationConfig {
    pub initial_points: usize,
    pub iterations: usize,
    pub seed: Option<u64>,
}

impl Default for OptimisationConfig {
    fn default() -> Self {
        Self {
            initial_points: 10,
            iterations: 50,
            seed: None,
        }
    }
}

impl From<&OptimisationConfig> for OptimiserConfig {
    fn from(config: &OptimisationConfig) -> Self {
        Self {
            initial_points: config.initial_points,
            iterations: config.iterations,
            seed: config.seed,
        }
    }
}

impl ConfigSection for OptimisationConfig {
    fn section_name() -> &'static str {
        "optimisation"
    }

    fn validate(&self) -> Result<()> {
        if self.initial_points == 0 {
            return Err(TrendlabError::Configuration(
                "Initial points must be at least 1".to_string(),
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
        assert!(OptimisationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_initial_points_rejected() {
        let config = OptimisationConfig {
            initial_points: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_converts_to_optimiser_config() {
        let section = OptimisationConfig {
            initial_points: 4,
            iterations: 9,
            seed: Some(3),
        };
        let config = OptimiserConfig::from(&section);
        assert_eq!(config.initial_points, 4);
        assert_eq!(config.iterations, 9);
        assert_eq!(config.seed, Some(3));
    }
}
