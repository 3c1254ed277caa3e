use super::bounds::{default_bounds, ParamBound};
use crate::error::{Result, TrendlabError};
use crate::labelling::LabellerFamily;
use crate::returns::ReturnEstimator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub struct OptimiserConfig {
    pub initial_points: usize,
    pub iterations: usize,
    pub seed: Option<u64>,
}

impl Default for OptimiserConfig {
    fn default() -> Self {
        Self {
            initial_points: 10,
            iterations: 50,
            seed: None,
        }
    }
}

/// Best candidate found for one labeller family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimisationResult {
    pub family: String,
    pub params: HashMap<String, f64>,
    pub target: f64,
}

impl OptimisationResult {
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Seeded random search over a labeller family's parameter space.
///
/// Phase one draws `initial_points` uniform candidates and evaluates them in
/// parallel. Phase two runs `iterations` sequential steps, each sampling
/// around the incumbent with a radius that contracts as the run progresses.
/// The objective is the summed estimated return over the given series.
pub struct Optimiser {
    config: OptimiserConfig,
    estimator: Box<dyn ReturnEstimator>,
}

impl Optimiser {
    pub fn new(config: OptimiserConfig, estimator: Box<dyn ReturnEstimator>) -> Self {
        Self { config, estimator }
    }

    /// Optimise over the family's default bounds.
    pub fn optimise(
        &self,
        family: LabellerFamily,
        series: &[Vec<f64>],
    ) -> Result<OptimisationResult> {
        let bounds = default_bounds(family);
        self.optimise_with_bounds(family, series, &bounds)
    }

    pub fn optimise_with_bounds(
        &self,
        family: LabellerFamily,
        series: &[Vec<f64>],
        bounds: &[ParamBound],
    ) -> Result<OptimisationResult> {
        if self.config.initial_points == 0 {
            return Err(TrendlabError::Optimisation(
                "initial_points must be at least 1".to_string(),
            ));
        }
        if series.is_empty() {
            return Err(TrendlabError::Optimisation(
                "at least one series is required".to_string(),
            ));
        }
        if bounds.is_empty() {
            return Err(TrendlabError::Optimisation(format!(
                "no parameter bounds declared for {}",
                family.name()
            )));
        }

        let base_seed = match self.config.seed {
            Some(seed) => seed,
            None => StdRng::from_entropy().gen(),
        };

        // Each probe derives its own generator from the base seed, so the
        // batch stays reproducible whatever the thread schedule.
        let probes: Vec<(HashMap<String, f64>, Result<f64>)> = (0..self.config.initial_points)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                let params = sample_candidate(bounds, &mut rng);
                let target = self.evaluate(family, &params, series);
                (params, target)
            })
            .collect();

        let mut best: Option<(HashMap<String, f64>, f64)> = None;
        for (params, target) in probes {
            let target = target?;
            match &best {
                Some((_, incumbent)) if target <= *incumbent => {}
                _ => best = Some((params, target)),
            }
        }
        let (mut best_params, mut best_target) = best.ok_or_else(|| {
            TrendlabError::Optimisation("probe batch produced no candidates".to_string())
        })?;

        let mut rng =
            StdRng::seed_from_u64(base_seed.wrapping_add(self.config.initial_points as u64));
        for iteration in 0..self.config.iterations {
            let progress = iteration as f64 / self.config.iterations as f64;
            let radius = 0.5 * (1.0 - progress) + 0.05 * progress;

            let mut candidate = HashMap::new();
            for bound in bounds {
                let centre = best_params
                    .get(bound.name)
                    .copied()
                    .unwrap_or((bound.low + bound.high) / 2.0);
                candidate.insert(
                    bound.name.to_string(),
                    bound.sample_around(centre, radius, &mut rng),
                );
            }

            let target = self.evaluate(family, &candidate, series)?;
            if target > best_target {
                log::debug!(
                    "{} refinement step {} improved target to {:.6}",
                    family.name(),
                    iteration,
                    target
                );
                best_target = target;
                best_params = candidate;
            }
        }

        log::info!(
            "{} optimisation finished, target {:.6}",
            family.name(),
            best_target
        );

        Ok(OptimisationResult {
            family: family.name().to_string(),
            params: best_params,
            target: best_target,
        })
    }

    fn evaluate(
        &self,
        family: LabellerFamily,
        params: &HashMap<String, f64>,
        series: &[Vec<f64>],
    ) -> Result<f64> {
        let labeller = family.build(params)?;
        let mut total = 0.0;
        for prices in series {
            let labels = labeller.get_labels(prices)?;
            let value = self
                .estimator
                .estimate_return(prices, &labels)
                .map_err(|e| TrendlabError::Optimisation(e.to_string()))?;
            total += value;
        }
        Ok(total)
    }
}

fn sample_candidate(bounds: &[ParamBound], rng: &mut StdRng) -> HashMap<String, f64> {
    bounds
        .iter()
        .map(|b| (b.name.to_string(), b.sample(rng)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::SimpleReturnEstimator;

    fn optimiser(seed: u64) -> Optimiser {
        Optimiser::new(
            OptimiserConfig {
                initial_points: 8,
                iterations: 12,
                seed: Some(seed),
            },
            Box::new(SimpleReturnEstimator),
        )
    }

    #[test]
    fn test_clean_trend_reaches_known_target() {
        // Every omega in the default bounds labels this series fully Up,
        // so the objective is flat at the total climb of 5.0.
        let series = vec![vec![100.0, 101.0, 102.0, 103.0, 104.0, 105.0]];
        let result = optimiser(11)
            .optimise(LabellerFamily::BinaryCtl, &series)
            .unwrap();
        assert!((result.target - 5.0).abs() < 1e-10);
        let omega = result.params["omega"];
        assert!(omega >= 0.0 && omega <= 0.01);
        assert_eq!(result.family, "binary_ctl");
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let series = vec![vec![100.0, 99.0, 101.0, 98.0, 102.0, 97.0]];
        let first = optimiser(42)
            .optimise(LabellerFamily::OracleBinary, &series)
            .unwrap();
        let second = optimiser(42)
            .optimise(LabellerFamily::OracleBinary, &series)
            .unwrap();
        assert_eq!(first.target, second.target);
        assert_eq!(first.params, second.params);
    }

    #[test]
    fn test_degenerate_bounds_pin_parameters() {
        let series = vec![vec![100.0, 101.0, 102.0, 103.0]];
        let bounds = [ParamBound::continuous("omega", 0.003, 0.003)];
        let result = optimiser(5)
            .optimise_with_bounds(LabellerFamily::BinaryCtl, &series, &bounds)
            .unwrap();
        assert_eq!(result.params["omega"], 0.003);
    }

    #[test]
    fn test_zero_probes_rejected() {
        let optimiser = Optimiser::new(
            OptimiserConfig {
                initial_points: 0,
                iterations: 5,
                seed: Some(1),
            },
            Box::new(SimpleReturnEstimator),
        );
        let result = optimiser.optimise(LabellerFamily::BinaryCtl, &[vec![1.0, 2.0]]);
        assert!(matches!(result, Err(TrendlabError::Optimisation(_))));
    }

    #[test]
    fn test_empty_series_rejected() {
        let result = optimiser(1).optimise(LabellerFamily::BinaryCtl, &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_round_trip() {
        let mut params = HashMap::new();
        params.insert("omega".to_string(), 0.004);
        let report = OptimisationResult {
            family: "binary_ctl".to_string(),
            params,
            target: 5.0,
        };
        let path = std::env::temp_dir().join("trendlab_report_round_trip.json");
        report.save(&path).unwrap();
        let loaded = OptimisationResult::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.family, report.family);
        assert_eq!(loaded.target, report.target);
        assert_eq!(loaded.params, report.params);
    }
}
