use crate::labelling::LabellerFamily;
use rand::rngs::StdRng;
use rand::Rng;

/// Inclusive search range for a single labeller parameter.
///
/// Integer bounds are still carried as f64 so every parameter flows through
/// the same sampling and candidate plumbing; `integer` controls whether
/// samples land on whole numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBound {
    pub name: &'static str,
    pub low: f64,
    pub high: f64,
    pub integer: bool,
}

impl ParamBound {
    pub fn continuous(name: &'static str, low: f64, high: f64) -> Self {
        Self {
            name,
            low,
            high,
            integer: false,
        }
    }

    pub fn integer(name: &'static str, low: f64, high: f64) -> Self {
        Self {
            name,
            low,
            high,
            integer: true,
        }
    }

    /// Uniform draw over the full range.
    pub fn sample(&self, rng: &mut StdRng) -> f64 {
        sample_range(self.low, self.high, self.integer, rng)
    }

    /// Uniform draw over the range centred on `centre` spanning `radius`
    /// times the full width on each side, clamped to the bounds.
    pub fn sample_around(&self, centre: f64, radius: f64, rng: &mut StdRng) -> f64 {
        let span = (self.high - self.low) * radius;
        let low = (centre - span).max(self.low);
        let high = (centre + span).min(self.high);
        sample_range(low, high, self.integer, rng)
    }
}

fn sample_range(low: f64, high: f64, integer: bool, rng: &mut StdRng) -> f64 {
    if integer {
        let lo = low.ceil() as i64;
        let hi = (high.floor() as i64).max(lo);
        rng.gen_range(lo..=hi) as f64
    } else {
        rng.gen_range(low..=high)
    }
}

/// Default parameter search space for each labeller family.
pub fn default_bounds(family: LabellerFamily) -> Vec<ParamBound> {
    match family {
        LabellerFamily::BinaryCtl => vec![ParamBound::continuous("omega", 0.0, 0.01)],
        LabellerFamily::TernaryCtl => vec![
            ParamBound::continuous("marginal_change_thres", 1e-6, 0.1),
            ParamBound::integer("window_size", 1.0, 5000.0),
        ],
        LabellerFamily::OracleBinary => {
            vec![ParamBound::continuous("transaction_cost", 0.0, 0.01)]
        }
        LabellerFamily::OracleTernary => vec![
            ParamBound::continuous("transaction_cost", 0.0, 0.01),
            ParamBound::continuous("trend_coeff", 0.0, 0.1),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_default_bounds_cover_every_family() {
        for family in LabellerFamily::ALL {
            assert!(!default_bounds(family).is_empty());
        }
    }

    #[test]
    fn test_ternary_window_is_integer_bound() {
        let bounds = default_bounds(LabellerFamily::TernaryCtl);
        let window = bounds.iter().find(|b| b.name == "window_size").unwrap();
        assert!(window.integer);
        assert_eq!(window.low, 1.0);
        assert_eq!(window.high, 5000.0);
    }

    #[test]
    fn test_sample_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let bound = ParamBound::continuous("omega", 0.0, 0.01);
        for _ in 0..200 {
            let value = bound.sample(&mut rng);
            assert!(value >= 0.0 && value <= 0.01);
        }
    }

    #[test]
    fn test_integer_samples_are_whole_numbers() {
        let mut rng = StdRng::seed_from_u64(7);
        let bound = ParamBound::integer("window_size", 1.0, 10.0);
        for _ in 0..200 {
            let value = bound.sample(&mut rng);
            assert_eq!(value, value.round());
            assert!(value >= 1.0 && value <= 10.0);
        }
    }

    #[test]
    fn test_sample_around_clamps_to_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let bound = ParamBound::continuous("transaction_cost", 0.0, 0.01);
        for _ in 0..200 {
            let value = bound.sample_around(0.0, 0.2, &mut rng);
            assert!(value >= 0.0 && value <= 0.002 + 1e-12);
        }
    }

    #[test]
    fn test_sample_around_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let bound = ParamBound::continuous("omega", 0.003, 0.003);
        assert_eq!(bound.sample_around(0.003, 0.5, &mut rng), 0.003);
    }
}
