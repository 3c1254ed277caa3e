use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trendlab::labelling::{OracleBinaryLabeller, OracleTernaryLabeller, TrendLabeller};
use trendlab::types::Label;

fn random_series(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut series = vec![100.0];
    for _ in 1..len {
        let step = rng.gen_range(-6.0..6.0);
        let next: f64 = series.last().unwrap() + step;
        series.push(next.max(10.0));
    }
    series
}

fn binary_state(label: Label) -> usize {
    match label {
        Label::Down => 0,
        Label::Up => 1,
        Label::Neutral => panic!("binary oracle must not emit neutral"),
    }
}

fn ternary_state(label: Label) -> usize {
    match label {
        Label::Down => 0,
        Label::Neutral => 1,
        Label::Up => 2,
    }
}

/// Reward of a full binary state path: long bars earn the delta, flat bars
/// earn nothing, switching is charged on the departure bar's price.
fn binary_path_score(series: &[f64], path: &[usize], transaction_cost: f64) -> f64 {
    let mut total = 0.0;
    for t in 0..series.len() - 1 {
        total += match (path[t], path[t + 1]) {
            (0, 0) => 0.0,
            (1, 1) => series[t + 1] - series[t],
            _ => -series[t] * transaction_cost,
        };
    }
    total
}

/// Reward of a full ternary state path; `None` when it takes a forbidden
/// direct down-up jump.
fn ternary_path_score(
    series: &[f64],
    path: &[usize],
    transaction_cost: f64,
    trend_coeff: f64,
) -> Option<f64> {
    let mut total = 0.0;
    for t in 0..series.len() - 1 {
        let delta = series[t + 1] - series[t];
        total += match (path[t], path[t + 1]) {
            (0, 0) => -delta,
            (1, 1) => delta.abs() * trend_coeff,
            (2, 2) => delta,
            (0, 2) | (2, 0) => return None,
            _ => -series[t] * transaction_cost,
        };
    }
    Some(total)
}

/// Every state path of the given length, decoded from a base-`states` code.
fn all_paths(len: usize, states: usize) -> Vec<Vec<usize>> {
    let total = states.pow(len as u32);
    (0..total)
        .map(|code| {
            let mut code = code;
            let mut path = vec![0usize; len];
            for slot in path.iter_mut() {
                *slot = code % states;
                code /= states;
            }
            path
        })
        .collect()
}

fn count_transitions(labels: &[Label]) -> usize {
    labels.windows(2).filter(|w| w[0] != w[1]).count()
}

#[test]
fn test_binary_oracle_matches_exhaustive_search() {
    for len in 2..=8 {
        for seed in [1u64, 2, 3] {
            for cost in [0.0, 0.001, 0.02] {
                let series = random_series(len, seed * 100 + len as u64);
                let labeller = OracleBinaryLabeller::new(cost).unwrap();
                let labels = labeller.get_labels(&series).unwrap();
                let path: Vec<usize> = labels.iter().map(|l| binary_state(*l)).collect();

                let achieved = binary_path_score(&series, &path, cost);
                let best = all_paths(len, 2)
                    .iter()
                    .map(|p| binary_path_score(&series, p, cost))
                    .fold(f64::NEG_INFINITY, f64::max);
                assert!(
                    achieved + 1e-9 >= best,
                    "suboptimal path for len {} seed {} cost {}: {} < {}",
                    len,
                    seed,
                    cost,
                    achieved,
                    best
                );
            }
        }
    }
}

#[test]
fn test_ternary_oracle_matches_exhaustive_search() {
    for len in 2..=8 {
        for seed in [1u64, 2, 3] {
            for (cost, coeff) in [(0.0, 0.0), (0.001, 0.1), (0.005, 0.5)] {
                let series = random_series(len, seed * 1000 + len as u64);
                let labeller = OracleTernaryLabeller::new(cost, coeff).unwrap();
                let labels = labeller.get_labels(&series).unwrap();
                let path: Vec<usize> = labels.iter().map(|l| ternary_state(*l)).collect();

                let achieved = ternary_path_score(&series, &path, cost, coeff)
                    .expect("returned path must not use forbidden transitions");
                let best = all_paths(len, 3)
                    .iter()
                    .filter_map(|p| ternary_path_score(&series, p, cost, coeff))
                    .fold(f64::NEG_INFINITY, f64::max);
                assert!(
                    achieved + 1e-9 >= best,
                    "suboptimal path for len {} seed {} cost {} coeff {}: {} < {}",
                    len,
                    seed,
                    cost,
                    coeff,
                    achieved,
                    best
                );
            }
        }
    }
}

#[test]
fn test_monotone_series_sanity() {
    let rising: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
    let falling: Vec<f64> = (0..10).map(|i| 100.0 - i as f64).collect();

    let binary = OracleBinaryLabeller::new(0.0005).unwrap();
    assert!(binary
        .get_labels(&rising)
        .unwrap()
        .iter()
        .all(|&l| l == Label::Up));
    assert!(binary
        .get_labels(&falling)
        .unwrap()
        .iter()
        .all(|&l| l == Label::Down));

    let ternary = OracleTernaryLabeller::new(0.0005, 0.1).unwrap();
    assert!(ternary
        .get_labels(&rising)
        .unwrap()
        .iter()
        .all(|&l| l == Label::Up));
    assert!(ternary
        .get_labels(&falling)
        .unwrap()
        .iter()
        .all(|&l| l == Label::Down));
}

#[test]
fn test_oracle_labelling_is_deterministic() {
    let series = random_series(40, 99);
    let binary = OracleBinaryLabeller::new(0.001).unwrap();
    let ternary = OracleTernaryLabeller::new(0.001, 0.3).unwrap();
    assert_eq!(
        binary.get_labels(&series).unwrap(),
        binary.get_labels(&series).unwrap()
    );
    assert_eq!(
        ternary.get_labels(&series).unwrap(),
        ternary.get_labels(&series).unwrap()
    );
}

#[test]
fn test_higher_transaction_cost_never_adds_transitions() {
    let ladder = [0.0, 0.002, 0.01, 0.05];
    let cases: [(&[f64], [usize; 4]); 3] = [
        (
            &[1.0, 0.99, 1.3, 1.09, 1.23, 1.09, 1.16, 0.96, 1.15],
            [5, 5, 5, 3],
        ),
        (
            &[
                100.0, 104.0, 99.0, 106.0, 98.0, 107.0, 103.0, 110.0, 96.0, 108.0, 101.0, 112.0,
            ],
            [7, 7, 6, 1],
        ),
        (
            &[
                50.0, 51.5, 49.2, 52.8, 48.1, 53.0, 47.5, 54.2, 46.9, 55.0,
            ],
            [5, 5, 5, 1],
        ),
    ];

    for (series, expected) in cases {
        let mut counts = Vec::new();
        for cost in ladder {
            let labeller = OracleTernaryLabeller::new(cost, 0.1).unwrap();
            let labels = labeller.get_labels(series).unwrap();
            counts.push(count_transitions(&labels));
        }
        assert_eq!(counts, expected.to_vec());
        for pair in counts.windows(2) {
            assert!(
                pair[0] >= pair[1],
                "transition count rose with cost: {:?}",
                counts
            );
        }
    }
}
