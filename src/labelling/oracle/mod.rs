pub mod binary;
pub mod ternary;

pub use binary::OracleBinaryLabeller;
pub use ternary::OracleTernaryLabeller;

/// Time-indexed transition rewards for a K-state system, shape (T−1, K, K).
///
/// Entry (t, from, to) is the reward of moving from state `from` at time t
/// to state `to` at time t+1. Forbidden transitions carry negative infinity
/// and can never appear on an optimal path. Stored flat; built once per
/// labelling call and read-only afterwards.
pub struct TransitionCosts {
    steps: usize,
    states: usize,
    values: Vec<f64>,
}

impl TransitionCosts {
    pub fn new(steps: usize, states: usize, fill: f64) -> Self {
        Self {
            steps,
            states,
            values: vec![fill; steps * states * states],
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn get(&self, t: usize, from: usize, to: usize) -> f64 {
        self.values[(t * self.states + from) * self.states + to]
    }

    pub fn set(&mut self, t: usize, from: usize, to: usize, value: f64) {
        self.values[(t * self.states + from) * self.states + to] = value;
    }
}

/// Transition-cost strategy plugged into the shared DP routine.
pub trait CostModel {
    fn state_count(&self) -> usize;

    /// Build the (T−1, K, K) reward tensor for `series`.
    fn build_costs(&self, series: &[f64]) -> TransitionCosts;
}

/// Globally optimal state path through the cost tensor of `model`.
///
/// Forward pass: S[0,:] = 0 and S[t,k] = max_j (S[t−1,j] + cost(t−1,j,k)).
/// Backward pass reconstructs the path by argmax, breaking ties toward the
/// lowest state index. The reconstruction only ever emits indices in
/// 0..state_count.
pub fn optimal_path(series: &[f64], model: &dyn CostModel) -> Vec<usize> {
    let len = series.len();
    let states = model.state_count();
    let costs = model.build_costs(series);

    // Forward value pass over a flat (T, K) table.
    let mut score = vec![0.0f64; len * states];
    for t in 1..len {
        for to in 0..states {
            let mut best = score[(t - 1) * states] + costs.get(t - 1, 0, to);
            for from in 1..states {
                let candidate = score[(t - 1) * states + from] + costs.get(t - 1, from, to);
                if candidate > best {
                    best = candidate;
                }
            }
            score[t * states + to] = best;
        }
    }

    // Backward reconstruction, first maximum wins on exact ties.
    let mut path = vec![0usize; len];
    let last = len - 1;
    let mut best_state = 0usize;
    let mut best_value = score[last * states];
    for state in 1..states {
        if score[last * states + state] > best_value {
            best_value = score[last * states + state];
            best_state = state;
        }
    }
    path[last] = best_state;

    for t in (0..last).rev() {
        let next = path[t + 1];
        let mut best_state = 0usize;
        let mut best_value = score[t * states] + costs.get(t, 0, next);
        for state in 1..states {
            let candidate = score[t * states + state] + costs.get(t, state, next);
            if candidate > best_value {
                best_value = candidate;
                best_state = state;
            }
        }
        path[t] = best_state;
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-state model with a fixed reward tensor, for exercising the DP
    /// machinery without any price semantics.
    struct FixedCosts {
        costs: Vec<((usize, usize, usize), f64)>,
        steps: usize,
        states: usize,
        fill: f64,
    }

    impl CostModel for FixedCosts {
        fn state_count(&self) -> usize {
            self.states
        }

        fn build_costs(&self, _series: &[f64]) -> TransitionCosts {
            let mut tensor = TransitionCosts::new(self.steps, self.states, self.fill);
            for &((t, from, to), value) in &self.costs {
                tensor.set(t, from, to, value);
            }
            tensor
        }
    }

    #[test]
    fn test_path_follows_rewards() {
        // Reward staying in state 1 at every step.
        let model = FixedCosts {
            costs: vec![((0, 1, 1), 1.0), ((1, 1, 1), 1.0), ((0, 0, 1), 0.5)],
            steps: 2,
            states: 2,
            fill: 0.0,
        };
        let path = optimal_path(&[0.0, 0.0, 0.0], &model);
        assert_eq!(path, vec![1, 1, 1]);
    }

    #[test]
    fn test_tie_breaks_to_lowest_state() {
        // All-zero tensor: every path scores 0, so the reconstruction must
        // settle on state 0 everywhere.
        let model = FixedCosts {
            costs: vec![],
            steps: 3,
            states: 3,
            fill: 0.0,
        };
        let path = optimal_path(&[0.0; 4], &model);
        assert_eq!(path, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_forbidden_transition_never_selected() {
        // State 1 pays at the last step, but reaching it from state 0 is
        // forbidden at step 0; the path must wait and switch at step 1.
        let model = FixedCosts {
            costs: vec![
                ((0, 0, 1), f64::NEG_INFINITY),
                ((1, 0, 1), 0.1),
                ((1, 1, 1), f64::NEG_INFINITY),
                ((0, 1, 1), f64::NEG_INFINITY),
                ((0, 1, 0), f64::NEG_INFINITY),
            ],
            steps: 2,
            states: 2,
            fill: 0.0,
        };
        let path = optimal_path(&[0.0, 0.0, 0.0], &model);
        assert_eq!(path, vec![0, 0, 1]);
    }

    #[test]
    fn test_costs_indexing() {
        let mut tensor = TransitionCosts::new(2, 3, f64::NEG_INFINITY);
        tensor.set(1, 2, 0, 4.5);
        assert_eq!(tensor.get(1, 2, 0), 4.5);
        assert!(tensor.get(0, 0, 0).is_infinite());
        assert_eq!(tensor.steps(), 2);
        assert_eq!(tensor.states(), 3);
    }
}
