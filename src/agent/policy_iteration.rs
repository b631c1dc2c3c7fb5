use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};

use super::obey::ObeyDistribution;
use super::traits::Strategy;
use crate::env::TransitionTable;
use crate::error::Result;
use crate::types::Action;

/// Euclidean norm of the value delta below which planning stops
pub const CONVERGENCE_TOLERANCE: f64 = 1e-5;

/// Default cap on the number of sweeps run by [`PolicyIteration::plan`]
pub const DEFAULT_MAX_SWEEPS: usize = 10_000;

/// Model-based planner.
///
/// Each sweep evaluates the current policy against the previous value
/// array, then improves it greedily. The intended action is itself run
/// through the obey/disobey mixture when its return is computed, so the
/// plan already accounts for the execution noise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyIteration {
    discount: f64,
    obey: ObeyDistribution,
    state_values: Array1<f64>,
    state_policy: Array1<usize>,
    reward_table: Array2<f64>,
    next_state_table: Array2<usize>,
    sweeps: usize,
    last_delta: f64,
    converged: bool,
}

impl PolicyIteration {
    pub fn new(transitions: &TransitionTable, discount: f64, p_obey: f64) -> Result<Self> {
        super::check_unit_interval("discount", discount)?;
        let obey = ObeyDistribution::new(p_obey, transitions.n_actions())?;
        let n_states = transitions.n_states();

        Ok(PolicyIteration {
            discount,
            obey,
            state_values: Array1::zeros(n_states),
            state_policy: Array1::zeros(n_states),
            reward_table: transitions.reward.clone(),
            next_state_table: transitions.next_state.clone(),
            sweeps: 0,
            last_delta: f64::INFINITY,
            converged: false,
        })
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn p_obey(&self) -> f64 {
        self.obey.p_obey()
    }

    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Sweeps run so far
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Norm of the value change produced by the last sweep
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    pub fn state_values(&self) -> &Array1<f64> {
        &self.state_values
    }

    pub fn state_policy(&self) -> &Array1<usize> {
        &self.state_policy
    }

    /// Expected return of intending `action` at `state`, under the current values
    pub fn expected_return(&self, state: usize, action: Action) -> f64 {
        self.action_value(state, action.index(), &self.state_values)
    }

    fn action_value(&self, state: usize, action: usize, values: &Array1<f64>) -> f64 {
        let noise = self.obey.row(action);
        let rewards = self.reward_table.row(state);
        let next_states = self.next_state_table.row(state);

        let mut expected_reward = 0.0;
        let mut expected_value = 0.0;
        for (issued, &p) in noise.iter().enumerate() {
            expected_reward += p * rewards[issued];
            expected_value += p * values[next_states[issued]];
        }

        expected_reward + self.discount * expected_value
    }

    /// One evaluation pass followed by one improvement pass.
    ///
    /// Both passes read the values of the previous sweep. Returns the norm of
    /// the value change; a sweep on a converged planner is a no-op.
    pub fn sweep(&mut self) -> f64 {
        if self.converged {
            return self.last_delta;
        }

        let previous = self.state_values.clone();
        let n_states = previous.len();
        let n_actions = self.obey.n_actions();

        for state in 0..n_states {
            self.state_values[state] =
                self.action_value(state, self.state_policy[state], &previous);
        }

        for state in 0..n_states {
            for action in 0..n_actions {
                let candidate = self.action_value(state, action, &previous);
                if candidate > self.state_values[state] {
                    self.state_values[state] = candidate;
                    self.state_policy[state] = action;
                }
            }
        }

        let delta = (&self.state_values - &previous)
            .mapv(|d| d * d)
            .sum()
            .sqrt();
        self.sweeps += 1;
        self.last_delta = delta;

        if delta < CONVERGENCE_TOLERANCE {
            self.converged = true;
            tracing::info!(sweeps = self.sweeps, delta, "policy iteration converged");
        } else {
            tracing::trace!(sweep = self.sweeps, delta, "policy iteration sweep");
        }

        delta
    }

    /// Sweep until convergence or until `max_sweeps` sweeps have run in total.
    /// Returns whether the planner converged.
    pub fn plan(&mut self, max_sweeps: usize) -> bool {
        while !self.converged && self.sweeps < max_sweeps {
            self.sweep();
        }
        if !self.converged {
            tracing::warn!(
                sweeps = self.sweeps,
                delta = self.last_delta,
                "policy iteration stopped before converging"
            );
        }
        self.converged
    }
}

impl Strategy for PolicyIteration {
    fn name(&self) -> &'static str {
        "policy-iteration"
    }

    fn select_action(&mut self, state: usize, rng: &mut StdRng) -> Action {
        if !self.converged {
            self.sweep();
        }
        let issued = self.obey.sample(self.state_policy[state], rng);
        Action::ALL[issued]
    }

    fn update_internal(
        &mut self,
        _state: usize,
        _action: Action,
        _reward: f64,
        _next_state: usize,
        _is_trap: bool,
    ) {
        // planning reads the model, observed transitions teach it nothing
    }

    fn value(&self, state: usize) -> f64 {
        self.state_values[state]
    }

    fn policy(&self, state: usize) -> Action {
        Action::ALL[self.state_policy[state]]
    }

    fn values(&self) -> Array1<f64> {
        self.state_values.clone()
    }

    fn policies(&self) -> Vec<Action> {
        self.state_policy.iter().map(|&a| Action::ALL[a]).collect()
    }
}
