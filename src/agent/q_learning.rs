use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};

use super::obey::ObeyDistribution;
use super::traits::Strategy;
use crate::error::{Result, GridError};
use crate::types::Action;

/// Tabular Q-learning.
///
/// Model-free: the only input is the `(state, action, reward, next_state)`
/// tuple observed at each step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QLearning {
    discount: f64,
    learning_rate: f64,
    obey: ObeyDistribution,
    q_values: Array2<f64>,
    state_policy: Array1<usize>,
}

impl QLearning {
    pub fn new(
        n_states: usize,
        n_actions: usize,
        discount: f64,
        p_obey: f64,
        learning_rate: f64,
    ) -> Result<Self> {
        super::check_unit_interval("discount", discount)?;
        if !learning_rate.is_finite() || learning_rate < 0.0 {
            return Err(GridError::invalid_parameter(
                "learning_rate".to_string(),
                format!("must be a finite non-negative number, got {}", learning_rate),
            ));
        }
        let obey = ObeyDistribution::new(p_obey, n_actions)?;

        Ok(QLearning {
            discount,
            learning_rate,
            obey,
            q_values: Array2::zeros((n_states, n_actions)),
            state_policy: Array1::zeros(n_states),
        })
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn p_obey(&self) -> f64 {
        self.obey.p_obey()
    }

    pub fn q_values(&self) -> &Array2<f64> {
        &self.q_values
    }

    pub fn q(&self, state: usize, action: Action) -> f64 {
        self.q_values[[state, action.index()]]
    }
}

impl Strategy for QLearning {
    fn name(&self) -> &'static str {
        "q-learning"
    }

    fn select_action(&mut self, state: usize, rng: &mut StdRng) -> Action {
        let issued = self.obey.sample(self.state_policy[state], rng);
        Action::ALL[issued]
    }

    fn update_internal(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_state: usize,
        _is_trap: bool,
    ) {
        let best_next = super::max_of(self.q_values.row(next_state));
        let target = reward + self.discount * best_next;

        let entry = &mut self.q_values[[state, action.index()]];
        *entry += self.learning_rate * (target - *entry);

        self.state_policy[state] = super::argmax(self.q_values.row(state));
    }

    fn value(&self, state: usize) -> f64 {
        super::max_of(self.q_values.row(state))
    }

    fn policy(&self, state: usize) -> Action {
        Action::ALL[self.state_policy[state]]
    }

    fn values(&self) -> Array1<f64> {
        self.q_values.map_axis(Axis(1), super::max_of)
    }

    fn policies(&self) -> Vec<Action> {
        self.state_policy.iter().map(|&a| Action::ALL[a]).collect()
    }
}
