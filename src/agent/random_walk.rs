use ndarray::Array1;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Serialize, Deserialize};

use super::traits::Strategy;
use crate::types::Action;

/// Uniformly random baseline. Learns nothing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RandomWalk {
    n_states: usize,
}

impl RandomWalk {
    pub fn new(n_states: usize) -> Self {
        RandomWalk { n_states }
    }
}

impl Strategy for RandomWalk {
    fn name(&self) -> &'static str {
        "random-walk"
    }

    fn select_action(&mut self, _state: usize, rng: &mut StdRng) -> Action {
        Action::ALL[rng.gen_range(0..Action::COUNT)]
    }

    fn update_internal(&mut self, _: usize, _: Action, _: f64, _: usize, _: bool) {}

    fn value(&self, _state: usize) -> f64 {
        0.0
    }

    fn policy(&self, _state: usize) -> Action {
        Action::North
    }

    fn values(&self) -> Array1<f64> {
        Array1::zeros(self.n_states)
    }

    fn policies(&self) -> Vec<Action> {
        vec![Action::North; self.n_states]
    }
}
