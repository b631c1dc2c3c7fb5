use ndarray::Array2;
use serde::{Serialize, Deserialize};

use crate::types::{Action, Coord};
use crate::world::{Transition, World};

/// Full enumeration of `(state, action) -> (next_state, reward, terminal)`.
///
/// Rows are states, columns are action indices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionTable {
    pub next_state: Array2<usize>,
    pub reward: Array2<f64>,
    pub terminal: Array2<bool>,
}

impl TransitionTable {
    /// Apply the world's transition rule to every cell and every action
    pub fn from_world(world: &World) -> Self {
        let n_states = world.n_states();
        let shape = (n_states, Action::COUNT);

        let mut next_state: Array2<usize> = Array2::zeros(shape);
        let mut reward: Array2<f64> = Array2::zeros(shape);
        let mut terminal = Array2::from_elem(shape, false);

        for state in 0..n_states {
            for action in Action::ALL {
                let t = world.transition_from(Coord::from_state(state, world.size()), action);
                let idx = [state, action.index()];
                next_state[idx] = t.next_state;
                reward[idx] = t.reward;
                terminal[idx] = t.terminal;
            }
        }

        TransitionTable { next_state, reward, terminal }
    }

    pub fn n_states(&self) -> usize {
        self.next_state.nrows()
    }

    pub fn n_actions(&self) -> usize {
        self.next_state.ncols()
    }

    /// Panics when `state` or `action` is out of range
    pub fn get(&self, state: usize, action: usize) -> Transition {
        Transition {
            next_state: self.next_state[[state, action]],
            reward: self.reward[[state, action]],
            terminal: self.terminal[[state, action]],
        }
    }
}
