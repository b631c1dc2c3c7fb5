use ndarray::Array1;
use rand::rngs::StdRng;
use std::fmt::Debug;

use crate::types::Action;

/// Learning rule plugged into an [`Agent`](super::Agent).
///
/// The agent owns the episode bookkeeping and the random source; a strategy
/// only decides which action to issue and how its own tables evolve.
pub trait Strategy: Debug {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Action actually issued at `state`, noise included
    fn select_action(&mut self, state: usize, rng: &mut StdRng) -> Action;

    /// Learning-specific reaction to an observed transition
    fn update_internal(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_state: usize,
        is_trap: bool,
    );

    /// Estimated value of a state
    fn value(&self, state: usize) -> f64;

    /// Greedy action at a state
    fn policy(&self, state: usize) -> Action;

    /// Value of every state
    fn values(&self) -> Array1<f64>;

    /// Greedy action of every state
    fn policies(&self) -> Vec<Action>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn select_action(&mut self, state: usize, rng: &mut StdRng) -> Action {
        (**self).select_action(state, rng)
    }

    fn update_internal(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_state: usize,
        is_trap: bool,
    ) {
        (**self).update_internal(state, action, reward, next_state, is_trap)
    }

    fn value(&self, state: usize) -> f64 {
        (**self).value(state)
    }

    fn policy(&self, state: usize) -> Action {
        (**self).policy(state)
    }

    fn values(&self) -> Array1<f64> {
        (**self).values()
    }

    fn policies(&self) -> Vec<Action> {
        (**self).policies()
    }
}
