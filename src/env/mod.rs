//! # Environment
//!
//! Wraps a [`World`] with episode bookkeeping. The full transition table is
//! computed once, eagerly, when the environment is built; planning agents
//! read it, model-free agents only ever see the outcome of [`Environment::step`].

mod transitions;

pub use transitions::TransitionTable;

use crate::config::Settings;
use crate::error::{Result, GridError};
use crate::types::{Action, CellKind, Coord};
use crate::world::World;

/// Outcome of a single environment step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub next_state: usize,
    pub reward: f64,
    /// Goal reached or step budget exhausted
    pub terminal: bool,
    /// Landing cell is a trap, independent of `terminal`
    pub is_trap: bool,
    /// Episode ended by the step budget rather than by the world
    pub timed_out: bool,
}

#[derive(Clone, Debug)]
pub struct Environment {
    world: World,
    transitions: TransitionTable,
    max_steps: usize,
    steps: usize,
}

impl Environment {
    pub fn new(world: World, max_steps: usize) -> Result<Self> {
        if max_steps == 0 {
            return Err(GridError::invalid_parameter(
                "max_steps",
                "episodes need at least one step",
            ));
        }

        let transitions = TransitionTable::from_world(&world);
        tracing::debug!(
            n_states = transitions.n_states(),
            n_actions = transitions.n_actions(),
            max_steps,
            "transition table built"
        );

        Ok(Environment {
            world,
            transitions,
            max_steps,
            steps: 0,
        })
    }

    /// Build the world described by `settings` and wrap it
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let world = settings.build_world()?;
        Environment::new(world, settings.max_steps)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn n_states(&self) -> usize {
        self.world.n_states()
    }

    pub fn n_actions(&self) -> usize {
        Action::COUNT
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Steps taken in the current episode
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Start a new episode. The grid is kept as is.
    pub fn reset(&mut self) {
        self.steps = 0;
    }

    pub fn step(&mut self, state: usize, action: Action) -> Result<Step> {
        let transition = self.world.transition(state, action)?;
        self.steps += 1;

        let timed_out = !transition.terminal && self.steps >= self.max_steps;
        let landing = Coord::from_state(transition.next_state, self.world.size());

        Ok(Step {
            next_state: transition.next_state,
            reward: transition.reward,
            terminal: transition.terminal || timed_out,
            is_trap: self.world.cell_at(landing) == CellKind::Trap,
            timed_out,
        })
    }

    /// Same as [`Environment::step`] with an integer action
    pub fn step_index(&mut self, state: usize, action: usize) -> Result<Step> {
        let action = Action::from_index(action)?;
        self.step(state, action)
    }
}
