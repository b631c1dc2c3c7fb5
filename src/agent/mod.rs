//! # Agents
//!
//! An [`Agent`] is a fixed piece of episode bookkeeping (position, score,
//! step count, history) paired with an interchangeable [`Strategy`] that
//! picks actions and learns.
//!
//! ## Available Strategies
//!
//! - **PolicyIteration**: plans on the environment's transition table, then
//!   executes its policy through the obey/disobey noise model
//! - **QLearning**: model-free, one table entry updated per observed step
//! - **RandomWalk**: uniform baseline
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gridworld::builders::QLearningBuilder;
//! use gridworld::env::Environment;
//! use gridworld::types::Coord;
//! use gridworld::world::World;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let world = World::new(5, Coord::new(0, 0), None, None, &mut rng).unwrap();
//! let mut env = Environment::new(world, 100).unwrap();
//!
//! let mut agent = QLearningBuilder::new()
//!     .discount(0.9)
//!     .p_obey(0.9)
//!     .learning_rate(0.5)
//!     .seed(7)
//!     .build(&env)
//!     .unwrap();
//!
//! let state = agent.state();
//! let action = agent.act(state);
//! let step = env.step(state, action).unwrap();
//! agent.update(action, step.reward, step.next_state, step.is_trap);
//! ```

mod obey;
mod policy_iteration;
mod q_learning;
mod random_walk;
mod session;
pub mod traits;

pub use obey::ObeyDistribution;
pub use policy_iteration::{PolicyIteration, CONVERGENCE_TOLERANCE, DEFAULT_MAX_SWEEPS};
pub use q_learning::QLearning;
pub use random_walk::RandomWalk;
pub use session::{EpisodeRecord, Session};
pub use traits::Strategy;

use ndarray::{Array1, ArrayView1};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::error::{Result, GridError};
use crate::types::{Action, Coord};

/// Agent state shared by every strategy, plus the strategy itself.
///
/// The sampling source is not persisted; [`Agent::load`] reseeds it.
#[derive(Clone, Debug, Serialize)]
pub struct Agent<S> {
    session: Session,
    strategy: S,
    #[serde(skip)]
    rng: StdRng,
}

/// On-disk layout of an [`Agent`], field order matches its serialization
#[derive(Deserialize)]
struct StoredAgent<S> {
    session: Session,
    strategy: S,
}

impl<S: Strategy> Agent<S> {
    /// `start` must lie on the `size x size` grid the agent lives in
    pub fn new(strategy: S, start: Coord, size: usize, seed: u64) -> Result<Self> {
        if !start.in_bounds(size) {
            return Err(GridError::InvalidCoordinate { x: start.x, y: start.y, size });
        }
        Ok(Agent {
            session: Session::new(start, size),
            strategy,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Action issued at `state`
    pub fn act(&mut self, state: usize) -> Action {
        self.strategy.select_action(state, &mut self.rng)
    }

    /// Action issued at the agent's current position
    pub fn act_from_position(&mut self) -> Action {
        let state = self.session.state();
        self.act(state)
    }

    /// Feed back the outcome of `action` taken from the current position
    pub fn update(&mut self, action: Action, reward: f64, next_state: usize, is_trap: bool) {
        let state = self.session.state();
        self.strategy
            .update_internal(state, action, reward, next_state, is_trap);
        self.session.record(action, reward, next_state, is_trap);
    }

    /// Close the running episode and return its record
    pub fn reset(&mut self) -> EpisodeRecord {
        let record = self.session.reset();
        tracing::debug!(
            agent = self.strategy.name(),
            episode = self.session.episodes(),
            score = record.score,
            steps = record.steps,
            "episode archived"
        );
        record
    }

    pub fn history(&self) -> &[EpisodeRecord] {
        self.session.history()
    }

    pub fn value(&self, state: usize) -> f64 {
        self.strategy.value(state)
    }

    pub fn policy(&self, state: usize) -> Action {
        self.strategy.policy(state)
    }

    pub fn values(&self) -> Array1<f64> {
        self.strategy.values()
    }

    pub fn policies(&self) -> Vec<Action> {
        self.strategy.policies()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn position(&self) -> Coord {
        self.session.position()
    }

    pub fn state(&self) -> usize {
        self.session.state()
    }

    pub fn score(&self) -> f64 {
        self.session.score()
    }

    pub fn steps(&self) -> usize {
        self.session.steps()
    }

    pub fn episodes(&self) -> usize {
        self.session.episodes()
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    /// Reseed the action-sampling source
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl<S: Strategy + 'static> Agent<S> {
    /// Erase the strategy type so agents of different kinds share a collection
    pub fn boxed(self) -> Agent<Box<dyn Strategy>> {
        Agent {
            session: self.session,
            strategy: Box::new(self.strategy),
            rng: self.rng,
        }
    }
}

impl<S: Strategy + Serialize + DeserializeOwned> Agent<S> {
    /// Save the agent to disk
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = bincode::serialize(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Load agent from disk, sampling from a fresh source seeded with `seed`
    pub fn load<P: AsRef<Path>>(path: P, seed: u64) -> Result<Self> {
        let data = std::fs::read(path)?;
        let stored: StoredAgent<S> = bincode::deserialize(&data)?;
        Ok(Agent {
            session: stored.session,
            strategy: stored.strategy,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}

/// Reject anything outside `[0, 1]`, NaN included
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GridError::invalid_parameter(
            name.to_string(),
            format!("must lie in [0, 1], got {}", value),
        ));
    }
    Ok(())
}

/// Index of the first maximum
pub(crate) fn argmax(row: ArrayView1<f64>) -> usize {
    let mut best = 0;
    for (i, &v) in row.iter().enumerate() {
        if v > row[best] {
            best = i;
        }
    }
    best
}

pub(crate) fn max_of(row: ArrayView1<f64>) -> f64 {
    row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
