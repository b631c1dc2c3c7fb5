use crate::agent::{Agent, PolicyIteration, QLearning, RandomWalk};
use crate::env::Environment;
use crate::error::{Result, GridError};
use crate::types::Coord;

fn required(name: &str, value: Option<f64>) -> Result<f64> {
    value.ok_or_else(|| GridError::InvalidParameter {
        name: name.to_string(),
        reason: "must be specified".to_string(),
    })
}

/// Builder for a policy-iteration agent
pub struct PolicyIterationBuilder {
    discount: Option<f64>,
    p_obey: Option<f64>,
    start: Option<Coord>,
    seed: u64,
    plan_sweeps: Option<usize>,
}

impl PolicyIterationBuilder {
    pub fn new() -> Self {
        PolicyIterationBuilder {
            discount: None,
            p_obey: None,
            start: None,
            seed: 0,
            plan_sweeps: None,
        }
    }

    pub fn discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn p_obey(mut self, p_obey: f64) -> Self {
        self.p_obey = Some(p_obey);
        self
    }

    /// Start cell, the world's start by default
    pub fn start(mut self, start: Coord) -> Self {
        self.start = Some(start);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Plan up front, for at most `max_sweeps` sweeps, instead of one sweep per action
    pub fn plan(mut self, max_sweeps: usize) -> Self {
        self.plan_sweeps = Some(max_sweeps);
        self
    }

    pub fn build(self, env: &Environment) -> Result<Agent<PolicyIteration>> {
        let discount = required("discount", self.discount)?;
        let p_obey = required("p_obey", self.p_obey)?;

        let mut strategy = PolicyIteration::new(env.transitions(), discount, p_obey)?;
        if let Some(max_sweeps) = self.plan_sweeps {
            strategy.plan(max_sweeps);
        }

        let start = self.start.unwrap_or_else(|| env.world().start());
        Agent::new(strategy, start, env.world().size(), self.seed)
    }
}

impl Default for PolicyIterationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a Q-learning agent
pub struct QLearningBuilder {
    discount: Option<f64>,
    p_obey: Option<f64>,
    learning_rate: Option<f64>,
    start: Option<Coord>,
    seed: u64,
}

impl QLearningBuilder {
    pub fn new() -> Self {
        QLearningBuilder {
            discount: None,
            p_obey: None,
            learning_rate: None,
            start: None,
            seed: 0,
        }
    }

    pub fn discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn p_obey(mut self, p_obey: f64) -> Self {
        self.p_obey = Some(p_obey);
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = Some(learning_rate);
        self
    }

    pub fn start(mut self, start: Coord) -> Self {
        self.start = Some(start);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Only the grid dimensions are read from `env`, never its transition table
    pub fn build(self, env: &Environment) -> Result<Agent<QLearning>> {
        let discount = required("discount", self.discount)?;
        let p_obey = required("p_obey", self.p_obey)?;
        let learning_rate = required("learning_rate", self.learning_rate)?;

        let strategy = QLearning::new(
            env.n_states(),
            env.n_actions(),
            discount,
            p_obey,
            learning_rate,
        )?;

        let start = self.start.unwrap_or_else(|| env.world().start());
        Agent::new(strategy, start, env.world().size(), self.seed)
    }
}

impl Default for QLearningBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the random baseline
pub struct RandomWalkBuilder {
    start: Option<Coord>,
    seed: u64,
}

impl RandomWalkBuilder {
    pub fn new() -> Self {
        RandomWalkBuilder { start: None, seed: 0 }
    }

    pub fn start(mut self, start: Coord) -> Self {
        self.start = Some(start);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self, env: &Environment) -> Result<Agent<RandomWalk>> {
        let start = self.start.unwrap_or_else(|| env.world().start());
        Agent::new(RandomWalk::new(env.n_states()), start, env.world().size(), self.seed)
    }
}

impl Default for RandomWalkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
