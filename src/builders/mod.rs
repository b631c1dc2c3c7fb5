//! Builder patterns for agents

mod agent;

pub use agent::{PolicyIterationBuilder, QLearningBuilder, RandomWalkBuilder};
