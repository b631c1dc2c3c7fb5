//! # Gridworld - Tabular Reinforcement Learning on a Square Grid
//!
//! An agent walks a `size x size` grid from a start cell to a goal cell while
//! avoiding trap cells. The crate provides the world and its deterministic
//! transition model, an environment with a precomputed transition table and
//! a step budget, and tabular agents that learn to reach the goal.
//!
//! ## Key Features
//!
//! - **World**: fixed or randomly drawn traps, clamped moves, absorbing goal
//! - **Environment**: full transition table built once, episode step budget
//! - **Agents**: policy iteration (model-based) and Q-learning (model-free),
//!   both acting through an obey/disobey actuator noise model
//! - **Reproducibility**: every random draw comes from an explicitly seeded source
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gridworld::builders::PolicyIterationBuilder;
//! use gridworld::env::Environment;
//! use gridworld::trainer;
//! use gridworld::types::Coord;
//! use gridworld::world::{TrapSpec, World};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1337);
//! let traps = TrapSpec::Fixed { cells: vec![Coord::new(2, 2)] };
//! let world = World::new(5, Coord::new(0, 0), None, Some(&traps), &mut rng).unwrap();
//! let mut env = Environment::new(world, 100).unwrap();
//!
//! let mut agent = PolicyIterationBuilder::new()
//!     .discount(0.9)
//!     .p_obey(0.8)
//!     .plan(1000)
//!     .build(&env)
//!     .unwrap();
//!
//! let history = trainer::train(&mut env, &mut agent, 10).unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`types`] - Coordinates, actions and cell kinds
//! - [`world`] - Grid generation and the transition function
//! - [`env`] - Environment and transition table
//! - [`agent`] - Agent bookkeeping and learning strategies
//! - [`builders`] - Builder patterns for agents
//! - [`config`] - Settings loaded from JSON
//! - [`trainer`] - Episode loop
//! - [`metrics`] - History summaries
//! - [`error`] - Error types and result handling

pub mod agent;
pub mod builders;
pub mod config;
pub mod env;
pub mod error;
pub mod metrics;
pub mod trainer;
pub mod types;
pub mod world;

#[cfg(test)]
mod tests;
