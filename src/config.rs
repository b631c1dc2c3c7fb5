//! # Configuration
//!
//! Plain settings structure, deserialized from JSON:
//!
//! ```json
//! {
//!   "world": {
//!     "size": 5,
//!     "start": { "x": 0, "y": 0 },
//!     "end": { "x": 4, "y": 4 },
//!     "traps": { "mode": "fixed", "cells": [{ "x": 2, "y": 2 }] }
//!   },
//!   "max_steps": 100,
//!   "seed": 1337,
//!   "episodes": 50,
//!   "agents": {
//!     "policy_iteration": { "discount": 0.9, "p_obey": 0.8 },
//!     "q_learning": { "discount": 0.9, "p_obey": 0.9, "learning_rate": 0.5 }
//!   }
//! }
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::agent::{Agent, PolicyIteration, QLearning, DEFAULT_MAX_SWEEPS};
use crate::builders::{PolicyIterationBuilder, QLearningBuilder};
use crate::env::Environment;
use crate::error::{Result, GridError};
use crate::types::Coord;
use crate::world::{TrapConfig, TrapSpec, World};

fn default_seed() -> u64 {
    1337
}

fn default_max_sweeps() -> usize {
    DEFAULT_MAX_SWEEPS
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub world: WorldSettings,
    pub max_steps: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub episodes: usize,
    #[serde(default)]
    pub agents: AgentSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSettings {
    pub size: usize,
    pub start: Coord,
    /// Goal cell, bottom-right corner when absent
    #[serde(default)]
    pub end: Option<Coord>,
    #[serde(default)]
    pub traps: Option<TrapConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentSettings {
    #[serde(default)]
    pub policy_iteration: Option<PolicyIterationSettings>,
    #[serde(default)]
    pub q_learning: Option<QLearningSettings>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyIterationSettings {
    pub discount: f64,
    pub p_obey: f64,
    #[serde(default = "default_max_sweeps")]
    pub max_sweeps: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QLearningSettings {
    pub discount: f64,
    pub p_obey: f64,
    pub learning_rate: f64,
}

/// Offsets keeping the world and each agent on distinct streams of one session seed
const WORLD_STREAM: u64 = 0;
const POLICY_ITERATION_STREAM: u64 = 1;
const Q_LEARNING_STREAM: u64 = 2;

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Structural checks; hyperparameter ranges are checked again by the agents
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(GridError::invalid_parameter(
                "max_steps",
                "episodes need at least one step",
            ));
        }
        let size = self.world.size;
        for coord in [Some(self.world.start), self.world.end].iter().flatten() {
            if !coord.in_bounds(size) {
                return Err(GridError::InvalidCoordinate { x: coord.x, y: coord.y, size });
            }
        }
        if let Some(spec) = self.trap_spec()? {
            spec.validate(size)?;
        }
        Ok(())
    }

    /// Typed trap specification, if any
    pub fn trap_spec(&self) -> Result<Option<TrapSpec>> {
        self.world
            .traps
            .clone()
            .map(TrapSpec::try_from)
            .transpose()
    }

    /// Seed of one of the session's random streams
    pub fn stream_seed(&self, stream: u64) -> u64 {
        self.seed.wrapping_add(stream)
    }

    pub fn build_world(&self) -> Result<World> {
        let traps = self.trap_spec()?;
        let mut rng = StdRng::seed_from_u64(self.stream_seed(WORLD_STREAM));
        World::new(
            self.world.size,
            self.world.start,
            self.world.end,
            traps.as_ref(),
            &mut rng,
        )
    }

    /// Planning agent described by the settings, already planned
    pub fn policy_iteration_agent(&self, env: &Environment) -> Result<Option<Agent<PolicyIteration>>> {
        self.agents
            .policy_iteration
            .as_ref()
            .map(|cfg| {
                PolicyIterationBuilder::new()
                    .discount(cfg.discount)
                    .p_obey(cfg.p_obey)
                    .start(self.world.start)
                    .seed(self.stream_seed(POLICY_ITERATION_STREAM))
                    .plan(cfg.max_sweeps)
                    .build(env)
            })
            .transpose()
    }

    pub fn q_learning_agent(&self, env: &Environment) -> Result<Option<Agent<QLearning>>> {
        self.agents
            .q_learning
            .as_ref()
            .map(|cfg| {
                QLearningBuilder::new()
                    .discount(cfg.discount)
                    .p_obey(cfg.p_obey)
                    .learning_rate(cfg.learning_rate)
                    .start(self.world.start)
                    .seed(self.stream_seed(Q_LEARNING_STREAM))
                    .build(env)
            })
            .transpose()
    }
}
