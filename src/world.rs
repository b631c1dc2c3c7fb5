//! # World
//!
//! The grid itself: cell layout, rewards and the deterministic transition
//! function. A [`World`] is immutable once built, the trap layout is drawn
//! a single time at construction.

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::error::{Result, GridError};
use crate::types::{Action, CellKind, Coord};

/// Tolerance on `p_empty + p_trap == 1`
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Trap layout of a grid, tagged by `mode` in serialized form:
/// `{"mode": "fixed", "cells": [...]}` or
/// `{"mode": "random", "p_empty": 0.8, "p_trap": 0.2}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TrapSpec {
    /// Explicit trap cells. Cells coinciding with start or goal are skipped.
    Fixed { cells: Vec<Coord> },
    /// Independent Bernoulli draw per cell
    Random { p_empty: f64, p_trap: f64 },
}

/// Loosely typed trap section as found in a settings file.
///
/// Same layout as [`TrapSpec`], but an unknown `mode` or a missing
/// probability surfaces as [`GridError::InvalidTrapSpec`] instead of a
/// parse error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrapConfig {
    pub mode: String,
    #[serde(default)]
    pub cells: Vec<Coord>,
    #[serde(default)]
    pub p_empty: Option<f64>,
    #[serde(default)]
    pub p_trap: Option<f64>,
}

impl TryFrom<TrapConfig> for TrapSpec {
    type Error = GridError;

    fn try_from(config: TrapConfig) -> Result<Self> {
        match config.mode.as_str() {
            "fixed" => Ok(TrapSpec::Fixed { cells: config.cells }),
            "random" => {
                let p_empty = config.p_empty.ok_or_else(|| {
                    GridError::InvalidTrapSpec("random mode requires 'p_empty'".to_string())
                })?;
                let p_trap = config.p_trap.ok_or_else(|| {
                    GridError::InvalidTrapSpec("random mode requires 'p_trap'".to_string())
                })?;
                Ok(TrapSpec::Random { p_empty, p_trap })
            }
            other => Err(GridError::InvalidTrapSpec(format!(
                "unsupported mode '{}'",
                other
            ))),
        }
    }
}

impl TrapSpec {
    /// Check the trap layout against a `size x size` grid
    pub fn validate(&self, size: usize) -> Result<()> {
        match self {
            TrapSpec::Fixed { cells } => {
                for cell in cells {
                    if !cell.in_bounds(size) {
                        return Err(GridError::InvalidCoordinate { x: cell.x, y: cell.y, size });
                    }
                }
                Ok(())
            }
            TrapSpec::Random { p_empty, p_trap } => {
                for (name, p) in [("p_empty", p_empty), ("p_trap", p_trap)] {
                    if !(0.0..=1.0).contains(p) {
                        return Err(GridError::InvalidTrapSpec(format!(
                            "{} = {} is not a probability",
                            name, p
                        )));
                    }
                }
                if (p_empty + p_trap - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
                    return Err(GridError::InvalidTrapSpec(format!(
                        "p_empty + p_trap must equal 1, got {}",
                        p_empty + p_trap
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Outcome of applying an action to a state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub next_state: usize,
    pub reward: f64,
    pub terminal: bool,
}

/// Square grid with a single start, a single goal and optional traps.
///
/// Only built through [`World::new`], which checks the layout.
#[derive(Clone, Debug, Serialize)]
pub struct World {
    size: usize,
    start: Coord,
    goal: Coord,
    /// Indexed `[[y, x]]`
    grid: Array2<CellKind>,
}

impl World {
    /// Build a grid. `goal` defaults to the bottom-right corner.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        start: Coord,
        goal: Option<Coord>,
        traps: Option<&TrapSpec>,
        rng: &mut R,
    ) -> Result<Self> {
        if size < 2 {
            return Err(GridError::invalid_parameter(
                "size".to_string(),
                format!("grid side must be at least 2, got {}", size),
            ));
        }

        let last = size as i32 - 1;
        let goal = goal.unwrap_or(Coord::new(last, last));

        for coord in [start, goal] {
            if !coord.in_bounds(size) {
                return Err(GridError::InvalidCoordinate { x: coord.x, y: coord.y, size });
            }
        }
        if start == goal {
            return Err(GridError::invalid_parameter(
                "goal".to_string(),
                format!("goal {} coincides with start", goal),
            ));
        }

        let mut grid = Array2::from_elem((size, size), CellKind::Empty);
        grid[[start.y as usize, start.x as usize]] = CellKind::Start;
        grid[[goal.y as usize, goal.x as usize]] = CellKind::Goal;

        let mut world = World { size, start, goal, grid };

        if let Some(spec) = traps {
            spec.validate(size)?;
            world.place_traps(spec, rng)?;
        }

        tracing::debug!(
            size,
            start = %world.start,
            goal = %world.goal,
            traps = world.trap_count(),
            "world generated"
        );

        Ok(world)
    }

    fn place_traps<R: Rng + ?Sized>(&mut self, spec: &TrapSpec, rng: &mut R) -> Result<()> {
        match spec {
            TrapSpec::Fixed { cells } => {
                for cell in cells {
                    let slot = &mut self.grid[[cell.y as usize, cell.x as usize]];
                    if *slot == CellKind::Empty {
                        *slot = CellKind::Trap;
                    }
                }
            }
            TrapSpec::Random { p_trap, .. } => {
                let draw = Bernoulli::new(*p_trap)
                    .map_err(|e| GridError::InvalidTrapSpec(e.to_string()))?;
                // Every cell consumes one draw so the layout only depends on the seed
                for slot in self.grid.iter_mut() {
                    let is_trap = draw.sample(rng);
                    if is_trap && *slot == CellKind::Empty {
                        *slot = CellKind::Trap;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn n_states(&self) -> usize {
        self.size * self.size
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn cell_at(&self, coord: Coord) -> CellKind {
        self.grid[[coord.y as usize, coord.x as usize]]
    }

    pub fn cell_at_state(&self, state: usize) -> Result<CellKind> {
        self.check_state(state)?;
        Ok(self.cell_at(Coord::from_state(state, self.size)))
    }

    pub fn reward(&self, kind: CellKind) -> f64 {
        kind.reward(self.size)
    }

    pub fn trap_count(&self) -> usize {
        self.grid.iter().filter(|&&cell| cell == CellKind::Trap).count()
    }

    pub fn check_state(&self, state: usize) -> Result<()> {
        if state >= self.n_states() {
            return Err(GridError::StateOutOfRange {
                state,
                n_states: self.n_states(),
            });
        }
        Ok(())
    }

    /// Deterministic transition function.
    ///
    /// The goal is absorbing: any action there loops back with reward 0.
    /// Elsewhere the move is clamped to the grid and the reward and terminal
    /// flag come from the landing cell, so bumping into a border costs the
    /// reward of the cell the agent stays on.
    pub fn transition(&self, state: usize, action: Action) -> Result<Transition> {
        self.check_state(state)?;
        Ok(self.transition_from(Coord::from_state(state, self.size), action))
    }

    /// Same rule as [`World::transition`] for a coordinate known to be on the grid
    pub fn transition_from(&self, here: Coord, action: Action) -> Transition {
        if self.cell_at(here) == CellKind::Goal {
            return Transition {
                next_state: here.to_state(self.size),
                reward: 0.0,
                terminal: true,
            };
        }

        let there = here.shifted(action, self.size);
        let kind = self.cell_at(there);
        Transition {
            next_state: there.to_state(self.size),
            reward: self.reward(kind),
            terminal: kind.is_terminal(),
        }
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = format!("   +{}\n", "---+".repeat(self.size));

        write!(f, "   ")?;
        for x in 0..self.size {
            write!(f, " {:^3}", x)?;
        }
        writeln!(f)?;

        for (y, row) in self.grid.outer_iter().enumerate() {
            write!(f, "{}", sep)?;
            write!(f, "{:^3}|", y)?;
            for cell in row.iter() {
                write!(f, " {} |", cell)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", sep)
    }
}
