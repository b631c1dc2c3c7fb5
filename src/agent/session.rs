use serde::{Serialize, Deserialize};

use crate::types::{Action, Coord};

/// Score and length of a completed episode
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub score: f64,
    pub steps: usize,
}

/// Per-agent episode bookkeeping shared by every strategy
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    size: usize,
    start: Coord,
    position: Coord,
    score: f64,
    steps: usize,
    last_action: Option<Action>,
    last_reward: Option<f64>,
    on_trap: bool,
    history: Vec<EpisodeRecord>,
}

impl Session {
    pub fn new(start: Coord, size: usize) -> Self {
        Session {
            size,
            start,
            position: start,
            score: 0.0,
            steps: 0,
            last_action: None,
            last_reward: None,
            on_trap: false,
            history: Vec::new(),
        }
    }

    /// Advance the bookkeeping by one observed transition
    pub fn record(&mut self, action: Action, reward: f64, next_state: usize, is_trap: bool) {
        assert!(
            next_state < self.size * self.size,
            "state {} outside a {}x{} grid",
            next_state,
            self.size,
            self.size
        );
        self.position = Coord::from_state(next_state, self.size);
        self.score += reward;
        self.steps += 1;
        self.last_action = Some(action);
        self.last_reward = Some(reward);
        self.on_trap = is_trap;
    }

    /// Archive the running episode and go back to the start cell
    pub fn reset(&mut self) -> EpisodeRecord {
        let record = EpisodeRecord {
            score: self.score,
            steps: self.steps,
        };
        self.history.push(record);

        self.position = self.start;
        self.score = 0.0;
        self.steps = 0;
        self.last_action = None;
        self.last_reward = None;
        self.on_trap = false;

        record
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn state(&self) -> usize {
        self.position.to_state(self.size)
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    pub fn last_reward(&self) -> Option<f64> {
        self.last_reward
    }

    pub fn on_trap(&self) -> bool {
        self.on_trap
    }

    pub fn history(&self) -> &[EpisodeRecord] {
        &self.history
    }

    /// Completed episodes
    pub fn episodes(&self) -> usize {
        self.history.len()
    }
}
