//! Episode loop tying an [`Environment`] to an [`Agent`].

use crate::agent::{Agent, EpisodeRecord, Strategy};
use crate::env::Environment;
use crate::error::Result;
use crate::metrics::HistorySummary;

/// Play one episode from the agent's start cell until the world or the step
/// budget ends it. The agent is reset afterwards, archiving the episode.
pub fn run_episode<S: Strategy>(env: &mut Environment, agent: &mut Agent<S>) -> Result<EpisodeRecord> {
    env.reset();

    loop {
        let state = agent.state();
        let action = agent.act(state);
        let step = env.step(state, action)?;
        agent.update(action, step.reward, step.next_state, step.is_trap);

        if step.is_trap {
            tracing::trace!(agent = agent.name(), state = step.next_state, "agent fell into a trap");
        }
        if step.terminal {
            if step.timed_out {
                tracing::debug!(agent = agent.name(), steps = env.steps(), "episode timed out");
            }
            break;
        }
    }

    Ok(agent.reset())
}

/// Play `episodes` episodes in a row
pub fn train<S: Strategy>(
    env: &mut Environment,
    agent: &mut Agent<S>,
    episodes: usize,
) -> Result<Vec<EpisodeRecord>> {
    let mut records = Vec::with_capacity(episodes);
    for _ in 0..episodes {
        records.push(run_episode(env, agent)?);
    }

    if let Some(summary) = HistorySummary::from_records(&records) {
        tracing::info!(
            agent = agent.name(),
            episodes = summary.episodes,
            mean_score = summary.mean_score,
            mean_steps = summary.mean_steps,
            best_score = summary.best_score,
            "training finished"
        );
    }

    Ok(records)
}
