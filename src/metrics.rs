use serde::{Serialize, Deserialize};

use crate::agent::EpisodeRecord;

/// Aggregate view of an episode history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub episodes: usize,
    pub mean_score: f64,
    pub mean_steps: f64,
    pub best_score: f64,
    pub worst_score: f64,
}

impl HistorySummary {
    /// `None` for an empty history
    pub fn from_records(records: &[EpisodeRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let n = records.len() as f64;
        let mean_score = records.iter().map(|r| r.score).sum::<f64>() / n;
        let mean_steps = records.iter().map(|r| r.steps as f64).sum::<f64>() / n;
        let best_score = records.iter().map(|r| r.score).fold(f64::NEG_INFINITY, f64::max);
        let worst_score = records.iter().map(|r| r.score).fold(f64::INFINITY, f64::min);

        Some(HistorySummary {
            episodes: records.len(),
            mean_score,
            mean_steps,
            best_score,
            worst_score,
        })
    }
}

/// Trailing moving average; the first `window - 1` entries average what is available
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }

    let mut averages = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        averages.push(sum / (i + 1).min(window) as f64);
    }
    averages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_history() {
        let records = vec![
            EpisodeRecord { score: -4.0, steps: 10 },
            EpisodeRecord { score: 2.0, steps: 6 },
            EpisodeRecord { score: 5.0, steps: 2 },
        ];
        let summary = HistorySummary::from_records(&records).unwrap();
        assert_eq!(summary.episodes, 3);
        assert!((summary.mean_score - 1.0).abs() < 1e-12);
        assert!((summary.mean_steps - 6.0).abs() < 1e-12);
        assert_eq!(summary.best_score, 5.0);
        assert_eq!(summary.worst_score, -4.0);

        assert!(HistorySummary::from_records(&[]).is_none());
    }

    #[test]
    fn test_moving_average() {
        let averages = moving_average(&[1.0, 3.0, 5.0, 7.0], 2);
        assert_eq!(averages, vec![1.0, 2.0, 4.0, 6.0]);
        assert!(moving_average(&[1.0], 0).is_empty());
    }
}
