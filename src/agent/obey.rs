use ndarray::{Array2, ArrayView1};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{Result, GridError};

/// Actuator noise model.
///
/// Row `a` is the distribution of the action actually issued when `a` is
/// intended: `p_obey` on `a` itself and `(1 - p_obey) / (n - 1)` on each of
/// the other actions. Serialized as its parameters, the rows are rebuilt
/// on load.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "ObeyParams", into = "ObeyParams")]
pub struct ObeyDistribution {
    p_obey: f64,
    matrix: Array2<f64>,
    samplers: Vec<WeightedIndex<f64>>,
}

#[derive(Clone, Serialize, Deserialize)]
struct ObeyParams {
    p_obey: f64,
    n_actions: usize,
}

impl TryFrom<ObeyParams> for ObeyDistribution {
    type Error = GridError;

    fn try_from(params: ObeyParams) -> Result<Self> {
        ObeyDistribution::new(params.p_obey, params.n_actions)
    }
}

impl From<ObeyDistribution> for ObeyParams {
    fn from(dist: ObeyDistribution) -> Self {
        ObeyParams {
            p_obey: dist.p_obey,
            n_actions: dist.n_actions(),
        }
    }
}

impl ObeyDistribution {
    pub fn new(p_obey: f64, n_actions: usize) -> Result<Self> {
        super::check_unit_interval("p_obey", p_obey)?;
        if n_actions < 2 {
            return Err(GridError::invalid_parameter(
                "n_actions".to_string(),
                format!("need at least 2 actions, got {}", n_actions),
            ));
        }

        let p_disobey = (1.0 - p_obey) / (n_actions - 1) as f64;
        let matrix = Array2::from_shape_fn((n_actions, n_actions), |(intended, issued)| {
            if intended == issued {
                p_obey
            } else {
                p_disobey
            }
        });

        let samplers = matrix
            .outer_iter()
            .map(|row| {
                WeightedIndex::<f64>::new(row.iter()).map_err(|e| {
                    GridError::invalid_parameter("p_obey".to_string(), e.to_string())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ObeyDistribution { p_obey, matrix, samplers })
    }

    pub fn p_obey(&self) -> f64 {
        self.p_obey
    }

    pub fn n_actions(&self) -> usize {
        self.matrix.nrows()
    }

    /// Distribution over issued actions when `intended` is chosen
    pub fn row(&self, intended: usize) -> ArrayView1<'_, f64> {
        self.matrix.row(intended)
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Draw the issued action index for an intended one.
    /// Panics when `intended` is not an action index.
    pub fn sample<R: Rng + ?Sized>(&self, intended: usize, rng: &mut R) -> usize {
        self.samplers[intended].sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rows_are_distributions() {
        let dist = ObeyDistribution::new(0.7, 4).unwrap();
        for a in 0..4 {
            let row = dist.row(a);
            assert!((row.sum() - 1.0).abs() < 1e-12);
            assert!((row[a] - 0.7).abs() < 1e-12);
            for b in (0..4).filter(|&b| b != a) {
                assert!((row[b] - 0.1).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_full_obedience_is_deterministic() {
        let dist = ObeyDistribution::new(1.0, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for intended in 0..4 {
            for _ in 0..200 {
                assert_eq!(dist.sample(intended, &mut rng), intended);
            }
        }
    }

    #[test]
    fn test_zero_obedience_never_issues_intended() {
        let dist = ObeyDistribution::new(0.0, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            assert_ne!(dist.sample(2, &mut rng), 2);
        }
    }

    #[test]
    fn test_sampling_follows_row_weights() {
        let dist = ObeyDistribution::new(0.7, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut counts = [0usize; 4];
        let draws = 20_000;
        for _ in 0..draws {
            counts[dist.sample(1, &mut rng)] += 1;
        }
        for (issued, &count) in counts.iter().enumerate() {
            let freq = count as f64 / draws as f64;
            assert!((freq - dist.row(1)[issued]).abs() < 0.02, "action {}: {}", issued, freq);
        }
    }

    #[test]
    fn test_samplers_are_rebuilt_after_deserialization() {
        let dist = ObeyDistribution::new(0.6, 4).unwrap();
        let bytes = bincode::serialize(&dist).unwrap();
        let restored: ObeyDistribution = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored.p_obey(), 0.6);
        assert_eq!(restored.matrix(), dist.matrix());

        let mut a = StdRng::seed_from_u64(8);
        let mut b = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            assert_eq!(dist.sample(3, &mut a), restored.sample(3, &mut b));
        }

        let corrupt = bincode::serialize(&(1.5f64, 4usize)).unwrap();
        assert!(bincode::deserialize::<ObeyDistribution>(&corrupt).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        assert!(ObeyDistribution::new(1.5, 4).is_err());
        assert!(ObeyDistribution::new(-0.1, 4).is_err());
        assert!(ObeyDistribution::new(f64::NAN, 4).is_err());
        assert!(ObeyDistribution::new(0.5, 1).is_err());
    }
}
