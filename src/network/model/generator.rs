use crate::network::common::errors::{InferenceError, Result};
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Slack allowed between a draw and the final cumulative probability.
pub const CUMULATIVE_TOLERANCE: f64 = 1e-6;

/// Uniform draws and cumulative-probability search.
///
/// Each sampling worker owns its own generator; streams are never shared.
#[derive(Debug, Clone)]
pub struct ProbabilityGenerator {
    rng: StdRng,
}

impl ProbabilityGenerator {
    /// Generator with a reproducible stream
    pub fn from_seed(seed: u64) -> Self {
        ProbabilityGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from operating system entropy
    pub fn from_entropy() -> Self {
        ProbabilityGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, from entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Value in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Seed for a derived, independent stream
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen::<u64>()
    }
}

/// Build the running sum of `probabilities`.
pub fn cumulative(probabilities: &[f64]) -> Vec<f64> {
    probabilities
        .iter()
        .scan(0.0, |acc, p| {
            *acc += p;
            Some(*acc)
        })
        .collect()
}

/// Smallest index whose cumulative probability is strictly greater than `draw`.
///
/// A draw at or past the final cumulative value but within [`CUMULATIVE_TOLERANCE`]
/// selects the last index carrying non-zero mass. Anything beyond that means the
/// distribution does not sum to one.
pub fn discrete_index(cumulative: &[f64], draw: f64) -> Result<usize> {
    if let Some(idx) = cumulative.iter().position(|c| *c > draw) {
        return Ok(idx);
    }
    let last = cumulative
        .last()
        .copied()
        .ok_or_else(|| InferenceError::configuration("empty cumulative distribution"))?;
    if draw < last + CUMULATIVE_TOLERANCE {
        trace!("discrete_index - draw {} within tolerance of {}", draw, last);
        let mut previous = 0.0;
        let mut chosen = None;
        for (idx, c) in cumulative.iter().enumerate() {
            if *c > previous {
                chosen = Some(idx);
            }
            previous = *c;
        }
        return chosen.ok_or_else(|| InferenceError::configuration("distribution has no mass"));
    }
    Err(InferenceError::configuration(format!(
        "draw {} exceeds cumulative total {}",
        draw, last
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_range() {
        let mut generator = ProbabilityGenerator::from_seed(7);
        for _ in 0..10_000 {
            let u = generator.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_seeded_streams_repeat() {
        let mut a = ProbabilityGenerator::from_seed(42);
        let mut b = ProbabilityGenerator::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.uniform(), b.uniform());
        }
        let mut c = ProbabilityGenerator::from_seed(43);
        let first: Vec<f64> = (0..5).map(|_| a.uniform()).collect();
        let other: Vec<f64> = (0..5).map(|_| c.uniform()).collect();
        assert_ne!(first, other);
    }

    #[test]
    fn test_cumulative() {
        let c = cumulative(&[0.3, 0.4, 0.3]);
        assert_eq!(c.len(), 3);
        assert!((c[0] - 0.3).abs() < 1e-12);
        assert!((c[1] - 0.7).abs() < 1e-12);
        assert!((c[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_discrete_index_strictly_greater() {
        let c = [0.25, 0.5, 1.0];
        assert_eq!(discrete_index(&c, 0.0).unwrap(), 0);
        assert_eq!(discrete_index(&c, 0.1).unwrap(), 0);
        // Equality moves on to the next index
        assert_eq!(discrete_index(&c, 0.25).unwrap(), 1);
        assert_eq!(discrete_index(&c, 0.5).unwrap(), 2);
        assert_eq!(discrete_index(&c, 0.999).unwrap(), 2);
    }

    #[test]
    fn test_zero_probability_never_selected() {
        // Middle feature has no mass
        let c = cumulative(&[0.5, 0.0, 0.5]);
        assert_eq!(discrete_index(&c, 0.5).unwrap(), 2);
        let c = cumulative(&[0.0, 1.0]);
        assert_eq!(discrete_index(&c, 0.0).unwrap(), 1);
    }

    #[test]
    fn test_boundary_tolerance() {
        // Sums to slightly under one
        let c = [0.5, 0.9999995, 0.9999995];
        assert_eq!(discrete_index(&c, 0.9999998).unwrap(), 1);
    }

    #[test]
    fn test_malformed_distribution() {
        let c = [0.2, 0.5];
        assert!(matches!(
            discrete_index(&c, 0.7),
            Err(InferenceError::Configuration(_))
        ));
        assert!(discrete_index(&[], 0.1).is_err());
    }
}
