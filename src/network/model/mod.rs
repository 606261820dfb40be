pub mod assignment;
pub mod conditional;
pub mod definition;
pub mod distribution;
pub mod generator;
pub mod node;

use crate::network::common::errors::{InferenceError, Result};

pub use assignment::Assignment;
pub use conditional::ConditionalProbability;
pub use definition::VariableDefinition;
pub use distribution::DiscreteDistribution;
pub use generator::ProbabilityGenerator;
pub use node::Node;

/// Allowed deviation of a probability row sum from one
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// An alphabet needs at least two distinct labels
fn validate_features(name: &str, features: &[String]) -> Result<()> {
    if features.len() < 2 {
        return Err(InferenceError::configuration(format!(
            "{}: needs at least two features, got {}",
            name,
            features.len()
        )));
    }
    for (idx, feature) in features.iter().enumerate() {
        if features[..idx].contains(feature) {
            return Err(InferenceError::configuration(format!(
                "{}: feature {} declared twice",
                name, feature
            )));
        }
    }
    Ok(())
}

/// Every entry is a probability and the row sums to one
fn validate_row(name: &str, row: &[f64]) -> Result<()> {
    if let Some(p) = row.iter().find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0) {
        return Err(InferenceError::configuration(format!(
            "{}: {} is not a probability",
            name, p
        )));
    }
    let sum: f64 = row.iter().sum();
    if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
        return Err(InferenceError::configuration(format!(
            "{}: row {:?} sums to {}",
            name, row, sum
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_row() {
        assert!(validate_row("X", &[0.3, 0.4, 0.3]).is_ok());
        assert!(validate_row("X", &[0.5, 0.5000001]).is_ok());
        assert!(validate_row("X", &[0.5, 0.6]).is_err());
        assert!(validate_row("X", &[1.5, -0.5]).is_err());
        assert!(validate_row("X", &[f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn test_validate_features() {
        let ok = vec!["a".to_string(), "b".to_string()];
        assert!(validate_features("X", &ok).is_ok());
        let repeated = vec!["a".to_string(), "a".to_string()];
        assert!(validate_features("X", &repeated).is_err());
    }
}
