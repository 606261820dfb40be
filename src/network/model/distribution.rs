use super::assignment::Assignment;
use super::generator::{cumulative, discrete_index};
use super::validate_features;
use super::validate_row;
use crate::network::common::errors::{InferenceError, Result};
use crate::network::common::interface::RandomVariable;

/// Unconditional variable: a single probability vector over its own features.
#[derive(Debug, Clone)]
pub struct DiscreteDistribution {
    name: String,
    features: Vec<String>,
    probabilities: Vec<f64>,
    cumulative: Vec<f64>,
}

impl DiscreteDistribution {
    pub fn new(
        name: impl Into<String>,
        features: Vec<String>,
        probabilities: Vec<f64>,
    ) -> Result<Self> {
        let name = name.into();
        validate_features(&name, &features)?;
        if probabilities.len() != features.len() {
            return Err(InferenceError::configuration(format!(
                "{}: {} probabilities for {} features",
                name,
                probabilities.len(),
                features.len()
            )));
        }
        validate_row(&name, &probabilities)?;
        let cumulative = cumulative(&probabilities);
        Ok(DiscreteDistribution {
            name,
            features,
            probabilities,
            cumulative,
        })
    }
}

impl RandomVariable for DiscreteDistribution {
    fn name(&self) -> &str {
        &self.name
    }

    fn features(&self) -> &[String] {
        &self.features
    }

    fn conditions(&self) -> &[String] {
        &[]
    }

    fn sample(&self, _partial: &Assignment, draw: f64) -> Result<&str> {
        let idx = discrete_index(&self.cumulative, draw)?;
        Ok(&self.features[idx])
    }

    fn probability_of(&self, _assignment: &Assignment, value: &str) -> Result<f64> {
        let idx = self
            .feature_index(value)
            .ok_or_else(|| InferenceError::UnknownFeature {
                variable: self.name.clone(),
                feature: value.to_string(),
            })?;
        Ok(self.probabilities[idx])
    }
}
