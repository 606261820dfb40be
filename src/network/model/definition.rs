use super::conditional::ConditionalProbability;
use super::distribution::DiscreteDistribution;
use super::node::Node;
use crate::network::common::errors::{InferenceError, Result};
use serde::{Deserialize, Serialize};

/// Variable descriptor as produced by a model loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDefinition {
    pub name: String,
    /// Ordered feature labels
    pub features: Vec<String>,
    /// Ordered condition names, empty when unconditional
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Flat table, own feature varying fastest
    pub probabilities: Vec<f64>,
    /// Declared dimension layout `[|c_1|, ..., |c_k|, |own|]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<usize>>,
}

impl VariableDefinition {
    pub fn unconditional(name: &str, features: &[&str], probabilities: &[f64]) -> Self {
        VariableDefinition {
            name: name.to_string(),
            features: features.iter().map(|s| s.to_string()).collect(),
            conditions: Vec::new(),
            probabilities: probabilities.to_vec(),
            shape: None,
        }
    }

    pub fn conditional(
        name: &str,
        features: &[&str],
        conditions: &[&str],
        probabilities: &[f64],
    ) -> Self {
        VariableDefinition {
            name: name.to_string(),
            features: features.iter().map(|s| s.to_string()).collect(),
            conditions: conditions.iter().map(|s| s.to_string()).collect(),
            probabilities: probabilities.to_vec(),
            shape: None,
        }
    }

    pub fn is_conditional(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Build the node. Conditional nodes come back unbound.
    pub fn to_node(&self) -> Result<Node> {
        if self.is_conditional() {
            let node = ConditionalProbability::new(
                self.name.clone(),
                self.features.clone(),
                self.conditions.clone(),
                self.probabilities.clone(),
            )?;
            Ok(node.into())
        } else {
            self.check_shape(&[])?;
            let node = DiscreteDistribution::new(
                self.name.clone(),
                self.features.clone(),
                self.probabilities.clone(),
            )?;
            Ok(node.into())
        }
    }

    /// Compare the declared shape against the condition alphabet sizes
    pub fn check_shape(&self, condition_sizes: &[usize]) -> Result<()> {
        let Some(shape) = &self.shape else {
            return Ok(());
        };
        let mut expected: Vec<usize> = condition_sizes.to_vec();
        expected.push(self.features.len());
        // Unconditional tables are also written as [1, n]
        let matches = shape == &expected
            || (condition_sizes.is_empty() && shape.as_slice() == [1, self.features.len()]);
        if !matches {
            return Err(InferenceError::configuration(format!(
                "{}: declared shape {:?}, expected {:?}",
                self.name, shape, expected
            )));
        }
        Ok(())
    }
}
