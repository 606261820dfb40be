use super::worker::Registry;
use crate::network::common::errors::{InferenceError, Result};
use crate::network::common::interface::RandomVariable;
use crate::network::model::assignment::Assignment;
use serde::{Deserialize, Deserializer, Serialize};

/// `P(target | evidence)` request. Evidence is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub target: Assignment,
    #[serde(default, deserialize_with = "non_empty_evidence")]
    pub evidence: Option<Assignment>,
}

/// An empty evidence object means no evidence
fn non_empty_evidence<'de, D>(deserializer: D) -> std::result::Result<Option<Assignment>, D::Error>
where
    D: Deserializer<'de>,
{
    let evidence: Option<Assignment> = Option::deserialize(deserializer)?;
    Ok(evidence.filter(|e| !e.is_empty()))
}

impl Query {
    pub fn new(target: Assignment, evidence: Option<Assignment>) -> Self {
        Query {
            target,
            evidence: evidence.filter(|e| !e.is_empty()),
        }
    }

    /// Build from name/value pairs
    pub fn from_pairs(target: &[(&str, &str)], evidence: &[(&str, &str)]) -> Self {
        Query::new(
            target.iter().copied().collect(),
            Some(evidence.iter().copied().collect()),
        )
    }

    /// Check the query against the registered variables.
    ///
    /// The target must be non-empty, every name must be registered with a value from
    /// its alphabet, and no name may appear in both target and evidence.
    pub fn validate(&self, variables: &Registry) -> Result<()> {
        if self.target.is_empty() {
            return Err(InferenceError::query("query has no target"));
        }
        if let Some(evidence) = &self.evidence {
            if let Some(name) = self.target.shared_name(evidence) {
                return Err(InferenceError::query(format!(
                    "name {} duplicated in target and evidence",
                    name
                )));
            }
            check_known(evidence, variables)?;
        }
        check_known(&self.target, variables)
    }
}

fn check_known(assignment: &Assignment, variables: &Registry) -> Result<()> {
    for (name, value) in assignment.iter() {
        let node = variables
            .get(name)
            .ok_or_else(|| InferenceError::query(format!("unknown variable {}", name)))?;
        if node.feature_index(value).is_none() {
            return Err(InferenceError::UnknownFeature {
                variable: name.to_string(),
                feature: value.to_string(),
            });
        }
    }
    Ok(())
}
