use super::samples::SampleStore;
use super::worker::Registry;
use crate::network::common::errors::{InferenceError, Result};
use crate::network::common::interface::RandomVariable;
use crate::network::model::assignment::Assignment;
use log::trace;
use std::fmt;
use std::str::FromStr;

/// Query estimator selection.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Estimator {
    /// Direct counting over forward samples
    Forward,
    /// Likelihood-weighted importance sampling
    Likelihood,
}

impl FromStr for Estimator {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "forward" => Ok(Estimator::Forward),
            "likelihood" => Ok(Estimator::Likelihood),
            "gibbs" => Err(InferenceError::UnsupportedAlgorithm(
                "gibbs sampling is not implemented".to_string(),
            )),
            other => Err(InferenceError::UnsupportedAlgorithm(format!(
                "unknown algorithm {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimator::Forward => write!(f, "forward"),
            Estimator::Likelihood => write!(f, "likelihood"),
        }
    }
}

/// Fraction of the store matching `target`, restricted to samples matching
/// `evidence` when given.
pub fn count_estimate(
    store: &SampleStore,
    target: &Assignment,
    evidence: Option<&Assignment>,
) -> Result<f64> {
    let (matched, total) = match evidence {
        None => (store.count_matching(target), store.len()),
        Some(evidence) => store
            .matching(evidence)
            .fold((0usize, 0usize), |(matched, total), sample| {
                (matched + usize::from(sample.matches(target)), total + 1)
            }),
    };
    trace!("count_estimate - {} of {}", matched, total);
    if total == 0 {
        return Err(match evidence {
            Some(evidence) => InferenceError::NoMatchingEvidence(evidence.to_string()),
            None => InferenceError::query("sample store is empty"),
        });
    }
    Ok(matched as f64 / total as f64)
}

/// Likelihood-weighted estimate.
///
/// Every sample is weighted by the product, over the evidence variables, of the
/// probability each would assign to its evidence value given the sample's values
/// for its conditions. Without evidence this is [`count_estimate`]. A zero total
/// weight yields exactly `0.0`.
pub fn likelihood_estimate(
    store: &SampleStore,
    variables: &Registry,
    target: &Assignment,
    evidence: Option<&Assignment>,
) -> Result<f64> {
    let Some(evidence) = evidence else {
        return count_estimate(store, target, None);
    };

    let evidence_nodes = evidence
        .iter()
        .map(|(name, value)| {
            variables
                .get(name)
                .map(|node| (node, value))
                .ok_or_else(|| InferenceError::query(format!("unknown variable {}", name)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut total_weight = 0.0;
    let mut target_weight = 0.0;
    for sample in store.iter() {
        let mut weight = 1.0;
        for (node, value) in &evidence_nodes {
            weight *= node.probability_of(sample, value)?;
        }
        total_weight += weight;
        if sample.matches(target) {
            target_weight += weight;
        }
    }
    trace!(
        "likelihood_estimate - target weight {} of {}",
        target_weight, total_weight
    );
    if total_weight == 0.0 {
        return Ok(0.0);
    }
    Ok(target_weight / total_weight)
}
