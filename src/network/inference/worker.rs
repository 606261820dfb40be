//! Sampling batches handed to the worker pool.
//!
//! A task carries everything its worker needs by value: the topological order, a
//! shared read-only registry snapshot, its batch size and the seed of its private
//! generator stream. Workers never see the network itself.

use crate::network::common::errors::{InferenceError, Result};
use crate::network::common::interface::RandomVariable;
use crate::network::model::assignment::Assignment;
use crate::network::model::generator::ProbabilityGenerator;
use crate::network::model::node::Node;
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;

pub type Registry = HashMap<String, Node>;

#[derive(Debug, Clone)]
pub struct SamplingTask {
    pub order: Arc<Vec<String>>,
    pub variables: Arc<Registry>,
    pub batch_size: usize,
    pub seed: u64,
}

impl SamplingTask {
    /// Produce `batch_size` full assignments by ancestral sampling.
    pub fn run(self) -> Result<Vec<Assignment>> {
        trace!("SamplingTask::run - batch of {} with seed {}", self.batch_size, self.seed);
        let mut generator = ProbabilityGenerator::from_seed(self.seed);
        let mut samples = Vec::with_capacity(self.batch_size);
        for _ in 0..self.batch_size {
            samples.push(ancestral_sample(&self.order, &self.variables, &mut generator)?);
        }
        Ok(samples)
    }
}

/// One joint draw: each variable in `order` is sampled given the partial
/// assignment built so far.
pub fn ancestral_sample(
    order: &[String],
    variables: &Registry,
    generator: &mut ProbabilityGenerator,
) -> Result<Assignment> {
    let mut state = Assignment::with_capacity(order.len());
    for name in order {
        let node = variables.get(name).ok_or_else(|| {
            InferenceError::configuration(format!("{} is ordered but not registered", name))
        })?;
        let value = node.sample(&state, generator.uniform())?;
        state.insert(name.as_str(), value);
    }
    Ok(state)
}

/// Split `count` into `parallelism` batches of `ceil(count / parallelism)` each.
///
/// The total is `parallelism * ceil(count / parallelism)`, at most
/// `parallelism - 1` above `count`.
pub fn batch_sizes(count: usize, parallelism: usize) -> Result<Vec<usize>> {
    if count == 0 {
        return Err(InferenceError::configuration("sample count must be at least 1"));
    }
    if parallelism == 0 {
        return Err(InferenceError::configuration("parallelism must be at least 1"));
    }
    Ok(vec![count.div_ceil(parallelism); parallelism])
}
