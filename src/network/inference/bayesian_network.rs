use super::estimators::{count_estimate, likelihood_estimate, Estimator};
use super::query::Query;
use super::samples::SampleStore;
use super::worker::{batch_sizes, Registry, SamplingTask};
use crate::graph::{DirectedGraph, Direction};
use crate::network::common::errors::{InferenceError, Result};
use crate::network::common::interface::RandomVariable;
use crate::network::common::logging::timed;
use crate::network::common::setup::SamplingConfig;
use crate::network::model::definition::VariableDefinition;
use crate::network::model::generator::ProbabilityGenerator;
use crate::network::model::node::Node;
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Lifecycle of the derived state held by a [`BayesianNetwork`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NetworkPhase {
    /// No variables registered
    Empty,
    /// Variables and edges registered, nothing derived
    Structured,
    /// Topological order cached
    Ordered,
    /// Sample store populated
    Sampled,
}

/// Discrete Bayesian network answering queries by Monte Carlo sampling.
///
/// Structure is mutated through `&mut self`, as are queries (they may generate
/// samples lazily), so the borrow checker keeps mutation from interleaving with
/// generation or query evaluation. Any mutation drops the cached order and samples.
pub struct BayesianNetwork {
    graph: DirectedGraph<String>,
    variables: Arc<Registry>,
    config: SamplingConfig,
    seeder: ProbabilityGenerator,
    topological_order: Option<Arc<Vec<String>>>,
    samples: Option<SampleStore>,
}

impl Default for BayesianNetwork {
    fn default() -> Self {
        Self::new(SamplingConfig::default())
    }
}

impl BayesianNetwork {
    pub fn new(config: SamplingConfig) -> Self {
        let seeder = ProbabilityGenerator::new(config.seed);
        BayesianNetwork {
            graph: DirectedGraph::new(),
            variables: Arc::new(HashMap::new()),
            config,
            seeder,
            topological_order: None,
            samples: None,
        }
    }

    /// Build a network from loader descriptors.
    ///
    /// Conditional variables are bound with the alphabets of their named conditions,
    /// every variable is registered in the given order, then one edge is added per
    /// condition.
    pub fn from_definitions(definitions: &[VariableDefinition], config: SamplingConfig) -> Result<Self> {
        let alphabets: HashMap<String, Vec<String>> = definitions
            .iter()
            .map(|d| (d.name.clone(), d.features.clone()))
            .collect();

        let mut nodes = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let mut node = definition.to_node()?;
            if definition.is_conditional() {
                let sizes = definition
                    .conditions
                    .iter()
                    .map(|c| {
                        alphabets.get(c).map(Vec::len).ok_or_else(|| {
                            InferenceError::configuration(format!(
                                "{}: unknown condition {}",
                                definition.name, c
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                definition.check_shape(&sizes)?;
                node.bind_conditions(&alphabets)?;
            }
            nodes.push(node);
        }

        let mut network = BayesianNetwork::new(config);
        for node in nodes {
            network.add_variable(node)?;
        }
        for definition in definitions {
            for condition in &definition.conditions {
                network.add_edge(condition, &definition.name)?;
            }
        }
        info!(
            "Built network with {} variables from definitions",
            network.variables.len()
        );
        Ok(network)
    }

    /// Register a variable. Conditional variables must already be bound.
    pub fn add_variable(&mut self, node: impl Into<Node>) -> Result<()> {
        let node = node.into();
        if !node.is_bound() {
            return Err(InferenceError::configuration(format!(
                "{}: condition alphabets must be bound before registration",
                node.name()
            )));
        }
        let name = node.name().to_string();
        self.graph.add_node(name.clone())?;
        trace!("add_variable - {}", name);
        Arc::make_mut(&mut self.variables).insert(name, node);
        self.invalidate();
        Ok(())
    }

    /// Add the edge `from -> to`, meaning `from` is a direct condition of `to`.
    ///
    /// When `to` is conditioned on `from`, the alphabet `to` was bound with must
    /// be exactly the features of `from`.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<()> {
        if let (Some(parent), Some(child)) = (self.variables.get(from), self.variables.get(to)) {
            if !child.binds_alphabet(from, parent.features()) {
                return Err(InferenceError::configuration(format!(
                    "{}: alphabet bound for {} does not match its features {:?}",
                    to,
                    from,
                    parent.features()
                )));
            }
        }
        self.graph.add_edge(&from.to_string(), &to.to_string())?;
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        if self.topological_order.is_some() || self.samples.is_some() {
            debug!("Structure changed, dropping cached order and samples");
        }
        self.topological_order = None;
        self.samples = None;
    }

    pub fn phase(&self) -> NetworkPhase {
        if self.samples.is_some() {
            NetworkPhase::Sampled
        } else if self.topological_order.is_some() {
            NetworkPhase::Ordered
        } else if self.graph.is_empty() {
            NetworkPhase::Empty
        } else {
            NetworkPhase::Structured
        }
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    pub fn variable(&self, name: &str) -> Option<&Node> {
        self.variables.get(name)
    }

    pub fn variable_names(&self) -> &[String] {
        self.graph.vertices()
    }

    pub fn graph(&self) -> &DirectedGraph<String> {
        &self.graph
    }

    pub fn samples(&self) -> Option<&SampleStore> {
        self.samples.as_ref()
    }

    /// Cached topological order, computed on first use.
    ///
    /// Every condition of a variable must have an edge into it.
    pub fn topological_order(&mut self) -> Result<Arc<Vec<String>>> {
        if let Some(order) = &self.topological_order {
            return Ok(Arc::clone(order));
        }
        if self.graph.is_empty() {
            return Err(InferenceError::EmptyGraph);
        }
        let order = Arc::new(self.graph.topological_order()?);
        for name in order.iter() {
            let parents = self.graph.neighbors(name, Direction::Incoming)?;
            let node = self.variables.get(name);
            if let Some(missing) = node
                .into_iter()
                .flat_map(|n| n.conditions())
                .find(|c| !parents.contains(c))
            {
                return Err(InferenceError::MissingAncestor {
                    variable: name.clone(),
                    condition: missing.clone(),
                });
            }
        }
        debug!("Topological order: {:?}", order);
        self.topological_order = Some(Arc::clone(&order));
        Ok(order)
    }

    /// Generate a fresh sample store of `parallelism * ceil(count / parallelism)`
    /// samples, replacing any previous one. Returns the store size.
    ///
    /// `parallelism` sets the number of batches, each with its own generator stream
    /// seeded from the network's seeder. Batches share rayon's global pool, so the
    /// thread count stays bounded by the machine whatever `parallelism` is.
    pub fn generate_samples(&mut self, count: usize, parallelism: usize) -> Result<usize> {
        let sizes = batch_sizes(count, parallelism)?;
        let order = self.topological_order()?;
        let tasks: Vec<SamplingTask> = sizes
            .into_iter()
            .map(|batch_size| SamplingTask {
                order: Arc::clone(&order),
                variables: Arc::clone(&self.variables),
                batch_size,
                seed: self.seeder.next_seed(),
            })
            .collect();

        info!(
            "Generating {} samples in {} batches",
            tasks.iter().map(|t| t.batch_size).sum::<usize>(),
            tasks.len()
        );
        let batches = timed("generate_samples", || {
            tasks
                .into_par_iter()
                .map(SamplingTask::run)
                .collect::<Result<Vec<_>>>()
        })?;

        let store = SampleStore::from_batches(batches);
        let size = store.len();
        self.samples = Some(store);
        Ok(size)
    }

    /// Generate with the configured defaults unless a store already exists.
    fn ensure_samples(&mut self) -> Result<&SampleStore> {
        if self.samples.as_ref().is_none_or(SampleStore::is_empty) {
            let (count, parallelism) = (self.config.samples, self.config.parallelism);
            self.generate_samples(count, parallelism)?;
        }
        self.samples
            .as_ref()
            .ok_or_else(|| InferenceError::configuration("sample store was not generated"))
    }

    /// `P(target | evidence)` by counting samples.
    pub fn forward_query(&mut self, query: &Query) -> Result<f64> {
        query.validate(&self.variables)?;
        let store = self.ensure_samples()?;
        count_estimate(store, &query.target, query.evidence.as_ref())
    }

    /// `P(target | evidence)` by likelihood weighting.
    pub fn likelihood_query(&mut self, query: &Query) -> Result<f64> {
        query.validate(&self.variables)?;
        let variables = Arc::clone(&self.variables);
        let store = self.ensure_samples()?;
        likelihood_estimate(store, &variables, &query.target, query.evidence.as_ref())
    }

    pub fn query(&mut self, estimator: Estimator, query: &Query) -> Result<f64> {
        match estimator {
            Estimator::Forward => self.forward_query(query),
            Estimator::Likelihood => self.likelihood_query(query),
        }
    }

    /// Evaluate every query in order.
    ///
    /// Failures caused by a query itself (see [`InferenceError::is_query_error`])
    /// are kept in that query's slot and the remaining queries still run. Any
    /// other failure, generation included, aborts the batch.
    pub fn batch_query(
        &mut self,
        estimator: Estimator,
        queries: &[Query],
    ) -> Result<Vec<Result<f64>>> {
        self.ensure_samples()?;
        let mut results = Vec::with_capacity(queries.len());
        for (idx, query) in queries.iter().enumerate() {
            match self.query(estimator, query) {
                Err(e) if !e.is_query_error() => return Err(e),
                Err(e) => {
                    warn!("Query {} failed: {}", idx, e);
                    results.push(Err(e));
                }
                Ok(p) => results.push(Ok(p)),
            }
        }
        info!(
            "Answered {} of {} queries with the {} estimator",
            results.iter().filter(|r| r.is_ok()).count(),
            results.len(),
            estimator
        );
        Ok(results)
    }
}
