pub mod common;
pub mod inference;
pub mod model;
pub mod scenarios;

// Re-export color printing macros
pub use crate::print_green;
pub use crate::print_red;
pub use crate::print_yellow;

/// Exports the main types for easy access
pub use common::{InferenceError, RandomVariable, SamplingConfig};
pub use inference::{BayesianNetwork, Estimator, NetworkPhase, Query, SampleStore};
pub use model::{Assignment, ConditionalProbability, DiscreteDistribution, Node, VariableDefinition};
