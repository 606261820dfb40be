//! Error type shared by the inference engine.

use crate::graph::GraphError;
use thiserror::Error;

/// Canonical error for model setup, sampling and queries.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Cycle, duplicate registration, unknown edge endpoint.
    #[error("structural error: {0}")]
    Structural(#[from] GraphError),
    /// Sampling was requested on a network with no variables.
    #[error("structural error: graph has not been initialized")]
    EmptyGraph,
    /// Invalid table layout, bad row sums, unbound conditions, bad sampling parameters.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A condition variable was absent from the partial assignment.
    #[error("missing ancestor: {variable} needs a value for {condition}")]
    MissingAncestor { variable: String, condition: String },
    /// Malformed query.
    #[error("query error: {0}")]
    Query(String),
    /// A feature label outside the variable's alphabet.
    #[error("unknown feature {feature} for variable {variable}")]
    UnknownFeature { variable: String, feature: String },
    /// Counting query whose evidence matched no sample.
    #[error("query error: no sample matches evidence {0}")]
    NoMatchingEvidence(String),
    /// Estimator accepted at the boundary but not implemented.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl InferenceError {
    pub fn configuration(message: impl Into<String>) -> Self {
        InferenceError::Configuration(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        InferenceError::Query(message.into())
    }

    /// True for failures caused by the query itself rather than the network.
    /// A batch run records these per query and stops on anything else.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            InferenceError::Query(_)
                | InferenceError::UnknownFeature { .. }
                | InferenceError::NoMatchingEvidence(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, InferenceError>;
