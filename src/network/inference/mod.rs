pub mod bayesian_network;
pub mod estimators;
pub mod query;
pub mod samples;
pub mod worker;

// Re-export the BayesianNetwork for easy access
pub use bayesian_network::{BayesianNetwork, NetworkPhase};
pub use estimators::Estimator;
pub use query::Query;
pub use samples::SampleStore;
