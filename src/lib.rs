#[macro_use]
pub mod network;
pub mod graph;

pub use graph::DirectedGraph;
pub use network::BayesianNetwork;
