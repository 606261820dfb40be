pub mod directed;
pub mod models;
pub mod topo;

pub use directed::DirectedGraph;
pub use models::{Direction, Edge, GraphError};
