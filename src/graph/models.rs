use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Bound shared by every vertex handle stored in a [`DirectedGraph`](super::directed::DirectedGraph).
///
/// Handles are opaque to the graph: it only needs to hash, compare and clone them.
pub trait Vertex: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Vertex for T {}

/// Direction enum for specifying edge traversal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Outgoing edges (from source vertex to target vertices)
    Outgoing,
    /// Incoming edges (from other vertices to this vertex)
    Incoming,
    /// Both incoming and outgoing edges
    Both,
}

/// Directed edge `source -> target`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<V> {
    /// Vertex the edge leaves
    pub source: V,
    /// Vertex the edge enters
    pub target: V,
}

impl<V: Vertex> Edge<V> {
    /// Create a new edge connecting source to target
    pub fn new(source: V, target: V) -> Self {
        Self { source, target }
    }
}

/// Errors raised by graph mutation and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {0} is already registered")]
    DuplicateVertex(String),
    #[error("vertex {0} is not registered")]
    UnknownVertex(String),
    #[error("graph contains a cycle through {0:?}")]
    Cycle(Vec<String>),
}
