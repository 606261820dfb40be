use super::models::{Direction, Edge, GraphError, Vertex};
use super::topo;
use log::trace;
use std::collections::HashMap;

/// Directed-edge registry over opaque vertex handles.
///
/// Vertices keep their insertion order, which the topological sort uses to break
/// ties. Adjacency is stored by vertex index in both directions.
#[derive(Debug, Clone)]
pub struct DirectedGraph<V: Vertex> {
    vertices: Vec<V>,
    index: HashMap<V, usize>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl<V: Vertex> Default for DirectedGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> DirectedGraph<V> {
    pub fn new() -> Self {
        DirectedGraph {
            vertices: Vec::new(),
            index: HashMap::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Register a vertex, returning its insertion index
    pub fn add_node(&mut self, vertex: V) -> Result<usize, GraphError> {
        if self.index.contains_key(&vertex) {
            return Err(GraphError::DuplicateVertex(format!("{:?}", vertex)));
        }
        let idx = self.vertices.len();
        trace!("add_node - {:?} at index {}", vertex, idx);
        self.index.insert(vertex.clone(), idx);
        self.vertices.push(vertex);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        Ok(idx)
    }

    /// Add the edge `from -> to`. Both endpoints must already be registered.
    ///
    /// Returns `false` when the edge was already present.
    pub fn add_edge(&mut self, from: &V, to: &V) -> Result<bool, GraphError> {
        let source = self.require(from)?;
        let target = self.require(to)?;
        if self.outgoing[source].contains(&target) {
            return Ok(false);
        }
        trace!("add_edge - {:?} -> {:?}", from, to);
        self.outgoing[source].push(target);
        self.incoming[target].push(source);
        Ok(true)
    }

    /// Vertices in insertion order
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn edges(&self) -> Vec<Edge<V>> {
        self.outgoing
            .iter()
            .enumerate()
            .flat_map(|(source, targets)| {
                targets.iter().map(move |&target| {
                    Edge::new(self.vertices[source].clone(), self.vertices[target].clone())
                })
            })
            .collect()
    }

    /// Adjacent vertices of `vertex` in the given direction
    pub fn neighbors(&self, vertex: &V, direction: Direction) -> Result<Vec<&V>, GraphError> {
        let idx = self.require(vertex)?;
        let indices: Vec<usize> = match direction {
            Direction::Outgoing => self.outgoing[idx].clone(),
            Direction::Incoming => self.incoming[idx].clone(),
            Direction::Both => self.outgoing[idx]
                .iter()
                .chain(self.incoming[idx].iter())
                .copied()
                .collect(),
        };
        Ok(indices.into_iter().map(|i| &self.vertices[i]).collect())
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Linearize the graph so every edge points forward. See [`topo::topological_order`].
    pub fn topological_order(&self) -> Result<Vec<V>, GraphError> {
        topo::topological_order(self)
    }

    pub(crate) fn successor_indices(&self, idx: usize) -> &[usize] {
        &self.outgoing[idx]
    }

    pub(crate) fn in_degrees(&self) -> Vec<usize> {
        self.incoming.iter().map(Vec::len).collect()
    }

    fn require(&self, vertex: &V) -> Result<usize, GraphError> {
        self.index
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(format!("{:?}", vertex)))
    }
}
