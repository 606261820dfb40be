//! Kahn's algorithm with a stable tie-break.
//!
//! Among the vertices whose predecessors have all been emitted, the one registered
//! earliest always comes out first, so the same graph yields the same order on every
//! run.

use super::directed::DirectedGraph;
use super::models::{GraphError, Vertex};
use log::debug;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;

/// Returns every vertex exactly once such that for each edge `u -> v`, `u` precedes `v`.
pub fn topological_order<V: Vertex>(graph: &DirectedGraph<V>) -> Result<Vec<V>, GraphError> {
    let mut remaining = graph.in_degrees();
    let mut ready: PriorityQueue<usize, Reverse<usize>> = PriorityQueue::new();
    for (idx, degree) in remaining.iter().enumerate() {
        if *degree == 0 {
            ready.push(idx, Reverse(idx));
        }
    }

    let mut order = Vec::with_capacity(graph.len());
    while let Some((idx, _)) = ready.pop() {
        order.push(idx);
        for &next in graph.successor_indices(idx) {
            remaining[next] -= 1;
            if remaining[next] == 0 {
                ready.push(next, Reverse(next));
            }
        }
    }

    let vertices = graph.vertices();
    if order.len() < vertices.len() {
        let stuck: Vec<String> = remaining
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree > 0)
            .map(|(idx, _)| format!("{:?}", vertices[idx]))
            .collect();
        return Err(GraphError::Cycle(stuck));
    }

    debug!("topological_order - {} vertices ordered", order.len());
    Ok(order.into_iter().map(|idx| vertices[idx].clone()).collect())
}
