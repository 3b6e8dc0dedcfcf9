//! Minimum spanning trees: Kruskal's and Prim-Jarnik's algorithms.
//!
//! Both engines require the graph's edge payloads to expose an integer
//! weight through [`Weighted`] and return the accepted tree edges in
//! acceptance order. On the same connected graph the two trees always have
//! the same total weight, though the edge sets may differ when weights tie.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    AdaptablePriorityQueue, EdgeId, EntryId, Graph, GraphError, Result, UpTreeForest, VertexId,
    Weighted,
};

/// Result of a minimum spanning tree computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstResult {
    /// Tree edges in acceptance order.
    pub edges: Vec<EdgeId>,
    /// Sum of the weights of the accepted edges.
    pub total_weight: i64,
}

impl MstResult {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            edges: Vec::new(),
            total_weight: 0,
        }
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the result spans a graph with the given vertex
    /// count (V-1 tree edges, or trivially for 0/1 vertices).
    #[must_use]
    pub fn spans(&self, num_vertices: usize) -> bool {
        num_vertices <= 1 || self.edges.len() + 1 == num_vertices
    }
}

impl Default for MstResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Computes a minimum spanning tree using Kruskal's algorithm.
///
/// Every edge goes into a min-priority-queue keyed by weight; a disjoint-set
/// forest over the vertices detects cycles. A decrementing component
/// counter, starting at V, tracks acceptance; the scan stops when a single
/// component remains.
///
/// Time complexity: O(E log E).
///
/// # Errors
///
/// Returns [`GraphError::Disconnected`] if the edge queue is exhausted
/// before the components merge into one.
#[instrument(skip(graph))]
pub fn kruskal<V, E, G>(graph: &G) -> Result<MstResult>
where
    E: Weighted,
    G: Graph<V, E>,
{
    let vertices = graph.vertices();
    if vertices.len() <= 1 {
        return Ok(MstResult::empty());
    }

    let mut queue = AdaptablePriorityQueue::new();
    for e in graph.edges() {
        queue.insert(graph.edge_data(e)?.weight(), e);
    }

    let mut forest = UpTreeForest::new();
    for &v in &vertices {
        forest.make_set(v);
    }

    let mut result = MstResult::empty();
    let mut components = vertices.len();

    while components > 1 {
        let Some((weight, edge)) = queue.delete_min() else {
            return Err(GraphError::Disconnected);
        };
        let (u, v) = graph.end_vertices(edge)?;
        let a = forest.find(&u)?;
        let b = forest.find(&v)?;
        if a != b {
            forest.union(a, b)?;
            result.edges.push(edge);
            result.total_weight += weight;
            components -= 1;
        }
    }

    debug!(
        edges = result.edges.len(),
        total_weight = result.total_weight,
        "kruskal complete"
    );
    Ok(result)
}

/// Computes a minimum spanning tree using Prim-Jarnik's algorithm.
///
/// An arbitrary start vertex is seeded with cost 0 and every other vertex
/// with the `i64::MAX` sentinel; all vertices sit in an adaptable priority
/// queue whose entries are re-keyed as cheaper connecting edges appear.
///
/// Time complexity: O(E log V).
///
/// # Errors
///
/// Returns [`GraphError::Disconnected`] if fewer than V-1 edges were
/// accepted once the queue drains.
#[instrument(skip(graph))]
pub fn prim_jarnik<V, E, G>(graph: &G) -> Result<MstResult>
where
    E: Weighted,
    G: Graph<V, E>,
{
    let vertices = graph.vertices();
    if vertices.len() <= 1 {
        return Ok(MstResult::empty());
    }
    let start = vertices[0];

    let mut queue = AdaptablePriorityQueue::new();
    let mut costs: HashMap<VertexId, i64> = HashMap::new();
    let mut entries: HashMap<VertexId, EntryId> = HashMap::new();
    let mut connecting: HashMap<VertexId, EdgeId> = HashMap::new();
    let mut known: HashSet<VertexId> = HashSet::new();

    for &v in &vertices {
        let cost = if v == start { 0 } else { i64::MAX };
        costs.insert(v, cost);
        entries.insert(v, queue.insert(cost, v));
    }

    let mut result = MstResult::empty();
    while let Some((_, u)) = queue.delete_min() {
        if let Some(&e) = connecting.get(&u) {
            result.edges.push(e);
            result.total_weight += graph.edge_data(e)?.weight();
        }
        known.insert(u);
        for e in graph.outgoing_edges(u)? {
            let z = graph.opposite(u, e)?;
            let r = graph.edge_data(e)?.weight();
            if !known.contains(&z) && r < costs[&z] {
                costs.insert(z, r);
                connecting.insert(z, e);
                queue.replace_key(entries[&z], r)?;
            }
        }
    }

    if !result.spans(vertices.len()) {
        return Err(GraphError::Disconnected);
    }

    debug!(
        edges = result.edges.len(),
        total_weight = result.total_weight,
        "prim-jarnik complete"
    );
    Ok(result)
}
