// Pedantic lint configuration for graph_core
#![allow(clippy::missing_errors_doc)] // Error conditions are self-evident from Result types
#![allow(clippy::uninlined_format_args)] // Keep format strings readable

//! Graph containers and algorithm engines.
//!
//! This crate provides an abstract graph container with two realizations
//! (adjacency list and adjacency matrix), a location-aware adaptable binary
//! heap, a union-by-size/path-compression disjoint-set forest, and the
//! algorithm engines built on top of them: depth/breadth-first traversal,
//! Kruskal's and Prim-Jarnik's minimum spanning trees, and Dijkstra's
//! single-source shortest paths with shortest-path-tree reconstruction.
//!
//! Vertices and edges are referred to through opaque `(index, generation)`
//! handles owned by the graph that minted them. Every operation validates
//! its handles before mutating anything; a stale or foreign handle fails
//! with [`GraphError::InvalidVertex`] or [`GraphError::InvalidEdge`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::instrument;

pub mod algorithms;
mod disjoint_set;
mod error;
mod matrix;
mod priority_queue;

#[cfg(test)]
mod tests;

pub use disjoint_set::{SetPosition, UpTreeForest};
pub use error::{GraphError, Result};
pub use matrix::AdjacencyMatrixGraph;
pub use priority_queue::{AdaptablePriorityQueue, EntryId};

/// Handle to a vertex owned by a graph.
///
/// A handle is valid only for the graph instance that minted it and only
/// while the vertex is live; the generation counter detects reuse of the
/// underlying arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}g{}", self.index, self.generation)
    }
}

/// Handle to an edge owned by a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}g{}", self.index, self.generation)
    }
}

/// Capability for edge payloads consumed by the MST and shortest-path
/// engines: a single integer weight accessor.
pub trait Weighted {
    /// Returns the weight of this payload.
    fn weight(&self) -> i64;
}

macro_rules! impl_weighted_for_int {
    ($($t:ty),*) => {
        $(
            impl Weighted for $t {
                fn weight(&self) -> i64 {
                    i64::from(*self)
                }
            }
        )*
    };
}

impl_weighted_for_int!(i8, i16, i32, i64, u8, u16, u32);

/// The abstract graph container consumed by the algorithm engines.
///
/// Both realizations ([`AdjacencyListGraph`] and [`AdjacencyMatrixGraph`])
/// expose the same surface; they differ only in the cost of incidence
/// queries (`get_edge` is O(degree) for the list realization, O(1) for the
/// matrix realization).
pub trait Graph<V, E> {
    /// Returns true if the graph was constructed as directed.
    fn is_directed(&self) -> bool;

    /// Returns the number of live vertices.
    fn num_vertices(&self) -> usize;

    /// Returns the number of live edges.
    fn num_edges(&self) -> usize;

    /// Returns all live vertex handles in insertion order (slot order when
    /// slots have been reused).
    fn vertices(&self) -> Vec<VertexId>;

    /// Returns all live edge handles in insertion order.
    fn edges(&self) -> Vec<EdgeId>;

    /// Returns a reference to the payload of the given vertex.
    fn vertex_data(&self, v: VertexId) -> Result<&V>;

    /// Returns a reference to the payload of the given edge.
    fn edge_data(&self, e: EdgeId) -> Result<&E>;

    /// Returns the two endpoints of an edge. For undirected graphs the
    /// order is insertion order, not semantically meaningful.
    fn end_vertices(&self, e: EdgeId) -> Result<(VertexId, VertexId)>;

    /// Returns the endpoint of `e` opposite to `v`.
    fn opposite(&self, v: VertexId, e: EdgeId) -> Result<VertexId> {
        self.vertex_data(v)?;
        let (a, b) = self.end_vertices(e)?;
        if a == v {
            Ok(b)
        } else if b == v {
            Ok(a)
        } else {
            Err(GraphError::NotIncident { vertex: v, edge: e })
        }
    }

    /// Returns the number of outgoing edges of `v`.
    fn out_degree(&self, v: VertexId) -> Result<usize>;

    /// Returns the number of incoming edges of `v`.
    fn in_degree(&self, v: VertexId) -> Result<usize>;

    /// Returns the outgoing edges of `v`. For undirected graphs this is the
    /// full incident-edge list.
    fn outgoing_edges(&self, v: VertexId) -> Result<Vec<EdgeId>>;

    /// Returns the incoming edges of `v`. Identical to `outgoing_edges` for
    /// undirected graphs.
    fn incoming_edges(&self, v: VertexId) -> Result<Vec<EdgeId>>;

    /// Returns the edge from `u` to `v` (either orientation for undirected
    /// graphs), if one exists.
    fn get_edge(&self, u: VertexId, v: VertexId) -> Result<Option<EdgeId>>;

    /// Inserts a vertex with the given payload and returns its handle.
    fn insert_vertex(&mut self, data: V) -> VertexId;

    /// Inserts an edge between two existing vertices.
    fn insert_edge(&mut self, u: VertexId, v: VertexId, data: E) -> Result<EdgeId>;

    /// Removes a vertex and every edge incident to it, returning the
    /// vertex payload.
    fn remove_vertex(&mut self, v: VertexId) -> Result<V>;

    /// Removes an edge, returning its payload.
    fn remove_edge(&mut self, e: EdgeId) -> Result<E>;
}

#[derive(Debug, Clone)]
struct VertexRecord<V> {
    data: V,
    outgoing: Vec<EdgeId>,
    incoming: Vec<EdgeId>,
}

#[derive(Debug, Clone)]
struct EdgeRecord<E> {
    data: E,
    origin: VertexId,
    destination: VertexId,
}

#[derive(Debug, Clone)]
struct Slot<R> {
    generation: u32,
    record: Option<R>,
}

/// Adjacency-list realization of the [`Graph`] container.
///
/// Vertices and edges live in arenas of generation-tagged slots; each vertex
/// record carries its incident-edge lists. `get_edge` scans the incidence
/// list of the first endpoint, so it costs O(degree).
#[derive(Debug, Clone)]
pub struct AdjacencyListGraph<V, E> {
    vertex_slots: Vec<Slot<VertexRecord<V>>>,
    edge_slots: Vec<Slot<EdgeRecord<E>>>,
    free_vertex_slots: Vec<u32>,
    free_edge_slots: Vec<u32>,
    vertex_count: usize,
    edge_count: usize,
    directed: bool,
}

impl<V, E> AdjacencyListGraph<V, E> {
    /// Creates a new undirected adjacency-list graph.
    #[must_use]
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Creates a new directed adjacency-list graph.
    #[must_use]
    pub fn directed() -> Self {
        Self::new(true)
    }

    fn new(directed: bool) -> Self {
        Self {
            vertex_slots: Vec::new(),
            edge_slots: Vec::new(),
            free_vertex_slots: Vec::new(),
            free_edge_slots: Vec::new(),
            vertex_count: 0,
            edge_count: 0,
            directed,
        }
    }

    fn vertex(&self, v: VertexId) -> Result<&VertexRecord<V>> {
        self.vertex_slots
            .get(v.index as usize)
            .filter(|slot| slot.generation == v.generation)
            .and_then(|slot| slot.record.as_ref())
            .ok_or(GraphError::InvalidVertex(v))
    }

    fn vertex_mut(&mut self, v: VertexId) -> Result<&mut VertexRecord<V>> {
        self.vertex_slots
            .get_mut(v.index as usize)
            .filter(|slot| slot.generation == v.generation)
            .and_then(|slot| slot.record.as_mut())
            .ok_or(GraphError::InvalidVertex(v))
    }

    fn edge(&self, e: EdgeId) -> Result<&EdgeRecord<E>> {
        self.edge_slots
            .get(e.index as usize)
            .filter(|slot| slot.generation == e.generation)
            .and_then(|slot| slot.record.as_ref())
            .ok_or(GraphError::InvalidEdge(e))
    }
}

impl<V, E> Default for AdjacencyListGraph<V, E> {
    fn default() -> Self {
        Self::undirected()
    }
}

impl<V, E> Graph<V, E> for AdjacencyListGraph<V, E> {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn num_vertices(&self) -> usize {
        self.vertex_count
    }

    fn num_edges(&self) -> usize {
        self.edge_count
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.vertex_slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.record.is_some())
            .map(|(i, slot)| VertexId {
                index: i as u32,
                generation: slot.generation,
            })
            .collect()
    }

    fn edges(&self) -> Vec<EdgeId> {
        self.edge_slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.record.is_some())
            .map(|(i, slot)| EdgeId {
                index: i as u32,
                generation: slot.generation,
            })
            .collect()
    }

    fn vertex_data(&self, v: VertexId) -> Result<&V> {
        Ok(&self.vertex(v)?.data)
    }

    fn edge_data(&self, e: EdgeId) -> Result<&E> {
        Ok(&self.edge(e)?.data)
    }

    fn end_vertices(&self, e: EdgeId) -> Result<(VertexId, VertexId)> {
        let record = self.edge(e)?;
        Ok((record.origin, record.destination))
    }

    fn out_degree(&self, v: VertexId) -> Result<usize> {
        Ok(self.vertex(v)?.outgoing.len())
    }

    fn in_degree(&self, v: VertexId) -> Result<usize> {
        Ok(self.vertex(v)?.incoming.len())
    }

    fn outgoing_edges(&self, v: VertexId) -> Result<Vec<EdgeId>> {
        Ok(self.vertex(v)?.outgoing.clone())
    }

    fn incoming_edges(&self, v: VertexId) -> Result<Vec<EdgeId>> {
        Ok(self.vertex(v)?.incoming.clone())
    }

    fn get_edge(&self, u: VertexId, v: VertexId) -> Result<Option<EdgeId>> {
        self.vertex(v)?;
        for &e in &self.vertex(u)?.outgoing {
            let record = self.edge(e)?;
            let connects = (record.origin == u && record.destination == v)
                || (!self.directed && record.origin == v && record.destination == u);
            if connects {
                return Ok(Some(e));
            }
        }
        Ok(None)
    }

    #[instrument(skip(self, data))]
    fn insert_vertex(&mut self, data: V) -> VertexId {
        let record = VertexRecord {
            data,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        };
        self.vertex_count += 1;
        if let Some(index) = self.free_vertex_slots.pop() {
            let slot = &mut self.vertex_slots[index as usize];
            slot.record = Some(record);
            VertexId {
                index,
                generation: slot.generation,
            }
        } else {
            self.vertex_slots.push(Slot {
                generation: 0,
                record: Some(record),
            });
            VertexId {
                index: (self.vertex_slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    #[instrument(skip(self, data))]
    fn insert_edge(&mut self, u: VertexId, v: VertexId, data: E) -> Result<EdgeId> {
        self.vertex(u)?;
        self.vertex(v)?;

        let record = EdgeRecord {
            data,
            origin: u,
            destination: v,
        };
        let id = if let Some(index) = self.free_edge_slots.pop() {
            let slot = &mut self.edge_slots[index as usize];
            slot.record = Some(record);
            EdgeId {
                index,
                generation: slot.generation,
            }
        } else {
            self.edge_slots.push(Slot {
                generation: 0,
                record: Some(record),
            });
            EdgeId {
                index: (self.edge_slots.len() - 1) as u32,
                generation: 0,
            }
        };
        self.edge_count += 1;

        self.vertex_mut(u)?.outgoing.push(id);
        self.vertex_mut(v)?.incoming.push(id);
        if !self.directed && u != v {
            self.vertex_mut(v)?.outgoing.push(id);
            self.vertex_mut(u)?.incoming.push(id);
        }

        Ok(id)
    }

    #[instrument(skip(self))]
    fn remove_vertex(&mut self, v: VertexId) -> Result<V> {
        let record = self.vertex(v)?;
        let mut incident: Vec<EdgeId> = record.outgoing.clone();
        for &e in &record.incoming {
            if !incident.contains(&e) {
                incident.push(e);
            }
        }

        for e in incident {
            self.remove_edge(e)?;
        }

        let slot = &mut self.vertex_slots[v.index as usize];
        let record = slot.record.take().ok_or(GraphError::InvalidVertex(v))?;
        slot.generation += 1;
        self.free_vertex_slots.push(v.index);
        self.vertex_count -= 1;
        Ok(record.data)
    }

    #[instrument(skip(self))]
    fn remove_edge(&mut self, e: EdgeId) -> Result<E> {
        let (origin, destination) = {
            let record = self.edge(e)?;
            (record.origin, record.destination)
        };

        self.vertex_mut(origin)?.outgoing.retain(|&x| x != e);
        self.vertex_mut(destination)?.incoming.retain(|&x| x != e);
        if !self.directed && origin != destination {
            self.vertex_mut(destination)?.outgoing.retain(|&x| x != e);
            self.vertex_mut(origin)?.incoming.retain(|&x| x != e);
        }

        let slot = &mut self.edge_slots[e.index as usize];
        let record = slot.record.take().ok_or(GraphError::InvalidEdge(e))?;
        slot.generation += 1;
        self.free_edge_slots.push(e.index);
        self.edge_count -= 1;
        Ok(record.data)
    }
}
