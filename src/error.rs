//! Error types for the graph algorithms core.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{disjoint_set::SetPosition, priority_queue::EntryId, EdgeId, VertexId};

/// Error type for graph, priority-queue, and disjoint-set operations.
///
/// Handle and incidence errors indicate programmer error: the offending call
/// fails before any mutation takes place, and there is nothing to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphError {
    /// Vertex handle is stale or was minted by a different graph.
    InvalidVertex(VertexId),
    /// Edge handle is stale or was minted by a different graph.
    InvalidEdge(EdgeId),
    /// Adaptable priority queue entry is stale (no longer resident at its
    /// recorded heap slot).
    InvalidEntry(EntryId),
    /// Disjoint-set position does not refer to a node in this forest.
    InvalidPosition(SetPosition),
    /// `opposite` was called with a vertex that is not an endpoint of the
    /// given edge.
    NotIncident { vertex: VertexId, edge: EdgeId },
    /// The element was never added to the forest via `make_set`.
    ElementNotFound,
    /// The graph has no spanning tree (more than one connected component).
    Disconnected,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidVertex(v) => write!(f, "Invalid vertex handle: {v}"),
            Self::InvalidEdge(e) => write!(f, "Invalid edge handle: {e}"),
            Self::InvalidEntry(e) => write!(f, "Invalid priority queue entry: {e}"),
            Self::InvalidPosition(p) => write!(f, "Invalid disjoint-set position: {p}"),
            Self::NotIncident { vertex, edge } => {
                write!(f, "Vertex {vertex} is not incident to edge {edge}")
            },
            Self::ElementNotFound => write!(f, "Element not found in disjoint-set forest"),
            Self::Disconnected => write!(f, "Graph is disconnected: no spanning tree exists"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
