//! Graph algorithm engines.
//!
//! This module provides the algorithms built on the graph container and its
//! two supporting structures:
//! - Depth-first and breadth-first discovery-edge traversal
//! - Minimum spanning trees (Kruskal, Prim-Jarnik)
//! - Single-source shortest paths (Dijkstra) and shortest-path-tree
//!   reconstruction
//!
//! Each engine allocates its own priority queue / disjoint-set instances per
//! call and returns plain maps and lists; no internal state outlives a call.

mod mst;
mod shortest_path;
mod traversal;

pub use mst::{kruskal, prim_jarnik, MstResult};
pub use shortest_path::{dijkstra, shortest_path_tree, CostMap, UNREACHABLE};
pub use traversal::{breadth_first_search, depth_first_search, DiscoveryMap};
