//! Depth-first and breadth-first discovery-edge traversal.
//!
//! Both searches return a map from each reached vertex to the edge through
//! which it was first discovered. The start vertex is absent from the map,
//! as is every vertex unreachable from it. Both run in O(V+E) on
//! adjacency-list graphs.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, instrument};

use crate::{EdgeId, Graph, Result, VertexId};

/// Maps each discovered vertex to its discovery edge.
pub type DiscoveryMap = HashMap<VertexId, EdgeId>;

/// Computes the depth-first search discovery-edge map from `start`.
#[instrument(skip(graph))]
pub fn depth_first_search<V, E, G: Graph<V, E>>(
    graph: &G,
    start: VertexId,
) -> Result<DiscoveryMap> {
    graph.vertex_data(start)?;

    let mut known = HashSet::new();
    let mut forest = DiscoveryMap::new();
    dfs_visit(graph, start, &mut known, &mut forest)?;

    debug!(discovered = forest.len(), "depth-first search complete");
    Ok(forest)
}

fn dfs_visit<V, E, G: Graph<V, E>>(
    graph: &G,
    u: VertexId,
    known: &mut HashSet<VertexId>,
    forest: &mut DiscoveryMap,
) -> Result<()> {
    known.insert(u);
    for e in graph.outgoing_edges(u)? {
        let v = graph.opposite(u, e)?;
        if !known.contains(&v) {
            forest.insert(v, e);
            dfs_visit(graph, v, known, forest)?;
        }
    }
    Ok(())
}

/// Computes the breadth-first search discovery-edge map from `start`.
#[instrument(skip(graph))]
pub fn breadth_first_search<V, E, G: Graph<V, E>>(
    graph: &G,
    start: VertexId,
) -> Result<DiscoveryMap> {
    graph.vertex_data(start)?;

    let mut known = HashSet::new();
    let mut forest = DiscoveryMap::new();
    let mut frontier = VecDeque::new();

    known.insert(start);
    frontier.push_back(start);

    while let Some(u) = frontier.pop_front() {
        for e in graph.outgoing_edges(u)? {
            let w = graph.opposite(u, e)?;
            if !known.contains(&w) {
                known.insert(w);
                forest.insert(w, e);
                frontier.push_back(w);
            }
        }
    }

    debug!(discovered = forest.len(), "breadth-first search complete");
    Ok(forest)
}
