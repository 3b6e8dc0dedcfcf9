//! Single-source shortest paths (Dijkstra) and shortest-path-tree
//! reconstruction.
//!
//! Dijkstra returns a cost map covering every vertex in the graph; vertices
//! the start cannot reach keep the [`UNREACHABLE`] sentinel. The tree
//! reconstruction pass is separate so callers that only need distances pay
//! nothing for it.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::{AdaptablePriorityQueue, EdgeId, EntryId, Graph, Result, VertexId, Weighted};

/// Maps each vertex to its shortest-path cost from the start vertex.
pub type CostMap = HashMap<VertexId, i64>;

/// Cost assigned to vertices the start vertex cannot reach.
pub const UNREACHABLE: i64 = i64::MAX;

/// Computes single-source shortest-path costs from `start` with Dijkstra's
/// algorithm.
///
/// Every vertex is seeded into an adaptable priority queue, the start at
/// cost 0 and the rest at [`UNREACHABLE`]; entries are re-keyed downward as
/// cheaper routes appear. Vertices popped at the sentinel are unreachable
/// and are not relaxed from, so the sentinel never leaks into arithmetic.
///
/// Edge weights must be non-negative for the returned costs to be minimal.
///
/// Time complexity: O(E log V).
///
/// # Errors
///
/// Returns [`crate::GraphError::InvalidVertex`] if `start` is not a live
/// vertex of the graph.
#[instrument(skip(graph))]
pub fn dijkstra<V, E, G>(graph: &G, start: VertexId) -> Result<CostMap>
where
    E: Weighted,
    G: Graph<V, E>,
{
    graph.vertex_data(start)?;

    let mut queue = AdaptablePriorityQueue::new();
    let mut costs = CostMap::new();
    let mut entries: HashMap<VertexId, EntryId> = HashMap::new();
    let mut known: HashSet<VertexId> = HashSet::new();

    for v in graph.vertices() {
        let cost = if v == start { 0 } else { UNREACHABLE };
        costs.insert(v, cost);
        entries.insert(v, queue.insert(cost, v));
    }

    while let Some((cost_u, u)) = queue.delete_min() {
        known.insert(u);
        if cost_u == UNREACHABLE {
            continue;
        }
        for e in graph.outgoing_edges(u)? {
            let z = graph.opposite(u, e)?;
            if known.contains(&z) {
                continue;
            }
            let relaxed = cost_u + graph.edge_data(e)?.weight();
            if relaxed < costs[&z] {
                costs.insert(z, relaxed);
                queue.replace_key(entries[&z], relaxed)?;
            }
        }
    }

    debug!(
        vertices = costs.len(),
        reachable = costs.values().filter(|&&c| c != UNREACHABLE).count(),
        "dijkstra complete"
    );
    Ok(costs)
}

/// Reconstructs the shortest-path tree implied by a Dijkstra cost map.
///
/// For each reachable vertex other than the start, picks the first incoming
/// edge whose origin cost plus edge weight equals the vertex's own cost.
/// Incidence lists are scanned in insertion order, so the choice among
/// equally cheap predecessors is deterministic. Unreachable vertices are
/// omitted from the tree.
///
/// # Errors
///
/// Returns [`crate::GraphError::InvalidVertex`] if `start` is not a live
/// vertex of the graph.
#[instrument(skip(graph, costs))]
pub fn shortest_path_tree<V, E, G>(
    graph: &G,
    start: VertexId,
    costs: &CostMap,
) -> Result<HashMap<VertexId, EdgeId>>
where
    E: Weighted,
    G: Graph<V, E>,
{
    graph.vertex_data(start)?;

    let mut tree = HashMap::new();
    for v in graph.vertices() {
        if v == start {
            continue;
        }
        let Some(&cost_v) = costs.get(&v) else {
            continue;
        };
        if cost_v == UNREACHABLE {
            continue;
        }
        for e in graph.incoming_edges(v)? {
            let u = graph.opposite(v, e)?;
            if costs.get(&u) == Some(&(cost_v - graph.edge_data(e)?.weight())) {
                tree.insert(v, e);
                break;
            }
        }
    }

    debug!(edges = tree.len(), "shortest-path tree reconstructed");
    Ok(tree)
}
