use std::collections::HashMap;

use super::*;
use crate::algorithms::{
    breadth_first_search, depth_first_search, dijkstra, kruskal, prim_jarnik,
    shortest_path_tree, MstResult, UNREACHABLE,
};

/// Complete graph on five vertices with the weight of edge (i, j) growing
/// with both endpoints, so every vertex's cheapest connection is v1.
fn star_weighted_complete() -> (AdjacencyListGraph<&'static str, i64>, Vec<VertexId>, Vec<EdgeId>) {
    let mut graph = AdjacencyListGraph::undirected();
    let vs: Vec<_> = ["v1", "v2", "v3", "v4", "v5"]
        .into_iter()
        .map(|data| graph.insert_vertex(data))
        .collect();
    let weights = [
        (0, 1, 5),
        (0, 2, 10),
        (0, 3, 15),
        (0, 4, 20),
        (1, 2, 25),
        (1, 3, 30),
        (1, 4, 35),
        (2, 3, 40),
        (2, 4, 45),
        (3, 4, 50),
    ];
    let es = weights
        .iter()
        .map(|&(u, v, w)| graph.insert_edge(vs[u], vs[v], w).unwrap())
        .collect();
    (graph, vs, es)
}

#[test]
fn adjacency_list_counts_track_insertions_and_removals() {
    let (mut graph, vs, es) = star_weighted_complete();
    assert_eq!(graph.num_vertices(), 5);
    assert_eq!(graph.num_edges(), 10);

    graph.remove_edge(es[9]).unwrap();
    assert_eq!(graph.num_edges(), 9);

    // v1 touches every other vertex, so removing it drops four edges.
    graph.remove_vertex(vs[0]).unwrap();
    assert_eq!(graph.num_vertices(), 4);
    assert_eq!(graph.num_edges(), 5);
}

#[test]
fn adjacency_list_rejects_stale_handles_after_reuse() {
    let mut graph: AdjacencyListGraph<&str, i64> = AdjacencyListGraph::undirected();
    let a = graph.insert_vertex("a");
    graph.remove_vertex(a).unwrap();

    // The freed slot is reused with a bumped generation; the old handle
    // must stay dead.
    let b = graph.insert_vertex("b");
    assert_eq!(graph.vertex_data(a), Err(GraphError::InvalidVertex(a)));
    assert_eq!(graph.vertex_data(b), Ok(&"b"));
}

#[test]
fn undirected_edge_is_incident_to_both_endpoints() {
    let mut graph = AdjacencyListGraph::undirected();
    let a = graph.insert_vertex("a");
    let b = graph.insert_vertex("b");
    let e = graph.insert_edge(a, b, 1).unwrap();

    assert_eq!(graph.outgoing_edges(a).unwrap(), vec![e]);
    assert_eq!(graph.incoming_edges(a).unwrap(), vec![e]);
    assert_eq!(graph.outgoing_edges(b).unwrap(), vec![e]);
    assert_eq!(graph.get_edge(b, a).unwrap(), Some(e));
    assert_eq!(graph.opposite(a, e).unwrap(), b);
}

#[test]
fn traversals_cover_the_complete_graph() {
    let (graph, vs, es) = star_weighted_complete();

    let dfs = depth_first_search(&graph, vs[0]).unwrap();
    assert_eq!(dfs.len(), 4);
    for v in &vs[1..] {
        assert!(dfs.contains_key(v));
    }

    // BFS from v1 discovers every vertex through its direct edge.
    let bfs = breadth_first_search(&graph, vs[0]).unwrap();
    assert_eq!(bfs.len(), 4);
    assert_eq!(bfs[&vs[1]], es[0]);
    assert_eq!(bfs[&vs[2]], es[1]);
    assert_eq!(bfs[&vs[3]], es[2]);
    assert_eq!(bfs[&vs[4]], es[3]);
}

#[test]
fn mst_engines_pick_the_star_edges() {
    let (graph, _, es) = star_weighted_complete();

    let kruskal_result = kruskal(&graph).unwrap();
    assert_eq!(kruskal_result.edges, vec![es[0], es[1], es[2], es[3]]);
    assert_eq!(kruskal_result.total_weight, 50);

    let prim_result = prim_jarnik(&graph).unwrap();
    assert_eq!(prim_result.total_weight, kruskal_result.total_weight);
    assert_eq!(prim_result.edge_count(), 4);
}

#[test]
fn dijkstra_costs_and_tree_on_the_complete_graph() {
    let (graph, vs, es) = star_weighted_complete();

    let costs = dijkstra(&graph, vs[0]).unwrap();
    let expected = [0, 5, 10, 15, 20];
    for (v, want) in vs.iter().zip(expected) {
        assert_eq!(costs[v], want);
    }

    // Every shortest path is the direct edge out of v1.
    let tree = shortest_path_tree(&graph, vs[0], &costs).unwrap();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree[&vs[1]], es[0]);
    assert_eq!(tree[&vs[2]], es[1]);
    assert_eq!(tree[&vs[3]], es[2]);
    assert_eq!(tree[&vs[4]], es[3]);
}

#[test]
fn algorithms_agree_across_graph_realizations() {
    let mut list = AdjacencyListGraph::undirected();
    let mut matrix = AdjacencyMatrixGraph::undirected();

    let list_vs: Vec<_> = (0..4).map(|i| list.insert_vertex(i)).collect();
    let matrix_vs: Vec<_> = (0..4).map(|i| matrix.insert_vertex(i)).collect();
    let edges = [(0, 1, 4_i64), (1, 2, 2), (2, 3, 7), (0, 3, 20), (0, 2, 9)];
    for &(u, v, w) in &edges {
        list.insert_edge(list_vs[u], list_vs[v], w).unwrap();
        matrix.insert_edge(matrix_vs[u], matrix_vs[v], w).unwrap();
    }

    let list_mst = kruskal(&list).unwrap();
    let matrix_mst = kruskal(&matrix).unwrap();
    assert_eq!(list_mst.total_weight, matrix_mst.total_weight);
    assert_eq!(
        prim_jarnik(&matrix).unwrap().total_weight,
        list_mst.total_weight
    );

    let list_costs = dijkstra(&list, list_vs[0]).unwrap();
    let matrix_costs = dijkstra(&matrix, matrix_vs[0]).unwrap();
    for (lv, mv) in list_vs.iter().zip(&matrix_vs) {
        assert_eq!(list_costs[lv], matrix_costs[mv]);
    }

    let list_bfs = breadth_first_search(&list, list_vs[0]).unwrap();
    let matrix_bfs = breadth_first_search(&matrix, matrix_vs[0]).unwrap();
    assert_eq!(list_bfs.len(), matrix_bfs.len());
}

#[test]
fn directed_graph_end_to_end() {
    let mut graph = AdjacencyListGraph::directed();
    let a = graph.insert_vertex("a");
    let b = graph.insert_vertex("b");
    let c = graph.insert_vertex("c");
    graph.insert_edge(a, b, 1_i64).unwrap();
    graph.insert_edge(b, c, 1).unwrap();
    graph.insert_edge(c, a, 1).unwrap();

    assert_eq!(graph.out_degree(a).unwrap(), 1);
    assert_eq!(graph.in_degree(a).unwrap(), 1);

    let costs = dijkstra(&graph, a).unwrap();
    assert_eq!(costs[&b], 1);
    assert_eq!(costs[&c], 2);

    // The cycle makes every vertex reachable from every other.
    for start in [a, b, c] {
        let reached = breadth_first_search(&graph, start).unwrap();
        assert_eq!(reached.len(), 2);
    }
}

#[test]
fn unreachable_vertices_keep_the_sentinel_cost() {
    let mut graph = AdjacencyListGraph::undirected();
    let a = graph.insert_vertex("a");
    let b = graph.insert_vertex("b");
    let lone = graph.insert_vertex("lone");
    graph.insert_edge(a, b, 1_i64).unwrap();

    let costs = dijkstra(&graph, a).unwrap();
    assert_eq!(costs[&lone], UNREACHABLE);

    let tree = shortest_path_tree(&graph, a, &costs).unwrap();
    assert!(!tree.contains_key(&lone));
}

#[test]
fn weighted_payload_types_interoperate() {
    #[derive(Debug)]
    struct Road {
        length: i64,
    }

    impl Weighted for Road {
        fn weight(&self) -> i64 {
            self.length
        }
    }

    let mut graph = AdjacencyListGraph::undirected();
    let a = graph.insert_vertex("a");
    let b = graph.insert_vertex("b");
    let c = graph.insert_vertex("c");
    graph.insert_edge(a, b, Road { length: 3 }).unwrap();
    graph.insert_edge(b, c, Road { length: 5 }).unwrap();

    let costs = dijkstra(&graph, a).unwrap();
    assert_eq!(costs[&c], 8);
    assert_eq!(kruskal(&graph).unwrap().total_weight, 8);
}

#[test]
fn mst_result_serde_round_trip() {
    let (graph, _, _) = star_weighted_complete();
    let result = kruskal(&graph).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: MstResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn forest_partitions_match_component_structure() {
    let (graph, vs, _) = star_weighted_complete();

    let mut forest = UpTreeForest::new();
    for &v in &vs {
        forest.make_set(v);
    }
    for e in graph.edges() {
        let (u, v) = graph.end_vertices(e).unwrap();
        let a = forest.find(&u).unwrap();
        let b = forest.find(&v).unwrap();
        forest.union(a, b).unwrap();
    }

    let root = forest.find(&vs[0]).unwrap();
    for v in &vs {
        assert_eq!(forest.find(v).unwrap(), root);
    }
}

#[test]
fn priority_queue_drives_vertex_scheduling() {
    let mut queue = AdaptablePriorityQueue::new();
    let mut handles = HashMap::new();
    for (name, key) in [("a", 40_i64), ("b", 30), ("c", 20), ("d", 10)] {
        handles.insert(name, queue.insert(key, name));
    }

    queue.replace_key(handles["a"], 5).unwrap();
    assert_eq!(queue.delete_min(), Some((5, "a")));
    assert_eq!(queue.delete_min(), Some((10, "d")));

    queue.remove(handles["c"]).unwrap();
    assert_eq!(queue.delete_min(), Some((30, "b")));
    assert!(queue.is_empty());
}
