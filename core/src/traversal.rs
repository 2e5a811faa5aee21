use std::collections::VecDeque;

use tracing::debug;

use crate::graph::{Graph, VertexId};

/// Integer rendering of "no path" for callers that report distances as numbers.
pub const NO_PATH: i64 = -1;

/// Shortest path length from `from` to `to` using BFS (unweighted).
///
/// Returns None if either label is not in the graph or `to` cannot be reached.
/// The two cases are deliberately not distinguished. A self-query on a known
/// vertex returns `Some(0)`.
pub fn shortest_path(graph: &Graph, from: &str, to: &str) -> Option<u32> {
    let start = graph.vertex_id(from)?;
    let target = graph.vertex_id(to)?;

    // distance[v] doubles as the visited set: Some once v has been enqueued.
    let mut distance: Vec<Option<u32>> = vec![None; graph.vertex_count()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();

    distance[start as usize] = Some(0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let depth = distance[current as usize].unwrap_or_default();

        // First dequeue of the target is at its minimum distance.
        if current == target {
            debug!(from, to, depth, "shortest path found");
            return Some(depth);
        }

        for &next in graph.neighbors_out(current) {
            if distance[next as usize].is_none() {
                distance[next as usize] = Some(depth + 1);
                queue.push_back(next);
            }
        }
    }

    debug!(from, to, "no path");
    None
}

/// [`shortest_path`] with the `-1` sentinel in place of `None`.
pub fn shortest_path_or_sentinel(graph: &Graph, from: &str, to: &str) -> i64 {
    shortest_path(graph, from, to).map_or(NO_PATH, i64::from)
}

/// Single-source BFS distances to every vertex, indexed by VertexId.
///
/// Unreached vertices are None. `source` must be a vertex of `graph`.
pub fn bfs_distances(graph: &Graph, source: VertexId) -> Vec<Option<u32>> {
    let mut distance: Vec<Option<u32>> = vec![None; graph.vertex_count()];
    let mut queue: VecDeque<(VertexId, u32)> = VecDeque::new();

    distance[source as usize] = Some(0);
    queue.push_back((source, 0));

    while let Some((current, depth)) = queue.pop_front() {
        for &next in graph.neighbors_out(current) {
            if distance[next as usize].is_none() {
                distance[next as usize] = Some(depth + 1);
                queue.push_back((next, depth + 1));
            }
        }
    }

    distance
}

/// One shortest path from `from` to `to` as a label sequence, both ends included.
///
/// Stores parent pointers during BFS and walks them back once the target is
/// reached. Returns None under the same conditions as [`shortest_path`].
pub fn path_between(graph: &Graph, from: &str, to: &str) -> Option<Vec<String>> {
    let start = graph.vertex_id(from)?;
    let target = graph.vertex_id(to)?;

    if start == target {
        return Some(vec![from.to_string()]);
    }

    // Sentinel: start node's parent is itself
    let mut parent: Vec<Option<VertexId>> = vec![None; graph.vertex_count()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();

    parent[start as usize] = Some(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &next in graph.neighbors_out(current) {
            if parent[next as usize].is_some() {
                continue;
            }
            parent[next as usize] = Some(current);

            if next == target {
                return Some(reconstruct_path(graph, &parent, start, target));
            }

            queue.push_back(next);
        }
    }

    None
}

fn reconstruct_path(
    graph: &Graph,
    parent: &[Option<VertexId>],
    start: VertexId,
    target: VertexId,
) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = target;

    loop {
        path.push(graph.label(current).to_string());
        if current == start {
            break;
        }
        current = parent[current as usize].expect("BFS parent chain broken");
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(i: usize) -> String {
        format!("p{}", i)
    }

    fn make_chain(n: usize) -> Graph {
        let mut g = Graph::new();
        g.load_edges((0..n - 1).map(|i| (label(i), label(i + 1))));
        g
    }

    fn make_cycle(n: usize) -> Graph {
        let mut g = Graph::new();
        g.load_edges((0..n).map(|i| (label(i), label((i + 1) % n))));
        g
    }

    fn make_star(leaves: usize) -> Graph {
        let mut g = Graph::new();
        g.load_edges((1..=leaves).map(|i| ("hub".to_string(), label(i))));
        g
    }

    // --- Shortest path tests ---

    #[test]
    fn test_shortest_path_chain() {
        let g = make_chain(6);
        assert_eq!(shortest_path(&g, "p0", "p5"), Some(5));
        assert_eq!(shortest_path(&g, "p2", "p4"), Some(2));
    }

    #[test]
    fn test_shortest_path_is_directed() {
        let mut g = Graph::new();
        g.load_edges(vec![("A", "B"), ("B", "C")]);
        assert_eq!(shortest_path(&g, "A", "C"), Some(2));
        assert_eq!(shortest_path(&g, "C", "A"), None);
        assert_eq!(shortest_path_or_sentinel(&g, "C", "A"), NO_PATH);
    }

    #[test]
    fn test_shortest_path_self() {
        let g = make_chain(3);
        for v in ["p0", "p1", "p2"] {
            assert_eq!(shortest_path(&g, v, v), Some(0));
        }
    }

    #[test]
    fn test_shortest_path_self_isolated() {
        let mut g = Graph::new();
        g.add_vertex("lonely");
        assert_eq!(shortest_path(&g, "lonely", "lonely"), Some(0));
    }

    #[test]
    fn test_shortest_path_unknown_vertex() {
        let g = make_chain(3);
        assert_eq!(shortest_path(&g, "missing", "p0"), None);
        assert_eq!(shortest_path(&g, "p0", "missing"), None);
        assert_eq!(shortest_path(&g, "missing", "missing"), None);
        assert_eq!(shortest_path_or_sentinel(&g, "missing", "missing"), -1);
    }

    #[test]
    fn test_shortest_path_empty_graph() {
        let g = Graph::new();
        assert_eq!(shortest_path(&g, "A", "A"), None);
    }

    #[test]
    fn test_shortest_path_cycle() {
        let g = make_cycle(6);
        assert_eq!(shortest_path(&g, "p0", "p3"), Some(3));
        // Directed: going "backwards" means all the way around.
        assert_eq!(shortest_path(&g, "p3", "p0"), Some(3));
        assert_eq!(shortest_path(&g, "p1", "p0"), Some(5));
    }

    #[test]
    fn test_shortest_path_prefers_shortcut() {
        let mut g = make_chain(6);
        g.add_edge("p0", "p4");
        assert_eq!(shortest_path(&g, "p0", "p5"), Some(2));
    }

    #[test]
    fn test_shortest_path_star() {
        let g = make_star(50);
        assert_eq!(shortest_path(&g, "hub", "p50"), Some(1));
        assert_eq!(shortest_path(&g, "p50", "hub"), None);
        assert_eq!(shortest_path(&g, "p1", "p2"), None);
    }

    #[test]
    fn test_shortest_path_duplicate_edges() {
        let mut g = make_chain(3);
        let before = shortest_path(&g, "p0", "p2");
        g.add_edge("p0", "p1");
        g.add_edge("p1", "p2");
        assert_eq!(shortest_path(&g, "p0", "p2"), before);
    }

    // --- Single-source distances ---

    #[test]
    fn test_bfs_distances_chain() {
        let g = make_chain(4);
        let d = bfs_distances(&g, 1);
        assert_eq!(d, vec![None, Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_bfs_distances_self_loop() {
        let mut g = Graph::new();
        g.add_edge("A", "A");
        g.add_edge("A", "B");
        assert_eq!(bfs_distances(&g, 0), vec![Some(0), Some(1)]);
    }

    // --- Path reconstruction ---

    #[test]
    fn test_path_between_chain() {
        let g = make_chain(4);
        let path = path_between(&g, "p0", "p3").unwrap();
        assert_eq!(path, vec!["p0", "p1", "p2", "p3"]);
    }

    #[test]
    fn test_path_between_matches_length() {
        let mut g = make_cycle(8);
        g.add_edge("p1", "p6");
        let path = path_between(&g, "p0", "p7").unwrap();
        let hops = shortest_path(&g, "p0", "p7").unwrap();
        assert_eq!(path.len() as u32, hops + 1);
        assert_eq!(path, vec!["p0", "p1", "p6", "p7"]);
    }

    #[test]
    fn test_path_between_self_and_missing() {
        let g = make_chain(3);
        assert_eq!(path_between(&g, "p1", "p1").unwrap(), vec!["p1"]);
        assert!(path_between(&g, "p2", "p0").is_none());
        assert!(path_between(&g, "p0", "nope").is_none());
    }
}
