use std::collections::BTreeSet;

use tracing::debug;

use crate::graph::{Graph, VertexId};

/// Iterative depth-first search from `root` over the adjacency given by `adj`.
///
/// `on_enter` fires when a vertex is first visited, `on_finish` once all of
/// its neighbors have been explored. Frames hold a live neighbor iterator, so
/// the visiting order is the same as the recursive formulation while the
/// depth is bounded only by heap memory.
fn depth_first<'g, A, E, F>(
    adj: A,
    root: VertexId,
    visited: &mut [bool],
    mut on_enter: E,
    mut on_finish: F,
) where
    A: Fn(VertexId) -> &'g BTreeSet<VertexId>,
    E: FnMut(VertexId),
    F: FnMut(VertexId),
{
    visited[root as usize] = true;
    on_enter(root);
    let mut stack = vec![(root, adj(root).iter())];

    while let Some((vertex, neighbors)) = stack.last_mut() {
        let vertex = *vertex;
        if let Some(&next) = neighbors.find(|&&next| !visited[next as usize]) {
            visited[next as usize] = true;
            on_enter(next);
            stack.push((next, adj(next).iter()));
        } else {
            stack.pop();
            on_finish(vertex);
        }
    }
}

/// Kosaraju–Sharir over vertex ids.
///
/// Pass 1 records finishing order on the forward graph. Pass 2 pops that
/// order and floods the reverse graph; each flood is one component. The
/// first popped vertex lies in a source component of the condensation, so
/// components come out in topological order of the condensation DAG.
fn kosaraju(graph: &Graph) -> Vec<Vec<VertexId>> {
    let n = graph.vertex_count();

    let mut visited = vec![false; n];
    let mut finished: Vec<VertexId> = Vec::with_capacity(n);
    for root in graph.vertices() {
        if !visited[root as usize] {
            depth_first(
                |v| graph.neighbors_out(v),
                root,
                &mut visited,
                |_| {},
                |v| finished.push(v),
            );
        }
    }

    let mut visited = vec![false; n];
    let mut components: Vec<Vec<VertexId>> = Vec::new();
    while let Some(seed) = finished.pop() {
        if visited[seed as usize] {
            continue;
        }
        let mut members = Vec::new();
        depth_first(
            |v| graph.neighbors_in(v),
            seed,
            &mut visited,
            |v| members.push(v),
            |_| {},
        );
        components.push(members);
    }

    components
}

/// Partition the graph into strongly connected components.
///
/// Groups are emitted in the order their seed vertex is popped from the
/// finishing stack; members within a group follow reverse-graph DFS order.
/// The groups are pairwise disjoint and together cover every vertex.
pub fn strongly_connected_components(graph: &Graph) -> Vec<Vec<String>> {
    let components: Vec<Vec<String>> = kosaraju(graph)
        .into_iter()
        .map(|members| {
            members
                .into_iter()
                .map(|id| graph.label(id).to_string())
                .collect()
        })
        .collect();

    debug!(
        vertices = graph.vertex_count(),
        components = components.len(),
        "strongly connected components computed"
    );
    components
}

/// Number of strongly connected components.
pub fn component_count(graph: &Graph) -> usize {
    kosaraju(graph).len()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn make_cycle(labels: &[&str]) -> Graph {
        let mut g = Graph::new();
        let n = labels.len();
        g.load_edges((0..n).map(|i| (labels[i], labels[(i + 1) % n])));
        g
    }

    fn as_sets(components: &[Vec<String>]) -> Vec<HashSet<&str>> {
        components
            .iter()
            .map(|c| c.iter().map(|s| s.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_scc_empty_graph() {
        let g = Graph::new();
        assert!(strongly_connected_components(&g).is_empty());
        assert_eq!(component_count(&g), 0);
    }

    #[test]
    fn test_scc_single_cycle() {
        let g = make_cycle(&["A", "B", "C"]);
        let sccs = strongly_connected_components(&g);
        assert_eq!(sccs.len(), 1);
        assert_eq!(as_sets(&sccs)[0], HashSet::from(["A", "B", "C"]));
    }

    #[test]
    fn test_scc_two_disjoint_cycles() {
        let mut g = make_cycle(&["A", "B", "C"]);
        g.load_edges(vec![("X", "Y"), ("Y", "X")]);
        let sccs = strongly_connected_components(&g);
        assert_eq!(sccs.len(), 2);
        let sets = as_sets(&sccs);
        assert!(sets.contains(&HashSet::from(["A", "B", "C"])));
        assert!(sets.contains(&HashSet::from(["X", "Y"])));
    }

    #[test]
    fn test_scc_chain_is_all_singletons_in_topological_order() {
        let mut g = Graph::new();
        g.load_edges(vec![("A", "B"), ("B", "C"), ("C", "D")]);
        let sccs = strongly_connected_components(&g);
        assert_eq!(sccs, vec![vec!["A"], vec!["B"], vec!["C"], vec!["D"]]);
    }

    #[test]
    fn test_scc_linked_cycles() {
        // {A,B} -> {C,D}: two components, source component first.
        let mut g = Graph::new();
        g.load_edges(vec![("A", "B"), ("B", "A"), ("B", "C"), ("C", "D"), ("D", "C")]);
        let sccs = strongly_connected_components(&g);
        assert_eq!(sccs, vec![vec!["A", "B"], vec!["C", "D"]]);
    }

    #[test]
    fn test_scc_self_loop_and_isolated() {
        let mut g = Graph::new();
        g.add_edge("A", "A");
        g.add_vertex("B");
        let sccs = strongly_connected_components(&g);
        assert_eq!(sccs.len(), 2);
        assert!(sccs.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_scc_partition_covers_all_vertices() {
        let mut g = make_cycle(&["a", "b", "c", "d"]);
        g.load_edges(vec![("d", "e"), ("e", "f"), ("f", "e"), ("g", "a"), ("h", "h")]);
        let sccs = strongly_connected_components(&g);

        let mut seen: HashSet<&str> = HashSet::new();
        for member in sccs.iter().flatten() {
            assert!(seen.insert(member.as_str()), "{} appears twice", member);
        }
        assert_eq!(seen.len(), g.vertex_count());
        assert_eq!(component_count(&g), 4);
    }

    #[test]
    fn test_scc_deep_chain_no_stack_overflow() {
        let n = 200_000;
        let mut g = Graph::with_capacity(n);
        g.load_edges((0..n - 1).map(|i| (i.to_string(), (i + 1).to_string())));
        g.add_edge(&(n - 1).to_string(), "0");
        let sccs = strongly_connected_components(&g);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), n);
    }
}
