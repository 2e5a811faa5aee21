use tracing::debug;

use crate::graph::{Graph, VertexId};
use crate::traversal::bfs_distances;

/// Eccentricity of `id`: its largest BFS distance, provided it reaches every
/// vertex of the graph. A vertex that misses any other vertex has none.
fn eccentricity_of(graph: &Graph, id: VertexId) -> Option<u32> {
    bfs_distances(graph, id)
        .into_iter()
        .try_fold(0u32, |max, d| d.map(|d| max.max(d)))
}

/// Eccentricity of a single vertex.
///
/// Returns None if the label is unknown or the vertex cannot reach the whole
/// graph. Such a vertex is not scored over its reachable part; it has no
/// eccentricity at all.
pub fn eccentricity(graph: &Graph, label: &str) -> Option<u32> {
    let id = graph.vertex_id(label)?;
    eccentricity_of(graph, id)
}

/// Every vertex that reaches the whole graph, with its eccentricity.
///
/// Runs one BFS per vertex: O(V·(V+E)). Results are in key order.
pub fn eccentricities(graph: &Graph) -> Vec<(String, u32)> {
    graph
        .vertices()
        .filter_map(|id| eccentricity_of(graph, id).map(|e| (graph.label(id).to_string(), e)))
        .collect()
}

/// Graph centers: the eligible vertices of minimum eccentricity.
///
/// Empty if the graph is empty or no vertex reaches every other vertex
/// (e.g. two vertices with no link between them).
pub fn centers(graph: &Graph) -> Vec<String> {
    let scored = eccentricities(graph);

    let Some(radius) = scored.iter().map(|(_, e)| *e).min() else {
        debug!(vertices = graph.vertex_count(), "no vertex reaches the whole graph");
        return Vec::new();
    };

    let centers: Vec<String> = scored
        .into_iter()
        .filter(|(_, e)| *e == radius)
        .map(|(label, _)| label)
        .collect();

    debug!(
        vertices = graph.vertex_count(),
        radius,
        centers = centers.len(),
        "centers computed"
    );
    centers
}
