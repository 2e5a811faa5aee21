use std::collections::{BTreeSet, HashMap};

/// Dense vertex identifier, assigned in first-seen order.
pub type VertexId = u32;

/// In-memory link graph: forward and reverse adjacency + label interning.
///
/// Edges are stored bidirectionally: `outgoing[a]` contains the targets of
/// links from a, `incoming[b]` contains the sources of links into b. Both are
/// populated by [`Graph::add_edge`], so the two maps always share the same
/// vertex set and mirror each other edge for edge.
///
/// Labels are opaque: no trimming or case folding is applied.
#[derive(Debug, Clone)]
pub struct Graph {
    outgoing: Vec<BTreeSet<VertexId>>,
    incoming: Vec<BTreeSet<VertexId>>,
    labels: Vec<String>,
    index: HashMap<String, VertexId>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            outgoing: Vec::new(),
            incoming: Vec::new(),
            labels: Vec::new(),
            index: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Pre-allocate the per-vertex tables for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            outgoing: Vec::with_capacity(vertex_count),
            incoming: Vec::with_capacity(vertex_count),
            labels: Vec::with_capacity(vertex_count),
            index: HashMap::with_capacity(vertex_count),
            edge_count: 0,
        }
    }

    /// Intern a vertex label, returning its compact ID.
    ///
    /// Registers empty forward and reverse adjacency sets for a new label.
    /// Calling this again with the same label is a no-op.
    pub fn add_vertex(&mut self, label: &str) -> VertexId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        assert!(
            self.labels.len() < VertexId::MAX as usize,
            "vertex count exceeded maximum of {}",
            VertexId::MAX
        );
        let id = self.labels.len() as VertexId;
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        self.outgoing.push(BTreeSet::new());
        self.incoming.push(BTreeSet::new());
        id
    }

    /// Add a directed link. Also inserts into the reverse adjacency.
    ///
    /// Unknown labels become vertices. Repeating an existing link changes nothing.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from_id = self.add_vertex(from);
        let to_id = self.add_vertex(to);
        let inserted = self.outgoing[from_id as usize].insert(to_id);
        let mirrored = self.incoming[to_id as usize].insert(from_id);
        assert_eq!(
            inserted, mirrored,
            "reverse adjacency out of sync for {} -> {}",
            from, to
        );
        if inserted {
            self.edge_count += 1;
        }
    }

    /// Bulk load from an iterator of `(from, to)` label pairs.
    pub fn load_edges<I, S>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        for (from, to) in edges {
            self.add_edge(from.as_ref(), to.as_ref());
        }
    }

    /// Look up a vertex by label.
    pub fn vertex_id(&self, label: &str) -> Option<VertexId> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Resolve a VertexId back to its label.
    ///
    /// Panics if `id` was not issued by this graph.
    pub fn label(&self, id: VertexId) -> &str {
        &self.labels[id as usize]
    }

    /// Out-neighbors of a vertex, in ascending id order.
    pub fn neighbors_out(&self, id: VertexId) -> &BTreeSet<VertexId> {
        &self.outgoing[id as usize]
    }

    /// In-neighbors of a vertex, in ascending id order.
    pub fn neighbors_in(&self, id: VertexId) -> &BTreeSet<VertexId> {
        &self.incoming[id as usize]
    }

    pub fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.outgoing
            .get(from as usize)
            .is_some_and(|targets| targets.contains(&to))
    }

    /// All vertex ids in key (first-insertion) order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.labels.len()).map(|i| i as VertexId)
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        // B-tree nodes and hash buckets carry overhead beyond the payload;
        // the per-entry constants are rough estimates.
        let label_mem: usize = self.labels.iter().map(|l| l.capacity() + size_of::<String>()).sum();
        let index_mem = self.index.len() * (size_of::<String>() + size_of::<VertexId>() + 48);
        let set_mem = self.labels.len() * 2 * size_of::<BTreeSet<VertexId>>();
        let edge_mem = self.edge_count * 2 * (size_of::<VertexId>() + 8);

        label_mem + index_mem + set_mem + edge_mem
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mirrored(g: &Graph) {
        assert_eq!(g.outgoing.len(), g.incoming.len());
        for u in g.vertices() {
            for &v in g.neighbors_out(u) {
                assert!(g.neighbors_in(v).contains(&u), "{} -> {} not mirrored", u, v);
            }
            for &w in g.neighbors_in(u) {
                assert!(g.neighbors_out(w).contains(&u), "{} <- {} not mirrored", u, w);
            }
        }
    }

    #[test]
    fn test_add_edge_creates_both_vertices() {
        let mut g = Graph::new();
        g.add_edge("A", "B");
        assert_eq!(g.vertex_count(), 2);
        assert!(g.contains("A"));
        assert!(g.contains("B"));
        let a = g.vertex_id("A").unwrap();
        let b = g.vertex_id("B").unwrap();
        assert!(g.has_edge(a, b));
        assert!(!g.has_edge(b, a));
        assert!(g.neighbors_out(b).is_empty());
        assert!(g.neighbors_in(a).is_empty());
        assert_mirrored(&g);
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut g = Graph::new();
        g.add_edge("A", "B");
        g.add_edge("A", "B");
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors_out(0).len(), 1);
        assert_eq!(g.neighbors_in(1).len(), 1);
    }

    #[test]
    fn test_self_loop() {
        let mut g = Graph::new();
        g.add_edge("A", "A");
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(0, 0));
        assert_mirrored(&g);
    }

    #[test]
    fn test_labels_are_opaque() {
        let mut g = Graph::new();
        g.add_edge("/wiki/Rust", "/wiki/rust");
        g.add_edge("/wiki/Rust/", "/wiki/Rust");
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.vertex_id("/wiki/Rust"), Some(0));
        assert_eq!(g.vertex_id("/wiki/rust"), Some(1));
        assert_eq!(g.vertex_id("/wiki/Rust/"), Some(2));
        assert_eq!(g.label(2), "/wiki/Rust/");
    }

    #[test]
    fn test_add_vertex_isolated() {
        let mut g = Graph::new();
        let a = g.add_vertex("A");
        assert_eq!(g.add_vertex("A"), a);
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors_out(a).is_empty());
        assert!(g.neighbors_in(a).is_empty());
    }

    #[test]
    fn test_load_edges_counts() {
        let mut g = Graph::new();
        g.load_edges(vec![("A", "B"), ("B", "C"), ("C", "A"), ("A", "B")]);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_mirrored(&g);
    }

    #[test]
    fn test_has_edge_unknown_id() {
        let g = Graph::new();
        assert!(!g.has_edge(7, 8));
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let mut g = Graph::new();
        assert!(g.is_empty());
        g.load_edges((0..100).map(|i| ("hub".to_string(), format!("leaf{}", i))));
        assert!(g.memory_usage() > 0);
    }

    #[test]
    fn test_with_capacity_starts_empty() {
        let mut g = Graph::with_capacity(16);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        g.add_edge("A", "B");
        assert_eq!(g.vertex_count(), 2);
    }
}
