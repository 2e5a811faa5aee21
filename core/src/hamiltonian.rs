//! Held–Karp search for a Hamiltonian path.
//!
//! `cost(v, mask)` is the fewest links needed to visit exactly the vertex
//! subset `mask`, ending at `v`. Vertex ids double as bit positions. The
//! table is rebuilt on every call.
//!
//! INFEASIBLE never takes part in a transition (nothing is added to it), so
//! a state is finite only if a simple path through exactly `mask` ends at
//! `v`, and its cost is then `popcount(mask) - 1`. A finite cost at the full
//! mask is therefore a Hamiltonian path with n - 1 links.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};

/// Marker for a (vertex, subset) state no path reaches.
const INFEASIBLE: u32 = u32::MAX;

/// Widest subset a `u64` mask can hold while `1 << n` stays representable.
pub const MAX_MASK_BITS: usize = 63;

/// Largest vertex count allowed a dense table (24 × 2²⁴ costs, about 1.6 GB).
pub const MAX_DENSE_LIMIT: usize = 24;

/// Table sizing for [`hamiltonian_path_with`].
///
/// The sparse table holds one entry per reachable (vertex, subset) state. On
/// a densely linked graph that approaches `n × 2ⁿ⁻¹` entries, so at the
/// default ceiling of 32 a near-complete graph can need hundreds of GB. Lower
/// `max_vertices` to bound memory; graphs above it fail fast with
/// [`GraphError::TooManyVertices`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HamiltonianConfig {
    /// Largest vertex count that gets a dense `n × 2ⁿ` table.
    pub dense_limit: usize,
    /// Largest vertex count searched at all. Above `dense_limit` a sparse
    /// table holding only reachable states is used.
    pub max_vertices: usize,
}

impl Default for HamiltonianConfig {
    fn default() -> Self {
        Self {
            dense_limit: 20,
            max_vertices: 32,
        }
    }
}

impl HamiltonianConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_vertices > MAX_MASK_BITS {
            return Err(GraphError::InvalidConfig(format!(
                "max_vertices {} exceeds the {}-bit subset mask",
                self.max_vertices, MAX_MASK_BITS
            )));
        }
        if self.dense_limit > MAX_DENSE_LIMIT {
            return Err(GraphError::InvalidConfig(format!(
                "dense_limit {} exceeds {}",
                self.dense_limit, MAX_DENSE_LIMIT
            )));
        }
        if self.dense_limit > self.max_vertices {
            return Err(GraphError::InvalidConfig(format!(
                "dense_limit {} exceeds max_vertices {}",
                self.dense_limit, self.max_vertices
            )));
        }
        Ok(())
    }
}

#[inline]
fn bit(v: VertexId) -> u64 {
    1u64 << v
}

/// Read access to a filled cost table.
trait CostTable {
    fn cost(&self, v: VertexId, mask: u64) -> u32;
}

/// Flat `n × 2ⁿ` table, indexed `[mask][v]`.
struct DenseTable {
    n: usize,
    costs: Vec<u32>,
}

impl DenseTable {
    /// Fill masks in increasing numeric order. `mask \ {v}` is numerically
    /// smaller than `mask`, so it is final before it is read.
    fn build(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        let mut table = Self {
            n,
            costs: vec![INFEASIBLE; n << n],
        };

        for v in graph.vertices() {
            table.set(v, bit(v), 0);
        }

        let full = (1u64 << n) - 1;
        for mask in 1..=full {
            for v in graph.vertices() {
                let prev = mask & !bit(v);
                if prev == mask || prev == 0 {
                    continue;
                }
                // Only in-neighbors can precede v; ascending id order.
                let best = graph
                    .neighbors_in(v)
                    .iter()
                    .filter(|&&u| prev & bit(u) != 0)
                    .map(|&u| table.cost(u, prev))
                    .filter(|&c| c != INFEASIBLE)
                    .map(|c| c + 1)
                    .min();
                if let Some(best) = best {
                    if best < table.cost(v, mask) {
                        table.set(v, mask, best);
                    }
                }
            }
        }

        table
    }

    fn set(&mut self, v: VertexId, mask: u64, cost: u32) {
        self.costs[mask as usize * self.n + v as usize] = cost;
    }
}

impl CostTable for DenseTable {
    fn cost(&self, v: VertexId, mask: u64) -> u32 {
        self.costs[mask as usize * self.n + v as usize]
    }
}

/// Map from (vertex, subset) to cost, holding feasible states only.
struct SparseTable {
    costs: HashMap<(VertexId, u64), u32>,
}

impl SparseTable {
    /// Expand feasible states one subset size at a time. Every state of size
    /// k+1 is derived from states of size k, which are complete by then, so
    /// this yields exactly the finite entries of the dense table.
    fn build(graph: &Graph) -> Self {
        let mut costs: HashMap<(VertexId, u64), u32> = HashMap::new();
        let mut frontier: Vec<(VertexId, u64)> = Vec::new();

        for v in graph.vertices() {
            costs.insert((v, bit(v)), 0);
            frontier.push((v, bit(v)));
        }

        while !frontier.is_empty() {
            let mut next_frontier = Vec::new();
            for (u, mask) in frontier {
                let cost = costs[&(u, mask)] + 1;
                for &v in graph.neighbors_out(u) {
                    if mask & bit(v) != 0 {
                        continue;
                    }
                    let key = (v, mask | bit(v));
                    match costs.get_mut(&key) {
                        Some(existing) => *existing = (*existing).min(cost),
                        None => {
                            costs.insert(key, cost);
                            next_frontier.push(key);
                        }
                    }
                }
            }
            frontier = next_frontier;
        }

        Self { costs }
    }
}

impl CostTable for SparseTable {
    fn cost(&self, v: VertexId, mask: u64) -> u32 {
        self.costs.get(&(v, mask)).copied().unwrap_or(INFEASIBLE)
    }
}

/// Hamiltonian path with the default [`HamiltonianConfig`].
pub fn hamiltonian_path(graph: &Graph) -> Result<Vec<String>> {
    hamiltonian_path_with(graph, &HamiltonianConfig::default())
}

/// Find a path that visits every vertex exactly once, following link direction.
///
/// Returns an empty sequence when no such path exists (and for the empty
/// graph). Among several valid end vertices the lowest id wins, and each
/// predecessor is the lowest-id candidate, so the answer is deterministic.
///
/// Cost is O(n²·2ⁿ); graphs above `config.max_vertices` are rejected.
pub fn hamiltonian_path_with(graph: &Graph, config: &HamiltonianConfig) -> Result<Vec<String>> {
    config.validate()?;

    let n = graph.vertex_count();
    if n == 0 {
        return Ok(Vec::new());
    }
    if n > config.max_vertices {
        return Err(GraphError::TooManyVertices {
            vertices: n,
            limit: config.max_vertices,
        });
    }

    let path = if n <= config.dense_limit {
        debug!(vertices = n, "hamiltonian search with dense table");
        select_path(graph, &DenseTable::build(graph))
    } else {
        warn!(
            vertices = n,
            dense_limit = config.dense_limit,
            "hamiltonian search falling back to sparse table"
        );
        select_path(graph, &SparseTable::build(graph))
    };

    debug!(vertices = n, found = !path.is_empty(), "hamiltonian search done");
    Ok(path
        .into_iter()
        .map(|id| graph.label(id).to_string())
        .collect())
}

/// Pick the end vertex with the smallest full-mask cost and walk back.
fn select_path<T: CostTable>(graph: &Graph, table: &T) -> Vec<VertexId> {
    let n = graph.vertex_count();
    let full = (1u64 << n) - 1;

    let mut best = INFEASIBLE;
    let mut end = None;
    for v in graph.vertices() {
        let cost = table.cost(v, full);
        if cost < best {
            best = cost;
            end = Some(v);
        }
    }

    let Some(end) = end else {
        return Vec::new();
    };
    debug_assert_eq!(best as usize, n - 1, "full-mask cost must be n - 1");

    reconstruct(graph, table, end, full)
}

/// Walk predecessors back from `end` over the full mask.
///
/// Panics if a finite state has no consistent predecessor: the table was
/// built wrong, which no input can cause.
fn reconstruct<T: CostTable>(graph: &Graph, table: &T, mut end: VertexId, full: u64) -> Vec<VertexId> {
    let n = graph.vertex_count();
    let mut path: Vec<VertexId> = vec![0; n];
    let mut mask = full;

    for slot in (0..n).rev() {
        path[slot] = end;
        let prev = mask & !bit(end);
        if prev == 0 {
            break;
        }

        let cost = table.cost(end, mask);
        let pred = graph
            .neighbors_in(end)
            .iter()
            .copied()
            .find(|&u| {
                prev & bit(u) != 0 && {
                    let c = table.cost(u, prev);
                    c != INFEASIBLE && c + 1 == cost
                }
            })
            .unwrap_or_else(|| {
                panic!(
                    "hamiltonian table inconsistent: no predecessor for vertex {} in mask {:#b}",
                    end, mask
                )
            });

        end = pred;
        mask = prev;
    }

    path
}
