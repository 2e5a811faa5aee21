//! linkgraph-core: In-memory link graph analysis engine.
//!
//! A pure Rust library that keeps a directed graph of string-labelled pages
//! (plus its reverse) and answers structural queries over it: shortest path
//! length, graph centers, strongly connected components and Hamiltonian
//! paths. Every query recomputes from the current graph; nothing is cached.
//!
//! The graph is a single owned [`Graph`] value. Queries borrow it shared,
//! insertion borrows it mutably, so there is no internal locking.

mod centers;
mod components;
mod error;
mod graph;
mod hamiltonian;
mod traversal;

pub use centers::{centers, eccentricities, eccentricity};
pub use components::{component_count, strongly_connected_components};
pub use error::{GraphError, Result};
pub use graph::{Graph, VertexId};
pub use hamiltonian::{
    hamiltonian_path, hamiltonian_path_with, HamiltonianConfig, MAX_DENSE_LIMIT, MAX_MASK_BITS,
};
pub use traversal::{
    bfs_distances, path_between, shortest_path, shortest_path_or_sentinel, NO_PATH,
};
