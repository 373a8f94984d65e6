//! wayfinder-core: In-memory weighted graph and shortest path engine.
//!
//! A pure Rust library that keeps a directed, non-negatively weighted
//! adjacency list and answers single-source shortest path queries with
//! Dijkstra's algorithm. A run returns a self-contained [`ShortestPaths`]
//! holding both distances and predecessors, from which individual paths are
//! reconstructed on demand.
//!
//! No I/O here: the interactive shell and the benchmark harness live in
//! sibling crates.

mod dijkstra;
mod error;
mod graph;
mod path;

pub use dijkstra::{dijkstra, Distance, DistanceMap, RunStats, ShortestPaths, StartPolicy};
pub use error::{GraphError, QueryError};
pub use graph::{Edge, Graph, LoadReport, VertexId, Weight};
pub use path::{Path, PathOutcome, PathStep};
