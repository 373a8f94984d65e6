use std::collections::HashMap;

use tracing::debug;

use crate::error::GraphError;

/// Interned vertex identifier. Dense, assigned in registration order.
pub type VertexId = u32;

/// Edge weight. Unsigned, so a stored edge can never be negative.
pub type Weight = u64;

/// A directed, weighted edge in an adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: VertexId,
    pub weight: Weight,
}

/// Outcome of a bulk load. Rejected edges are skipped, not fatal.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    /// (position in the input, reason) for every skipped edge.
    pub rejected: Vec<(usize, GraphError)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// In-memory directed graph: interned vertex names + outgoing adjacency lists.
///
/// Every vertex that appears as either endpoint of an edge gets an id and an
/// adjacency slot, so destinations without outgoing edges are still known.
#[derive(Debug)]
pub struct Graph {
    names: Vec<String>,
    index: HashMap<String, VertexId>,
    outgoing: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            index: HashMap::new(),
            outgoing: Vec::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            names: Vec::with_capacity(vertex_count),
            index: HashMap::with_capacity(vertex_count),
            outgoing: Vec::with_capacity(vertex_count),
        }
    }

    /// Register a vertex (no-op if already known), returning its id.
    pub fn add_vertex(&mut self, name: &str) -> VertexId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len() as VertexId;
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.outgoing.push(Vec::new());
        id
    }

    /// Add a directed edge. Parallel edges are kept, never merged.
    ///
    /// Negative weights are rejected before either endpoint is registered.
    pub fn add_edge(&mut self, source: &str, destination: &str, weight: i64) -> Result<(), GraphError> {
        let weight = Weight::try_from(weight).map_err(|_| GraphError::InvalidWeight {
            from: source.to_string(),
            to: destination.to_string(),
            weight,
        })?;
        let from = self.add_vertex(source);
        let to = self.add_vertex(destination);
        self.outgoing[from as usize].push(Edge { target: to, weight });
        Ok(())
    }

    /// Add a directed edge between already-registered vertices.
    ///
    /// Both ids must come from [`Graph::add_vertex`]; otherwise the edge is
    /// rejected with `UnknownVertexId` and nothing is stored.
    pub fn add_edge_by_id(&mut self, from: VertexId, to: VertexId, weight: Weight) -> Result<(), GraphError> {
        let registered = self.names.len();
        if let Some(missing) = [from, to].into_iter().find(|&id| id as usize >= registered) {
            return Err(GraphError::UnknownVertexId { from, to, missing });
        }
        self.outgoing[from as usize].push(Edge { target: to, weight });
        Ok(())
    }

    /// Bulk load from (source, destination, weight) triples.
    pub fn load_edges<I, S>(&mut self, edges: I) -> LoadReport
    where
        I: IntoIterator<Item = (S, S, i64)>,
        S: AsRef<str>,
    {
        let mut report = LoadReport::default();
        for (pos, (source, destination, weight)) in edges.into_iter().enumerate() {
            let (source, destination) = (source.as_ref(), destination.as_ref());
            match self.add_edge(source, destination, weight) {
                Ok(()) => {
                    debug!(%source, %destination, weight, "loaded edge");
                    report.loaded += 1;
                }
                Err(e) => report.rejected.push((pos, e)),
            }
        }
        report
    }

    /// Bulk load from textual triples, parsing the weight column.
    ///
    /// Mirrors the way edges arrive from a terminal or a literal table.
    pub fn load_edge_strings<I, S>(&mut self, edges: I) -> LoadReport
    where
        I: IntoIterator<Item = [S; 3]>,
        S: AsRef<str>,
    {
        let mut report = LoadReport::default();
        for (pos, [source, destination, raw]) in edges.into_iter().enumerate() {
            let (source, destination, raw) = (source.as_ref(), destination.as_ref(), raw.as_ref().trim());
            let result = raw
                .parse::<i64>()
                .map_err(|_| GraphError::MalformedWeight {
                    from: source.to_string(),
                    to: destination.to_string(),
                    raw: raw.to_string(),
                })
                .and_then(|weight| self.add_edge(source, destination, weight));
            match result {
                Ok(()) => {
                    debug!(%source, %destination, weight = raw, "loaded edge");
                    report.loaded += 1;
                }
                Err(e) => report.rejected.push((pos, e)),
            }
        }
        report
    }

    /// Look up a vertex id by name.
    pub fn resolve(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Resolve a VertexId back to its name.
    pub fn vertex_name(&self, id: VertexId) -> Option<&str> {
        self.names.get(id as usize).map(|s| s.as_str())
    }

    /// Outgoing edges of a vertex, in insertion order. Empty for unknown names.
    pub fn neighbors(&self, name: &str) -> &[Edge] {
        self.resolve(name).map(|id| self.neighbors_by_id(id)).unwrap_or(&[])
    }

    pub fn neighbors_by_id(&self, id: VertexId) -> &[Edge] {
        self.outgoing.get(id as usize).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// All known vertex names, in registration order.
    pub fn known_vertices(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(|v| v.len()).sum()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let name_bytes: usize = self.names.iter().map(|n| n.capacity() * 2).sum();
        let index_mem = self.index.len() * (size_of::<String>() + size_of::<VertexId>() + 16);
        let edges: usize = self.outgoing.iter().map(|v| v.capacity() * size_of::<Edge>()).sum();
        let lists = self.outgoing.len() * size_of::<Vec<Edge>>();

        name_bytes + self.names.len() * size_of::<String>() + index_mem + edges + lists
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
