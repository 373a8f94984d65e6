use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::{debug, trace, warn};

use crate::error::QueryError;
use crate::graph::{Graph, VertexId, Weight};

/// How [`dijkstra`] treats a start vertex that the graph has never seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartPolicy {
    /// Run from a detached singleton: distance 0 to itself, everything else unreachable.
    #[default]
    Lenient,
    /// Fail with [`QueryError::UnknownStartVertex`].
    Strict,
}

/// Shortest distance from the start vertex.
///
/// Ordered so that `Unreachable` sorts after every reached distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Reached(Weight),
    Unreachable,
}

impl Distance {
    pub fn value(self) -> Option<Weight> {
        match self {
            Distance::Reached(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Reached(_))
    }
}

impl From<Option<Weight>> for Distance {
    fn from(d: Option<Weight>) -> Self {
        d.map_or(Distance::Unreachable, Distance::Reached)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Reached(d) => write!(f, "{d}"),
            Distance::Unreachable => f.write_str("unreachable"),
        }
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Distance::Reached(d) => serializer.serialize_u64(*d),
            Distance::Unreachable => serializer.serialize_str("unreachable"),
        }
    }
}

/// Vertex name -> distance for every known vertex, keyed for lookup.
///
/// Keys sort as text ("10" before "2"); use
/// [`ShortestPaths::iter_distances`] for the graph's own vertex order.
pub type DistanceMap = BTreeMap<String, Distance>;

/// Counters from a single engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Vertices whose distance was proven minimal.
    pub finalized: usize,
    /// Successful relaxations (each one pushed a frontier entry).
    pub relaxations: usize,
    /// Frontier entries discarded as outdated or already finalized.
    pub stale_skipped: usize,
}

/// What a queried vertex name refers to within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Vertex(VertexId),
    /// Start vertex unknown to the graph, accepted under [`StartPolicy::Lenient`].
    DetachedStart,
}

/// Result of one engine run: distances and predecessors from a single start.
///
/// Borrows the graph, so the graph cannot change while the result is alive and
/// paths are always reconstructed against the run that produced them.
#[derive(Debug)]
pub struct ShortestPaths<'g> {
    pub(crate) graph: &'g Graph,
    pub(crate) start: String,
    pub(crate) start_id: Option<VertexId>,
    pub(crate) best: Vec<Option<Weight>>,
    /// Predecessor vertex and the weight of the edge taken from it.
    pub(crate) pred: Vec<Option<(VertexId, Weight)>>,
    pub(crate) stats: RunStats,
}

/// Single-source shortest paths from `start` (Dijkstra, binary heap, lazy deletion).
///
/// The frontier may hold several entries for one vertex; an entry whose
/// distance is worse than the best known one, or whose vertex is already
/// finalized, is skipped when popped. Relaxation never touches a finalized
/// vertex, and a sum that would overflow `Weight` is never recorded.
pub fn dijkstra<'g>(
    graph: &'g Graph,
    start: &str,
    policy: StartPolicy,
) -> Result<ShortestPaths<'g>, QueryError> {
    let n = graph.vertex_count();
    let mut best: Vec<Option<Weight>> = vec![None; n];
    let mut pred: Vec<Option<(VertexId, Weight)>> = vec![None; n];
    let mut stats = RunStats::default();

    let start_id = match (graph.resolve(start), policy) {
        (Some(id), _) => Some(id),
        (None, StartPolicy::Strict) => return Err(QueryError::UnknownStartVertex(start.to_string())),
        (None, StartPolicy::Lenient) => {
            debug!(start, "start vertex not in graph; treating as detached singleton");
            None
        }
    };

    if let Some(source) = start_id {
        debug!(start, vertices = n, "running dijkstra");

        let mut finalized = vec![false; n];
        let mut frontier: BinaryHeap<Reverse<(Weight, VertexId)>> = BinaryHeap::new();
        best[source as usize] = Some(0);
        frontier.push(Reverse((0, source)));

        while let Some(Reverse((dist, current))) = frontier.pop() {
            let ci = current as usize;
            if finalized[ci] || best[ci].is_some_and(|b| dist > b) {
                stats.stale_skipped += 1;
                continue;
            }
            finalized[ci] = true;
            stats.finalized += 1;
            debug!(vertex = graph.vertex_name(current), distance = dist, "finalized");

            for edge in graph.neighbors_by_id(current) {
                let ti = edge.target as usize;
                if finalized[ti] {
                    continue;
                }
                let Some(candidate) = dist.checked_add(edge.weight) else {
                    warn!(
                        from = graph.vertex_name(current),
                        to = graph.vertex_name(edge.target),
                        "distance overflow; edge ignored"
                    );
                    continue;
                };
                if best[ti].map_or(true, |known| candidate < known) {
                    best[ti] = Some(candidate);
                    pred[ti] = Some((current, edge.weight));
                    frontier.push(Reverse((candidate, edge.target)));
                    stats.relaxations += 1;
                    trace!(
                        vertex = graph.vertex_name(edge.target),
                        distance = candidate,
                        via = graph.vertex_name(current),
                        "relaxed"
                    );
                }
            }
        }

        debug!(
            finalized = stats.finalized,
            relaxations = stats.relaxations,
            stale = stats.stale_skipped,
            "dijkstra done"
        );
    }

    Ok(ShortestPaths {
        graph,
        start: start.to_string(),
        start_id,
        best,
        pred,
        stats,
    })
}

impl<'g> ShortestPaths<'g> {
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub(crate) fn locate(&self, name: &str) -> Result<Slot, QueryError> {
        match self.graph.resolve(name) {
            Some(id) => Ok(Slot::Vertex(id)),
            None if self.start_id.is_none() && name == self.start => Ok(Slot::DetachedStart),
            None => Err(QueryError::UnknownVertex(name.to_string())),
        }
    }

    /// Distance from the start to `name`.
    pub fn distance(&self, name: &str) -> Result<Distance, QueryError> {
        Ok(match self.locate(name)? {
            Slot::Vertex(id) => self.best[id as usize].into(),
            Slot::DetachedStart => Distance::Reached(0),
        })
    }

    /// Vertex immediately before `name` on its shortest path.
    ///
    /// `None` for the start vertex and for unreachable vertices.
    pub fn predecessor(&self, name: &str) -> Result<Option<&'g str>, QueryError> {
        Ok(match self.locate(name)? {
            Slot::Vertex(id) => self.pred[id as usize].and_then(|(p, _)| self.graph.vertex_name(p)),
            Slot::DetachedStart => None,
        })
    }

    /// Distances for every known vertex (plus a detached start, if any).
    pub fn distances(&self) -> DistanceMap {
        let mut map: DistanceMap = self
            .graph
            .known_vertices()
            .zip(&self.best)
            .map(|(name, &d)| (name.to_string(), d.into()))
            .collect();
        if self.start_id.is_none() {
            map.insert(self.start.clone(), Distance::Reached(0));
        }
        map
    }

    /// Distances in vertex registration order, a detached start first.
    pub fn iter_distances(&self) -> impl Iterator<Item = (&str, Distance)> + '_ {
        let detached = self
            .start_id
            .is_none()
            .then(|| (self.start.as_str(), Distance::Reached(0)));
        detached.into_iter().chain(
            self.graph
                .known_vertices()
                .zip(&self.best)
                .map(|(name, &d)| (name, d.into())),
        )
    }

    /// Number of vertices with a finite distance, the start included.
    pub fn reachable_count(&self) -> usize {
        let detached = usize::from(self.start_id.is_none());
        self.best.iter().filter(|d| d.is_some()).count() + detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_chain(n: usize, weight: i64) -> Graph {
        let mut g = Graph::new();
        for i in 0..n - 1 {
            g.add_edge(&format!("v{i}"), &format!("v{}", i + 1), weight).unwrap();
        }
        g
    }

    fn make_cycle(n: usize) -> Graph {
        let mut g = Graph::new();
        for i in 0..n {
            g.add_edge(&format!("v{i}"), &format!("v{}", (i + 1) % n), 1).unwrap();
        }
        g
    }

    /// Six vertices, every edge present in both directions.
    fn make_hexagon() -> Graph {
        let mut g = Graph::new();
        for (a, b, w) in [
            ("1", "2", 2),
            ("1", "3", 4),
            ("2", "4", 7),
            ("2", "5", 1),
            ("3", "6", 3),
            ("5", "6", 1),
            ("6", "4", 2),
            ("4", "1", 5),
        ] {
            g.add_edge(a, b, w).unwrap();
            g.add_edge(b, a, w).unwrap();
        }
        g
    }

    fn run<'g>(g: &'g Graph, start: &str) -> ShortestPaths<'g> {
        dijkstra(g, start, StartPolicy::Lenient).unwrap()
    }

    #[test]
    fn test_start_distance_zero() {
        let g = make_hexagon();
        for v in ["1", "2", "3", "4", "5", "6"] {
            assert_eq!(run(&g, v).distance(v), Ok(Distance::Reached(0)));
        }
    }

    #[test]
    fn test_hexagon_distances() {
        let g = make_hexagon();
        let sp = run(&g, "1");
        let d = sp.distances();
        let expected = [("1", 0), ("2", 2), ("3", 4), ("4", 5), ("5", 3), ("6", 4)];
        for (v, dist) in expected {
            assert_eq!(d[v], Distance::Reached(dist), "vertex {v}");
        }
        assert_eq!(sp.reachable_count(), 6);
        assert_eq!(sp.predecessor("5"), Ok(Some("2")));
        assert_eq!(sp.predecessor("6"), Ok(Some("5")));
        assert_eq!(sp.predecessor("1"), Ok(None));
    }

    #[test]
    fn test_chain_distances() {
        let g = make_chain(6, 3);
        let sp = run(&g, "v0");
        assert_eq!(sp.distance("v5"), Ok(Distance::Reached(15)));
        assert_eq!(sp.stats().finalized, 6);
    }

    #[test]
    fn test_directed_edges_not_followed_backwards() {
        let g = make_chain(4, 1);
        let sp = run(&g, "v2");
        assert_eq!(sp.distance("v3"), Ok(Distance::Reached(1)));
        assert_eq!(sp.distance("v0"), Ok(Distance::Unreachable));
        assert_eq!(sp.predecessor("v0"), Ok(None));
        assert_eq!(sp.reachable_count(), 2);
    }

    #[test]
    fn test_cycle_terminates() {
        let g = make_cycle(5);
        let sp = run(&g, "v0");
        assert_eq!(sp.distance("v4"), Ok(Distance::Reached(4)));
        assert_eq!(sp.stats().finalized, 5);
    }

    #[test]
    fn test_stale_entries_skipped() {
        // a->c is relaxed to 10 first, then improved to 2 via b.
        let mut g = Graph::new();
        g.add_edge("a", "c", 10).unwrap();
        g.add_edge("a", "b", 1).unwrap();
        g.add_edge("b", "c", 1).unwrap();
        let sp = run(&g, "a");
        assert_eq!(sp.distance("c"), Ok(Distance::Reached(2)));
        assert_eq!(sp.predecessor("c"), Ok(Some("b")));
        assert_eq!(sp.stats().relaxations, 3);
        assert_eq!(sp.stats().stale_skipped, 1);
    }

    #[test]
    fn test_parallel_edges_cheapest_wins() {
        let mut g = Graph::new();
        g.add_edge("a", "b", 9).unwrap();
        g.add_edge("a", "b", 4).unwrap();
        g.add_edge("a", "b", 6).unwrap();
        assert_eq!(run(&g, "a").distance("b"), Ok(Distance::Reached(4)));
    }

    #[test]
    fn test_self_loop_ignored() {
        let mut g = Graph::new();
        g.add_edge("a", "a", 1).unwrap();
        g.add_edge("a", "b", 2).unwrap();
        let sp = run(&g, "a");
        assert_eq!(sp.distance("a"), Ok(Distance::Reached(0)));
        assert_eq!(sp.distance("b"), Ok(Distance::Reached(2)));
    }

    #[test]
    fn test_zero_weight_edges() {
        let mut g = Graph::new();
        g.add_edge("a", "b", 0).unwrap();
        g.add_edge("b", "c", 0).unwrap();
        g.add_edge("a", "c", 1).unwrap();
        assert_eq!(run(&g, "a").distance("c"), Ok(Distance::Reached(0)));
    }

    #[test]
    fn test_overflow_guarded() {
        let mut g = Graph::new();
        let a = g.add_vertex("a");
        let b = g.add_vertex("b");
        let c = g.add_vertex("c");
        g.add_edge_by_id(a, b, Weight::MAX).unwrap();
        g.add_edge_by_id(b, c, 1).unwrap();
        let sp = run(&g, "a");
        assert_eq!(sp.distance("b"), Ok(Distance::Reached(Weight::MAX)));
        assert_eq!(sp.distance("c"), Ok(Distance::Unreachable));
    }

    #[test]
    fn test_rejected_id_edge_leaves_run_intact() {
        let mut g = Graph::new();
        let a = g.add_vertex("a");
        assert!(g.add_edge_by_id(a, 5, 1).is_err());
        let sp = dijkstra(&g, "a", StartPolicy::Strict).unwrap();
        assert_eq!(sp.distance("a"), Ok(Distance::Reached(0)));
        assert_eq!(sp.stats().finalized, 1);
    }

    #[test]
    fn test_single_vertex_graph() {
        let mut g = Graph::new();
        g.add_vertex("solo");
        let sp = run(&g, "solo");
        assert_eq!(sp.distance("solo"), Ok(Distance::Reached(0)));
        assert_eq!(sp.distances().len(), 1);
    }

    #[test]
    fn test_unknown_start_lenient() {
        let g = make_chain(3, 1);
        let sp = run(&g, "ghost");
        assert_eq!(sp.start(), "ghost");
        assert_eq!(sp.distance("ghost"), Ok(Distance::Reached(0)));
        assert_eq!(sp.distance("v0"), Ok(Distance::Unreachable));
        assert_eq!(sp.reachable_count(), 1);
        let d = sp.distances();
        assert_eq!(d.len(), 4);
        assert_eq!(d["ghost"], Distance::Reached(0));
    }

    #[test]
    fn test_unknown_start_strict() {
        let g = make_chain(3, 1);
        let err = dijkstra(&g, "ghost", StartPolicy::Strict).unwrap_err();
        assert_eq!(err, QueryError::UnknownStartVertex("ghost".into()));
    }

    #[test]
    fn test_unknown_target() {
        let g = make_hexagon();
        let sp = run(&g, "1");
        assert_eq!(sp.distance("99"), Err(QueryError::UnknownVertex("99".into())));
        assert_eq!(sp.predecessor("99"), Err(QueryError::UnknownVertex("99".into())));
    }

    #[test]
    fn test_iter_distances_registration_order() {
        let mut g = Graph::new();
        g.add_edge("2", "10", 1).unwrap();
        g.add_edge("10", "3", 1).unwrap();
        let sp = run(&g, "2");
        let order: Vec<_> = sp.iter_distances().collect();
        assert_eq!(
            order,
            vec![
                ("2", Distance::Reached(0)),
                ("10", Distance::Reached(1)),
                ("3", Distance::Reached(2)),
            ]
        );
        // The lookup map sorts as text.
        assert_eq!(sp.distances().keys().next().map(String::as_str), Some("10"));
    }

    #[test]
    fn test_iter_distances_detached_start_first() {
        let g = make_chain(2, 1);
        let sp = run(&g, "ghost");
        let names: Vec<_> = sp.iter_distances().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["ghost", "v0", "v1"]);
    }

    #[test]
    fn test_rerun_idempotent() {
        let g = make_hexagon();
        assert_eq!(run(&g, "3").distances(), run(&g, "3").distances());
    }

    #[test]
    fn test_distance_ordering_and_display() {
        assert!(Distance::Reached(Weight::MAX) < Distance::Unreachable);
        assert_eq!(Distance::Reached(7).to_string(), "7");
        assert_eq!(Distance::Unreachable.to_string(), "unreachable");
        assert_eq!(Distance::from(None), Distance::Unreachable);
        assert_eq!(Distance::Reached(3).value(), Some(3));
    }

    #[test]
    fn test_distance_serializes() {
        let json = serde_json::to_string(&vec![Distance::Reached(4), Distance::Unreachable]).unwrap();
        assert_eq!(json, r#"[4,"unreachable"]"#);
    }
}
