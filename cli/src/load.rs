use std::time::Instant;

use tracing::{info, warn};
use wayfinder_core::Graph;

use crate::config::Args;
use crate::util::split_edge_spec;

/// Build the graph from `--edge` specs, or from the chosen sample when none are given.
///
/// Bad edges are logged and skipped; the rest of the load goes through.
pub fn build_graph(args: &Args) -> Graph {
    let start = Instant::now();
    let mut graph = Graph::new();

    let report = if args.edges.is_empty() {
        graph.load_edge_strings(args.sample.edges())
    } else {
        let mut triples = Vec::with_capacity(args.edges.len());
        for spec in &args.edges {
            match split_edge_spec(spec) {
                Some(triple) => triples.push(triple),
                None => warn!(spec = %spec, "skipping edge: expected SRC:DST:WEIGHT"),
            }
        }
        graph.load_edge_strings(triples)
    };

    for (_, err) in &report.rejected {
        warn!("skipping edge: {err}");
    }

    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        rejected = report.rejected.len(),
        load_ms = start.elapsed().as_secs_f64() * 1000.0,
        "graph loaded"
    );
    graph
}
