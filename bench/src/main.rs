use std::time::Instant;

use wayfinder_core::{dijkstra, Graph, GraphError, PathOutcome, StartPolicy, Weight};

type Generator = fn(u32) -> Result<Graph, GraphError>;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: wayfinder-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        Ternary tree, edges point away from the root");
        println!("  smallworld  Ring lattice with random long-range shortcuts");
        println!("  random      Uniform random edges, ~8 per vertex");
        println!("  barbell     Two dense clusters joined by a thin weighted bridge");
        println!();
        println!("Default vertex_count: 1000000");
        return;
    }

    if vertex_count < 16 {
        eprintln!("vertex_count must be at least 16");
        return;
    }

    println!("wayfinder-bench");
    println!("===============");
    println!();

    let generators: Vec<(&str, Generator)> = match mode {
        "tree" => vec![("Ternary tree", gen_tree)],
        "smallworld" => vec![("Small-world ring", gen_small_world)],
        "random" => vec![("Uniform random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "all" => vec![
            ("Ternary tree", gen_tree as Generator),
            ("Small-world ring", gen_small_world),
            ("Uniform random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, vertex_count);
    }
}

fn run_benchmark(name: &str, generator: Generator, vertex_count: u32) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let graph = match generator(vertex_count) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("generator failed: {e}");
            return;
        }
    };
    println!(
        "Generated in {:.2}s: {} vertices, {} edges, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let t = Instant::now();
    let paths = match dijkstra(&graph, "v0", StartPolicy::Strict) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    let elapsed = t.elapsed();
    let stats = paths.stats();
    println!(
        "Dijkstra from v0: {} reached, {} relaxations, {} stale pops in {:.1}ms",
        paths.reachable_count(),
        stats.relaxations,
        stats.stale_skipped,
        elapsed.as_secs_f64() * 1000.0
    );

    let far = format!("v{}", graph.vertex_count() - 1);
    let t = Instant::now();
    let outcome = paths.path_to(&far);
    let elapsed = t.elapsed();
    match outcome {
        Ok(PathOutcome::Found(p)) => println!(
            "Path v0 → {}: {} hops, distance {} ({:.3}ms)",
            far,
            p.hops(),
            p.distance,
            elapsed.as_secs_f64() * 1000.0
        ),
        Ok(PathOutcome::Unreachable) => println!("Path v0 → {}: unreachable", far),
        Err(e) => println!("Path v0 → {}: {}", far, e),
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, O(vertices + edges)
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn weight(&mut self) -> Weight {
        1 + self.next(100)
    }
}

/// Register `v0..v{n-1}` so vertex ids line up with their numeric suffix.
fn with_vertices(n: u32) -> Graph {
    let mut graph = Graph::with_capacity(n as usize);
    for i in 0..n {
        graph.add_vertex(&format!("v{}", i));
    }
    graph
}

/// Ternary tree rooted at v0. Every vertex is reachable along exactly one path.
fn gen_tree(n: u32) -> Result<Graph, GraphError> {
    let mut graph = with_vertices(n);
    let mut rng = FastRng::new(42);
    for child in 1..n {
        graph.add_edge_by_id((child - 1) / 3, child, rng.weight())?;
    }
    Ok(graph)
}

/// Each vertex links to its next `k` ring neighbours; 5% of links jump anywhere.
fn gen_small_world(n: u32) -> Result<Graph, GraphError> {
    let k = 6u32;
    let mut graph = with_vertices(n);
    let mut rng = FastRng::new(67890);
    for i in 0..n {
        for j in 1..=k {
            let target = if rng.next(100) < 5 {
                rng.next(n as u64) as u32
            } else {
                (i + j) % n
            };
            graph.add_edge_by_id(i, target, rng.weight())?;
        }
    }
    Ok(graph)
}

/// Uniform random directed edges, ~8 per vertex. Some vertices stay unreachable.
fn gen_random(n: u32) -> Result<Graph, GraphError> {
    let mut graph = with_vertices(n);
    let mut rng = FastRng::new(54321);
    for _ in 0..(n as u64 * 8) {
        let from = rng.next(n as u64) as u32;
        let to = rng.next(n as u64) as u32;
        graph.add_edge_by_id(from, to, rng.weight())?;
    }
    Ok(graph)
}

/// Two random clusters joined by a chain of heavy bridge edges.
///
/// Shortest paths across must funnel through the bridge, so the far cluster
/// is only settled after every cheaper vertex on the near side.
fn gen_barbell(n: u32) -> Result<Graph, GraphError> {
    let bridge_len = 10u32;
    let cluster = (n - bridge_len) / 2;
    let mut graph = with_vertices(n);
    let mut rng = FastRng::new(99999);

    let mut wire_cluster = |graph: &mut Graph, base: u32| -> Result<(), GraphError> {
        for i in 0..cluster {
            for _ in 0..8 {
                let target = rng.next(cluster as u64) as u32;
                graph.add_edge_by_id(base + i, base + target, rng.weight())?;
            }
        }
        Ok(())
    };
    wire_cluster(&mut graph, 0)?;
    let far_base = cluster + bridge_len;
    wire_cluster(&mut graph, far_base)?;

    // Chain: last of cluster A -> bridge -> first of cluster B
    let mut prev = cluster - 1;
    for id in cluster..far_base {
        graph.add_edge_by_id(prev, id, 1_000)?;
        prev = id;
    }
    graph.add_edge_by_id(prev, far_base, 1_000)?;
    // Leftover vertex (odd split) hangs off the far cluster.
    for id in (far_base + cluster)..n {
        graph.add_edge_by_id(far_base, id, 1)?;
    }
    Ok(graph)
}
