//! wayfinder: interactive single-source shortest path shell.
//!
//! Loads a built-in sample graph (or edges given with `--edge`), runs
//! Dijkstra from a start vertex and answers target queries on stdin.

use std::io;

use anyhow::Result;
use clap::Parser;

mod config;
mod load;
mod samples;
mod session;
mod util;

use config::Args;
use session::Session;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let graph = load::build_graph(&args);

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout().lock(), args.json);
    session.run(&graph, args.start.as_deref(), &args.targets, args.start_policy())
}
