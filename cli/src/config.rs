use clap::Parser;
use tracing_subscriber::EnvFilter;
use wayfinder_core::StartPolicy;

use crate::samples::Sample;

/// Environment variable that overrides `--log-level`.
pub const LOG_ENV: &str = "WAYFINDER_LOG";

#[derive(Parser, Debug)]
#[command(author, version, about = "Dijkstra shortest paths over a weighted directed graph")]
pub struct Args {
    /// Built-in graph to load when no --edge is given
    #[arg(long, value_enum, default_value_t = Sample::Hexagon)]
    pub sample: Sample,

    /// Directed edge SRC:DST:WEIGHT (repeatable). Replaces the sample graph.
    #[arg(long = "edge", value_name = "SRC:DST:WEIGHT")]
    pub edges: Vec<String>,

    /// Start vertex. Prompted on stdin when omitted.
    #[arg(long)]
    pub start: Option<String>,

    /// Target vertex to answer (repeatable). Skips the interactive prompt.
    #[arg(long = "target", value_name = "VERTEX")]
    pub targets: Vec<String>,

    /// Reject a start vertex that is not in the graph instead of running from it alone
    #[arg(long)]
    pub strict_start: bool,

    /// Emit distances and paths as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Log filter (e.g. warn, debug, wayfinder_core=trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    pub fn start_policy(&self) -> StartPolicy {
        if self.strict_start {
            StartPolicy::Strict
        } else {
            StartPolicy::Lenient
        }
    }

    /// Log filter: `WAYFINDER_LOG` wins over `--log-level`.
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["wayfinder"]);
        assert_eq!(args.sample, Sample::Hexagon);
        assert!(args.edges.is_empty());
        assert!(args.start.is_none());
        assert_eq!(args.start_policy(), StartPolicy::Lenient);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_repeatable_flags() {
        let args = Args::parse_from([
            "wayfinder", "--edge", "a:b:1", "--edge", "b:c:2", "--start", "a", "--target", "c",
            "--target", "b", "--strict-start", "--json", "--sample", "ring",
        ]);
        assert_eq!(args.edges, vec!["a:b:1", "b:c:2"]);
        assert_eq!(args.targets, vec!["c", "b"]);
        assert_eq!(args.start.as_deref(), Some("a"));
        assert_eq!(args.start_policy(), StartPolicy::Strict);
        assert_eq!(args.sample, Sample::Ring);
        assert!(args.json);
    }
}
