use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;
use wayfinder_core::{dijkstra, Graph, PathOutcome, QueryError, ShortestPaths, StartPolicy};

use crate::util::is_quit_word;

/// One shortest-path session: pick a start, print all distances, answer targets.
///
/// Generic over its input and output so it can be driven by a terminal or a script.
pub struct Session<R, W> {
    input: R,
    out: W,
    json: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, json: bool) -> Self {
        Self { input, out, json }
    }

    /// Run against `graph`.
    ///
    /// With a non-empty `targets` list only those targets are answered;
    /// otherwise targets are read until a quit word or end of input.
    pub fn run(
        &mut self,
        graph: &Graph,
        start: Option<&str>,
        targets: &[String],
        policy: StartPolicy,
    ) -> Result<()> {
        let paths = match start {
            Some(s) => dijkstra(graph, s, policy)?,
            None => match self.choose_start(graph, policy)? {
                Some(paths) => paths,
                None => return Ok(()),
            },
        };
        debug!(start = %paths.start(), stats = ?paths.stats(), "distances computed");
        self.print_distances(&paths)?;

        if !targets.is_empty() {
            for target in targets {
                self.answer(&paths, target)?;
            }
            return Ok(());
        }

        while let Some(target) = self.prompt("Target vertex (or 'quit'): ")? {
            if is_quit_word(&target) {
                break;
            }
            if target.is_empty() {
                continue;
            }
            self.answer(&paths, &target)?;
        }
        Ok(())
    }

    /// Prompt until a start vertex is accepted. None on quit or end of input.
    ///
    /// Blank lines are skipped and a rejected start is reported, then asked again.
    fn choose_start<'g>(
        &mut self,
        graph: &'g Graph,
        policy: StartPolicy,
    ) -> Result<Option<ShortestPaths<'g>>> {
        while let Some(start) = self.prompt("Start vertex: ")? {
            if is_quit_word(&start) {
                return Ok(None);
            }
            if start.is_empty() {
                continue;
            }
            match dijkstra(graph, &start, policy) {
                Ok(paths) => return Ok(Some(paths)),
                Err(e) => self.report_error(None, &e)?,
            }
        }
        Ok(None)
    }

    fn report_error(&mut self, target: Option<&str>, err: &QueryError) -> Result<()> {
        if self.json {
            let row = match target {
                Some(t) => json!({ "target": t, "error": err.to_string() }),
                None => json!({ "error": err.to_string() }),
            };
            writeln!(self.out, "{row}")?;
        } else {
            writeln!(self.out, "error: {err}")?;
        }
        Ok(())
    }

    /// Read one trimmed line. None at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        if !self.json {
            write!(self.out, "{text}")?;
            self.out.flush()?;
        }
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("reading stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_distances(&mut self, paths: &ShortestPaths<'_>) -> Result<()> {
        if self.json {
            let row = json!({
                "start": paths.start(),
                "distances": paths.distances(),
                "stats": paths.stats(),
            });
            writeln!(self.out, "{row}")?;
            return Ok(());
        }

        writeln!(self.out, "Shortest distances from {}:", paths.start())?;
        for (vertex, distance) in paths.iter_distances() {
            writeln!(self.out, "  {vertex}: {distance}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Answer one target. Query errors are reported and the session goes on.
    fn answer(&mut self, paths: &ShortestPaths<'_>, target: &str) -> Result<()> {
        let outcome = match paths.path_to(target) {
            Ok(o) => o,
            Err(e) => return self.report_error(Some(target), &e),
        };
        if self.json {
            writeln!(self.out, "{}", json!({ "target": target, "outcome": outcome }))?;
            return Ok(());
        }

        match outcome {
            PathOutcome::Found(path) => writeln!(
                self.out,
                "Shortest path from {} to {target}: {path}",
                paths.start()
            )?,
            PathOutcome::Unreachable => writeln!(
                self.out,
                "Shortest path from {} to {target}: unreachable",
                paths.start()
            )?,
        }
        Ok(())
    }
}
