use std::fmt;

use serde::Serialize;

use crate::dijkstra::{ShortestPaths, Slot};
use crate::error::QueryError;
use crate::graph::Weight;

/// A single step in a shortest path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub vertex: String,
    /// Weight of the edge taken to reach this vertex. None for the start.
    pub weight: Option<Weight>,
    /// Distance from the start up to and including this step.
    pub cumulative: Weight,
}

/// Shortest path from the start vertex to a target, both endpoints included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    pub steps: Vec<PathStep>,
    pub distance: Weight,
}

impl Path {
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.vertex.as_str())
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// `start-->...-->target`
    pub fn render(&self) -> String {
        self.vertices().collect::<Vec<_>>().join("-->")
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (distance: {})", self.render(), self.distance)
    }
}

/// Answer to a path query against a known target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Found(Path),
    Unreachable,
}

impl PathOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PathOutcome::Found(p) => Some(p),
            PathOutcome::Unreachable => None,
        }
    }
}

impl ShortestPaths<'_> {
    /// Reconstruct the shortest path from the start to `target`.
    ///
    /// Walks predecessor links back from `target` to the start, then reverses.
    /// Returns `UnknownVertex` for names the graph has never seen and
    /// `PathOutcome::Unreachable` when no path exists.
    pub fn path_to(&self, target: &str) -> Result<PathOutcome, QueryError> {
        let id = match self.locate(target)? {
            Slot::DetachedStart => {
                return Ok(PathOutcome::Found(Path {
                    steps: vec![PathStep {
                        vertex: self.start.clone(),
                        weight: None,
                        cumulative: 0,
                    }],
                    distance: 0,
                }));
            }
            Slot::Vertex(id) => id,
        };

        let Some(distance) = self.best[id as usize] else {
            return Ok(PathOutcome::Unreachable);
        };

        // Collected target-first: (vertex, weight of the edge into it)
        let mut chain = Vec::new();
        let mut current = id;
        loop {
            let link = self.pred[current as usize];
            chain.push((current, link.map(|(_, w)| w)));
            match link {
                Some((parent, _)) => current = parent,
                None => break,
            }
        }
        chain.reverse();

        let mut cumulative: Weight = 0;
        let steps = chain
            .into_iter()
            .map(|(vertex, weight)| {
                cumulative += weight.unwrap_or(0);
                PathStep {
                    vertex: self.graph.vertex_name(vertex).unwrap_or_default().to_string(),
                    weight,
                    cumulative,
                }
            })
            .collect();

        Ok(PathOutcome::Found(Path { steps, distance }))
    }
}
