/// Built-in sample graphs. Each undirected link is stored as two directed edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Sample {
    /// Five vertices A..E, densely linked
    Dense,
    /// Five vertices V..Z around a ring with chords
    Ring,
    /// Six numbered vertices 1..6
    Hexagon,
}

const DENSE: &[(&str, &str, &str)] = &[
    ("A", "B", "4"),
    ("A", "C", "2"),
    ("B", "C", "1"),
    ("B", "D", "5"),
    ("C", "D", "8"),
    ("C", "E", "10"),
    ("D", "E", "2"),
];

const RING: &[(&str, &str, &str)] = &[
    ("X", "Y", "3"),
    ("X", "Z", "7"),
    ("Y", "Z", "1"),
    ("Y", "W", "5"),
    ("Z", "W", "2"),
    ("W", "V", "6"),
    ("V", "Z", "3"),
];

const HEXAGON: &[(&str, &str, &str)] = &[
    ("1", "2", "2"),
    ("1", "3", "4"),
    ("2", "4", "7"),
    ("2", "5", "1"),
    ("3", "6", "3"),
    ("5", "6", "1"),
    ("6", "4", "2"),
    ("4", "1", "5"),
];

impl Sample {
    fn links(self) -> &'static [(&'static str, &'static str, &'static str)] {
        match self {
            Sample::Dense => DENSE,
            Sample::Ring => RING,
            Sample::Hexagon => HEXAGON,
        }
    }

    /// Directed edge triples, both directions of every link, forward first.
    pub fn edges(self) -> Vec<[&'static str; 3]> {
        self.links()
            .iter()
            .flat_map(|&(a, b, w)| [[a, b, w], [b, a, w]])
            .collect()
    }
}
