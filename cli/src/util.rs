/// Split `SRC:DST:WEIGHT` into its three fields.
///
/// Returns None unless there are exactly three non-empty vertex fields.
/// The weight is left as text; parsing it is the graph loader's job.
pub fn split_edge_spec(spec: &str) -> Option<[&str; 3]> {
    let mut parts = spec.split(':').map(str::trim);
    let (src, dst, weight) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || src.is_empty() || dst.is_empty() {
        return None;
    }
    Some([src, dst, weight])
}

/// Words that end an interactive session (case-insensitive).
pub fn is_quit_word(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "quit" | "exit")
}
