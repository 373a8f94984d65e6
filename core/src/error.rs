use crate::graph::VertexId;

/// Errors raised while inserting edges into a [`Graph`](crate::Graph).
///
/// A rejected edge leaves the graph untouched: no endpoint is registered and
/// no edge is stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("edge {from} -> {to}: weight must be non-negative, got {weight}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: i64,
    },

    #[error("edge {from} -> {to}: weight '{raw}' is not an integer")]
    MalformedWeight {
        from: String,
        to: String,
        raw: String,
    },

    #[error("edge {from} -> {to}: vertex id {missing} is not registered")]
    UnknownVertexId {
        from: VertexId,
        to: VertexId,
        missing: VertexId,
    },
}

/// Errors raised while querying a computed [`ShortestPaths`](crate::ShortestPaths).
///
/// These are local to a single query; the result they were raised against
/// stays valid for further queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("vertex '{0}' does not exist in the graph")]
    UnknownVertex(String),

    #[error("start vertex '{0}' does not exist in the graph")]
    UnknownStartVertex(String),
}
