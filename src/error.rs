use thiserror::Error;

use crate::graphs::{EdgeId, VertexId};

/// Errors reported by graph ingestion, preparation and queries.
///
/// An unreachable target is not an error, queries report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ChError {
    #[error("vertex {vertex} is out of range for a graph with {number_of_vertices} vertices")]
    VertexOutOfRange {
        vertex: VertexId,
        number_of_vertices: u32,
    },

    #[error("edge {tail} -> {tail} is a self loop")]
    SelfLoop { tail: VertexId },

    #[error("edge {tail} -> {head} has invalid distance {distance}")]
    InvalidDistance {
        tail: VertexId,
        head: VertexId,
        distance: f64,
    },

    #[error("weighting '{weighting}' returned invalid weight {weight} for edge {edge}")]
    InvalidWeight {
        weighting: String,
        edge: EdgeId,
        weight: f64,
    },

    #[error("query aborted after visiting {visited_nodes} vertices")]
    Aborted { visited_nodes: usize },

    #[error("unpacking edge {edge} exceeded depth {depth}, skipped edges form a cycle")]
    UnpackingCycle { edge: EdgeId, depth: usize },

    #[error("invalid priority function '{0}'")]
    InvalidPriorityFunction(String),

    #[error("prepared graph is corrupted: {0}")]
    Corrupted(String),

    #[error("invalid graph file: {0}")]
    InvalidGraphFile(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
