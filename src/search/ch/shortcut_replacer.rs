use crate::{
    error::ChError,
    graphs::{
        edge::{DirectedWeightedEdge, EdgeKind},
        level_graph::LevelGraph,
        EdgeId, VertexId,
    },
};

/// Replaces every shortcut in `edges` by the original edges it summarizes, keeping the
/// travel direction.
///
/// Works on an explicit stack of `(edge, start vertex, depth)`. Skipped edges can not nest
/// deeper than the number of vertices, a deeper nesting means the skip references form a
/// cycle.
pub fn unpack_edges(
    graph: &LevelGraph,
    edges: &[DirectedWeightedEdge],
) -> Result<Vec<DirectedWeightedEdge>, ChError> {
    let max_depth = graph.number_of_vertices() as usize;
    let mut unpacked = Vec::with_capacity(edges.len());
    let mut stack: Vec<(EdgeId, VertexId, usize)> =
        edges.iter().rev().map(|edge| (edge.id, edge.tail, 0)).collect();

    while let Some((id, from, depth)) = stack.pop() {
        if depth > max_depth {
            return Err(ChError::UnpackingCycle { edge: id, depth });
        }
        let edge = graph
            .edges()
            .get(id as usize)
            .ok_or_else(|| ChError::Corrupted(format!("unknown edge {} while unpacking", id)))?;
        if edge.tail != from && edge.head != from {
            return Err(ChError::Corrupted(format!(
                "edge {} is not incident to vertex {}",
                id, from
            )));
        }

        match edge.kind {
            EdgeKind::Original => unpacked.push(edge.directed(id, from)),
            EdgeKind::Shortcut {
                skipped_edges: [tail_side, head_side],
                vertex,
                ..
            } => {
                // pushed in reverse order of travel
                if from == edge.tail {
                    stack.push((head_side, vertex, depth + 1));
                    stack.push((tail_side, from, depth + 1));
                } else {
                    stack.push((tail_side, vertex, depth + 1));
                    stack.push((head_side, from, depth + 1));
                }
            }
        }
    }

    Ok(unpacked)
}
