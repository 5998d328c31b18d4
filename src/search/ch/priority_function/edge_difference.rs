use super::PriorityFunction;
use crate::{
    graphs::{level_graph::LevelGraph, VertexId},
    search::ch::shortcuts::ShortcutCandidate,
};

/// Number of shortcuts minus the number of edges removed by the contraction.
pub struct EdgeDifference {}

impl Default for EdgeDifference {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeDifference {
    pub fn new() -> Self {
        Self {}
    }
}

impl PriorityFunction for EdgeDifference {
    fn priority(&self, vertex: VertexId, graph: &LevelGraph, shortcuts: &[ShortcutCandidate]) -> i32 {
        shortcuts.len() as i32 - graph.prep_incident_edges(vertex).count() as i32
    }

    fn update(&mut self, _vertex: VertexId, _graph: &LevelGraph) {}

    fn initialize(&mut self, _graph: &LevelGraph) {}
}
