use super::PriorityFunction;
use crate::{
    graphs::{level_graph::LevelGraph, VertexId},
    search::ch::shortcuts::ShortcutCandidate,
};

/// Sum of the original edges the shortcuts would represent. Keeps long shortcuts from
/// being created early.
#[derive(Default)]
pub struct OriginalEdges {}

impl OriginalEdges {
    pub fn new() -> Self {
        Self {}
    }
}

impl PriorityFunction for OriginalEdges {
    fn priority(&self, _vertex: VertexId, _graph: &LevelGraph, shortcuts: &[ShortcutCandidate]) -> i32 {
        shortcuts
            .iter()
            .map(|shortcut| shortcut.original_edge_count as i32)
            .sum()
    }

    fn update(&mut self, _vertex: VertexId, _graph: &LevelGraph) {}

    fn initialize(&mut self, _graph: &LevelGraph) {}
}
