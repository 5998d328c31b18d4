use ahash::{HashSet, HashSetExt};

use super::PriorityFunction;
use crate::{
    graphs::{level_graph::LevelGraph, VertexId},
    search::ch::shortcuts::ShortcutCandidate,
};

pub struct ContractedNeighbors {
    contracted_neighbors: Vec<u32>,
}

impl PriorityFunction for ContractedNeighbors {
    fn priority(&self, vertex: VertexId, _graph: &LevelGraph, _shortcuts: &[ShortcutCandidate]) -> i32 {
        self.contracted_neighbors[vertex as usize] as i32
    }

    fn update(&mut self, vertex: VertexId, graph: &LevelGraph) {
        let mut neighbors = HashSet::new();
        for id in graph.prep_incident_edges(vertex) {
            let neighbor = graph.edge(id).other(vertex);
            if graph.level(neighbor) == 0 && neighbors.insert(neighbor) {
                self.contracted_neighbors[neighbor as usize] += 1;
            }
        }
    }

    fn initialize(&mut self, graph: &LevelGraph) {
        self.contracted_neighbors = vec![0; graph.number_of_vertices() as usize];
    }
}

impl Default for ContractedNeighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractedNeighbors {
    pub fn new() -> Self {
        Self {
            contracted_neighbors: Vec::new(),
        }
    }
}
