use serde::{Deserialize, Serialize};

use super::{
    edge::{DirectedWeightedEdge, EdgeKind, EdgeRecord},
    weighting::Weighting,
    Distance, EdgeId, Level, RoadGraph, VertexId, Weight,
};
use crate::error::ChError;

/// Adjacency representation the contraction runs on and the query searches.
///
/// Edges are stored once in an arena, every vertex keeps the ids of its incident edges.
/// Edges are only ever appended or updated in place. Level 0 marks an uncontracted
/// vertex.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelGraph {
    edges: Vec<EdgeRecord>,
    incident: Vec<Vec<EdgeId>>,
    levels: Vec<Level>,
    /// Preparation only: edges touching a contracted vertex.
    #[serde(skip)]
    excluded: Vec<bool>,
}

impl LevelGraph {
    pub fn new(number_of_vertices: u32) -> Self {
        LevelGraph {
            edges: Vec::new(),
            incident: vec![Vec::new(); number_of_vertices as usize],
            levels: vec![0; number_of_vertices as usize],
            excluded: Vec::new(),
        }
    }

    /// Builds the graph from the imported road network. The stored weight of every edge
    /// is the output of `weighting`, the raw distance is kept for reporting.
    pub fn from_road_graph(
        road_graph: &RoadGraph,
        weighting: &dyn Weighting,
    ) -> Result<LevelGraph, ChError> {
        let mut graph = LevelGraph::new(road_graph.number_of_vertices());
        for (id, road_edge) in road_graph.edges().iter().enumerate() {
            let weight = weighting.weight(road_edge);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ChError::InvalidWeight {
                    weighting: weighting.name().to_string(),
                    edge: id as EdgeId,
                    weight,
                });
            }
            graph.add_edge(EdgeRecord {
                tail: road_edge.tail,
                head: road_edge.head,
                distance: road_edge.distance,
                weight,
                forward: true,
                backward: road_edge.bidirectional,
                kind: EdgeKind::Original,
            });
        }
        Ok(graph)
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.incident.len() as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.edges.len() as u32
    }

    pub fn add_edge(&mut self, edge: EdgeRecord) -> EdgeId {
        let id = self.edges.len() as EdgeId;
        self.incident[edge.tail as usize].push(id);
        self.incident[edge.head as usize].push(id);
        self.edges.push(edge);
        id
    }

    /// Adds a one way edge without weighting, mostly useful to hand craft hierarchies.
    pub fn add_directed_edge(&mut self, tail: VertexId, head: VertexId, weight: Weight) -> EdgeId {
        self.add_edge(EdgeRecord {
            tail,
            head,
            distance: weight,
            weight,
            forward: true,
            backward: false,
            kind: EdgeKind::Original,
        })
    }

    pub fn update_edge(&mut self, id: EdgeId, weight: Weight, distance: Distance, kind: EdgeKind) {
        let edge = &mut self.edges[id as usize];
        edge.weight = weight;
        edge.distance = distance;
        edge.kind = kind;
    }

    pub fn set_access(&mut self, id: EdgeId, forward: bool, backward: bool) {
        let edge = &mut self.edges[id as usize];
        edge.forward = forward;
        edge.backward = backward;
    }

    pub fn edge(&self, id: EdgeId) -> &EdgeRecord {
        &self.edges[id as usize]
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn incident_edges(&self, vertex: VertexId) -> &[EdgeId] {
        &self.incident[vertex as usize]
    }

    pub fn level(&self, vertex: VertexId) -> Level {
        self.levels[vertex as usize]
    }

    pub fn set_level(&mut self, vertex: VertexId, level: Level) {
        self.levels[vertex as usize] = level;
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Outgoing traversals of `vertex`.
    pub fn edges_from(&self, vertex: VertexId) -> impl Iterator<Item = DirectedWeightedEdge> + '_ {
        self.incident[vertex as usize].iter().filter_map(move |&id| {
            let edge = &self.edges[id as usize];
            edge.is_traversable_from(vertex)
                .then(|| edge.directed(id, vertex))
        })
    }

    /// Incoming traversals of `vertex`, oriented from their source to `vertex`.
    pub fn edges_to(&self, vertex: VertexId) -> impl Iterator<Item = DirectedWeightedEdge> + '_ {
        self.incident[vertex as usize].iter().filter_map(move |&id| {
            let edge = &self.edges[id as usize];
            let source = edge.other(vertex);
            edge.is_traversable_from(source)
                .then(|| edge.directed(id, source))
        })
    }

    /// Orients edge `id` so that it starts at `from`, if it can be traversed that way.
    pub fn traverse(&self, id: EdgeId, from: VertexId) -> Option<DirectedWeightedEdge> {
        let edge = self.edges.get(id as usize)?;
        edge.is_traversable_from(from).then(|| edge.directed(id, from))
    }

    pub fn exclude_edge(&mut self, id: EdgeId) {
        if self.excluded.len() <= id as usize {
            self.excluded.resize(self.edges.len().max(id as usize + 1), false);
        }
        self.excluded[id as usize] = true;
    }

    pub fn is_excluded(&self, id: EdgeId) -> bool {
        self.excluded.get(id as usize).copied().unwrap_or(false)
    }

    /// Incident edges of `vertex` that are still part of the uncontracted graph.
    pub fn prep_incident_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.incident[vertex as usize]
            .iter()
            .copied()
            .filter(move |&id| !self.is_excluded(id) && !self.edges[id as usize].is_dead())
    }

    /// Outgoing traversals of `vertex` in the uncontracted graph.
    pub fn prep_edges_from(
        &self,
        vertex: VertexId,
    ) -> impl Iterator<Item = DirectedWeightedEdge> + '_ {
        self.prep_incident_edges(vertex).filter_map(move |id| self.traverse(id, vertex))
    }

    /// Incoming traversals of `vertex` in the uncontracted graph.
    pub fn prep_edges_to(&self, vertex: VertexId) -> impl Iterator<Item = DirectedWeightedEdge> + '_ {
        self.prep_incident_edges(vertex).filter_map(move |id| {
            let source = self.edges[id as usize].other(vertex);
            self.traverse(id, source)
        })
    }

    /// Checks that all references stay in range. Used after deserialization.
    pub fn validate(&self) -> Result<(), ChError> {
        let number_of_vertices = self.number_of_vertices();
        let number_of_edges = self.number_of_edges();
        if self.levels.len() != self.incident.len() {
            return Err(ChError::Corrupted(format!(
                "{} levels for {} vertices",
                self.levels.len(),
                self.incident.len()
            )));
        }
        for (id, edge) in self.edges.iter().enumerate() {
            if edge.tail >= number_of_vertices || edge.head >= number_of_vertices {
                return Err(ChError::Corrupted(format!("edge {} has endpoint out of range", id)));
            }
            if let EdgeKind::Shortcut {
                skipped_edges,
                vertex,
                ..
            } = edge.kind
            {
                if vertex >= number_of_vertices
                    || skipped_edges.iter().any(|&skipped| skipped >= number_of_edges)
                {
                    return Err(ChError::Corrupted(format!(
                        "shortcut {} references an unknown edge or vertex",
                        id
                    )));
                }
            }
        }
        for (vertex, incident) in self.incident.iter().enumerate() {
            for &id in incident {
                let edge = self.edges.get(id as usize).ok_or_else(|| {
                    ChError::Corrupted(format!("vertex {} references unknown edge {}", vertex, id))
                })?;
                if edge.tail != vertex as VertexId && edge.head != vertex as VertexId {
                    return Err(ChError::Corrupted(format!(
                        "edge {} is not incident to vertex {}",
                        id, vertex
                    )));
                }
            }
        }
        Ok(())
    }
}
