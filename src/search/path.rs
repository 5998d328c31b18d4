use serde::{Deserialize, Serialize};

use crate::graphs::{edge::DirectedWeightedEdge, Distance, VertexId, Weight};

/// Represents a request for finding a shortest path in a graph.
///
/// This struct is used to encapsulate the information required to find a path
/// from a source vertex to a target vertex in a graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    source: VertexId,
    target: VertexId,
    /// Hard cap on the number of vertices a search may settle.
    max_visited_nodes: usize,
}

impl ShortestPathRequest {
    pub fn new(source: VertexId, target: VertexId) -> ShortestPathRequest {
        ShortestPathRequest {
            source,
            target,
            max_visited_nodes: usize::MAX,
        }
    }

    pub fn with_max_visited_nodes(mut self, max_visited_nodes: usize) -> ShortestPathRequest {
        self.max_visited_nodes = max_visited_nodes;
        self
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn target(&self) -> VertexId {
        self.target
    }

    pub fn max_visited_nodes(&self) -> usize {
        self.max_visited_nodes
    }
}

/// Represents a path in a graph.
///
/// The edges are original edges of the road network, oriented in travel direction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<DirectedWeightedEdge>,
    pub weight: Weight,
    pub distance: Distance,
}

impl Path {
    /// Builds a path from a chain of edges starting at `source`.
    pub fn from_edges(source: VertexId, edges: Vec<DirectedWeightedEdge>, weight: Weight) -> Path {
        let mut vertices = Vec::with_capacity(edges.len() + 1);
        vertices.push(source);
        vertices.extend(edges.iter().map(|edge| edge.head));
        let distance = edges.iter().map(|edge| edge.distance).sum();

        Path {
            vertices,
            edges,
            weight,
            distance,
        }
    }

    /// Returns true if every edge starts where the previous one ended.
    pub fn is_chained(&self) -> bool {
        self.edges
            .windows(2)
            .all(|window| window[0].head == window[1].tail)
            && self
                .edges
                .first()
                .map_or(true, |edge| Some(&edge.tail) == self.vertices.first())
    }

    /// Sum of the weights of the edges.
    pub fn edge_weight(&self) -> Weight {
        self.edges.iter().map(|edge| edge.weight).sum()
    }
}
