use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};

use crate::graphs::{edge::DirectedWeightedEdge, VertexId, Weight};

/// Per search state of Dijkstra's algorithm: tentative weights, predecessor edges and
/// the set of expanded vertices.
pub trait DijkstraData {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    /// Retrieves the tentative weight of a given vertex, if it has been reached.
    fn get_weight(&self, vertex: VertexId) -> Option<Weight>;

    /// Retrieves the edge over which a given vertex has been reached, if any.
    fn get_predecessor(&self, vertex: VertexId) -> Option<DirectedWeightedEdge>;

    /// Sets weight and predecessor edge for a given vertex.
    fn set(&mut self, vertex: VertexId, weight: Weight, predecessor: Option<DirectedWeightedEdge>);

    /// Marks a vertex as expanded. Returns true if it had been expanded before.
    fn expand(&mut self, vertex: VertexId) -> bool;

    fn is_expanded(&self, vertex: VertexId) -> bool;

    /// Returns the edges leading from the search source to `target`.
    fn get_path_edges(&self, target: VertexId) -> Option<Vec<DirectedWeightedEdge>> {
        self.get_weight(target)?;

        let mut edges = Vec::new();
        let mut current = target;
        while let Some(edge) = self.get_predecessor(current) {
            current = edge.tail;
            edges.push(edge);
        }
        edges.reverse();

        Some(edges)
    }
}

/// Sparse state, cheap to create for searches that only touch a few vertices.
#[derive(Clone, Debug, Default)]
pub struct DijkstraDataHashMap {
    weights: HashMap<VertexId, Weight>,
    predecessors: HashMap<VertexId, DirectedWeightedEdge>,
    expanded: HashSet<VertexId>,
}

impl DijkstraDataHashMap {
    pub fn new() -> Self {
        DijkstraDataHashMap {
            weights: HashMap::new(),
            predecessors: HashMap::new(),
            expanded: HashSet::new(),
        }
    }
}

impl DijkstraData for DijkstraDataHashMap {
    fn clear(&mut self) {
        self.weights.clear();
        self.predecessors.clear();
        self.expanded.clear();
    }

    fn get_weight(&self, vertex: VertexId) -> Option<Weight> {
        self.weights.get(&vertex).copied()
    }

    fn get_predecessor(&self, vertex: VertexId) -> Option<DirectedWeightedEdge> {
        self.predecessors.get(&vertex).copied()
    }

    fn set(&mut self, vertex: VertexId, weight: Weight, predecessor: Option<DirectedWeightedEdge>) {
        self.weights.insert(vertex, weight);
        match predecessor {
            Some(edge) => self.predecessors.insert(vertex, edge),
            None => self.predecessors.remove(&vertex),
        };
    }

    fn expand(&mut self, vertex: VertexId) -> bool {
        !self.expanded.insert(vertex)
    }

    fn is_expanded(&self, vertex: VertexId) -> bool {
        self.expanded.contains(&vertex)
    }
}

/// Dense state for searches expected to visit a large part of the graph.
#[derive(Clone, Debug)]
pub struct DijkstraDataVec {
    weights: Vec<Weight>,
    predecessors: Vec<Option<DirectedWeightedEdge>>,
    expanded: Vec<bool>,
}

impl DijkstraDataVec {
    pub fn new(number_of_vertices: u32) -> Self {
        DijkstraDataVec {
            weights: vec![Weight::INFINITY; number_of_vertices as usize],
            predecessors: vec![None; number_of_vertices as usize],
            expanded: vec![false; number_of_vertices as usize],
        }
    }
}

impl DijkstraData for DijkstraDataVec {
    fn clear(&mut self) {
        self.weights.fill(Weight::INFINITY);
        self.predecessors.fill(None);
        self.expanded.fill(false);
    }

    fn get_weight(&self, vertex: VertexId) -> Option<Weight> {
        let weight = self.weights[vertex as usize];
        weight.is_finite().then_some(weight)
    }

    fn get_predecessor(&self, vertex: VertexId) -> Option<DirectedWeightedEdge> {
        self.predecessors[vertex as usize]
    }

    fn set(&mut self, vertex: VertexId, weight: Weight, predecessor: Option<DirectedWeightedEdge>) {
        self.weights[vertex as usize] = weight;
        self.predecessors[vertex as usize] = predecessor;
    }

    fn expand(&mut self, vertex: VertexId) -> bool {
        std::mem::replace(&mut self.expanded[vertex as usize], true)
    }

    fn is_expanded(&self, vertex: VertexId) -> bool {
        self.expanded[vertex as usize]
    }
}
