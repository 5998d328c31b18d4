use super::{
    collections::dijkstra_data::{DijkstraData, DijkstraDataHashMap, DijkstraDataVec},
    path::{Path, ShortestPathRequest},
    PathFinding,
};
use crate::{
    error::ChError,
    graphs::{edge::DirectedWeightedEdge, level_graph::LevelGraph, VertexId, Weight},
    queue::{heap_queue::HeapQueue, DijkstaQueue, DijkstraQueueElement},
};

/// Dijkstra state plus queue. The queue has no decrease key, outdated queue elements
/// are skipped when they surface.
pub struct DijkstraSearch<D: DijkstraData> {
    pub data: D,
    queue: HeapQueue,
    settled: usize,
}

impl<D: DijkstraData> DijkstraSearch<D> {
    pub fn new(data: D) -> Self {
        DijkstraSearch {
            data,
            queue: HeapQueue::new(),
            settled: 0,
        }
    }

    pub fn init(&mut self, source: VertexId) {
        self.data.clear();
        self.queue.clear();
        self.settled = 0;
        self.data.set(source, 0.0, None);
        self.queue.push(DijkstraQueueElement::new(0.0, source));
    }

    /// Settles and returns the unexpanded vertex with minimum tentative weight.
    pub fn pop(&mut self) -> Option<(VertexId, Weight)> {
        while let Some(DijkstraQueueElement { weight, vertex }) = self.queue.pop() {
            // It is not guaranteed that the queue does implement a decrease key operation.
            // Therefor, if a vertex has already been expanded, skip it.
            if self.data.expand(vertex) {
                continue;
            }
            self.settled += 1;
            return Some((vertex, weight));
        }
        None
    }

    /// Minimum tentative weight of the frontier.
    pub fn peek_weight(&mut self) -> Option<Weight> {
        loop {
            let element = *self.queue.peek()?;
            if !self.data.is_expanded(element.vertex) {
                return Some(element.weight);
            }
            self.queue.pop();
        }
    }

    /// Relaxes `edge` which starts at a vertex with weight `tail_weight`.
    pub fn relax(&mut self, edge: &DirectedWeightedEdge, tail_weight: Weight) -> bool {
        let alternative_weight = tail_weight + edge.weight;
        let current_weight = self.data.get_weight(edge.head).unwrap_or(Weight::INFINITY);
        if alternative_weight < current_weight {
            self.data.set(edge.head, alternative_weight, Some(*edge));
            self.queue.push(DijkstraQueueElement::new(alternative_weight, edge.head));
            return true;
        }
        false
    }

    pub fn settled(&self) -> usize {
        self.settled
    }
}

/// Plain Dijkstra over all edges of `graph`, levels are ignored.
pub fn dijkstra_one_to_one(
    graph: &LevelGraph,
    source: VertexId,
    target: VertexId,
    max_visited_nodes: usize,
) -> Result<Option<Path>, ChError> {
    let mut search = DijkstraSearch::new(DijkstraDataHashMap::new());
    search.init(source);

    loop {
        if search.settled() >= max_visited_nodes {
            if search.peek_weight().is_none() {
                return Ok(None);
            }
            return Err(ChError::Aborted {
                visited_nodes: search.settled(),
            });
        }
        let Some((tail, weight_tail)) = search.pop() else {
            return Ok(None);
        };
        if tail == target {
            let edges = search.data.get_path_edges(target).unwrap_or_default();
            return Ok(Some(Path::from_edges(source, edges, weight_tail)));
        }

        for edge in graph.edges_from(tail) {
            search.relax(&edge, weight_tail);
        }
    }
}

/// Weights from `source` to every vertex, `None` for unreachable ones.
pub fn dijkstra_one_to_all(graph: &LevelGraph, source: VertexId) -> Vec<Option<Weight>> {
    let mut search = DijkstraSearch::new(DijkstraDataVec::new(graph.number_of_vertices()));
    search.init(source);

    while let Some((tail, weight_tail)) = search.pop() {
        for edge in graph.edges_from(tail) {
            search.relax(&edge, weight_tail);
        }
    }

    (0..graph.number_of_vertices())
        .map(|vertex| search.data.get_weight(vertex))
        .collect()
}

/// Uncontracted fallback and reference for the contraction hierarchy.
pub struct Dijkstra {
    pub graph: LevelGraph,
}

impl PathFinding for Dijkstra {
    fn shortest_path(&self, request: &ShortestPathRequest) -> Result<Option<Path>, ChError> {
        dijkstra_one_to_one(
            &self.graph,
            request.source(),
            request.target(),
            request.max_visited_nodes(),
        )
    }

    fn number_of_vertices(&self) -> u32 {
        self.graph.number_of_vertices()
    }
}
