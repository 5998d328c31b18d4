use super::{contracted_graph::PreparedCh, shortcut_replacer::unpack_edges};
use crate::{
    error::ChError,
    graphs::{edge::DirectedWeightedEdge, level_graph::LevelGraph, VertexId, Weight},
    search::{
        collections::dijkstra_data::{DijkstraData, DijkstraDataHashMap},
        dijkstra::DijkstraSearch,
        path::{Path, ShortestPathRequest},
        PathFinding,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Edges the search in this direction relaxes from `vertex`, oriented in search
    /// direction. Only edges leading to vertices of at least the same level are used.
    fn upward_edges<'a>(
        self,
        graph: &'a LevelGraph,
        vertex: VertexId,
    ) -> Box<dyn Iterator<Item = DirectedWeightedEdge> + 'a> {
        let level = graph.level(vertex);
        match self {
            Direction::Forward => Box::new(
                graph
                    .edges_from(vertex)
                    .filter(move |edge| graph.level(edge.head) >= level),
            ),
            Direction::Backward => Box::new(
                graph
                    .edges_to(vertex)
                    .filter(move |edge| graph.level(edge.tail) >= level)
                    .map(|edge| edge.reversed()),
            ),
        }
    }

    fn opposite(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

type Search = DijkstraSearch<DijkstraDataHashMap>;

/// Single search step in one direction.
fn single_search_step(
    graph: &LevelGraph,
    direction: Direction,
    search: &mut Search,
    opposite_search: &Search,
    meeting_vertex_and_weight: &mut Option<(VertexId, Weight)>,
) {
    let Some((tail, weight_tail)) = search.pop() else {
        return;
    };

    // Stall on demand logic. The edges of the opposite direction lead to higher vertices
    // that might reach `tail` cheaper.
    for edge in direction.opposite().upward_edges(graph, tail) {
        if let Some(predecessor_weight) = search.data.get_weight(edge.head) {
            if predecessor_weight + edge.weight < weight_tail {
                return;
            }
        }
    }

    // Meeting vertex logic
    if let Some(opposite_weight_tail) = opposite_search.data.get_weight(tail) {
        let meeting_weight = meeting_vertex_and_weight.map_or(Weight::INFINITY, |(_, weight)| weight);
        let alternative_meeting_weight = weight_tail + opposite_weight_tail;
        if alternative_meeting_weight < meeting_weight {
            *meeting_vertex_and_weight = Some((tail, alternative_meeting_weight));
        }
    }

    // Search logic
    for edge in direction.upward_edges(graph, tail) {
        search.relax(&edge, weight_tail);
    }
}

/// Bidirectional upward search. Returns the meeting vertex and the weight of the shortest
/// path together with both search spaces.
fn one_to_one(
    graph: &LevelGraph,
    source: VertexId,
    target: VertexId,
    max_visited_nodes: usize,
) -> Result<Option<(VertexId, Weight, Search, Search)>, ChError> {
    let mut forward = DijkstraSearch::new(DijkstraDataHashMap::new());
    forward.init(source);
    let mut backward = DijkstraSearch::new(DijkstraDataHashMap::new());
    backward.init(target);

    let mut meeting_vertex_and_weight = None;

    loop {
        // A direction is done as soon as its frontier can not improve the best path.
        let best_weight = meeting_vertex_and_weight.map_or(Weight::INFINITY, |(_, weight)| weight);
        let forward_minimum = forward.peek_weight().filter(|&weight| weight < best_weight);
        let backward_minimum = backward.peek_weight().filter(|&weight| weight < best_weight);
        let direction = match (forward_minimum, backward_minimum) {
            (None, None) => break,
            (Some(forward_weight), Some(backward_weight)) => {
                if forward_weight <= backward_weight {
                    Direction::Forward
                } else {
                    Direction::Backward
                }
            }
            (Some(_), None) => Direction::Forward,
            (None, Some(_)) => Direction::Backward,
        };

        let visited_nodes = forward.settled() + backward.settled();
        if visited_nodes >= max_visited_nodes {
            return Err(ChError::Aborted { visited_nodes });
        }

        match direction {
            Direction::Forward => single_search_step(
                graph,
                direction,
                &mut forward,
                &backward,
                &mut meeting_vertex_and_weight,
            ),
            Direction::Backward => single_search_step(
                graph,
                direction,
                &mut backward,
                &forward,
                &mut meeting_vertex_and_weight,
            ),
        }
    }

    Ok(meeting_vertex_and_weight.map(|(vertex, weight)| (vertex, weight, forward, backward)))
}

impl PreparedCh {
    /// Shortest path from `origin` to `destination` with all shortcuts unpacked.
    ///
    /// Returns `Ok(None)` if the destination can not be reached and
    /// [`ChError::Aborted`] if more than `max_visited_nodes` vertices would be settled.
    pub fn query(
        &self,
        origin: VertexId,
        destination: VertexId,
        max_visited_nodes: usize,
    ) -> Result<Option<Path>, ChError> {
        let graph = self.graph();
        for vertex in [origin, destination] {
            if vertex >= graph.number_of_vertices() {
                return Err(ChError::VertexOutOfRange {
                    vertex,
                    number_of_vertices: graph.number_of_vertices(),
                });
            }
        }
        if origin == destination {
            return Ok(Some(Path::from_edges(origin, Vec::new(), 0.0)));
        }

        let Some((meeting_vertex, weight, forward, backward)) =
            one_to_one(graph, origin, destination, max_visited_nodes)?
        else {
            return Ok(None);
        };

        // (origin -> meeting vertex)
        let mut edges = forward
            .data
            .get_path_edges(meeting_vertex)
            .ok_or_else(|| ChError::Corrupted("forward search lost the meeting vertex".to_string()))?;
        // (destination -> meeting vertex), reversed to (meeting vertex -> destination)
        let backward_edges = backward
            .data
            .get_path_edges(meeting_vertex)
            .ok_or_else(|| ChError::Corrupted("backward search lost the meeting vertex".to_string()))?;
        edges.extend(backward_edges.iter().rev().map(|edge| edge.reversed()));

        let edges = unpack_edges(graph, &edges)?;
        Ok(Some(Path::from_edges(origin, edges, weight)))
    }
}

impl PathFinding for PreparedCh {
    fn shortest_path(&self, request: &ShortestPathRequest) -> Result<Option<Path>, ChError> {
        self.query(
            request.source(),
            request.target(),
            request.max_visited_nodes(),
        )
    }

    fn number_of_vertices(&self) -> u32 {
        self.graph().number_of_vertices()
    }
}
