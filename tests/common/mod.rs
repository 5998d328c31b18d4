#![allow(dead_code)]

use ch_routing::{
    graphs::{edge::EdgeKind, level_graph::LevelGraph, weighting::Weighting, VertexId},
    prepare,
    search::ch::contracted_graph::PreparedCh,
    ContractionParams, RoadGraph,
};
use rand::prelude::*;

/// Adds all roads as `(tail, head, distance, bidirectional)`.
pub fn road_graph(number_of_vertices: u32, roads: &[(VertexId, VertexId, f64, bool)]) -> RoadGraph {
    let mut graph = RoadGraph::new(number_of_vertices);
    for &(tail, head, distance, bidirectional) in roads {
        graph.add_road(tail, head, distance, bidirectional).unwrap();
    }
    graph
}

/// Random road graph with integral distances, so that weight comparisons are exact.
pub fn random_road_graph(seed: u64, number_of_vertices: u32, number_of_edges: u32) -> RoadGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = RoadGraph::new(number_of_vertices);
    while graph.number_of_edges() < number_of_edges {
        let tail = rng.gen_range(0..number_of_vertices);
        let head = rng.gen_range(0..number_of_vertices);
        if tail == head {
            continue;
        }
        let distance = rng.gen_range(1..=20) as f64;
        let max_speed = [0.0, 30.0, 50.0, 100.0][rng.gen_range(0..4)];
        graph
            .add_edge(tail, head, distance, max_speed, rng.gen_bool(0.6))
            .unwrap();
    }
    graph
}

pub fn prepare_default(graph: &RoadGraph, weighting: &dyn Weighting) -> PreparedCh {
    prepare(graph, weighting, &ContractionParams::default()).unwrap()
}

/// Live shortcut records as `(id, tail, head, vertex)`.
pub fn shortcuts(graph: &LevelGraph) -> Vec<(u32, VertexId, VertexId, VertexId)> {
    graph
        .edges()
        .iter()
        .enumerate()
        .filter(|(_, edge)| !edge.is_dead())
        .filter_map(|(id, edge)| match edge.kind {
            EdgeKind::Shortcut { vertex, .. } => {
                Some((id as u32, edge.tail, edge.head, vertex))
            }
            EdgeKind::Original => None,
        })
        .collect()
}
