use ch_routing::{
    graphs::{
        edge::{EdgeKind, EdgeRecord},
        level_graph::LevelGraph,
        weighting::{FastestWeighting, ShortestWeighting, Weighting},
    },
    search::{
        ch::contracted_graph::PreparedCh, dijkstra::Dijkstra, path::Path, weights_equal,
    },
    ChError, PathFinding, ShortestPathRequest,
};
use rayon::prelude::*;

mod common;
use common::{prepare_default, random_road_graph, road_graph};

fn assert_valid_path(path: &Path, source: u32, target: u32) {
    assert!(path.is_chained());
    assert_eq!(path.vertices.first(), Some(&source));
    assert_eq!(path.vertices.last(), Some(&target));
    assert!(weights_equal(path.edge_weight(), path.weight));
}

#[test]
fn budget_aborts_query() {
    let graph = road_graph(3, &[(0, 1, 1.0, false), (1, 2, 1.0, false)]);
    let prepared = prepare_default(&graph, &ShortestWeighting);

    assert!(matches!(
        prepared.query(0, 2, 1),
        Err(ChError::Aborted { visited_nodes: 1 })
    ));
    let path = prepared.query(0, 2, usize::MAX).unwrap().unwrap();
    assert_eq!(path.weight, 2.0);

    let request = ShortestPathRequest::new(0, 2).with_max_visited_nodes(1);
    assert!(prepared.shortest_path(&request).is_err());
}

#[test]
fn unreachable_target() {
    let graph = road_graph(4, &[(0, 1, 1.0, true), (2, 3, 1.0, true)]);
    let prepared = prepare_default(&graph, &ShortestWeighting);

    assert!(prepared.query(0, 3, usize::MAX).unwrap().is_none());
    assert!(prepared
        .shortest_path_weight(&ShortestPathRequest::new(2, 1))
        .unwrap()
        .is_none());
}

#[test]
fn origin_equals_destination() {
    let graph = road_graph(2, &[(0, 1, 1.0, true)]);
    let prepared = prepare_default(&graph, &ShortestWeighting);

    let path = prepared.query(1, 1, 0).unwrap().unwrap();
    assert_eq!(path.vertices, vec![1]);
    assert!(path.edges.is_empty());
    assert_eq!(path.weight, 0.0);
    assert_eq!(path.distance, 0.0);
}

#[test]
fn unpacking_order() {
    let mut graph = LevelGraph::new(11);
    graph.add_directed_edge(10, 0, 1.0);
    let mut skipped = graph.add_directed_edge(0, 1, 1.0);
    let mut originals = Vec::new();
    for tail in 1..6 {
        originals.push(graph.add_directed_edge(tail, tail + 1, 1.0));
    }
    for (head, &second) in (2..7).zip(originals.iter()) {
        let weight = head as f64;
        skipped = graph.add_edge(EdgeRecord {
            tail: 0,
            head,
            distance: weight,
            weight,
            forward: true,
            backward: false,
            kind: EdgeKind::Shortcut {
                skipped_edges: [skipped, second],
                vertex: head - 1,
                original_edge_count: head,
            },
        });
    }
    for (vertex, level) in [(0, 10), (6, 9), (5, 8), (4, 7), (3, 6), (2, 5), (1, 4), (10, 3)] {
        graph.set_level(vertex, level);
    }
    let prepared = PreparedCh::from_level_graph(graph, "shortest").unwrap();

    let path = prepared.query(10, 6, usize::MAX).unwrap().unwrap();
    assert_eq!(path.weight, 7.0);
    assert_eq!(path.distance, 7.0);
    assert_eq!(path.vertices, vec![10, 0, 1, 2, 3, 4, 5, 6]);
    assert_valid_path(&path, 10, 6);
}

fn compare_with_dijkstra(seed: u64, weighting: &dyn Weighting) {
    let graph = random_road_graph(seed, 120, 300);
    let prepared = prepare_default(&graph, weighting);
    let dijkstra = Dijkstra {
        graph: LevelGraph::from_road_graph(&graph, weighting).unwrap(),
    };

    for source in 0..120 {
        for target in (0..120).step_by(3) {
            let request = ShortestPathRequest::new(source, target);
            let expected = dijkstra.shortest_path_weight(&request).unwrap();
            let path = prepared.shortest_path(&request).unwrap();
            match (expected, &path) {
                (Some(expected), Some(path)) => {
                    assert!(
                        weights_equal(expected, path.weight),
                        "{} -> {}: expected {}, got {}",
                        source,
                        target,
                        expected,
                        path.weight
                    );
                    assert_valid_path(path, source, target);
                }
                (None, None) => {}
                _ => panic!("{} -> {}: expected {:?}, got {:?}", source, target, expected, path),
            }
        }
    }
}

#[test]
fn random_graphs_shortest() {
    for seed in 0..4 {
        compare_with_dijkstra(seed, &ShortestWeighting);
    }
}

#[test]
fn random_graphs_fastest() {
    for seed in 10..13 {
        compare_with_dijkstra(seed, &FastestWeighting::default());
    }
}

#[test]
fn concurrent_queries_share_the_hierarchy() {
    let graph = random_road_graph(21, 100, 260);
    let prepared = prepare_default(&graph, &ShortestWeighting);
    let pathfinders: Vec<Box<dyn PathFinding>> = vec![
        Box::new(Dijkstra {
            graph: LevelGraph::from_road_graph(&graph, &ShortestWeighting).unwrap(),
        }),
        Box::new(prepared),
    ];

    let requests: Vec<_> = (0..100)
        .flat_map(|source| (0..100).step_by(7).map(move |target| ShortestPathRequest::new(source, target)))
        .collect();
    let results: Vec<Vec<Option<f64>>> = pathfinders
        .iter()
        .map(|pathfinder| {
            requests
                .par_iter()
                .map(|request| pathfinder.shortest_path_weight(request).unwrap())
                .collect()
        })
        .collect();

    assert_eq!(results[0], results[1]);
}
