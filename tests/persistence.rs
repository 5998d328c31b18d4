use ch_routing::{
    graphs::{
        edge::{EdgeKind, EdgeRecord},
        level_graph::LevelGraph,
        weighting::ShortestWeighting,
    },
    read_prepared,
    search::ch::contracted_graph::PreparedCh,
    ChError,
};

mod common;
use common::{prepare_default, random_road_graph};

#[test]
fn round_trip() {
    let graph = random_road_graph(5, 60, 150);
    let prepared = prepare_default(&graph, &ShortestWeighting);

    let bytes = prepared.to_bytes().unwrap();
    let restored = PreparedCh::from_bytes(&bytes).unwrap();

    assert_eq!(restored.weighting(), "shortest");
    assert_eq!(restored.graph().levels(), prepared.graph().levels());
    assert_eq!(restored.graph().edges(), prepared.graph().edges());
    for source in 0..60 {
        for target in 0..60 {
            assert_eq!(
                prepared.query(source, target, usize::MAX).unwrap().map(|path| path.vertices),
                restored.query(source, target, usize::MAX).unwrap().map(|path| path.vertices),
            );
        }
    }
}

#[test]
fn file_round_trip() {
    let graph = random_road_graph(6, 30, 60);
    let prepared = prepare_default(&graph, &ShortestWeighting);
    let path = std::env::temp_dir().join(format!("ch_routing_prepared_{}.bincode", std::process::id()));

    prepared.write_to_file(&path).unwrap();
    let restored = read_prepared(&path, false).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(restored.graph().edges(), prepared.graph().edges());
}

#[test]
fn truncated_input_is_rejected() {
    let graph = random_road_graph(8, 30, 60);
    let bytes = prepare_default(&graph, &ShortestWeighting).to_bytes().unwrap();

    assert!(PreparedCh::from_bytes(&bytes[..bytes.len() / 2]).is_err());
    assert!(PreparedCh::from_bytes(&[]).is_err());
}

#[test]
fn dangling_references_are_rejected() {
    let mut graph = LevelGraph::new(3);
    graph.add_directed_edge(0, 1, 1.0);
    graph.add_edge(EdgeRecord {
        tail: 0,
        head: 2,
        distance: 2.0,
        weight: 2.0,
        forward: true,
        backward: false,
        kind: EdgeKind::Shortcut {
            skipped_edges: [0, 7],
            vertex: 1,
            original_edge_count: 2,
        },
    });

    // same layout as a serialized prepared graph
    let bytes = bincode::serialize(&(&graph, "shortest")).unwrap();
    assert!(matches!(
        PreparedCh::from_bytes(&bytes),
        Err(ChError::Corrupted(_))
    ));
    assert!(matches!(
        PreparedCh::from_level_graph(graph, "shortest"),
        Err(ChError::Corrupted(_))
    ));
}
