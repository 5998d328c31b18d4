use ahash::{HashMap, HashMapExt, HashSet};

use crate::{
    graphs::{level_graph::LevelGraph, VertexId, Weight},
    queue::{heap_queue::HeapQueue, DijkstaQueue, DijkstraQueueElement},
};

/// One to many Dijkstra from `source` over the uncontracted part of `graph` that never
/// enters `without`.
///
/// Only paths with weight at most `max_weight` are explored. The search stops as soon as
/// every target is settled. Returns the weights of all reached vertices, a target missing
/// in the result has no witness.
pub fn witness_search(
    graph: &LevelGraph,
    source: VertexId,
    without: VertexId,
    max_weight: Weight,
    targets: &HashSet<VertexId>,
) -> HashMap<VertexId, Weight> {
    let mut queue = HeapQueue::new();
    let mut weights = HashMap::new();
    let mut remaining = targets.len();

    queue.push(DijkstraQueueElement::new(0.0, source));
    weights.insert(source, 0.0);

    while let Some(DijkstraQueueElement { weight, vertex }) = queue.pop() {
        if weight > weights[&vertex] {
            continue;
        }
        if weight > max_weight {
            break;
        }
        if targets.contains(&vertex) {
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }

        for edge in graph.prep_edges_from(vertex) {
            if edge.head == without || graph.level(edge.head) > 0 {
                continue;
            }
            let alternative_weight = weight + edge.weight;
            if alternative_weight > max_weight {
                continue;
            }
            let current_weight = *weights.get(&edge.head).unwrap_or(&Weight::INFINITY);
            if alternative_weight < current_weight {
                weights.insert(edge.head, alternative_weight);
                queue.push(DijkstraQueueElement::new(alternative_weight, edge.head));
            }
        }
    }

    weights
}
