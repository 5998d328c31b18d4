use ahash::HashSet;
use itertools::Itertools;
use log::trace;

use super::witness::witness_search;
use crate::{
    graphs::{
        edge::{DirectedWeightedEdge, EdgeKind, EdgeRecord},
        level_graph::LevelGraph,
        Distance, EdgeId, VertexId, Weight,
    },
    search::weights_equal,
};

/// A shortcut `tail -> head` that contracting `vertex` would require.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortcutCandidate {
    pub tail: VertexId,
    pub head: VertexId,
    pub weight: Weight,
    pub distance: Distance,
    /// Edge `tail - vertex` and edge `vertex - head`.
    pub skipped_edges: [EdgeId; 2],
    pub vertex: VertexId,
    pub original_edge_count: u32,
    /// Set if the shortcut also stands for `head -> tail` with the same weight.
    pub bidirectional: bool,
}

impl ShortcutCandidate {
    fn kind(&self) -> EdgeKind {
        EdgeKind::Shortcut {
            skipped_edges: self.skipped_edges,
            vertex: self.vertex,
            original_edge_count: self.original_edge_count,
        }
    }
}

/// Cheapest edge per neighbor, sorted by neighbor. Ties go to the lower edge id.
fn cheapest_per_neighbor(
    edges: impl Iterator<Item = DirectedWeightedEdge>,
    neighbor: impl Fn(&DirectedWeightedEdge) -> VertexId,
) -> Vec<DirectedWeightedEdge> {
    edges
        .sorted_by(|a, b| {
            neighbor(a)
                .cmp(&neighbor(b))
                .then_with(|| a.weight.total_cmp(&b.weight))
                .then_with(|| a.id.cmp(&b.id))
        })
        .dedup_by(|a, b| neighbor(a) == neighbor(b))
        .collect()
}

/// Computes the shortcuts needed to contract `vertex` without changing any shortest path
/// weight among its uncontracted neighbors. The graph is not modified.
///
/// Mutually reverse candidates of equal weight over the same two edges are merged into
/// one bidirectional candidate.
pub fn find_shortcuts(graph: &LevelGraph, vertex: VertexId) -> Vec<ShortcutCandidate> {
    let is_uncontracted = |neighbor: VertexId| neighbor != vertex && graph.level(neighbor) == 0;

    let in_edges = cheapest_per_neighbor(
        graph
            .prep_edges_to(vertex)
            .filter(|edge| is_uncontracted(edge.tail)),
        |edge| edge.tail,
    );
    let out_edges = cheapest_per_neighbor(
        graph
            .prep_edges_from(vertex)
            .filter(|edge| is_uncontracted(edge.head)),
        |edge| edge.head,
    );

    let mut shortcuts: Vec<ShortcutCandidate> = Vec::new();
    for in_edge in in_edges.iter() {
        let tail = in_edge.tail;
        let targets: HashSet<VertexId> = out_edges
            .iter()
            .map(|edge| edge.head)
            .filter(|&head| head != tail)
            .collect();
        if targets.is_empty() {
            continue;
        }

        let max_weight = in_edge.weight
            + out_edges
                .iter()
                .filter(|edge| edge.head != tail)
                .map(|edge| edge.weight)
                .fold(0.0, Weight::max);
        let witness_weights = witness_search(graph, tail, vertex, max_weight, &targets);

        for out_edge in out_edges.iter().filter(|edge| edge.head != tail) {
            let head = out_edge.head;
            let weight = in_edge.weight + out_edge.weight;
            if let Some(&witness_weight) = witness_weights.get(&head) {
                if witness_weight <= weight || weights_equal(witness_weight, weight) {
                    continue;
                }
            }

            let skipped_edges = [in_edge.id, out_edge.id];
            let reverse = shortcuts.iter_mut().find(|shortcut| {
                shortcut.tail == head
                    && shortcut.head == tail
                    && !shortcut.bidirectional
                    && weights_equal(shortcut.weight, weight)
                    && shortcut.skipped_edges == [skipped_edges[1], skipped_edges[0]]
            });
            if let Some(reverse) = reverse {
                reverse.bidirectional = true;
                continue;
            }

            shortcuts.push(ShortcutCandidate {
                tail,
                head,
                weight,
                distance: in_edge.distance + out_edge.distance,
                skipped_edges,
                vertex,
                original_edge_count: graph.edge(in_edge.id).kind.original_edge_count()
                    + graph.edge(out_edge.id).kind.original_edge_count(),
                bidirectional: false,
            });
        }
    }

    shortcuts
}

/// Stores `shortcut` in `graph` and returns the id of the record holding it.
///
/// An existing shortcut between the same vertices with exactly the same directions and a
/// weight not below the new one is overwritten in place. Otherwise a new record is
/// appended and the covered directions are removed from all other shortcuts between the
/// two vertices, so no direction is ever represented by two shortcuts.
pub fn add_shortcut(graph: &mut LevelGraph, shortcut: &ShortcutCandidate) -> EdgeId {
    let ShortcutCandidate {
        tail,
        head,
        bidirectional,
        ..
    } = *shortcut;

    let parallel_shortcuts = graph
        .incident_edges(tail)
        .iter()
        .copied()
        .filter(|&id| {
            let edge = graph.edge(id);
            edge.is_shortcut() && !edge.is_dead() && edge.other(tail) == head
        })
        .collect_vec();

    let existing = parallel_shortcuts.iter().copied().find(|&id| {
        let edge = graph.edge(id);
        edge.has_access(tail, head, bidirectional) && edge.weight >= shortcut.weight
    });
    if let Some(id) = existing {
        let mut kind = shortcut.kind();
        if graph.edge(id).tail != tail {
            if let EdgeKind::Shortcut { skipped_edges, .. } = &mut kind {
                skipped_edges.reverse();
            }
        }
        trace!("updating shortcut {} between {} and {}", id, tail, head);
        graph.update_edge(id, shortcut.weight, shortcut.distance, kind);
        return id;
    }

    let id = graph.add_edge(EdgeRecord {
        tail,
        head,
        distance: shortcut.distance,
        weight: shortcut.weight,
        forward: true,
        backward: bidirectional,
        kind: shortcut.kind(),
    });

    for other in parallel_shortcuts {
        let edge = graph.edge(other);
        let mut forward = edge.forward;
        let mut backward = edge.backward;
        // the access flag of `other` that corresponds to `from -> to`
        let mut clear = |from: VertexId| {
            if edge.tail == from {
                forward = false;
            } else {
                backward = false;
            }
        };
        clear(tail);
        if bidirectional {
            clear(head);
        }
        graph.set_access(other, forward, backward);
    }

    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_needs_shortcut() {
        // 0 -> 1 -> 2
        let mut graph = LevelGraph::new(3);
        let first = graph.add_directed_edge(0, 1, 1.0);
        let second = graph.add_directed_edge(1, 2, 2.0);

        let shortcuts = find_shortcuts(&graph, 1);
        assert_eq!(shortcuts.len(), 1);
        let shortcut = &shortcuts[0];
        assert_eq!((shortcut.tail, shortcut.head), (0, 2));
        assert_eq!(shortcut.weight, 3.0);
        assert_eq!(shortcut.skipped_edges, [first, second]);
        assert_eq!(shortcut.original_edge_count, 2);
        assert!(!shortcut.bidirectional);
    }

    #[test]
    fn witness_prevents_shortcut() {
        // 0 -> 1 -> 2 and 0 -> 2 with equal weight
        let mut graph = LevelGraph::new(3);
        graph.add_directed_edge(0, 1, 1.0);
        graph.add_directed_edge(1, 2, 1.0);
        graph.add_directed_edge(0, 2, 2.0);

        assert!(find_shortcuts(&graph, 1).is_empty());
    }

    #[test]
    fn merges_reverse_candidates() {
        // 0 <-> 1 <-> 2
        let mut graph = LevelGraph::new(3);
        for (tail, head) in [(0, 1), (1, 2)] {
            graph.add_edge(EdgeRecord {
                tail,
                head,
                distance: 1.0,
                weight: 1.0,
                forward: true,
                backward: true,
                kind: EdgeKind::Original,
            });
        }

        let shortcuts = find_shortcuts(&graph, 1);
        assert_eq!(shortcuts.len(), 1);
        assert!(shortcuts[0].bidirectional);
        assert_eq!((shortcuts[0].tail, shortcuts[0].head), (0, 2));
    }

    #[test]
    fn different_edges_stay_separate() {
        // 0 -> 1 -> 2 and 2 -> 1 -> 0 over different records of equal weight
        let mut graph = LevelGraph::new(3);
        graph.add_directed_edge(0, 1, 1.0);
        graph.add_directed_edge(1, 2, 1.0);
        graph.add_directed_edge(2, 1, 1.0);
        graph.add_directed_edge(1, 0, 1.0);

        let shortcuts = find_shortcuts(&graph, 1);
        assert_eq!(shortcuts.len(), 2);
        assert!(shortcuts.iter().all(|shortcut| !shortcut.bidirectional));
    }

    #[test]
    fn reconciliation_keeps_directions_unique() {
        let mut graph = LevelGraph::new(4);
        let candidate = |head: VertexId, weight: Weight, bidirectional: bool| ShortcutCandidate {
            tail: 0,
            head,
            weight,
            distance: weight,
            skipped_edges: [0, 0],
            vertex: 3,
            original_edge_count: 2,
            bidirectional,
        };
        graph.add_directed_edge(0, 3, 1.0);

        let both = add_shortcut(&mut graph, &candidate(1, 10.0, true));
        // same directions and lower weight: overwritten in place
        assert_eq!(add_shortcut(&mut graph, &candidate(1, 8.0, true)), both);
        assert_eq!(graph.edge(both).weight, 8.0);

        // one direction gets cheaper: new record, old one keeps only 1 -> 0
        let forward = add_shortcut(&mut graph, &candidate(1, 5.0, false));
        assert_ne!(forward, both);
        assert!(graph.edge(both).has_access(1, 0, false));
        assert!(graph.edge(forward).has_access(0, 1, false));

        // both directions covered again: the older records die
        let newest = add_shortcut(&mut graph, &candidate(1, 4.0, true));
        assert!(graph.edge(both).is_dead());
        assert!(graph.edge(forward).is_dead());
        assert!(graph.edge(newest).has_access(0, 1, true));
    }

    #[test]
    fn update_respects_record_orientation() {
        let mut graph = LevelGraph::new(3);
        let shortcut = ShortcutCandidate {
            tail: 2,
            head: 0,
            weight: 3.0,
            distance: 3.0,
            skipped_edges: [4, 5],
            vertex: 1,
            original_edge_count: 2,
            bidirectional: true,
        };
        let id = add_shortcut(&mut graph, &shortcut);

        let reversed = ShortcutCandidate {
            tail: 0,
            head: 2,
            weight: 2.0,
            skipped_edges: [6, 7],
            ..shortcut
        };
        assert_eq!(add_shortcut(&mut graph, &reversed), id);
        assert!(matches!(
            graph.edge(id).kind,
            EdgeKind::Shortcut {
                skipped_edges: [7, 6],
                ..
            }
        ));
    }
}
