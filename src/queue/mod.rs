use std::cmp::Ordering;

use crate::graphs::{VertexId, Weight};

pub mod heap_queue;

#[derive(Copy, Clone, Debug)]
pub struct DijkstraQueueElement {
    pub weight: Weight,
    pub vertex: VertexId,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for DijkstraQueueElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // Weights are never NaN, `total_cmp` gives the total order `Ord` needs.
        // In case of a tie the smaller vertex comes first so searches are reproducible.
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DijkstraQueueElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DijkstraQueueElement {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DijkstraQueueElement {}

impl DijkstraQueueElement {
    pub fn new(weight: Weight, vertex: VertexId) -> DijkstraQueueElement {
        DijkstraQueueElement { weight, vertex }
    }
}

/// Queue of a Dijkstra search. Implementations do not need a decrease key operation,
/// stale elements are skipped by the search.
pub trait DijkstaQueue {
    fn push(&mut self, state: DijkstraQueueElement);
    fn pop(&mut self) -> Option<DijkstraQueueElement>;
    fn peek(&self) -> Option<&DijkstraQueueElement>;
    fn is_empty(&self) -> bool;
    fn clear(&mut self);
}
