use std::cmp::Ordering;

use crate::graphs::VertexId;

/// Queue entry of the contraction order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChPriorityElement {
    pub vertex: VertexId,
    pub priority: i32,
}

impl ChPriorityElement {
    pub fn new(priority: i32, vertex: VertexId) -> Self {
        Self { vertex, priority }
    }
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for ChPriorityElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // Notice that the we flip the ordering on priorities.
        // In case of a tie the smaller vertex comes first, which makes the contraction
        // order reproducible.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for ChPriorityElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
