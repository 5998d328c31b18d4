use serde::{Deserialize, Serialize};

use super::{Distance, EdgeId, VertexId, Weight};

/// Distinguishes edges of the road network from edges added during contraction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EdgeKind {
    Original,
    Shortcut {
        /// The two summarized edges, ordered from the tail side to the head side of the
        /// record they belong to.
        skipped_edges: [EdgeId; 2],
        /// The contracted vertex both skipped edges are incident to.
        vertex: VertexId,
        /// Number of original edges this shortcut finally represents.
        original_edge_count: u32,
    },
}

impl EdgeKind {
    pub fn is_shortcut(&self) -> bool {
        matches!(self, EdgeKind::Shortcut { .. })
    }

    pub fn original_edge_count(&self) -> u32 {
        match self {
            EdgeKind::Original => 1,
            EdgeKind::Shortcut {
                original_edge_count,
                ..
            } => *original_edge_count,
        }
    }
}

/// A stored edge. The record can be traversable from tail to head, from head to tail or
/// both ways. Both directions share the weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub tail: VertexId,
    pub head: VertexId,
    pub distance: Distance,
    pub weight: Weight,
    pub forward: bool,
    pub backward: bool,
    pub kind: EdgeKind,
}

impl EdgeRecord {
    pub fn is_shortcut(&self) -> bool {
        self.kind.is_shortcut()
    }

    /// Returns the endpoint which is not `vertex`.
    pub fn other(&self, vertex: VertexId) -> VertexId {
        if self.tail == vertex {
            self.head
        } else {
            self.tail
        }
    }

    /// Returns true if the record can be traversed starting at `from`.
    pub fn is_traversable_from(&self, from: VertexId) -> bool {
        (self.tail == from && self.forward) || (self.head == from && self.backward)
    }

    /// A record without access in either direction is dead and never traversed again.
    pub fn is_dead(&self) -> bool {
        !self.forward && !self.backward
    }

    /// Returns true if the record allows exactly the traversals `from -> to` and, if
    /// `both` is set, `to -> from`.
    pub fn has_access(&self, from: VertexId, to: VertexId, both: bool) -> bool {
        let (forward, backward) = if self.tail == from && self.head == to {
            (self.forward, self.backward)
        } else if self.tail == to && self.head == from {
            (self.backward, self.forward)
        } else {
            return false;
        };
        forward && backward == both
    }

    /// Orients the record so that it starts at `from`.
    pub fn directed(&self, id: EdgeId, from: VertexId) -> DirectedWeightedEdge {
        DirectedWeightedEdge {
            id,
            tail: from,
            head: self.other(from),
            weight: self.weight,
            distance: self.distance,
        }
    }
}

/// A traversal of an edge record in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectedWeightedEdge {
    pub id: EdgeId,
    pub tail: VertexId,
    pub head: VertexId,
    pub weight: Weight,
    pub distance: Distance,
}

impl DirectedWeightedEdge {
    pub fn reversed(&self) -> DirectedWeightedEdge {
        DirectedWeightedEdge {
            id: self.id,
            tail: self.head,
            head: self.tail,
            weight: self.weight,
            distance: self.distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(forward: bool, backward: bool) -> EdgeRecord {
        EdgeRecord {
            tail: 1,
            head: 2,
            distance: 3.0,
            weight: 4.0,
            forward,
            backward,
            kind: EdgeKind::Original,
        }
    }

    #[test]
    fn access() {
        let one_way = record(true, false);
        assert!(one_way.is_traversable_from(1));
        assert!(!one_way.is_traversable_from(2));
        assert!(one_way.has_access(1, 2, false));
        assert!(!one_way.has_access(1, 2, true));
        assert!(!one_way.has_access(2, 1, false));

        let both = record(true, true);
        assert!(both.has_access(2, 1, true));
        assert!(!both.has_access(2, 1, false));

        let reverse_only = record(false, true);
        assert!(reverse_only.has_access(2, 1, false));
        assert!(record(false, false).is_dead());
    }

    #[test]
    fn directed() {
        let edge = record(true, true).directed(7, 2);
        assert_eq!((edge.tail, edge.head, edge.id), (2, 1, 7));
        assert_eq!(edge.reversed().tail, 1);
    }
}
