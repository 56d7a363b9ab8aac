//! Min-priority queue of tree nodes keyed by weight

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::NodeId;

/// What the Huffman builder needs from a priority queue.
///
/// Ties between equal weights may resolve in any order, as long as the
/// order is consistent within one build.
pub trait MinQueue {
    /// Queue `node` under `weight`.
    fn push(&mut self, node: NodeId, weight: u64);

    /// Remove and return the lowest-weight node.
    fn pop_min(&mut self) -> Option<NodeId>;

    /// Number of queued nodes.
    fn len(&self) -> usize;

    /// Whether the queue is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Binary heap ordered by `(weight, arrival)`: equal weights leave in
/// the order they were pushed.
#[derive(Debug, Default)]
pub struct WeightQueue {
    heap: BinaryHeap<Reverse<(u64, u64, NodeId)>>,
    arrivals: u64,
}

impl WeightQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MinQueue for WeightQueue {
    fn push(&mut self, node: NodeId, weight: u64) {
        self.heap.push(Reverse((weight, self.arrivals, node)));
        self.arrivals += 1;
    }

    fn pop_min(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, _, node))| node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Payload, Tree};

    #[test]
    fn test_equal_weights_leave_in_arrival_order() {
        let mut tree = Tree::new();
        let ids: Vec<NodeId> = (0..4).map(|_| tree.make_leaf(Payload::Empty)).collect();

        let mut queue = WeightQueue::new();
        queue.push(ids[0], 7);
        queue.push(ids[1], 2);
        queue.push(ids[2], 7);
        queue.push(ids[3], 2);
        assert_eq!(queue.len(), 4);

        let order: Vec<NodeId> = std::iter::from_fn(|| queue.pop_min()).collect();
        assert_eq!(order, vec![ids[1], ids[3], ids[0], ids[2]]);
        assert!(queue.is_empty());
    }
}
