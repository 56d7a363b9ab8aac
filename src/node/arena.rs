//! Node storage with slot recycling and release accounting

use std::ops::{Index, IndexMut};

use super::{Node, NodeId};

/// Allocation counters for one arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Nodes handed out since creation
    pub allocated: usize,

    /// Nodes released since creation
    pub released: usize,

    /// Maximum number of simultaneously live nodes
    pub peak: usize,
}

impl ArenaStats {
    /// Nodes currently live.
    pub fn live(&self) -> usize {
        self.allocated - self.released
    }
}

#[derive(Debug)]
enum Entry {
    Occupied(Node),
    Free { next: Option<u32> },
}

/// Arena of nodes addressed by stable [`NodeId`]s.
///
/// Released slots go onto a free list and are reused by later
/// allocations. A released id must not be used again; indexing with one
/// panics.
#[derive(Debug, Default)]
pub struct NodeArena {
    entries: Vec<Entry>,

    /// Head of the free list (index into `entries`)
    free_head: Option<u32>,

    stats: ArenaStats,
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Store `node`, returning its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let index = match self.free_head {
            Some(index) => {
                let next = match self.entries[index as usize] {
                    Entry::Free { next } => next,
                    Entry::Occupied(_) => unreachable!("free list points at a live node"),
                };
                self.free_head = next;
                self.entries[index as usize] = Entry::Occupied(node);
                index
            }
            None => {
                let index = u32::try_from(self.entries.len())
                    .unwrap_or_else(|_| panic!("node arena exhausted"));
                self.entries.push(Entry::Occupied(node));
                index
            }
        };

        self.stats.allocated += 1;
        self.stats.peak = self.stats.peak.max(self.stats.live());
        NodeId(index)
    }

    /// Remove the node stored under `id` and hand it back.
    ///
    /// Panics if `id` was already released.
    pub fn release(&mut self, id: NodeId) -> Node {
        let slot = &mut self.entries[id.index()];
        let entry = std::mem::replace(
            slot,
            Entry::Free {
                next: self.free_head,
            },
        );
        match entry {
            Entry::Occupied(node) => {
                self.free_head = Some(id.0);
                self.stats.released += 1;
                node
            }
            Entry::Free { next } => {
                // Restore the slot before reporting the double release.
                *slot = Entry::Free { next };
                panic!("node {id} released twice");
            }
        }
    }

    /// Node stored under `id`, if it is live.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        match self.entries.get(id.index()) {
            Some(Entry::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Mutable node stored under `id`, if it is live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        match self.entries.get_mut(id.index()) {
            Some(Entry::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.stats.live()
    }

    /// Whether no node is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocation counters.
    pub fn stats(&self) -> ArenaStats {
        self.stats
    }

    /// Release every live node. Counters keep accumulating.
    pub fn clear(&mut self) {
        let live = self
            .entries
            .iter()
            .filter(|entry| matches!(entry, Entry::Occupied(_)))
            .count();
        self.stats.released += live;
        self.entries.clear();
        self.free_head = None;
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
            .unwrap_or_else(|| panic!("stale node id {id}"))
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.get_mut(id)
            .unwrap_or_else(|| panic!("stale node id {id}"))
    }
}
