//! Shared binary-tree node model
//!
//! All three trees are built from the same [`Node`]:
//! - children are owned ids, the parent link is a non-owning id
//! - a node without children is a leaf
//! - per-algorithm state lives in a tagged [`Payload`]
//!
//! Nodes are stored in a [`NodeArena`]; a [`Tree`] pairs an arena with
//! its current root. Rotations only reassign ids, so no link can dangle.

mod arena;
mod payload;

pub use arena::{ArenaStats, NodeArena};
pub use payload::{AvlCell, HuffmanCell, Payload, Record, SegmentCell};

use std::fmt;
use std::ops::Index;

/// Stable handle of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which child of a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left child
    Left,

    /// Right child
    Right,
}

impl Side {
    /// The other side.
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A position in a tree that a node can occupy.
///
/// A vacant slot plays the role of an empty leaf: it is where a search
/// ends when the key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The tree root position
    Root,

    /// Child position below `parent`
    Child(NodeId, Side),
}

impl Slot {
    /// Owner of the position, `None` for the root.
    pub fn parent(self) -> Option<NodeId> {
        match self {
            Slot::Root => None,
            Slot::Child(parent, _) => Some(parent),
        }
    }
}

/// Binary tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
    payload: Payload,
}

impl Node {
    /// Isolated node carrying `payload`.
    pub fn new(payload: Payload) -> Self {
        Self {
            left: None,
            right: None,
            parent: None,
            payload,
        }
    }

    /// True when the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Left child
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Child on `side`.
    #[inline]
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Parent (non-owning)
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Both children, when the node is internal with two children.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.left.zip(self.right)
    }

    /// Per-algorithm state.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Mutable per-algorithm state.
    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Consume the node, keeping only its payload.
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// Arena plus root: the owner of every node in one tree.
#[derive(Debug, Default)]
pub struct Tree {
    arena: NodeArena,
    root: Option<NodeId>,
}

impl Tree {
    /// Empty tree (the root position is vacant).
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            root: None,
        }
    }

    /// Current root
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Make `root` the root node. It must be detached.
    pub fn set_root(&mut self, root: Option<NodeId>) {
        if let Some(id) = root {
            debug_assert!(self.arena[id].parent.is_none(), "root {id} still has a parent");
        }
        self.root = root;
    }

    /// Node storage
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Node under `id`; panics on a released id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    /// Mutable payload of `id`.
    pub fn payload_mut(&mut self, id: NodeId) -> &mut Payload {
        &mut self.arena[id].payload
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the tree holds no node.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Allocate an isolated leaf carrying `payload`.
    pub fn make_leaf(&mut self, payload: Payload) -> NodeId {
        self.arena.alloc(Node::new(payload))
    }

    /// Wire `left` and `right` as the children of `node`.
    ///
    /// Both children must be detached (no parent); `node` must be a leaf.
    pub fn attach(&mut self, node: NodeId, left: NodeId, right: NodeId) {
        debug_assert!(self.arena[node].is_leaf(), "attach onto internal node {node}");
        debug_assert!(self.arena[left].parent.is_none(), "{left} already has a parent");
        debug_assert!(self.arena[right].parent.is_none(), "{right} already has a parent");

        let parent = &mut self.arena[node];
        parent.left = Some(left);
        parent.right = Some(right);
        self.arena[left].parent = Some(node);
        self.arena[right].parent = Some(node);
    }

    /// Fill the vacant `slot` with a new node carrying `payload`.
    ///
    /// The new node starts with two empty (absent) children.
    pub fn promote(&mut self, slot: Slot, payload: Payload) -> NodeId {
        debug_assert!(self.occupant(slot).is_none(), "promote into occupied {slot:?}");
        let id = self.make_leaf(payload);
        self.link(slot, Some(id));
        id
    }

    /// The node occupying `slot`.
    pub fn occupant(&self, slot: Slot) -> Option<NodeId> {
        match slot {
            Slot::Root => self.root,
            Slot::Child(parent, side) => self.arena[parent].child(side),
        }
    }

    /// Position currently held by `id`.
    pub fn slot_of(&self, id: NodeId) -> Slot {
        match self.arena[id].parent {
            None => Slot::Root,
            Some(parent) => {
                let side = if self.arena[parent].left == Some(id) {
                    Side::Left
                } else {
                    debug_assert_eq!(self.arena[parent].right, Some(id), "broken edge at {id}");
                    Side::Right
                };
                Slot::Child(parent, side)
            }
        }
    }

    /// Put `child` (or nothing) into `slot`, updating the parent link.
    ///
    /// Whatever occupied the slot before is detached but not released:
    /// its parent link is cleared unless it was already relinked elsewhere.
    pub fn link(&mut self, slot: Slot, child: Option<NodeId>) {
        let previous = match slot {
            Slot::Root => std::mem::replace(&mut self.root, child),
            Slot::Child(parent, side) => {
                let previous = self.arena[parent].child(side);
                self.arena[parent].set_child(side, child);
                previous
            }
        };
        if let Some(old) = previous {
            if self.arena[old].parent == slot.parent() {
                self.arena[old].parent = None;
            }
        }
        if let Some(id) = child {
            self.arena[id].parent = slot.parent();
        }
    }

    /// Release `id` alone and return it.
    ///
    /// The node must already be detached from the tree; its children, if
    /// any, stay in the arena and are the caller's responsibility.
    pub fn release(&mut self, id: NodeId) -> Node {
        self.arena.release(id)
    }

    /// Release the subtree rooted at `id`, children before parents.
    ///
    /// Detaches the subtree from its parent first.
    pub fn free_subtree(&mut self, id: NodeId) -> usize {
        let slot = self.slot_of(id);
        if self.occupant(slot) == Some(id) {
            self.link(slot, None);
        }

        // Pre-order collection, released in reverse: every child is
        // released before its parent.
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            let node = &self.arena[current];
            stack.extend(node.left);
            stack.extend(node.right);
        }

        for &current in order.iter().rev() {
            self.arena.release(current);
        }
        order.len()
    }

    /// Release every node and vacate the root.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }
}
