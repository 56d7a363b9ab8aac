//! Height-balanced binary search tree keyed by string
//!
//! Classic AVL on the shared node model:
//! - every node stores the height of its subtree (empty leaf = 0)
//! - after any insert/remove the ancestors are walked up to the root,
//!   heights refreshed and single/double rotations applied at `|b| = 2`
//! - empty leaves are vacant [`Slot`]s, never allocated
//!
//! The root may change identity during a rotation; the owning [`Tree`]
//! tracks it.

mod check;

pub use check::InvariantViolation;

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::node::{AvlCell, NodeId, Payload, Record, Side, Slot, Tree};
use crate::TreeError;

/// Outcome of [`AvlTree::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Node holding the key
    Found(NodeId),

    /// Empty leaf reached: the position the key would be inserted at
    Vacant(Slot),
}

impl Probe {
    /// True when the search ended on an empty leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Probe::Vacant(_))
    }

    /// Matching node, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Probe::Found(id) => Some(*id),
            Probe::Vacant(_) => None,
        }
    }
}

/// AVL tree of [`Record`]s ordered by key.
#[derive(Debug, Default)]
pub struct AvlTree {
    tree: Tree,
}

impl AvlTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the tree stores no record (root is an empty leaf).
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Current root node.
    pub fn root(&self) -> Option<NodeId> {
        self.tree.root()
    }

    /// Underlying node storage, for inspection.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Height of the whole tree (0 when empty).
    pub fn height(&self) -> u32 {
        self.height_of(self.tree.root())
    }

    /// Height stored at `id`.
    pub fn node_height(&self, id: NodeId) -> u32 {
        self.cell(id).height
    }

    /// Record stored at `id`.
    pub fn record(&self, id: NodeId) -> &Record {
        &self.cell(id).record
    }

    /// `height(left) - height(right)` at `id`.
    pub fn balance(&self, id: NodeId) -> i64 {
        let node = &self.tree[id];
        i64::from(self.height_of(node.left())) - i64::from(self.height_of(node.right()))
    }

    /// Descend from the root comparing `key` against each node.
    ///
    /// Returns the matching node, or the empty leaf where the search fell
    /// off the tree. Never fails.
    pub fn search(&self, key: &str) -> Probe {
        let mut slot = Slot::Root;
        while let Some(id) = self.tree.occupant(slot) {
            slot = match key.cmp(self.record(id).key.as_str()) {
                Ordering::Equal => return Probe::Found(id),
                Ordering::Less => Slot::Child(id, Side::Left),
                Ordering::Greater => Slot::Child(id, Side::Right),
            };
        }
        Probe::Vacant(slot)
    }

    /// Record stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.search(key).node().map(|id| self.record(id))
    }

    /// Whether `key` is stored.
    pub fn contains(&self, key: &str) -> bool {
        !self.search(key).is_leaf()
    }

    /// Insert a record, then rebalance up to the root.
    ///
    /// Keys are unique: an existing key is rejected and the tree is left
    /// untouched.
    pub fn insert(&mut self, key: impl Into<String>, value: i64) -> Result<NodeId, TreeError> {
        let record = Record::new(key, value);
        let slot = match self.search(&record.key) {
            Probe::Found(_) => return Err(TreeError::DuplicateKey(record.key)),
            Probe::Vacant(slot) => slot,
        };

        trace!(key = %record.key, ?slot, "inserting");
        let id = self
            .tree
            .promote(slot, Payload::Avl(AvlCell { height: 1, record }));
        self.retrace(slot.parent());
        Ok(id)
    }

    /// Remove the record stored under `key` and hand it to the caller.
    ///
    /// Returns `None` without touching the tree when the key is absent.
    pub fn remove(&mut self, key: &str) -> Option<Record> {
        let target = self.search(key).node()?;

        let (retrace_from, record) = match self.tree[target].children() {
            // Two children: pull the in-order successor up into `target`
            // and excise the successor's own node instead.
            Some((_, right)) => {
                let successor = self.leftmost(right);
                let (parent, moved) = self.splice(successor);
                let record = std::mem::replace(&mut self.cell_mut(target).record, moved);
                (parent, record)
            }
            None => self.splice(target),
        };

        self.retrace(retrace_from);
        debug!(key, remaining = self.len(), "removed");
        Some(record)
    }

    /// Release every record.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Records in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            avl: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.tree.root());
        iter
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|record| record.key.as_str()).collect()
    }

    fn cell(&self, id: NodeId) -> &AvlCell {
        let payload = self.tree[id].payload();
        match payload.as_avl() {
            Some(cell) => cell,
            None => unreachable!("{} node {id} inside an AVL tree", payload.kind()),
        }
    }

    fn cell_mut(&mut self, id: NodeId) -> &mut AvlCell {
        match self.tree.payload_mut(id) {
            Payload::Avl(cell) => cell,
            other => unreachable!("{} node {id} inside an AVL tree", other.kind()),
        }
    }

    fn height_of(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self.cell(id).height)
    }

    fn update_height(&mut self, id: NodeId) {
        let node = &self.tree[id];
        let height = 1 + self.height_of(node.left()).max(self.height_of(node.right()));
        self.cell_mut(id).height = height;
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.tree[id].left() {
            id = left;
        }
        id
    }

    fn heavy_child(&self, id: NodeId, side: Side) -> NodeId {
        match self.tree[id].child(side) {
            Some(child) => child,
            None => unreachable!("rotation at {id} without a {side:?} child"),
        }
    }

    /// Unlink `id`, which has at most one child, putting that child in its
    /// place. Returns the former parent and the freed node's record.
    fn splice(&mut self, id: NodeId) -> (Option<NodeId>, Record) {
        let node = &self.tree[id];
        debug_assert!(node.children().is_none(), "splicing {id} with two children");

        let replacement = node.left().or(node.right());
        let slot = self.tree.slot_of(id);
        self.tree.link(slot, replacement);
        trace!(node = %id, ?replacement, "spliced");

        match self.tree.release(id).into_payload() {
            Payload::Avl(cell) => (slot.parent(), cell.record),
            other => unreachable!("{} node {id} inside an AVL tree", other.kind()),
        }
    }

    /// Walk from `start` to the root, refreshing heights and rotating
    /// wherever a node went out of balance.
    fn retrace(&mut self, start: Option<NodeId>) {
        let mut cursor = start;
        while let Some(id) = cursor {
            self.update_height(id);
            let top = self.rebalance(id);
            cursor = self.tree[top].parent();
        }
    }

    /// Restore the balance bound at `x`; returns the subtree's new root.
    fn rebalance(&mut self, x: NodeId) -> NodeId {
        match self.balance(x) {
            2 => {
                let left = self.heavy_child(x, Side::Left);
                if self.balance(left) < 0 {
                    self.rotate_left(left);
                }
                self.rotate_right(x)
            }
            -2 => {
                let right = self.heavy_child(x, Side::Right);
                if self.balance(right) > 0 {
                    self.rotate_right(right);
                }
                self.rotate_left(x)
            }
            balance => {
                debug_assert!(balance.abs() <= 1, "balance {balance} at {x}");
                x
            }
        }
    }

    fn rotate_right(&mut self, x: NodeId) -> NodeId {
        self.rotate(x, Side::Right)
    }

    fn rotate_left(&mut self, x: NodeId) -> NodeId {
        self.rotate(x, Side::Left)
    }

    /// Rotate at `x` towards `direction`.
    ///
    /// For a right rotation: `y = x.left`, `x.left = y.right`,
    /// `y.right = x`, and `y` takes over `x`'s position.
    fn rotate(&mut self, x: NodeId, direction: Side) -> NodeId {
        let lifted = direction.flip();
        let y = self.heavy_child(x, lifted);
        let slot = self.tree.slot_of(x);
        let inner = self.tree[y].child(direction);

        self.tree.link(Slot::Child(x, lifted), inner);
        self.tree.link(slot, Some(y));
        self.tree.link(Slot::Child(y, direction), Some(x));

        self.update_height(x);
        self.update_height(y);
        trace!(demoted = %x, promoted = %y, ?direction, "rotated");
        y
    }
}

/// In-order iterator over an [`AvlTree`].
#[derive(Debug)]
pub struct Iter<'a> {
    avl: &'a AvlTree,
    stack: Vec<NodeId>,
}

impl Iter<'_> {
    fn push_left_spine(&mut self, mut cursor: Option<NodeId>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = self.avl.tree[id].left();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<&'a Record> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.avl.tree[id].right());
        Some(self.avl.record(id))
    }
}
