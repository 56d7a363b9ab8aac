//! Debugging aids: textual dump and invariant checker

use std::fmt::Write;

use thiserror::Error;

use super::AvlTree;
use crate::node::NodeId;

/// A broken AVL invariant found by [`AvlTree::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum InvariantViolation {
    /// Subtree heights differ by more than one.
    #[error("node {key} had balance {balance}")]
    Unbalanced {
        /// Key of the offending node
        key: String,
        /// `height(left) - height(right)`
        balance: i64,
    },

    /// Child does not point back at its parent.
    #[error("invalid edge at {parent}-{child}")]
    BrokenEdge {
        /// Key of the parent
        parent: String,
        /// Key of the child
        child: String,
    },

    /// Stored height disagrees with the subtree.
    #[error("node {key} stores height {stored}, subtree has height {actual}")]
    StaleHeight {
        /// Key of the offending node
        key: String,
        /// Height kept in the node
        stored: u32,
        /// Height recomputed from the children
        actual: u32,
    },

    /// In-order traversal is not strictly increasing.
    #[error("key {key} follows {previous} in order")]
    OutOfOrder {
        /// Offending key
        key: String,
        /// Key visited just before it
        previous: String,
    },

    /// The root has a parent link.
    #[error("root {key} has a parent")]
    RootHasParent {
        /// Key of the root
        key: String,
    },
}

impl AvlTree {
    /// Render the records in key order, one per line, indented by
    /// `height - 1` tabs.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(self.root(), &mut out);
        out
    }

    fn render_into(&self, id: Option<NodeId>, out: &mut String) {
        let Some(id) = id else { return };
        let node = &self.tree()[id];
        self.render_into(node.left(), out);
        let indent = self.node_height(id).saturating_sub(1) as usize;
        let _ = writeln!(out, "{}{}", "\t".repeat(indent), self.record(id).key);
        self.render_into(node.right(), out);
    }

    /// Walk the whole tree and report every broken invariant.
    ///
    /// An empty result means the tree is a valid AVL tree.
    pub fn check(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        if let Some(root) = self.root() {
            if self.tree()[root].parent().is_some() {
                violations.push(InvariantViolation::RootHasParent {
                    key: self.record(root).key.clone(),
                });
            }
            self.check_subtree(root, &mut violations);
        }

        let mut previous: Option<&str> = None;
        for record in self.iter() {
            if let Some(prev) = previous {
                if prev >= record.key.as_str() {
                    violations.push(InvariantViolation::OutOfOrder {
                        key: record.key.clone(),
                        previous: prev.to_string(),
                    });
                }
            }
            previous = Some(&record.key);
        }

        violations
    }

    /// Returns the recomputed height of the subtree.
    fn check_subtree(&self, id: NodeId, violations: &mut Vec<InvariantViolation>) -> u32 {
        let node = &self.tree()[id];
        let key = &self.record(id).key;

        let mut heights = [0u32; 2];
        for (slot, child) in [node.left(), node.right()].into_iter().enumerate() {
            let Some(child) = child else { continue };
            if self.tree()[child].parent() != Some(id) {
                violations.push(InvariantViolation::BrokenEdge {
                    parent: key.clone(),
                    child: self.record(child).key.clone(),
                });
            }
            heights[slot] = self.check_subtree(child, violations);
        }

        let balance = i64::from(heights[0]) - i64::from(heights[1]);
        if balance.abs() > 1 {
            violations.push(InvariantViolation::Unbalanced {
                key: key.clone(),
                balance,
            });
        }

        let actual = 1 + heights[0].max(heights[1]);
        let stored = self.node_height(id);
        if stored != actual {
            violations.push(InvariantViolation::StaleHeight {
                key: key.clone(),
                stored,
                actual,
            });
        }
        actual
    }
}
