//! # Three trees on one node model
//!
//! This library implements three classic tree algorithms on a single
//! arena-backed binary node:
//!
//! 1. **AVL tree**: string-keyed search tree, rebalanced by rotations
//!    after every insert and remove
//! 2. **Huffman tree**: optimal prefix code built by merging the two
//!    lightest nodes of a min-priority queue
//! 3. **Segment tree**: static tree over sorted coordinates answering
//!    "how many intervals contain this point"
//!
//! Nodes live in a [`node::NodeArena`] and refer to each other by
//! [`NodeId`]; the parent link is a plain id, so rotations and splices
//! never leave a dangling reference.
//!
//! ## Usage Example
//!
//! ```
//! use arborist::{AvlTree, HuffmanTree, SegmentTree};
//!
//! let mut avl = AvlTree::new();
//! avl.insert("005", 5)?;
//! avl.insert("010", 10)?;
//! avl.insert("003", 3)?;
//! assert!(avl.check().is_empty());
//! assert_eq!(avl.remove("010").map(|r| r.value), Some(10));
//!
//! let huffman = HuffmanTree::from_weights([('a', 4), ('b', 2), ('c', 1), ('d', 1)])?;
//! assert_eq!(huffman.encode_path('c')?.to_string(), "110");
//!
//! let mut segments = SegmentTree::build(&[0.0, 3.0, 5.0])?;
//! segments.insert_interval(0.0, 5.0);
//! assert_eq!(segments.stab_query(3.0), 1);
//! # Ok::<(), arborist::TreeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod node;      // Arena, node, payload variants
pub mod avl;       // Balanced search tree
pub mod segment;   // Stabbing-count segment tree
pub mod huffman;   // Huffman coding tree
pub mod driver;    // Exercise harness and configuration

// Re-exports for convenience
pub use node::{NodeId, Record, Tree};
pub use avl::{AvlTree, InvariantViolation, Probe};
pub use segment::{MoveSequence, SegmentTree};
pub use huffman::{Frequencies, HuffmanCode, HuffmanTree, MinQueue, WeightQueue};
pub use driver::DriverConfig;

use thiserror::Error;

/// Errors reported by the tree engines
#[derive(Error, Debug)]
pub enum TreeError {
    /// Key already stored in the AVL tree
    #[error("key '{0}' is already in the tree")]
    DuplicateKey(String),

    /// Huffman build without any symbol
    #[error("cannot build a huffman tree from an empty weight set")]
    EmptyInput,

    /// Symbol supplied twice to the Huffman builder
    #[error("symbol '{0}' appears more than once")]
    DuplicateSymbol(char),

    /// Symbol not present in the Huffman tree
    #[error("symbol '{0}' is not in the tree")]
    UnknownSymbol(char),

    /// Merged Huffman weight does not fit in `u64`
    #[error("combined weight overflows")]
    WeightOverflow,

    /// Coordinates unusable for a segment tree
    #[error("invalid coordinates: {0}")]
    InvalidPoints(String),

    /// Malformed move sequence
    #[error("invalid move sequence at token {position}: {reason}")]
    InvalidMoves {
        /// Index of the offending whitespace-separated token
        position: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Input file could not be read
    #[error("failed to read {path}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TreeError::DuplicateKey("007".into()).to_string(),
            "key '007' is already in the tree"
        );
        assert_eq!(
            TreeError::InvalidMoves {
                position: 4,
                reason: "missing move".into(),
            }
            .to_string(),
            "invalid move sequence at token 4: missing move"
        );
    }
}
