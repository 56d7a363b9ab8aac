//! Huffman coding tree
//!
//! Leaves carry one symbol and its weight. The builder repeatedly merges
//! the two lightest nodes from a [`MinQueue`] into a parent whose weight is
//! their sum and whose symbol set is their concatenation, until a single
//! root remains. Codes are recovered by walking down from the root,
//! choosing the child whose symbol set contains the target.

mod code;
mod queue;

pub use code::{Frequencies, HuffmanCode};
pub use queue::{MinQueue, WeightQueue};

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::node::{HuffmanCell, NodeId, Payload, Tree};
use crate::TreeError;

/// Huffman tree over a set of weighted symbols.
#[derive(Debug)]
pub struct HuffmanTree {
    tree: Tree,
    root: NodeId,
}

impl HuffmanTree {
    /// Build from `(symbol, weight)` pairs using a [`WeightQueue`].
    pub fn from_weights<I>(weights: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        Self::from_weights_with(weights, WeightQueue::new())
    }

    /// Build from `(symbol, weight)` pairs, ordering merges with `queue`.
    pub fn from_weights_with<I, Q>(weights: I, mut queue: Q) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (char, u64)>,
        Q: MinQueue,
    {
        let mut tree = Tree::new();
        let mut seen = String::new();
        for (symbol, weight) in weights {
            if seen.contains(symbol) {
                return Err(TreeError::DuplicateSymbol(symbol));
            }
            seen.push(symbol);
            let leaf = tree.make_leaf(Payload::Huffman(HuffmanCell {
                weight,
                symbols: symbol.to_string(),
            }));
            queue.push(leaf, weight);
        }
        Self::build(tree, queue)
    }

    /// Build from letter counts.
    pub fn from_frequencies(frequencies: &Frequencies) -> Result<Self, TreeError> {
        Self::from_weights(frequencies.iter())
    }

    /// Merge the queued leaves of `tree` into a single coding tree.
    ///
    /// Every node in `queue` must belong to `tree` and be detached.
    pub fn build<Q: MinQueue>(mut tree: Tree, mut queue: Q) -> Result<Self, TreeError> {
        let leaves = queue.len();
        let root = loop {
            let first = queue.pop_min().ok_or(TreeError::EmptyInput)?;
            let Some(second) = queue.pop_min() else {
                break first;
            };

            let (a, b) = (cell(&tree, first), cell(&tree, second));
            let weight = a.weight.checked_add(b.weight).ok_or(TreeError::WeightOverflow)?;
            let symbols = format!("{}{}", a.symbols, b.symbols);
            trace!(%symbols, weight, "merging");

            let parent = tree.make_leaf(Payload::Huffman(HuffmanCell { weight, symbols }));
            tree.attach(parent, first, second);
            queue.push(parent, weight);
        };

        tree.set_root(Some(root));
        debug!(leaves, nodes = tree.len(), "built huffman tree");
        Ok(Self { tree, root })
    }

    /// Root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Underlying node storage, for inspection.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Weight and symbol set of `id`.
    pub fn cell(&self, id: NodeId) -> &HuffmanCell {
        cell(&self.tree, id)
    }

    /// Total weight of all symbols.
    pub fn weight(&self) -> u64 {
        self.cell(self.root).weight
    }

    /// All symbols, in left-to-right leaf order.
    pub fn symbols(&self) -> &str {
        &self.cell(self.root).symbols
    }

    /// Code for `symbol`: the left/right path from the root to its leaf.
    ///
    /// A tree holding a single symbol yields the empty code.
    pub fn encode_path(&self, symbol: char) -> Result<HuffmanCode, TreeError> {
        if !self.symbols().contains(symbol) {
            return Err(TreeError::UnknownSymbol(symbol));
        }

        let mut code = HuffmanCode::new();
        let mut current = self.root;
        while !is_single(&self.cell(current).symbols, symbol) {
            let Some((left, right)) = self.tree[current].children() else {
                unreachable!("leaf {current} does not hold '{symbol}'");
            };
            if self.cell(left).symbols.contains(symbol) {
                code.push(false);
                current = left;
            } else {
                code.push(true);
                current = right;
            }
        }
        Ok(code)
    }

    /// Code of every symbol, ascending by symbol.
    pub fn codes(&self) -> BTreeMap<char, HuffmanCode> {
        let mut codes = BTreeMap::new();
        for symbol in self.symbols().chars() {
            if let Ok(code) = self.encode_path(symbol) {
                codes.insert(symbol, code);
            }
        }
        codes
    }

    /// Sum over the leaves of weight times code length.
    ///
    /// Fails with [`TreeError::WeightOverflow`] when the sum does not fit
    /// in `u64`, which can happen even when the total weight does.
    pub fn weighted_length(&self) -> Result<u64, TreeError> {
        let mut total: u64 = 0;
        let mut stack = vec![(self.root, 0u64)];
        while let Some((id, depth)) = stack.pop() {
            match self.tree[id].children() {
                Some((left, right)) => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                None => {
                    total = self
                        .cell(id)
                        .weight
                        .checked_mul(depth)
                        .and_then(|bits| total.checked_add(bits))
                        .ok_or(TreeError::WeightOverflow)?;
                }
            }
        }
        Ok(total)
    }
}

fn cell(tree: &Tree, id: NodeId) -> &HuffmanCell {
    let payload = tree[id].payload();
    match payload.as_huffman() {
        Some(cell) => cell,
        None => unreachable!("{} node {id} inside a huffman tree", payload.kind()),
    }
}

fn is_single(symbols: &str, symbol: char) -> bool {
    let mut chars = symbols.chars();
    chars.next() == Some(symbol) && chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes_as_strings(tree: &HuffmanTree) -> Vec<(char, String)> {
        tree.codes()
            .into_iter()
            .map(|(symbol, code)| (symbol, code.to_string()))
            .collect()
    }

    #[test]
    fn test_lightest_pair_merged_first() {
        let tree =
            HuffmanTree::from_weights([('a', 4), ('b', 2), ('c', 1), ('d', 1)]).unwrap();
        assert_eq!(tree.weight(), 8);
        assert_eq!(tree.symbols(), "abcd");
        assert_eq!(
            codes_as_strings(&tree),
            vec![
                ('a', "0".to_string()),
                ('b', "10".to_string()),
                ('c', "110".to_string()),
                ('d', "111".to_string()),
            ]
        );
        assert_eq!(tree.weighted_length().unwrap(), 14);
    }

    #[test]
    fn test_internal_nodes_sum_children() {
        let tree = HuffmanTree::from_frequencies(&Frequencies::from_lowercase(
            "aabacccadadadadda",
        ))
        .unwrap();

        let mut stack = vec![tree.root()];
        while let Some(id) = stack.pop() {
            if let Some((left, right)) = tree.tree()[id].children() {
                let (l, r) = (tree.cell(left), tree.cell(right));
                assert_eq!(tree.cell(id).weight, l.weight + r.weight);
                assert_eq!(tree.cell(id).symbols, format!("{}{}", l.symbols, r.symbols));
                stack.extend([left, right]);
            } else {
                assert_eq!(tree.cell(id).symbols.chars().count(), 1);
            }
        }
        assert_eq!(tree.tree().len(), 7);
    }

    #[test]
    fn test_single_symbol_has_empty_code() {
        let tree = HuffmanTree::from_weights([('z', 9)]).unwrap();
        assert!(tree.tree()[tree.root()].is_leaf());
        assert!(tree.encode_path('z').unwrap().is_empty());
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = HuffmanTree::from_weights(std::iter::empty()).unwrap_err();
        assert!(matches!(err, TreeError::EmptyInput));
    }

    #[test]
    fn test_unknown_and_duplicate_symbols_rejected() {
        let tree = HuffmanTree::from_weights([('a', 1), ('b', 1)]).unwrap();
        assert!(matches!(tree.encode_path('q'), Err(TreeError::UnknownSymbol('q'))));

        let err = HuffmanTree::from_weights([('a', 1), ('a', 2)]).unwrap_err();
        assert!(matches!(err, TreeError::DuplicateSymbol('a')));
    }

    #[test]
    fn test_weight_overflow_reported() {
        let err = HuffmanTree::from_weights([('a', u64::MAX), ('b', 1)]).unwrap_err();
        assert!(matches!(err, TreeError::WeightOverflow));
    }

    #[test]
    fn test_weighted_length_overflow_reported() {
        // Total weight 3 * 2^62 fits, but the two depth-2 leaves alone
        // contribute 2^64 bits
        let heavy = 1u64 << 62;
        let tree = HuffmanTree::from_weights([('a', heavy), ('b', heavy), ('c', heavy)]).unwrap();
        assert_eq!(tree.weight(), 3 * heavy);
        assert!(matches!(tree.weighted_length(), Err(TreeError::WeightOverflow)));
    }
}
