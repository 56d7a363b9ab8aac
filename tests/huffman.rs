mod common;

use arborist::{Frequencies, HuffmanTree, MinQueue, NodeId, TreeError};
use proptest::prelude::*;

use common::{check_snapshot, reference_merge_cost};

#[test]
fn lightest_pair_becomes_deepest_siblings() {
    let tree = HuffmanTree::from_weights([('a', 4), ('b', 2), ('c', 1), ('d', 1)]).unwrap();
    let c = tree.encode_path('c').unwrap().to_string();
    let d = tree.encode_path('d').unwrap().to_string();

    assert_eq!(c.len(), d.len());
    assert_eq!(c[..c.len() - 1], d[..d.len() - 1]);
    assert_ne!(c.as_bytes()[c.len() - 1], d.as_bytes()[d.len() - 1]);
    assert_eq!(tree.weighted_length().unwrap(), reference_merge_cost(&[4, 2, 1, 1]));
}

#[test]
fn sample_text_code_table() {
    let tree = HuffmanTree::from_frequencies(&Frequencies::from_lowercase("aabacccadadadadda"))
        .unwrap();
    let table: String = tree
        .codes()
        .iter()
        .map(|(symbol, code)| format!("{symbol} {code}\n"))
        .collect();
    check_snapshot("huffman_sample_codes.txt", &table);
}

#[test]
fn single_symbol_root_is_leaf() {
    let tree = HuffmanTree::from_weights([('q', 3)]).unwrap();
    assert!(tree.tree()[tree.root()].is_leaf());
    assert!(tree.encode_path('q').unwrap().is_empty());
    assert_eq!(tree.weighted_length().unwrap(), 0);
}

#[test]
fn weighted_length_overflow_is_reported() {
    let heavy = 1u64 << 62;
    let tree = HuffmanTree::from_weights([('a', heavy), ('b', heavy), ('c', heavy)])
        .expect("total weight fits in u64");
    assert!(matches!(tree.weighted_length(), Err(TreeError::WeightOverflow)));
}

#[test]
fn empty_frequencies_rejected() {
    let err = HuffmanTree::from_frequencies(&Frequencies::from_lowercase("123")).unwrap_err();
    assert!(matches!(err, TreeError::EmptyInput));
}

/// Queue that always hands out the most recently pushed of the lightest
/// nodes, to show the builder only relies on the trait.
#[derive(Default)]
struct LastInFirstOut {
    items: Vec<(u64, NodeId)>,
}

impl MinQueue for LastInFirstOut {
    fn push(&mut self, node: NodeId, weight: u64) {
        self.items.push((weight, node));
    }

    fn pop_min(&mut self) -> Option<NodeId> {
        let min = self.items.iter().map(|(w, _)| *w).min()?;
        let at = self.items.iter().rposition(|(w, _)| *w == min)?;
        Some(self.items.remove(at).1)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[test]
fn custom_queue_gives_equally_short_code() {
    let weights = [('a', 5), ('b', 5), ('c', 5), ('d', 5), ('e', 1)];
    let fifo = HuffmanTree::from_weights(weights).unwrap();
    let lifo = HuffmanTree::from_weights_with(weights, LastInFirstOut::default()).unwrap();
    assert_eq!(fifo.weighted_length().unwrap(), lifo.weighted_length().unwrap());
    assert_eq!(lifo.symbols().len(), 5);
}

fn weights() -> impl Strategy<Value = Vec<(char, u64)>> {
    proptest::collection::btree_map(proptest::char::range('a', 'z'), 1u64..1000, 1..26)
        .prop_map(|map| map.into_iter().collect())
}

proptest! {
    #[test]
    fn weighted_length_is_optimal(weights in weights()) {
        let tree = HuffmanTree::from_weights(weights.iter().copied()).unwrap();
        let raw: Vec<u64> = weights.iter().map(|(_, w)| *w).collect();
        prop_assert_eq!(tree.weighted_length().unwrap(), reference_merge_cost(&raw));
        prop_assert_eq!(tree.weight(), raw.iter().sum::<u64>());
    }

    #[test]
    fn codes_are_prefix_free(weights in weights()) {
        let tree = HuffmanTree::from_weights(weights.iter().copied()).unwrap();
        let codes: Vec<String> = tree.codes().values().map(ToString::to_string).collect();
        prop_assert_eq!(codes.len(), weights.len());
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a.as_str()), "{} prefixes {}", a, b);
                }
            }
        }
    }
}
