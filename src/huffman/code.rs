//! Huffman codes and symbol frequencies

use std::collections::BTreeMap;
use std::fmt;

use bitvec::prelude::*;

/// Bit path from the root to a symbol's leaf: `0` = left, `1` = right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HuffmanCode {
    bits: BitVec,
}

impl HuffmanCode {
    /// Empty code (the root itself is the symbol's leaf).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one step of the path.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, root first.
    pub fn bits(&self) -> &BitSlice {
        &self.bits
    }
}

impl fmt::Display for HuffmanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter() {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Occurrence count per symbol, ascending by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frequencies {
    counts: BTreeMap<char, u64>,
}

impl Frequencies {
    /// Count the lowercase ASCII letters `a..=z` of `text`; everything
    /// else is ignored.
    pub fn from_lowercase(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for ch in text.chars().filter(char::is_ascii_lowercase) {
            *counts.entry(ch).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Count every character of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for ch in text.chars() {
            *counts.entry(ch).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Occurrences of `symbol`.
    pub fn get(&self, symbol: char) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no symbol was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(symbol, count)` pairs, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FromIterator<(char, u64)> for Frequencies {
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
