//! Harness configuration
//!
//! Defaults reproduce the classic exercise run:
//! - keys `1..=999`, dash-padded to 30 characters
//! - Huffman codes for `"aabacccadadadadda"`
//! - no move file (the segment exercise needs one)

use std::path::PathBuf;

/// Sample text for the Huffman exercise
pub const DEFAULT_HUFFMAN_TEXT: &str = "aabacccadadadadda";

/// Configuration for [`run_all`](super::run_all) and the individual runs
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// Number of generated AVL keys (`1..=avl_keys`)
    pub avl_keys: u32,

    /// Width of a generated key
    pub key_width: usize,

    /// Run the invariant checker after every AVL mutation
    pub check_each_step: bool,

    /// Text whose lowercase letters feed the Huffman exercise
    pub huffman_text: String,

    /// Move file for the segment exercise
    pub moves_path: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            avl_keys: 999,
            key_width: 30,
            check_each_step: false,
            huffman_text: DEFAULT_HUFFMAN_TEXT.to_string(),
            moves_path: None,
        }
    }
}

impl DriverConfig {
    /// Key for the `index`-th record: decimal, right-aligned, padded on
    /// the left with `-` to `key_width` characters.
    ///
    /// `-` sorts before every digit, so key order follows numeric order.
    pub fn key(&self, index: u32) -> String {
        format!("{index:->width$}", width = self.key_width)
    }
}
