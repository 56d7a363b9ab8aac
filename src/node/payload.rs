//! Per-node payloads
//!
//! Each node carries exactly one variant, so disposal is decided by the
//! node itself: dropping the node drops whatever its variant owns.

/// AVL record: unique string key plus an opaque value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Ordering key (lexicographic).
    pub key: String,
    /// Opaque value carried alongside the key.
    pub value: i64,
}

impl Record {
    /// Create a record.
    pub fn new(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// AVL node state.
#[derive(Debug, Clone, PartialEq)]
pub struct AvlCell {
    /// Height of the subtree rooted here (absent leaf = 0).
    pub height: u32,
    /// Record owned by the node.
    pub record: Record,
}

/// Huffman node state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanCell {
    /// Merge priority: occurrence count for leaves, sum for internal nodes.
    pub weight: u64,
    /// Symbols reachable below this node, left before right.
    pub symbols: String,
}

/// Segment tree node state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentCell {
    /// Lowest coordinate covered by the node.
    pub low: f64,
    /// Highest coordinate covered by the node.
    pub high: f64,
    /// Intervals for which this is the highest fully covered node.
    pub count: u32,
}

impl SegmentCell {
    /// Fresh cell spanning `[low, high]`.
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            count: 0,
        }
    }

    /// Whether `point` lies within `[low, high]`.
    #[inline]
    pub fn contains(&self, point: f64) -> bool {
        self.low <= point && point <= self.high
    }
}

/// Tagged payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Untagged node, freshly created.
    Empty,
    /// Balanced search tree node.
    Avl(AvlCell),
    /// Huffman coding tree node.
    Huffman(HuffmanCell),
    /// Segment tree node.
    Segment(SegmentCell),
}

impl Payload {
    /// Short variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Empty => "empty",
            Payload::Avl(_) => "avl",
            Payload::Huffman(_) => "huffman",
            Payload::Segment(_) => "segment",
        }
    }

    /// AVL view.
    pub fn as_avl(&self) -> Option<&AvlCell> {
        match self {
            Payload::Avl(cell) => Some(cell),
            _ => None,
        }
    }

    /// Mutable AVL view.
    pub fn as_avl_mut(&mut self) -> Option<&mut AvlCell> {
        match self {
            Payload::Avl(cell) => Some(cell),
            _ => None,
        }
    }

    /// Huffman view.
    pub fn as_huffman(&self) -> Option<&HuffmanCell> {
        match self {
            Payload::Huffman(cell) => Some(cell),
            _ => None,
        }
    }

    /// Segment view.
    pub fn as_segment(&self) -> Option<&SegmentCell> {
        match self {
            Payload::Segment(cell) => Some(cell),
            _ => None,
        }
    }

    /// Mutable segment view.
    pub fn as_segment_mut(&mut self) -> Option<&mut SegmentCell> {
        match self {
            Payload::Segment(cell) => Some(cell),
            _ => None,
        }
    }
}
