//! Static segment tree for stabbing counts
//!
//! Built once over a sorted, deduplicated coordinate array by midpoint
//! recursion: node `[lo, hi]` splits into `[lo, mid]` and `[mid+1, hi]`
//! with `mid = lo + (hi - lo) / 2`, so the tree is balanced by
//! construction. Each node spans `[points[lo], points[hi]]`; a leaf spans
//! a single coordinate.
//!
//! Intervals are treated as open: a coordinate equal to an interval's
//! start or end is not covered by it.

mod moves;

pub use moves::MoveSequence;

use tracing::debug;

use crate::node::{NodeId, Payload, SegmentCell, Tree};
use crate::TreeError;

/// Segment tree answering "how many intervals contain this point".
#[derive(Debug)]
pub struct SegmentTree {
    tree: Tree,
    points: Vec<f64>,
    intervals: usize,
}

impl SegmentTree {
    /// Build over `points`, which must be finite, strictly increasing and
    /// non-empty.
    pub fn build(points: &[f64]) -> Result<Self, TreeError> {
        if points.is_empty() {
            return Err(TreeError::InvalidPoints("no coordinates".to_string()));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(TreeError::InvalidPoints(format!("non-finite coordinate {bad}")));
        }
        if let Some(pair) = points.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(TreeError::InvalidPoints(format!(
                "coordinates not strictly increasing at {} -> {}",
                pair[0], pair[1]
            )));
        }

        let mut tree = Tree::with_capacity(2 * points.len() - 1);
        let root = build_range(&mut tree, points, 0, points.len() - 1);
        tree.set_root(Some(root));
        debug!(points = points.len(), nodes = tree.len(), "built segment tree");

        Ok(Self {
            tree,
            points: points.to_vec(),
            intervals: 0,
        })
    }

    /// Sort and deduplicate `points`, then [`build`](Self::build).
    pub fn from_unsorted(points: &[f64]) -> Result<Self, TreeError> {
        Self::build(&sorted_unique(points))
    }

    /// Coordinates the tree was built over.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Underlying node storage, for inspection.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Number of intervals inserted so far.
    pub fn interval_count(&self) -> usize {
        self.intervals
    }

    /// Span and counter of `id`.
    pub fn cell(&self, id: NodeId) -> &SegmentCell {
        let payload = self.tree[id].payload();
        match payload.as_segment() {
            Some(cell) => cell,
            None => unreachable!("{} node {id} inside a segment tree", payload.kind()),
        }
    }

    /// Record the open interval between `start` and `end` (either order).
    ///
    /// Marks the highest nodes whose whole span lies strictly inside the
    /// interval; a node whose bound coincides with an endpoint is only
    /// counted through its descendants.
    pub fn insert_interval(&mut self, start: f64, end: f64) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        if let Some(root) = self.tree.root() {
            self.insert_at(root, start, end);
        }
        self.intervals += 1;
    }

    fn insert_at(&mut self, id: NodeId, start: f64, end: f64) {
        let SegmentCell { low, high, .. } = *self.cell(id);
        if high <= start || low >= end {
            return;
        }
        if start < low && high < end {
            if let Payload::Segment(cell) = self.tree.payload_mut(id) {
                cell.count += 1;
            }
            return;
        }
        if let Some((left, right)) = self.tree[id].children() {
            self.insert_at(left, start, end);
            self.insert_at(right, start, end);
        }
    }

    /// Number of inserted intervals containing `point`.
    ///
    /// Sums the counters on the path from the root to `point`'s leaf.
    /// Points outside the built range yield 0.
    pub fn stab_query(&self, point: f64) -> u32 {
        let mut total = 0;
        let mut cursor = self.tree.root();
        while let Some(id) = cursor {
            let cell = self.cell(id);
            if !cell.contains(point) {
                break;
            }
            total += cell.count;
            cursor = self.tree[id].children().map(|(left, right)| {
                if self.cell(left).contains(point) {
                    left
                } else {
                    right
                }
            });
        }
        total
    }

    /// Coordinate with the highest stab count (first one on ties).
    pub fn max_stab(&self) -> (f64, u32) {
        let mut best = (self.points[0], self.stab_query(self.points[0]));
        for &point in &self.points[1..] {
            let count = self.stab_query(point);
            if count > best.1 {
                best = (point, count);
            }
        }
        best
    }
}

/// Sorted copy of `points` with duplicates removed.
pub fn sorted_unique(points: &[f64]) -> Vec<f64> {
    let mut sorted = points.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted
}

fn build_range(tree: &mut Tree, points: &[f64], lo: usize, hi: usize) -> NodeId {
    let node = tree.make_leaf(Payload::Segment(SegmentCell::new(points[lo], points[hi])));
    if lo < hi {
        let mid = lo + (hi - lo) / 2;
        let left = build_range(tree, points, lo, mid);
        let right = build_range(tree, points, mid + 1, hi);
        tree.attach(node, left, right);
    }
    node
}
