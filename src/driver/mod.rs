//! Exercise harness
//!
//! Runs the three tree exercises and collects what happened into plain
//! report structs; printing is left to the binary.
//!
//! ```
//! use arborist::driver::{run_avl, DriverConfig};
//!
//! let config = DriverConfig { avl_keys: 50, ..DriverConfig::default() };
//! let report = run_avl(&config)?;
//! assert!(report.is_clean());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod config;

pub use config::{DriverConfig, DEFAULT_HUFFMAN_TEXT};

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::avl::{AvlTree, InvariantViolation};
use crate::huffman::{Frequencies, HuffmanTree};
use crate::segment::MoveSequence;

/// Letter counts and resulting codes for one text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct HuffmanReport {
    /// `(letter, count)`, ascending by letter
    pub counts: Vec<(char, u64)>,
    /// `(letter, code)`, ascending by letter
    pub codes: Vec<(char, String)>,
    /// Encoded length of the whole text in bits
    pub encoded_bits: u64,
}

/// Outcome of the timed insert/remove sweep.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct AvlReport {
    /// Keys inserted
    pub inserted: usize,
    /// Height after all inserts
    pub height: u32,
    /// Wall time of the insert phase
    pub insert_time: Duration,
    /// Wall time of the remove phase
    pub remove_time: Duration,
    /// Keys whose first removal found nothing
    pub missing: Vec<String>,
    /// Keys whose removed record carried the wrong value
    pub wrong_value: Vec<String>,
    /// Keys still found by a second removal
    pub not_removed: Vec<String>,
    /// Problems reported by per-step checking
    pub violations: Vec<InvariantViolation>,
    /// Nodes still allocated after the sweep
    pub leaked_nodes: usize,
}

impl AvlReport {
    /// Whether the sweep ran without a single failure.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
            && self.wrong_value.is_empty()
            && self.not_removed.is_empty()
            && self.violations.is_empty()
            && self.leaked_nodes == 0
    }
}

/// Car traversal answer next to the one shipped with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SegmentReport {
    /// Number of moves read
    pub moves: usize,
    /// Computed maximum crossing count
    pub computed: u32,
    /// Provided answer, if the input had one
    pub expected: Option<u32>,
}

impl SegmentReport {
    /// `Some(true)` when the computed answer matches the provided one,
    /// `None` when nothing was provided.
    pub fn matches(&self) -> Option<bool> {
        self.expected.map(|expected| expected == self.computed)
    }
}

/// All three reports of a full run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct RunReport {
    /// Huffman exercise
    pub huffman: HuffmanReport,
    /// AVL exercise
    pub avl: AvlReport,
    /// Segment exercise, when a move file was configured
    pub segment: Option<SegmentReport>,
}

/// Huffman codes for the lowercase letters of `text`.
pub fn run_huffman(text: &str) -> Result<HuffmanReport> {
    let frequencies = Frequencies::from_lowercase(text);
    if frequencies.is_empty() {
        bail!("no lowercase characters in {text:?}");
    }

    let tree = HuffmanTree::from_frequencies(&frequencies)
        .with_context(|| format!("building huffman tree for {text:?}"))?;
    let encoded_bits = tree
        .weighted_length()
        .with_context(|| format!("measuring encoded length of {text:?}"))?;
    let codes: Vec<(char, String)> = tree
        .codes()
        .into_iter()
        .map(|(symbol, code)| (symbol, code.to_string()))
        .collect();

    info!(symbols = codes.len(), weight = tree.weight(), "huffman exercise done");
    Ok(HuffmanReport {
        counts: frequencies.iter().collect(),
        codes,
        encoded_bits,
    })
}

/// Insert keys `1..=config.avl_keys`, then remove them in reverse order,
/// removing each twice to confirm it is gone.
pub fn run_avl(config: &DriverConfig) -> Result<AvlReport> {
    let mut avl = AvlTree::new();
    let mut report = AvlReport::default();

    let start = Instant::now();
    for i in 1..=config.avl_keys {
        avl.insert(config.key(i), i64::from(i))
            .with_context(|| format!("inserting generated key {i}"))?;
        report.inserted += 1;
        if config.check_each_step {
            report.violations.extend(avl.check());
        }
    }
    report.insert_time = start.elapsed();
    report.height = avl.height();

    let start = Instant::now();
    for i in (1..=config.avl_keys).rev() {
        let key = config.key(i);
        match avl.remove(&key) {
            None => report.missing.push(key.clone()),
            Some(record) if record.value != i64::from(i) => report.wrong_value.push(key.clone()),
            Some(_) => {}
        }
        if avl.remove(&key).is_some() {
            report.not_removed.push(key);
        }
        if config.check_each_step {
            report.violations.extend(avl.check());
        }
    }
    report.remove_time = start.elapsed();
    report.leaked_nodes = avl.tree().arena().stats().live();

    if !report.is_clean() {
        warn!(
            missing = report.missing.len(),
            wrong = report.wrong_value.len(),
            not_removed = report.not_removed.len(),
            violations = report.violations.len(),
            "avl sweep reported failures"
        );
    }
    info!(
        keys = report.inserted,
        height = report.height,
        insert_ms = report.insert_time.as_secs_f64() * 1e3,
        remove_ms = report.remove_time.as_secs_f64() * 1e3,
        "avl exercise done"
    );
    Ok(report)
}

/// Solve the car traversal for an already parsed sequence.
pub fn run_segment(moves: &MoveSequence) -> Result<SegmentReport> {
    let computed = moves.max_crossings().context("solving car traversal")?;
    let report = SegmentReport {
        moves: moves.moves().len(),
        computed,
        expected: moves.expected(),
    };
    info!(moves = report.moves, computed, expected = ?report.expected, "segment exercise done");
    Ok(report)
}

/// Read a move file and solve it.
pub fn run_segment_file(path: impl AsRef<Path>) -> Result<SegmentReport> {
    let path = path.as_ref();
    let moves = MoveSequence::from_file(path)
        .with_context(|| format!("loading move sequence from {}", path.display()))?;
    run_segment(&moves)
}

/// Run every exercise the configuration enables.
pub fn run_all(config: &DriverConfig) -> Result<RunReport> {
    let huffman = run_huffman(&config.huffman_text)?;
    let avl = run_avl(config)?;
    let segment = config
        .moves_path
        .as_deref()
        .map(run_segment_file)
        .transpose()?;
    Ok(RunReport { huffman, avl, segment })
}
