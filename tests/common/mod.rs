#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Path of `name` under `tests/<dir>`.
pub fn fixture(dir: &str, name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join(dir)
        .join(name)
}

/// Compare `actual` with `tests/snapshots/<name>` line by line.
///
/// With `ARBORIST_BLESS` set the snapshot is rewritten from `actual`.
pub fn check_snapshot(name: &str, actual: &str) {
    let path = fixture("snapshots", name);
    if std::env::var_os("ARBORIST_BLESS").is_some() {
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let stored = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()));
    let expected: Vec<&str> = stored.lines().collect();
    let produced: Vec<&str> = actual.lines().collect();
    for (number, (want, got)) in expected.iter().zip(&produced).enumerate() {
        assert_eq!(got, want, "{} line {}", path.display(), number + 1);
    }
    assert_eq!(
        produced.len(),
        expected.len(),
        "{} has {} lines, output has {}",
        path.display(),
        expected.len(),
        produced.len()
    );
}

/// Three-digit zero-padded key, so key order matches numeric order.
pub fn key(i: usize) -> String {
    format!("{i:03}")
}

/// Number of open intervals `(low, high)` strictly containing `point`.
pub fn brute_force_stab(intervals: &[(f64, f64)], point: f64) -> u32 {
    intervals
        .iter()
        .filter(|(a, b)| a.min(*b) < point && point < a.max(*b))
        .count() as u32
}

/// Optimal prefix-code cost: sum of all merge weights when the two
/// lightest weights are combined repeatedly.
pub fn reference_merge_cost(weights: &[u64]) -> u64 {
    let mut pool: Vec<u64> = weights.to_vec();
    let mut cost = 0;
    while pool.len() > 1 {
        pool.sort_unstable_by(|a, b| b.cmp(a));
        let a = pool.pop().unwrap_or(0);
        let b = pool.pop().unwrap_or(0);
        cost += a + b;
        pool.push(a + b);
    }
    cost
}
