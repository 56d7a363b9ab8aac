//! Car traversal: how often is the busiest point on a line crossed
//!
//! A car starts at 0 and drives a sequence of signed distances. Every
//! move sweeps an open interval between two consecutive positions; the
//! answer is the highest number of sweeps over any visited position.

use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use super::{sorted_unique, SegmentTree};
use crate::TreeError;

/// Parsed move sequence.
///
/// Text format: `num_moves provided_solution` followed by `num_moves`
/// signed distances, all whitespace separated. A provided solution of
/// `-1` means none is known.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveSequence {
    moves: Vec<f64>,
    expected: Option<u32>,
}

impl MoveSequence {
    /// Sequence without a known answer.
    pub fn new(moves: Vec<f64>) -> Self {
        Self {
            moves,
            expected: None,
        }
    }

    /// Read and parse a move file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TreeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        text.parse()
    }

    /// Signed distances, in driving order.
    pub fn moves(&self) -> &[f64] {
        &self.moves
    }

    /// Answer shipped with the input, if any.
    pub fn expected(&self) -> Option<u32> {
        self.expected
    }

    /// Swept intervals as `(low, high)` pairs.
    pub fn segments(&self) -> Vec<(f64, f64)> {
        let mut position = 0.0_f64;
        self.moves
            .iter()
            .map(|distance| {
                let from = position;
                position += distance;
                (from.min(position), from.max(position))
            })
            .collect()
    }

    /// Sorted, deduplicated visited positions (always includes 0).
    pub fn coordinates(&self) -> Vec<f64> {
        let mut positions = Vec::with_capacity(self.moves.len() + 1);
        let mut position = 0.0_f64;
        positions.push(position);
        for distance in &self.moves {
            position += distance;
            positions.push(position);
        }
        sorted_unique(&positions)
    }

    /// Highest number of moves sweeping over a single visited position.
    pub fn max_crossings(&self) -> Result<u32, TreeError> {
        let mut tree = SegmentTree::build(&self.coordinates())?;
        for (low, high) in self.segments() {
            tree.insert_interval(low, high);
        }
        let (point, count) = tree.max_stab();
        debug!(moves = self.moves.len(), point, count, "car traversal solved");
        Ok(count)
    }
}

impl FromStr for MoveSequence {
    type Err = TreeError;

    fn from_str(text: &str) -> Result<Self, TreeError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();

        let count_token = token(&tokens, 0, "move count")?;
        let count: usize = count_token.parse().map_err(|_| TreeError::InvalidMoves {
            position: 0,
            reason: format!("move count '{count_token}' is not a non-negative integer"),
        })?;

        let solution_token = token(&tokens, 1, "provided solution")?;
        let solution: i64 = solution_token.parse().map_err(|_| TreeError::InvalidMoves {
            position: 1,
            reason: format!("provided solution '{solution_token}' is not an integer"),
        })?;
        let expected = match solution {
            -1 => None,
            n => Some(u32::try_from(n).map_err(|_| TreeError::InvalidMoves {
                position: 1,
                reason: format!("provided solution {n} out of range"),
            })?),
        };

        let mut moves = Vec::with_capacity(count.min(tokens.len()));
        for position in 2..count.saturating_add(2) {
            let move_token = token(&tokens, position, "move")?;
            let distance = move_token
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite())
                .ok_or_else(|| TreeError::InvalidMoves {
                    position,
                    reason: format!("move '{move_token}' is not a finite number"),
                })?;
            moves.push(distance);
        }

        Ok(Self { moves, expected })
    }
}

fn token<'a>(tokens: &[&'a str], position: usize, what: &str) -> Result<&'a str, TreeError> {
    tokens
        .get(position)
        .copied()
        .ok_or_else(|| TreeError::InvalidMoves {
            position,
            reason: format!("missing {what}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_moves() {
        let seq: MoveSequence = "3 2\n5 -2 4\n".parse().unwrap();
        assert_eq!(seq.moves(), &[5.0, -2.0, 4.0]);
        assert_eq!(seq.expected(), Some(2));
        assert_eq!(seq.segments(), vec![(0.0, 5.0), (3.0, 5.0), (3.0, 7.0)]);
        assert_eq!(seq.coordinates(), vec![0.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_parse_unknown_solution() {
        let seq: MoveSequence = "1 -1 2.5".parse().unwrap();
        assert_eq!(seq.expected(), None);
    }

    #[test]
    fn test_parse_reports_bad_token_position() {
        let err = "2 -1 4 x".parse::<MoveSequence>().unwrap_err();
        assert!(matches!(err, TreeError::InvalidMoves { position: 3, .. }));

        let err = "3 -1 4".parse::<MoveSequence>().unwrap_err();
        assert!(matches!(err, TreeError::InvalidMoves { position: 3, .. }));
    }

    #[test]
    fn test_max_crossings_back_and_forth() {
        // 0 -> 5 -> 3 -> 7: position 4 is not visited, 3 is swept by the
        // first move only, 5 by the last one only
        let seq = MoveSequence::new(vec![5.0, -2.0, 4.0]);
        assert_eq!(seq.max_crossings().unwrap(), 1);

        // 0 -> 4 -> 1 -> 3: position 2 is never a coordinate, 3 sits inside
        // (0, 4) and (1, 4)
        let seq = MoveSequence::new(vec![4.0, -3.0, 2.0]);
        assert_eq!(seq.max_crossings().unwrap(), 2);
    }

    #[test]
    fn test_no_moves() {
        let seq = MoveSequence::new(Vec::new());
        assert_eq!(seq.max_crossings().unwrap(), 0);
    }
}
