//! Mean, median and mode over the scores of a single game.
//!
//! All averages truncate toward zero. Intermediate sums are widened to
//! `i128` so any set of `i64` scores can be aggregated without overflow.

use std::collections::BTreeMap;

/// Summary statistics for one game's scores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreStatistics {
    pub mean: i64,
    pub median: i64,
    /// Most frequent values in ascending order; empty when no value repeats
    pub mode: Vec<i64>,
}

impl ScoreStatistics {
    /// Computes statistics for `scores` given in any order.
    ///
    /// A game with no scores reports `mean = 0`, `median = 0` and `mode = [0]`.
    pub fn from_scores(scores: &[i64]) -> Self {
        if scores.is_empty() {
            return Self {
                mean: 0,
                median: 0,
                mode: vec![0],
            };
        }

        let mut sorted = scores.to_vec();
        sorted.sort_unstable();

        Self {
            mean: mean(&sorted),
            median: median(&sorted),
            mode: mode(&sorted),
        }
    }
}

fn mean(scores: &[i64]) -> i64 {
    let sum: i128 = scores.iter().map(|&score| i128::from(score)).sum();
    (sum / scores.len() as i128) as i64
}

// `sorted` must be ascending and non-empty
fn median(sorted: &[i64]) -> i64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        ((i128::from(sorted[mid - 1]) + i128::from(sorted[mid])) / 2) as i64
    } else {
        sorted[mid]
    }
}

fn mode(scores: &[i64]) -> Vec<i64> {
    let mut frequency: BTreeMap<i64, usize> = BTreeMap::new();
    for &score in scores {
        *frequency.entry(score).or_default() += 1;
    }

    let max_frequency = frequency.values().copied().max().unwrap_or(0);
    if max_frequency <= 1 {
        return Vec::new();
    }

    frequency
        .into_iter()
        .filter(|&(_, count)| count == max_frequency)
        .map(|(score, _)| score)
        .collect()
}
