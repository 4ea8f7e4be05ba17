use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

// Share of deltas that must flip sign to call a history oscillating
const OSCILLATION_RATIO: f64 = 0.6;
const MIN_OSCILLATION_SAMPLES: usize = 4;

/// Bounded score history of one unit across refactoring iterations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationHistory {
    scores: VecDeque<f64>,
    limit: usize,
}

impl Default for IterationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl IterationHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// A limit of zero is raised to one
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            scores: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Append a score, dropping the oldest once the limit is reached
    pub fn push(&mut self, score: f64) {
        if self.scores.len() == self.limit {
            self.scores.pop_front();
        }
        self.scores.push_back(score);
    }

    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.iter().copied()
    }

    pub fn latest(&self) -> Option<f64> {
        self.scores.back().copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Scores alternately rising and falling without settling
    pub fn is_oscillating(&self) -> bool {
        if self.scores.len() < MIN_OSCILLATION_SAMPLES {
            return false;
        }

        let deltas: Vec<f64> = self
            .scores
            .iter()
            .zip(self.scores.iter().skip(1))
            .map(|(a, b)| b - a)
            .collect();

        let sign_changes = deltas
            .windows(2)
            .filter(|pair| pair[0] * pair[1] < 0.0)
            .count();

        sign_changes as f64 >= deltas.len() as f64 * OSCILLATION_RATIO
    }

    /// Least-squares slope over iteration index.
    /// Negative is improving, positive is worsening.
    pub fn trend(&self) -> f64 {
        let n = self.scores.len();
        if n < 2 {
            return 0.0;
        }

        let x_mean = (n - 1) as f64 / 2.0;
        let y_mean = self.scores.iter().sum::<f64>() / n as f64;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, y) in self.scores.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }

        if denominator == 0.0 {
            return 0.0;
        }
        numerator / denominator
    }
}
