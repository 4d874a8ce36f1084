//! Population level buckets

use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of a file's records that satisfy a condition, bucketed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulationLevel {
    /// No records
    Empty,
    /// Up to 5%
    Trace,
    /// Up to 25%
    Low,
    /// Up to 50%
    Medium,
    /// Above 50% but not all
    High,
    /// Every record
    Full,
}

impl PopulationLevel {
    /// All levels, lowest first
    pub const ALL: [PopulationLevel; 6] = [
        Self::Empty,
        Self::Trace,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Full,
    ];

    /// Bucket a fraction in `0.0..=1.0`
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction == 0.0 {
            Self::Empty
        } else if fraction <= 0.05 {
            Self::Trace
        } else if fraction <= 0.25 {
            Self::Low
        } else if fraction <= 0.50 {
            Self::Medium
        } else if fraction < 1.0 {
            Self::High
        } else {
            Self::Full
        }
    }

    /// Bucket `count` out of `total`; a file with no records is empty
    pub fn from_counts(count: usize, total: usize) -> Self {
        if total == 0 {
            return Self::Empty;
        }
        Self::from_fraction(count as f64 / total as f64)
    }

    /// Lowercase name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Trace => "trace",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for PopulationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-level file counts, serialised in level order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDistribution {
    pub empty: usize,
    pub trace: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub full: usize,
}

impl LevelDistribution {
    /// Count one file at `level`
    pub fn record(&mut self, level: PopulationLevel) {
        *self.slot(level) += 1;
    }

    /// Files counted at `level`
    pub fn count(&self, level: PopulationLevel) -> usize {
        match level {
            PopulationLevel::Empty => self.empty,
            PopulationLevel::Trace => self.trace,
            PopulationLevel::Low => self.low,
            PopulationLevel::Medium => self.medium,
            PopulationLevel::High => self.high,
            PopulationLevel::Full => self.full,
        }
    }

    fn slot(&mut self, level: PopulationLevel) -> &mut usize {
        match level {
            PopulationLevel::Empty => &mut self.empty,
            PopulationLevel::Trace => &mut self.trace,
            PopulationLevel::Low => &mut self.low,
            PopulationLevel::Medium => &mut self.medium,
            PopulationLevel::High => &mut self.high,
            PopulationLevel::Full => &mut self.full,
        }
    }
}
