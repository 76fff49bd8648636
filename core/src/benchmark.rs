//! Per-segment productivity benchmarks and peak-hour profiles.
//!
//! RULE: the store is built once at startup and read-only afterwards.
//! A segment missing from configuration falls back to a conservative
//! default profile instead of failing — new or unclassified locations
//! must still produce an estimate.

use crate::record::Segment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Calibrated reference figures for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentBenchmark {
    /// Mean transactions per staffing-hour across the segment, NET basis.
    pub net_mean: f64,
    /// Same, GROSS basis.
    pub gross_mean: f64,
    /// Share of annual revenue earned during peak hours, (0, 1).
    pub peak_revenue_share: f64,
    /// How much harder average understaffing bites during peak hours.
    pub peak_overload_multiplier: f64,
    /// Ease of customer defection to nearby competitors.
    pub competition_multiplier: f64,
}

impl SegmentBenchmark {
    /// Profile for segments missing from configuration. The higher
    /// overload multiplier keeps the estimate cautious until the
    /// segment gets a calibrated peak profile of its own.
    pub fn fallback() -> Self {
        Self {
            net_mean: 8.0,
            gross_mean: 6.0,
            peak_revenue_share: 0.50,
            peak_overload_multiplier: 4.0,
            competition_multiplier: 1.0,
        }
    }
}

/// Immutable lookup table, safe for concurrent reads without locking.
#[derive(Debug, Clone)]
pub struct SegmentBenchmarkStore {
    by_segment: HashMap<Segment, SegmentBenchmark>,
    fallback: SegmentBenchmark,
}

impl SegmentBenchmarkStore {
    pub fn new(by_segment: HashMap<Segment, SegmentBenchmark>) -> Self {
        Self {
            by_segment,
            fallback: SegmentBenchmark::fallback(),
        }
    }

    /// Benchmark for a segment, or the fallback profile when none is
    /// configured. Never fails.
    pub fn lookup(&self, segment: Segment) -> &SegmentBenchmark {
        match self.by_segment.get(&segment) {
            Some(benchmark) => benchmark,
            None => {
                log::warn!(
                    "no benchmark configured for segment '{}', using fallback profile",
                    segment.key()
                );
                &self.fallback
            }
        }
    }
}
