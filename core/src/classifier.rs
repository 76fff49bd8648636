//! Priority classification of staffing gaps.

use crate::benchmark::SegmentBenchmark;
use serde::{Deserialize, Serialize};

/// Where a location lands after the gap and productivity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Understaffed high performer: immediate staffing need.
    Urgent,
    /// Understaffed but not proven efficient: review process first.
    Optimize,
    /// Overstaffed: candidate for reallocation.
    Monitor,
    /// Within the neutral band.
    Optimal,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Optimize => "optimize",
            Self::Monitor => "monitor",
            Self::Optimal => "optimal",
        }
    }
}

/// Maps (gap, productivity-vs-benchmark) to exactly one priority.
pub struct GapClassifier {
    notable_gap: f64,
}

impl GapClassifier {
    pub fn new(notable_gap: f64) -> Self {
        Self { notable_gap }
    }

    /// Total, non-overlapping partition. The neutral band is the open
    /// interval (-notable, notable); a gap exactly at the threshold
    /// lands on the non-optimal side.
    pub fn classify(
        &self,
        gap: f64,
        productivity_gross: f64,
        benchmark: &SegmentBenchmark,
    ) -> Priority {
        let above_avg = productivity_gross > benchmark.gross_mean;

        if gap >= self.notable_gap {
            if above_avg {
                Priority::Urgent
            } else {
                Priority::Optimize
            }
        } else if gap <= -self.notable_gap {
            Priority::Monitor
        } else {
            Priority::Optimal
        }
    }
}
