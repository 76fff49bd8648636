//! Revenue-at-risk estimation for understaffed high performers.
//!
//! The gap a model reports is AVERAGE understaffing, but the damage is
//! concentrated in peak hours, where half or more of revenue is earned
//! under several times the average transaction pressure. The current
//! formula (V3) amplifies the average overload into a peak-hour
//! estimate, blends prescription vs discretionary sensitivity, scales
//! by how far the location outperforms its segment, applies the
//! segment's competition multiplier, and caps the result.
//!
//! Older formula versions stay selectable for backward comparison.

use crate::{
    benchmark::SegmentBenchmark,
    config::EngineConfig,
    predictor::StaffingPrediction,
    record::PharmacyRecord,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flat sensitivity used by the retired V1 formula.
const V1_FLAT_SENSITIVITY: f64 = 0.5;

/// Which revenue-at-risk formula to apply, selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskFormula {
    /// Legacy flat model: (overload - 1) * 0.5 * revenue. Uncapped.
    V1,
    /// Sensitivity-blended model, no peak-hour amplification.
    V2,
    /// Current peak-calibrated model.
    V3,
}

impl RiskFormula {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }
}

impl fmt::Display for RiskFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskFormula {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" => Ok(Self::V1),
            "v2" => Ok(Self::V2),
            "v3" => Ok(Self::V3),
            other => Err(anyhow::anyhow!("unknown risk formula '{other}'")),
        }
    }
}

/// Pure gated computation; no state across calls.
pub struct RevenueRiskEngine {
    formula: RiskFormula,
    rx_sensitivity: f64,
    non_rx_sensitivity: f64,
    max_risk_fraction: f64,
}

impl RevenueRiskEngine {
    pub fn new(config: &EngineConfig, formula: RiskFormula) -> Self {
        Self {
            formula,
            rx_sensitivity: config.rx_sensitivity,
            non_rx_sensitivity: config.non_rx_sensitivity,
            max_risk_fraction: config.max_risk_fraction,
        }
    }

    pub fn formula(&self) -> RiskFormula {
        self.formula
    }

    /// Annual revenue at risk in whole currency units. Truncated, never
    /// rounded up — the estimate stays conservative.
    ///
    /// Gates, in order, each short-circuiting to zero:
    /// 1. understaffed (gap > 0);
    /// 2. above-average GROSS productivity — only proven capacity can
    ///    be said to be at risk;
    /// 3. valid staffing and revenue data.
    pub fn compute(
        &self,
        prediction: &StaffingPrediction,
        record: &PharmacyRecord,
        benchmark: &SegmentBenchmark,
    ) -> u64 {
        if prediction.gap <= 0.0 {
            return 0;
        }
        if benchmark.gross_mean <= 0.0 || record.productivity_gross <= benchmark.gross_mean {
            return 0;
        }
        if record.actual_net <= 0.0 || record.annual_revenue <= 0.0 {
            return 0;
        }

        let amount = match self.formula {
            RiskFormula::V1 => self.compute_v1(prediction, record),
            RiskFormula::V2 => self.compute_v2(prediction, record, benchmark),
            RiskFormula::V3 => self.compute_v3(prediction, record, benchmark),
        };

        amount.max(0.0).floor() as u64
    }

    fn blended_sensitivity(&self, rx_ratio: f64) -> f64 {
        let rx = rx_ratio.clamp(0.0, 1.0);
        rx * self.rx_sensitivity + (1.0 - rx) * self.non_rx_sensitivity
    }

    fn compute_v1(&self, p: &StaffingPrediction, r: &PharmacyRecord) -> f64 {
        let overload_ratio = p.gross_prediction / p.actual_gross;
        (overload_ratio - 1.0) * V1_FLAT_SENSITIVITY * r.annual_revenue
    }

    fn compute_v2(
        &self,
        p: &StaffingPrediction,
        r: &PharmacyRecord,
        b: &SegmentBenchmark,
    ) -> f64 {
        let base_overload = p.gross_prediction / p.actual_gross - 1.0;
        let blended = self.blended_sensitivity(r.prescription_ratio);
        let productivity_multiplier = r.productivity_gross / b.gross_mean - 1.0;
        let uncapped = base_overload
            * blended
            * r.annual_revenue
            * (1.0 + productivity_multiplier)
            * b.competition_multiplier;
        uncapped.min(r.annual_revenue * self.max_risk_fraction)
    }

    fn compute_v3(
        &self,
        p: &StaffingPrediction,
        r: &PharmacyRecord,
        b: &SegmentBenchmark,
    ) -> f64 {
        // 1-2. Average overload, amplified to a peak-hour estimate.
        let base_overload = p.gross_prediction / p.actual_gross - 1.0;
        let peak_overload = base_overload * b.peak_overload_multiplier;

        // 3. Only peak-hour revenue is exposed.
        let peak_revenue = r.annual_revenue * b.peak_revenue_share;

        // 4-5. Prescription demand is sticky; discretionary walks out.
        let blended = self.blended_sensitivity(r.prescription_ratio);
        let base_at_risk = peak_overload * blended * peak_revenue;

        // 6. The further above benchmark, the more unmet demand to lose.
        let productivity_multiplier = r.productivity_gross / b.gross_mean - 1.0;
        let scaled = base_at_risk * (1.0 + productivity_multiplier);

        // 7-8. Competition, then the sanity ceiling.
        let uncapped = scaled * b.competition_multiplier;
        uncapped.min(r.annual_revenue * self.max_risk_fraction)
    }
}
