//! Feature derivation for the regression oracle.
//!
//! Created fresh per prediction and discarded after use. The one
//! non-obvious rule lives here: the productivity residual is clipped
//! to zero from below. Efficiency above the segment mean can pull the
//! prediction, a location currently underperforming cannot — the
//! business will not justify removing staff from a slow location.

use crate::{
    benchmark::SegmentBenchmark,
    error::AnalyticsResult,
    record::PharmacyRecord,
};

/// Numeric inputs consumed by the regression oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    /// Transaction count weighted for prescription handling time.
    pub effective_transactions: f64,
    pub annual_transactions: f64,
    pub annual_revenue: f64,
    /// Basket value; 0 when the location recorded no transactions.
    pub revenue_per_transaction: f64,
    pub prescription_ratio: f64,
    /// max(0, productivity_net - segment NET mean). Never negative.
    pub productivity_residual: f64,
    /// Segment-group flags, 0.0 or 1.0 as the model expects.
    pub is_shopping: f64,
    pub is_street: f64,
    pub is_clinic: f64,
}

pub struct FeatureBuilder {
    rx_time_factor: f64,
}

impl FeatureBuilder {
    pub fn new(rx_time_factor: f64) -> Self {
        Self { rx_time_factor }
    }

    /// Validate the record and derive its feature vector.
    pub fn build(
        &self,
        record: &PharmacyRecord,
        benchmark: &SegmentBenchmark,
    ) -> AnalyticsResult<FeatureVector> {
        record.validate()?;

        let effective_transactions = record.annual_transactions
            * (1.0 + self.rx_time_factor * record.prescription_ratio);

        let revenue_per_transaction = if record.annual_transactions > 0.0 {
            record.annual_revenue / record.annual_transactions
        } else {
            0.0
        };

        // Asymmetric by policy, not data artifact. Do not "fix".
        let productivity_residual = (record.productivity_net - benchmark.net_mean).max(0.0);

        let flag = |on: bool| if on { 1.0 } else { 0.0 };

        Ok(FeatureVector {
            effective_transactions,
            annual_transactions: record.annual_transactions,
            annual_revenue: record.annual_revenue,
            revenue_per_transaction,
            prescription_ratio: record.prescription_ratio,
            productivity_residual,
            is_shopping: flag(record.segment.is_shopping()),
            is_street: flag(record.segment.is_street()),
            is_clinic: flag(record.segment.is_clinic()),
        })
    }
}
