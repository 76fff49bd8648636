//! NET staffing prediction and the signed gap against actual staffing.

use crate::{
    benchmark::SegmentBenchmark,
    config::EngineConfig,
    error::{AnalyticsError, AnalyticsResult},
    features::FeatureBuilder,
    oracle::StaffingOracle,
    record::PharmacyRecord,
    types::Fte,
};
use serde::{Deserialize, Serialize};

/// GROSS staffing = NET + absence/coverage component.
///
/// The single conversion used for both actual and predicted staffing.
/// Because the same absence term is added on both sides, it cancels in
/// the gap: gap == net_prediction - actual_net, always.
pub fn gross_from_net(net: Fte, absence_component: Fte) -> Fte {
    net + absence_component
}

/// Staffing levels derived for one record, in both accounting bases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaffingPrediction {
    /// NET prediction after the operational floor.
    pub net_prediction: Fte,
    pub gross_prediction: Fte,
    pub actual_gross: Fte,
    /// gross_prediction - actual_gross. Positive = understaffed.
    pub gap: Fte,
}

/// Wraps the oracle call: features in, floored prediction and gap out.
pub struct StaffingPredictor {
    features: FeatureBuilder,
    min_net_floor: Fte,
}

impl StaffingPredictor {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            features: FeatureBuilder::new(config.rx_time_factor),
            min_net_floor: config.min_net_floor,
        }
    }

    /// Pure apart from the one oracle call. An oracle failure surfaces
    /// as `PredictionUnavailable` — the caller must see it, not a
    /// default.
    pub fn predict(
        &self,
        record: &PharmacyRecord,
        benchmark: &SegmentBenchmark,
        oracle: &dyn StaffingOracle,
    ) -> AnalyticsResult<StaffingPrediction> {
        let features = self.features.build(record, benchmark)?;

        let net_raw = oracle.infer(&features).map_err(|source| {
            AnalyticsError::PredictionUnavailable {
                id: record.id.clone(),
                source,
            }
        })?;

        let net_prediction = net_raw.max(self.min_net_floor);
        let gross_prediction = gross_from_net(net_prediction, record.absence_component);
        let actual_gross = gross_from_net(record.actual_net, record.absence_component);

        Ok(StaffingPrediction {
            net_prediction,
            gross_prediction,
            actual_gross,
            gap: gross_prediction - actual_gross,
        })
    }
}
