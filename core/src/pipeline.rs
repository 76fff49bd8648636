//! Orchestration: one record (or a batch) through the full sequence.
//!
//! PIPELINE ORDER (fixed, documented):
//!   record → FeatureBuilder → StaffingPredictor → GapClassifier
//!          → RevenueRiskEngine → EnrichedRecord
//!
//! Stateless per invocation. Each record's run is independent, so a
//! batch is embarrassingly parallel; this implementation is sequential
//! and therefore preserves input order in the report, but callers
//! should not treat ordering as a guarantee of the interface.

use crate::{
    benchmark::SegmentBenchmarkStore,
    classifier::{GapClassifier, Priority},
    config::EngineConfig,
    error::AnalyticsResult,
    oracle::StaffingOracle,
    predictor::StaffingPredictor,
    record::{EnrichedRecord, PharmacyRecord},
    revenue_risk::{RevenueRiskEngine, RiskFormula},
    types::PharmacyId,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A record the batch skipped, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub id: PharmacyId,
    pub error: String,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub enriched: Vec<EnrichedRecord>,
    pub rejected: Vec<RejectedRecord>,
    pub urgent_count: usize,
    pub optimize_count: usize,
    pub monitor_count: usize,
    pub optimal_count: usize,
    /// Sum of revenue at risk over Urgent rows only — the headline
    /// figure reported to operations.
    pub total_revenue_at_risk: u64,
}

pub struct PharmacyAnalyticsPipeline {
    config: EngineConfig,
    benchmarks: SegmentBenchmarkStore,
    predictor: StaffingPredictor,
    classifier: GapClassifier,
    risk: RevenueRiskEngine,
    oracle: Arc<dyn StaffingOracle>,
}

impl PharmacyAnalyticsPipeline {
    /// Wire a pipeline with the current (V3) risk formula.
    pub fn new(
        config: EngineConfig,
        oracle: Arc<dyn StaffingOracle>,
    ) -> AnalyticsResult<Self> {
        Self::with_formula(config, oracle, RiskFormula::V3)
    }

    /// Wire a pipeline with an explicitly selected risk formula.
    pub fn with_formula(
        config: EngineConfig,
        oracle: Arc<dyn StaffingOracle>,
        formula: RiskFormula,
    ) -> AnalyticsResult<Self> {
        config.validate()?;
        Ok(Self {
            benchmarks: SegmentBenchmarkStore::new(config.segment_benchmarks.clone()),
            predictor: StaffingPredictor::new(&config),
            classifier: GapClassifier::new(config.urgent_gap_threshold),
            risk: RevenueRiskEngine::new(&config, formula),
            oracle,
            config,
        })
    }

    pub fn formula(&self) -> RiskFormula {
        self.risk.formula()
    }

    /// Run one record through the full sequence.
    pub fn analyze(&self, record: &PharmacyRecord) -> AnalyticsResult<EnrichedRecord> {
        let benchmark = self.benchmarks.lookup(record.segment);

        let prediction = self
            .predictor
            .predict(record, benchmark, self.oracle.as_ref())?;
        let priority =
            self.classifier
                .classify(prediction.gap, record.productivity_gross, benchmark);
        let revenue_at_risk = self.risk.compute(&prediction, record, benchmark);

        let productivity_pct =
            ((record.productivity_net - benchmark.net_mean) / benchmark.net_mean * 100.0).round();
        let small_location = record.actual_net <= self.config.small_location_net_fte;

        log::debug!(
            "record '{}': gap {:+.2} FTE, priority {}, at risk {}",
            record.id,
            prediction.gap,
            priority.as_str(),
            revenue_at_risk
        );

        Ok(EnrichedRecord {
            record: record.clone(),
            net_prediction: prediction.net_prediction,
            gross_prediction: prediction.gross_prediction,
            actual_gross: prediction.actual_gross,
            gap: prediction.gap,
            priority,
            revenue_at_risk,
            productivity_pct,
            small_location,
        })
    }

    /// Run a whole batch. A rejected or failed record never stops the
    /// remaining records; it is logged and recorded in the report.
    pub fn analyze_batch(&self, records: &[PharmacyRecord]) -> BatchReport {
        let mut report = BatchReport::default();

        for record in records {
            match self.analyze(record) {
                Ok(enriched) => {
                    match enriched.priority {
                        Priority::Urgent => {
                            report.urgent_count += 1;
                            report.total_revenue_at_risk += enriched.revenue_at_risk;
                        }
                        Priority::Optimize => report.optimize_count += 1,
                        Priority::Monitor => report.monitor_count += 1,
                        Priority::Optimal => report.optimal_count += 1,
                    }
                    report.enriched.push(enriched);
                }
                Err(err) => {
                    log::warn!("record '{}' rejected: {err}", record.id);
                    report.rejected.push(RejectedRecord {
                        id: record.id.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        report
    }
}
