//! staffing-core — the staffing-gap analytics engine.
//!
//! Estimates optimal staffing (FTE) for retail pharmacy locations from
//! annual volume data, classifies staffing gaps, and prices the revenue
//! consequence of understaffing at proven high performers.
//!
//! PIPELINE ORDER (fixed, documented):
//!   record → FeatureBuilder → StaffingPredictor → GapClassifier
//!          → RevenueRiskEngine → EnrichedRecord
//!
//! The regression model is consumed as a black box behind the
//! `StaffingOracle` trait; everything else here is deterministic,
//! single-pass, and stateless per invocation.

pub mod benchmark;
pub mod classifier;
pub mod config;
pub mod error;
pub mod features;
pub mod oracle;
pub mod pipeline;
pub mod predictor;
pub mod record;
pub mod revenue_risk;
pub mod store;
pub mod synthetic;
pub mod types;

pub use benchmark::{SegmentBenchmark, SegmentBenchmarkStore};
pub use classifier::{GapClassifier, Priority};
pub use config::EngineConfig;
pub use error::{AnalyticsError, AnalyticsResult};
pub use features::{FeatureBuilder, FeatureVector};
pub use oracle::{LinearOracle, StaffingOracle};
pub use pipeline::{BatchReport, PharmacyAnalyticsPipeline, RejectedRecord};
pub use predictor::{gross_from_net, StaffingPrediction, StaffingPredictor};
pub use record::{EnrichedRecord, PharmacyRecord, Segment};
pub use revenue_risk::{RevenueRiskEngine, RiskFormula};
pub use store::ResultStore;
pub use synthetic::RecordGenerator;
