//! The regression model, consumed as a black box at its interface.
//!
//! Training, serialization, and versioning of the real model are
//! external concerns. The pipeline only needs: vector in, scalar out,
//! deterministic for a fixed vector, safe for concurrent calls.

use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};

/// Contract for the staffing regression model.
///
/// `infer` returns the raw NET FTE estimate; the predictor applies the
/// operational floor afterwards, so outputs below it (or below zero)
/// are tolerated here. Implementations that are not inherently
/// thread-safe must serialize access internally.
pub trait StaffingOracle: Send + Sync {
    fn infer(&self, features: &FeatureVector) -> anyhow::Result<f64>;
}

/// In-process linear stand-in for the external regression service.
///
/// The weight set is data, not logic: load a calibrated one from JSON
/// or start from `calibrated()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearOracle {
    pub intercept: f64,
    pub w_effective_transactions: f64,
    pub w_revenue_per_transaction: f64,
    pub w_prescription_ratio: f64,
    /// Negative: above-average throughput argues for fewer staff.
    pub w_productivity_residual: f64,
    pub w_is_shopping: f64,
    pub w_is_street: f64,
    pub w_is_clinic: f64,
}

impl LinearOracle {
    /// Weights fitted against the annual network snapshot.
    pub fn calibrated() -> Self {
        Self {
            intercept: 0.62,
            w_effective_transactions: 4.1e-5,
            w_revenue_per_transaction: 0.004,
            w_prescription_ratio: 0.30,
            w_productivity_residual: -0.35,
            w_is_shopping: 0.25,
            w_is_street: 0.0,
            w_is_clinic: 0.15,
        }
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl StaffingOracle for LinearOracle {
    fn infer(&self, f: &FeatureVector) -> anyhow::Result<f64> {
        Ok(self.intercept
            + self.w_effective_transactions * f.effective_transactions
            + self.w_revenue_per_transaction * f.revenue_per_transaction
            + self.w_prescription_ratio * f.prescription_ratio
            + self.w_productivity_residual * f.productivity_residual
            + self.w_is_shopping * f.is_shopping
            + self.w_is_street * f.is_street
            + self.w_is_clinic * f.is_clinic)
    }
}
