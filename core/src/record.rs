//! Pharmacy input records and the enriched rows the pipeline produces.

use crate::{
    classifier::Priority,
    error::{AnalyticsError, AnalyticsResult},
    types::{Fte, PharmacyId},
};
use serde::{Deserialize, Serialize};

/// The five location categories used for relative benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    ShoppingPremium,
    Shopping,
    StreetPlus,
    Street,
    Clinic,
}

impl Segment {
    pub const ALL: [Segment; 5] = [
        Segment::ShoppingPremium,
        Segment::Shopping,
        Segment::StreetPlus,
        Segment::Street,
        Segment::Clinic,
    ];

    /// Stable key used in config maps, logs, and the result store.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ShoppingPremium => "shopping_premium",
            Self::Shopping => "shopping",
            Self::StreetPlus => "street_plus",
            Self::Street => "street",
            Self::Clinic => "clinic",
        }
    }

    /// Mall and shopping-center locations.
    pub fn is_shopping(&self) -> bool {
        matches!(self, Self::ShoppingPremium | Self::Shopping)
    }

    /// Street-front locations, strongest neighborhood loyalty.
    pub fn is_street(&self) -> bool {
        matches!(self, Self::StreetPlus | Self::Street)
    }

    /// Locations attached to a clinic or hospital complex.
    pub fn is_clinic(&self) -> bool {
        matches!(self, Self::Clinic)
    }
}

/// One pharmacy location's annual operating figures.
///
/// All volume and monetary fields are non-negative; the prescription
/// ratio lies in [0, 1]. `validate()` enforces this before any
/// prediction is attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyRecord {
    pub id: PharmacyId,
    pub segment: Segment,
    /// Annual transaction count.
    pub annual_transactions: f64,
    /// Annual revenue, in currency units.
    pub annual_revenue: f64,
    /// Prescription share of revenue, 0..=1.
    pub prescription_ratio: f64,
    /// Staff actually present and working (NET basis).
    pub actual_net: Fte,
    /// Absence/coverage staffing component. GROSS = NET + this.
    pub absence_component: Fte,
    /// Transactions per staffing-hour, NET basis.
    pub productivity_net: f64,
    /// Transactions per staffing-hour, GROSS basis.
    pub productivity_gross: f64,
}

impl PharmacyRecord {
    /// Range checks from the data model. The feature builder calls this
    /// before the oracle ever sees the record.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let fail = |reason: &str| {
            Err(AnalyticsError::InvalidRecord {
                id: self.id.clone(),
                reason: reason.to_string(),
            })
        };

        let fields = [
            (self.annual_transactions, "annual_transactions"),
            (self.annual_revenue, "annual_revenue"),
            (self.actual_net, "actual_net"),
            (self.absence_component, "absence_component"),
            (self.productivity_net, "productivity_net"),
            (self.productivity_gross, "productivity_gross"),
        ];
        for (value, name) in fields {
            if !value.is_finite() {
                return fail(&format!("{name} is not a finite number"));
            }
            if value < 0.0 {
                return fail(&format!("{name} must be non-negative"));
            }
        }

        if !self.prescription_ratio.is_finite()
            || self.prescription_ratio < 0.0
            || self.prescription_ratio > 1.0
        {
            return fail("prescription_ratio must be between 0 and 1");
        }

        Ok(())
    }
}

/// The input record plus everything the pipeline derived from it.
/// Owned by the single invocation that produced it; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: PharmacyRecord,
    /// Predicted NET staffing, floored at the operational minimum.
    pub net_prediction: Fte,
    /// Predicted GROSS staffing (NET + absence component).
    pub gross_prediction: Fte,
    /// Actual GROSS staffing (same conversion).
    pub actual_gross: Fte,
    /// gross_prediction - actual_gross. Positive = understaffed.
    pub gap: Fte,
    pub priority: Priority,
    /// Annual revenue at risk, whole currency units, 0 unless eligible.
    pub revenue_at_risk: u64,
    /// NET productivity relative to the segment mean, rounded percent.
    pub productivity_pct: f64,
    /// Locations at or below the small-location staffing threshold can
    /// legitimately run leaner; their risk figure deserves a second look.
    pub small_location: bool,
}
