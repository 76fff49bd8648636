//! Shared primitive types used across the analytics engine.

/// A stable, unique identifier for a pharmacy location.
pub type PharmacyId = String;

/// Full-time-equivalent staffing, in fractional units.
pub type Fte = f64;
