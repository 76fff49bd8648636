//! Deterministic synthetic record generation for demos and tests.
//!
//! RULE: no platform RNG. Everything flows from the caller's seed, so
//! the same seed always yields the same records.

use crate::record::{PharmacyRecord, Segment};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct RecordGenerator {
    rng: Pcg64Mcg,
    next_id: u32,
}

impl RecordGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
            next_id: 1,
        }
    }

    fn next_f64(&mut self) -> f64 {
        let bits = self.rng.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// One plausible pharmacy record.
    pub fn record(&mut self) -> PharmacyRecord {
        let id = format!("ph-{:04}", self.next_id);
        self.next_id += 1;

        let segment = Segment::ALL[(self.rng.next_u64() % 5) as usize];
        let annual_transactions = self.in_range(30_000.0, 160_000.0).round();
        let basket = self.in_range(14.0, 28.0);
        let annual_revenue = (annual_transactions * basket).round();
        let prescription_ratio = self.in_range(0.35, 0.85);

        // Staffing in half-FTE steps, absence in quarter steps.
        let actual_net = (self.in_range(1.0, 9.0) * 2.0).round() / 2.0;
        let absence_component = (self.in_range(0.0, 1.2) * 4.0).round() / 4.0;

        let productivity_net = self.in_range(4.5, 12.0);
        let productivity_gross = productivity_net * self.in_range(0.80, 0.92);

        PharmacyRecord {
            id,
            segment,
            annual_transactions,
            annual_revenue,
            prescription_ratio,
            actual_net,
            absence_component,
            productivity_net,
            productivity_gross,
        }
    }

    pub fn records(&mut self, n: usize) -> Vec<PharmacyRecord> {
        (0..n).map(|_| self.record()).collect()
    }
}
