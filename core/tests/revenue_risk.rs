//! Revenue-at-risk: the eligibility gates, the formula, the cap.

use staffing_core::{
    EngineConfig, PharmacyRecord, RevenueRiskEngine, RiskFormula, Segment, SegmentBenchmark,
    StaffingPrediction,
};

fn benchmark() -> SegmentBenchmark {
    SegmentBenchmark {
        net_mean: 9.14,
        gross_mean: 7.96,
        peak_revenue_share: 0.57,
        peak_overload_multiplier: 2.5,
        competition_multiplier: 1.2,
    }
}

/// The worked scenario: understaffed by 0.5 FTE, above-average performer.
fn eligible_prediction() -> StaffingPrediction {
    StaffingPrediction {
        net_prediction: 4.0,
        gross_prediction: 4.5,
        actual_gross: 4.0,
        gap: 0.5,
    }
}

fn eligible_record() -> PharmacyRecord {
    PharmacyRecord {
        id: "ph-0001".into(),
        segment: Segment::Shopping,
        annual_transactions: 100_000.0,
        annual_revenue: 1_200_000.0,
        prescription_ratio: 0.65,
        actual_net: 3.5,
        absence_component: 0.5,
        productivity_net: 10.5,
        productivity_gross: 9.0,
    }
}

fn engine(formula: RiskFormula) -> RevenueRiskEngine {
    RevenueRiskEngine::new(&EngineConfig::default(), formula)
}

/// Gate 1: not understaffed → zero, with every other gate passing.
#[test]
fn gate_requires_understaffing() {
    let e = engine(RiskFormula::V3);
    for (gross_prediction, gap) in [(4.0, 0.0), (3.5, -0.5)] {
        let p = StaffingPrediction {
            net_prediction: gross_prediction - 0.5,
            gross_prediction,
            actual_gross: 4.0,
            gap,
        };
        assert_eq!(e.compute(&p, &eligible_record(), &benchmark()), 0);
    }
}

/// Gate 2: at or below the gross-basis benchmark → zero.
#[test]
fn gate_requires_above_average_productivity() {
    let e = engine(RiskFormula::V3);
    let b = benchmark();
    for productivity in [0.0, 5.0, b.gross_mean] {
        let mut r = eligible_record();
        r.productivity_gross = productivity;
        assert_eq!(
            e.compute(&eligible_prediction(), &r, &b),
            0,
            "productivity {productivity} must gate to zero"
        );
    }

    // Marginally above the mean is eligible.
    let mut r = eligible_record();
    r.productivity_gross = b.gross_mean + 0.01;
    assert!(e.compute(&eligible_prediction(), &r, &b) > 0);
}

/// Gate 3a: no revenue, nothing to lose.
#[test]
fn gate_requires_positive_revenue() {
    let mut r = eligible_record();
    r.annual_revenue = 0.0;
    assert_eq!(
        engine(RiskFormula::V3).compute(&eligible_prediction(), &r, &benchmark()),
        0
    );
}

/// Gate 3b: no actual staffing, no valid overload ratio.
#[test]
fn gate_requires_positive_actual_staffing() {
    let mut r = eligible_record();
    r.actual_net = 0.0;
    let p = StaffingPrediction {
        net_prediction: 4.0,
        gross_prediction: 4.5,
        actual_gross: 0.5,
        gap: 4.0,
    };
    assert_eq!(engine(RiskFormula::V3).compute(&p, &r, &benchmark()), 0);
}

/// A benchmark with no usable gross mean gates to zero instead of
/// dividing by it.
#[test]
fn degenerate_benchmark_gates_to_zero() {
    let mut b = benchmark();
    b.gross_mean = 0.0;
    assert_eq!(
        engine(RiskFormula::V3).compute(&eligible_prediction(), &eligible_record(), &b),
        0
    );
}

/// The worked eight-step scenario, end to end:
/// overload 1.125 → peak 0.3125; peak revenue 684,000; blended 0.1025;
/// productivity ratio 9.0/7.96; competition 1.2 → 29,726 after floor.
#[test]
fn worked_scenario_v3_value() {
    let amount = engine(RiskFormula::V3).compute(
        &eligible_prediction(),
        &eligible_record(),
        &benchmark(),
    );
    assert_eq!(amount, 29_726);
    assert!(amount < 180_000, "must stay under the 15% cap");
}

/// Extreme overload saturates at max_risk_fraction of revenue.
#[test]
fn cap_holds_under_extreme_overload() {
    let p = StaffingPrediction {
        net_prediction: 9.5,
        gross_prediction: 10.0,
        actual_gross: 1.0,
        gap: 9.0,
    };
    let mut r = eligible_record();
    r.actual_net = 0.5;

    let amount = engine(RiskFormula::V3).compute(&p, &r, &benchmark());
    assert_eq!(amount, 180_000); // 1_200_000 * 0.15
}

/// The cap holds across a sweep of eligible inputs.
#[test]
fn cap_holds_for_all_eligible_inputs() {
    let e = engine(RiskFormula::V3);
    let b = benchmark();
    for overstaff_by in 1..30 {
        let gap = overstaff_by as f64 * 0.5;
        let p = StaffingPrediction {
            net_prediction: 3.5 + gap,
            gross_prediction: 4.0 + gap,
            actual_gross: 4.0,
            gap,
        };
        let amount = e.compute(&p, &eligible_record(), &b);
        assert!(
            amount as f64 <= 1_200_000.0 * 0.15,
            "gap {gap}: {amount} exceeds the cap"
        );
    }
}

/// Legacy V1: flat 50% sensitivity, uncapped — kept for comparison.
#[test]
fn v1_flat_formula_value() {
    let amount = engine(RiskFormula::V1).compute(
        &eligible_prediction(),
        &eligible_record(),
        &benchmark(),
    );
    // (4.5 / 4.0 - 1) * 0.5 * 1_200_000
    assert_eq!(amount, 75_000);
}

/// V1 shares the same eligibility gates as the current formula.
#[test]
fn v1_respects_gates() {
    let e = engine(RiskFormula::V1);
    let mut r = eligible_record();
    r.productivity_gross = 5.0;
    assert_eq!(e.compute(&eligible_prediction(), &r, &benchmark()), 0);
}

/// The three formulas diverge on the same eligible input, and the
/// blended variants stay below the blunt legacy estimate here.
#[test]
fn formula_variants_diverge() {
    let p = eligible_prediction();
    let r = eligible_record();
    let b = benchmark();

    let v1 = engine(RiskFormula::V1).compute(&p, &r, &b);
    let v2 = engine(RiskFormula::V2).compute(&p, &r, &b);
    let v3 = engine(RiskFormula::V3).compute(&p, &r, &b);

    assert!(v2 > 0 && v3 > 0);
    assert!(v2 < v3, "peak amplification should raise the estimate");
    assert!(v3 < v1, "calibrated estimates sit below the flat 50% model");
    assert_ne!(v1, v2);
}

/// Prescription-heavy revenue is stickier: higher rx share, lower risk.
#[test]
fn rx_share_lowers_risk() {
    let e = engine(RiskFormula::V3);
    let b = benchmark();
    let mut low_rx = eligible_record();
    low_rx.prescription_ratio = 0.2;
    let mut high_rx = eligible_record();
    high_rx.prescription_ratio = 0.9;

    let low = e.compute(&eligible_prediction(), &low_rx, &b);
    let high = e.compute(&eligible_prediction(), &high_rx, &b);
    assert!(
        high < low,
        "rx 0.9 ({high}) should risk less than rx 0.2 ({low})"
    );
}
