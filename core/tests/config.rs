//! Configuration validation and the calibrated defaults.

use staffing_core::{AnalyticsError, EngineConfig, Segment, SegmentBenchmark};

fn assert_rejected(config: EngineConfig, expected_fragment: &str) {
    match config.validate() {
        Err(AnalyticsError::Config(reason)) => assert!(
            reason.contains(expected_fragment),
            "reason '{reason}' should mention '{expected_fragment}'"
        ),
        other => panic!("expected Config error for '{expected_fragment}', got {other:?}"),
    }
}

/// The shipped defaults must pass their own validation.
#[test]
fn default_config_is_valid() {
    EngineConfig::default().validate().unwrap();
}

/// Equal sensitivities flatten the rx blend into a constant; inverted
/// ones price prescription revenue as the flighty kind. Both rejected.
#[test]
fn inverted_sensitivities_rejected() {
    for (rx, non_rx) in [(0.20, 0.20), (0.30, 0.05)] {
        let config = EngineConfig {
            rx_sensitivity: rx,
            non_rx_sensitivity: non_rx,
            ..EngineConfig::default()
        };
        assert_rejected(config, "rx_sensitivity");
    }
}

#[test]
fn non_positive_gap_threshold_rejected() {
    for threshold in [0.0, -0.05] {
        let config = EngineConfig {
            urgent_gap_threshold: threshold,
            ..EngineConfig::default()
        };
        assert_rejected(config, "urgent_gap_threshold");
    }
}

#[test]
fn out_of_range_risk_fraction_rejected() {
    for fraction in [0.0, -0.1, 1.5] {
        let config = EngineConfig {
            max_risk_fraction: fraction,
            ..EngineConfig::default()
        };
        assert_rejected(config, "max_risk_fraction");
    }
}

/// A peak share of 0 or 1 would mean no peak hours or nothing but.
#[test]
fn degenerate_peak_revenue_share_rejected() {
    for share in [0.0, 1.0] {
        let mut config = EngineConfig::default();
        config
            .segment_benchmarks
            .get_mut(&Segment::Shopping)
            .unwrap()
            .peak_revenue_share = share;
        assert_rejected(config, "peak_revenue_share");
    }
}

#[test]
fn non_positive_benchmark_means_rejected() {
    let mut config = EngineConfig::default();
    config
        .segment_benchmarks
        .get_mut(&Segment::Street)
        .unwrap()
        .gross_mean = 0.0;
    assert_rejected(config, "street");
}

#[test]
fn sub_unit_multipliers_rejected() {
    let mut config = EngineConfig::default();
    config
        .segment_benchmarks
        .get_mut(&Segment::Clinic)
        .unwrap()
        .competition_multiplier = 0.9;
    assert_rejected(config, "clinic");
}

/// The calibrated productivity means per segment. The GROSS mean feeds
/// both the classification branch and the revenue-at-risk gate, so a
/// drift here silently moves every default verdict.
#[test]
fn calibrated_benchmark_table_values() {
    let config = EngineConfig::default();
    let expected = [
        (Segment::ShoppingPremium, 7.25, 6.27),
        (Segment::Shopping, 9.14, 7.96),
        (Segment::StreetPlus, 6.85, 5.68),
        (Segment::Street, 6.44, 5.55),
        (Segment::Clinic, 6.11, 5.23),
    ];
    for (segment, net_mean, gross_mean) in expected {
        let b = &config.segment_benchmarks[&segment];
        assert_eq!(b.net_mean, net_mean, "{:?} net mean", segment);
        assert_eq!(b.gross_mean, gross_mean, "{:?} gross mean", segment);
        assert_eq!(b.peak_overload_multiplier, 2.5, "{:?} peak", segment);
    }
}

/// The unconfigured-segment profile: cautious peak multiplier, baseline
/// competition.
#[test]
fn fallback_profile_values() {
    let b = SegmentBenchmark::fallback();
    assert_eq!(b.net_mean, 8.0);
    assert_eq!(b.gross_mean, 6.0);
    assert_eq!(b.peak_revenue_share, 0.50);
    assert_eq!(b.peak_overload_multiplier, 4.0);
    assert_eq!(b.competition_multiplier, 1.0);
}
