use crate::engine::{DistributionEngine, EngineConfig};
use pullcalc_common::{DistributionError, ErrorKind};

#[test]
fn defaults_match_documented_configuration() {
    let engine = DistributionEngine::new();
    assert_eq!(engine.precision(), 20);
    assert_eq!(engine.cut_off_display_precision(), 4);
    assert_eq!(
        engine.success_probability().to_string(),
        "0.01000000000000000000"
    );
    assert_eq!(engine.desired_copies(), &[1]);
    assert_eq!(engine.pull_amounts(), &[1]);
    assert_eq!(engine.cache_sizes().total(), 0);
}

#[test]
fn precision_bounds_are_inclusive() {
    let mut engine = DistributionEngine::new();

    let err = engine.set_precision(101).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert_eq!(engine.precision(), 20, "state must be left unchanged");

    engine.set_precision(0).unwrap();
    assert_eq!(engine.precision(), 0);
    engine.set_precision(100).unwrap();
    assert_eq!(engine.precision(), 100);
}

#[test]
fn success_probability_is_product_of_chances_over_ten_thousand() {
    let mut engine = DistributionEngine::new();
    engine.set_success_probability(1.0, 80.0).unwrap();
    assert_eq!(
        engine.success_probability().to_string(),
        "0.00800000000000000000"
    );

    engine.set_success_probability(0.6, 50.0).unwrap();
    assert_eq!(engine.success_probability(), &"0.003".parse().unwrap());

    engine.set_success_probability(100.0, 100.0).unwrap();
    assert_eq!(engine.success_probability(), &"1".parse().unwrap());
}

#[test]
fn success_probability_is_truncated_to_precision() {
    let mut engine = DistributionEngine::new();
    engine.set_precision(4).unwrap();
    engine.set_success_probability(1.0, 80.0).unwrap();
    assert_eq!(engine.success_probability().to_string(), "0.0080");

    engine.set_precision(2).unwrap();
    engine.set_success_probability(1.0, 80.0).unwrap();
    assert!(engine.success_probability().is_zero());
}

#[test]
fn out_of_range_chances_leave_probability_unchanged() {
    let mut engine = DistributionEngine::new();
    engine.set_success_probability(1.0, 80.0).unwrap();
    let before = engine.success_probability().clone();

    for (generic, specific) in [(101.0, 50.0), (-1.0, 50.0), (50.0, 100.5), (50.0, f64::NAN)] {
        let err = engine
            .set_success_probability(generic, specific)
            .unwrap_err();
        assert!(err.is_range(), "({generic}, {specific}) gave {err:?}");
    }
    assert_eq!(engine.success_probability(), &before);
}

#[test]
fn desired_copies_must_be_non_empty_positive_and_distinct() {
    let mut engine = DistributionEngine::new();

    assert!(matches!(
        engine.set_desired_copies_amounts(&[]),
        Err(DistributionError::EmptyInput { .. })
    ));
    assert!(matches!(
        engine.set_desired_copies_amounts(&[1, 0]),
        Err(DistributionError::NonPositive { index: 1, received: 0, .. })
    ));
    assert!(matches!(
        engine.set_desired_copies_amounts(&[2, 3, 2]),
        Err(DistributionError::DuplicateValue { value: 2, .. })
    ));
    assert_eq!(engine.desired_copies(), &[1]);

    engine.set_desired_copies_amounts(&[3, 1, 2]).unwrap();
    assert_eq!(engine.desired_copies(), &[3, 1, 2]);
}

#[test]
fn zero_desired_copies_is_rejected() {
    let mut engine = DistributionEngine::new();
    engine.set_pull_amounts(&[100]).unwrap();
    let err = engine.set_desired_copies_amounts(&[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn pull_amounts_must_be_non_empty_and_positive() {
    let mut engine = DistributionEngine::new();

    let err = engine.set_pull_amounts(&[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        err.to_string(),
        "Pull amounts must be positive integers, received 0 at position 0"
    );
    assert!(engine.set_pull_amounts(&[]).unwrap_err().is_validation());
    assert!(engine.set_pull_amounts(&[10, -5]).unwrap_err().is_validation());
    assert_eq!(engine.pull_amounts(), &[1]);

    engine.set_pull_amounts(&[11, 22, 11]).unwrap();
    assert_eq!(engine.pull_amounts(), &[11, 22, 11]);
}

#[test]
fn cut_off_display_precision_bounds() {
    let mut engine = DistributionEngine::new();
    assert!(engine.set_cut_off_display_precision(11).unwrap_err().is_range());
    assert_eq!(engine.cut_off_display_precision(), 4);

    engine.set_cut_off_display_precision(0).unwrap();
    assert_eq!(engine.cut_off_display_precision(), 0);
    assert_eq!(engine.format_percentage("0.004").unwrap(), "0%");
}

#[test]
fn with_config_validates_before_building() {
    let bad = EngineConfig {
        precision: 150,
        ..EngineConfig::default()
    };
    assert!(DistributionEngine::with_config(bad).unwrap_err().is_range());

    let bad = EngineConfig {
        cut_off_display_precision: 12,
        ..EngineConfig::default()
    };
    assert!(DistributionEngine::with_config(bad).is_err());

    let good = EngineConfig {
        precision: 30,
        cut_off_display_precision: 6,
        clear_caches_on_precision_change: true,
    };
    let engine = DistributionEngine::with_config(good.clone()).unwrap();
    assert_eq!(engine.config(), &good);
    assert_eq!(engine.success_probability().scale(), 30);
}
