use super::common::{assert_close, value};
use crate::engine::DistributionEngine;
use pullcalc_common::{ErrorKind, Probability};

#[test]
fn single_pull_matches_success_probability() {
    let mut engine = DistributionEngine::new();
    let exact = engine.exact_probability(1, 1, "0.008").unwrap();
    assert_close(value(&exact), 0.008, 1e-15);
    assert_eq!(exact.to_string().len(), "0.".len() + 20);
    assert_eq!(engine.format_probability(&exact), "0.8000%");
}

#[test]
fn matches_closed_form_values() {
    let mut engine = DistributionEngine::new();
    let p = engine.exact_probability(3, 10, "0.5").unwrap();
    assert_close(value(&p), 0.1171875, 1e-14);

    let p = engine.exact_probability(0, 4, "0.25").unwrap();
    assert_close(value(&p), 0.75f64.powi(4), 1e-14);
}

#[test]
fn large_trial_counts_stay_finite() {
    let mut engine = DistributionEngine::new();
    let p = engine.exact_probability(5000, 10_000, "0.5").unwrap();
    assert_close(value(&p), 0.007978646139382154, 1e-10);
}

#[test]
fn non_numeric_probability_is_a_validation_error() {
    let mut engine = DistributionEngine::new();
    for bad in ["abc", "", "1e-3", "NaN"] {
        let err = engine.exact_probability(1, 2, bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{bad:?}");
    }
}

#[test]
fn certain_and_impossible_probabilities() {
    let mut engine = DistributionEngine::new();

    let never = engine.exact_probability(0, 5, "0").unwrap();
    assert_close(value(&never), 1.0, 0.0);
    assert_eq!(engine.exact_probability(1, 5, "0").unwrap(), Probability::Zero);

    let always = engine.exact_probability(5, 5, "1").unwrap();
    assert_close(value(&always), 1.0, 0.0);
    assert_eq!(engine.exact_probability(4, 5, "1").unwrap(), Probability::Zero);
}

#[test]
fn more_successes_than_pulls_is_zero() {
    let mut engine = DistributionEngine::new();
    assert_eq!(
        engine.exact_probability(6, 5, "0.3").unwrap(),
        Probability::Zero
    );
}

#[test]
fn probabilities_outside_unit_interval_are_indeterminate() {
    let mut engine = DistributionEngine::new();
    let p = engine.exact_probability(1, 2, "1.5").unwrap();
    assert_eq!(p, Probability::Indeterminate);
    assert_eq!(p.to_string(), "INF");
    assert_eq!(engine.format_probability(&p), "INF");

    let p = engine.exact_probability(2, 3, "-0.2").unwrap();
    assert!(p.is_indeterminate());
    assert_eq!(engine.metrics().indeterminate_results, 2);
}

#[test]
fn values_below_precision_report_zero() {
    let mut engine = DistributionEngine::new();
    // 0.01^100 = 1e-200, far below 20 digits.
    let p = engine.exact_probability(100, 100, "0.01").unwrap();
    assert_eq!(p, Probability::Zero);
    assert_eq!(engine.format_probability(&p), "0.0000%");

    engine.set_precision(3).unwrap();
    // 0.5^12 ≈ 0.000244 rounds to 0.000
    let p = engine.exact_probability(12, 12, "0.5").unwrap();
    assert_eq!(p, Probability::Zero);
}

#[test]
fn repeated_calls_are_byte_identical() {
    let mut engine = DistributionEngine::new();
    let first = engine.exact_probability(7, 40, "0.123").unwrap().to_string();
    let second = engine.exact_probability(7, 40, "0.123").unwrap().to_string();
    assert_eq!(first, second);
    assert_eq!(engine.metrics().exact_misses, 1);
    assert_eq!(engine.metrics().exact_hits, 1);
}
