use crate::engine::DistributionEngine;
use pullcalc_common::Probability;

/// Engine with the success probability derived from two percentages.
pub fn engine_with_chance(generic: f64, specific: f64) -> DistributionEngine {
    let mut engine = DistributionEngine::new();
    engine
        .set_success_probability(generic, specific)
        .expect("chances in range");
    engine
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

pub fn value(probability: &Probability) -> f64 {
    assert!(
        !probability.is_indeterminate(),
        "unexpected indeterminate result"
    );
    probability.to_f64()
}
