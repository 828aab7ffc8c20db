use crate::engine::{DistributionEngine, EngineConfig};

#[test]
fn precision_change_keeps_stale_entries_by_default() {
    let mut engine = DistributionEngine::new();
    let before = engine.exact_probability(1, 3, "0.3").unwrap().to_string();

    engine.set_precision(5).unwrap();
    let after = engine.exact_probability(1, 3, "0.3").unwrap().to_string();
    assert_eq!(before, after, "cached value computed at precision 20 is served");
    assert_eq!(engine.metrics().exact_hits, 1);

    engine.clear_caches();
    assert_eq!(engine.cache_sizes().total(), 0);
    let fresh = engine.exact_probability(1, 3, "0.3").unwrap().to_string();
    assert_eq!(fresh, "0.44100");
}

#[test]
fn precision_change_can_clear_caches() {
    let config = EngineConfig {
        clear_caches_on_precision_change: true,
        ..EngineConfig::default()
    };
    let mut engine = DistributionEngine::with_config(config).unwrap();
    engine.at_least_probability(1, 4, "0.3").unwrap();
    assert!(engine.cache_sizes().total() > 0);

    engine.set_precision(20).unwrap();
    assert!(engine.cache_sizes().total() > 0, "same precision keeps entries");

    engine.set_precision(6).unwrap();
    assert_eq!(engine.cache_sizes().total(), 0);
    let value = engine.exact_probability(1, 3, "0.3").unwrap().to_string();
    assert_eq!(value, "0.441000");
}

#[test]
fn success_probability_is_part_of_the_key() {
    let mut engine = DistributionEngine::new();
    engine.set_desired_copies_amounts(&[1]).unwrap();
    engine.set_pull_amounts(&[2]).unwrap();

    engine.set_success_probability(1.0, 80.0).unwrap();
    let first = engine.exact_grid();
    engine.set_success_probability(1.0, 40.0).unwrap();
    let second = engine.exact_grid();

    assert_ne!(first, second);
    assert_eq!(engine.cache_sizes().exact, 2);
}

#[test]
fn numerically_equal_probability_strings_share_entries() {
    let mut engine = DistributionEngine::new();
    engine.exact_probability(2, 4, "0.5").unwrap();
    engine.exact_probability(2, 4, "0.500").unwrap();
    assert_eq!(engine.cache_sizes().exact, 1);
    assert_eq!(engine.metrics().exact_hits, 1);
}

#[test]
fn grid_results_are_rebuilt_but_sub_results_reused() {
    let mut engine = DistributionEngine::new();
    engine.set_desired_copies_amounts(&[1, 2]).unwrap();
    engine.set_pull_amounts(&[10, 20]).unwrap();

    let first = engine.evaluate_both();
    let misses = engine.metrics().total_misses();
    let second = engine.evaluate_both();
    assert_eq!(first, second);
    assert_eq!(engine.metrics().total_misses(), misses);
    assert!(engine.metrics().at_least_hits >= 4);
}
