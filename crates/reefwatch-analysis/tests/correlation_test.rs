use proptest::prelude::*;
use reefwatch_analysis::{correlate, correlate_history};
use reefwatch_core::models::{CorrelationDirection, CorrelationStrength, Parameter};
use reefwatch_fixtures::daily_tests;

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

#[test]
fn below_ten_points_yields_nothing() {
    let a = ramp(9);
    assert!(correlate(&Parameter::Ph, &a, &Parameter::Nitrate, &a).is_none());
}

#[test]
fn ten_points_is_the_floor() {
    let five = [1.0, 3.0, 2.0, 5.0, 4.0];
    assert!(correlate(&Parameter::Ph, &five, &Parameter::Nitrate, &five).is_none());
    let a = [1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 8.0, 7.0, 9.0, 10.0];
    let b = [2.0, 1.0, 4.0, 3.0, 6.0, 5.0, 8.0, 9.0, 7.0, 10.0];
    let result = correlate(&Parameter::Ph, &a, &Parameter::Nitrate, &b).unwrap();
    assert_eq!(result.sample_count, 10);
    assert!(result.coefficient > 0.0 && result.coefficient <= 1.0);
}

#[test]
fn zero_variance_yields_nothing() {
    let a = ramp(12);
    let flat = vec![7.0; 12];
    assert!(correlate(&Parameter::Ph, &flat, &Parameter::Nitrate, &a).is_none());
}

#[test]
fn perfect_linear_relationships() {
    let a = ramp(12);
    let up: Vec<f64> = a.iter().map(|x| 2.0 * x + 1.0).collect();
    let down: Vec<f64> = a.iter().map(|x| 10.0 - x).collect();

    let pos = correlate(&Parameter::Ph, &a, &Parameter::Nitrate, &up).unwrap();
    assert!((pos.coefficient - 1.0).abs() < 1e-9);
    assert_eq!(pos.strength, CorrelationStrength::Strong);
    assert_eq!(pos.direction, CorrelationDirection::Positive);

    let neg = correlate(&Parameter::Ph, &a, &Parameter::Nitrate, &down).unwrap();
    assert!((neg.coefficient + 1.0).abs() < 1e-9);
    assert_eq!(neg.direction, CorrelationDirection::Negative);
}

#[test]
fn unequal_lengths_use_shared_prefix() {
    let a = ramp(15);
    let b = ramp(11);
    let result = correlate(&Parameter::Ph, &a, &Parameter::Nitrate, &b).unwrap();
    assert_eq!(result.sample_count, 11);
}

#[test]
fn history_pairs_by_test_and_sorts_by_strength() {
    let params = [Parameter::Ph, Parameter::Temperature, Parameter::Nitrate];
    let rows: Vec<Vec<f64>> = (0..12)
        .map(|i| {
            let x = i as f64;
            // temperature follows ph exactly; nitrate wobbles.
            vec![7.0 + x * 0.05, 24.0 + x * 0.2, if i % 2 == 0 { 10.0 + x } else { 12.0 }]
        })
        .collect();
    let tests = daily_tests("tank-1", &params, &rows);

    let results = correlate_history(&tests, &params);
    assert!(!results.is_empty());
    assert_eq!(results[0].parameter_a, Parameter::Ph);
    assert_eq!(results[0].parameter_b, Parameter::Temperature);
    assert!((results[0].coefficient - 1.0).abs() < 1e-9);
    for pair in results.windows(2) {
        assert!(pair[0].coefficient.abs() >= pair[1].coefficient.abs());
    }
}

#[test]
fn history_skips_tests_missing_either_parameter() {
    let params = [Parameter::Ph, Parameter::Nitrate];
    let mut rows: Vec<Vec<f64>> = (0..10).map(|i| vec![7.0 + i as f64 * 0.1, i as f64]).collect();
    rows.push(vec![7.0]);
    let tests = daily_tests("tank-1", &params, &rows);
    let results = correlate_history(&tests, &params);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].sample_count, 10);
}

proptest! {
    #[test]
    fn correlation_is_symmetric_and_bounded(
        pairs in prop::collection::vec((-1_000.0f64..1_000.0, -1_000.0f64..1_000.0), 10..60)
    ) {
        let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let ab = correlate(&Parameter::Ph, &a, &Parameter::Nitrate, &b);
        let ba = correlate(&Parameter::Nitrate, &b, &Parameter::Ph, &a);
        match (ab, ba) {
            (Some(ab), Some(ba)) => {
                prop_assert!((-1.0..=1.0).contains(&ab.coefficient));
                prop_assert!((ab.coefficient - ba.coefficient).abs() < 1e-9);
            }
            (None, None) => {}
            (ab, ba) => prop_assert!(false, "asymmetric: {:?} vs {:?}", ab, ba),
        }
    }
}
