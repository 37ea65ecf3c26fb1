//! Test fixtures for reefwatch: measurement/test builders and a loader for
//! the golden JSON scenarios under `test-fixtures/golden/`.

use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use reefwatch_core::models::{Measurement, Parameter, WaterTest};
use serde::de::DeserializeOwned;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").is_dir() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// A fixed reference instant so tests never depend on the wall clock.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// `epoch() + days`.
pub fn day(days: i64) -> DateTime<Utc> {
    epoch() + Duration::days(days)
}

/// One measurement with the catalogue unit.
pub fn measurement(parameter: Parameter, value: f64, timestamp: DateTime<Utc>) -> Measurement {
    Measurement::new(parameter, value, timestamp)
}

/// A series of one parameter, one value per `step_days` starting at `start`.
pub fn series(
    parameter: Parameter,
    values: &[f64],
    start: DateTime<Utc>,
    step_days: i64,
) -> Vec<Measurement> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| measurement(parameter.clone(), v, start + Duration::days(step_days * i as i64)))
        .collect()
}

/// A daily series starting at `epoch()`.
pub fn daily(parameter: Parameter, values: &[f64]) -> Vec<Measurement> {
    series(parameter, values, epoch(), 1)
}

/// Build one test per row. Each row lists `(parameter, value)` pairs.
/// Tests are spaced `step_days` apart starting at `start`.
pub fn tests_from_rows(
    subject_id: &str,
    start: DateTime<Utc>,
    step_days: i64,
    rows: &[Vec<(Parameter, f64)>],
) -> Vec<WaterTest> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let ts = start + Duration::days(step_days * i as i64);
            WaterTest::new(
                format!("{subject_id}-test-{i}"),
                subject_id,
                ts,
                row.iter()
                    .map(|(p, v)| measurement(p.clone(), *v, ts))
                    .collect(),
            )
        })
        .collect()
}

/// Daily tests where column `j` of every row belongs to `parameters[j]`.
pub fn daily_tests(subject_id: &str, parameters: &[Parameter], rows: &[Vec<f64>]) -> Vec<WaterTest> {
    let rows: Vec<Vec<(Parameter, f64)>> = rows
        .iter()
        .map(|row| parameters.iter().cloned().zip(row.iter().copied()).collect())
        .collect();
    tests_from_rows(subject_id, epoch(), 1, &rows)
}
