//! # reefwatch-analysis
//!
//! Pure water-quality analytics over an already-fetched measurement history.
//! Classification per measurement, least-squares trends, Pearson correlations,
//! seasonal aggregation, and rule-driven insights.
//!
//! Nothing here holds state or fails on sparse data: too few points yields
//! `None` or an empty collection.

pub mod classifier;
pub mod correlation;
pub mod engine;
pub mod history;
pub mod insights;
pub mod seasonal;
pub mod series;
pub mod stats;
pub mod trend;

pub use classifier::{assess, classify, classify_measurement, classify_test, Breach, ClassifiedMeasurement};
pub use correlation::{correlate, correlate_history};
pub use engine::{AnalysisEngine, WaterQualityReport};
pub use history::InMemoryHistory;
pub use insights::{generate_insights, generate_insights_with_seasonal};
pub use seasonal::aggregate_by_season;
pub use trend::{analyze_trend, analyze_trend_with_band};
