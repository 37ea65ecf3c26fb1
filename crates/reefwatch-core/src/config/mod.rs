//! Configuration system for reefwatch.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod alert_config;
pub mod analysis_config;
pub mod reefwatch_config;
pub mod threshold_config;

pub use alert_config::AlertConfig;
pub use analysis_config::AnalysisConfig;
pub use reefwatch_config::{ConfigOverrides, ReefwatchConfig};
pub use threshold_config::ThresholdConfig;
