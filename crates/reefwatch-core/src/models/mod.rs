//! Data model: measurements, thresholds, derived results, and alert records.

pub mod alert;
pub mod classification;
pub mod correlation;
pub mod insight;
pub mod measurement;
pub mod parameter;
pub mod seasonal;
pub mod threshold;
pub mod trend;

pub use alert::{Alert, AlertAction, AlertKey, AlertQuery, AlertSeverity, AlertStatus, SnoozeDuration};
pub use classification::Classification;
pub use correlation::{CorrelationDirection, CorrelationResult, CorrelationStrength};
pub use insight::{Insight, InsightKind};
pub use measurement::{Measurement, WaterTest};
pub use parameter::{BetterDirection, Parameter, ParameterProfile};
pub use seasonal::{Season, SeasonalPattern};
pub use threshold::{TankCategory, ThresholdBand, ThresholdProfile};
pub use trend::{TrendDirection, TrendResult};
