use std::fmt;

use serde::{Deserialize, Serialize};

use super::parameter::Parameter;

/// Fixed calendar season, bucketed by month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Season for a zero-indexed month (January = 0).
    ///
    /// Spring 2–4, summer 5–7, fall 8–10, winter 11, 0, 1.
    pub fn from_month0(month0: u32) -> Self {
        match month0 % 12 {
            2..=4 => Self::Spring,
            5..=7 => Self::Summer,
            8..=10 => Self::Fall,
            _ => Self::Winter,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean and population variance of one parameter within one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPattern {
    pub parameter: Parameter,
    pub season: Season,
    pub average_value: f64,
    pub variance: f64,
    pub sample_count: usize,
}
