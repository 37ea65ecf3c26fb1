use std::fmt;

use serde::{Deserialize, Serialize};

/// Banded status of one measurement. Ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Ideal,
    Acceptable,
    Warning,
    Critical,
}

impl Classification {
    /// Whether this classification should raise an alert.
    pub fn is_breach(self) -> bool {
        matches!(self, Self::Warning | Self::Critical)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ideal => "ideal",
            Self::Acceptable => "acceptable",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
