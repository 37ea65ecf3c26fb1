//! Closed parameter catalogue with a registered-profile lookup.
//!
//! Known water parameters are enum variants. Anything else parses to
//! [`Parameter::Other`], which carries no profile, so downstream code handles
//! unknown names as a deliberate case rather than a silent pass-through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A measured water parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Parameter {
    Ph,
    Temperature,
    Ammonia,
    Nitrite,
    Nitrate,
    Phosphate,
    Alkalinity,
    GeneralHardness,
    Calcium,
    Magnesium,
    Salinity,
    DissolvedOxygen,
    /// A parameter outside the catalogue, stored under its normalized name.
    Other(String),
}

/// Which way a parameter should move to be considered better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetterDirection {
    /// Toxic compounds: any decrease is an improvement.
    Lower,
    /// More is better (e.g. dissolved oxygen).
    Higher,
    /// Builds up between water changes; small rises are expected.
    Accumulator,
    /// Should hold near the midpoint of its ideal band.
    TargetMidpoint,
}

/// Static description of a catalogued parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterProfile {
    pub key: &'static str,
    pub display_name: &'static str,
    pub unit: &'static str,
    pub better: BetterDirection,
}

/// Declarative catalogue. Adding a parameter is a data change here.
const CATALOGUE: &[ParameterProfile] = &[
    ParameterProfile { key: "ph", display_name: "pH", unit: "pH", better: BetterDirection::TargetMidpoint },
    ParameterProfile { key: "temperature", display_name: "Temperature", unit: "°C", better: BetterDirection::TargetMidpoint },
    ParameterProfile { key: "ammonia", display_name: "Ammonia", unit: "ppm", better: BetterDirection::Lower },
    ParameterProfile { key: "nitrite", display_name: "Nitrite", unit: "ppm", better: BetterDirection::Lower },
    ParameterProfile { key: "nitrate", display_name: "Nitrate", unit: "ppm", better: BetterDirection::Accumulator },
    ParameterProfile { key: "phosphate", display_name: "Phosphate", unit: "ppm", better: BetterDirection::Lower },
    ParameterProfile { key: "alkalinity", display_name: "Alkalinity", unit: "dKH", better: BetterDirection::TargetMidpoint },
    ParameterProfile { key: "general_hardness", display_name: "General hardness", unit: "dGH", better: BetterDirection::TargetMidpoint },
    ParameterProfile { key: "calcium", display_name: "Calcium", unit: "ppm", better: BetterDirection::TargetMidpoint },
    ParameterProfile { key: "magnesium", display_name: "Magnesium", unit: "ppm", better: BetterDirection::TargetMidpoint },
    ParameterProfile { key: "salinity", display_name: "Salinity", unit: "SG", better: BetterDirection::TargetMidpoint },
    ParameterProfile { key: "dissolved_oxygen", display_name: "Dissolved oxygen", unit: "mg/L", better: BetterDirection::Higher },
];

impl Parameter {
    /// Every catalogued parameter, in catalogue order.
    pub const KNOWN: [Parameter; 12] = [
        Parameter::Ph,
        Parameter::Temperature,
        Parameter::Ammonia,
        Parameter::Nitrite,
        Parameter::Nitrate,
        Parameter::Phosphate,
        Parameter::Alkalinity,
        Parameter::GeneralHardness,
        Parameter::Calcium,
        Parameter::Magnesium,
        Parameter::Salinity,
        Parameter::DissolvedOxygen,
    ];

    /// Canonical snake_case key.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ph => "ph",
            Self::Temperature => "temperature",
            Self::Ammonia => "ammonia",
            Self::Nitrite => "nitrite",
            Self::Nitrate => "nitrate",
            Self::Phosphate => "phosphate",
            Self::Alkalinity => "alkalinity",
            Self::GeneralHardness => "general_hardness",
            Self::Calcium => "calcium",
            Self::Magnesium => "magnesium",
            Self::Salinity => "salinity",
            Self::DissolvedOxygen => "dissolved_oxygen",
            Self::Other(name) => name,
        }
    }

    /// Catalogue entry, or `None` for [`Parameter::Other`].
    pub fn profile(&self) -> Option<&'static ParameterProfile> {
        CATALOGUE.iter().find(|p| p.key == self.as_str())
    }

    /// Better-direction rule, or `None` when the parameter is not catalogued.
    pub fn better_direction(&self) -> Option<BetterDirection> {
        self.profile().map(|p| p.better)
    }

    pub fn display_name(&self) -> &str {
        match self.profile() {
            Some(profile) => profile.display_name,
            None => self.as_str(),
        }
    }

    /// Parse a free-form name. Never fails: unknown names become `Other`.
    pub fn parse(name: &str) -> Self {
        let normalized: String = name
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "ph" => Self::Ph,
            "temperature" | "temp" => Self::Temperature,
            "ammonia" | "nh3" | "nh3_nh4" => Self::Ammonia,
            "nitrite" | "no2" => Self::Nitrite,
            "nitrate" | "no3" => Self::Nitrate,
            "phosphate" | "po4" => Self::Phosphate,
            "alkalinity" | "kh" | "carbonate_hardness" => Self::Alkalinity,
            "general_hardness" | "gh" | "hardness" => Self::GeneralHardness,
            "calcium" | "ca" => Self::Calcium,
            "magnesium" | "mg" => Self::Magnesium,
            "salinity" | "specific_gravity" => Self::Salinity,
            "dissolved_oxygen" | "oxygen" | "o2" => Self::DissolvedOxygen,
            _ => Self::Other(normalized),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Parameter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for Parameter {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for Parameter {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Parameter> for String {
    fn from(p: Parameter) -> Self {
        p.as_str().to_string()
    }
}
