//! Evaluation parameters

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Extra digits carried by approximations beyond the requested precision
pub const GUARD_DIGITS: usize = 10;

pub const DEFAULT_DECIMALS: usize = 12;

/// Unit of trigonometric arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "radians" | "rad" => Ok(AngleMode::Radians),
            "degrees" | "deg" => Ok(AngleMode::Degrees),
            other => Err(format!("unknown angle mode '{}'", other)),
        }
    }
}

/// Which numbers an evaluation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Exact rationals
    #[default]
    Rational,
    /// Integers only: integer literals, floor division, integer results
    Discrete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationParameters {
    /// Correct fractional digits requested from approximations
    pub decimals: usize,
    pub angle_mode: AngleMode,
    pub domain: Domain,
}

impl Default for EvaluationParameters {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            angle_mode: AngleMode::default(),
            domain: Domain::default(),
        }
    }
}

impl EvaluationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Digits approximations are carried at internally.
    pub fn working_digits(&self) -> usize {
        self.decimals + GUARD_DIGITS
    }
}
