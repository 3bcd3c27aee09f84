//! Claw-back policy selection.
//!
//! This module contains the [`ClawbackMethod`] enum, which selects how a headcount
//! decrease is turned into a recapture amount, and the [`TieredThresholds`] used by
//! the tiered method.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The recapture policy applied when headcount falls during the retention window.
///
/// The set of methods is closed. An unrecognized method name is rejected when it is
/// parsed instead of silently falling back to proportional recapture.
///
/// # Example
///
/// ```
/// use employment_credit::models::ClawbackMethod;
///
/// let method: ClawbackMethod = "all_or_nothing".parse().unwrap();
/// assert_eq!(method, ClawbackMethod::AllOrNothing);
/// assert!("proportinal".parse::<ClawbackMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClawbackMethod {
    /// Recapture in proportion to the fraction of headcount lost.
    #[default]
    Proportional,
    /// Recapture the full credit on any decrease.
    AllOrNothing,
    /// Recapture 0%, 50% or 100% depending on the decrease band.
    Tiered,
}

impl ClawbackMethod {
    /// Returns the method's wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClawbackMethod::Proportional => "proportional",
            ClawbackMethod::AllOrNothing => "all_or_nothing",
            ClawbackMethod::Tiered => "tiered",
        }
    }
}

impl fmt::Display for ClawbackMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClawbackMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "proportional" => Ok(ClawbackMethod::Proportional),
            "all_or_nothing" => Ok(ClawbackMethod::AllOrNothing),
            "tiered" => Ok(ClawbackMethod::Tiered),
            other => Err(EngineError::UnknownClawbackMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Default lower bound of the half-recapture band (2%).
pub fn default_half_threshold() -> Decimal {
    Decimal::new(2, 2)
}

/// Default lower bound of the full-recapture band (5%).
pub fn default_full_threshold() -> Decimal {
    Decimal::new(5, 2)
}

/// Band boundaries for [`ClawbackMethod::Tiered`].
///
/// A decrease ratio below `half` recaptures nothing, a ratio below `full` recaptures
/// half the credit, and anything else recaptures all of it. Comparisons are strict,
/// so a ratio equal to a boundary falls into the higher band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredThresholds {
    /// Ratio at which half recapture begins.
    #[serde(default = "default_half_threshold")]
    pub half: Decimal,
    /// Ratio at which full recapture begins.
    #[serde(default = "default_full_threshold")]
    pub full: Decimal,
}

impl Default for TieredThresholds {
    fn default() -> Self {
        Self {
            half: default_half_threshold(),
            full: default_full_threshold(),
        }
    }
}
