//! Company classification keys.
//!
//! This module defines the [`CompanySize`] and [`Region`] enums that key every
//! rate table and retention-period table in the policy configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The statutory size band of a company.
///
/// Configuration documents may use either the English snake_case label or the
/// statutory Korean label; both deserialize to the same variant.
///
/// # Example
///
/// ```
/// use employment_credit::models::CompanySize;
///
/// let size: CompanySize = "중소기업".parse().unwrap();
/// assert_eq!(size, CompanySize::SmallAndMedium);
/// assert_eq!(size.to_string(), "sme");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompanySize {
    /// Small and medium-sized enterprise.
    #[serde(rename = "sme", alias = "small_and_medium", alias = "중소기업")]
    SmallAndMedium,
    /// Mid-size enterprise.
    #[serde(rename = "mid_size", alias = "midsize", alias = "중견기업")]
    MidSize,
    /// Large enterprise.
    #[serde(rename = "large", alias = "대기업")]
    Large,
}

impl CompanySize {
    /// All company sizes, smallest first.
    pub const ALL: [CompanySize; 3] = [
        CompanySize::SmallAndMedium,
        CompanySize::MidSize,
        CompanySize::Large,
    ];

    /// Returns the canonical configuration label.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::SmallAndMedium => "sme",
            CompanySize::MidSize => "mid_size",
            CompanySize::Large => "large",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanySize {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sme" | "small_and_medium" | "중소기업" => Ok(CompanySize::SmallAndMedium),
            "mid_size" | "midsize" | "중견기업" => Ok(CompanySize::MidSize),
            "large" | "대기업" => Ok(CompanySize::Large),
            other => Err(EngineError::UnknownLabel {
                kind: "company size".to_string(),
                label: other.to_string(),
            }),
        }
    }
}

/// The location of the workplace for rate purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// The capital metropolitan area.
    #[serde(rename = "metro", alias = "seoul_metro", alias = "수도권")]
    Metro,
    /// Everywhere outside the metropolitan area.
    #[serde(rename = "non_metro", alias = "지방")]
    NonMetro,
}

impl Region {
    /// All regions.
    pub const ALL: [Region; 2] = [Region::Metro, Region::NonMetro];

    /// Returns the canonical configuration label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Metro => "metro",
            Region::NonMetro => "non_metro",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "metro" | "seoul_metro" | "수도권" => Ok(Region::Metro),
            "non_metro" | "지방" => Ok(Region::NonMetro),
            other => Err(EngineError::UnknownLabel {
                kind: "region".to_string(),
                label: other.to_string(),
            }),
        }
    }
}
