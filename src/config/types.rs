//! Configuration types for credit calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML or JSON policy documents.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CompanySize, Region};

/// Metadata about the credit scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeMetadata {
    /// Short scheme code (e.g., "RSTA-29-8").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The statute article that establishes the scheme.
    pub statute: String,
    /// URL to the official statute text.
    pub source_url: String,
}

/// Per-head unit rates keyed by company size and region.
///
/// A missing entry is a lookup failure, never a default of zero.
///
/// # Example
///
/// ```
/// use employment_credit::config::RateTable;
/// use employment_credit::models::{CompanySize, Region};
///
/// let table = RateTable::from_entries([
///     (CompanySize::SmallAndMedium, Region::Metro, 1_200_000),
/// ]);
/// assert_eq!(table.rate(CompanySize::SmallAndMedium, Region::Metro), Some(1_200_000));
/// assert_eq!(table.rate(CompanySize::Large, Region::Metro), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(HashMap<CompanySize, HashMap<Region, i64>>);

impl RateTable {
    /// Builds a table from `(size, region, rate)` triples.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CompanySize, Region, i64)>,
    {
        let mut table: HashMap<CompanySize, HashMap<Region, i64>> = HashMap::new();
        for (size, region, rate) in entries {
            table.entry(size).or_default().insert(region, rate);
        }
        Self(table)
    }

    /// Returns the unit rate for a size and region, if configured.
    pub fn rate(&self, size: CompanySize, region: Region) -> Option<i64> {
        self.0.get(&size).and_then(|by_region| by_region.get(&region)).copied()
    }

    /// Iterates over every configured `(size, region, rate)` entry.
    pub fn entries(&self) -> impl Iterator<Item = (CompanySize, Region, i64)> + '_ {
        self.0.iter().flat_map(|(size, by_region)| {
            by_region
                .iter()
                .map(move |(region, rate)| (*size, *region, *rate))
        })
    }
}

/// Statutory unit rates, retention periods and limits for one tax year.
///
/// Constructed fresh from configuration and never mutated by the calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyParameters {
    /// Per-head credit for an increase in total headcount.
    pub per_head_basic: RateTable,
    /// Per-head credit for an increase in youth headcount.
    pub per_head_youth: RateTable,
    /// Per-head credit for conversion to regular employment.
    #[serde(default)]
    pub per_head_conversion: i64,
    /// Per-head credit for a return from parental leave.
    #[serde(default)]
    pub per_head_return_from_parental: i64,
    /// Years headcount must be maintained after the credit year.
    pub retention_years: HashMap<CompanySize, u32>,
    /// Absolute ceiling on the credit.
    #[serde(default)]
    pub max_credit_total: Option<i64>,
    /// Fraction of pre-credit tax the credit may offset (e.g., 0.07).
    #[serde(default)]
    pub min_tax_limit_rate: Option<Decimal>,
    /// Industries excluded from the scheme. Informational only.
    #[serde(default)]
    pub excluded_industries: Option<Vec<String>>,
}

impl PolicyParameters {
    /// Returns the basic per-head rate for a size and region.
    pub fn basic_rate(&self, size: CompanySize, region: Region) -> EngineResult<i64> {
        Self::lookup(&self.per_head_basic, "per_head_basic", size, region)
    }

    /// Returns the youth per-head rate for a size and region.
    pub fn youth_rate(&self, size: CompanySize, region: Region) -> EngineResult<i64> {
        Self::lookup(&self.per_head_youth, "per_head_youth", size, region)
    }

    fn lookup(
        table: &RateTable,
        name: &str,
        size: CompanySize,
        region: Region,
    ) -> EngineResult<i64> {
        table
            .rate(size, region)
            .ok_or_else(|| EngineError::RateNotFound {
                table: name.to_string(),
                size: size.to_string(),
                region: region.to_string(),
            })
    }

    /// Returns the retention period in years for a company size.
    pub fn retention_years_for(&self, size: CompanySize) -> EngineResult<u32> {
        self.retention_years
            .get(&size)
            .copied()
            .ok_or_else(|| EngineError::RetentionPeriodNotFound {
                size: size.to_string(),
            })
    }

    /// Returns true if the industry appears in the excluded list.
    ///
    /// Matching ignores surrounding whitespace. The calculators never consult
    /// this; enforcement is left to the caller.
    pub fn is_excluded_industry(&self, industry: &str) -> bool {
        let industry = industry.trim();
        self.excluded_industries
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|excluded| excluded.trim() == industry)
    }

    /// Checks the parameters for values no statute could specify.
    ///
    /// Rejects negative unit rates, a negative cap, a minimum-tax-limit rate
    /// outside `[0, 1]`, and zero-year retention periods.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, table) in [
            ("per_head_basic", &self.per_head_basic),
            ("per_head_youth", &self.per_head_youth),
        ] {
            if let Some((size, region, rate)) = table.entries().find(|(_, _, rate)| *rate < 0) {
                return Err(invalid(
                    name,
                    format!("rate for {}/{} is negative: {}", size, region, rate),
                ));
            }
        }

        if self.per_head_conversion < 0 {
            return Err(invalid("per_head_conversion", "must not be negative"));
        }
        if self.per_head_return_from_parental < 0 {
            return Err(invalid("per_head_return_from_parental", "must not be negative"));
        }

        if let Some((size, _)) = self.retention_years.iter().find(|(_, years)| **years == 0) {
            return Err(invalid(
                "retention_years",
                format!("retention period for {} must be at least one year", size),
            ));
        }

        if let Some(cap) = self.max_credit_total {
            if cap < 0 {
                return Err(invalid("max_credit_total", "must not be negative"));
            }
        }

        if let Some(rate) = self.min_tax_limit_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(invalid(
                    "min_tax_limit_rate",
                    format!("must be between 0 and 1, got {}", rate),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidPolicy {
        field: field.to_string(),
        message: message.into(),
    }
}

/// A policy file in the `policies/` directory: parameters plus the first tax year
/// they apply to.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyDocument {
    /// The first tax year these parameters apply to.
    pub effective_tax_year: i32,
    /// The policy parameters.
    #[serde(flatten)]
    pub parameters: PolicyParameters,
}

/// The complete scheme configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct SchemeConfig {
    /// Scheme metadata.
    metadata: SchemeMetadata,
    /// Policy documents (sorted oldest first).
    policies: Vec<PolicyDocument>,
}

impl SchemeConfig {
    /// Creates a new SchemeConfig from its component parts.
    pub fn new(metadata: SchemeMetadata, policies: Vec<PolicyDocument>) -> Self {
        let mut sorted_policies = policies;
        sorted_policies.sort_by_key(|p| p.effective_tax_year);
        Self {
            metadata,
            policies: sorted_policies,
        }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns all policy documents, oldest first.
    pub fn policies(&self) -> &[PolicyDocument] {
        &self.policies
    }
}
