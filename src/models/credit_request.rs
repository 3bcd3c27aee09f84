//! Credit calculation request model.
//!
//! This module defines [`CreditRequest`], the complete set of caller-supplied
//! inputs for one credit calculation and its recapture simulation.

use serde::{Deserialize, Serialize};

use super::{ClawbackMethod, CompanySize, FollowUpYear, HeadcountInputs, Region, TieredThresholds};

/// Options controlling the recapture simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClawbackOptions {
    /// The recapture policy.
    #[serde(default)]
    pub method: ClawbackMethod,
    /// Band boundaries for the tiered policy. Defaults apply when absent.
    #[serde(default)]
    pub tiered_thresholds: Option<TieredThresholds>,
    /// Follow-up years to evaluate. When absent, every year of the retention
    /// window is evaluated at the credit-year headcount.
    #[serde(default)]
    pub follow_up_years: Option<Vec<FollowUpYear>>,
}

/// All inputs for one credit calculation.
///
/// # Example
///
/// ```
/// use employment_credit::models::{CreditRequest, CompanySize, Region};
///
/// let json = r#"{
///     "company_size": "sme",
///     "region": "metro",
///     "headcounts": { "prev_total": 50, "curr_total": 60 }
/// }"#;
/// let request: CreditRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.company_size, CompanySize::SmallAndMedium);
/// assert_eq!(request.region, Region::Metro);
/// assert!(request.tax_before_credit.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRequest {
    /// The company size band.
    pub company_size: CompanySize,
    /// The workplace region.
    pub region: Region,
    /// The tax year whose policy parameters apply, if specified.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Credit-year headcounts.
    pub headcounts: HeadcountInputs,
    /// Tax liability before the credit, used for the minimum-tax limit.
    #[serde(default)]
    pub tax_before_credit: Option<i64>,
    /// The company's industry, checked against the excluded industry list.
    #[serde(default)]
    pub industry: Option<String>,
    /// Recapture simulation options.
    #[serde(default)]
    pub clawback: ClawbackOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_request() {
        let json = r#"{
            "company_size": "중소기업",
            "region": "지방",
            "tax_year": 2024,
            "headcounts": {
                "prev_total": 50,
                "curr_total": 60,
                "prev_youth": 10,
                "curr_youth": 14,
                "converted_regular": 2,
                "returned_from_parental_leave": 1
            },
            "tax_before_credit": 120000000,
            "industry": "manufacturing",
            "clawback": {
                "method": "tiered",
                "tiered_thresholds": { "half": 0.02, "full": 0.05 },
                "follow_up_years": [
                    { "year_index": 1, "headcount_total": 57, "headcount_youth": 12 }
                ]
            }
        }"#;

        let request: CreditRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.company_size, CompanySize::SmallAndMedium);
        assert_eq!(request.region, Region::NonMetro);
        assert_eq!(request.tax_year, Some(2024));
        assert_eq!(request.tax_before_credit, Some(120_000_000));
        assert_eq!(request.clawback.method, ClawbackMethod::Tiered);
        assert!(request.clawback.tiered_thresholds.is_some());
        assert_eq!(request.clawback.follow_up_years.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_clawback_options_default_when_absent() {
        let json = r#"{
            "company_size": "large",
            "region": "metro",
            "headcounts": { "prev_total": 10, "curr_total": 12 }
        }"#;

        let request: CreditRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.clawback.method, ClawbackMethod::Proportional);
        assert!(request.clawback.tiered_thresholds.is_none());
        assert!(request.clawback.follow_up_years.is_none());
    }

    #[test]
    fn test_unknown_clawback_method_is_rejected() {
        let json = r#"{
            "company_size": "large",
            "region": "metro",
            "headcounts": { "prev_total": 10, "curr_total": 12 },
            "clawback": { "method": "proportinal" }
        }"#;

        let result: Result<CreditRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
