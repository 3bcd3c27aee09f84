//! Request types for the employment credit API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.
//! Size, region and method arrive as raw labels and are translated here so that
//! an unknown label is reported as such rather than as a generic JSON error.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClawbackMethod, ClawbackOptions, CreditRequest, FollowUpYear, HeadcountInputs,
    TieredThresholds,
};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Company size label (e.g., "sme", "중소기업").
    pub company_size: String,
    /// Region label (e.g., "metro", "지방").
    pub region: String,
    /// The tax year whose policy applies. Defaults to the latest policy.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Credit-year headcounts.
    pub headcounts: HeadcountInputs,
    /// Tax liability before the credit.
    #[serde(default)]
    pub tax_before_credit: Option<i64>,
    /// The company's industry.
    #[serde(default)]
    pub industry: Option<String>,
    /// Recapture simulation options.
    #[serde(default)]
    pub clawback: Option<ClawbackRequest>,
}

/// Recapture simulation options in a calculation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClawbackRequest {
    /// Method label: "proportional", "all_or_nothing" or "tiered".
    #[serde(default)]
    pub method: Option<String>,
    /// Band boundaries for the tiered method.
    #[serde(default)]
    pub tiered_thresholds: Option<TieredThresholds>,
    /// Follow-up years to evaluate.
    #[serde(default)]
    pub follow_up_years: Option<Vec<FollowUpYear>>,
}

impl TryFrom<CalculationRequest> for CreditRequest {
    type Error = EngineError;

    fn try_from(req: CalculationRequest) -> EngineResult<Self> {
        let clawback = req.clawback.unwrap_or_default();
        let method = match clawback.method.as_deref() {
            Some(label) => label.parse::<ClawbackMethod>()?,
            None => ClawbackMethod::default(),
        };

        Ok(CreditRequest {
            company_size: req.company_size.parse()?,
            region: req.region.parse()?,
            tax_year: req.tax_year,
            headcounts: req.headcounts,
            tax_before_credit: req.tax_before_credit,
            industry: req.industry,
            clawback: ClawbackOptions {
                method,
                tiered_thresholds: clawback.tiered_thresholds,
                follow_up_years: clawback.follow_up_years,
            },
        })
    }
}
