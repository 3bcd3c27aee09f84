//! Gross credit calculation functionality.
//!
//! This module computes the credit earned from headcount growth before any cap
//! or minimum-tax limit is applied, as per Article 29-8(1) of the Restriction of
//! Special Taxation Act.

use serde::{Deserialize, Serialize};

use crate::config::PolicyParameters;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CompanySize, HeadcountInputs, Region};

/// Statute reference for the gross credit.
pub const GROSS_CREDIT_CLAUSE: &str = "29-8(1)";

/// The result of the gross credit calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossCreditResult {
    /// The gross credit, never negative.
    pub amount: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the gross credit for a credit year.
///
/// The credit is the sum of four components:
/// - total headcount increase × basic rate for the size and region
/// - youth headcount increase × youth rate for the size and region
/// - conversions to regular employment × conversion rate
/// - returns from parental leave × parental-return rate
///
/// The sum is floored at zero so that a misconfigured negative rate can never
/// produce a negative credit.
///
/// # Errors
///
/// Returns `RateNotFound` if either rate table lacks the size and region, and
/// `CalculationError` if the sum overflows.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use employment_credit::calculation::calc_gross_credit;
/// use employment_credit::config::{PolicyParameters, RateTable};
/// use employment_credit::models::{CompanySize, HeadcountInputs, Region};
///
/// let params = PolicyParameters {
///     per_head_basic: RateTable::from_entries([(CompanySize::SmallAndMedium, Region::Metro, 1_200_000)]),
///     per_head_youth: RateTable::from_entries([(CompanySize::SmallAndMedium, Region::Metro, 1_500_000)]),
///     per_head_conversion: 800_000,
///     per_head_return_from_parental: 800_000,
///     retention_years: HashMap::from([(CompanySize::SmallAndMedium, 3)]),
///     max_credit_total: None,
///     min_tax_limit_rate: None,
///     excluded_industries: None,
/// };
/// let heads = HeadcountInputs {
///     prev_total: 50,
///     curr_total: 60,
///     prev_youth: 10,
///     curr_youth: 14,
///     converted_regular: 2,
///     returned_from_parental_leave: 1,
/// };
///
/// let result = calc_gross_credit(CompanySize::SmallAndMedium, Region::Metro, &heads, &params, 1).unwrap();
/// assert_eq!(result.amount, 20_400_000);
/// ```
pub fn calc_gross_credit(
    size: CompanySize,
    region: Region,
    heads: &HeadcountInputs,
    params: &PolicyParameters,
    step_number: u32,
) -> EngineResult<GrossCreditResult> {
    let basic_rate = params.basic_rate(size, region)?;
    let youth_rate = params.youth_rate(size, region)?;

    let increase_total = heads.increase_total();
    let increase_youth = heads.increase_youth();

    let basic = component("basic", increase_total, basic_rate)?;
    let youth = component("youth", increase_youth, youth_rate)?;
    let conversion = component(
        "conversion",
        heads.converted_regular,
        params.per_head_conversion,
    )?;
    let parental = component(
        "parental_return",
        heads.returned_from_parental_leave,
        params.per_head_return_from_parental,
    )?;

    let sum = [basic, youth, conversion, parental]
        .into_iter()
        .try_fold(0i64, i64::checked_add)
        .ok_or_else(|| EngineError::CalculationError {
            message: "gross credit overflowed".to_string(),
        })?;
    let amount = sum.max(0);

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_credit".to_string(),
        rule_name: "Gross Employment Credit".to_string(),
        clause_ref: GROSS_CREDIT_CLAUSE.to_string(),
        input: serde_json::json!({
            "company_size": size,
            "region": region,
            "increase_total": increase_total,
            "increase_youth": increase_youth,
            "converted_regular": heads.converted_regular,
            "returned_from_parental_leave": heads.returned_from_parental_leave,
            "basic_rate": basic_rate,
            "youth_rate": youth_rate,
            "conversion_rate": params.per_head_conversion,
            "parental_return_rate": params.per_head_return_from_parental
        }),
        output: serde_json::json!({
            "basic": basic,
            "youth": youth,
            "conversion": conversion,
            "parental_return": parental,
            "gross_credit": amount
        }),
        reasoning: format!(
            "{} x {} + {} x {} + {} x {} + {} x {} = {}",
            increase_total,
            basic_rate,
            increase_youth,
            youth_rate,
            heads.converted_regular,
            params.per_head_conversion,
            heads.returned_from_parental_leave,
            params.per_head_return_from_parental,
            amount
        ),
    };

    Ok(GrossCreditResult { amount, audit_step })
}

fn component(name: &str, heads: u32, rate: i64) -> EngineResult<i64> {
    i64::from(heads)
        .checked_mul(rate)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("{} credit component overflowed", name),
        })
}
