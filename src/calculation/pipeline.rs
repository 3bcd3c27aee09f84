//! End-to-end credit calculation.
//!
//! This module chains the gross credit, the cap and minimum-tax adjustment, the
//! retention period lookup and the recapture schedule into a single
//! [`CreditResult`].

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::config::PolicyParameters;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, AuditWarning, CreditRequest, CreditResult};

use super::credit_limits::apply_caps_and_min_tax;
use super::gross_credit::{GROSS_CREDIT_CLAUSE, calc_gross_credit};
use super::schedule::{default_follow_up_years, run_clawback_schedule};

/// Runs a complete credit calculation against one set of policy parameters.
///
/// The request's industry is checked against the excluded list and reported as a
/// warning; the credit is still computed.
///
/// # Errors
///
/// Propagates rate and retention-period lookup failures and arithmetic overflow.
pub fn run_credit_calculation(
    request: &CreditRequest,
    params: &PolicyParameters,
) -> EngineResult<CreditResult> {
    let start_time = Instant::now();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let heads = &request.headcounts;

    let gross = calc_gross_credit(
        request.company_size,
        request.region,
        heads,
        params,
        step_number,
    )?;
    steps.push(gross.audit_step);
    step_number += 1;

    let applied = apply_caps_and_min_tax(
        gross.amount,
        params,
        request.tax_before_credit,
        step_number,
    )?;
    steps.push(applied.audit_step);
    step_number += 1;

    if params.min_tax_limit_rate.is_some() && request.tax_before_credit.is_none() {
        warnings.push(AuditWarning {
            code: "MIN_TAX_NOT_APPLIED".to_string(),
            message: "No tax before credit was supplied; the minimum-tax limit was not checked"
                .to_string(),
            severity: "low".to_string(),
        });
    }

    let retention_years = params.retention_years_for(request.company_size)?;
    steps.push(AuditStep {
        step_number,
        rule_id: "retention_period".to_string(),
        rule_name: "Retention Period".to_string(),
        clause_ref: GROSS_CREDIT_CLAUSE.to_string(),
        input: serde_json::json!({ "company_size": request.company_size }),
        output: serde_json::json!({ "retention_years": retention_years }),
        reasoning: format!(
            "Headcount must be maintained for {} years after the credit year",
            retention_years
        ),
    });
    step_number += 1;

    let follow_up_years = match &request.clawback.follow_up_years {
        Some(years) => years.clone(),
        None => default_follow_up_years(retention_years, heads),
    };
    warnings.extend(follow_up_warnings(
        follow_up_years.iter().map(|y| y.year_index),
        retention_years,
    ));

    let schedule = run_clawback_schedule(
        &follow_up_years,
        applied.amount,
        heads.curr_total,
        retention_years,
        request.clawback.method,
        request.clawback.tiered_thresholds.as_ref(),
        step_number,
    )?;
    steps.extend(schedule.audit_steps);

    if let Some(industry) = request.industry.as_deref() {
        if params.is_excluded_industry(industry) {
            warnings.push(AuditWarning {
                code: "EXCLUDED_INDUSTRY".to_string(),
                message: format!(
                    "Industry '{}' is excluded from the scheme; the credit may not be claimable",
                    industry.trim()
                ),
                severity: "high".to_string(),
            });
        }
    }

    Ok(CreditResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        company_size: request.company_size,
        region: request.region,
        tax_year: request.tax_year,
        headcounts: (*heads).into(),
        gross_credit: gross.amount,
        applied_credit: applied.amount,
        retention_years,
        clawback_schedule: schedule.schedule,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

fn follow_up_warnings(
    year_indices: impl Iterator<Item = u32>,
    retention_years: u32,
) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    let mut outside = Vec::new();

    for index in year_indices {
        if !seen.insert(index) && !duplicates.contains(&index) {
            duplicates.push(index);
        }
        if !(1..=retention_years).contains(&index) && !outside.contains(&index) {
            outside.push(index);
        }
    }

    if !duplicates.is_empty() {
        warnings.push(AuditWarning {
            code: "DUPLICATE_YEAR_INDEX".to_string(),
            message: format!(
                "Follow-up years {:?} appear more than once and are each counted",
                duplicates
            ),
            severity: "medium".to_string(),
        });
    }
    if !outside.is_empty() {
        warnings.push(AuditWarning {
            code: "YEAR_OUTSIDE_RETENTION".to_string(),
            message: format!(
                "Follow-up years {:?} fall outside the {}-year retention window",
                outside, retention_years
            ),
            severity: "low".to_string(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateTable;
    use crate::error::EngineError;
    use crate::models::{
        ClawbackMethod, ClawbackOptions, CompanySize, FollowUpYear, HeadcountInputs, Region,
    };
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    fn create_test_params() -> PolicyParameters {
        PolicyParameters {
            per_head_basic: RateTable::from_entries([
                (CompanySize::SmallAndMedium, Region::Metro, 1_200_000),
                (CompanySize::Large, Region::Metro, 600_000),
            ]),
            per_head_youth: RateTable::from_entries([
                (CompanySize::SmallAndMedium, Region::Metro, 1_500_000),
                (CompanySize::Large, Region::Metro, 800_000),
            ]),
            per_head_conversion: 800_000,
            per_head_return_from_parental: 800_000,
            retention_years: HashMap::from([(CompanySize::SmallAndMedium, 3)]),
            max_credit_total: None,
            min_tax_limit_rate: Some(Decimal::new(7, 2)),
            excluded_industries: Some(vec!["유흥주점업".to_string()]),
        }
    }

    fn create_test_request(clawback: ClawbackOptions) -> CreditRequest {
        CreditRequest {
            company_size: CompanySize::SmallAndMedium,
            region: Region::Metro,
            tax_year: Some(2024),
            headcounts: HeadcountInputs {
                prev_total: 50,
                curr_total: 60,
                prev_youth: 10,
                curr_youth: 14,
                converted_regular: 2,
                returned_from_parental_leave: 1,
            },
            tax_before_credit: Some(120_000_000),
            industry: None,
            clawback,
        }
    }

    fn follow_up(year_index: u32, headcount_total: u32) -> FollowUpYear {
        FollowUpYear {
            year_index,
            headcount_total,
            headcount_youth: None,
        }
    }

    #[test]
    fn test_full_pipeline_with_proportional_schedule() {
        let request = create_test_request(ClawbackOptions {
            method: ClawbackMethod::Proportional,
            tiered_thresholds: None,
            follow_up_years: Some(vec![follow_up(1, 57), follow_up(2, 60), follow_up(3, 54)]),
        });

        let result = run_credit_calculation(&request, &create_test_params()).unwrap();

        assert_eq!(result.gross_credit, 20_400_000);
        assert_eq!(result.applied_credit, 8_400_000);
        assert_eq!(result.retention_years, 3);
        assert_eq!(result.headcounts.increase_total, 10);
        assert_eq!(result.headcounts.increase_youth, 4);
        assert_eq!(result.clawback_schedule.total, 420_000 + 840_000);
        assert_eq!(result.clawback_schedule.base_headcount, 60);
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_audit_steps_in_pipeline_order() {
        let request = create_test_request(ClawbackOptions {
            follow_up_years: Some(vec![follow_up(1, 57)]),
            ..ClawbackOptions::default()
        });

        let result = run_credit_calculation(&request, &create_test_params()).unwrap();
        let rules: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        let numbers: Vec<u32> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.step_number)
            .collect();

        assert_eq!(
            rules,
            vec!["gross_credit", "credit_limits", "retention_period", "clawback"]
        );
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_default_schedule_covers_retention_window() {
        let request = create_test_request(ClawbackOptions::default());

        let result = run_credit_calculation(&request, &create_test_params()).unwrap();

        assert_eq!(result.clawback_schedule.entries.len(), 3);
        assert_eq!(result.clawback_schedule.total, 0);
        assert_eq!(
            result.clawback_schedule.method,
            ClawbackMethod::Proportional
        );
    }

    #[test]
    fn test_excluded_industry_warns_but_still_computes() {
        let mut request = create_test_request(ClawbackOptions::default());
        request.industry = Some("유흥주점업".to_string());

        let result = run_credit_calculation(&request, &create_test_params()).unwrap();

        assert_eq!(result.applied_credit, 8_400_000);
        assert!(
            result
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "EXCLUDED_INDUSTRY")
        );
    }

    #[test]
    fn test_missing_tax_before_credit_warns() {
        let mut request = create_test_request(ClawbackOptions::default());
        request.tax_before_credit = None;

        let result = run_credit_calculation(&request, &create_test_params()).unwrap();

        assert_eq!(result.applied_credit, 20_400_000);
        assert_eq!(result.audit_trace.warnings[0].code, "MIN_TAX_NOT_APPLIED");
    }

    #[test]
    fn test_duplicate_and_out_of_window_years_warn() {
        let request = create_test_request(ClawbackOptions {
            method: ClawbackMethod::AllOrNothing,
            tiered_thresholds: None,
            follow_up_years: Some(vec![follow_up(1, 57), follow_up(1, 57), follow_up(4, 10)]),
        });

        let result = run_credit_calculation(&request, &create_test_params()).unwrap();
        let codes: Vec<&str> = result
            .audit_trace
            .warnings
            .iter()
            .map(|w| w.code.as_str())
            .collect();

        assert_eq!(codes, vec!["DUPLICATE_YEAR_INDEX", "YEAR_OUTSIDE_RETENTION"]);
        assert_eq!(result.clawback_schedule.total, 2 * 8_400_000);
    }

    #[test]
    fn test_missing_retention_period_propagates() {
        let mut request = create_test_request(ClawbackOptions::default());
        request.company_size = CompanySize::Large;

        let result = run_credit_calculation(&request, &create_test_params());

        assert!(matches!(
            result,
            Err(EngineError::RetentionPeriodNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_rate_propagates() {
        let mut request = create_test_request(ClawbackOptions::default());
        request.region = Region::NonMetro;

        let result = run_credit_calculation(&request, &create_test_params());

        assert!(matches!(result, Err(EngineError::RateNotFound { .. })));
    }
}
