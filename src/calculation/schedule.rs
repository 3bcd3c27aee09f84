//! Multi-year recapture schedule functionality.
//!
//! This module evaluates [`calc_clawback`] for every follow-up year of a credit and
//! totals the results.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, ClawbackMethod, ClawbackSchedule, FollowUpYear, HeadcountInputs, ScheduleEntry,
    TieredThresholds,
};

use super::clawback::calc_clawback;

/// The result of running a recapture schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Per-year outcomes and their total.
    pub schedule: ClawbackSchedule,
    /// One audit step per evaluated year, in schedule order.
    pub audit_steps: Vec<AuditStep>,
}

/// Builds the follow-up years used when the caller supplies none.
///
/// Every year of the retention window is filled with the credit-year headcounts,
/// which recaptures nothing until the caller edits the figures.
pub fn default_follow_up_years(retention_years: u32, heads: &HeadcountInputs) -> Vec<FollowUpYear> {
    (1..=retention_years)
        .map(|year_index| FollowUpYear {
            year_index,
            headcount_total: heads.curr_total,
            headcount_youth: Some(heads.curr_youth),
        })
        .collect()
}

/// Evaluates recapture for each follow-up year and totals the result.
///
/// Entries are sorted by `year_index` ascending whatever the input order. Duplicate
/// year indices are not merged: each is evaluated and counted in the total.
/// The total is the exact sum of the per-year amounts.
///
/// # Errors
///
/// Returns `CalculationError` if the total overflows.
///
/// # Examples
///
/// ```
/// use employment_credit::calculation::run_clawback_schedule;
/// use employment_credit::models::{ClawbackMethod, FollowUpYear};
///
/// let years = [
///     FollowUpYear { year_index: 2, headcount_total: 54, headcount_youth: None },
///     FollowUpYear { year_index: 1, headcount_total: 57, headcount_youth: None },
/// ];
/// let result = run_clawback_schedule(&years, 8_400_000, 60, 3, ClawbackMethod::Proportional, None, 1).unwrap();
///
/// assert_eq!(result.schedule.entries[0].year_index, 1);
/// assert_eq!(result.schedule.entries[0].clawback, 420_000);
/// assert_eq!(result.schedule.entries[1].clawback, 840_000);
/// assert_eq!(result.schedule.total, 1_260_000);
/// ```
pub fn run_clawback_schedule(
    follow_up_years: &[FollowUpYear],
    credit_applied: i64,
    base_headcount_at_credit: u32,
    retention_years_for_company: u32,
    method: ClawbackMethod,
    tiered_thresholds: Option<&TieredThresholds>,
    step_number_start: u32,
) -> EngineResult<ScheduleResult> {
    let mut years = follow_up_years.to_vec();
    years.sort_by_key(|year| year.year_index);

    let mut entries = Vec::with_capacity(years.len());
    let mut audit_steps = Vec::with_capacity(years.len());
    let mut total: i64 = 0;

    for (offset, year) in years.iter().enumerate() {
        let result = calc_clawback(
            credit_applied,
            base_headcount_at_credit,
            year.headcount_total,
            retention_years_for_company,
            year.year_index,
            method,
            tiered_thresholds,
            step_number_start + offset as u32,
        );

        total = total
            .checked_add(result.amount)
            .ok_or_else(|| EngineError::CalculationError {
                message: "claw-back total overflowed".to_string(),
            })?;

        entries.push(ScheduleEntry {
            year_index: year.year_index,
            headcount_total: year.headcount_total,
            headcount_youth: year.headcount_youth,
            decrease: result.decrease,
            clawback: result.amount,
        });
        audit_steps.push(result.audit_step);
    }

    Ok(ScheduleResult {
        schedule: ClawbackSchedule {
            method,
            base_headcount: base_headcount_at_credit,
            entries,
            total,
        },
        audit_steps,
    })
}
