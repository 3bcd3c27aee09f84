//! Claw-back (recapture) calculation functionality.
//!
//! This module determines how much of an applied credit must be repaid for one
//! follow-up year when headcount falls below the credit-year level, as per
//! Article 29-8(2) of the Restriction of Special Taxation Act.
//!
//! ## Recapture methods
//!
//! | Method           | Recapture                                            |
//! |------------------|------------------------------------------------------|
//! | `proportional`   | `round(credit x decrease / base)`                    |
//! | `all_or_nothing` | the full credit on any decrease                      |
//! | `tiered`         | 0 below `half`, 50% below `full`, 100% otherwise     |
//!
//! Recapture amounts are rounded half-to-even. The credit and minimum-tax
//! calculations floor instead; the two rules are independent.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, ClawbackMethod, TieredThresholds};

/// Statute reference for recapture.
pub const CLAWBACK_CLAUSE: &str = "29-8(2)";

/// The result of evaluating one follow-up year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClawbackResult {
    /// The amount recaptured, never negative.
    pub amount: i64,
    /// Headcount lost relative to the credit year, floored at zero.
    pub decrease: u32,
    /// `decrease / base`, when the year is inside the window and the base is positive.
    pub decrease_ratio: Option<Decimal>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the recapture owed for one follow-up year.
///
/// Years outside `1..=retention_years_for_company` owe nothing. Inside the window,
/// nothing is owed unless the base headcount is positive and headcount fell.
/// Otherwise `method` decides the amount; `tiered_thresholds` is consulted only by
/// [`ClawbackMethod::Tiered`] and defaults to 2% / 5%.
///
/// # Examples
///
/// ```
/// use employment_credit::calculation::calc_clawback;
/// use employment_credit::models::ClawbackMethod;
///
/// // 3 of 60 lost: 5% of the credit
/// let result = calc_clawback(8_400_000, 60, 57, 3, 1, ClawbackMethod::Proportional, None, 1);
/// assert_eq!(result.amount, 420_000);
///
/// // year 4 of a 3-year window
/// let result = calc_clawback(8_400_000, 60, 10, 3, 4, ClawbackMethod::AllOrNothing, None, 1);
/// assert_eq!(result.amount, 0);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn calc_clawback(
    credit_applied: i64,
    base_headcount_at_credit: u32,
    headcount_in_followup_year: u32,
    retention_years_for_company: u32,
    year_index_from_credit: u32,
    method: ClawbackMethod,
    tiered_thresholds: Option<&TieredThresholds>,
    step_number: u32,
) -> ClawbackResult {
    let input = serde_json::json!({
        "credit_applied": credit_applied,
        "base_headcount": base_headcount_at_credit,
        "followup_headcount": headcount_in_followup_year,
        "retention_years": retention_years_for_company,
        "year_index": year_index_from_credit,
        "method": method
    });

    let decrease = base_headcount_at_credit.saturating_sub(headcount_in_followup_year);

    if !(1..=retention_years_for_company).contains(&year_index_from_credit) {
        return no_clawback(
            step_number,
            input,
            decrease,
            format!(
                "Year {} is outside the {}-year retention window; no recapture",
                year_index_from_credit, retention_years_for_company
            ),
        );
    }

    if base_headcount_at_credit == 0 || decrease == 0 {
        return no_clawback(
            step_number,
            input,
            0,
            format!(
                "Headcount {} did not fall below base {}; no recapture",
                headcount_in_followup_year, base_headcount_at_credit
            ),
        );
    }

    let credit = Decimal::from(credit_applied);
    let base = Decimal::from(base_headcount_at_credit);
    let lost = Decimal::from(decrease);
    let decrease_ratio = lost / base;

    let (recapture, reasoning) = match method {
        ClawbackMethod::Proportional => {
            let amount = round_half_even(credit * lost / base);
            (
                amount,
                format!(
                    "{} x {}/{} = {} (proportional)",
                    credit_applied, decrease, base_headcount_at_credit, amount
                ),
            )
        }
        ClawbackMethod::AllOrNothing => (
            credit_applied,
            format!(
                "Headcount fell by {}; full credit {} recaptured (all or nothing)",
                decrease, credit_applied
            ),
        ),
        ClawbackMethod::Tiered => {
            let thresholds = tiered_thresholds.copied().unwrap_or_default();
            let ratio = decrease_ratio.normalize();
            if decrease_ratio < thresholds.half {
                (
                    0,
                    format!(
                        "Decrease ratio {} below {}; no recapture (tiered)",
                        ratio,
                        thresholds.half.normalize()
                    ),
                )
            } else if decrease_ratio < thresholds.full {
                let amount = round_half_even(credit * Decimal::new(5, 1));
                (
                    amount,
                    format!(
                        "Decrease ratio {} below {}; half recaptured: {} (tiered)",
                        ratio,
                        thresholds.full.normalize(),
                        amount
                    ),
                )
            } else {
                (
                    credit_applied,
                    format!(
                        "Decrease ratio {} at or above {}; full credit {} recaptured (tiered)",
                        ratio,
                        thresholds.full.normalize(),
                        credit_applied
                    ),
                )
            }
        }
    };

    let amount = recapture.max(0);

    let audit_step = AuditStep {
        step_number,
        rule_id: "clawback".to_string(),
        rule_name: "Headcount Decrease Recapture".to_string(),
        clause_ref: CLAWBACK_CLAUSE.to_string(),
        input,
        output: serde_json::json!({
            "decrease": decrease,
            "decrease_ratio": decrease_ratio.normalize().to_string(),
            "clawback": amount
        }),
        reasoning,
    };

    ClawbackResult {
        amount,
        decrease,
        decrease_ratio: Some(decrease_ratio),
        audit_step,
    }
}

fn no_clawback(
    step_number: u32,
    input: serde_json::Value,
    decrease: u32,
    reasoning: String,
) -> ClawbackResult {
    ClawbackResult {
        amount: 0,
        decrease,
        decrease_ratio: None,
        audit_step: AuditStep {
            step_number,
            rule_id: "clawback".to_string(),
            rule_name: "Headcount Decrease Recapture".to_string(),
            clause_ref: CLAWBACK_CLAUSE.to_string(),
            input,
            output: serde_json::json!({
                "decrease": decrease,
                "clawback": 0
            }),
            reasoning,
        },
    }
}

/// Rounds to the nearest whole unit, ties to even.
fn round_half_even(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
