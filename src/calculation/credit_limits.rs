//! Credit cap and minimum-tax limit functionality.
//!
//! This module turns a gross credit into the applied credit by clamping it to the
//! policy's absolute cap and to the minimum-tax ceiling of Article 132.
//!
//! ## Rounding
//!
//! The minimum-tax ceiling is `floor(rate x tax_before_credit)`. Flooring keeps the
//! applied credit from ever exceeding the legal ceiling.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::PolicyParameters;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Statute reference for the minimum tax.
pub const MINIMUM_TAX_CLAUSE: &str = "132";

/// The limit that reduced a gross credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditLimit {
    /// The policy's absolute cap.
    MaxCreditTotal,
    /// The minimum-tax ceiling.
    MinimumTax,
}

/// The result of applying caps and the minimum-tax limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCreditResult {
    /// The applied credit, never negative.
    pub amount: i64,
    /// The ceiling computed from the minimum-tax rate, when it was applied.
    pub min_tax_limit: Option<i64>,
    /// The last limit that reduced the credit, if any did.
    pub binding_limit: Option<CreditLimit>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the absolute cap and the minimum-tax limit to a gross credit.
///
/// The steps are applied in order:
/// 1. If `params.max_credit_total` is set, clamp the credit to it.
/// 2. If both `params.min_tax_limit_rate` and `tax_before_credit` are present,
///    clamp the credit to `floor(rate x tax_before_credit)`.
/// 3. Floor the result at zero.
///
/// Without `tax_before_credit` step 2 is skipped entirely.
///
/// # Errors
///
/// Returns `CalculationError` if the minimum-tax ceiling cannot be represented.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use employment_credit::calculation::apply_caps_and_min_tax;
/// use employment_credit::config::{PolicyParameters, RateTable};
/// use rust_decimal::Decimal;
///
/// let params = PolicyParameters {
///     per_head_basic: RateTable::default(),
///     per_head_youth: RateTable::default(),
///     per_head_conversion: 0,
///     per_head_return_from_parental: 0,
///     retention_years: HashMap::new(),
///     max_credit_total: None,
///     min_tax_limit_rate: Some(Decimal::new(7, 2)),
///     excluded_industries: None,
/// };
///
/// let result = apply_caps_and_min_tax(20_400_000, &params, Some(120_000_000), 2).unwrap();
/// assert_eq!(result.amount, 8_400_000);
/// ```
pub fn apply_caps_and_min_tax(
    gross_credit: i64,
    params: &PolicyParameters,
    tax_before_credit: Option<i64>,
    step_number: u32,
) -> EngineResult<AppliedCreditResult> {
    let mut credit = gross_credit;
    let mut binding_limit = None;

    if let Some(cap) = params.max_credit_total {
        if credit > cap {
            credit = cap;
            binding_limit = Some(CreditLimit::MaxCreditTotal);
        }
    }

    let min_tax_limit = match (params.min_tax_limit_rate, tax_before_credit) {
        (Some(rate), Some(tax)) => Some(min_tax_ceiling(rate, tax)?),
        _ => None,
    };

    if let Some(limit) = min_tax_limit {
        if credit > limit {
            credit = limit;
            binding_limit = Some(CreditLimit::MinimumTax);
        }
    }

    let amount = credit.max(0);

    let reasoning = match binding_limit {
        Some(CreditLimit::MaxCreditTotal) => {
            format!("Gross credit {} capped at maximum {}", gross_credit, amount)
        }
        Some(CreditLimit::MinimumTax) => format!(
            "Gross credit {} limited by minimum tax to {}",
            gross_credit, amount
        ),
        None if min_tax_limit.is_none() && params.min_tax_limit_rate.is_some() => format!(
            "Gross credit {} applied in full; minimum tax not checked without tax before credit",
            gross_credit
        ),
        None => format!("Gross credit {} applied in full as {}", gross_credit, amount),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "credit_limits".to_string(),
        rule_name: "Credit Cap and Minimum Tax".to_string(),
        clause_ref: MINIMUM_TAX_CLAUSE.to_string(),
        input: serde_json::json!({
            "gross_credit": gross_credit,
            "max_credit_total": params.max_credit_total,
            "min_tax_limit_rate": params.min_tax_limit_rate.map(|r| r.normalize().to_string()),
            "tax_before_credit": tax_before_credit
        }),
        output: serde_json::json!({
            "applied_credit": amount,
            "min_tax_limit": min_tax_limit,
            "binding_limit": binding_limit
        }),
        reasoning,
    };

    Ok(AppliedCreditResult {
        amount,
        min_tax_limit,
        binding_limit,
        audit_step,
    })
}

fn min_tax_ceiling(rate: Decimal, tax_before_credit: i64) -> EngineResult<i64> {
    rate.checked_mul(Decimal::from(tax_before_credit))
        .and_then(|limit| limit.floor().to_i64())
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "minimum tax limit overflowed for rate {} and tax {}",
                rate, tax_before_credit
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateTable;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_params(max_credit_total: Option<i64>, rate: Option<&str>) -> PolicyParameters {
        PolicyParameters {
            per_head_basic: RateTable::default(),
            per_head_youth: RateTable::default(),
            per_head_conversion: 0,
            per_head_return_from_parental: 0,
            retention_years: HashMap::new(),
            max_credit_total,
            min_tax_limit_rate: rate.map(dec),
            excluded_industries: None,
        }
    }

    /// CM-001: minimum tax ceiling binds
    #[test]
    fn test_min_tax_limit_binds() {
        let params = create_test_params(None, Some("0.07"));
        let result = apply_caps_and_min_tax(20_400_000, &params, Some(120_000_000), 1).unwrap();

        assert_eq!(result.amount, 8_400_000);
        assert_eq!(result.min_tax_limit, Some(8_400_000));
        assert_eq!(result.binding_limit, Some(CreditLimit::MinimumTax));
        assert_eq!(result.audit_step.clause_ref, "132");
        assert_eq!(result.audit_step.output["binding_limit"], "minimum_tax");
    }

    /// CM-002: minimum tax skipped without tax before credit
    #[test]
    fn test_min_tax_skipped_without_tax_before_credit() {
        let params = create_test_params(None, Some("0.07"));
        let result = apply_caps_and_min_tax(20_400_000, &params, None, 1).unwrap();

        assert_eq!(result.amount, 20_400_000);
        assert_eq!(result.min_tax_limit, None);
        assert_eq!(result.binding_limit, None);
        assert!(result.audit_step.reasoning.contains("not checked"));
    }

    /// CM-003: tax before credit ignored without a rate
    #[test]
    fn test_tax_before_credit_ignored_without_rate() {
        let params = create_test_params(None, None);
        let result = apply_caps_and_min_tax(20_400_000, &params, Some(1_000), 1).unwrap();

        assert_eq!(result.amount, 20_400_000);
        assert_eq!(result.min_tax_limit, None);
    }

    /// CM-004: absolute cap binds
    #[test]
    fn test_absolute_cap_binds() {
        let params = create_test_params(Some(10_000_000), None);
        let result = apply_caps_and_min_tax(20_400_000, &params, None, 1).unwrap();

        assert_eq!(result.amount, 10_000_000);
        assert_eq!(result.binding_limit, Some(CreditLimit::MaxCreditTotal));
    }

    /// CM-005: both limits present, the smaller wins
    #[test]
    fn test_cap_then_min_tax() {
        let params = create_test_params(Some(10_000_000), Some("0.07"));

        let result = apply_caps_and_min_tax(20_400_000, &params, Some(120_000_000), 1).unwrap();
        assert_eq!(result.amount, 8_400_000);
        assert_eq!(result.binding_limit, Some(CreditLimit::MinimumTax));

        let result = apply_caps_and_min_tax(20_400_000, &params, Some(500_000_000), 1).unwrap();
        assert_eq!(result.amount, 10_000_000);
        assert_eq!(result.binding_limit, Some(CreditLimit::MaxCreditTotal));
    }

    /// CM-006: the ceiling is floored, not rounded
    #[test]
    fn test_min_tax_limit_is_floored() {
        let params = create_test_params(None, Some("0.07"));
        // 0.07 x 1_000_009 = 70_000.63
        let result = apply_caps_and_min_tax(1_000_000, &params, Some(1_000_009), 1).unwrap();

        assert_eq!(result.amount, 70_000);
    }

    #[test]
    fn test_zero_tax_before_credit_grants_nothing() {
        let params = create_test_params(None, Some("0.07"));
        let result = apply_caps_and_min_tax(5_000_000, &params, Some(0), 1).unwrap();

        assert_eq!(result.amount, 0);
    }

    #[test]
    fn test_negative_gross_floors_at_zero() {
        let params = create_test_params(None, None);
        let result = apply_caps_and_min_tax(-100, &params, None, 1).unwrap();

        assert_eq!(result.amount, 0);
    }

    #[test]
    fn test_credit_below_limits_passes_through() {
        let params = create_test_params(Some(50_000_000), Some("0.07"));
        let result = apply_caps_and_min_tax(1_000_000, &params, Some(120_000_000), 1).unwrap();

        assert_eq!(result.amount, 1_000_000);
        assert_eq!(result.binding_limit, None);
        assert_eq!(result.min_tax_limit, Some(8_400_000));
    }
}
