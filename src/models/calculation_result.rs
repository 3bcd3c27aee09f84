//! Calculation result models for the employment credit engine.
//!
//! This module contains the [`CreditResult`] type and its associated structures
//! that capture all outputs from a credit calculation, including the recapture
//! schedule and the audit trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ClawbackMethod, CompanySize, HeadcountInputs, Region};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute article for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that don't prevent calculation
/// but may require attention from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use employment_credit::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Credit-year headcounts together with the derived increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadcountSummary {
    /// The headcount figures supplied by the caller.
    #[serde(flatten)]
    pub inputs: HeadcountInputs,
    /// Increase in total headcount, floored at zero.
    pub increase_total: u32,
    /// Increase in youth headcount, floored at zero.
    pub increase_youth: u32,
}

impl From<HeadcountInputs> for HeadcountSummary {
    fn from(inputs: HeadcountInputs) -> Self {
        Self {
            increase_total: inputs.increase_total(),
            increase_youth: inputs.increase_youth(),
            inputs,
        }
    }
}

/// Recapture outcome for one follow-up year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Years elapsed since the credit year.
    pub year_index: u32,
    /// Total headcount at the end of the follow-up year.
    pub headcount_total: u32,
    /// Youth headcount at the end of the follow-up year, if reported.
    pub headcount_youth: Option<u32>,
    /// Headcount lost relative to the credit year, floored at zero.
    pub decrease: u32,
    /// Amount recaptured for this year.
    pub clawback: i64,
}

/// Recapture outcomes across the retention window.
///
/// `entries` are ordered by `year_index` ascending and `total` is their exact sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClawbackSchedule {
    /// The recapture policy that produced the schedule.
    pub method: ClawbackMethod,
    /// Total headcount at the end of the credit year.
    pub base_headcount: u32,
    /// Per-year outcomes.
    pub entries: Vec<ScheduleEntry>,
    /// Sum of all per-year recaptures.
    pub total: i64,
}

/// The complete result of a credit calculation.
///
/// This struct captures all outputs from the engine, including the gross and
/// applied credit, the recapture schedule, and an audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The company size band used for rate lookups.
    pub company_size: CompanySize,
    /// The region used for rate lookups.
    pub region: Region,
    /// The tax year of the policy parameters, when known.
    pub tax_year: Option<i32>,
    /// Credit-year headcounts.
    pub headcounts: HeadcountSummary,
    /// Credit before caps and the minimum-tax limit.
    pub gross_credit: i64,
    /// Credit actually granted.
    pub applied_credit: i64,
    /// Retention period in years for the company size.
    pub retention_years: u32,
    /// Recapture simulation over the retention window.
    pub clawback_schedule: ClawbackSchedule,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
