//! Core data models for the employment credit engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod clawback;
mod company;
mod credit_request;
mod headcount;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, ClawbackSchedule, CreditResult, HeadcountSummary,
    ScheduleEntry,
};
pub use clawback::{
    ClawbackMethod, TieredThresholds, default_full_threshold, default_half_threshold,
};
pub use company::{CompanySize, Region};
pub use credit_request::{ClawbackOptions, CreditRequest};
pub use headcount::{FollowUpYear, HeadcountInputs};
