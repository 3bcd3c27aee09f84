//! Calculation logic for the employment credit engine.
//!
//! This module contains the gross credit calculation, the cap and minimum-tax
//! adjustment, the single-year claw-back evaluator, the multi-year schedule runner,
//! and the pipeline that chains them.

mod clawback;
mod credit_limits;
mod gross_credit;
mod pipeline;
mod schedule;

pub use clawback::{CLAWBACK_CLAUSE, ClawbackResult, calc_clawback};
pub use credit_limits::{AppliedCreditResult, CreditLimit, MINIMUM_TAX_CLAUSE, apply_caps_and_min_tax};
pub use gross_credit::{GROSS_CREDIT_CLAUSE, GrossCreditResult, calc_gross_credit};
pub use pipeline::run_credit_calculation;
pub use schedule::{ScheduleResult, default_follow_up_years, run_clawback_schedule};
