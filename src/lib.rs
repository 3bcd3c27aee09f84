//! Integrated Employment Tax Credit Engine
//!
//! This crate computes the employment-increase tax credit a company may claim for a
//! tax year, limits it by the statutory cap and the minimum-tax rule, and simulates
//! how much of it is recaptured when headcount falls during the retention period.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
