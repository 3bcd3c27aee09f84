//! Error types for the employment credit engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading policy configuration
//! or computing a credit.

use thiserror::Error;

/// The main error type for the employment credit engine.
///
/// All fallible operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use employment_credit::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No policy is effective for the requested tax year.
    #[error("No policy parameters effective for tax year {tax_year}")]
    PolicyNotFound {
        /// The tax year that was requested.
        tax_year: i32,
    },

    /// A rate table has no entry for the company size and region.
    #[error("Rate not found in '{table}' for company size '{size}' and region '{region}'")]
    RateNotFound {
        /// The rate table that was searched (e.g. "per_head_basic").
        table: String,
        /// The company size label.
        size: String,
        /// The region label.
        region: String,
    },

    /// The retention period table has no entry for the company size.
    #[error("Retention period not found for company size '{size}'")]
    RetentionPeriodNotFound {
        /// The company size label.
        size: String,
    },

    /// Policy parameters failed validation.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A label could not be translated into a typed key.
    #[error("Unknown {kind} label: {label}")]
    UnknownLabel {
        /// The kind of label (e.g. "company size", "region").
        kind: String,
        /// The label that was not recognized.
        label: String,
    },

    /// A claw-back method name was not recognized.
    #[error("Unknown claw-back method: {method}")]
    UnknownClawbackMethod {
        /// The method name that was not recognized.
        method: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
