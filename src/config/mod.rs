//! Configuration loading and management for the employment credit engine.
//!
//! This module provides functionality to load scheme configurations from YAML or
//! JSON files, including scheme metadata and the policy parameters (unit rates,
//! retention periods, caps) effective for each tax year.
//!
//! # Example
//!
//! ```no_run
//! use employment_credit::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/integrated_employment").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PolicyDocument, PolicyParameters, RateTable, SchemeConfig, SchemeMetadata};
