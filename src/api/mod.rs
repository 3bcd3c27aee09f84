//! HTTP API module for the employment credit engine.
//!
//! This module provides the REST API endpoints for calculating the integrated
//! employment tax credit and simulating its recapture.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{SchemeSummary, create_router};
pub use request::{CalculationRequest, ClawbackRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
