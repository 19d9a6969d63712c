//! Error types.
//!
//! Infeasible tasks are not errors: they come back as unassigned records.
//! Malformed individual records are logged and handled in place. Errors are
//! reserved for configuration problems and a skill table with nobody in it.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors from configuring or running a planner.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid planning input ({} problem(s)): {}", .0.len(), summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result alias for planner operations.
pub type Result<T> = std::result::Result<T, PlanError>;

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
