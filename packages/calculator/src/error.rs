// ABOUTME: Typed failures of the calculation engine
// ABOUTME: Resolution and validation errors returned instead of partial results

use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InvalidReason {
    Missing,
    NotNumeric,
    NotFinite,
    NotPositive,
    OutOfRange,
    /// Valid on its own but drives a derived figure past f64 range
    Overflow,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidReason::Missing => "value is required",
            InvalidReason::NotNumeric => "not a number",
            InvalidReason::NotFinite => "must be a finite number",
            InvalidReason::NotPositive => "must be greater than 0",
            InvalidReason::OutOfRange => "must be between 0 and 1",
            InvalidReason::Overflow => "is too extreme to calculate with",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: InvalidReason,
    },

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Unknown calculator: {0}")]
    UnknownCalculator(String),
}

impl CalcError {
    pub fn invalid(field: &'static str, reason: InvalidReason) -> Self {
        CalcError::InvalidInput { field, reason }
    }

    /// A required field was left empty
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput {
                reason: InvalidReason::Missing,
                ..
            }
        )
    }
}
