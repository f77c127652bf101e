//! Error types for nozzle relations.

use thiserror::Error;

/// Errors that can occur while evaluating nozzle relations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NozzleError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: &'static str },
}

pub type NozzleResult<T> = Result<T, NozzleError>;
