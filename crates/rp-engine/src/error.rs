//! Engine design errors.

use rp_combustion::{CombustionError, PropellantRole};
use rp_nozzle::NozzleError;
use thiserror::Error;

/// Errors that can occur while evaluating an engine design.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Oxidizer or fuel name not recognized by the propellant database.
    #[error("Unknown {role} propellant: '{name}'")]
    UnknownPropellant { name: String, role: PropellantRole },

    /// No equilibrium solution for the requested pressure / mixture ratio.
    #[error("Combustion solution failed: {what}")]
    SolverConvergence { what: String },

    /// A derived quantity was requested before its inputs were populated.
    #[error("Design not initialized: {what} is not set")]
    UninitializedState { what: &'static str },

    /// Non-positive throat area or expansion ratio below one.
    #[error("Invalid geometry: {what}")]
    InvalidGeometry { what: String },

    /// Sweep definition that cannot generate points.
    #[error("Invalid sweep: {what}")]
    InvalidSweep { what: String },

    /// Any other combustion backend failure.
    #[error("Combustion error: {0}")]
    Combustion(CombustionError),

    #[error("Nozzle error: {0}")]
    Nozzle(#[from] NozzleError),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<CombustionError> for EngineError {
    fn from(e: CombustionError) -> Self {
        match e {
            CombustionError::UnknownPropellant { name, role } => {
                EngineError::UnknownPropellant { name, role }
            }
            CombustionError::SolverConvergence { what } => EngineError::SolverConvergence { what },
            other => EngineError::Combustion(other),
        }
    }
}
