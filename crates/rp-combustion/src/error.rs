//! Combustion property errors.

use crate::propellant::PropellantRole;
use rp_nozzle::NozzleError;
use thiserror::Error;

/// Result type for combustion operations.
pub type CombustionResult<T> = Result<T, CombustionError>;

/// Errors that can occur during combustion property evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CombustionError {
    /// Name not found in the propellant database for the requested role.
    #[error("Unknown {role} propellant: '{name}'")]
    UnknownPropellant { name: String, role: PropellantRole },

    /// Both propellants are known but the backend has no data for the pair.
    #[error("Unsupported propellant pair: {oxidizer}/{fuel}")]
    UnsupportedPair { oxidizer: String, fuel: String },

    /// The backend could not produce an equilibrium solution at this operating point.
    #[error("Equilibrium solution failed: {what}")]
    SolverConvergence { what: String },

    /// Non-physical values (negative temperature, gamma below one, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<NozzleError> for CombustionError {
    fn from(e: NozzleError) -> Self {
        match e {
            NozzleError::ConvergenceFailed { what } => CombustionError::SolverConvergence {
                what: format!("nozzle expansion: {what}"),
            },
            NozzleError::NonPhysical { what } => CombustionError::NonPhysical { what },
            NozzleError::InvalidArg { what } => CombustionError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CombustionError::UnknownPropellant {
            name: "UNOBTAINIUM".into(),
            role: PropellantRole::Fuel,
        };
        let msg = err.to_string();
        assert!(msg.contains("UNOBTAINIUM"));
        assert!(msg.contains("fuel"));
    }

    #[test]
    fn nozzle_convergence_maps_to_solver_convergence() {
        let err: CombustionError = NozzleError::ConvergenceFailed { what: "mach" }.into();
        assert!(matches!(err, CombustionError::SolverConvergence { .. }));
    }
}
