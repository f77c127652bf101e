//! Combustion model trait and validation helpers.

use crate::error::CombustionResult;
use crate::propellant::Propellant;
use crate::properties::{CombustionProperties, CombustionQuery};

/// Trait for chamber thermochemistry backends.
///
/// Implementations must be thread-safe (Send + Sync) so one provider can serve
/// parallel sweeps. `evaluate` either returns a complete, validated result or an
/// error; it never returns partial data.
pub trait CombustionModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Check if this model has data for the given propellant pair.
    fn supports_pair(&self, oxidizer: Propellant, fuel: Propellant) -> bool;

    /// Evaluate chamber properties at the given operating point.
    fn evaluate(&self, query: &CombustionQuery) -> CombustionResult<CombustionProperties>;
}

/// Validation helpers for combustion queries and results.
pub mod validation {
    use crate::error::{CombustionError, CombustionResult};
    use crate::properties::{CombustionProperties, CombustionQuery};

    /// Ensure the operating point is finite and physically meaningful.
    pub fn validate_query(query: &CombustionQuery) -> CombustionResult<()> {
        if !query.chamber_pressure_mpa.is_finite() || query.chamber_pressure_mpa <= 0.0 {
            return Err(CombustionError::InvalidArg {
                what: "chamber pressure must be positive and finite",
            });
        }
        if !query.mixture_ratio.is_finite() || query.mixture_ratio <= 0.0 {
            return Err(CombustionError::InvalidArg {
                what: "mixture ratio must be positive and finite",
            });
        }
        if !query.expansion_ratio.is_finite() || query.expansion_ratio < 1.0 {
            return Err(CombustionError::InvalidArg {
                what: "expansion ratio must be >= 1 and finite",
            });
        }
        Ok(())
    }

    /// Ensure every field of a backend result is physically plausible.
    pub fn validate_properties(props: &CombustionProperties) -> CombustionResult<()> {
        let positive = [
            (props.isp_vacuum_s, "vacuum specific impulse"),
            (props.c_star_mps, "characteristic velocity"),
            (props.chamber_temperature_k, "chamber temperature"),
            (props.molar_mass_g_per_mol, "molar mass"),
        ];
        for (value, what) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CombustionError::NonPhysical { what });
            }
        }
        if !props.gamma.is_finite() || props.gamma <= 1.0 {
            return Err(CombustionError::NonPhysical {
                what: "gamma must be > 1 and finite",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use crate::propellant::Propellant;
    use crate::properties::{CombustionProperties, CombustionQuery};

    fn query(pc: f64, mr: f64, eps: f64) -> CombustionQuery {
        CombustionQuery {
            oxidizer: Propellant::Lox,
            fuel: Propellant::Ethanol,
            chamber_pressure_mpa: pc,
            mixture_ratio: mr,
            expansion_ratio: eps,
        }
    }

    #[test]
    fn query_validation() {
        assert!(validate_query(&query(10.0, 1.45, 2.3)).is_ok());
        assert!(validate_query(&query(10.0, 1.45, 1.0)).is_ok());
        assert!(validate_query(&query(0.0, 1.45, 2.3)).is_err());
        assert!(validate_query(&query(10.0, -1.0, 2.3)).is_err());
        assert!(validate_query(&query(10.0, 1.45, 0.5)).is_err());
        assert!(validate_query(&query(f64::NAN, 1.45, 2.3)).is_err());
    }

    #[test]
    fn properties_validation() {
        let good = CombustionProperties {
            isp_vacuum_s: 280.0,
            c_star_mps: 1700.0,
            chamber_temperature_k: 3300.0,
            molar_mass_g_per_mol: 22.7,
            gamma: 1.2,
        };
        assert!(validate_properties(&good).is_ok());
        assert!(validate_properties(&CombustionProperties { gamma: 1.0, ..good }).is_err());
        assert!(
            validate_properties(&CombustionProperties {
                chamber_temperature_k: -5.0,
                ..good
            })
            .is_err()
        );
    }
}
