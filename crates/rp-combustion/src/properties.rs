//! Request and result shapes exchanged with combustion backends.

use crate::propellant::Propellant;

/// One operating point for a propellant pair.
///
/// Units follow the backend contract: chamber pressure in MPa, mixture ratio
/// (O/F by mass) and expansion ratio dimensionless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombustionQuery {
    pub oxidizer: Propellant,
    pub fuel: Propellant,
    pub chamber_pressure_mpa: f64,
    pub mixture_ratio: f64,
    pub expansion_ratio: f64,
}

/// Chamber thermochemistry returned by a backend, in the backend's native units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombustionProperties {
    /// Vacuum specific impulse [s]
    pub isp_vacuum_s: f64,
    /// Characteristic velocity [m/s]
    pub c_star_mps: f64,
    /// Chamber temperature [K]
    pub chamber_temperature_k: f64,
    /// Molar mass of the chamber gas [g/mol]
    pub molar_mass_g_per_mol: f64,
    /// Ratio of specific heats (dimensionless)
    pub gamma: f64,
}

impl CombustionProperties {
    /// Molar mass converted to kg/mol, the unit the nozzle relations take.
    pub fn molar_mass_kg_per_mol(&self) -> f64 {
        self.molar_mass_g_per_mol / 1000.0
    }

    /// `(IspVac, C*, Tc, M, γ)` in the order CEA reports them.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64, f64) {
        (
            self.isp_vacuum_s,
            self.c_star_mps,
            self.chamber_temperature_k,
            self.molar_mass_g_per_mol,
            self.gamma,
        )
    }

    /// Return a summary string of all contained properties (for debugging).
    pub fn summary(&self) -> String {
        format!(
            "Props(IspVac={:.1}s,C*={:.1}m/s,Tc={:.1}K,M={:.2}g/mol,γ={:.4})",
            self.isp_vacuum_s,
            self.c_star_mps,
            self.chamber_temperature_k,
            self.molar_mass_g_per_mol,
            self.gamma
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn molar_mass_conversion() {
        let props = CombustionProperties {
            isp_vacuum_s: 280.0,
            c_star_mps: 1700.0,
            chamber_temperature_k: 3300.0,
            molar_mass_g_per_mol: 22.7,
            gamma: 1.2,
        };
        assert!((props.molar_mass_kg_per_mol() - 0.0227).abs() < 1e-15);
        assert_eq!(props.as_tuple().3, 22.7);
        assert!(props.summary().contains("Tc=3300.0K"));
    }
}
