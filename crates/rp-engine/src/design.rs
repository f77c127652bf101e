//! Engine design point: geometry, operating point, and derived performance.

use crate::error::{EngineError, EngineResult};
use crate::report::PerformanceReport;
use rp_combustion::{CombustionModel, CombustionProperties, CombustionPropertyProvider};
use rp_core::numeric::relative_deviation;
use rp_core::units::constants::G0_MPS2;
use rp_core::units::{
    Area, Force, MassRate, Pressure, Temperature, Time, Velocity, k, kgps, mps, newtons, pa, s,
    to_mpa,
};
use tracing::debug;

/// Chamber thermochemistry for one design point, populated as a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermochemistry {
    pub chamber_temperature: Temperature,
    /// Ratio of specific heats
    pub gamma: f64,
    /// Molar mass [kg/mol]
    pub molar_mass: f64,
    /// Characteristic velocity reported by the combustion provider
    pub c_star: Velocity,
    pub isp_vacuum: Time,
}

impl Thermochemistry {
    /// Convert provider output (molar mass in g/mol) to stored form (kg/mol).
    pub fn from_properties(props: &CombustionProperties) -> Self {
        Self {
            chamber_temperature: k(props.chamber_temperature_k),
            gamma: props.gamma,
            molar_mass: props.molar_mass_kg_per_mol(),
            c_star: mps(props.c_star_mps),
            isp_vacuum: s(props.isp_vacuum_s),
        }
    }
}

/// One engine design under evaluation.
///
/// Fields start unset. Exit area is never set directly: it is derived from
/// throat area and expansion ratio, and changing either input discards it.
#[derive(Debug, Clone, Default)]
pub struct EngineDesign {
    oxidizer: Option<String>,
    fuel: Option<String>,
    mixture_ratio: Option<f64>,
    throat_area: Option<Area>,
    expansion_ratio: Option<f64>,
    exit_area: Option<Area>,
    chamber_pressure: Option<Pressure>,
    thermo: Option<Thermochemistry>,
}

/// Everything `run_design` needs for one design point.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignInputs {
    pub oxidizer: String,
    pub fuel: String,
    pub mixture_ratio: f64,
    pub chamber_pressure: Pressure,
    pub throat_area: Area,
    pub expansion_ratio: f64,
}

impl DesignInputs {
    /// Build and evaluate a fresh `EngineDesign` from these inputs.
    pub fn evaluate<M: CombustionModel>(
        &self,
        provider: &CombustionPropertyProvider<M>,
    ) -> EngineResult<EngineDesign> {
        let mut design = EngineDesign::new();
        design.run_design(
            provider,
            &self.oxidizer,
            &self.fuel,
            self.mixture_ratio,
            self.chamber_pressure,
            self.throat_area,
            self.expansion_ratio,
        )?;
        Ok(design)
    }
}

/// Check that a throat area and expansion ratio describe a real nozzle.
pub(crate) fn check_geometry(throat_area: Area, expansion_ratio: f64) -> EngineResult<()> {
    if !throat_area.value.is_finite() || throat_area.value <= 0.0 {
        return Err(EngineError::InvalidGeometry {
            what: format!("throat area must be positive (got {} m²)", throat_area.value),
        });
    }
    if !expansion_ratio.is_finite() || expansion_ratio < 1.0 {
        return Err(EngineError::InvalidGeometry {
            what: format!("expansion ratio must be >= 1 (got {expansion_ratio})"),
        });
    }
    Ok(())
}

fn require<T: Copy>(value: Option<T>, what: &'static str) -> EngineResult<T> {
    value.ok_or(EngineError::UninitializedState { what })
}

impl EngineDesign {
    pub fn new() -> Self {
        Self::default()
    }

    // --- inputs -----------------------------------------------------------

    pub fn set_expansion_ratio(&mut self, expansion_ratio: f64) {
        self.expansion_ratio = Some(expansion_ratio);
        self.exit_area = None;
    }

    pub fn set_throat_area(&mut self, throat_area: Area) {
        self.throat_area = Some(throat_area);
        self.exit_area = None;
    }

    pub fn set_chamber_pressure(&mut self, chamber_pressure: Pressure) {
        self.chamber_pressure = Some(chamber_pressure);
    }

    /// `exit_area = throat_area × expansion_ratio`; leaves it unset when either input is unset.
    pub fn derive_exit_area(&mut self) {
        if let (Some(at), Some(eps)) = (self.throat_area, self.expansion_ratio) {
            self.exit_area = Some(at * eps);
        }
    }

    // --- stored state -----------------------------------------------------

    pub fn oxidizer(&self) -> Option<&str> {
        self.oxidizer.as_deref()
    }

    pub fn fuel(&self) -> Option<&str> {
        self.fuel.as_deref()
    }

    pub fn mixture_ratio(&self) -> Option<f64> {
        self.mixture_ratio
    }

    pub fn throat_area(&self) -> Option<Area> {
        self.throat_area
    }

    pub fn exit_area(&self) -> Option<Area> {
        self.exit_area
    }

    pub fn chamber_pressure(&self) -> Option<Pressure> {
        self.chamber_pressure
    }

    /// Expansion ratio as passed to `set_expansion_ratio`.
    pub fn nominal_expansion_ratio(&self) -> Option<f64> {
        self.expansion_ratio
    }

    pub fn thermochemistry(&self) -> Option<&Thermochemistry> {
        self.thermo.as_ref()
    }

    pub fn is_evaluated(&self) -> bool {
        self.thermo.is_some()
    }

    /// Expansion ratio recovered from geometry: `exit_area / throat_area`.
    pub fn expansion_ratio(&self) -> EngineResult<f64> {
        let throat = require(self.throat_area, "throat area")?;
        let exit = require(self.exit_area, "exit area")?;
        if throat.value == 0.0 {
            return Err(EngineError::InvalidGeometry {
                what: "throat area is zero".to_string(),
            });
        }
        Ok(exit.value / throat.value)
    }

    /// Reject non-positive throat area or an expansion ratio below one.
    pub fn validate_geometry(&self) -> EngineResult<()> {
        let throat = require(self.throat_area, "throat area")?;
        let eps = require(self.expansion_ratio, "expansion ratio")?;
        check_geometry(throat, eps)
    }

    // --- combustion -------------------------------------------------------

    /// Populate chamber thermochemistry from one provider call.
    ///
    /// On success the five thermochemical values, the propellant names and the
    /// mixture ratio are stored together. On failure the design is unchanged.
    pub fn evaluate_combustion_properties<M: CombustionModel>(
        &mut self,
        provider: &CombustionPropertyProvider<M>,
        oxidizer: &str,
        fuel: &str,
        chamber_pressure: Pressure,
        mixture_ratio: f64,
        expansion_ratio: f64,
    ) -> EngineResult<()> {
        let props = provider.evaluate(
            oxidizer,
            fuel,
            to_mpa(chamber_pressure),
            mixture_ratio,
            expansion_ratio,
        )?;
        debug!(oxidizer, fuel, mixture_ratio, result = %props.summary(), "design thermochemistry set");

        self.oxidizer = Some(oxidizer.to_string());
        self.fuel = Some(fuel.to_string());
        self.mixture_ratio = Some(mixture_ratio);
        self.thermo = Some(Thermochemistry::from_properties(&props));
        Ok(())
    }

    /// Set geometry and chamber pressure, then evaluate combustion properties.
    ///
    /// Geometry is checked before anything is stored or the provider is called.
    #[allow(clippy::too_many_arguments)]
    pub fn run_design<M: CombustionModel>(
        &mut self,
        provider: &CombustionPropertyProvider<M>,
        oxidizer: &str,
        fuel: &str,
        mixture_ratio: f64,
        chamber_pressure: Pressure,
        throat_area: Area,
        expansion_ratio: f64,
    ) -> EngineResult<()> {
        check_geometry(throat_area, expansion_ratio)?;

        self.set_expansion_ratio(expansion_ratio);
        self.set_throat_area(throat_area);
        self.derive_exit_area();
        self.set_chamber_pressure(chamber_pressure);
        self.evaluate_combustion_properties(
            provider,
            oxidizer,
            fuel,
            chamber_pressure,
            mixture_ratio,
            expansion_ratio,
        )
    }

    // --- derived performance ----------------------------------------------

    fn thermo(&self) -> EngineResult<&Thermochemistry> {
        self.thermo.as_ref().ok_or(EngineError::UninitializedState {
            what: "combustion properties",
        })
    }

    /// Throat area, expansion ratio recovered from geometry, and chamber pressure.
    fn nozzle_inputs(&self) -> EngineResult<(f64, f64, f64)> {
        let throat = require(self.throat_area, "throat area")?;
        let pc = require(self.chamber_pressure, "chamber pressure")?;
        let eps = self.expansion_ratio()?;
        check_geometry(throat, eps)?;
        Ok((throat.value, eps, pc.value))
    }

    /// `Pe = Pc × (Pe/Pc)(ε, γ)` for isentropic supersonic expansion.
    pub fn nozzle_exit_pressure(&self) -> EngineResult<Pressure> {
        let (_, eps, pc) = self.nozzle_inputs()?;
        let gamma = self.thermo()?.gamma;
        let ratio = rp_nozzle::pressure_ratio_from_expansion(eps, gamma)?;
        Ok(pa(pc * ratio))
    }

    /// Thrust at ambient pressure `ambient`.
    pub fn thrust(&self, ambient: Pressure) -> EngineResult<Force> {
        let (at, _, pc) = self.nozzle_inputs()?;
        let gamma = self.thermo()?.gamma;
        let pe = self.nozzle_exit_pressure()?.value;
        let eps = rp_nozzle::expansion_ratio_from_pressure(pc, pe, gamma)?;
        let f = rp_nozzle::thrust(at, pc, pe, gamma, ambient.value, eps)?;
        Ok(newtons(f))
    }

    /// Momentum contribution to thrust, excluding pressure thrust.
    pub fn momentum_thrust(&self) -> EngineResult<Force> {
        let (at, _, pc) = self.nozzle_inputs()?;
        let gamma = self.thermo()?.gamma;
        let pe = self.nozzle_exit_pressure()?.value;
        Ok(newtons(rp_nozzle::momentum_thrust(at, pc, pe, gamma)?))
    }

    /// Choked mass flow through the throat.
    pub fn mass_flow_rate(&self) -> EngineResult<MassRate> {
        let throat = require(self.throat_area, "throat area")?;
        let pc = require(self.chamber_pressure, "chamber pressure")?;
        let thermo = self.thermo()?;
        let mdot = rp_nozzle::mass_flow(
            throat.value,
            pc.value,
            thermo.chamber_temperature.value,
            thermo.gamma,
            thermo.molar_mass,
        )?;
        Ok(kgps(mdot))
    }

    /// C* from the stored gas properties (γ, molar mass, Tc).
    pub fn characteristic_velocity(&self) -> EngineResult<Velocity> {
        let thermo = self.thermo()?;
        let c_star = rp_nozzle::characteristic_velocity(
            thermo.gamma,
            thermo.molar_mass,
            thermo.chamber_temperature.value,
        )?;
        Ok(mps(c_star))
    }

    /// Relative difference between the provider's C* and the gas-property C*.
    pub fn characteristic_velocity_deviation(&self) -> EngineResult<f64> {
        let from_provider = self.thermo()?.c_star.value;
        let from_formula = self.characteristic_velocity()?.value;
        Ok(relative_deviation(from_provider, from_formula))
    }

    /// Delivered specific impulse `F / (ṁ g0)` at ambient pressure `ambient`.
    pub fn specific_impulse(&self, ambient: Pressure) -> EngineResult<Time> {
        let f = self.thrust(ambient)?.value;
        let mdot = self.mass_flow_rate()?.value;
        Ok(s(f / (mdot * G0_MPS2)))
    }

    /// Thrust coefficient `F / (Pc At)` at ambient pressure `ambient`.
    pub fn thrust_coefficient(&self, ambient: Pressure) -> EngineResult<f64> {
        let (at, _, pc) = self.nozzle_inputs()?;
        Ok(self.thrust(ambient)?.value / (pc * at))
    }

    /// Every derived quantity at ambient pressure `ambient`, as one serializable record.
    pub fn performance(&self, ambient: Pressure) -> EngineResult<PerformanceReport> {
        let (at, eps, pc) = self.nozzle_inputs()?;
        let thermo = *self.thermo()?;
        let exit = require(self.exit_area, "exit area")?;

        Ok(PerformanceReport {
            oxidizer: self.oxidizer.clone().unwrap_or_default(),
            fuel: self.fuel.clone().unwrap_or_default(),
            mixture_ratio: require(self.mixture_ratio, "mixture ratio")?,
            chamber_pressure_pa: pc,
            throat_area_m2: at,
            exit_area_m2: exit.value,
            expansion_ratio: eps,
            ambient_pressure_pa: ambient.value,
            chamber_temperature_k: thermo.chamber_temperature.value,
            gamma: thermo.gamma,
            molar_mass_kg_per_mol: thermo.molar_mass,
            c_star_provider_mps: thermo.c_star.value,
            c_star_formula_mps: self.characteristic_velocity()?.value,
            c_star_deviation: self.characteristic_velocity_deviation()?,
            isp_vacuum_s: thermo.isp_vacuum.value,
            isp_delivered_s: self.specific_impulse(ambient)?.value,
            exit_pressure_pa: self.nozzle_exit_pressure()?.value,
            thrust_n: self.thrust(ambient)?.value,
            momentum_thrust_n: self.momentum_thrust()?.value,
            mass_flow_kg_s: self.mass_flow_rate()?.value,
            thrust_coefficient: self.thrust_coefficient(ambient)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_core::units::{circle_area, m, m2};

    fn demo() -> EngineDesign {
        let provider = CombustionPropertyProvider::tabulated();
        let mut design = EngineDesign::new();
        design
            .run_design(
                &provider,
                "LOX",
                "C2H5OH",
                1.45,
                pa(1.0e7),
                circle_area(m(0.01)),
                2.3,
            )
            .unwrap();
        design
    }

    #[test]
    fn new_design_is_empty() {
        let design = EngineDesign::new();
        assert!(design.throat_area().is_none());
        assert!(design.exit_area().is_none());
        assert!(design.thermochemistry().is_none());
        assert!(matches!(
            design.expansion_ratio(),
            Err(EngineError::UninitializedState { .. })
        ));
    }

    #[test]
    fn derive_exit_area_without_throat_is_noop() {
        let mut design = EngineDesign::new();
        design.set_expansion_ratio(2.0);
        design.derive_exit_area();
        assert!(design.exit_area().is_none());
    }

    #[test]
    fn changing_throat_discards_stale_exit_area() {
        let mut design = EngineDesign::new();
        design.set_expansion_ratio(4.0);
        design.set_throat_area(m2(1e-3));
        design.derive_exit_area();
        assert!((design.exit_area().unwrap().value - 4e-3).abs() < 1e-15);

        design.set_throat_area(m2(2e-3));
        assert!(design.exit_area().is_none());
        design.derive_exit_area();
        assert!((design.expansion_ratio().unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn zero_throat_area_is_invalid_geometry() {
        let mut design = EngineDesign::new();
        design.set_expansion_ratio(2.0);
        design.set_throat_area(m2(0.0));
        design.derive_exit_area();
        assert!(matches!(
            design.expansion_ratio(),
            Err(EngineError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            design.validate_geometry(),
            Err(EngineError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn run_design_rejects_bad_geometry_before_storing() {
        let provider = CombustionPropertyProvider::tabulated();
        let mut design = EngineDesign::new();
        let err = design
            .run_design(&provider, "LOX", "C2H5OH", 1.45, pa(1.0e7), m2(1e-4), 0.8)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidGeometry { .. }));
        assert!(design.nominal_expansion_ratio().is_none());
        assert!(!design.is_evaluated());
    }

    #[test]
    fn demo_stores_names_and_mixture_ratio() {
        let design = demo();
        assert_eq!(design.oxidizer(), Some("LOX"));
        assert_eq!(design.fuel(), Some("C2H5OH"));
        assert_eq!(design.mixture_ratio(), Some(1.45));
        assert!(design.is_evaluated());
    }

    #[test]
    fn demo_exit_pressure_below_chamber() {
        let design = demo();
        let pe = design.nozzle_exit_pressure().unwrap().value;
        assert!(pe > 0.0 && pe < 1.0e7);
    }

    #[test]
    fn provider_c_star_agrees_with_gas_properties() {
        let design = demo();
        assert!(design.characteristic_velocity_deviation().unwrap() < 1e-9);
    }

    #[test]
    fn performance_report_is_consistent() {
        let design = demo();
        let report = design.performance(pa(0.0)).unwrap();
        assert!((report.thrust_n - design.thrust(pa(0.0)).unwrap().value).abs() < 1e-9);
        assert!((report.expansion_ratio - 2.3).abs() < 1e-12);
        assert!(report.thrust_n > report.momentum_thrust_n);
        // Vacuum delivered Isp equals the provider's vacuum Isp for the same nozzle.
        assert!((report.isp_delivered_s - report.isp_vacuum_s).abs() / report.isp_vacuum_s < 1e-6);
    }
}
