//! End-to-end design point scenarios against the tabulated provider.

use proptest::prelude::*;
use rp_combustion::{
    CombustionModel, CombustionProperties, CombustionPropertyProvider, CombustionQuery,
    CombustionResult, Propellant,
};
use rp_core::units::{circle_area, m, m2, pa};
use rp_engine::{EngineDesign, EngineError};

fn ethanol_demo() -> EngineDesign {
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

/// Backend that echoes fixed properties, for checking how the design stores them.
struct FixedModel {
    props: CombustionProperties,
}

impl CombustionModel for FixedModel {
    fn name(&self) -> &str {
        "fixed"
    }

    fn supports_pair(&self, _oxidizer: Propellant, _fuel: Propellant) -> bool {
        true
    }

    fn evaluate(&self, _query: &CombustionQuery) -> CombustionResult<CombustionProperties> {
        Ok(self.props)
    }
}

#[test]
fn demo_design_produces_positive_flow_and_thrust() {
    let design = ethanol_demo();
    let mdot = design.mass_flow_rate().unwrap().value;
    let thrust = design.thrust(pa(0.0)).unwrap().value;
    let momentum = design.momentum_thrust().unwrap().value;

    assert!(mdot > 0.0);
    assert!(thrust > 0.0);
    // Vacuum thrust includes a positive pressure term.
    assert!(thrust > momentum);

    // Hand-checked values for this design point: roughly 1.85 kg/s and 4.7 kN.
    assert!((mdot - 1.852).abs() < 0.02, "mdot = {mdot}");
    assert!((thrust - 4707.0).abs() < 50.0, "thrust = {thrust}");
}

#[test]
fn derived_quantities_are_idempotent() {
    let design = ethanol_demo();
    assert_eq!(
        design.thrust(pa(0.0)).unwrap(),
        design.thrust(pa(0.0)).unwrap()
    );
    assert_eq!(
        design.mass_flow_rate().unwrap(),
        design.mass_flow_rate().unwrap()
    );
}

#[test]
fn derived_quantities_require_evaluation() {
    let mut design = EngineDesign::new();
    assert!(matches!(
        design.mass_flow_rate(),
        Err(EngineError::UninitializedState { .. })
    ));

    design.set_throat_area(m2(1e-4));
    design.set_expansion_ratio(3.0);
    design.derive_exit_area();
    design.set_chamber_pressure(pa(5.0e6));
    assert!(matches!(
        design.thrust(pa(0.0)),
        Err(EngineError::UninitializedState { .. })
    ));
    assert!(matches!(
        design.nozzle_exit_pressure(),
        Err(EngineError::UninitializedState { .. })
    ));
}

#[test]
fn unknown_propellant_leaves_thermochemistry_unset() {
    let provider = CombustionPropertyProvider::tabulated();
    let mut design = EngineDesign::new();
    let err = design
        .evaluate_combustion_properties(&provider, "UNOBTAINIUM", "C2H5OH", pa(1.0e7), 1.45, 2.3)
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownPropellant { .. }));
    assert!(design.thermochemistry().is_none());
    assert!(design.oxidizer().is_none());
    assert!(design.mixture_ratio().is_none());
}

#[test]
fn failed_reevaluation_keeps_previous_thermochemistry() {
    let provider = CombustionPropertyProvider::tabulated();
    let mut design = ethanol_demo();
    let before = *design.thermochemistry().unwrap();

    let err = design
        .evaluate_combustion_properties(&provider, "LOX", "C2H5OH", pa(1.0e7), 50.0, 2.3)
        .unwrap_err();
    assert!(matches!(err, EngineError::SolverConvergence { .. }));
    assert_eq!(*design.thermochemistry().unwrap(), before);
    assert_eq!(design.mixture_ratio(), Some(1.45));
}

#[test]
fn unit_expansion_ratio_means_no_expansion() {
    let provider = CombustionPropertyProvider::tabulated();
    let mut design = EngineDesign::new();
    design
        .run_design(&provider, "LOX", "RP1", 2.3, pa(7.0e6), m2(2e-4), 1.0)
        .unwrap();

    assert_eq!(design.exit_area(), design.throat_area());
    let pe = design.nozzle_exit_pressure().unwrap().value;
    assert!((pe - 7.0e6).abs() < 1e-6);
    assert_eq!(design.momentum_thrust().unwrap().value, 0.0);
}

#[test]
fn ambient_pressure_reduces_thrust() {
    let design = ethanol_demo();
    let vacuum = design.thrust(pa(0.0)).unwrap().value;
    let sea_level = design.thrust(pa(101_325.0)).unwrap().value;
    assert!(sea_level < vacuum);
    let exit_area = design.exit_area().unwrap().value;
    assert!((vacuum - sea_level - 101_325.0 * exit_area).abs() < 1e-6);
}

#[test]
fn hydrogen_outperforms_kerosene() {
    let provider = CombustionPropertyProvider::tabulated();
    let run = |fuel: &str, mr: f64| {
        let mut design = EngineDesign::new();
        design
            .run_design(&provider, "LOX", fuel, mr, pa(1.0e7), m2(1e-3), 20.0)
            .unwrap();
        design.specific_impulse(pa(0.0)).unwrap().value
    };
    assert!(run("H2", 5.0) > run("RP1", 2.5) + 60.0);
}

proptest! {
    #[test]
    fn exit_area_round_trips_expansion_ratio(
        at in 1e-6f64..1.0,
        eps in 1.0f64..200.0,
    ) {
        let mut design = EngineDesign::new();
        design.set_throat_area(m2(at));
        design.set_expansion_ratio(eps);
        design.derive_exit_area();

        let exit = design.exit_area().unwrap().value;
        prop_assert!((exit - at * eps).abs() <= 1e-12 * at * eps);
        prop_assert!((design.expansion_ratio().unwrap() - eps).abs() <= 1e-9 * eps);
    }

    #[test]
    fn stored_molar_mass_is_provider_value_in_kg(
        molar_mass in 2.0f64..60.0,
        gamma in 1.05f64..1.6,
        tc in 500.0f64..4000.0,
    ) {
        let provider = CombustionPropertyProvider::new(FixedModel {
            props: CombustionProperties {
                isp_vacuum_s: 300.0,
                c_star_mps: 1500.0,
                chamber_temperature_k: tc,
                molar_mass_g_per_mol: molar_mass,
                gamma,
            },
        });
        let mut design = EngineDesign::new();
        design
            .evaluate_combustion_properties(&provider, "LOX", "CH4", pa(5.0e6), 3.0, 10.0)
            .unwrap();

        let thermo = design.thermochemistry().unwrap();
        prop_assert!((thermo.molar_mass - molar_mass / 1000.0).abs() < 1e-15);
        prop_assert_eq!(thermo.gamma, gamma);
        prop_assert_eq!(thermo.chamber_temperature.value, tc);
    }
}
