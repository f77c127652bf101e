//! Tabulated chamber-equilibrium backend.
//!
//! Holds shifting-equilibrium chamber conditions (temperature, molar mass,
//! ratio of specific heats) precomputed for each supported propellant pair at
//! two reference chamber pressures over a mixture-ratio grid. Queries are
//! interpolated linearly in mixture ratio and in `ln(Pc)`, then the nozzle
//! relations give C* and vacuum Isp for the requested expansion ratio.
//!
//! Operating points outside the tabulated mixture-ratio range or the pressure
//! envelope have no solution and report `SolverConvergence`.

use crate::error::{CombustionError, CombustionResult};
use crate::model::{CombustionModel, validation};
use crate::propellant::Propellant;
use crate::properties::{CombustionProperties, CombustionQuery};
use rp_core::units::constants::G0_MPS2;
use rp_nozzle::{characteristic_velocity, vacuum_thrust_coefficient};

/// Reference chamber pressures of the two tables [MPa].
const P_LOW_MPA: f64 = 1.0;
const P_HIGH_MPA: f64 = 10.0;

/// Pressure envelope the tables may be extrapolated over [MPa].
const P_MIN_MPA: f64 = 0.1;
const P_MAX_MPA: f64 = 30.0;

/// Chamber state at one mixture ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChamberPoint {
    mixture_ratio: f64,
    temperature_k: f64,
    molar_mass_g_per_mol: f64,
    gamma: f64,
}

const fn pt(mixture_ratio: f64, temperature_k: f64, molar_mass: f64, gamma: f64) -> ChamberPoint {
    ChamberPoint {
        mixture_ratio,
        temperature_k,
        molar_mass_g_per_mol: molar_mass,
        gamma,
    }
}

/// Chamber data for one propellant pair. Both tables share the same MR grid.
#[derive(Debug)]
struct PairTable {
    oxidizer: Propellant,
    fuel: Propellant,
    at_low_pressure: &'static [ChamberPoint],
    at_high_pressure: &'static [ChamberPoint],
}

const LOX_ETHANOL_1MPA: [ChamberPoint; 6] = [
    pt(1.00, 2860.0, 19.8, 1.214),
    pt(1.20, 3060.0, 21.0, 1.206),
    pt(1.45, 3170.0, 22.2, 1.202),
    pt(1.70, 3210.0, 23.2, 1.200),
    pt(2.00, 3210.0, 24.3, 1.200),
    pt(2.50, 3150.0, 25.9, 1.201),
];
const LOX_ETHANOL_10MPA: [ChamberPoint; 6] = [
    pt(1.00, 2900.0, 20.0, 1.215),
    pt(1.20, 3140.0, 21.3, 1.205),
    pt(1.45, 3300.0, 22.7, 1.198),
    pt(1.70, 3370.0, 23.9, 1.195),
    pt(2.00, 3390.0, 25.2, 1.194),
    pt(2.50, 3330.0, 26.9, 1.196),
];

const LOX_RP1_1MPA: [ChamberPoint; 6] = [
    pt(1.60, 3100.0, 19.8, 1.224),
    pt(2.00, 3330.0, 21.6, 1.212),
    pt(2.30, 3420.0, 22.7, 1.205),
    pt(2.60, 3450.0, 23.6, 1.203),
    pt(3.00, 3440.0, 24.8, 1.203),
    pt(3.50, 3370.0, 26.2, 1.205),
];
const LOX_RP1_10MPA: [ChamberPoint; 6] = [
    pt(1.60, 3180.0, 20.0, 1.225),
    pt(2.00, 3480.0, 22.0, 1.210),
    pt(2.30, 3620.0, 23.3, 1.200),
    pt(2.60, 3680.0, 24.4, 1.195),
    pt(3.00, 3680.0, 25.8, 1.195),
    pt(3.50, 3600.0, 27.2, 1.198),
];

const LOX_METHANE_1MPA: [ChamberPoint; 5] = [
    pt(2.50, 3210.0, 19.3, 1.214),
    pt(3.00, 3330.0, 20.6, 1.207),
    pt(3.40, 3370.0, 21.5, 1.205),
    pt(3.80, 3380.0, 22.3, 1.204),
    pt(4.50, 3330.0, 23.7, 1.205),
];
const LOX_METHANE_10MPA: [ChamberPoint; 5] = [
    pt(2.50, 3300.0, 19.5, 1.215),
    pt(3.00, 3500.0, 21.0, 1.205),
    pt(3.40, 3580.0, 22.0, 1.200),
    pt(3.80, 3600.0, 23.0, 1.198),
    pt(4.50, 3550.0, 24.5, 1.200),
];

const LOX_LH2_1MPA: [ChamberPoint; 5] = [
    pt(3.00, 2690.0, 8.9, 1.260),
    pt(4.00, 3050.0, 10.2, 1.240),
    pt(5.00, 3250.0, 11.6, 1.222),
    pt(6.00, 3340.0, 12.9, 1.210),
    pt(7.00, 3370.0, 14.1, 1.203),
];
const LOX_LH2_10MPA: [ChamberPoint; 5] = [
    pt(3.00, 2700.0, 8.9, 1.260),
    pt(4.00, 3090.0, 10.3, 1.240),
    pt(5.00, 3330.0, 11.8, 1.220),
    pt(6.00, 3480.0, 13.3, 1.205),
    pt(7.00, 3560.0, 14.7, 1.195),
];

const N2O4_MMH_1MPA: [ChamberPoint; 4] = [
    pt(1.40, 3060.0, 20.3, 1.220),
    pt(1.65, 3170.0, 21.3, 1.213),
    pt(2.00, 3230.0, 22.5, 1.207),
    pt(2.40, 3240.0, 23.6, 1.205),
];
const N2O4_MMH_10MPA: [ChamberPoint; 4] = [
    pt(1.40, 3150.0, 20.5, 1.220),
    pt(1.65, 3300.0, 21.6, 1.210),
    pt(2.00, 3400.0, 23.0, 1.200),
    pt(2.40, 3420.0, 24.2, 1.198),
];

static PAIR_TABLES: [PairTable; 5] = [
    PairTable {
        oxidizer: Propellant::Lox,
        fuel: Propellant::Ethanol,
        at_low_pressure: &LOX_ETHANOL_1MPA,
        at_high_pressure: &LOX_ETHANOL_10MPA,
    },
    PairTable {
        oxidizer: Propellant::Lox,
        fuel: Propellant::Rp1,
        at_low_pressure: &LOX_RP1_1MPA,
        at_high_pressure: &LOX_RP1_10MPA,
    },
    PairTable {
        oxidizer: Propellant::Lox,
        fuel: Propellant::Methane,
        at_low_pressure: &LOX_METHANE_1MPA,
        at_high_pressure: &LOX_METHANE_10MPA,
    },
    PairTable {
        oxidizer: Propellant::Lox,
        fuel: Propellant::Lh2,
        at_low_pressure: &LOX_LH2_1MPA,
        at_high_pressure: &LOX_LH2_10MPA,
    },
    PairTable {
        oxidizer: Propellant::N2O4,
        fuel: Propellant::Mmh,
        at_low_pressure: &N2O4_MMH_1MPA,
        at_high_pressure: &N2O4_MMH_10MPA,
    },
];

impl PairTable {
    fn mixture_ratio_range(&self) -> (f64, f64) {
        let grid = self.at_high_pressure;
        (grid[0].mixture_ratio, grid[grid.len() - 1].mixture_ratio)
    }

    /// Interpolate one pressure table at `mr`. Caller guarantees `mr` is in range.
    fn interpolate_mr(table: &[ChamberPoint], mr: f64) -> ChamberPoint {
        let upper = table
            .iter()
            .position(|p| p.mixture_ratio >= mr)
            .unwrap_or(table.len() - 1)
            .max(1);
        let (a, b) = (table[upper - 1], table[upper]);
        let w = (mr - a.mixture_ratio) / (b.mixture_ratio - a.mixture_ratio);
        pt(
            mr,
            lerp(a.temperature_k, b.temperature_k, w),
            lerp(a.molar_mass_g_per_mol, b.molar_mass_g_per_mol, w),
            lerp(a.gamma, b.gamma, w),
        )
    }

    fn chamber_state(&self, pc_mpa: f64, mr: f64) -> CombustionResult<ChamberPoint> {
        let (mr_min, mr_max) = self.mixture_ratio_range();
        if mr < mr_min || mr > mr_max {
            return Err(CombustionError::SolverConvergence {
                what: format!(
                    "mixture ratio {mr} outside [{mr_min}, {mr_max}] for {}/{}",
                    self.oxidizer, self.fuel
                ),
            });
        }
        if !(P_MIN_MPA..=P_MAX_MPA).contains(&pc_mpa) {
            return Err(CombustionError::SolverConvergence {
                what: format!(
                    "chamber pressure {pc_mpa} MPa outside [{P_MIN_MPA}, {P_MAX_MPA}] MPa"
                ),
            });
        }

        let low = Self::interpolate_mr(self.at_low_pressure, mr);
        let high = Self::interpolate_mr(self.at_high_pressure, mr);
        let w = (pc_mpa.ln() - P_LOW_MPA.ln()) / (P_HIGH_MPA.ln() - P_LOW_MPA.ln());
        Ok(pt(
            mr,
            lerp(low.temperature_k, high.temperature_k, w),
            lerp(low.molar_mass_g_per_mol, high.molar_mass_g_per_mol, w),
            lerp(low.gamma, high.gamma, w),
        ))
    }
}

#[inline]
fn lerp(a: f64, b: f64, w: f64) -> f64 {
    a + (b - a) * w
}

/// Combustion backend backed by precomputed equilibrium tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct TabulatedCombustionModel;

impl TabulatedCombustionModel {
    /// Create a new tabulated model.
    pub fn new() -> Self {
        Self
    }

    fn table(&self, oxidizer: Propellant, fuel: Propellant) -> Option<&'static PairTable> {
        PAIR_TABLES
            .iter()
            .find(|t| t.oxidizer == oxidizer && t.fuel == fuel)
    }

    /// All propellant pairs with tabulated data.
    pub fn supported_pairs(&self) -> Vec<(Propellant, Propellant)> {
        PAIR_TABLES.iter().map(|t| (t.oxidizer, t.fuel)).collect()
    }

    /// Tabulated mixture-ratio range for a pair.
    pub fn mixture_ratio_range(&self, oxidizer: Propellant, fuel: Propellant) -> Option<(f64, f64)> {
        self.table(oxidizer, fuel).map(PairTable::mixture_ratio_range)
    }

    /// Grid mixture ratio with the highest C* at the given chamber pressure.
    pub fn optimum_mixture_ratio(
        &self,
        oxidizer: Propellant,
        fuel: Propellant,
        chamber_pressure_mpa: f64,
    ) -> CombustionResult<f64> {
        let table = self.table(oxidizer, fuel).ok_or_else(|| unsupported(oxidizer, fuel))?;
        let mut best: Option<(f64, f64)> = None;
        for point in table.at_high_pressure {
            let state = table.chamber_state(chamber_pressure_mpa, point.mixture_ratio)?;
            let c_star = characteristic_velocity(
                state.gamma,
                state.molar_mass_g_per_mol / 1000.0,
                state.temperature_k,
            )?;
            if best.is_none_or(|(_, c)| c_star > c) {
                best = Some((point.mixture_ratio, c_star));
            }
        }
        best.map(|(mr, _)| mr)
            .ok_or(CombustionError::NonPhysical { what: "empty table" })
    }
}

fn unsupported(oxidizer: Propellant, fuel: Propellant) -> CombustionError {
    CombustionError::UnsupportedPair {
        oxidizer: oxidizer.to_string(),
        fuel: fuel.to_string(),
    }
}

impl CombustionModel for TabulatedCombustionModel {
    fn name(&self) -> &str {
        "tabulated-equilibrium"
    }

    fn supports_pair(&self, oxidizer: Propellant, fuel: Propellant) -> bool {
        self.table(oxidizer, fuel).is_some()
    }

    fn evaluate(&self, query: &CombustionQuery) -> CombustionResult<CombustionProperties> {
        validation::validate_query(query)?;
        let table = self
            .table(query.oxidizer, query.fuel)
            .ok_or_else(|| unsupported(query.oxidizer, query.fuel))?;

        let state = table.chamber_state(query.chamber_pressure_mpa, query.mixture_ratio)?;
        let c_star = characteristic_velocity(
            state.gamma,
            state.molar_mass_g_per_mol / 1000.0,
            state.temperature_k,
        )?;
        let cf_vac = vacuum_thrust_coefficient(query.expansion_ratio, state.gamma)?;

        let props = CombustionProperties {
            isp_vacuum_s: c_star * cf_vac / G0_MPS2,
            c_star_mps: c_star,
            chamber_temperature_k: state.temperature_k,
            molar_mass_g_per_mol: state.molar_mass_g_per_mol,
            gamma: state.gamma,
        };
        validation::validate_properties(&props)?;
        Ok(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(ox: Propellant, fuel: Propellant, pc: f64, mr: f64, eps: f64) -> CombustionQuery {
        CombustionQuery {
            oxidizer: ox,
            fuel,
            chamber_pressure_mpa: pc,
            mixture_ratio: mr,
            expansion_ratio: eps,
        }
    }

    #[test]
    fn grid_point_is_reproduced_exactly() {
        let model = TabulatedCombustionModel::new();
        let props = model
            .evaluate(&query(Propellant::Lox, Propellant::Ethanol, 10.0, 1.45, 2.3))
            .unwrap();
        assert!((props.chamber_temperature_k - 3300.0).abs() < 1e-9);
        assert!((props.molar_mass_g_per_mol - 22.7).abs() < 1e-9);
        assert!((props.gamma - 1.198).abs() < 1e-12);
    }

    #[test]
    fn tables_share_mixture_ratio_grid() {
        for table in &PAIR_TABLES {
            assert_eq!(table.at_low_pressure.len(), table.at_high_pressure.len());
            for (a, b) in table.at_low_pressure.iter().zip(table.at_high_pressure) {
                assert_eq!(a.mixture_ratio, b.mixture_ratio);
            }
            assert!(
                table
                    .at_high_pressure
                    .windows(2)
                    .all(|w| w[0].mixture_ratio < w[1].mixture_ratio)
            );
        }
    }

    #[test]
    fn interpolates_between_grid_points() {
        let model = TabulatedCombustionModel::new();
        let props = model
            .evaluate(&query(Propellant::Lox, Propellant::Ethanol, 10.0, 1.575, 2.3))
            .unwrap();
        assert!((props.chamber_temperature_k - 3335.0).abs() < 1e-9);
    }

    #[test]
    fn pressure_raises_chamber_temperature() {
        let model = TabulatedCombustionModel::new();
        let low = model
            .evaluate(&query(Propellant::Lox, Propellant::Rp1, 2.0, 2.6, 10.0))
            .unwrap();
        let high = model
            .evaluate(&query(Propellant::Lox, Propellant::Rp1, 8.0, 2.6, 10.0))
            .unwrap();
        assert!(high.chamber_temperature_k > low.chamber_temperature_k);
    }

    #[test]
    fn isp_grows_with_expansion() {
        let model = TabulatedCombustionModel::new();
        let small = model
            .evaluate(&query(Propellant::Lox, Propellant::Lh2, 7.0, 6.0, 5.0))
            .unwrap();
        let large = model
            .evaluate(&query(Propellant::Lox, Propellant::Lh2, 7.0, 6.0, 50.0))
            .unwrap();
        assert!(large.isp_vacuum_s > small.isp_vacuum_s);
        assert_eq!(large.c_star_mps, small.c_star_mps);
    }

    #[test]
    fn mixture_ratio_outside_table_does_not_converge() {
        let model = TabulatedCombustionModel::new();
        let err = model
            .evaluate(&query(Propellant::Lox, Propellant::Ethanol, 10.0, 9.0, 2.3))
            .unwrap_err();
        assert!(matches!(err, CombustionError::SolverConvergence { .. }));
    }

    #[test]
    fn pressure_outside_envelope_does_not_converge() {
        let model = TabulatedCombustionModel::new();
        let err = model
            .evaluate(&query(Propellant::Lox, Propellant::Ethanol, 1.0e7, 1.45, 2.3))
            .unwrap_err();
        assert!(matches!(err, CombustionError::SolverConvergence { .. }));
    }

    #[test]
    fn unsupported_pair_reported() {
        let model = TabulatedCombustionModel::new();
        assert!(!model.supports_pair(Propellant::N2O4, Propellant::Lh2));
        let err = model
            .evaluate(&query(Propellant::N2O4, Propellant::Lh2, 5.0, 2.0, 10.0))
            .unwrap_err();
        assert!(matches!(err, CombustionError::UnsupportedPair { .. }));
    }

    #[test]
    fn optimum_mixture_ratio_is_fuel_rich_of_stoichiometric() {
        let model = TabulatedCombustionModel::new();
        let mr = model
            .optimum_mixture_ratio(Propellant::Lox, Propellant::Lh2, 7.0)
            .unwrap();
        let (lo, hi) = model
            .mixture_ratio_range(Propellant::Lox, Propellant::Lh2)
            .unwrap();
        assert!(mr >= lo && mr <= hi);
        assert!(mr < 8.0);
    }
}
