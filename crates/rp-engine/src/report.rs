//! Serializable snapshot of one evaluated design point.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every input and derived quantity of an evaluated design, in SI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub oxidizer: String,
    pub fuel: String,
    pub mixture_ratio: f64,
    pub chamber_pressure_pa: f64,
    pub throat_area_m2: f64,
    pub exit_area_m2: f64,
    pub expansion_ratio: f64,
    pub ambient_pressure_pa: f64,

    pub chamber_temperature_k: f64,
    pub gamma: f64,
    pub molar_mass_kg_per_mol: f64,
    /// C* as reported by the combustion backend
    pub c_star_provider_mps: f64,
    /// C* recomputed from γ, molar mass and Tc
    pub c_star_formula_mps: f64,
    pub c_star_deviation: f64,
    pub isp_vacuum_s: f64,

    pub isp_delivered_s: f64,
    pub exit_pressure_pa: f64,
    pub thrust_n: f64,
    pub momentum_thrust_n: f64,
    pub mass_flow_kg_s: f64,
    pub thrust_coefficient: f64,
}

const CSV_COLUMNS: [&str; 21] = [
    "oxidizer",
    "fuel",
    "mixture_ratio",
    "chamber_pressure_pa",
    "throat_area_m2",
    "exit_area_m2",
    "expansion_ratio",
    "ambient_pressure_pa",
    "chamber_temperature_k",
    "gamma",
    "molar_mass_kg_per_mol",
    "c_star_provider_mps",
    "c_star_formula_mps",
    "c_star_deviation",
    "isp_vacuum_s",
    "isp_delivered_s",
    "exit_pressure_pa",
    "thrust_n",
    "momentum_thrust_n",
    "mass_flow_kg_s",
    "thrust_coefficient",
];

impl PerformanceReport {
    pub fn csv_header() -> String {
        CSV_COLUMNS.join(",")
    }

    /// One CSV line matching `csv_header()`.
    pub fn csv_row(&self) -> String {
        let numbers = [
            self.mixture_ratio,
            self.chamber_pressure_pa,
            self.throat_area_m2,
            self.exit_area_m2,
            self.expansion_ratio,
            self.ambient_pressure_pa,
            self.chamber_temperature_k,
            self.gamma,
            self.molar_mass_kg_per_mol,
            self.c_star_provider_mps,
            self.c_star_formula_mps,
            self.c_star_deviation,
            self.isp_vacuum_s,
            self.isp_delivered_s,
            self.exit_pressure_pa,
            self.thrust_n,
            self.momentum_thrust_n,
            self.mass_flow_kg_s,
            self.thrust_coefficient,
        ];
        let mut row = format!("{},{}", self.oxidizer, self.fuel);
        for v in numbers {
            row.push(',');
            row.push_str(&format!("{v:.6e}"));
        }
        row
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} / {} at MR {:.3}, Pc {:.3} MPa, eps {:.3}, Pa {:.1} Pa",
            self.oxidizer,
            self.fuel,
            self.mixture_ratio,
            self.chamber_pressure_pa / 1.0e6,
            self.expansion_ratio,
            self.ambient_pressure_pa
        )?;
        writeln!(
            f,
            "  Tc {:.1} K, gamma {:.4}, M {:.3} g/mol",
            self.chamber_temperature_k,
            self.gamma,
            self.molar_mass_kg_per_mol * 1000.0
        )?;
        writeln!(
            f,
            "  C* {:.1} m/s (gas properties {:.1} m/s, deviation {:.2e})",
            self.c_star_provider_mps, self.c_star_formula_mps, self.c_star_deviation
        )?;
        writeln!(
            f,
            "  Isp vac {:.1} s, delivered {:.1} s, CF {:.4}",
            self.isp_vacuum_s, self.isp_delivered_s, self.thrust_coefficient
        )?;
        writeln!(
            f,
            "  Pe {:.1} kPa, mdot {:.4} kg/s",
            self.exit_pressure_pa / 1.0e3,
            self.mass_flow_kg_s
        )?;
        write!(
            f,
            "  thrust {:.3} kN (momentum {:.3} kN)",
            self.thrust_n / 1.0e3,
            self.momentum_thrust_n / 1.0e3
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PerformanceReport {
        PerformanceReport {
            oxidizer: "LOX".into(),
            fuel: "C2H5OH".into(),
            mixture_ratio: 1.45,
            chamber_pressure_pa: 1.0e7,
            throat_area_m2: 3.14e-4,
            exit_area_m2: 7.22e-4,
            expansion_ratio: 2.3,
            ambient_pressure_pa: 0.0,
            chamber_temperature_k: 3300.0,
            gamma: 1.2,
            molar_mass_kg_per_mol: 0.0227,
            c_star_provider_mps: 1696.0,
            c_star_formula_mps: 1696.0,
            c_star_deviation: 0.0,
            isp_vacuum_s: 259.0,
            isp_delivered_s: 259.0,
            exit_pressure_pa: 9.7e5,
            thrust_n: 4700.0,
            momentum_thrust_n: 4000.0,
            mass_flow_kg_s: 1.85,
            thrust_coefficient: 1.5,
        }
    }

    #[test]
    fn csv_row_matches_header_width() {
        let header_cols = PerformanceReport::csv_header().split(',').count();
        let row_cols = sample().csv_row().split(',').count();
        assert_eq!(header_cols, row_cols);
        assert!(sample().csv_row().starts_with("LOX,C2H5OH,"));
    }

    #[test]
    fn json_field_names_are_snake_case() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"thrust_n\":4700"));
        let back: PerformanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn display_reports_thrust_in_kn() {
        let text = sample().to_string();
        assert!(text.contains("thrust 4.700 kN"));
    }
}
