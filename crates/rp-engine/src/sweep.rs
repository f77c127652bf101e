//! Parameter sweeps over engine design points.
//!
//! A sweep varies one input of a base design and evaluates every point as an
//! independent `EngineDesign`. Points run in parallel and share one provider.
//! A failing point is recorded and counted; it never aborts the sweep.

use crate::design::DesignInputs;
use crate::error::{EngineError, EngineResult};
use crate::report::PerformanceReport;
use rayon::prelude::*;
use rp_combustion::{CombustionModel, CombustionPropertyProvider};
use rp_core::units::{Pressure, pa};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Design input varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    MixtureRatio,
    /// Chamber pressure in Pa
    ChamberPressure,
    ExpansionRatio,
}

impl SweepParameter {
    /// Column name used in sweep output.
    pub fn column(&self) -> &'static str {
        match self {
            Self::MixtureRatio => "mixture_ratio",
            Self::ChamberPressure => "chamber_pressure_pa",
            Self::ExpansionRatio => "expansion_ratio",
        }
    }

    /// Copy of `base` with this parameter replaced by `value`.
    pub fn apply(&self, base: &DesignInputs, value: f64) -> DesignInputs {
        let mut inputs = base.clone();
        match self {
            Self::MixtureRatio => inputs.mixture_ratio = value,
            Self::ChamberPressure => inputs.chamber_pressure = pa(value),
            Self::ExpansionRatio => inputs.expansion_ratio = value,
        }
        inputs
    }
}

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepSpacing {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Definition of a single parameter sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub parameter: SweepParameter,
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub spacing: SweepSpacing,
}

impl SweepDefinition {
    /// Create a validated sweep definition.
    pub fn new(
        parameter: SweepParameter,
        start: f64,
        end: f64,
        num_points: usize,
        spacing: SweepSpacing,
    ) -> EngineResult<Self> {
        let def = Self {
            parameter,
            start,
            end,
            num_points,
            spacing,
        };
        def.validate()?;
        Ok(def)
    }

    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |what: String| -> EngineResult<()> { Err(EngineError::InvalidSweep { what }) };
        if !self.start.is_finite() || !self.end.is_finite() {
            return invalid("sweep bounds must be finite".to_string());
        }
        if self.num_points < 2 {
            return invalid("sweep must have at least 2 points".to_string());
        }
        if (self.start - self.end).abs() < 1e-12 {
            return invalid("start and end values must be different".to_string());
        }
        if self.spacing == SweepSpacing::Logarithmic && (self.start <= 0.0 || self.end <= 0.0) {
            return invalid(format!(
                "logarithmic sweep needs positive bounds (got {} to {})",
                self.start, self.end
            ));
        }
        Ok(())
    }

    /// Generate all points in the sweep. The last point is exactly `end`.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.spacing {
            SweepSpacing::Linear => self.generate_linear(),
            SweepSpacing::Logarithmic => self.generate_logarithmic(),
        }
    }

    fn generate_linear(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }

        let delta = (self.end - self.start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start + i as f64 * delta)
            .collect();
        points[self.num_points - 1] = self.end;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        if self.start <= 0.0 || self.end <= 0.0 {
            return self.generate_linear();
        }

        let log_start = self.start.ln();
        let log_delta = (self.end.ln() - log_start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| (log_start + i as f64 * log_delta).exp())
            .collect();
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Logarithmic => write!(f, "logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {} to {} ({} points, {})",
            self.parameter.column(),
            self.start,
            self.end,
            self.num_points,
            self.spacing
        )
    }
}

/// One evaluated sweep point.
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub value: f64,
    pub report: Option<PerformanceReport>,
    pub error: Option<String>,
}

/// Result of a design sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub parameter: SweepParameter,
    pub points: Vec<SweepPoint>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    /// Reports of successful points, in sweep order.
    pub fn reports(&self) -> impl Iterator<Item = &PerformanceReport> {
        self.points.iter().filter_map(|p| p.report.as_ref())
    }

    /// Swept values of successful points.
    pub fn successful_values(&self) -> Vec<f64> {
        self.points
            .iter()
            .filter_map(|p| p.report.as_ref().map(|_| p.value))
            .collect()
    }

    /// CSV with the swept value first (as `sweep_<column>`), then the full
    /// report; failed points keep their row with empty report columns.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();
        csv.push_str(&format!(
            "sweep_{},{},error\n",
            self.parameter.column(),
            PerformanceReport::csv_header()
        ));
        let empty = ",".repeat(PerformanceReport::csv_header().matches(',').count());
        for point in &self.points {
            match (&point.report, &point.error) {
                (Some(report), _) => {
                    csv.push_str(&format!("{:.6e},{},\n", point.value, report.csv_row()));
                }
                (None, err) => {
                    let msg = err.as_deref().unwrap_or("").replace(',', ";");
                    csv.push_str(&format!("{:.6e},{},{}\n", point.value, empty, msg));
                }
            }
        }
        csv
    }
}

/// Evaluate `base` with `def.parameter` set to each sweep point.
pub fn run_sweep<M: CombustionModel>(
    provider: &CombustionPropertyProvider<M>,
    base: &DesignInputs,
    def: &SweepDefinition,
    ambient: Pressure,
) -> EngineResult<SweepResult> {
    def.validate()?;

    let points: Vec<SweepPoint> = def
        .generate_points()
        .into_par_iter()
        .map(|value| {
            let inputs = def.parameter.apply(base, value);
            match inputs
                .evaluate(provider)
                .and_then(|design| design.performance(ambient))
            {
                Ok(report) => SweepPoint {
                    value,
                    report: Some(report),
                    error: None,
                },
                Err(e) => SweepPoint {
                    value,
                    report: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();

    let num_successful = points.iter().filter(|p| p.report.is_some()).count();
    let num_failed = points.len() - num_successful;
    info!(
        sweep = %def,
        num_successful,
        num_failed,
        "design sweep complete"
    );

    Ok(SweepResult {
        parameter: def.parameter,
        points,
        num_successful,
        num_failed,
    })
}
