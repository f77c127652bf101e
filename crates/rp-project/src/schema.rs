//! Design file schema definitions.

use rp_core::units::{Area, circle_area, m, m2, pa};
use rp_engine::{DesignInputs, EngineResult, SweepDefinition, SweepParameter, SweepSpacing};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignFile {
    pub version: u32,
    pub name: String,
    /// Ambient pressure for every evaluation in this file [Pa]
    #[serde(default)]
    pub ambient_pressure_pa: f64,
    #[serde(default)]
    pub designs: Vec<DesignDef>,
    #[serde(default)]
    pub sweeps: Vec<SweepDef>,
}

impl DesignFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            ambient_pressure_pa: 0.0,
            designs: Vec::new(),
            sweeps: Vec::new(),
        }
    }

    pub fn design(&self, id: &str) -> Option<&DesignDef> {
        self.designs.iter().find(|d| d.id == id)
    }

    pub fn sweep(&self, id: &str) -> Option<&SweepDef> {
        self.sweeps.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignDef {
    pub id: String,
    pub oxidizer: String,
    pub fuel: String,
    pub mixture_ratio: f64,
    pub chamber_pressure_pa: f64,
    pub throat: ThroatDef,
    pub expansion_ratio: f64,
}

impl DesignDef {
    pub fn to_inputs(&self) -> DesignInputs {
        DesignInputs {
            oxidizer: self.oxidizer.clone(),
            fuel: self.fuel.clone(),
            mixture_ratio: self.mixture_ratio,
            chamber_pressure: pa(self.chamber_pressure_pa),
            throat_area: self.throat.area(),
            expansion_ratio: self.expansion_ratio,
        }
    }
}

/// Throat size, given either as a radius or directly as an area.
///
/// Each form rejects the other's key, so `{ radius_m, area_m2 }` fails to parse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ThroatDef {
    Radius(ThroatRadius),
    Area(ThroatArea),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThroatRadius {
    pub radius_m: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThroatArea {
    pub area_m2: f64,
}

impl ThroatDef {
    pub fn radius(radius_m: f64) -> Self {
        ThroatDef::Radius(ThroatRadius { radius_m })
    }

    pub fn area_m2(area_m2: f64) -> Self {
        ThroatDef::Area(ThroatArea { area_m2 })
    }

    pub fn area(&self) -> Area {
        match *self {
            ThroatDef::Radius(ThroatRadius { radius_m }) => circle_area(m(radius_m)),
            ThroatDef::Area(ThroatArea { area_m2 }) => m2(area_m2),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepDef {
    pub id: String,
    pub design_id: String,
    pub parameter: SweepParameter,
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    #[serde(default)]
    pub spacing: SweepSpacing,
}

impl SweepDef {
    pub fn to_definition(&self) -> EngineResult<SweepDefinition> {
        SweepDefinition::new(
            self.parameter,
            self.start,
            self.end,
            self.num_points,
            self.spacing,
        )
    }
}
