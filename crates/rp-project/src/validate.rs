//! Design file validation logic.

use crate::schema::{
    DesignDef, DesignFile, LATEST_VERSION, SweepDef, ThroatArea, ThroatDef, ThroatRadius,
};
use rp_combustion::PropellantRole;
use rp_engine::SweepSpacing;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_design_file(file: &DesignFile) -> Result<(), ValidationError> {
    if file.version == 0 || file.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }

    if !file.ambient_pressure_pa.is_finite() || file.ambient_pressure_pa < 0.0 {
        return Err(invalid(
            "ambient_pressure_pa",
            file.ambient_pressure_pa,
            "must be non-negative and finite",
        ));
    }

    let mut design_ids = HashSet::new();
    for design in &file.designs {
        if !design_ids.insert(design.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: design.id.clone(),
                context: "designs".to_string(),
            });
        }
        validate_design(design)?;
    }

    let mut sweep_ids = HashSet::new();
    for sweep in &file.sweeps {
        if !sweep_ids.insert(sweep.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: sweep.id.clone(),
                context: "sweeps".to_string(),
            });
        }
        if !design_ids.contains(sweep.design_id.as_str()) {
            return Err(ValidationError::MissingReference {
                id: sweep.design_id.clone(),
                context: format!("sweep '{}' design_id", sweep.id),
            });
        }
        validate_sweep(sweep)?;
    }

    Ok(())
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_design(design: &DesignDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("design '{}' {}", design.id, name);

    for (name, role) in [
        (&design.oxidizer, PropellantRole::Oxidizer),
        (&design.fuel, PropellantRole::Fuel),
    ] {
        let known = rp_combustion::lookup(name).is_some_and(|entry| entry.role() == role);
        if !known {
            return Err(invalid(
                field(&role.to_string()),
                name,
                "not a known propellant for this role",
            ));
        }
    }

    if !design.mixture_ratio.is_finite() || design.mixture_ratio <= 0.0 {
        return Err(invalid(
            field("mixture_ratio"),
            design.mixture_ratio,
            "must be positive and finite",
        ));
    }

    if !design.chamber_pressure_pa.is_finite() || design.chamber_pressure_pa <= 0.0 {
        return Err(invalid(
            field("chamber_pressure_pa"),
            design.chamber_pressure_pa,
            "must be positive and finite",
        ));
    }

    let (throat_field, throat_value) = match design.throat {
        ThroatDef::Radius(ThroatRadius { radius_m }) => ("throat radius_m", radius_m),
        ThroatDef::Area(ThroatArea { area_m2 }) => ("throat area_m2", area_m2),
    };
    if !throat_value.is_finite() || throat_value <= 0.0 {
        return Err(invalid(
            field(throat_field),
            throat_value,
            "must be positive and finite",
        ));
    }

    if !design.expansion_ratio.is_finite() || design.expansion_ratio < 1.0 {
        return Err(invalid(
            field("expansion_ratio"),
            design.expansion_ratio,
            "must be >= 1 and finite",
        ));
    }

    Ok(())
}

fn validate_sweep(sweep: &SweepDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("sweep '{}' {}", sweep.id, name);

    if sweep.num_points < 2 {
        return Err(invalid(
            field("num_points"),
            sweep.num_points,
            "sweep must have at least 2 points",
        ));
    }

    for (name, value) in [("start", sweep.start), ("end", sweep.end)] {
        if !value.is_finite() {
            return Err(invalid(field(name), value, "must be finite"));
        }
        if sweep.spacing == SweepSpacing::Logarithmic && value <= 0.0 {
            return Err(invalid(
                field(name),
                value,
                "logarithmic sweeps need positive bounds",
            ));
        }
    }

    if (sweep.start - sweep.end).abs() < 1e-12 {
        return Err(invalid(
            field("end"),
            sweep.end,
            "start and end values must be different",
        ));
    }

    Ok(())
}
