//! Thrust, characteristic velocity and choked mass flow.

use crate::common::{check_finite, check_gamma, check_non_negative, check_positive};
use crate::error::{NozzleError, NozzleResult};
use crate::isentropic::pressure_ratio_from_expansion;
use rp_core::units::constants::R_UNIVERSAL;

/// Vandenkerckhove function Γ(γ), the choked-flow factor.
///
/// ```text
/// Γ = sqrt(γ) · (2/(γ+1))^((γ+1)/(2(γ-1)))
/// ```
pub fn vandenkerckhove(gamma: f64) -> NozzleResult<f64> {
    let gamma = check_gamma(gamma)?;
    Ok(gamma.sqrt() * (2.0 / (gamma + 1.0)).powf((gamma + 1.0) / (2.0 * (gamma - 1.0))))
}

/// Characteristic velocity C* [m/s] from chamber gas properties.
///
/// `molar_mass` is in kg/mol, `chamber_temperature` in K.
pub fn characteristic_velocity(
    gamma: f64,
    molar_mass: f64,
    chamber_temperature: f64,
) -> NozzleResult<f64> {
    let molar_mass = check_positive(molar_mass, "molar mass must be finite and > 0")?;
    let t_c = check_positive(
        chamber_temperature,
        "chamber temperature must be finite and > 0",
    )?;
    let big_gamma = vandenkerckhove(gamma)?;
    check_finite(
        (R_UNIVERSAL * t_c / molar_mass).sqrt() / big_gamma,
        "characteristic velocity",
    )
}

/// Choked mass flow [kg/s] through a throat of area `throat_area` [m²].
///
/// ```text
/// ṁ = At · pc / C*
/// ```
pub fn mass_flow(
    throat_area: f64,
    p_c: f64,
    chamber_temperature: f64,
    gamma: f64,
    molar_mass: f64,
) -> NozzleResult<f64> {
    let a_t = check_positive(throat_area, "throat area must be finite and > 0")?;
    let p_c = check_positive(p_c, "chamber pressure must be finite and > 0")?;
    let c_star = characteristic_velocity(gamma, molar_mass, chamber_temperature)?;
    check_finite(a_t * p_c / c_star, "mass flow rate")
}

/// Momentum part of the thrust coefficient for exit pressure ratio `pe/pc`.
fn momentum_coefficient(pressure_ratio: f64, gamma: f64) -> NozzleResult<f64> {
    let gamma = check_gamma(gamma)?;
    if !pressure_ratio.is_finite() || pressure_ratio <= 0.0 || pressure_ratio > 1.0 {
        return Err(NozzleError::InvalidArg {
            what: "exit pressure ratio must be in (0, 1]",
        });
    }
    let term = 2.0 * gamma * gamma / (gamma - 1.0)
        * (2.0 / (gamma + 1.0)).powf((gamma + 1.0) / (gamma - 1.0))
        * (1.0 - pressure_ratio.powf((gamma - 1.0) / gamma));
    check_finite(term.max(0.0).sqrt(), "momentum thrust coefficient")
}

/// Thrust coefficient CF = F / (pc · At).
///
/// ```text
/// CF = sqrt(2γ²/(γ-1) · (2/(γ+1))^((γ+1)/(γ-1)) · (1 - (pe/pc)^((γ-1)/γ))) + ε · (pe - pa)/pc
/// ```
pub fn thrust_coefficient(
    pressure_ratio: f64,
    gamma: f64,
    ambient_ratio: f64,
    expansion_ratio: f64,
) -> NozzleResult<f64> {
    let ambient_ratio = check_non_negative(ambient_ratio, "ambient pressure ratio must be >= 0")?;
    if !expansion_ratio.is_finite() || expansion_ratio < 1.0 {
        return Err(NozzleError::InvalidArg {
            what: "expansion ratio must be finite and >= 1",
        });
    }
    let momentum = momentum_coefficient(pressure_ratio, gamma)?;
    check_finite(
        momentum + expansion_ratio * (pressure_ratio - ambient_ratio),
        "thrust coefficient",
    )
}

/// Vacuum thrust coefficient for a nozzle of the given expansion ratio.
pub fn vacuum_thrust_coefficient(expansion_ratio: f64, gamma: f64) -> NozzleResult<f64> {
    let pr = pressure_ratio_from_expansion(expansion_ratio, gamma)?;
    thrust_coefficient(pr, gamma, 0.0, expansion_ratio)
}

/// Momentum thrust [N] alone, without the pressure-thrust term.
pub fn momentum_thrust(throat_area: f64, p_c: f64, p_e: f64, gamma: f64) -> NozzleResult<f64> {
    let a_t = check_positive(throat_area, "throat area must be finite and > 0")?;
    let p_c = check_positive(p_c, "chamber pressure must be finite and > 0")?;
    let p_e = check_positive(p_e, "exit pressure must be finite and > 0")?;
    Ok(a_t * p_c * momentum_coefficient(p_e / p_c, gamma)?)
}

/// Rocket thrust [N]: momentum thrust plus pressure thrust `(pe - pa) · Ae`.
pub fn thrust(
    throat_area: f64,
    p_c: f64,
    p_e: f64,
    gamma: f64,
    p_a: f64,
    expansion_ratio: f64,
) -> NozzleResult<f64> {
    let a_t = check_positive(throat_area, "throat area must be finite and > 0")?;
    let p_c = check_positive(p_c, "chamber pressure must be finite and > 0")?;
    let p_e = check_positive(p_e, "exit pressure must be finite and > 0")?;
    let p_a = check_non_negative(p_a, "ambient pressure must be finite and >= 0")?;
    let cf = thrust_coefficient(p_e / p_c, gamma, p_a / p_c, expansion_ratio)?;
    check_finite(a_t * p_c * cf, "thrust")
}
