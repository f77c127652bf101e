//! Isentropic area–Mach and pressure relations for a converging-diverging nozzle.

use crate::common::{check_finite, check_gamma, check_positive};
use crate::error::{NozzleError, NozzleResult};

/// Expansion ratios this close to one are treated as a nozzle ending at the throat.
const UNIT_EXPANSION_TOL: f64 = 1e-12;

/// Ratio of pressure to stagnation pressure at Mach number `mach`.
///
/// ```text
/// p/p0 = (1 + (γ-1)/2 · M²)^(-γ/(γ-1))
/// ```
pub fn pressure_ratio_from_mach(mach: f64, gamma: f64) -> NozzleResult<f64> {
    let gamma = check_gamma(gamma)?;
    if !mach.is_finite() || mach < 0.0 {
        return Err(NozzleError::InvalidArg {
            what: "Mach number must be finite and >= 0",
        });
    }
    let base = 1.0 + 0.5 * (gamma - 1.0) * mach * mach;
    check_finite(base.powf(-gamma / (gamma - 1.0)), "pressure ratio")
}

/// Pressure ratio p*/p0 at the sonic throat.
pub fn critical_pressure_ratio(gamma: f64) -> NozzleResult<f64> {
    let gamma = check_gamma(gamma)?;
    Ok((2.0 / (gamma + 1.0)).powf(gamma / (gamma - 1.0)))
}

/// Area ratio A/A* at Mach number `mach`.
///
/// ```text
/// A/A* = 1/M · [2/(γ+1) · (1 + (γ-1)/2 · M²)]^((γ+1)/(2(γ-1)))
/// ```
pub fn area_ratio_from_mach(mach: f64, gamma: f64) -> NozzleResult<f64> {
    let gamma = check_gamma(gamma)?;
    let mach = check_positive(mach, "Mach number must be finite and > 0")?;
    let base = 2.0 / (gamma + 1.0) * (1.0 + 0.5 * (gamma - 1.0) * mach * mach);
    let exponent = (gamma + 1.0) / (2.0 * (gamma - 1.0));
    check_finite(base.powf(exponent) / mach, "area ratio")
}

/// Supersonic Mach number at which the nozzle area ratio equals `expansion_ratio`.
///
/// The area–Mach relation is increasing on `M >= 1`, so the root is bracketed by
/// doubling an upper bound and then bisected.
pub fn mach_from_expansion(expansion_ratio: f64, gamma: f64) -> NozzleResult<f64> {
    const MAX_BRACKET_MACH: f64 = 1.0e3;
    const MAX_ITER: usize = 200;
    const REL_TOL: f64 = 1e-13;

    let gamma = check_gamma(gamma)?;
    let eps = check_expansion_ratio(expansion_ratio)?;
    if eps - 1.0 <= UNIT_EXPANSION_TOL {
        return Ok(1.0);
    }

    let mut m_low = 1.0;
    let mut m_high = 2.0;
    while area_ratio_from_mach(m_high, gamma)? < eps {
        m_low = m_high;
        m_high *= 2.0;
        if m_high > MAX_BRACKET_MACH {
            return Err(NozzleError::ConvergenceFailed {
                what: "expansion ratio beyond supported Mach range",
            });
        }
    }

    for _ in 0..MAX_ITER {
        let m_mid = 0.5 * (m_low + m_high);
        let area_mid = area_ratio_from_mach(m_mid, gamma)?;

        if ((area_mid - eps) / eps).abs() < REL_TOL || (m_high - m_low) < REL_TOL * m_mid {
            return Ok(m_mid);
        }

        if area_mid < eps {
            m_low = m_mid;
        } else {
            m_high = m_mid;
        }
    }

    Err(NozzleError::ConvergenceFailed {
        what: "area-Mach inversion",
    })
}

/// Exit-to-chamber pressure ratio Pe/Pc for isentropic supersonic expansion.
///
/// An expansion ratio of exactly one is a nozzle that ends at the throat with no
/// expansion, and yields a ratio of one.
pub fn pressure_ratio_from_expansion(expansion_ratio: f64, gamma: f64) -> NozzleResult<f64> {
    let eps = check_expansion_ratio(expansion_ratio)?;
    check_gamma(gamma)?;
    if eps - 1.0 <= UNIT_EXPANSION_TOL {
        return Ok(1.0);
    }
    let mach = mach_from_expansion(eps, gamma)?;
    pressure_ratio_from_mach(mach, gamma)
}

/// Expansion ratio that expands from `p_c` to `p_e` (closed form).
///
/// ```text
/// 1/ε = ((γ+1)/2)^(1/(γ-1)) · (pe/pc)^(1/γ) · sqrt((γ+1)/(γ-1) · (1 - (pe/pc)^((γ-1)/γ)))
/// ```
///
/// `p_e >= p_c` means no expansion and returns one.
pub fn expansion_ratio_from_pressure(p_c: f64, p_e: f64, gamma: f64) -> NozzleResult<f64> {
    let gamma = check_gamma(gamma)?;
    let p_c = check_positive(p_c, "chamber pressure must be finite and > 0")?;
    let p_e = check_positive(p_e, "exit pressure must be finite and > 0")?;

    let pr = p_e / p_c;
    if pr >= 1.0 {
        return Ok(1.0);
    }

    let inv = ((gamma + 1.0) / 2.0).powf(1.0 / (gamma - 1.0))
        * pr.powf(1.0 / gamma)
        * ((gamma + 1.0) / (gamma - 1.0) * (1.0 - pr.powf((gamma - 1.0) / gamma))).sqrt();
    if inv <= 0.0 {
        return Err(NozzleError::NonPhysical {
            what: "expansion ratio from pressure",
        });
    }
    check_finite(1.0 / inv, "expansion ratio")
}

fn check_expansion_ratio(expansion_ratio: f64) -> NozzleResult<f64> {
    if !expansion_ratio.is_finite() || expansion_ratio < 1.0 {
        return Err(NozzleError::InvalidArg {
            what: "expansion ratio must be finite and >= 1",
        });
    }
    Ok(expansion_ratio)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pressure_ratio_decreases_with_expansion(
            eps in 1.01_f64..100.0,
            step in 0.01_f64..10.0,
            gamma in 1.1_f64..1.67,
        ) {
            let p1 = pressure_ratio_from_expansion(eps, gamma).unwrap();
            let p2 = pressure_ratio_from_expansion(eps + step, gamma).unwrap();
            prop_assert!(p2 < p1);
            prop_assert!(p1 > 0.0 && p1 < 1.0);
        }
    }
}
