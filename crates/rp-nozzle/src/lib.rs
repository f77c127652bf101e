//! rp-nozzle: closed-form isentropic nozzle relations.
//!
//! Provides:
//! - area–Mach relation and its supersonic inversion
//! - exit pressure ratio from expansion ratio (and the inverse)
//! - thrust coefficient and thrust
//! - characteristic velocity and choked mass flow
//!
//! All functions are pure and work in plain SI `f64` values (Pa, m², K,
//! kg/mol). Callers holding `uom` quantities pass `.value`.
//!
//! # Example
//!
//! ```
//! use rp_nozzle::{characteristic_velocity, mass_flow, pressure_ratio_from_expansion};
//!
//! let gamma = 1.2;
//! let pr = pressure_ratio_from_expansion(2.3, gamma).unwrap();
//! assert!(pr > 0.0 && pr < 1.0);
//!
//! let c_star = characteristic_velocity(gamma, 0.0227, 3300.0).unwrap();
//! let mdot = mass_flow(3.14e-4, 1.0e7, 3300.0, gamma, 0.0227).unwrap();
//! assert!((mdot - 3.14e-4 * 1.0e7 / c_star).abs() < 1e-9);
//! ```

pub mod common;
pub mod error;
pub mod isentropic;
pub mod performance;

// Re-exports
pub use error::{NozzleError, NozzleResult};
pub use isentropic::{
    area_ratio_from_mach, critical_pressure_ratio, expansion_ratio_from_pressure,
    mach_from_expansion, pressure_ratio_from_expansion, pressure_ratio_from_mach,
};
pub use performance::{
    characteristic_velocity, mass_flow, momentum_thrust, thrust, thrust_coefficient,
    vacuum_thrust_coefficient, vandenkerckhove,
};
