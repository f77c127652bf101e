//! rp-core: stable foundation for rocketperf.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + float checks)
//! - error (argument and numeric errors)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RpError, RpResult};
pub use numeric::*;
pub use units::*;
