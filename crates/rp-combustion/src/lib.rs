//! rp-combustion: combustion property lookup for rocketperf.
//!
//! Provides:
//! - Propellant definitions and a name catalog (CEA-style ids plus aliases)
//! - `CombustionModel` trait for chamber thermochemistry backends
//! - Tabulated chamber-equilibrium backend for common liquid propellant pairs
//! - `CombustionPropertyProvider`, the long-lived handle callers evaluate through
//!
//! # Architecture
//!
//! The `CombustionModel` trait isolates the rest of rocketperf from the backend
//! that produces chamber properties. The shipped backend interpolates
//! precomputed equilibrium data; a binding to a full equilibrium solver can be
//! added as another implementation without touching callers.
//!
//! # Example
//!
//! ```
//! use rp_combustion::CombustionPropertyProvider;
//!
//! let provider = CombustionPropertyProvider::tabulated();
//! let props = provider.evaluate("LOX", "C2H5OH", 10.0, 1.45, 2.3).unwrap();
//! assert!(props.c_star_mps > 1000.0);
//! ```

pub mod catalog;
pub mod error;
pub mod model;
pub mod propellant;
pub mod properties;
pub mod provider;
pub mod tabulated;

// Re-exports for ergonomics
pub use catalog::{PropellantCatalogEntry, filter_catalog, lookup, propellant_catalog};
pub use error::{CombustionError, CombustionResult};
pub use model::CombustionModel;
pub use propellant::{Propellant, PropellantRole};
pub use properties::{CombustionProperties, CombustionQuery};
pub use provider::{CombustionPropertyProvider, ProviderUnits};
pub use tabulated::TabulatedCombustionModel;
