//! rp-engine: engine design point state and derived performance.
//!
//! An `EngineDesign` holds one design point: propellants, mixture ratio,
//! chamber pressure and nozzle geometry. One call to a
//! `CombustionPropertyProvider` fills in the chamber thermochemistry; thrust,
//! mass flow and exit pressure are then recomputed from stored state on every
//! query.
//!
//! # Example
//!
//! ```
//! use rp_combustion::CombustionPropertyProvider;
//! use rp_core::units::{circle_area, m, pa};
//! use rp_engine::EngineDesign;
//!
//! let provider = CombustionPropertyProvider::tabulated();
//! let mut design = EngineDesign::new();
//! design
//!     .run_design(&provider, "LOX", "C2H5OH", 1.45, pa(1.0e7), circle_area(m(0.01)), 2.3)
//!     .unwrap();
//!
//! let mdot = design.mass_flow_rate().unwrap();
//! let thrust = design.thrust(pa(0.0)).unwrap();
//! assert!(mdot.value > 0.0 && thrust.value > 0.0);
//! ```

pub mod design;
pub mod error;
pub mod report;
pub mod sweep;

pub use design::{DesignInputs, EngineDesign, Thermochemistry};
pub use error::{EngineError, EngineResult};
pub use report::PerformanceReport;
pub use sweep::{
    SweepDefinition, SweepParameter, SweepPoint, SweepResult, SweepSpacing, run_sweep,
};
