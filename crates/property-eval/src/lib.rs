//! Development feasibility calculator for real-estate projects.
//!
//! [`evaluation`] owns the project inputs, the unit-mix parser and the cost and
//! return formulas. [`market`] wraps the two external lookups (Census median
//! household income and a rent estimate) behind a fetch-or-fallback contract.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod market;
pub mod telemetry;
