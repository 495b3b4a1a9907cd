//! Model registration and inherent-risk assessment for the MRM inventory.
//!
//! The crate is organized around the `registry` module: raw registration
//! input is normalized into a canonical [`registry::ModelRecord`], scored by
//! the versioned [`registry::scoring::ScoringEngine`], and exported as a
//! self-contained JSON artifact. Surrounding modules carry the service
//! plumbing (configuration, telemetry, top-level error type).

pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;
