//! simcheck - simulation-versus-measurement analysis for machine-tool test data
//!
//! This library compares simulated component parameters (spindle boxes, beds,
//! tool turrets) against bench measurements, estimates trends over recorded
//! series and summarizes value distributions. All numeric routines are pure
//! functions over in-memory slices and are safe to call from any thread.

pub mod align;
pub mod analysis;
pub mod cli;
pub mod comparison;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod ingest;
pub mod json_output;
pub mod sample;
pub mod stats;
pub mod trend;

pub use error::{AnalysisError, Result};
