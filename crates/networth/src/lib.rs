//! Command-line front end for the `networth_core` projection engine
//!
//! Loads a YAML scenario, runs the projection and prints a table or JSON.

pub mod logging;
pub mod report;
pub mod scenario;

pub use logging::init_logging;
pub use report::{OutputFormat, render};
pub use scenario::{Scenario, ScenarioError};
