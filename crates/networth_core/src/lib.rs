//! Net-worth projection library
//!
//! This crate projects a household balance sheet forward year by year.
//! It supports:
//! - Assets and liabilities with compounding growth (or decline)
//! - Income and expense items entered statically or derived from another item
//! - Chains of derived cash flows resolved once before the run
//! - Cash flows tied to an asset or liability balance, re-derived every year
//! - Caller-supplied explicit accounts merged with stored items by name
//!
//! # Builder DSL
//!
//! ```ignore
//! use networth_core::config::{AccountBuilder, CashFlowBuilder, ProjectionBuilder};
//!
//! let request = ProjectionBuilder::new()
//!     .years(30)
//!     .account(AccountBuilder::asset("House").value(400_000.0).rate(3.0))
//!     .account(AccountBuilder::liability("Mortgage").value(250_000.0).rate(4.5))
//!     .cash_flow(CashFlowBuilder::income("Salary").monthly(7_500.0).change(2.5))
//!     .cash_flow(CashFlowBuilder::expense("Property Tax").percent_of_asset("House", 1.1))
//!     .build()?;
//!
//! let result = request.run()?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod error;
pub mod resolver;
pub mod simulation;
pub mod simulation_state;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{
    AccountBuilder, CashFlowBuilder, ProjectionBuilder, ProjectionOptions, ProjectionRequest,
};
pub use error::{BuildError, LinkageIssue, ProjectionError};
pub use simulation::{project, project_batch, project_with_options};
