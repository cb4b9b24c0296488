//! Projection configuration
//!
//! The main configuration type is `ProjectionRequest`, which bundles every
//! input of a run. It deserializes from the shape the surrounding service
//! stores, and the builder DSL assembles one in code:
//!
//! ```ignore
//! use networth_core::config::{AccountBuilder, CashFlowBuilder, ProjectionBuilder};
//!
//! let request = ProjectionBuilder::new()
//!     .years(20)
//!     .account(AccountBuilder::asset("Brokerage").value(50_000.0).rate(6.0))
//!     .cash_flow(CashFlowBuilder::income("Salary").yearly(85_000.0))
//!     .cash_flow(CashFlowBuilder::expense("Retirement Savings").percent_of_income("Salary", 12.0))
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Account, CashFlowItem, ExplicitAccount, ProjectionResult};
use crate::simulation::project_with_options;

pub mod account_builder;
pub mod builder;
pub mod cash_flow_builder;

pub use account_builder::AccountBuilder;
pub use builder::ProjectionBuilder;
pub use cash_flow_builder::CashFlowBuilder;

/// Behavior switches for a projection run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    /// Fail the run on the first unresolvable linkage instead of valuing it at zero
    #[serde(default)]
    pub strict_linkage: bool,
}

/// Everything a projection run needs
///
/// All collections are owner-scoped snapshots; the engine never mutates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// Number of years to simulate; negative values are rejected
    pub years: i32,
    #[serde(default)]
    pub explicit_accounts: Vec<ExplicitAccount>,
    #[serde(default)]
    pub assets: Vec<Account>,
    #[serde(default)]
    pub liabilities: Vec<Account>,
    #[serde(default)]
    pub cash_flows: Vec<CashFlowItem>,
    #[serde(default)]
    pub options: ProjectionOptions,
}

impl ProjectionRequest {
    #[must_use]
    pub fn new(years: i32) -> Self {
        Self {
            years,
            ..Default::default()
        }
    }

    /// Run the projection described by this request
    pub fn run(&self) -> Result<ProjectionResult> {
        project_with_options(
            self.years,
            &self.explicit_accounts,
            &self.assets,
            &self.liabilities,
            &self.cash_flows,
            &self.options,
        )
    }
}
