//! Projection Builder
//!
//! The ProjectionBuilder provides a fluent API for creating requests with
//! automatic ID assignment and name-based link targets.
//!
//! # Example
//!
//! ```ignore
//! use networth_core::config::{AccountBuilder, CashFlowBuilder, ProjectionBuilder};
//! use networth_core::model::{ExplicitAccount, ItemKind};
//!
//! let request = ProjectionBuilder::new()
//!     .years(25)
//!     .account(AccountBuilder::asset("House").value(400_000.0).rate(3.0))
//!     .account(AccountBuilder::liability("Mortgage").value(300_000.0).rate(4.0))
//!     .cash_flow(CashFlowBuilder::income("Salary").monthly(8_000.0).change(2.0))
//!     .cash_flow(CashFlowBuilder::expense("Insurance").percent_of_asset("House", 0.4))
//!     .explicit_account(ExplicitAccount::new("Roth IRA", ItemKind::Asset, 20_000.0, 500.0))
//!     .build()?;
//! ```

use rustc_hash::FxHashMap;

use super::ProjectionRequest;
use super::account_builder::AccountBuilder;
use super::cash_flow_builder::CashFlowBuilder;
use crate::error::BuildError;
use crate::model::{AccountKind, ExplicitAccount, ItemId, ItemKind};

/// Builder for creating projection requests
#[derive(Debug, Clone, Default)]
pub struct ProjectionBuilder {
    request: ProjectionRequest,
    pending_accounts: Vec<AccountBuilder>,
    pending_cash_flows: Vec<CashFlowBuilder>,
}

impl ProjectionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn years(mut self, years: i32) -> Self {
        self.request.years = years;
        self
    }

    /// Fail the run on unresolvable linkages instead of valuing them at zero
    #[must_use]
    pub fn strict_linkage(mut self, strict: bool) -> Self {
        self.request.options.strict_linkage = strict;
        self
    }

    #[must_use]
    pub fn account(mut self, account: AccountBuilder) -> Self {
        self.pending_accounts.push(account);
        self
    }

    #[must_use]
    pub fn cash_flow(mut self, cash_flow: CashFlowBuilder) -> Self {
        self.pending_cash_flows.push(cash_flow);
        self
    }

    #[must_use]
    pub fn explicit_account(mut self, account: ExplicitAccount) -> Self {
        self.request.explicit_accounts.push(account);
        self
    }

    /// Assign ids and resolve link targets by name
    ///
    /// Assets, liabilities and cash flows are numbered from 1 in the order
    /// they were added, each in its own id space.
    pub fn build(mut self) -> Result<ProjectionRequest, BuildError> {
        let mut ids: FxHashMap<(ItemKind, String), ItemId> = FxHashMap::default();

        let mut next_asset = 1;
        let mut next_liability = 1;
        for account in self.pending_accounts {
            let counter = match account.kind {
                AccountKind::Asset => &mut next_asset,
                AccountKind::Liability => &mut next_liability,
            };
            let id = ItemId(*counter);
            *counter += 1;

            ids.entry((account.kind.into(), account.name.clone()))
                .or_insert(id);
            let built = account.build(id);
            match built.kind {
                AccountKind::Asset => self.request.assets.push(built),
                AccountKind::Liability => self.request.liabilities.push(built),
            }
        }

        let mut cash_flow_ids = Vec::with_capacity(self.pending_cash_flows.len());
        let mut next_cash_flow = 1;
        for cash_flow in &self.pending_cash_flows {
            let kind = if cash_flow.is_income {
                ItemKind::Income
            } else {
                ItemKind::Expense
            };
            let id = ItemId(next_cash_flow);
            next_cash_flow += 1;

            ids.entry((kind, cash_flow.description.clone()))
                .or_insert(id);
            cash_flow_ids.push(id);
        }

        for (cash_flow, id) in self.pending_cash_flows.into_iter().zip(cash_flow_ids) {
            let target_id = match &cash_flow.link {
                None => None,
                Some(link) => {
                    let key = (link.target_type, link.target.clone());
                    let Some(id) = ids.get(&key) else {
                        return Err(BuildError::UnknownLinkTarget {
                            item: cash_flow.description,
                            target_type: link.target_type,
                            target: link.target.clone(),
                        });
                    };
                    Some(*id)
                }
            };
            self.request
                .cash_flows
                .push(cash_flow.build(id, target_id));
        }

        Ok(self.request)
    }
}
