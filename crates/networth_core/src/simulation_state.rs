use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{LinkageIssue, ProjectionError, Result};
use crate::model::{
    Account, AccountValue, CashFlowItem, ChangeDirection, Diagnostic, ExplicitAccount, ItemId,
    ItemKind, LinkCadence,
};
use crate::resolver::ChainResolution;

/// Contribution, growth and ending balance of one account over one year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearStep {
    pub contribution: f64,
    pub growth: f64,
    pub ending_balance: f64,
}

/// A cash flow whose value follows an asset or liability balance
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceLink {
    /// Name of the target account, `None` when the target does not exist
    pub target: Option<String>,
    pub percentage: f64,
    /// Value derived for the current year
    pub yearly_value: f64,
}

/// An entry of the combined working set
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingAccount {
    pub name: String,
    pub kind: ItemKind,
    pub initial_balance: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub change_direction: ChangeDirection,
    pub link: Option<BalanceLink>,
}

impl WorkingAccount {
    fn from_account(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            kind: account.kind.into(),
            initial_balance: account.initial_value,
            monthly_contribution: 0.0,
            annual_rate_percent: account.annual_rate_percent,
            change_direction: account.change_direction,
            link: None,
        }
    }

    fn from_cash_flow(item: &CashFlowItem, yearly_value: f64, link: Option<BalanceLink>) -> Self {
        Self {
            name: item.description.clone(),
            kind: item.kind(),
            initial_balance: 0.0,
            monthly_contribution: yearly_value / 12.0,
            annual_rate_percent: item.annual_change_percent,
            change_direction: ChangeDirection::Increase,
            link,
        }
    }

    fn from_explicit(account: &ExplicitAccount) -> Self {
        Self {
            name: account.name.clone(),
            kind: account.kind,
            initial_balance: account.initial_balance,
            monthly_contribution: account.monthly_contribution,
            annual_rate_percent: account.annual_increase_percent,
            change_direction: account.annual_change_type,
            link: None,
        }
    }

    /// Annual rate as a fraction, negated for declining accounts
    #[must_use]
    pub fn effective_rate(&self) -> f64 {
        self.change_direction
            .signed(self.annual_rate_percent / 100.0)
    }

    /// Annual contribution, negative for liabilities and expenses
    #[must_use]
    pub fn signed_contribution(&self) -> f64 {
        let annual = self.monthly_contribution * 12.0;
        if self.kind.is_outflow() { -annual } else { annual }
    }

    /// Advance `balance` by one year
    ///
    /// Contributions are assumed to arrive evenly through the year, so they
    /// earn half a year of growth.
    #[must_use]
    pub fn step(&self, balance: f64) -> YearStep {
        let rate = self.effective_rate();
        let contribution = self.signed_contribution();
        let growth = balance * rate + contribution * rate * 0.5;
        YearStep {
            contribution,
            growth,
            ending_balance: balance + contribution + growth,
        }
    }

    /// The value reported for this account in a year record
    #[must_use]
    pub fn reported_value(&self, step: &YearStep) -> f64 {
        if self.kind.carries_balance() {
            step.ending_balance
        } else {
            step.contribution
        }
    }

    #[must_use]
    pub fn follows_balance(&self) -> bool {
        self.link.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningTotals {
    pub contribution: f64,
    pub growth: f64,
}

/// Committed values of one year, before they become a record
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedYear {
    pub values: Vec<AccountValue>,
    pub contributions: f64,
    pub growth: f64,
    pub total_value: f64,
}

/// Runtime state for a projection, private to one invocation
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Repository items first, then the explicit accounts that survived de-duplication
    pub accounts: Vec<WorkingAccount>,
    /// Committed balances, the starting point of the next year
    balances: FxHashMap<String, f64>,
    pub totals: RunningTotals,
    /// `total_value` of the last committed year
    pub previous_total: f64,
    pub diagnostics: Vec<Diagnostic>,
}

impl SimulationState {
    /// Combine stored items and explicit accounts into one working set
    ///
    /// Fails when stored items share a name, or explicit accounts do among
    /// themselves. An explicit account named like a stored item is dropped.
    pub fn build(
        explicit_accounts: &[ExplicitAccount],
        assets: &[Account],
        liabilities: &[Account],
        cash_flows: &[CashFlowItem],
        chains: &ChainResolution,
    ) -> Result<Self> {
        let mut diagnostics = Vec::new();
        let mut accounts = Vec::new();
        let mut names = FxHashSet::default();

        let mut balance_targets: FxHashMap<(ItemKind, ItemId), &str> = FxHashMap::default();
        for account in assets.iter().chain(liabilities) {
            if !names.insert(account.name.as_str()) {
                return Err(ProjectionError::DuplicateName(account.name.clone()));
            }
            let kind = ItemKind::from(account.kind);
            if balance_targets
                .insert((kind, account.id), account.name.as_str())
                .is_some()
            {
                return Err(ProjectionError::DuplicateId {
                    kind,
                    id: account.id,
                });
            }
            accounts.push(WorkingAccount::from_account(account));
        }

        let mut cash_flow_ids = FxHashSet::default();
        for item in cash_flows {
            if !names.insert(item.description.as_str()) {
                return Err(ProjectionError::DuplicateName(item.description.clone()));
            }
            if !cash_flow_ids.insert(item.id) {
                return Err(ProjectionError::DuplicateId {
                    kind: item.kind(),
                    id: item.id,
                });
            }

            let working = match item.linkage() {
                Some(link) if link.cadence() == LinkCadence::PerYearBalance => {
                    let target = balance_targets
                        .get(&(link.target_type, link.target_id))
                        .map(|name| (*name).to_string());
                    if target.is_none() {
                        diagnostics.push(Diagnostic::Linkage(LinkageIssue::MissingTarget {
                            item: item.id,
                            target_type: link.target_type,
                            target_id: link.target_id,
                        }));
                    }
                    let link = BalanceLink {
                        target,
                        percentage: link.percentage,
                        yearly_value: item.yearly_value,
                    };
                    WorkingAccount::from_cash_flow(item, item.yearly_value, Some(link))
                }
                Some(_) => {
                    WorkingAccount::from_cash_flow(item, chains.yearly_value(item.id), None)
                }
                None => WorkingAccount::from_cash_flow(item, item.yearly_value, None),
            };
            accounts.push(working);
        }

        let mut explicit_names = FxHashSet::default();
        for account in explicit_accounts {
            if !explicit_names.insert(account.name.as_str()) {
                return Err(ProjectionError::DuplicateName(account.name.clone()));
            }
            if names.contains(account.name.as_str()) {
                diagnostics.push(Diagnostic::ShadowedExplicitAccount {
                    name: account.name.clone(),
                });
                continue;
            }
            accounts.push(WorkingAccount::from_explicit(account));
        }

        let balances: FxHashMap<String, f64> = accounts
            .iter()
            .map(|a| (a.name.clone(), a.initial_balance))
            .collect();
        let previous_total = accounts.iter().map(|a| a.initial_balance).sum();

        Ok(Self {
            accounts,
            balances,
            totals: RunningTotals::default(),
            previous_total,
            diagnostics,
        })
    }

    /// Committed balance of a named account
    #[must_use]
    pub fn balance(&self, name: &str) -> Option<f64> {
        self.balances.get(name).copied()
    }

    fn initial_balance(&self, name: &str) -> Option<f64> {
        self.accounts
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.initial_balance)
    }

    /// Phase 1: project every account that does not follow a balance
    ///
    /// Results go to a scratch view; committed balances are untouched.
    #[must_use]
    pub fn provisional_balances(&self) -> FxHashMap<String, f64> {
        self.accounts
            .iter()
            .filter(|account| !account.follows_balance())
            .map(|account| {
                let start = self.balance(&account.name).unwrap_or(0.0);
                (account.name.clone(), account.step(start).ending_balance)
            })
            .collect()
    }

    /// Phase 2: derive balance-linked cash flows from the scratch view
    pub fn relink(&mut self, scratch: &FxHashMap<String, f64>) {
        let mut derived = Vec::new();
        for (index, account) in self.accounts.iter().enumerate() {
            let Some(link) = &account.link else {
                continue;
            };
            let target_balance = link
                .target
                .as_deref()
                .and_then(|target| {
                    scratch
                        .get(target)
                        .copied()
                        .or_else(|| self.initial_balance(target))
                })
                .unwrap_or(0.0);
            derived.push((index, target_balance * (link.percentage / 100.0)));
        }

        for (index, yearly_value) in derived {
            if let Some(link) = self.accounts[index].link.as_mut() {
                link.yearly_value = yearly_value;
            }
        }
    }

    /// Phase 3: finalize contributions and commit every account
    pub fn commit(&mut self) -> CommittedYear {
        let mut values = Vec::with_capacity(self.accounts.len());
        let mut contributions = 0.0;
        let mut growth = 0.0;
        let mut total_value = 0.0;

        for account in &mut self.accounts {
            if let Some(link) = &account.link {
                account.monthly_contribution = link.yearly_value / 12.0;
            }

            let start = self.balances.get(&account.name).copied().unwrap_or(0.0);
            let step = account.step(start);
            self.balances
                .insert(account.name.clone(), step.ending_balance);

            let value = account.reported_value(&step);
            contributions += step.contribution;
            growth += step.growth;
            total_value += value;
            values.push(AccountValue {
                name: account.name.clone(),
                kind: account.kind,
                value,
            });
        }

        self.totals.contribution += contributions;
        self.totals.growth += growth;
        self.previous_total = total_value;

        CommittedYear {
            values,
            contributions,
            growth,
            total_value,
        }
    }
}
