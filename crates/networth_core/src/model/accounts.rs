//! Account definitions
//!
//! Accounts are the balance-carrying side of the household: assets that
//! appreciate or depreciate and liabilities that accrue interest and are paid
//! down. Explicit accounts are supplied directly by the caller and may carry
//! any of the four item kinds.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ids::ItemId;

/// The closed set of item kinds that take part in a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Asset,
    Liability,
    Income,
    Expense,
}

impl ItemKind {
    /// Liabilities and expenses take money out: their contributions are negated.
    #[must_use]
    pub fn is_outflow(self) -> bool {
        matches!(self, ItemKind::Liability | ItemKind::Expense)
    }

    /// Assets and liabilities carry a balance; income and expense only a flow.
    #[must_use]
    pub fn carries_balance(self) -> bool {
        matches!(self, ItemKind::Asset | ItemKind::Liability)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Asset => "asset",
            ItemKind::Liability => "liability",
            ItemKind::Income => "income",
            ItemKind::Expense => "expense",
        }
    }
}

/// Balance-carrying subset of [`ItemKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Asset,
    Liability,
}

impl From<AccountKind> for ItemKind {
    fn from(kind: AccountKind) -> Self {
        match kind {
            AccountKind::Asset => ItemKind::Asset,
            AccountKind::Liability => ItemKind::Liability,
        }
    }
}

/// Sign applied to an annual rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    #[default]
    Increase,
    Decrease,
}

impl ChangeDirection {
    /// Apply the direction to a non-negative rate
    #[must_use]
    pub fn signed(self, rate: f64) -> f64 {
        match self {
            ChangeDirection::Increase => rate,
            ChangeDirection::Decrease => -rate,
        }
    }
}

/// An asset or liability sourced from the household's stored items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: ItemId,
    /// Unique within a run; also the key of the projected series
    pub name: String,
    pub kind: AccountKind,
    #[serde(default)]
    pub category: Option<String>,
    pub initial_value: f64,
    #[serde(default)]
    pub annual_rate_percent: f64,
    #[serde(default)]
    pub change_direction: ChangeDirection,
    /// Validity window, carried through but not enforced
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl Account {
    #[must_use]
    pub fn asset(id: ItemId, name: impl Into<String>, initial_value: f64) -> Self {
        Self::new(id, name, AccountKind::Asset, initial_value)
    }

    #[must_use]
    pub fn liability(id: ItemId, name: impl Into<String>, initial_value: f64) -> Self {
        Self::new(id, name, AccountKind::Liability, initial_value)
    }

    fn new(id: ItemId, name: impl Into<String>, kind: AccountKind, initial_value: f64) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            category: None,
            initial_value,
            annual_rate_percent: 0.0,
            change_direction: ChangeDirection::Increase,
            start_date: None,
            end_date: None,
        }
    }

    /// Set the annual rate and its direction
    #[must_use]
    pub fn with_rate(mut self, annual_rate_percent: f64, direction: ChangeDirection) -> Self {
        self.annual_rate_percent = annual_rate_percent;
        self.change_direction = direction;
        self
    }
}

/// An account supplied directly by the caller rather than from stored items
///
/// Explicit accounts whose name collides with a stored item are dropped so the
/// same money is not counted twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitAccount {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub initial_balance: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    #[serde(default)]
    pub annual_increase_percent: f64,
    #[serde(default)]
    pub annual_change_type: ChangeDirection,
}

impl ExplicitAccount {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: ItemKind,
        initial_balance: f64,
        monthly_contribution: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            initial_balance,
            monthly_contribution,
            annual_increase_percent: 0.0,
            annual_change_type: ChangeDirection::Increase,
        }
    }

    #[must_use]
    pub fn with_rate(mut self, annual_increase_percent: f64, direction: ChangeDirection) -> Self {
        self.annual_increase_percent = annual_increase_percent;
        self.annual_change_type = direction;
        self
    }
}
