//! Income and expense items
//!
//! A cash-flow item is either *static*, with its `yearly_value` entered
//! directly, or *dynamic*, deriving its value as a percentage of another item.
//! The target kind decides when the derivation happens:
//!
//! - income/expense targets form chains resolved once before the run
//!   ([`LinkCadence::StaticChain`])
//! - asset/liability targets follow a moving balance and are re-derived every
//!   year ([`LinkCadence::PerYearBalance`])

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::accounts::ItemKind;
use super::ids::ItemId;

/// How often an entered amount recurs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    #[default]
    Yearly,
}

impl Frequency {
    /// Normalize an entered amount to a yearly amount
    #[must_use]
    pub fn to_yearly(self, value: f64) -> f64 {
        match self {
            Frequency::Monthly => value * 12.0,
            Frequency::Yearly => value,
        }
    }
}

/// When a linked value is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkCadence {
    /// Derived once from another cash-flow item before the run starts
    StaticChain,
    /// Derived every year from the target's provisional balance
    PerYearBalance,
}

/// Derivation of a cash-flow value from another item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Linkage {
    pub target_type: ItemKind,
    pub target_id: ItemId,
    /// Not range-checked; values outside [0, 100] pass through
    pub percentage: f64,
}

impl Linkage {
    #[must_use]
    pub fn cadence(&self) -> LinkCadence {
        if self.target_type.carries_balance() {
            LinkCadence::PerYearBalance
        } else {
            LinkCadence::StaticChain
        }
    }

    /// Apply the percentage to a target value
    #[must_use]
    pub fn derive(&self, target_value: f64) -> f64 {
        target_value * (self.percentage / 100.0)
    }
}

/// An income or expense item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowItem {
    pub id: ItemId,
    /// Display name; unique within a run
    pub description: String,
    pub is_income: bool,
    #[serde(default)]
    pub category: Option<String>,
    /// Stored baseline, authoritative for static items
    #[serde(default)]
    pub yearly_value: f64,
    /// Increase rate for income, inflation rate for expenses
    #[serde(default)]
    pub annual_change_percent: f64,
    #[serde(default)]
    pub linked_item_type: Option<ItemKind>,
    #[serde(default)]
    pub linked_item_id: Option<ItemId>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl CashFlowItem {
    #[must_use]
    pub fn new(
        id: ItemId,
        description: impl Into<String>,
        is_income: bool,
        yearly_value: f64,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            is_income,
            category: None,
            yearly_value,
            annual_change_percent: 0.0,
            linked_item_type: None,
            linked_item_id: None,
            percentage: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Create an item from an amount entered at the given frequency
    #[must_use]
    pub fn from_entered(
        id: ItemId,
        description: impl Into<String>,
        is_income: bool,
        value: f64,
        frequency: Frequency,
    ) -> Self {
        Self::new(id, description, is_income, frequency.to_yearly(value))
    }

    /// Derive this item's value from another item
    #[must_use]
    pub fn linked_to(mut self, target_type: ItemKind, target_id: ItemId, percentage: f64) -> Self {
        self.linked_item_type = Some(target_type);
        self.linked_item_id = Some(target_id);
        self.percentage = Some(percentage);
        self
    }

    #[must_use]
    pub fn with_change(mut self, annual_change_percent: f64) -> Self {
        self.annual_change_percent = annual_change_percent;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ItemKind {
        if self.is_income {
            ItemKind::Income
        } else {
            ItemKind::Expense
        }
    }

    /// The item's linkage, present only when all three link fields are set
    #[must_use]
    pub fn linkage(&self) -> Option<Linkage> {
        match (self.linked_item_type, self.linked_item_id, self.percentage) {
            (Some(target_type), Some(target_id), Some(percentage)) => Some(Linkage {
                target_type,
                target_id,
                percentage,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.linkage().is_some()
    }

    /// Cadence of this item's linkage, `None` for static items
    #[must_use]
    pub fn cadence(&self) -> Option<LinkCadence> {
        self.linkage().map(|link| link.cadence())
    }
}
