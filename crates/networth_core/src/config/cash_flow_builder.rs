//! Cash Flow Builder DSL
//!
//! Link targets are named rather than numbered; the projection builder
//! resolves names to ids when the request is built.
//!
//! ```ignore
//! use networth_core::config::CashFlowBuilder;
//!
//! let salary = CashFlowBuilder::income("Salary").monthly(7_000.0).change(3.0);
//! let groceries = CashFlowBuilder::expense("Groceries").monthly(800.0).change(2.0);
//! let savings = CashFlowBuilder::expense("401k").percent_of_income("Salary", 10.0);
//! let tax = CashFlowBuilder::expense("Property Tax").percent_of_asset("House", 1.2);
//! ```

use crate::model::{CashFlowItem, Frequency, ItemId, ItemKind};

#[derive(Debug, Clone)]
pub(crate) struct PendingLink {
    pub target_type: ItemKind,
    pub target: String,
    pub percentage: f64,
}

/// Builder for income and expense items
#[derive(Debug, Clone)]
pub struct CashFlowBuilder {
    pub(crate) description: String,
    pub(crate) is_income: bool,
    category: Option<String>,
    yearly_value: f64,
    change: f64,
    pub(crate) link: Option<PendingLink>,
}

impl CashFlowBuilder {
    #[must_use]
    pub fn income(description: impl Into<String>) -> Self {
        Self::new(description.into(), true)
    }

    #[must_use]
    pub fn expense(description: impl Into<String>) -> Self {
        Self::new(description.into(), false)
    }

    fn new(description: String, is_income: bool) -> Self {
        Self {
            description,
            is_income,
            category: None,
            yearly_value: 0.0,
            change: 0.0,
            link: None,
        }
    }

    #[must_use]
    pub fn amount(mut self, value: f64, frequency: Frequency) -> Self {
        self.yearly_value = frequency.to_yearly(value);
        self
    }

    #[must_use]
    pub fn monthly(self, value: f64) -> Self {
        self.amount(value, Frequency::Monthly)
    }

    #[must_use]
    pub fn yearly(self, value: f64) -> Self {
        self.amount(value, Frequency::Yearly)
    }

    /// Annual increase (income) or inflation (expense), in percent
    #[must_use]
    pub fn change(mut self, percent: f64) -> Self {
        self.change = percent;
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Derive the value from a named item of the given kind
    #[must_use]
    pub fn percent_of(
        mut self,
        target_type: ItemKind,
        target: impl Into<String>,
        percentage: f64,
    ) -> Self {
        self.link = Some(PendingLink {
            target_type,
            target: target.into(),
            percentage,
        });
        self
    }

    #[must_use]
    pub fn percent_of_asset(self, target: impl Into<String>, percentage: f64) -> Self {
        self.percent_of(ItemKind::Asset, target, percentage)
    }

    #[must_use]
    pub fn percent_of_liability(self, target: impl Into<String>, percentage: f64) -> Self {
        self.percent_of(ItemKind::Liability, target, percentage)
    }

    #[must_use]
    pub fn percent_of_income(self, target: impl Into<String>, percentage: f64) -> Self {
        self.percent_of(ItemKind::Income, target, percentage)
    }

    #[must_use]
    pub fn percent_of_expense(self, target: impl Into<String>, percentage: f64) -> Self {
        self.percent_of(ItemKind::Expense, target, percentage)
    }

    /// Build with the link target already resolved to an id
    pub(crate) fn build(self, id: ItemId, target_id: Option<ItemId>) -> CashFlowItem {
        let mut item = CashFlowItem::new(id, self.description, self.is_income, self.yearly_value)
            .with_change(self.change);
        item.category = self.category;
        if let (Some(link), Some(target_id)) = (self.link, target_id) {
            item = item.linked_to(link.target_type, target_id, link.percentage);
        }
        item
    }
}
