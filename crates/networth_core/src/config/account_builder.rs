//! Account Builder DSL
//!
//! ```ignore
//! use networth_core::config::AccountBuilder;
//!
//! let house = AccountBuilder::asset("House").value(350_000.0).rate(3.0);
//! let car = AccountBuilder::asset("Car").value(25_000.0).depreciating(15.0);
//! let mortgage = AccountBuilder::liability("Mortgage").value(280_000.0).rate(4.2);
//! ```

use jiff::civil::Date;

use crate::model::{Account, AccountKind, ChangeDirection, ItemId};

/// Builder for assets and liabilities
#[derive(Debug, Clone)]
pub struct AccountBuilder {
    pub(crate) name: String,
    pub(crate) kind: AccountKind,
    category: Option<String>,
    value: f64,
    rate: f64,
    direction: ChangeDirection,
    start_date: Option<Date>,
    end_date: Option<Date>,
}

impl AccountBuilder {
    #[must_use]
    pub fn asset(name: impl Into<String>) -> Self {
        Self::new(name.into(), AccountKind::Asset)
    }

    #[must_use]
    pub fn liability(name: impl Into<String>) -> Self {
        Self::new(name.into(), AccountKind::Liability)
    }

    fn new(name: String, kind: AccountKind) -> Self {
        Self {
            name,
            kind,
            category: None,
            value: 0.0,
            rate: 0.0,
            direction: ChangeDirection::Increase,
            start_date: None,
            end_date: None,
        }
    }

    /// Current value (or outstanding principal)
    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Annual growth or interest rate, in percent
    #[must_use]
    pub fn rate(mut self, percent: f64) -> Self {
        self.rate = percent;
        self.direction = ChangeDirection::Increase;
        self
    }

    /// Annual decline rate, in percent
    #[must_use]
    pub fn depreciating(mut self, percent: f64) -> Self {
        self.rate = percent;
        self.direction = ChangeDirection::Decrease;
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn valid_between(mut self, start: Option<Date>, end: Option<Date>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub(crate) fn build(self, id: ItemId) -> Account {
        Account {
            id,
            name: self.name,
            kind: self.kind,
            category: self.category,
            initial_value: self.value,
            annual_rate_percent: self.rate,
            change_direction: self.direction,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
