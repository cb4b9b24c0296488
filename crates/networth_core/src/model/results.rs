//! Projection results
//!
//! A run produces one [`YearRecord`] per simulated year plus summary totals.
//! Records serialize to the flat shape consumers chart directly:
//! `Year`, `StartingValue`, one `<name>_Value` column per account, then the
//! yearly and running totals.

use std::fmt;

use serde::Serialize;
use serde::ser::SerializeMap;

use super::accounts::ItemKind;
use crate::error::LinkageIssue;

/// One account's value in a year
///
/// Assets and liabilities report their ending balance; income and expenses
/// report the signed annual flow amount.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountValue {
    pub name: String,
    pub kind: ItemKind,
    pub value: f64,
}

/// Outcome of one simulated year
#[derive(Debug, Clone, PartialEq)]
pub struct YearRecord {
    pub year: u32,
    /// Previous year's `total_value`, or the sum of opening balances in year 1
    pub starting_value: f64,
    /// In working-set order
    pub values: Vec<AccountValue>,
    /// Contributions made during this year alone
    pub contributions: f64,
    /// Growth earned during this year alone
    pub growth: f64,
    /// Running sum of contributions up to and including this year
    pub total_contribution: f64,
    /// Running sum of growth up to and including this year
    pub total_growth: f64,
    /// Sum of this year's balances and flow amounts
    pub total_value: f64,
}

impl YearRecord {
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|v| v.name == name).map(|v| v.value)
    }
}

impl Serialize for YearRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 7))?;
        map.serialize_entry("Year", &self.year)?;
        map.serialize_entry("StartingValue", &self.starting_value)?;
        for value in &self.values {
            map.serialize_entry(&format!("{}_Value", value.name), &value.value)?;
        }
        map.serialize_entry("Contributions", &self.contributions)?;
        map.serialize_entry("Growth", &self.growth)?;
        map.serialize_entry("Total_Contribution", &self.total_contribution)?;
        map.serialize_entry("Total_Growth", &self.total_growth)?;
        map.serialize_entry("Total_Value", &self.total_value)?;
        map.end()
    }
}

/// Something the engine worked around instead of failing the run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A linked cash flow fell back to zero
    Linkage(LinkageIssue),
    /// An explicit account was dropped because a stored item has its name
    ShadowedExplicitAccount { name: String },
}

impl Diagnostic {
    #[must_use]
    pub fn linkage_issue(&self) -> Option<&LinkageIssue> {
        match self {
            Diagnostic::Linkage(issue) => Some(issue),
            Diagnostic::ShadowedExplicitAccount { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Linkage(issue) => write!(f, "{issue}; valued at 0.0"),
            Diagnostic::ShadowedExplicitAccount { name } => {
                write!(f, "explicit account {name:?} ignored, a stored item has the same name")
            }
        }
    }
}

/// Complete results from a projection run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub final_value: f64,
    pub total_contributed: f64,
    pub total_growth: f64,
    pub year_records: Vec<YearRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ProjectionResult {
    /// Value of a named account in the last simulated year
    #[must_use]
    pub fn final_account_value(&self, name: &str) -> Option<f64> {
        self.year_records.last().and_then(|r| r.value_of(name))
    }

    /// Year-by-year values of a named account
    pub fn series<'a>(&'a self, name: &'a str) -> impl Iterator<Item = f64> + 'a {
        self.year_records.iter().filter_map(move |r| r.value_of(name))
    }

    /// All linkage issues reported during the run
    pub fn linkage_issues(&self) -> impl Iterator<Item = &LinkageIssue> {
        self.diagnostics.iter().filter_map(Diagnostic::linkage_issue)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
