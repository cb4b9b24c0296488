//! Scenario files
//!
//! A scenario is a YAML document describing one household: the stored items
//! (assets, liabilities, cash flows) in the shape the web service keeps them,
//! any explicit accounts, and projection settings.
//!
//! ```yaml
//! settings:
//!   projection_years: 30
//!   default_inflation_percent: 2.0
//! assets:
//!   - id: 1
//!     name: House
//!     value: 400000
//!     annual_increase_percent: 3
//! cash_flows:
//!   - id: 1
//!     description: Property Tax
//!     is_income: false
//!     linked_item_type: asset
//!     linked_item_id: 1
//!     percentage: 1.1
//! ```

use std::fs;
use std::path::Path;

use jiff::civil::Date;
use networth_core::model::{
    Account, AccountKind, CashFlowItem, ChangeDirection, ExplicitAccount, Frequency, ItemId,
    ItemKind,
};
use networth_core::{ProjectionOptions, ProjectionRequest};
use serde::{Deserialize, Serialize};

fn default_projection_years() -> i32 {
    30
}

fn default_inflation_percent() -> f64 {
    2.0
}

/// Household-wide defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Used when neither the scenario nor the command line sets `years`
    #[serde(default = "default_projection_years")]
    pub projection_years: i32,
    /// Applied to expenses that do not set their own change rate
    #[serde(default = "default_inflation_percent")]
    pub default_inflation_percent: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            projection_years: default_projection_years(),
            default_inflation_percent: default_inflation_percent(),
        }
    }
}

/// A stored asset or liability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub value: f64,
    #[serde(default)]
    pub annual_increase_percent: f64,
    #[serde(default)]
    pub annual_change_type: ChangeDirection,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl AccountEntry {
    fn into_account(self, kind: AccountKind) -> Account {
        Account {
            id: self.id,
            name: self.name,
            kind,
            category: self.category,
            initial_value: self.value,
            annual_rate_percent: self.annual_increase_percent,
            change_direction: self.annual_change_type,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// A stored income or expense, with the value as the user entered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub id: ItemId,
    pub description: String,
    pub is_income: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
    /// Ignored for linked items
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub annual_change_percent: Option<f64>,
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

impl CashFlowEntry {
    fn into_item(self, settings: &Settings) -> CashFlowItem {
        let change = self.annual_change_percent.unwrap_or(if self.is_income {
            0.0
        } else {
            settings.default_inflation_percent
        });

        let mut item = CashFlowItem::from_entered(
            self.id,
            self.description,
            self.is_income,
            self.value,
            self.frequency,
        )
        .with_change(change);
        item.category = self.category;
        item.linked_item_type = self.linked_item_type;
        item.linked_item_id = self.linked_item_id;
        item.percentage = self.percentage;
        item.start_date = self.start_date;
        item.end_date = self.end_date;
        item
    }
}

/// One household's projection inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub years: Option<i32>,
    #[serde(default)]
    pub assets: Vec<AccountEntry>,
    #[serde(default)]
    pub liabilities: Vec<AccountEntry>,
    #[serde(default)]
    pub cash_flows: Vec<CashFlowEntry>,
    #[serde(default)]
    pub explicit_accounts: Vec<ExplicitAccount>,
    #[serde(default)]
    pub options: ProjectionOptions,
}

/// Error types for scenario loading
#[derive(Debug)]
pub enum ScenarioError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::Io(msg) => write!(f, "IO error: {}", msg),
            ScenarioError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl Scenario {
    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| ScenarioError::Parse(format!("Failed to parse scenario: {}", e)))
    }

    /// Load a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScenarioError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let scenario = Self::from_yaml(&content)?;

        tracing::debug!(
            path = %path.display(),
            assets = scenario.assets.len(),
            liabilities = scenario.liabilities.len(),
            cash_flows = scenario.cash_flows.len(),
            explicit_accounts = scenario.explicit_accounts.len(),
            "Loaded scenario"
        );
        Ok(scenario)
    }

    /// Convert into an engine request
    ///
    /// Years come from `years_override`, then the scenario, then settings.
    pub fn into_request(self, years_override: Option<i32>) -> ProjectionRequest {
        let years = years_override
            .or(self.years)
            .unwrap_or(self.settings.projection_years);
        let settings = self.settings;

        ProjectionRequest {
            years,
            explicit_accounts: self.explicit_accounts,
            assets: self
                .assets
                .into_iter()
                .map(|a| a.into_account(AccountKind::Asset))
                .collect(),
            liabilities: self
                .liabilities
                .into_iter()
                .map(|a| a.into_account(AccountKind::Liability))
                .collect(),
            cash_flows: self
                .cash_flows
                .into_iter()
                .map(|c| c.into_item(&settings))
                .collect(),
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HOUSEHOLD: &str = include_str!("../scenarios/household.yaml");

    #[test]
    fn sample_scenario_parses_and_runs() {
        let scenario = Scenario::from_yaml(HOUSEHOLD).unwrap();
        assert_eq!(scenario.assets.len(), 2);
        assert_eq!(scenario.liabilities.len(), 1);

        let request = scenario.into_request(Some(5));
        assert_eq!(request.years, 5);

        let result = request.run().unwrap();
        assert_eq!(result.year_records.len(), 5);
        assert!(result.is_clean());
    }

    #[test]
    fn settings_fill_in_missing_values() {
        let yaml = r#"
cash_flows:
  - id: 1
    description: Salary
    is_income: true
    frequency: monthly
    value: 5000
  - id: 2
    description: Groceries
    is_income: false
    value: 9000
"#;
        let request = Scenario::from_yaml(yaml).unwrap().into_request(None);

        assert_eq!(request.years, 30);
        assert_eq!(request.cash_flows[0].yearly_value, 60_000.0);
        assert_eq!(request.cash_flows[0].annual_change_percent, 0.0);
        assert_eq!(request.cash_flows[1].yearly_value, 9_000.0);
        assert_eq!(request.cash_flows[1].annual_change_percent, 2.0);
    }

    #[test]
    fn scenario_years_beat_settings_and_override_beats_both() {
        let yaml = "years: 12\nsettings:\n  projection_years: 40\n";

        assert_eq!(Scenario::from_yaml(yaml).unwrap().into_request(None).years, 12);
        assert_eq!(Scenario::from_yaml(yaml).unwrap().into_request(Some(3)).years, 3);
    }

    #[test]
    fn liabilities_get_liability_kind() {
        let yaml = r#"
liabilities:
  - id: 4
    name: Car Loan
    value: 18000
    annual_increase_percent: 6.5
    start_date: "2024-03-01"
"#;
        let request = Scenario::from_yaml(yaml).unwrap().into_request(Some(1));

        let loan = &request.liabilities[0];
        assert_eq!(loan.kind, AccountKind::Liability);
        assert_eq!(loan.id, ItemId(4));
        assert_eq!(loan.annual_rate_percent, 6.5);
        assert_eq!(loan.start_date, Some(jiff::civil::date(2024, 3, 1)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HOUSEHOLD.as_bytes()).unwrap();

        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.explicit_accounts.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Scenario::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ScenarioError::Io(_)));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = Scenario::from_yaml("assets: [ { id: one } ]").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }
}
