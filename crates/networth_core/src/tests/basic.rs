//! Basic projection mechanics tests
//!
//! These tests verify:
//! - Empty runs and input validation
//! - Compounding of assets and liabilities
//! - Contribution signs for each item kind
//! - Starting values and running totals across years

use crate::error::ProjectionError;
use crate::model::{Account, CashFlowItem, ChangeDirection, ExplicitAccount, ItemId, ItemKind};
use crate::simulation::project;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_zero_years_produces_no_records() {
    let assets = vec![Account::asset(ItemId(1), "Savings", 1_000.0)];

    let result = project(0, &[], &assets, &[], &[]).unwrap();

    assert!(result.year_records.is_empty());
    assert_eq!(result.final_value, 0.0);
    assert_eq!(result.total_contributed, 0.0);
    assert_eq!(result.total_growth, 0.0);
}

#[test]
fn test_negative_years_rejected() {
    let err = project(-1, &[], &[], &[], &[]).unwrap_err();
    assert_eq!(err, ProjectionError::NegativeYears(-1));
}

#[test]
fn test_duplicate_cash_flow_ids_rejected() {
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "Salary", true, 100_000.0),
        CashFlowItem::new(ItemId(1), "Rent", false, 24_000.0),
    ];

    let err = project(1, &[], &[], &[], &cash_flows).unwrap_err();

    assert_eq!(
        err,
        ProjectionError::DuplicateId {
            kind: ItemKind::Expense,
            id: ItemId(1)
        }
    );
}

#[test]
fn test_duplicate_asset_ids_rejected() {
    let assets = vec![
        Account::asset(ItemId(1), "House", 100_000.0),
        Account::asset(ItemId(1), "Cabin", 50_000.0),
    ];
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "Tax", false, 0.0).linked_to(ItemKind::Asset, ItemId(1), 10.0),
    ];

    let err = project(1, &[], &assets, &[], &cash_flows).unwrap_err();

    assert_eq!(
        err,
        ProjectionError::DuplicateId {
            kind: ItemKind::Asset,
            id: ItemId(1)
        }
    );
}

#[test]
fn test_static_values_used_as_given() {
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "Salary", true, 100_000.0),
        CashFlowItem::new(ItemId(2), "Rent", false, 24_000.0),
    ];

    let result = project(1, &[], &[], &[], &cash_flows).unwrap();

    assert_close(result.final_account_value("Salary").unwrap(), 100_000.0);
    assert_close(result.final_account_value("Rent").unwrap(), -24_000.0);
    assert!(result.is_clean());
}

#[test]
fn test_single_asset_one_year() {
    let assets = vec![
        Account::asset(ItemId(1), "Savings", 1_000.0).with_rate(5.0, ChangeDirection::Increase),
    ];

    let result = project(1, &[], &assets, &[], &[]).unwrap();

    assert_eq!(result.year_records.len(), 1);
    let record = &result.year_records[0];
    assert_eq!(record.year, 1);
    assert_close(record.starting_value, 1_000.0);
    assert_close(record.value_of("Savings").unwrap(), 1_050.0);
    assert_close(record.total_growth, 50.0);
    assert_close(record.total_value, 1_050.0);
    assert_close(result.final_value, 1_050.0);
}

#[test]
fn test_asset_compounds_over_years() {
    let assets = vec![
        Account::asset(ItemId(1), "Index Fund", 1_000.0).with_rate(5.0, ChangeDirection::Increase),
    ];

    let result = project(3, &[], &assets, &[], &[]).unwrap();

    let series: Vec<f64> = result.series("Index Fund").collect();
    assert_eq!(series.len(), 3);
    assert_close(series[0], 1_050.0);
    assert_close(series[1], 1_102.5);
    assert_close(series[2], 1_157.625);
    assert_close(result.total_growth, 157.625);
}

#[test]
fn test_depreciating_asset_loses_value() {
    let assets = vec![
        Account::asset(ItemId(1), "Car", 20_000.0).with_rate(10.0, ChangeDirection::Decrease),
    ];

    let result = project(2, &[], &assets, &[], &[]).unwrap();

    assert_close(result.final_account_value("Car").unwrap(), 16_200.0);
    assert_close(result.total_growth, -3_800.0);
}

#[test]
fn test_static_income_reports_annual_flow() {
    let cash_flows = vec![CashFlowItem::new(ItemId(1), "Salary", true, 1_200.0)];

    let result = project(1, &[], &[], &[], &cash_flows).unwrap();

    let record = &result.year_records[0];
    assert_close(record.value_of("Salary").unwrap(), 1_200.0);
    assert_close(record.total_contribution, 1_200.0);
    assert_close(record.total_growth, 0.0);
    assert_close(record.starting_value, 0.0);
}

#[test]
fn test_income_flow_amount_ignores_accumulated_growth() {
    // The change rate compounds the hidden balance, not the reported flow
    let cash_flows = vec![CashFlowItem::new(ItemId(1), "Salary", true, 1_200.0).with_change(10.0)];

    let result = project(2, &[], &[], &[], &cash_flows).unwrap();

    let series: Vec<f64> = result.series("Salary").collect();
    assert_close(series[0], 1_200.0);
    assert_close(series[1], 1_200.0);
    // Year 1: 1200 * 0.1 * 0.5; year 2: 1260 * 0.1 + 60
    assert_close(result.year_records[0].growth, 60.0);
    assert_close(result.year_records[1].growth, 186.0);
    assert_close(result.total_growth, 246.0);
}

#[test]
fn test_liability_contribution_reduces_balance() {
    let explicit = vec![
        ExplicitAccount::new("Car Loan", ItemKind::Liability, 10_000.0, 100.0),
        ExplicitAccount::new("Brokerage", ItemKind::Asset, 10_000.0, 100.0),
    ];

    let result = project(1, &explicit, &[], &[], &[]).unwrap();

    let record = &result.year_records[0];
    assert_close(record.value_of("Car Loan").unwrap(), 8_800.0);
    assert_close(record.value_of("Brokerage").unwrap(), 11_200.0);
    // -1200 + 1200
    assert_close(record.contributions, 0.0);
}

#[test]
fn test_expense_reports_negative_flow() {
    let cash_flows = vec![CashFlowItem::new(ItemId(1), "Rent", false, 18_000.0)];

    let result = project(1, &[], &[], &[], &cash_flows).unwrap();

    assert_close(result.final_account_value("Rent").unwrap(), -18_000.0);
    assert_close(result.total_contributed, -18_000.0);
}

#[test]
fn test_total_value_mixes_balances_and_flows() {
    let assets = vec![Account::asset(ItemId(1), "Checking", 5_000.0)];
    let liabilities = vec![Account::liability(ItemId(1), "Student Loan", 2_000.0)];
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "Salary", true, 3_000.0),
        CashFlowItem::new(ItemId(2), "Food", false, 1_000.0),
    ];

    let result = project(1, &[], &assets, &liabilities, &cash_flows).unwrap();

    // 5000 + 2000 + 3000 - 1000
    assert_close(result.year_records[0].total_value, 9_000.0);
    assert_close(result.final_value, 9_000.0);
}

#[test]
fn test_starting_value_is_previous_total() {
    let assets = vec![
        Account::asset(ItemId(1), "House", 100_000.0).with_rate(3.0, ChangeDirection::Increase),
    ];
    let explicit = vec![ExplicitAccount::new("Savings", ItemKind::Asset, 1_000.0, 50.0)];

    let result = project(4, &explicit, &assets, &[], &[]).unwrap();

    assert_close(result.year_records[0].starting_value, 101_000.0);
    for pair in result.year_records.windows(2) {
        assert_eq!(pair[1].starting_value, pair[0].total_value);
    }
}

#[test]
fn test_running_totals_accumulate() {
    let explicit = vec![
        ExplicitAccount::new("401k", ItemKind::Asset, 0.0, 500.0)
            .with_rate(6.0, ChangeDirection::Increase),
    ];

    let result = project(5, &explicit, &[], &[], &[]).unwrap();

    let mut contribution = 0.0;
    let mut growth = 0.0;
    for record in &result.year_records {
        contribution += record.contributions;
        growth += record.growth;
        assert_eq!(record.total_contribution, contribution);
        assert_eq!(record.total_growth, growth);
    }
    assert_close(result.total_contributed, 30_000.0);
    assert_eq!(result.total_growth, growth);
}
