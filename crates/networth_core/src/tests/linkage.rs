//! Tests for derived cash flows
//!
//! These tests verify:
//! - Income/expense chains resolved before the run
//! - Balance-linked cash flows re-derived from each year's provisional balance
//! - Zero fallback and diagnostics for unresolvable links
//! - Strict linkage turning those diagnostics into errors

use crate::config::ProjectionOptions;
use crate::error::{LinkageIssue, ProjectionError};
use crate::model::{
    Account, CashFlowItem, ChangeDirection, Diagnostic, ExplicitAccount, ItemId, ItemKind,
};
use crate::simulation::{project, project_with_options};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn strict() -> ProjectionOptions {
    ProjectionOptions {
        strict_linkage: true,
    }
}

#[test]
fn test_expense_tracks_provisional_asset_balance() {
    let assets = vec![
        Account::asset(ItemId(1), "House", 1_000.0).with_rate(5.0, ChangeDirection::Increase),
    ];
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "Upkeep", false, 0.0).linked_to(ItemKind::Asset, ItemId(1), 10.0),
    ];

    let result = project(2, &[], &assets, &[], &cash_flows).unwrap();

    // This year's provisional balance (1050), not last year's committed one (1000)
    let upkeep: Vec<f64> = result.series("Upkeep").collect();
    assert_close(upkeep[0], -105.0);
    assert_close(upkeep[1], -110.25);

    let house: Vec<f64> = result.series("House").collect();
    assert_close(house[0], 1_050.0);
    assert_close(house[1], 1_102.5);
    assert!(result.is_clean());
}

#[test]
fn test_expense_tracks_liability_balance() {
    let liabilities = vec![
        Account::liability(ItemId(1), "Mortgage", 200_000.0)
            .with_rate(4.0, ChangeDirection::Increase),
    ];
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "Mortgage Insurance", false, 0.0).linked_to(
            ItemKind::Liability,
            ItemId(1),
            0.5,
        ),
    ];

    let result = project(1, &[], &[], &liabilities, &cash_flows).unwrap();

    // 0.5% of 208,000
    assert_close(result.final_account_value("Mortgage Insurance").unwrap(), -1_040.0);
    assert_close(result.final_account_value("Mortgage").unwrap(), 208_000.0);
}

#[test]
fn test_income_chain_resolved_before_run() {
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "Salary", true, 100_000.0),
        CashFlowItem::new(ItemId(2), "401k", false, 0.0).linked_to(ItemKind::Income, ItemId(1), 10.0),
        CashFlowItem::new(ItemId(3), "Match", true, 0.0).linked_to(ItemKind::Expense, ItemId(2), 50.0),
    ];

    let result = project(3, &[], &[], &[], &cash_flows).unwrap();

    for record in &result.year_records {
        assert_close(record.value_of("Salary").unwrap(), 100_000.0);
        assert_close(record.value_of("401k").unwrap(), -10_000.0);
        assert_close(record.value_of("Match").unwrap(), 5_000.0);
    }
    assert!(result.is_clean());
}

#[test]
fn test_cycle_regression_output() {
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "A", true, 0.0).linked_to(ItemKind::Income, ItemId(2), 50.0),
        CashFlowItem::new(ItemId(2), "B", true, 0.0).linked_to(ItemKind::Income, ItemId(1), 50.0),
    ];

    let result = project(2, &[], &[], &[], &cash_flows).unwrap();

    assert_eq!(result.year_records.len(), 2);
    for record in &result.year_records {
        assert_eq!(record.value_of("A"), Some(0.0));
        assert_eq!(record.value_of("B"), Some(0.0));
        assert_eq!(record.total_value, 0.0);
    }
    assert_eq!(result.final_value, 0.0);
    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::Linkage(LinkageIssue::Cycle {
            path: vec![ItemId(1), ItemId(2)]
        })]
    );
}

#[test]
fn test_strict_linkage_rejects_cycle() {
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "A", true, 0.0).linked_to(ItemKind::Income, ItemId(2), 50.0),
        CashFlowItem::new(ItemId(2), "B", true, 0.0).linked_to(ItemKind::Income, ItemId(1), 50.0),
    ];

    let err = project_with_options(2, &[], &[], &[], &cash_flows, &strict()).unwrap_err();

    assert_eq!(
        err,
        ProjectionError::UnresolvableLinkage(LinkageIssue::Cycle {
            path: vec![ItemId(1), ItemId(2)]
        })
    );
}

#[test]
fn test_missing_asset_target_falls_back_to_zero() {
    let assets = vec![Account::asset(ItemId(1), "House", 300_000.0)];
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "Boat Slip", false, 2_400.0).linked_to(
            ItemKind::Asset,
            ItemId(9),
            2.0,
        ),
    ];

    let result = project(2, &[], &assets, &[], &cash_flows).unwrap();

    assert!(result.series("Boat Slip").all(|v| v == 0.0));
    let issues: Vec<&LinkageIssue> = result.linkage_issues().collect();
    assert_eq!(
        issues,
        vec![&LinkageIssue::MissingTarget {
            item: ItemId(1),
            target_type: ItemKind::Asset,
            target_id: ItemId(9),
        }]
    );

    let err = project_with_options(2, &[], &assets, &[], &cash_flows, &strict()).unwrap_err();
    assert!(matches!(
        err,
        ProjectionError::UnresolvableLinkage(LinkageIssue::MissingTarget { .. })
    ));
}

#[test]
fn test_chain_into_balance_linked_item_is_unresolved() {
    let assets = vec![Account::asset(ItemId(1), "Rental", 200_000.0)];
    let cash_flows = vec![
        CashFlowItem::new(ItemId(1), "Rent Income", true, 0.0).linked_to(
            ItemKind::Asset,
            ItemId(1),
            6.0,
        ),
        CashFlowItem::new(ItemId(2), "Management Fee", false, 0.0).linked_to(
            ItemKind::Income,
            ItemId(1),
            8.0,
        ),
    ];

    let result = project(1, &[], &assets, &[], &cash_flows).unwrap();

    assert_close(result.final_account_value("Rent Income").unwrap(), 12_000.0);
    assert_eq!(result.final_account_value("Management Fee"), Some(0.0));
    assert_eq!(
        result.linkage_issues().cloned().collect::<Vec<_>>(),
        vec![LinkageIssue::UnresolvedTarget {
            item: ItemId(2),
            target_id: ItemId(1),
        }]
    );
}

#[test]
fn test_shadowed_explicit_account_is_not_a_linkage_error() {
    let assets = vec![Account::asset(ItemId(1), "Brokerage", 10_000.0)];
    let explicit = vec![ExplicitAccount::new("Brokerage", ItemKind::Asset, 99_000.0, 0.0)];

    let result = project_with_options(1, &explicit, &assets, &[], &[], &strict()).unwrap();

    assert_close(result.final_value, 10_000.0);
    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::ShadowedExplicitAccount {
            name: "Brokerage".into()
        }]
    );
}
