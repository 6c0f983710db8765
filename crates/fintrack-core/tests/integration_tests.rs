//! Integration tests for fintrack-core
//!
//! These tests exercise the full record → summarize → trend → budget
//! workflow against a real (temporary) database.

use chrono::NaiveDate;

use fintrack_core::{
    budget_performance, financial_summary,
    db::Database,
    models::{BudgetStatus, NewBudgetGoal, NewTransaction, TransactionKind},
};

const OWNER: &str = "default";

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn seed_january_ledger(db: &Database) {
    let rows = [
        (TransactionKind::Income, "salary", 1000.0, "2024-01-05"),
        (TransactionKind::Expense, "food", 200.0, "2024-01-10"),
        (TransactionKind::Expense, "food", 50.0, "2024-01-20"),
    ];
    for (kind, category, amount, day) in rows {
        db.insert_transaction(
            OWNER,
            &NewTransaction {
                kind,
                category: category.to_string(),
                amount,
                description: None,
                occurred_on: date(day),
            },
        )
        .expect("Failed to insert transaction");
    }
}

#[test]
fn test_full_ledger_workflow() {
    let db = Database::in_memory().expect("Failed to create database");
    seed_january_ledger(&db);

    // Listing returns the snapshot most-recent-first
    let transactions = db.list_transactions(OWNER, 100).unwrap();
    assert_eq!(transactions.len(), 3);
    assert_eq!(transactions[0].occurred_on, date("2024-01-20"));

    // Summary over the listed snapshot
    let summary = financial_summary(&transactions);
    assert_eq!(summary.total_income, 1000.0);
    assert_eq!(summary.total_expenses, 250.0);
    assert_eq!(summary.net_balance, 750.0);
    assert_eq!(summary.expenses_by_category["food"], 250.0);
    assert_eq!(summary.savings_rate, 75.0);

    // Trends anchored inside the same window
    let trends = db.spending_trends(OWNER, date("2024-01-25")).unwrap();
    assert_eq!(trends.monthly_trends.len(), 1);
    assert_eq!(trends.monthly_trends[0].month, "2024-01");
    assert_eq!(trends.category_trends[0].category, "food");
    assert_eq!(trends.category_trends[0].transaction_count, 2);

    // Budget performance for the period
    db.upsert_budget_goal(
        OWNER,
        &NewBudgetGoal {
            category: "food".to_string(),
            amount: 300.0,
            month: 1,
            year: 2024,
        },
    )
    .unwrap();

    let perf = budget_performance(&db, OWNER, 1, 2024).unwrap();
    assert_eq!(perf.budget_performance.len(), 1);
    assert_eq!(perf.budget_performance[0].actual, 250.0);
    assert_eq!(perf.budget_performance[0].difference, 50.0);
    assert_eq!(perf.overall_status, BudgetStatus::WithinBudget);

    // Deleting a transaction changes the derived figures
    let deleted = db.delete_transaction(OWNER, transactions[0].id).unwrap();
    assert!(deleted);
    let summary = financial_summary(&db.list_transactions(OWNER, 100).unwrap());
    assert_eq!(summary.total_expenses, 200.0);
}

#[test]
fn test_engines_see_committed_state_immediately() {
    let db = Database::in_memory().expect("Failed to create database");
    seed_january_ledger(&db);

    // A second handle to the same pool observes the same committed rows
    let db2 = db.clone();
    assert_eq!(db2.count_transactions(OWNER).unwrap(), 3);

    db2.insert_transaction(
        OWNER,
        &NewTransaction {
            kind: TransactionKind::Expense,
            category: "transport".to_string(),
            amount: 15.0,
            description: Some("bus pass".to_string()),
            occurred_on: date("2024-01-21"),
        },
    )
    .unwrap();

    assert_eq!(db.count_transactions(OWNER).unwrap(), 4);
}
