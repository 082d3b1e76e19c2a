// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendlog::error::{SpendError, ValidationError};
use spendlog::ledger::Ledger;
use spendlog::models::{NewTransaction, TxType};
use spendlog::month::MonthKey;
use spendlog::store::DeleteScope;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn ledger() -> Ledger {
    Ledger::from_connection(Connection::open_in_memory().unwrap()).unwrap()
}

fn entry(date: &str, amount: &str, tx_type: TxType, account: &str, category: Option<&str>) -> NewTransaction {
    NewTransaction {
        date: date.to_string(),
        description: String::new(),
        amount: d(amount),
        tx_type,
        account: account.to_string(),
        category: category.map(String::from),
    }
}

fn count(ledger: &Ledger) -> i64 {
    ledger
        .conn()
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn expense_over_balance_is_refused_before_write() {
    let ledger = ledger();
    ledger
        .add_transaction(entry("2024-03-05", "300", TxType::Income, "Cash", None))
        .unwrap();
    assert_eq!(ledger.balance_for_account("Cash").unwrap(), d("300"));

    let err = ledger
        .add_transaction(entry("2024-03-06", "1000", TxType::Expense, "Cash", Some("Rent")))
        .unwrap_err();
    match err {
        SpendError::Validation(ValidationError::InsufficientBalance {
            account,
            available,
            requested,
        }) => {
            assert_eq!(account, "Cash");
            assert_eq!(available, d("300"));
            assert_eq!(requested, d("1000"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(count(&ledger), 1);

    // Spending exactly the balance is fine.
    ledger
        .add_transaction(entry("2024-03-06", "300", TxType::Expense, "Cash", Some("Rent")))
        .unwrap();
    assert_eq!(ledger.balance_for_account("Cash").unwrap(), Decimal::ZERO);
}

#[test]
fn entry_rules_are_enforced() {
    let ledger = ledger();
    let cases = [
        (entry("2024-03-05", "0", TxType::Income, "Cash", None), ValidationError::NonPositiveAmount),
        (entry("2024-03-05", "-4", TxType::Income, "Cash", None), ValidationError::NonPositiveAmount),
        (entry("2024-03-05", "10", TxType::Income, "  ", None), ValidationError::MissingAccount),
        (entry("2024-03-05", "10", TxType::Expense, "Cash", Some(" ")), ValidationError::MissingCategory),
        (entry("2024-3-5", "10", TxType::Income, "Cash", None), ValidationError::InvalidDate("2024-3-5".into())),
        (entry("2024-02-30", "10", TxType::Income, "Cash", None), ValidationError::InvalidDate("2024-02-30".into())),
    ];
    for (e, want) in cases {
        match ledger.add_transaction(e) {
            Err(SpendError::Validation(got)) => assert_eq!(got, want),
            other => panic!("expected {want:?}, got {other:?}"),
        }
    }
    assert_eq!(count(&ledger), 0);
}

#[test]
fn descriptions_default_and_income_drops_category() {
    let ledger = ledger();
    ledger
        .add_transaction(entry("2024-03-01", "50", TxType::Income, "Cash", Some("Food")))
        .unwrap();
    ledger
        .add_transaction(entry("2024-03-02", "20", TxType::Expense, " Cash ", Some(" Food ")))
        .unwrap();
    let txs = ledger.transactions(None).unwrap();
    assert_eq!(txs[0].description, "Food");
    assert_eq!(txs[0].account.as_deref(), Some("Cash"));
    assert_eq!(txs[0].category.as_deref(), Some("Food"));
    assert_eq!(txs[1].description, "Income");
    assert_eq!(txs[1].category, None);
}

#[test]
fn facade_queries_agree_with_snapshot() {
    let ledger = ledger();
    ledger
        .add_transaction(entry("2024-03-05", "500", TxType::Income, "Cash", None))
        .unwrap();
    ledger
        .add_transaction(entry("2024-03-10", "200", TxType::Expense, "Cash", Some("Food")))
        .unwrap();
    ledger
        .add_transaction(entry("2024-02-01", "80", TxType::Income, "OPAY", None))
        .unwrap();

    let march = MonthKey::parse("2024-03").unwrap();
    let s = ledger.monthly_summary(&march).unwrap();
    assert_eq!((s.income, s.expense, s.balance), (d("500"), d("200"), d("300")));

    let dash = ledger.dashboard(&march).unwrap();
    assert_eq!(dash.summary, s);
    assert_eq!(dash.total_balance, d("380"));
    assert_eq!(dash.accounts[0].account, "Cash");
    assert_eq!(dash.accounts[1].account, "OPAY");
    assert_eq!(dash.accounts[1].income, Decimal::ZERO);
    assert_eq!(dash.accounts[1].balance, d("80"));

    let history = ledger.archive_history().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].month, march);

    let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    assert_eq!(ledger.trend(today, 6).unwrap().len(), 2);
    assert_eq!(ledger.expenses_by_category(&march).unwrap()[0].total, d("200"));
}

#[test]
fn deleting_one_transaction_leaves_others_intact() {
    let ledger = ledger();
    let keep = ledger
        .add_transaction(entry("2024-03-05", "500", TxType::Income, "Cash", None))
        .unwrap();
    let gone = ledger
        .add_transaction(entry("2024-03-10", "200", TxType::Expense, "Cash", Some("Food")))
        .unwrap();
    assert!(ledger.delete_transaction(gone).unwrap());
    assert!(!ledger.delete_transaction(gone).unwrap());

    let txs = ledger.transactions(None).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id, keep);
    let rows = ledger.account_balances(None).unwrap();
    assert_eq!(rows[0].balance, d("500"));
}

#[test]
fn reset_by_month_then_all() {
    let ledger = ledger();
    for date in ["2024-01-02", "2024-01-20", "2024-02-03"] {
        ledger
            .add_transaction(entry(date, "10", TxType::Income, "Cash", None))
            .unwrap();
    }
    let jan = MonthKey::parse("2024-01").unwrap();
    assert_eq!(ledger.reset(&DeleteScope::Month(jan)).unwrap(), 2);
    assert_eq!(count(&ledger), 1);
    assert_eq!(ledger.reset(&DeleteScope::All).unwrap(), 1);
    assert_eq!(count(&ledger), 0);
    assert_eq!(ledger.account_balances(None).unwrap()[0].account, "Cash");
}

#[test]
fn reference_data() {
    let ledger = ledger();
    let names: Vec<String> = ledger.accounts().unwrap().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["Cash", "ALAT", "OPAY"]);
    assert!(ledger.add_account("Savings").unwrap());
    assert!(!ledger.add_account("Savings").unwrap());
    assert!(ledger.add_account(" ").is_err());

    assert!(ledger.add_category("Transport").unwrap());
    assert!(ledger.add_category("Food").unwrap());
    assert!(!ledger.add_category(" Food ").unwrap());
    let cats: Vec<String> = ledger.categories().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(cats, vec!["Food", "Transport"]);
    assert!(ledger.remove_category("Food").unwrap());
    assert!(!ledger.remove_category("Food").unwrap());
}

#[test]
fn unreachable_store_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("db.sqlite");
    match Ledger::open(&path) {
        Err(SpendError::StorageUnavailable(msg)) => assert!(!msg.is_empty()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("opened a store in a missing directory"),
    }
}

#[test]
fn category_removed_by_id_through_cli() {
    let ledger = ledger();
    ledger.add_category("Food").unwrap();
    let id = ledger.categories().unwrap()[0].id;
    let matches = spendlog::cli::build_cli().get_matches_from([
        "spendlog".to_string(),
        "category".to_string(),
        "rm".to_string(),
        "--id".to_string(),
        id.to_string(),
    ]);
    if let Some(("category", sub)) = matches.subcommand() {
        spendlog::commands::categories::handle(&ledger, sub).unwrap();
    } else {
        panic!("no category subcommand");
    }
    assert!(ledger.categories().unwrap().is_empty());
}

#[test]
fn oversized_amounts_are_refused_and_totals_stay_usable() {
    let ledger = ledger();
    let huge = Decimal::MAX.to_string();
    for _ in 0..2 {
        match ledger.add_transaction(entry("2024-03-05", &huge, TxType::Income, "Cash", None)) {
            Err(SpendError::Validation(ValidationError::AmountTooLarge { max })) => {
                assert_eq!(max, spendlog::validate::max_amount());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
    assert_eq!(count(&ledger), 0);

    let cap = spendlog::validate::max_amount().to_string();
    ledger
        .add_transaction(entry("2024-03-05", &cap, TxType::Income, "Cash", None))
        .unwrap();
    ledger
        .add_transaction(entry("2024-03-06", &cap, TxType::Income, "Cash", None))
        .unwrap();
    let rows = ledger.account_balances(None).unwrap();
    assert_eq!(rows[0].balance, spendlog::validate::max_amount() * Decimal::TWO);
}

#[test]
fn padded_account_names_group_with_trimmed_lookup() {
    let ledger = ledger();
    ledger
        .conn()
        .execute(
            "INSERT INTO transactions(date, description, amount, type, account, category) VALUES ('2024-01-02','x','70','income','ALAT ',NULL)",
            [],
        )
        .unwrap();
    ledger
        .add_transaction(entry("2024-01-03", "30", TxType::Income, "ALAT", None))
        .unwrap();

    let rows = ledger.account_balances(None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].account, "ALAT");
    assert_eq!(rows[0].balance, d("100"));
    assert_eq!(ledger.balance_for_account("ALAT").unwrap(), d("100"));
    assert_eq!(ledger.balance_for_account("ALAT ").unwrap(), d("100"));
}

#[test]
fn file_store_runs_in_wal_mode() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(&dir.path().join("spendlog.sqlite")).unwrap();
    let mode: String = ledger
        .conn()
        .query_row("PRAGMA journal_mode", [], |r| r.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}
