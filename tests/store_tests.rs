// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use spendlog::db::{init_schema, SCHEMA_VERSION};
use spendlog::error::SpendError;
use spendlog::models::TxType;
use spendlog::month::MonthKey;
use spendlog::store::{self, TxFilter};

fn user_version(conn: &Connection) -> i32 {
    conn.query_row("PRAGMA user_version", [], |r| r.get(0)).unwrap()
}

fn account_names(conn: &Connection) -> Vec<String> {
    store::list_accounts(conn)
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect()
}

#[test]
fn fresh_store_is_current_and_seeded() {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    assert_eq!(user_version(&conn), SCHEMA_VERSION);
    assert_eq!(account_names(&conn), vec!["Cash", "ALAT", "OPAY"]);

    // Running again changes nothing.
    init_schema(&conn).unwrap();
    assert_eq!(user_version(&conn), SCHEMA_VERSION);
    assert_eq!(account_names(&conn).len(), 3);
}

#[test]
fn legacy_store_is_upgraded_and_readable() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            type TEXT,
            account TEXT,
            category TEXT
        );
        INSERT INTO transactions(date, description, amount, type, account, category)
            VALUES ('2023-05-01', 'Pay', 1500.25, 'Income', NULL, NULL);
        INSERT INTO transactions(date, description, amount, type, account, category)
            VALUES ('2023-05-02', 'Bus', 3, NULL, 'Cash', 'Transport');
        "#,
    )
    .unwrap();
    assert_eq!(user_version(&conn), 0);

    init_schema(&conn).unwrap();
    assert_eq!(user_version(&conn), SCHEMA_VERSION);
    assert_eq!(account_names(&conn), vec!["Cash", "ALAT", "OPAY"]);

    let txs = store::query_transactions(&conn, &TxFilter::all()).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].amount, Decimal::from(3));
    assert_eq!(txs[0].tx_type, TxType::Expense);
    assert_eq!(txs[1].amount, "1500.25".parse::<Decimal>().unwrap());
    assert_eq!(txs[1].tx_type, TxType::Income);
    assert_eq!(txs[1].account_name(), "Cash");
}

#[test]
fn unreadable_amount_is_reported_as_corrupt() {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO transactions(date, description, amount, type) VALUES ('2024-01-01','x','ten','income')",
        [],
    )
    .unwrap();
    match store::query_transactions(&conn, &TxFilter::all()) {
        Err(SpendError::Corrupt(msg)) => assert!(msg.contains("column 3")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn reads_are_newest_first_and_filterable() {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    for (date, account) in [
        ("2024-01-05", Some("Cash")),
        ("2024-02-01", None),
        ("2024-01-05", Some("OPAY")),
        ("2024-01-20", Some(" ")),
    ] {
        conn.execute(
            "INSERT INTO transactions(date, description, amount, type, account) VALUES (?1,'t','1','income',?2)",
            params![date, account],
        )
        .unwrap();
    }

    let all = store::query_transactions(&conn, &TxFilter::all()).unwrap();
    let order: Vec<i64> = all.iter().map(|t| t.id).collect();
    assert_eq!(order, vec![2, 4, 3, 1]);

    let jan = TxFilter::month(MonthKey::parse("2024-01").unwrap());
    assert_eq!(store::query_transactions(&conn, &jan).unwrap().len(), 3);

    let cash: Vec<i64> = store::query_transactions(&conn, &TxFilter::account("Cash"))
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(cash, vec![2, 4, 1]);
}

#[test]
fn amounts_are_stored_as_decimal_text() {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let entry = spendlog::models::NewTransaction {
        date: "2024-01-01".into(),
        description: "Pay".into(),
        amount: "0.10".parse().unwrap(),
        tx_type: TxType::Income,
        account: "Cash".into(),
        category: None,
    };
    let id = store::insert_transaction(&conn, &entry).unwrap();
    let (stored, kind): (String, String) = conn
        .query_row(
            "SELECT amount, typeof(amount) FROM transactions WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(stored, "0.1");
    assert_eq!(kind, "text");
}
