// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::aggregate;
use crate::ledger::Ledger;
use crate::models::TxType;
use crate::utils::pretty_table;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

pub fn handle(ledger: &Ledger) -> Result<()> {
    let issues = find_issues(ledger)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Read-only scan over one snapshot of the store.
pub fn find_issues(ledger: &Ledger) -> Result<Vec<Issue>> {
    let txs = ledger.transactions(None)?;
    let known: HashSet<String> = ledger.accounts()?.into_iter().map(|a| a.name).collect();
    let mut issues = Vec::new();

    // 1) Expenses recorded without a category
    for t in txs.iter().filter(|t| t.tx_type == TxType::Expense) {
        if t.category.as_deref().is_none_or(|c| c.trim().is_empty()) {
            issues.push(Issue {
                kind: "expense_without_category",
                detail: format!("#{} {} {}", t.id, t.date, t.amount.normalize()),
            });
        }
    }

    // 2) No account on the row; it still counts toward Cash
    for t in &txs {
        if t.account.as_deref().is_none_or(|a| a.trim().is_empty()) {
            issues.push(Issue {
                kind: "no_account",
                detail: format!("#{} {} (counted as {})", t.id, t.date, t.account_name()),
            });
        }
    }

    // 3) Accounts referenced by transactions but missing from the accounts table
    let mut seen = HashSet::new();
    for t in &txs {
        let name = t.account_name();
        if !known.contains(name) && seen.insert(name) {
            issues.push(Issue {
                kind: "unknown_account",
                detail: name.to_string(),
            });
        }
    }

    // 4) Derived balances below zero
    for row in aggregate::account_balances(&txs, None) {
        if row.balance.is_sign_negative() && !row.balance.is_zero() {
            issues.push(Issue {
                kind: "negative_balance",
                detail: format!("{} {}", row.account, row.balance.normalize()),
            });
        }
    }

    Ok(issues)
}
