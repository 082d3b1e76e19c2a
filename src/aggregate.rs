// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reporting aggregates.
//!
//! Everything here is a pure function of a transaction snapshot, so callers that
//! need several figures (a dashboard, a report) read the store once and derive all
//! of them from the same slice. Nothing is cached between calls.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    AccountBalance, ArchiveRow, CategoryTotal, DEFAULT_ACCOUNT, MonthlySummary, Transaction,
    TrendPoint, TxType,
};
use crate::month::MonthKey;

pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Widest trend window, in months.
pub const MAX_TREND_MONTHS: u32 = 1200;

pub const UNCATEGORIZED: &str = "(uncategorized)";

/// Income and expense totals over `txs`; `balance = income - expense`.
pub fn summarize<'a, I>(txs: I) -> MonthlySummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, expense) = totals(txs);
    MonthlySummary {
        income,
        expense,
        balance: income - expense,
    }
}

fn totals<'a, I>(txs: I) -> (Decimal, Decimal)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    txs.into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| {
            match t.tx_type {
                TxType::Income => (inc + t.amount, exp),
                TxType::Expense => (inc, exp + t.amount),
            }
        })
}

/// Totals for one month. A month with no data is all zero.
pub fn monthly_summary(txs: &[Transaction], month: &MonthKey) -> MonthlySummary {
    summarize(txs.iter().filter(|t| month.contains(&t.date)))
}

/// Per-account figures, largest balance first.
///
/// `balance` always covers every transaction ever recorded for the account;
/// `income`/`expense` are restricted to `month` when one is given. Accounts whose
/// three figures are all zero are left out. When nothing remains a single zero
/// `Cash` row is returned so callers always have something to show.
pub fn account_balances(txs: &[Transaction], month: Option<&MonthKey>) -> Vec<AccountBalance> {
    let mut map: BTreeMap<&str, (Decimal, Decimal, Decimal)> = BTreeMap::new();
    for t in txs {
        let entry = map
            .entry(t.account_name())
            .or_insert((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO));
        entry.0 += t.signed_amount();
        if month.is_none_or(|m| m.contains(&t.date)) {
            match t.tx_type {
                TxType::Income => entry.1 += t.amount,
                TxType::Expense => entry.2 += t.amount,
            }
        }
    }

    let mut rows: Vec<AccountBalance> = map
        .into_iter()
        .filter(|(_, (bal, inc, exp))| !(bal.is_zero() && inc.is_zero() && exp.is_zero()))
        .map(|(account, (balance, income, expense))| AccountBalance {
            account: account.to_string(),
            balance,
            income,
            expense,
        })
        .collect();
    // BTreeMap order already breaks ties by name; sort_by is stable.
    rows.sort_by(|a, b| b.balance.cmp(&a.balance));

    if rows.is_empty() {
        rows.push(AccountBalance {
            account: DEFAULT_ACCOUNT.to_string(),
            balance: Decimal::ZERO,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        });
    }
    rows
}

/// All-time signed balance of one account.
pub fn balance_for_account(txs: &[Transaction], account: &str) -> Decimal {
    let account = account.trim();
    txs.iter()
        .filter(|t| t.account_name() == account)
        .map(Transaction::signed_amount)
        .sum()
}

/// Expense totals per category for `month`, largest first.
pub fn expenses_by_category(txs: &[Transaction], month: &MonthKey) -> Vec<CategoryTotal> {
    let mut agg: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in txs
        .iter()
        .filter(|t| t.tx_type == TxType::Expense && month.contains(&t.date))
    {
        let cat = t
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(UNCATEGORIZED);
        *agg.entry(cat).or_insert(Decimal::ZERO) += t.amount;
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total));
    items
}

fn by_month<'a, I>(txs: I) -> BTreeMap<&'a str, (Decimal, Decimal)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut map: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
    for t in txs {
        let entry = map
            .entry(t.month_key())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.tx_type {
            TxType::Income => entry.0 += t.amount,
            TxType::Expense => entry.1 += t.amount,
        }
    }
    map
}

/// Month-by-month totals for the `window` calendar months ending with the month of
/// `today`, oldest first.
///
/// Only months that have data appear, so the result can be shorter than `window`.
/// A window of zero is treated as one; windows wider than `MAX_TREND_MONTHS` are
/// clamped to it.
pub fn trailing_trend(txs: &[Transaction], today: NaiveDate, window: u32) -> Vec<TrendPoint> {
    let end = MonthKey::from_date(today);
    let span = window.clamp(1, MAX_TREND_MONTHS) as i32;
    let start = end.shift(-(span - 1));
    let in_window = txs.iter().filter(|t| {
        let m = t.month_key();
        m >= start.as_str() && m <= end.as_str()
    });
    by_month(in_window)
        .into_iter()
        .map(|(m, (income, expense))| {
            let month = MonthKey::of_date(m);
            TrendPoint {
                label: month.short_label(),
                month,
                income,
                expense,
            }
        })
        .collect()
}

/// One row per month that has any transaction, most recent first.
pub fn archive_history(txs: &[Transaction]) -> Vec<ArchiveRow> {
    by_month(txs)
        .into_iter()
        .rev()
        .map(|(m, (income, expense))| ArchiveRow {
            month: MonthKey::of_date(m),
            income,
            expense,
        })
        .collect()
}

/// Splits `txs` into month groups, most recent month first. Order inside a group is
/// the input order.
pub fn group_by_month(txs: &[Transaction]) -> Vec<(MonthKey, Vec<&Transaction>)> {
    let mut map: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for t in txs {
        map.entry(t.month_key()).or_default().push(t);
    }
    map.into_iter()
        .rev()
        .map(|(m, group)| (MonthKey::of_date(m), group))
        .collect()
}
