// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CSV reports.
//!
//! Formatting is a single pass over an in-memory snapshot and either returns the
//! whole text or fails before producing any. Getting the text to the user is the
//! job of an [`ExportSink`].

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::aggregate::{group_by_month, summarize};
use crate::error::{Result, SpendError};
use crate::models::{MonthlySummary, Transaction, TxType};

pub const COLUMNS: &str = "Date,Description,Amount,Type,Account,Category";

pub const ALL_TIME_LABEL: &str = "All Time";

const TITLE: &str = "EXPENSE TRACKER";

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

#[derive(Default)]
struct Lines(Vec<String>);

impl Lines {
    fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    fn blank(&mut self) {
        self.0.push(String::new());
    }

    fn summary(&mut self, heading: &str, s: &MonthlySummary, count: usize) {
        self.push(heading);
        self.push(format!("Total Income,{}", s.income.normalize()));
        self.push(format!("Total Expense,{}", s.expense.normalize()));
        self.push(format!("Current Balance,{}", s.balance.normalize()));
        self.push(format!("Transaction Count,{}", count));
    }

    fn rows(&mut self, txs: &[&Transaction]) {
        for t in txs {
            self.push(csv_row(t));
        }
    }

    fn finish(self) -> String {
        let mut out = self.0.join("\n");
        out.push('\n');
        out
    }
}

/// Wraps a field in double quotes, doubling any quote inside it.
pub fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// `Date,Description,Amount,Type,Account,Category`; only the description is quoted.
pub fn csv_row(t: &Transaction) -> String {
    [
        t.date.clone(),
        quote(&t.description),
        t.amount.normalize().to_string(),
        t.tx_type.to_string(),
        t.account.clone().unwrap_or_default(),
        t.category.clone().unwrap_or_default(),
    ]
    .join(",")
}

fn split_by_type<'a>(txs: &[&'a Transaction]) -> (Vec<&'a Transaction>, Vec<&'a Transaction>) {
    txs.iter().copied().partition(|t| t.tx_type == TxType::Income)
}

/// Report for a single month: summary, then income rows, then expense rows.
pub fn format_monthly_report(txs: &[Transaction], month_label: &str) -> Result<String> {
    if txs.is_empty() {
        return Err(SpendError::EmptyExport {
            scope: month_label.to_string(),
        });
    }
    let all: Vec<&Transaction> = txs.iter().collect();
    let (income, expense) = split_by_type(&all);

    let mut out = Lines::default();
    out.push(format!("{} - {}", TITLE, month_label.to_uppercase()));
    out.blank();
    out.summary("SUMMARY", &summarize(txs), txs.len());
    out.blank();
    out.push("TRANSACTIONS");
    out.blank();
    out.push("INCOME TRANSACTIONS");
    out.push(COLUMNS);
    out.rows(&income);
    out.blank();
    out.push("EXPENSE TRANSACTIONS");
    out.push(COLUMNS);
    out.rows(&expense);

    info!(scope = month_label, rows = txs.len(), "monthly report formatted");
    Ok(out.finish())
}

/// Report over every transaction: overall summary, then one block per month with
/// the most recent month first.
pub fn format_all_time_report(txs: &[Transaction]) -> Result<String> {
    if txs.is_empty() {
        return Err(SpendError::EmptyExport {
            scope: ALL_TIME_LABEL.to_string(),
        });
    }

    let mut out = Lines::default();
    out.push(format!("{} - {}", TITLE, ALL_TIME_LABEL.to_uppercase()));
    out.blank();
    out.summary("OVERALL SUMMARY", &summarize(txs), txs.len());
    out.blank();

    let groups = group_by_month(txs);
    for (month, group) in &groups {
        let (income, expense) = split_by_type(group);
        out.push(month.report_title());
        out.blank();
        out.summary(
            "MONTHLY SUMMARY",
            &summarize(group.iter().copied()),
            group.len(),
        );
        out.blank();
        out.push("INCOME TRANSACTIONS");
        if !income.is_empty() {
            out.push(COLUMNS);
            out.rows(&income);
        }
        out.blank();
        out.push("EXPENSE TRANSACTIONS");
        if !expense.is_empty() {
            out.push(COLUMNS);
            out.rows(&expense);
        }
        out.blank();
    }

    info!(months = groups.len(), rows = txs.len(), "all-time report formatted");
    Ok(out.finish())
}

/// `Expenses_March_2024.csv`
pub fn monthly_file_name(month_label: &str) -> String {
    format!("Expenses_{}.csv", WHITESPACE.replace_all(month_label, "_"))
}

/// `Expenses_All_Time_2024-03-31.csv`
pub fn all_time_file_name(today: NaiveDate) -> String {
    format!(
        "Expenses_{}_{}.csv",
        WHITESPACE.replace_all(ALL_TIME_LABEL, "_"),
        today.format("%Y-%m-%d")
    )
}

/// Hands a finished report to the user.
pub trait ExportSink {
    fn deliver(&self, file_name: &str, content: &str) -> Result<PathBuf>;
}

/// Writes reports into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            SpendError::ExportDelivery(format!("{}: {}", self.dir.display(), e))
        })?;
        let path = self.dir.join(file_name);
        fs::write(&path, content)
            .map_err(|e| SpendError::ExportDelivery(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), bytes = content.len(), "report written");
        Ok(path)
    }
}
