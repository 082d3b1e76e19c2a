// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::{NewTransaction, TxType};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

/// Largest amount a single entry may carry. Keeps every running total far from
/// `Decimal::MAX`.
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

/// Accepts only zero-padded `YYYY-MM-DD` calendar dates.
pub fn check_date(s: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_RE.is_match(s) {
        return Err(ValidationError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Trims the entry and fills in defaults: a blank description becomes the category
/// for expenses or `Income`, and income never carries a category.
pub fn normalize(mut tx: NewTransaction) -> NewTransaction {
    tx.date = tx.date.trim().to_string();
    tx.account = tx.account.trim().to_string();
    tx.category = match tx.tx_type {
        TxType::Income => None,
        TxType::Expense => tx
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
    };
    let desc = tx.description.trim();
    tx.description = if !desc.is_empty() {
        desc.to_string()
    } else {
        match (&tx.tx_type, &tx.category) {
            (TxType::Expense, Some(cat)) => cat.clone(),
            (TxType::Expense, None) => String::new(),
            (TxType::Income, _) => "Income".to_string(),
        }
    };
    tx
}

/// Field checks that need no stored data. Expects a normalized entry.
pub fn check_fields(tx: &NewTransaction) -> Result<(), ValidationError> {
    if tx.amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if tx.amount > max_amount() {
        return Err(ValidationError::AmountTooLarge { max: max_amount() });
    }
    if tx.account.is_empty() {
        return Err(ValidationError::MissingAccount);
    }
    if tx.tx_type == TxType::Expense && tx.category.is_none() {
        return Err(ValidationError::MissingCategory);
    }
    check_date(&tx.date)?;
    Ok(())
}

/// Rejects an expense larger than what the account currently holds.
///
/// Advisory only: nothing stops a balance from going negative through other paths.
pub fn check_funds(tx: &NewTransaction, available: Decimal) -> Result<(), ValidationError> {
    if tx.tx_type == TxType::Expense && tx.amount > available {
        return Err(ValidationError::InsufficientBalance {
            account: tx.account.clone(),
            available,
            requested: tx.amount,
        });
    }
    Ok(())
}
