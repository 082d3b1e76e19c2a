// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures surfaced by the ledger, the aggregation queries and the report exporter.
#[derive(Debug, Error)]
pub enum SpendError {
    #[error("Nothing to export for {scope}")]
    EmptyExport { scope: String },

    #[error("Repository not initialized: {0}")]
    StorageUnavailable(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Export failed: {0}")]
    ExportDelivery(String),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Advisory checks that block a transaction from being recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    #[error("Amount must not exceed {max}")]
    AmountTooLarge { max: Decimal },

    #[error("Account is required")]
    MissingAccount,

    #[error("Category is required for expenses")]
    MissingCategory,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid transaction type '{0}', expected income or expense")]
    InvalidType(String),

    #[error("Amount {requested} is higher than the {available} available in {account}")]
    InsufficientBalance {
        account: String,
        available: Decimal,
        requested: Decimal,
    },
}

pub type Result<T> = std::result::Result<T, SpendError>;
