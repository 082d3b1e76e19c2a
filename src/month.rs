// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! `YYYY-MM` month keys.
//!
//! Every monthly grouping keys off the first seven characters of a stored
//! `YYYY-MM-DD` date. Both formats are zero-padded and year-first, so plain
//! string ordering is chronological ordering.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || b.is_ascii_digit());
        if !shaped {
            return Err(ValidationError::InvalidMonth(s.to_string()));
        }
        match s[5..].parse::<u32>() {
            Ok(m) if (1..=12).contains(&m) => Ok(MonthKey(s.to_string())),
            _ => Err(ValidationError::InvalidMonth(s.to_string())),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey(date.format("%Y-%m").to_string())
    }

    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Month key of a stored `YYYY-MM-DD` date string.
    pub fn of_date(date: &str) -> Self {
        MonthKey(Self::prefix(date).to_string())
    }

    pub(crate) fn prefix(date: &str) -> &str {
        date.get(..7).unwrap_or(date)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, date: &str) -> bool {
        Self::prefix(date) == self.0
    }

    fn parts(&self) -> (i32, u32) {
        let y = self.0.get(..4).and_then(|s| s.parse().ok()).unwrap_or(0);
        let m = self.0.get(5..7).and_then(|s| s.parse().ok()).unwrap_or(1);
        (y, m)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        let (y, m) = self.parts();
        NaiveDate::from_ymd_opt(y, m, 1)
    }

    /// Moves `n` calendar months forward (or back when negative).
    pub fn shift(&self, n: i32) -> Self {
        let (y, m) = self.parts();
        let idx = y * 12 + (m as i32 - 1) + n;
        let year = idx.div_euclid(12);
        let month = idx.rem_euclid(12) + 1;
        MonthKey(format!("{:04}-{:02}", year, month))
    }

    fn format(&self, pattern: &str) -> String {
        self.first_day()
            .map(|d| d.format(pattern).to_string())
            .unwrap_or_else(|| self.0.clone())
    }

    /// `Mar`
    pub fn short_label(&self) -> String {
        self.format("%b")
    }

    /// `March 2024`
    pub fn display_name(&self) -> String {
        self.format("%B %Y")
    }

    /// `MARCH (2024)`, the heading of a month block in the all-time report.
    pub fn report_title(&self) -> String {
        self.format("%B (%Y)").to_uppercase()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
