// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::ledger::Ledger;
use crate::utils::{fmt_money, get_currency_symbol, maybe_print_json, month_or_current, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(ledger, sub)?,
        Some(("balances", sub)) => balances(ledger, sub)?,
        Some(("categories", sub)) => categories(ledger, sub)?,
        Some(("trend", sub)) => trend(ledger, sub)?,
        Some(("history", sub)) => history(ledger, sub)?,
        Some(("dashboard", sub)) => dashboard(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn flags(sub: &clap::ArgMatches) -> (bool, bool) {
    (sub.get_flag("json"), sub.get_flag("jsonl"))
}

fn summary(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = flags(sub);
    let month = month_or_current(sub.get_one::<String>("month"))?;
    let s = ledger.monthly_summary(&month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let sym = get_currency_symbol(ledger.conn())?;
        let data = vec![vec![
            month.display_name(),
            fmt_money(&s.income, &sym),
            fmt_money(&s.expense, &sym),
            fmt_money(&s.balance, &sym),
        ]];
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Balance"], data)
        );
    }
    Ok(())
}

fn balances(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = flags(sub);
    let month = if sub.get_flag("all_time") {
        None
    } else {
        Some(month_or_current(sub.get_one::<String>("month"))?)
    };
    let rows = ledger.account_balances(month.as_ref())?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let sym = get_currency_symbol(ledger.conn())?;
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.account.clone(),
                    fmt_money(&r.balance, &sym),
                    fmt_money(&r.income, &sym),
                    fmt_money(&r.expense, &sym),
                ]
            })
            .collect();
        let scope = month
            .map(|m| m.display_name())
            .unwrap_or_else(|| "All Time".to_string());
        let inc = format!("In ({})", scope);
        let out = format!("Out ({})", scope);
        println!(
            "{}",
            pretty_table(&["Account", "Balance", &inc, &out], data)
        );
    }
    Ok(())
}

fn categories(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = flags(sub);
    let month = month_or_current(sub.get_one::<String>("month"))?;
    let rows = ledger.expenses_by_category(&month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let sym = get_currency_symbol(ledger.conn())?;
        let data = rows
            .iter()
            .map(|r| vec![r.category.clone(), fmt_money(&r.total, &sym)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

fn trend(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = flags(sub);
    let months = sub
        .get_one::<u32>("months")
        .copied()
        .unwrap_or(aggregate::DEFAULT_TREND_MONTHS);
    let today = chrono::Local::now().date_naive();
    let rows = ledger.trend(today, months)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let sym = get_currency_symbol(ledger.conn())?;
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.month.to_string(),
                    r.label.clone(),
                    fmt_money(&r.income, &sym),
                    fmt_money(&r.expense, &sym),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Label", "Income", "Expense"], data)
        );
    }
    Ok(())
}

fn history(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = flags(sub);
    let rows = ledger.archive_history()?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let sym = get_currency_symbol(ledger.conn())?;
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.month.display_name(),
                    fmt_money(&r.income, &sym),
                    fmt_money(&r.expense, &sym),
                    fmt_money(&(r.income - r.expense), &sym),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], data)
        );
    }
    Ok(())
}

fn dashboard(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = flags(sub);
    let month = month_or_current(sub.get_one::<String>("month"))?;
    let d = ledger.dashboard(&month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &d)? {
        let sym = get_currency_symbol(ledger.conn())?;
        println!(
            "{}  |  Total balance {}",
            month.display_name(),
            fmt_money(&d.total_balance, &sym)
        );
        println!(
            "{}",
            pretty_table(
                &["Income", "Expense", "Balance"],
                vec![vec![
                    fmt_money(&d.summary.income, &sym),
                    fmt_money(&d.summary.expense, &sym),
                    fmt_money(&d.summary.balance, &sym),
                ]],
            )
        );
        let data = d
            .accounts
            .iter()
            .map(|a| {
                vec![
                    a.account.clone(),
                    fmt_money(&a.balance, &sym),
                    fmt_money(&a.income, &sym),
                    fmt_money(&a.expense, &sym),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Account", "Balance", "In", "Out"], data)
        );
    }
    Ok(())
}
