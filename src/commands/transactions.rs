// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{NewTransaction, Transaction, TxType};
use crate::month::MonthKey;
use crate::store::{self, DeleteScope, TxFilter};
use crate::utils::{
    fmt_money, get_currency_symbol, maybe_print_json, parse_date, parse_decimal, parse_month,
    pretty_table, required,
};
use anyhow::Result;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        Some(("reset", sub)) => reset(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn entry_from_args(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let tx_type: TxType = required(sub, "type")?.parse()?;
    Ok(NewTransaction {
        date: date.to_string(),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_default(),
        amount: parse_decimal(required(sub, "amount")?)?,
        tx_type,
        account: required(sub, "account")?.to_string(),
        category: sub.get_one::<String>("category").cloned(),
    })
}

fn add(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let entry = entry_from_args(sub)?;
    let id = ledger.add_transaction(entry.clone())?;
    let symbol = get_currency_symbol(ledger.conn())?;
    println!(
        "Recorded {} #{}: {} on {} (acct: {})",
        entry.tx_type,
        id,
        fmt_money(&entry.amount, &symbol),
        entry.date,
        entry.account.trim()
    );
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.clone(),
                    t.description.clone(),
                    t.amount.normalize().to_string(),
                    t.tx_type.to_string(),
                    t.account.clone().unwrap_or_default(),
                    t.category.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "Type", "Account", "Category"],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let mut filter = TxFilter::all();
    if let Some(month) = sub.get_one::<String>("month") {
        filter.month = Some(parse_month(month)?);
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        filter.account = Some(acct.trim().to_string());
    }
    Ok(store::query_transactions(ledger.conn(), &filter)?)
}

fn rm(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("Missing required argument --id"))?;
    if ledger.delete_transaction(id)? {
        println!("Deleted transaction #{}", id);
    } else {
        println!("No transaction #{}", id);
    }
    Ok(())
}

fn reset(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let scope = match sub.get_one::<String>("month") {
        Some(month) => DeleteScope::Month(MonthKey::parse(month)?),
        None => DeleteScope::All,
    };
    let n = ledger.reset(&scope)?;
    match scope {
        DeleteScope::Month(month) => {
            println!("Deleted {} transaction(s) for {}", n, month.display_name())
        }
        DeleteScope::All => println!("Deleted all {} transaction(s)", n),
    }
    Ok(())
}
