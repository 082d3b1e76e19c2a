// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{fmt_money, get_currency_symbol, maybe_print_json, pretty_table, required};
use anyhow::Result;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?.trim();
            if ledger.add_account(name)? {
                println!("Added account '{}'", name);
            } else {
                println!("Account '{}' already exists", name);
            }
        }
        Some(("list", sub)) => {
            let accounts = ledger.accounts()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
                let data = accounts
                    .into_iter()
                    .map(|a| vec![a.id.to_string(), a.name])
                    .collect();
                println!("{}", pretty_table(&["ID", "Name"], data));
            }
        }
        Some(("balance", sub)) => {
            let name = required(sub, "name")?.trim();
            let balance = ledger.balance_for_account(name)?;
            let symbol = get_currency_symbol(ledger.conn())?;
            println!("{}: {}", name, fmt_money(&balance, &symbol));
        }
        _ => {}
    }
    Ok(())
}
