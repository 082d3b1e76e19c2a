// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ledger::Ledger;
use crate::utils::{get_currency_symbol, pretty_table, required, set_currency_symbol};
use anyhow::Result;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let version: i32 = ledger
                .conn()
                .query_row("PRAGMA user_version", [], |r| r.get(0))?;
            let data = vec![
                vec!["database".into(), db::db_path()?.display().to_string()],
                vec!["exports".into(), db::export_dir()?.display().to_string()],
                vec!["schema_version".into(), version.to_string()],
                vec!["currency_symbol".into(), get_currency_symbol(ledger.conn())?],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], data));
        }
        Some(("set-currency", sub)) => {
            let symbol = required(sub, "symbol")?.trim();
            set_currency_symbol(ledger.conn(), symbol)?;
            println!("Currency symbol set to {}", symbol);
        }
        _ => {}
    }
    Ok(())
}
